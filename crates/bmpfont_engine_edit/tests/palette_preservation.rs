//! Randomized editing never alters the palette table on disk

mod helpers;

use bmpfont_engine::{codec::palette_table, BmpCodec, IndexedCodec};
use bmpfont_engine_edit::{EditState, UndoState};
use helpers::write_test_strip;
use pretty_assertions::assert_eq;

#[test]
fn test_random_edits_keep_palette_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_test_strip(dir.path(), "char0001.bmp");
    let loaded = std::fs::read(&path).unwrap();

    let mut rng = fastrand::Rng::with_seed(0x5EED);
    let mut state = EditState::open(&path).unwrap();
    let zoom = state.zoom() as i32;
    let (width, height) = state.grid().size();

    for _ in 0..1000 {
        state.set_color(rng.u8(0..2)).unwrap();
        let x = rng.i32(0..width as i32);
        let y = rng.i32(0..height as i32);
        state.pointer_pressed(x * zoom + rng.i32(0..zoom), y * zoom + rng.i32(0..zoom));
        state.pointer_released();
    }
    state.save().unwrap();

    let saved = std::fs::read(&path).unwrap();
    assert_eq!(palette_table(&saved).unwrap(), palette_table(&loaded).unwrap());
    assert_eq!(
        palette_table(&saved).unwrap(),
        BmpCodec.palette_bytes(state.palette().unwrap()).as_slice()
    );
    assert_eq!(saved.len(), loaded.len());
}

#[test]
fn test_undo_all_edits_restores_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_test_strip(dir.path(), "char0001.bmp");
    let loaded = std::fs::read(&path).unwrap();

    let mut rng = fastrand::Rng::with_seed(42);
    let mut state = EditState::open(&path).unwrap();
    let (width, height) = state.grid().size();

    for _ in 0..200 {
        state.pointer_pressed(rng.i32(0..width as i32 * 20), rng.i32(0..height as i32 * 20));
        for _ in 0..rng.usize(0..5) {
            state.pointer_moved(rng.i32(-20..width as i32 * 20 + 20), rng.i32(0..height as i32 * 20));
        }
        state.pointer_released();
    }
    while state.can_undo() {
        state.undo().unwrap();
    }
    state.save().unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), loaded);
}
