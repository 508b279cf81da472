mod helpers;

use bmpfont_engine::{EngineError, FontDocument, IndexedGrid};
use bmpfont_engine_edit::{EditState, EditorOptions, UndoState};
use helpers::{create_test_document, create_test_state, write_test_strip, write_true_color_bitmap};
use pretty_assertions::assert_eq;

#[test]
fn test_set_color_validates_palette() {
    let mut state = create_test_state();
    state.set_color(0).unwrap();
    assert_eq!(state.color_index(), 0);

    let err = state.set_color(2).unwrap_err();
    assert!(matches!(err, EngineError::ColorIndexOutOfPalette { index: 2, palette_len: 2 }));
    assert_eq!(state.color_index(), 0);
}

#[test]
fn test_document_without_palette_accepts_any_color() {
    let mut state = EditState::new(FontDocument::new(IndexedGrid::new(4, 4), None));
    state.set_color(200).unwrap();
    state.pointer_pressed(0, 0);
    assert_eq!(state.grid().pixel(0, 0), Some(200));
}

#[test]
fn test_with_options() {
    let options = EditorOptions {
        zoom: 35,
        color_index: 0,
        char_height: Some(16),
        ..Default::default()
    };
    let state = EditState::with_options(create_test_document(), &options);
    assert_eq!(state.zoom(), 35);
    assert_eq!(state.color_index(), 0);
    assert_eq!(state.strip().num_chars(), 128);
    assert!(!state.can_undo());
}

#[test]
fn test_with_options_invalid_color_falls_back() {
    let options = EditorOptions {
        color_index: 9,
        zoom: 500,
        ..Default::default()
    };
    let state = EditState::with_options(create_test_document(), &options);
    assert_eq!(state.color_index(), 0);
    assert_eq!(state.zoom(), 50);
}

#[test]
fn test_hover_label() {
    let mut state = create_test_state();
    state.pointer_moved(0, 65 * 8 * 20);
    assert_eq!(state.hovered_glyph(), Some(65));
    assert_eq!(state.hover_label(), Some("#65 (ASCII 65: 'A')".to_string()));
    state.pointer_left();
    assert_eq!(state.hover_label(), None);
}

#[test]
fn test_open_replaces_document() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_test_strip(dir.path(), "char0001.bmp");
    let second = write_test_strip(dir.path(), "char0002.bmp");

    let mut state = EditState::open(&first).unwrap();
    state.pointer_pressed(0, 0);
    state.pointer_released();
    assert!(state.can_undo());

    state.open_file(&second).unwrap();
    assert_eq!(state.document().path(), Some(second.as_path()));
    assert!(!state.can_undo());
    assert!(!state.is_dirty());
    assert_eq!(state.grid().pixel(0, 0), Some(0));
}

#[test]
fn test_failed_open_keeps_document() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_test_strip(dir.path(), "char0001.bmp");
    std::fs::write(dir.path().join("char0002.bmp"), b"BM broken").unwrap();

    let mut state = EditState::open(&first).unwrap();
    state.pointer_pressed(0, 0);
    let err = state.open_file(dir.path().join("char0002.bmp")).unwrap_err();
    assert!(err.is_decode_error());
    assert_eq!(state.document().path(), Some(first.as_path()));
    assert_eq!(state.grid().pixel(0, 0), Some(1));
}

#[test]
fn test_save_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_test_strip(dir.path(), "char0001.bmp");

    let mut state = EditState::open(&path).unwrap();
    state.pointer_pressed(20, 40);
    state.save().unwrap();

    let reloaded = FontDocument::load(&path).unwrap();
    assert_eq!(reloaded.grid().pixel(1, 2), Some(1));
    assert_eq!(reloaded.palette(), state.palette());
}

#[test]
fn test_true_color_source_edits_but_does_not_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_true_color_bitmap(dir.path(), "char0001.bmp");
    let original = std::fs::read(&path).unwrap();

    let mut state = EditState::open(&path).unwrap();
    assert!(state.palette().is_none());
    assert!(state.set_color(2).is_err());
    state.set_color(1).unwrap();
    state.pointer_pressed(0, 0);
    assert!(state.is_dirty());

    let err = state.save().unwrap_err();
    assert!(matches!(err, EngineError::NoPalette));
    assert!(state.is_dirty());
    assert_eq!(std::fs::read(&path).unwrap(), original);
}

#[test]
fn test_save_without_path_fails() {
    let mut state = create_test_state();
    let err = state.save().unwrap_err();
    assert!(err.is_encode_error());
}

#[test]
fn test_into_document_commits_stroke() {
    let mut state = create_test_state();
    state.pointer_pressed(0, 0);
    let document = state.into_document();
    assert!(document.is_dirty());
    assert_eq!(document.grid().pixel(0, 0), Some(1));
}
