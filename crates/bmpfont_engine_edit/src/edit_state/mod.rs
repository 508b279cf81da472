//! Edit state module structure
//!
//! - `state.rs` - Struct definition, constructors, getters, file handling
//! - `input.rs` - Pointer input, color and zoom
//! - `undo.rs` - Undo/redo system

mod input;
mod state;
mod undo;

pub use state::EditState;
