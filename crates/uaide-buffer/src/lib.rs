//! # uaide buffer
//!
//! Rope-backed text buffer used by the editor core.
//!
//! ## Key Concepts
//!
//! ### Character offsets
//! - Every offset handed to or returned from `TextBuffer` counts Unicode
//!   scalar values, not bytes. Cyrillic text is two bytes per letter in
//!   UTF-8, so byte and char offsets diverge quickly.
//! - `Position` is the line/column view of the same offset.
//!
//! ### Undo granularity
//! - Each `insert`/`delete` is one undo step unless wrapped in a group.
//! - `TextBuffer::grouped` turns several edits into a single step, which
//!   is how compound edits (bracket pairs, completions) stay atomic.

mod buffer;
mod cursor;
mod history;

pub use buffer::{BufferConfig, TextBuffer};
pub use cursor::Position;
pub use history::{Edit, EditGroup, EditKind, History};

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Position {line}:{column} is out of bounds")]
    PositionOutOfBounds { line: usize, column: usize },

    #[error("Invalid character index: {0}")]
    InvalidCharIndex(usize),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
