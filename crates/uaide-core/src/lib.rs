//! # uaide core
//!
//! Editing model and the glue around it.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                        Editor                         │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐  │
//! │  │ Document │ │Completion│ │ Console  │ │ EventBus │  │
//! │  └────┬─────┘ └────┬─────┘ └────▲─────┘ └──────────┘  │
//! │       │ pairing    │ vocabulary │ run output          │
//! │       ▼            ▼            │                     │
//! │  ┌──────────┐ ┌──────────┐ ┌────┴─────────────┐       │
//! │  │TextBuffer│ │  Lexer   │ │ ExecutionBridge  │──► interpreter
//! │  └──────────┘ └──────────┘ └──────────────────┘       │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! The UI drives its own text widget but calls into `pairing`,
//! `completion`, `runner`, `console` and `files` for every decision, so
//! the same rules apply headless (through `Editor`) and on screen.

pub mod completion;
pub mod config;
pub mod console;
pub mod document;
pub mod editor;
pub mod event;
pub mod files;
pub mod pairing;
pub mod runner;

pub use completion::{Completer, CompletionState, Suggestion};
pub use config::Config;
pub use console::{Console, LogEntry, LogKind};
pub use document::Document;
pub use editor::Editor;
pub use event::{EditorEvent, EventBus};
pub use pairing::TypeAction;
pub use runner::{ExecutionBridge, ExecutionResult, RunError, RunId};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Buffer error: {0}")]
    Buffer(#[from] uaide_buffer::BufferError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("No suggestion at index {0}")]
    NoSuchSuggestion(usize),
}
