use iced::keyboard;
use iced::widget::text_editor;
use std::path::PathBuf;
use std::sync::Arc;

use uaide_core::{ExecutionResult, RunError};

/// Outcome of a run, shared so the message stays `Clone`.
pub type RunOutcome = Arc<Result<ExecutionResult, RunError>>;

#[derive(Debug, Clone)]
pub enum Message {
    // Editor
    EditorAction(text_editor::Action),
    Undo,
    Redo,

    // Completion popup
    SuggestionPicked(usize),
    SuggestionNext,
    SuggestionPrev,
    AcceptSuggestion,
    HideSuggestions,

    // Run
    Run,
    RunFinished(RunOutcome),

    // File operations
    SaveAs,
    /// `Ok(None)` when the dialog was cancelled
    FileSaved(Result<Option<PathBuf>, String>),

    // Log
    ClearLog,

    KeyPressed(keyboard::Key, keyboard::Modifiers),
}
