//! Event system for editor notifications.
//!
//! ## Learning: Observer Pattern in Rust
//!
//! We use `tokio::sync::broadcast` instead of callback lists:
//! - Events are values, subscribers receive clones
//! - No object references to manage
//! - Lagged receivers don't block senders

use std::path::PathBuf;

use tokio::sync::broadcast;

use crate::runner::RunId;

/// Events that can occur in the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The text changed
    DocumentChanged,
    /// The caret moved without an edit
    CursorMoved,
    /// The suggestion list changed; carries its new length
    CompletionsChanged(usize),
    /// The document was written to this path
    DocumentSaved(PathBuf),
    /// A run was handed to the interpreter
    RunStarted(RunId),
    /// A run's output has been logged
    RunFinished(RunId),
    /// Configuration changed
    ConfigChanged,
}

/// Event bus for broadcasting editor events.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EditorEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: EditorEvent) {
        // no receivers is fine
        let _ = self.sender.send(event);
    }

    /// Subscribes to events.
    ///
    /// Returns a receiver that will get all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("receivers", &self.sender.receiver_count())
            .finish()
    }
}
