//! Main editor orchestration.
//!
//! ## Learning: The Facade Pattern
//!
//! `Editor` acts as a facade over the document, completion popup, output
//! log and interpreter bridge. External code (tests, the binary in
//! headless use) only talks to `Editor`, and every operation keeps the
//! pieces consistent: edits refresh the suggestions, saves and runs are
//! logged, and each change is announced on the event bus.

use std::path::{Path, PathBuf};

use uaide_buffer::{BufferConfig, Position};

use crate::completion::{Completer, CompletionState, Suggestion};
use crate::config::Config;
use crate::console::Console;
use crate::document::Document;
use crate::event::{EditorEvent, EventBus};
use crate::pairing::TypeAction;
use crate::runner::{ExecutionBridge, ExecutionResult, RunError, RunId};
use crate::{CoreError, CoreResult};

/// The main editor state.
///
/// ## Thread Safety
///
/// `Editor` is owned by a single thread. A run borrows it mutably for its
/// whole duration; the interpreter itself runs as a child process.
#[derive(Debug)]
pub struct Editor {
    document: Document,
    config: Config,
    completer: Completer<'static>,
    completions: CompletionState,
    console: Console,
    bridge: ExecutionBridge,
    event_bus: EventBus,
}

impl Editor {
    /// Creates a new editor instance.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an editor with custom configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            document: Document::with_config(buffer_config(&config)),
            completer: Completer::builtin(config.editor.max_suggestions),
            completions: CompletionState::new(),
            console: Console::new(),
            bridge: ExecutionBridge::from_config(&config.runner),
            event_bus: EventBus::new(),
            config,
        }
    }

    // ==================== Document Operations ====================

    /// Replaces the document with the contents of a file.
    pub fn open(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        self.document = Document::from_file(path)?;
        self.after_edit();
        Ok(())
    }

    /// Saves under `path` (adding `.ua`) and logs the outcome.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> CoreResult<PathBuf> {
        match self.document.save_as(path) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "document saved");
                self.console.saved(&path);
                self.emit(EditorEvent::DocumentSaved(path.clone()));
                Ok(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.console.save_failed(&e);
                Err(e)
            }
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn text(&self) -> String {
        self.document.text().into_owned()
    }

    // ==================== Text Editing ====================

    /// Types one character with auto-pairing per config.
    pub fn type_char(&mut self, c: char) -> CoreResult<TypeAction> {
        let action = self.document.type_char(c, self.config.editor.auto_pair)?;
        if action == TypeAction::SkipOver {
            self.after_move();
        } else {
            self.after_edit();
        }
        Ok(action)
    }

    /// Inserts text at the caret without pairing.
    pub fn insert_text(&mut self, text: &str) -> CoreResult<()> {
        self.document.insert_text(text)?;
        self.after_edit();
        Ok(())
    }

    pub fn delete_backward(&mut self) -> CoreResult<()> {
        self.document.delete_backward()?;
        self.after_edit();
        Ok(())
    }

    pub fn delete_forward(&mut self) -> CoreResult<()> {
        self.document.delete_forward()?;
        self.after_edit();
        Ok(())
    }

    pub fn undo(&mut self) -> CoreResult<()> {
        self.document.undo()?;
        self.after_edit();
        Ok(())
    }

    pub fn redo(&mut self) -> CoreResult<()> {
        self.document.redo()?;
        self.after_edit();
        Ok(())
    }

    // ==================== Caret Movement ====================

    pub fn move_left(&mut self) {
        self.document.move_left();
        self.after_move();
    }

    pub fn move_right(&mut self) {
        self.document.move_right();
        self.after_move();
    }

    pub fn move_to(&mut self, pos: Position) -> CoreResult<()> {
        self.document.move_to(pos)?;
        self.after_move();
        Ok(())
    }

    // ==================== Completion ====================

    /// The current suggestion list; empty when the popup is hidden.
    pub fn suggestions(&self) -> &[Suggestion] {
        self.completions.suggestions()
    }

    pub fn completions(&self) -> &CompletionState {
        &self.completions
    }

    /// Replaces the fragment before the caret with suggestion `index`.
    pub fn accept_completion(&mut self, index: usize) -> CoreResult<()> {
        let keyword = self
            .completions
            .get(index)
            .map(|s| s.keyword)
            .ok_or(CoreError::NoSuchSuggestion(index))?;

        tracing::debug!(keyword, "completion accepted");
        self.document.replace_fragment(keyword)?;
        self.completions.dismiss(keyword);
        self.emit(EditorEvent::DocumentChanged);
        self.emit(EditorEvent::CompletionsChanged(0));
        Ok(())
    }

    /// Hides the popup until the fragment changes.
    pub fn hide_completions(&mut self) {
        if self.completions.hide() {
            self.emit(EditorEvent::CompletionsChanged(0));
        }
    }

    // ==================== Execution ====================

    /// Runs the document and logs banners and output to the console.
    pub async fn run(&mut self) -> Result<ExecutionResult, RunError> {
        let id = RunId::new();
        let source = self.text();
        tracing::info!(%id, program = self.bridge.program(), "run requested");

        self.console.run_started();
        self.emit(EditorEvent::RunStarted(id));

        let outcome = self.bridge.clone().run_with_id(id, source).await;

        self.console.finish_run(&outcome);
        self.emit(EditorEvent::RunFinished(id));
        outcome
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    // ==================== Configuration ====================

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Applies a new configuration to the completer and bridge.
    pub fn set_config(&mut self, config: Config) {
        self.completer = Completer::builtin(config.editor.max_suggestions);
        self.bridge = ExecutionBridge::from_config(&config.runner);
        self.config = config;
        self.emit(EditorEvent::ConfigChanged);
        self.refresh_completions();
    }

    // ==================== Events ====================

    /// Subscribes to editor events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<EditorEvent> {
        self.event_bus.subscribe()
    }

    fn emit(&self, event: EditorEvent) {
        self.event_bus.emit(event);
    }

    fn after_edit(&mut self) {
        self.emit(EditorEvent::DocumentChanged);
        self.refresh_completions();
    }

    fn after_move(&mut self) {
        self.emit(EditorEvent::CursorMoved);
        self.refresh_completions();
    }

    fn refresh_completions(&mut self) {
        let fragment = if self.config.editor.autocomplete {
            match self.document.fragment_at_caret() {
                Ok(fragment) => fragment,
                Err(e) => {
                    tracing::warn!(error = %e, "caret outside document");
                    String::new()
                }
            }
        } else {
            String::new()
        };

        if self.completions.update(&self.completer, &fragment) {
            let count = self.completions.suggestions().len();
            tracing::debug!(fragment = %fragment, count, "suggestions changed");
            self.emit(EditorEvent::CompletionsChanged(count));
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_config(config: &Config) -> BufferConfig {
    BufferConfig {
        max_history: config.editor.max_history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tokio::sync::broadcast::Receiver;

    fn drain(rx: &mut Receiver<EditorEvent>) -> Vec<EditorEvent> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    fn type_str(editor: &mut Editor, text: &str) {
        for c in text.chars() {
            editor.type_char(c).unwrap();
        }
    }

    #[test]
    fn test_typing_parens() {
        let mut editor = Editor::new();
        editor.type_char('(').unwrap();
        assert_eq!(editor.text(), "()");
        assert_eq!(editor.document().caret(), 1);

        assert_eq!(editor.type_char(')').unwrap(), TypeAction::SkipOver);
        assert_eq!(editor.text(), "()");
        assert_eq!(editor.document().caret(), 2);
    }

    #[test]
    fn test_auto_pair_switch() {
        let mut config = Config::default();
        config.editor.auto_pair = false;
        let mut editor = Editor::with_config(config);
        type_str(&mut editor, "(\"");
        assert_eq!(editor.text(), "(\"");
    }

    #[test]
    fn test_unique_prefix_completion() {
        let mut editor = Editor::new();
        let mut rx = editor.subscribe();

        type_str(&mut editor, "зм");
        let words: Vec<_> = editor.suggestions().iter().map(|s| s.keyword).collect();
        assert_eq!(words, ["зменшити"]);
        assert_eq!(editor.suggestions()[0].canonical, Some("reduce"));

        editor.accept_completion(0).unwrap();
        assert_eq!(editor.text(), "зменшити");
        assert_eq!(editor.document().caret(), 8);
        assert!(editor.suggestions().is_empty());

        assert_eq!(
            drain(&mut rx),
            [
                EditorEvent::DocumentChanged,
                EditorEvent::CompletionsChanged(3),
                EditorEvent::DocumentChanged,
                EditorEvent::CompletionsChanged(1),
                EditorEvent::DocumentChanged,
                EditorEvent::CompletionsChanged(0),
            ]
        );
    }

    #[test]
    fn test_completion_mid_line_and_undo() {
        let mut editor = Editor::new();
        editor.insert_text("x = ").unwrap();
        type_str(&mut editor, "ви");
        assert!(editor.suggestions().len() > 1);

        let index = editor
            .suggestions()
            .iter()
            .position(|s| s.keyword == "вивести")
            .unwrap();
        editor.accept_completion(index).unwrap();
        type_str(&mut editor, "(");
        assert_eq!(editor.text(), "x = вивести()");

        editor.undo().unwrap();
        editor.undo().unwrap();
        assert_eq!(editor.text(), "x = ви");
    }

    #[test]
    fn test_accept_without_suggestions() {
        let mut editor = Editor::new();
        assert!(matches!(
            editor.accept_completion(0),
            Err(CoreError::NoSuchSuggestion(0))
        ));
    }

    #[test]
    fn test_autocomplete_switch() {
        let mut config = Config::default();
        config.editor.autocomplete = false;
        let mut editor = Editor::with_config(config);
        type_str(&mut editor, "як");
        assert!(editor.suggestions().is_empty());
    }

    #[test]
    fn test_hide_until_fragment_changes() {
        let mut editor = Editor::new();
        type_str(&mut editor, "як");
        editor.hide_completions();
        assert!(editor.suggestions().is_empty());

        editor.move_left();
        assert_eq!(editor.suggestions().len(), 2);
    }

    #[test]
    fn test_save_as_logs_and_emits() {
        let dir = tempdir().unwrap();
        let mut editor = Editor::new();
        let mut rx = editor.subscribe();
        editor.insert_text("вивести(1)\n").unwrap();

        let path = editor.save_as(dir.path().join("prog")).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "вивести(1)\n");
        assert_eq!(
            editor.console().entries().last().map(|e| e.text.clone()),
            Some(format!("Файл збережено: {}", path.display()))
        );
        assert!(drain(&mut rx).contains(&EditorEvent::DocumentSaved(path)));
    }

    #[test]
    fn test_failed_save_is_logged() {
        let dir = tempdir().unwrap();
        let mut editor = Editor::new();
        assert!(editor.save_as(dir.path().join("missing/prog")).is_err());
        let last = &editor.console().entries()[0];
        assert!(last.text.starts_with("Помилка збереження: "));
    }

    #[test]
    fn test_open_replaces_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.ua");
        std::fs::write(&path, "якщо Правда:\n").unwrap();

        let mut editor = Editor::new();
        editor.insert_text("старе").unwrap();
        editor.open(&path).unwrap();
        assert_eq!(editor.text(), "якщо Правда:\n");
        assert_eq!(editor.document().path(), Some(path.as_path()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_logs_banners_and_output() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.runner.command = "cat".into();
        config.runner.temp_dir = Some(dir.path().to_path_buf());

        let mut editor = Editor::with_config(config);
        editor.insert_text("вивести(1)\n").unwrap();
        let mut rx = editor.subscribe();

        let result = editor.run().await.unwrap();
        assert_eq!(result.stdout, "вивести(1)\n");
        assert_eq!(
            editor.console().text(),
            "=== Виконання програми ===\nвивести(1)\n=== Кінець виконання ===\n"
        );

        let events = drain(&mut rx);
        assert!(matches!(
            &events[..],
            [EditorEvent::RunStarted(a), EditorEvent::RunFinished(b)] if a == b
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_missing_interpreter_is_logged() {
        let mut config = Config::default();
        config.runner.command = "uaide-no-such-interpreter-7f3a".into();
        let mut editor = Editor::with_config(config);

        assert!(matches!(
            editor.run().await,
            Err(RunError::ExecutableNotFound { .. })
        ));
        let entries = editor.console().entries();
        assert_eq!(entries.len(), 3);
        assert!(entries[1].text.contains("uaide-no-such-interpreter-7f3a"));
    }
}
