use iced::keyboard::{self, key::Named};
use iced::widget::text_editor;
use std::path::{Path, PathBuf};

use uaide_core::completion::fragment_before;
use uaide_core::config::Config;

/// Startup options passed from the command line.
#[derive(Debug, Default)]
pub struct Flags {
    /// File loaded into the editor at startup
    pub file: Option<PathBuf>,
    pub config: Config,
}

/// Whole-text snapshots for undo/redo.
///
/// One snapshot is taken before each edit, so an edit made of several
/// widget actions (an auto-inserted pair, an accepted completion) undoes
/// in one step.
#[derive(Debug, Clone)]
pub struct Snapshots {
    undo: Vec<String>,
    redo: Vec<String>,
    limit: usize,
}

impl Snapshots {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Records the text as it was before an edit.
    pub fn record(&mut self, current: String) {
        if self.undo.last() == Some(&current) {
            return;
        }
        self.undo.push(current);
        if self.undo.len() > self.limit {
            self.undo.remove(0);
        }
        self.redo.clear();
    }

    /// Returns the text to restore, remembering `current` for redo.
    pub fn undo(&mut self, current: String) -> Option<String> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    pub fn redo(&mut self, current: String) -> Option<String> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

/// The edited source as the widget sees it.
pub struct SourceState {
    pub path: Option<PathBuf>,
    pub content: text_editor::Content,
    pub modified: bool,
    pub history: Snapshots,
}

impl SourceState {
    pub fn new(text: &str, max_history: usize) -> Self {
        Self {
            path: None,
            content: text_editor::Content::with_text(text),
            modified: false,
            history: Snapshots::new(max_history),
        }
    }

    pub fn from_file(path: PathBuf, text: &str, max_history: usize) -> Self {
        Self {
            path: Some(path),
            ..Self::new(text, max_history)
        }
    }

    pub fn name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Без назви".to_string())
    }

    /// The buffer exactly as typed.
    ///
    /// `Content::text` appends a newline to text that lacks one; this joins
    /// the lines and adds nothing.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (index, line) in self.content.lines().enumerate() {
            if index > 0 {
                text.push('\n');
            }
            text.push_str(&line);
        }
        text
    }

    pub fn save_undo_state(&mut self) {
        self.history.record(self.text());
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.text()) {
            Some(previous) => {
                self.content = text_editor::Content::with_text(&previous);
                self.modified = true;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.text()) {
            Some(next) => {
                self.content = text_editor::Content::with_text(&next);
                self.modified = true;
                true
            }
            None => false,
        }
    }

    /// Identifier fragment before the caret.
    pub fn fragment(&self) -> String {
        let (line, column) = self.content.cursor_position();
        self.content
            .line(line)
            .map(|text| fragment_before(&text, column).to_string())
            .unwrap_or_default()
    }

    /// The character right after the caret on its line.
    pub fn char_after_caret(&self) -> Option<char> {
        let (line, column) = self.content.cursor_position();
        let text = self.content.line(line)?;
        char_at_byte(&text, column)
    }
}

/// The char starting at or containing byte `index`, clamped to the line.
pub fn char_at_byte(line: &str, index: usize) -> Option<char> {
    let mut index = index.min(line.len());
    while !line.is_char_boundary(index) {
        index -= 1;
    }
    line[index..].chars().next()
}

/// Commands bound to keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Run,
    SaveAs,
    Undo,
    Redo,
    HideSuggestions,
}

impl Shortcut {
    /// Maps a key press that the editor widget did not consume.
    pub fn from_key(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<Self> {
        if let keyboard::Key::Named(Named::Escape) = key {
            return Some(Self::HideSuggestions);
        }
        if !modifiers.control() {
            return None;
        }
        let keyboard::Key::Character(c) = key else {
            return None;
        };

        match (c.to_lowercase().as_str(), modifiers.shift()) {
            ("s", true) => Some(Self::SaveAs),
            ("z", true) => Some(Self::Redo),
            ("r", false) => Some(Self::Run),
            ("z", false) => Some(Self::Undo),
            ("y", false) => Some(Self::Redo),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::{Key, Modifiers};

    #[test]
    fn test_snapshots_round_trip() {
        let mut history = Snapshots::new(10);
        history.record("".into());
        history.record("а".into());

        assert_eq!(history.undo("а()".into()), Some("а".to_string()));
        assert_eq!(history.undo("а".into()), Some("".to_string()));
        assert_eq!(history.undo("".into()), None);

        assert_eq!(history.redo("".into()), Some("а".to_string()));
        assert!(history.can_redo());
        history.record("".into());
        assert!(history.can_redo());
        history.record("аб".into());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_snapshots_limit() {
        let mut history = Snapshots::new(2);
        for s in ["1", "2", "3"] {
            history.record(s.into());
        }
        assert_eq!(history.undo("4".into()), Some("3".to_string()));
        assert_eq!(history.undo("3".into()), Some("2".to_string()));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_source_text_adds_no_newline() {
        assert_eq!(SourceState::new("вивести(1)", 10).text(), "вивести(1)");
        assert_eq!(SourceState::new("якщо x:\n    y\n", 10).text(), "якщо x:\n    y\n");
        assert_eq!(SourceState::new("", 10).text(), "");
    }

    #[test]
    fn test_saved_file_matches_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let source = SourceState::new("вивести(1)", 10);

        let path = uaide_core::files::save_source(dir.path().join("prog"), &source.text()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "вивести(1)");
    }

    #[test]
    fn test_undo_restores_text_without_newline() {
        let mut source = SourceState::new("а", 10);
        source.save_undo_state();
        source.content = text_editor::Content::with_text("аб");

        assert!(source.undo());
        assert_eq!(source.text(), "а");
        assert!(source.redo());
        assert_eq!(source.text(), "аб");
    }

    #[test]
    fn test_char_at_byte() {
        assert_eq!(char_at_byte("(я)", 1), Some('я'));
        assert_eq!(char_at_byte("(я)", 3), Some(')'));
        assert_eq!(char_at_byte("(я)", 2), Some('я'));
        assert_eq!(char_at_byte("()", 2), None);
        assert_eq!(char_at_byte("", 7), None);
    }

    #[test]
    fn test_shortcuts() {
        let ctrl = Modifiers::CTRL;
        let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;

        assert_eq!(Shortcut::from_key(&Key::Character("r".into()), ctrl), Some(Shortcut::Run));
        assert_eq!(Shortcut::from_key(&Key::Character("S".into()), ctrl_shift), Some(Shortcut::SaveAs));
        assert_eq!(Shortcut::from_key(&Key::Character("z".into()), ctrl), Some(Shortcut::Undo));
        assert_eq!(Shortcut::from_key(&Key::Character("z".into()), ctrl_shift), Some(Shortcut::Redo));
        assert_eq!(Shortcut::from_key(&Key::Character("y".into()), ctrl), Some(Shortcut::Redo));
        assert_eq!(Shortcut::from_key(&Key::Character("r".into()), Modifiers::empty()), None);
        assert_eq!(
            Shortcut::from_key(&Key::Named(Named::Escape), Modifiers::empty()),
            Some(Shortcut::HideSuggestions)
        );
    }
}
