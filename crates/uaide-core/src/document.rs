//! The edited source and its caret.
//!
//! ## Learning: Composition over Inheritance
//!
//! `Document` wraps a `TextBuffer` and adds a caret plus the typing rules
//! (auto-pairing, completion replacement). The buffer knows nothing about
//! carets; the document keeps the caret valid after every edit.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use uaide_buffer::{BufferConfig, Position, TextBuffer};

use crate::completion::fragment_before;
use crate::pairing::{self, TypeAction};
use crate::{CoreResult, files};

const UNTITLED: &str = "Без назви";

/// A single source document with one caret.
#[derive(Debug, Clone)]
pub struct Document {
    buffer: TextBuffer,
    /// Caret as a char index into the buffer
    caret: usize,
    path: Option<PathBuf>,
    name: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            buffer: TextBuffer::with_config(config),
            caret: 0,
            path: None,
            name: UNTITLED.to_string(),
        }
    }

    /// Creates an unsaved document holding `text`, caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: TextBuffer::from(text),
            ..Self::new()
        }
    }

    /// Opens a document from a file.
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let buffer = TextBuffer::from_file(path)?;
        tracing::debug!(path = %path.display(), chars = buffer.len_chars(), "document opened");

        Ok(Self {
            buffer,
            caret: 0,
            path: Some(path.to_path_buf()),
            name: display_name(path),
        })
    }

    // ==================== Getters ====================

    pub fn text(&self) -> Cow<'_, str> {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    /// Caret as a char index.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Caret as a line/column position.
    pub fn caret_position(&self) -> CoreResult<Position> {
        Ok(self.buffer.char_idx_to_position(self.caret)?)
    }

    /// The character right after the caret.
    pub fn char_after_caret(&self) -> Option<char> {
        self.buffer.char_at(self.caret)
    }

    /// The identifier fragment ending at the caret.
    pub fn fragment_at_caret(&self) -> CoreResult<String> {
        let pos = self.caret_position()?;
        let line = self.buffer.line(pos.line)?;
        let byte_caret: usize = line.chars().take(pos.column).map(char::len_utf8).sum();
        Ok(fragment_before(&line, byte_caret).to_string())
    }

    // ==================== Editing ====================

    /// Inserts text at the caret and moves the caret past it.
    pub fn insert_text(&mut self, text: &str) -> CoreResult<()> {
        self.buffer.insert(self.caret, text)?;
        self.caret += text.chars().count();
        Ok(())
    }

    /// Types one character, applying auto-pairing when `auto_pair` is set.
    ///
    /// A pair is a single undo step and leaves the caret between the two
    /// characters.
    pub fn type_char(&mut self, c: char, auto_pair: bool) -> CoreResult<TypeAction> {
        let action = if auto_pair {
            pairing::resolve(c, self.char_after_caret())
        } else {
            TypeAction::Insert(c)
        };

        match action {
            TypeAction::Insert(c) => {
                let mut utf8 = [0; 4];
                self.insert_text(c.encode_utf8(&mut utf8))?;
            }
            TypeAction::InsertPair { open, close } => {
                let pair: String = [open, close].iter().collect();
                self.buffer.insert(self.caret, &pair)?;
                self.caret += 1;
            }
            TypeAction::SkipOver => self.caret += 1,
        }
        Ok(action)
    }

    /// Deletes the character before the caret (backspace).
    pub fn delete_backward(&mut self) -> CoreResult<()> {
        if self.caret > 0 {
            self.buffer.delete(self.caret - 1..self.caret)?;
            self.caret -= 1;
        }
        Ok(())
    }

    /// Deletes the character after the caret.
    pub fn delete_forward(&mut self) -> CoreResult<()> {
        if self.caret < self.buffer.len_chars() {
            self.buffer.delete(self.caret..self.caret + 1)?;
        }
        Ok(())
    }

    /// Replaces the fragment before the caret with `keyword`, as one undo step.
    pub fn replace_fragment(&mut self, keyword: &str) -> CoreResult<()> {
        let fragment_len = self.fragment_at_caret()?.chars().count();
        let start = self.caret - fragment_len;
        self.buffer.replace(start..self.caret, keyword)?;
        self.caret = start + keyword.chars().count();
        Ok(())
    }

    // ==================== Caret Movement ====================

    pub fn move_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.caret = (self.caret + 1).min(self.buffer.len_chars());
    }

    /// Moves the caret to a line/column position.
    pub fn move_to(&mut self, pos: Position) -> CoreResult<()> {
        self.caret = self.buffer.position_to_char_idx(pos)?;
        Ok(())
    }

    // ==================== Undo/Redo ====================

    pub fn undo(&mut self) -> CoreResult<()> {
        self.caret = self.buffer.undo()?;
        Ok(())
    }

    pub fn redo(&mut self) -> CoreResult<()> {
        self.caret = self.buffer.redo()?;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.buffer.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.buffer.can_redo()
    }

    // ==================== File Operations ====================

    /// Saves to `path` with the source extension appended if missing.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> CoreResult<PathBuf> {
        let path = files::with_source_extension(path);
        self.buffer.save_as(&path)?;
        self.name = display_name(&path);
        self.path = Some(path.clone());
        Ok(path)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(UNTITLED)
        .to_string()
}
