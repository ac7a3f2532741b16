//! Undo/redo history management.
//!
//! ## Learning: The Command Pattern
//!
//! Each edit is stored as a value that can be reversed (undo) or
//! re-applied (redo). Edits are collected into groups; a group is the
//! unit of undo, so an auto-inserted bracket pair disappears in one step.

use std::collections::VecDeque;

/// The type of edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Text was inserted
    Insert,
    /// Text was deleted
    Delete,
}

/// A single edit operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// What kind of edit this is
    pub kind: EditKind,
    /// Character position where the edit occurred
    pub position: usize,
    /// The text that was inserted or deleted
    pub content: String,
}

impl Edit {
    /// Creates an insert edit.
    pub fn insert(position: usize, content: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Insert,
            position,
            content: content.into(),
        }
    }

    /// Creates a delete edit.
    pub fn delete(position: usize, content: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Delete,
            position,
            content: content.into(),
        }
    }

    /// Returns the inverse of this edit (for undo).
    pub fn inverse(&self) -> Self {
        Self {
            kind: match self.kind {
                EditKind::Insert => EditKind::Delete,
                EditKind::Delete => EditKind::Insert,
            },
            position: self.position,
            content: self.content.clone(),
        }
    }

    /// Character offset just past the edit once it has been applied.
    pub fn end(&self) -> usize {
        match self.kind {
            EditKind::Insert => self.position + self.content.chars().count(),
            EditKind::Delete => self.position,
        }
    }
}

/// A group of edits that are undone/redone together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditGroup {
    /// The edits in application order
    pub edits: Vec<Edit>,
}

impl EditGroup {
    /// Creates a group holding a single edit.
    pub fn new(edit: Edit) -> Self {
        Self { edits: vec![edit] }
    }

    /// Adds an edit to this group.
    pub fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

/// Manages undo/redo history.
///
/// ## Design Decisions
///
/// 1. **Bounded history**: the oldest groups are dropped past `max_size`
/// 2. **Explicit grouping**: `begin_group`/`end_group` nest; only the
///    outermost pair closes a group
/// 3. **Linear history**: a new edit clears the redo stack
#[derive(Debug, Clone)]
pub struct History {
    /// Stack of undoable edit groups
    undo_stack: VecDeque<EditGroup>,
    /// Stack of redoable edit groups
    redo_stack: Vec<EditGroup>,
    /// Maximum number of edit groups to keep
    max_size: usize,
    /// Group being collected, if any
    open_group: Option<EditGroup>,
    /// Nesting depth of `begin_group` calls
    depth: usize,
}

impl History {
    /// Creates a new history with the given capacity.
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_size.min(64)),
            redo_stack: Vec::new(),
            max_size: max_size.max(1),
            open_group: None,
            depth: 0,
        }
    }

    /// Records an edit.
    pub fn push(&mut self, edit: Edit) {
        self.redo_stack.clear();

        match self.open_group.as_mut() {
            Some(group) => group.push(edit),
            None => self.push_group(EditGroup::new(edit)),
        }
    }

    fn push_group(&mut self, group: EditGroup) {
        self.undo_stack.push_back(group);
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }
    }

    /// Starts an edit group.
    ///
    /// All edits until the matching `end_group()` form one undo step.
    pub fn begin_group(&mut self) {
        if self.depth == 0 {
            self.open_group = Some(EditGroup::default());
        }
        self.depth += 1;
    }

    /// Ends the current edit group. Empty groups are discarded.
    pub fn end_group(&mut self) {
        if self.depth == 0 {
            return;
        }
        self.depth -= 1;
        if self.depth == 0 {
            if let Some(group) = self.open_group.take().filter(|g| !g.is_empty()) {
                self.push_group(group);
            }
        }
    }

    /// Pops the last group for undo and moves it to the redo stack.
    pub fn undo(&mut self) -> Option<EditGroup> {
        let group = self.undo_stack.pop_back()?;
        self.redo_stack.push(group.clone());
        Some(group)
    }

    /// Pops the last undone group and moves it back to the undo stack.
    pub fn redo(&mut self) -> Option<EditGroup> {
        let group = self.redo_stack.pop()?;
        self.undo_stack.push_back(group.clone());
        Some(group)
    }

    /// Returns true if there are edits to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are edits to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clears all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open_group = None;
        self.depth = 0;
    }

    /// Returns the number of undo steps available.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }
}
