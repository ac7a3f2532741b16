//! Keyword completion.
//!
//! The fragment is the run of identifier characters immediately before
//! the caret. Suggestions are vocabulary entries starting with it, in
//! declaration order, each carrying its canonical token as a hint.

use uaide_syntax::{Vocabulary, is_ident_char};

/// The identifier fragment ending at byte offset `caret` of `line`.
///
/// `caret` is clamped to the line and moved back to a char boundary.
pub fn fragment_before(line: &str, caret: usize) -> &str {
    let mut caret = caret.min(line.len());
    while !line.is_char_boundary(caret) {
        caret -= 1;
    }
    let head = &line[..caret];
    let start = head
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_ident_char(c))
        .last()
        .map_or(caret, |(i, _)| i);
    &head[start..]
}

/// One completion item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub keyword: &'static str,
    pub canonical: Option<&'static str>,
}

impl Suggestion {
    /// Label for a popup row, e.g. `якщо  (if)`.
    pub fn label(&self) -> String {
        match self.canonical {
            Some(canonical) => format!("{}  ({canonical})", self.keyword),
            None => self.keyword.to_string(),
        }
    }
}

/// Produces suggestions from a vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct Completer<'v> {
    vocabulary: &'v Vocabulary,
    limit: usize,
}

impl Completer<'static> {
    pub fn builtin(limit: usize) -> Self {
        Self::new(Vocabulary::builtin(), limit)
    }
}

impl<'v> Completer<'v> {
    pub fn new(vocabulary: &'v Vocabulary, limit: usize) -> Self {
        Self { vocabulary, limit }
    }

    /// Entries starting with `fragment`. An empty fragment suggests nothing.
    pub fn suggest(&self, fragment: &str) -> Vec<Suggestion> {
        if fragment.is_empty() {
            return Vec::new();
        }
        self.vocabulary
            .with_prefix(fragment)
            .take(self.limit)
            .map(|e| Suggestion {
                keyword: e.localized,
                canonical: e.canonical,
            })
            .collect()
    }
}

/// Popup state shared by the headless editor and the UI.
///
/// Recomputes only when the fragment changes. After a suggestion is
/// accepted the popup stays hidden until the fragment differs from the
/// accepted word.
#[derive(Debug, Clone, Default)]
pub struct CompletionState {
    fragment: String,
    suggestions: Vec<Suggestion>,
    selected: usize,
    dismissed: Option<String>,
}

impl CompletionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refreshes for a new fragment. Returns true if the list changed.
    pub fn update(&mut self, completer: &Completer<'_>, fragment: &str) -> bool {
        if fragment == self.fragment {
            return false;
        }
        self.fragment = fragment.to_string();

        if self.dismissed.as_deref() == Some(fragment) {
            return self.clear_list();
        }
        self.dismissed = None;

        let suggestions = completer.suggest(fragment);
        if suggestions == self.suggestions {
            return false;
        }
        self.suggestions = suggestions;
        self.selected = 0;
        true
    }

    /// Hides the popup until the fragment moves away from `word`.
    pub fn dismiss(&mut self, word: &str) {
        self.fragment = word.to_string();
        self.dismissed = Some(word.to_string());
        self.clear_list();
    }

    /// Hides the popup for the current fragment.
    pub fn hide(&mut self) -> bool {
        let fragment = self.fragment.clone();
        self.dismissed = Some(fragment);
        self.clear_list()
    }

    fn clear_list(&mut self) -> bool {
        let changed = !self.suggestions.is_empty();
        self.suggestions.clear();
        self.selected = 0;
        changed
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_visible(&self) -> bool {
        !self.suggestions.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> Option<&Suggestion> {
        self.suggestions.get(self.selected)
    }

    pub fn get(&self, index: usize) -> Option<&Suggestion> {
        self.suggestions.get(index)
    }

    pub fn select_next(&mut self) {
        if !self.suggestions.is_empty() {
            self.selected = (self.selected + 1) % self.suggestions.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.suggestions.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.suggestions.len() - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(suggestions: &[Suggestion]) -> Vec<&'static str> {
        suggestions.iter().map(|s| s.keyword).collect()
    }

    #[test]
    fn test_fragment_before() {
        assert_eq!(fragment_before("x = вив", "x = вив".len()), "вив");
        assert_eq!(fragment_before("вивести(", "вивести(".len()), "");
        assert_eq!(fragment_before("", 0), "");
        assert_eq!(fragment_before("а_б1", 99), "а_б1");
    }

    #[test]
    fn test_fragment_before_mid_word_and_mid_char() {
        let line = "якщо";
        // caret after "як"
        assert_eq!(fragment_before(line, 4), "як");
        // byte 3 is inside 'к', clamps back to after 'я'
        assert_eq!(fragment_before(line, 3), "я");
    }

    #[test]
    fn test_suggest_in_declaration_order() {
        let completer = Completer::builtin(50);
        assert_eq!(words(&completer.suggest("з")), ["з", "з_", "зменшити"]);
        assert_eq!(
            words(&completer.suggest("від")),
            ["від", "відкрити", "відновити", "від_рядка", "відкрити_файл"]
        );
    }

    #[test]
    fn test_suggest_hint_and_limit() {
        let completer = Completer::builtin(1);
        let found = completer.suggest("як");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].canonical, Some("if"));
        assert_eq!(found[0].label(), "якщо  (if)");
        assert!(completer.suggest("").is_empty());
        assert!(completer.suggest("qqq").is_empty());
    }

    #[test]
    fn test_highlight_only_word_has_no_hint() {
        let found = Completer::builtin(50).suggest("Слав");
        assert_eq!(found[0].label(), "Слава");
    }

    #[test]
    fn test_state_updates_only_on_change() {
        let completer = Completer::builtin(50);
        let mut state = CompletionState::new();

        assert!(state.update(&completer, "з"));
        assert!(state.is_visible());
        assert_eq!(state.selected(), 0);

        state.select_next();
        assert!(!state.update(&completer, "з"));
        assert_eq!(state.selected(), 1);

        assert!(state.update(&completer, "зм"));
        assert_eq!(words(state.suggestions()), ["зменшити"]);
        assert_eq!(state.selected(), 0);

        assert!(state.update(&completer, ""));
        assert!(!state.is_visible());
    }

    #[test]
    fn test_dismiss_until_word_changes() {
        let completer = Completer::builtin(50);
        let mut state = CompletionState::new();
        state.update(&completer, "якщ");
        state.dismiss("якщо");
        assert!(!state.is_visible());

        assert!(!state.update(&completer, "якщо"));
        assert!(!state.is_visible());

        assert!(state.update(&completer, "як"));
        assert_eq!(words(state.suggestions()), ["якщо", "як"]);
    }

    #[test]
    fn test_selection_wraps() {
        let completer = Completer::builtin(50);
        let mut state = CompletionState::new();
        state.update(&completer, "з");
        state.select_prev();
        assert_eq!(state.current().map(|s| s.keyword), Some("зменшити"));
        state.select_next();
        assert_eq!(state.current().map(|s| s.keyword), Some("з"));
    }
}
