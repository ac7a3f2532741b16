//! Bracket and quote auto-pairing.
//!
//! Quotes are both openers and closers, so the skip-over rule is checked
//! first: typing `"` in front of an auto-inserted `"` steps over it
//! instead of starting a new pair.

/// Opener/closer pairs.
pub const PAIRS: [(char, char); 5] = [('(', ')'), ('[', ']'), ('{', '}'), ('"', '"'), ('\'', '\'')];

/// What typing a character should do to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeAction {
    /// Insert the character as typed
    Insert(char),
    /// Insert `open` and `close` as one edit, caret between them
    InsertPair { open: char, close: char },
    /// Move the caret over the closer that is already there
    SkipOver,
}

/// Returns the closer registered for an opener.
pub fn closer_for(open: char) -> Option<char> {
    PAIRS.iter().find(|(o, _)| *o == open).map(|&(_, c)| c)
}

/// Returns true if `c` closes some pair.
pub fn is_closer(c: char) -> bool {
    PAIRS.iter().any(|&(_, close)| close == c)
}

/// Decides how to handle `typed` given the character right after the caret.
pub fn resolve(typed: char, next: Option<char>) -> TypeAction {
    if is_closer(typed) && next == Some(typed) {
        return TypeAction::SkipOver;
    }
    match closer_for(typed) {
        Some(close) => TypeAction::InsertPair { open: typed, close },
        None => TypeAction::Insert(typed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openers_pair() {
        for (open, close) in PAIRS {
            assert_eq!(resolve(open, None), TypeAction::InsertPair { open, close });
        }
    }

    #[test]
    fn test_closer_skips_matching_next() {
        assert_eq!(resolve(')', Some(')')), TypeAction::SkipOver);
        assert_eq!(resolve(']', Some(']')), TypeAction::SkipOver);
    }

    #[test]
    fn test_closer_inserts_when_next_differs() {
        assert_eq!(resolve(')', Some(']')), TypeAction::Insert(')'));
        assert_eq!(resolve('}', None), TypeAction::Insert('}'));
    }

    #[test]
    fn test_quote_skip_checked_before_pair() {
        assert_eq!(resolve('"', Some('"')), TypeAction::SkipOver);
        assert_eq!(
            resolve('\'', Some('x')),
            TypeAction::InsertPair { open: '\'', close: '\'' }
        );
    }

    #[test]
    fn test_ordinary_chars() {
        assert_eq!(resolve('я', Some(')')), TypeAction::Insert('я'));
        assert_eq!(closer_for('я'), None);
        assert!(!is_closer('('));
    }
}
