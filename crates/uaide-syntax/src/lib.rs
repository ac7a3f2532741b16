//! # uaide syntax
//!
//! The localized keyword vocabulary and the line highlighter built on it.
//!
//! ## Why not regex per keyword?
//!
//! Matching every keyword with its own `\bword\b` pattern costs
//! O(keywords × line length). The lexer instead walks a line once,
//! cuts it into identifier runs and quoted literals, and looks each run
//! up in the vocabulary's hash index:
//! - **Whole words only**: a run is compared as a whole, so `якщох`
//!   never matches `якщо`
//! - **Strings win**: quoted text is consumed before identifiers are
//!   considered, so keywords inside literals stay literal
//! - **Line-local**: nothing carries over between lines, so an editor
//!   only re-scans the lines that changed

pub mod lexer;
pub mod vocabulary;

pub use lexer::{HighlightKind, HighlightSpan, Lexer, is_ident_char};
pub use vocabulary::{Vocabulary, VocabularyEntry};

/// Errors raised while building a vocabulary table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VocabularyError {
    #[error("Duplicate keyword: {0}")]
    DuplicateKeyword(String),

    #[error("Empty keyword at entry {0}")]
    EmptyKeyword(usize),

    #[error("Keyword is not a single identifier: {0}")]
    NotAnIdentifier(String),
}
