//! # uaide UI
//!
//! The editor window, built with iced.
//!
//! ## Architecture
//!
//! The UI follows the Elm architecture (TEA):
//! - **Model**: `App` holds the text widget content, popup and log state
//! - **Message**: Events that can occur
//! - **Update**: (state, message) -> new state plus follow-up tasks
//! - **View**: state -> UI elements
//!
//! Typing rules, completion, running and saving are decided by
//! `uaide-core`; this crate only feeds them widget state and renders the
//! result.

pub mod app;
pub mod highlighter;
pub mod theme;

pub use app::{App, Flags, run};
pub use theme::Theme;
