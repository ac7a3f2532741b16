//! Keyword and string highlighting for the text editor widget.
//!
//! Adapts the line lexer to iced's `Highlighter` trait. Lines are
//! independent, so moving to an earlier line resets nothing.

use iced::advanced::text::highlighter::{Format, Highlighter};
use iced::font::Weight;
use iced::{Color, Font};
use std::ops::Range;

use uaide_syntax::{HighlightKind, Lexer};

use crate::theme::Theme;

/// Settings for the highlighter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightSettings {
    pub keyword: Color,
    pub string: Color,
}

impl HighlightSettings {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            keyword: theme.syntax.keyword.to_iced(),
            string: theme.syntax.string.to_iced(),
        }
    }
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

/// Format for highlighted text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightFormat {
    pub color: Color,
    pub bold: bool,
}

impl HighlightFormat {
    pub fn to_format(self, font: Font) -> Format<Font> {
        Format {
            color: Some(self.color),
            font: self.bold.then_some(Font {
                weight: Weight::Bold,
                ..font
            }),
        }
    }
}

/// Syntax highlighter for the text editor.
pub struct KeywordHighlighter {
    settings: HighlightSettings,
    lexer: Lexer<'static>,
    current_line: usize,
}

impl KeywordHighlighter {
    fn format(&self, kind: HighlightKind) -> Option<HighlightFormat> {
        match kind {
            HighlightKind::Keyword => Some(HighlightFormat {
                color: self.settings.keyword,
                bold: true,
            }),
            HighlightKind::StringLiteral => Some(HighlightFormat {
                color: self.settings.string,
                bold: false,
            }),
            HighlightKind::Plain => None,
        }
    }
}

impl Highlighter for KeywordHighlighter {
    type Settings = HighlightSettings;
    type Highlight = HighlightFormat;
    type Iterator<'a> = std::vec::IntoIter<(Range<usize>, HighlightFormat)> where Self: 'a;

    fn new(settings: &Self::Settings) -> Self {
        Self {
            settings: *settings,
            lexer: Lexer::builtin(),
            current_line: 0,
        }
    }

    fn update(&mut self, new_settings: &Self::Settings) {
        if self.settings != *new_settings {
            self.settings = *new_settings;
            self.current_line = 0;
        }
    }

    fn change_line(&mut self, line: usize) {
        self.current_line = self.current_line.min(line);
    }

    fn highlight_line(&mut self, line: &str) -> Self::Iterator<'_> {
        self.current_line += 1;

        self.lexer
            .highlight_line(line)
            .into_iter()
            .filter_map(|span| Some((span.range(), self.format(span.kind)?)))
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn current_line(&self) -> usize {
        self.current_line
    }
}
