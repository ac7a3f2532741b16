//! Single-pass line highlighter.

use std::ops::Range;

use crate::vocabulary::Vocabulary;

/// Returns true for characters that make up identifiers and keywords.
#[inline]
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// How a span of text should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    Keyword,
    StringLiteral,
    Plain,
}

impl HighlightKind {
    /// Returns the theme color key for this kind.
    pub fn theme_key(&self) -> &'static str {
        match self {
            HighlightKind::Keyword => "keyword",
            HighlightKind::StringLiteral => "string",
            HighlightKind::Plain => "text",
        }
    }
}

/// A classified byte range within one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Start byte offset
    pub start: usize,
    /// Length in bytes
    pub len: usize,
    pub kind: HighlightKind,
}

impl HighlightSpan {
    pub fn new(range: Range<usize>, kind: HighlightKind) -> Self {
        Self {
            start: range.start,
            len: range.end - range.start,
            kind,
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Classifies keywords and quoted literals in a line of text.
///
/// ## Rules
///
/// - A maximal run of identifier characters equal to a vocabulary key
///   is a keyword.
/// - `"` or `'` opens a literal that ends at the next identical quote
///   on the same line; both quotes belong to the span. A quote with no
///   partner is plain text.
/// - Literals are matched first, so text inside quotes is never a keyword.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'v> {
    vocabulary: &'v Vocabulary,
}

impl Lexer<'static> {
    /// A lexer over the built-in vocabulary.
    pub fn builtin() -> Self {
        Self::new(Vocabulary::builtin())
    }
}

impl<'v> Lexer<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &'v Vocabulary {
        self.vocabulary
    }

    /// Keyword and literal spans, in order. Gaps are plain.
    pub fn highlight_line(&self, line: &str) -> Vec<HighlightSpan> {
        let mut spans = Vec::new();
        self.scan(line, |span| spans.push(span));
        spans
    }

    /// Spans covering every byte of the line, gaps filled with `Plain`.
    pub fn segment_line(&self, line: &str) -> Vec<HighlightSpan> {
        let mut spans = Vec::new();
        let mut cursor = 0;

        self.scan(line, |span| {
            if span.start > cursor {
                spans.push(HighlightSpan::new(cursor..span.start, HighlightKind::Plain));
            }
            cursor = span.end();
            spans.push(span);
        });

        if cursor < line.len() {
            spans.push(HighlightSpan::new(cursor..line.len(), HighlightKind::Plain));
        }
        spans
    }

    fn scan(&self, line: &str, mut emit: impl FnMut(HighlightSpan)) {
        let mut chars = line.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            if c == '"' || c == '\'' {
                if let Some(end) = closing_quote(line, start, c) {
                    emit(HighlightSpan::new(start..end, HighlightKind::StringLiteral));
                    while chars.next_if(|&(i, _)| i < end).is_some() {}
                }
                continue;
            }

            if is_ident_char(c) {
                let mut end = start + c.len_utf8();
                while let Some((i, ch)) = chars.next_if(|&(_, ch)| is_ident_char(ch)) {
                    end = i + ch.len_utf8();
                }
                if self.vocabulary.contains(&line[start..end]) {
                    emit(HighlightSpan::new(start..end, HighlightKind::Keyword));
                }
            }
        }
    }
}

/// Byte offset just past the quote closing the one at `open`, if it is on
/// the same line.
fn closing_quote(line: &str, open: usize, quote: char) -> Option<usize> {
    let rest = &line[open + 1..];
    let rest = &rest[..rest.find('\n').unwrap_or(rest.len())];
    rest.find(quote).map(|i| open + 1 + i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kinds(line: &str) -> Vec<(&str, HighlightKind)> {
        Lexer::builtin()
            .highlight_line(line)
            .into_iter()
            .map(|s| (&line[s.range()], s.kind))
            .collect()
    }

    #[test]
    fn test_every_keyword_between_spaces() {
        let lexer = Lexer::builtin();
        for keyword in Vocabulary::builtin().keywords() {
            let line = format!(" {keyword} ");
            let spans = lexer.highlight_line(&line);
            assert_eq!(
                spans,
                vec![HighlightSpan::new(1..1 + keyword.len(), HighlightKind::Keyword)],
                "keyword {keyword}"
            );
        }
    }

    #[test]
    fn test_keyword_inside_longer_identifier_is_plain() {
        let lexer = Lexer::builtin();
        for keyword in Vocabulary::builtin().keywords() {
            let line = format!("{keyword}x");
            assert!(lexer.highlight_line(&line).is_empty(), "keyword {keyword}");
            let line = format!("x{keyword}");
            assert!(lexer.highlight_line(&line).is_empty(), "keyword {keyword}");
        }
    }

    #[test]
    fn test_string_literal_bounds_include_quotes() {
        let line = "x = \"abc\" + y";
        let spans = Lexer::builtin().highlight_line(line);
        assert_eq!(spans, vec![HighlightSpan::new(4..9, HighlightKind::StringLiteral)]);
        assert_eq!(&line[spans[0].range()], "\"abc\"");
    }

    #[test]
    fn test_string_literal_wins_over_keyword() {
        assert_eq!(
            kinds("вивести('якщо')"),
            vec![
                ("вивести", HighlightKind::Keyword),
                ("'якщо'", HighlightKind::StringLiteral),
            ]
        );
    }

    #[test]
    fn test_shortest_literal_match() {
        assert_eq!(
            kinds("\"а\" і \"б\""),
            vec![
                ("\"а\"", HighlightKind::StringLiteral),
                ("і", HighlightKind::Keyword),
                ("\"б\"", HighlightKind::StringLiteral),
            ]
        );
    }

    #[test]
    fn test_mixed_quotes_do_not_close_each_other() {
        assert_eq!(
            kinds("\"it's\" 'a \"b\" c'"),
            vec![
                ("\"it's\"", HighlightKind::StringLiteral),
                ("'a \"b\" c'", HighlightKind::StringLiteral),
            ]
        );
    }

    #[test]
    fn test_unmatched_quote_is_plain() {
        assert_eq!(
            kinds("вивести(\"привіт"),
            vec![("вивести", HighlightKind::Keyword)]
        );
        assert_eq!(
            kinds("\"ab 'c' не"),
            vec![
                ("'c'", HighlightKind::StringLiteral),
                ("не", HighlightKind::Keyword),
            ]
        );
    }

    #[test]
    fn test_literal_does_not_cross_lines() {
        let block = "x = \"a\ny\" якщо";
        let found = kinds(block);
        assert_eq!(found, vec![("якщо", HighlightKind::Keyword)]);
    }

    #[test]
    fn test_keywords_with_underscores_and_digits() {
        assert_eq!(
            kinds("з_ модуль імпорт x; з_1"),
            vec![("з_", HighlightKind::Keyword), ("імпорт", HighlightKind::Keyword)]
        );
    }

    #[test]
    fn test_segment_line_covers_everything() {
        let line = "якщо x == 'a':";
        let spans = Lexer::builtin().segment_line(line);

        let mut cursor = 0;
        for span in &spans {
            assert_eq!(span.start, cursor);
            cursor = span.end();
        }
        assert_eq!(cursor, line.len());

        let classified: Vec<_> = spans.iter().map(|s| (&line[s.range()], s.kind)).collect();
        assert_eq!(
            classified,
            vec![
                ("якщо", HighlightKind::Keyword),
                (" x == ", HighlightKind::Plain),
                ("'a'", HighlightKind::StringLiteral),
                (":", HighlightKind::Plain),
            ]
        );
    }

    #[test]
    fn test_empty_line() {
        assert!(Lexer::builtin().segment_line("").is_empty());
    }

    proptest! {
        #[test]
        fn keyword_marked_between_any_separators(
            idx in 0usize..78,
            left in "[ ()\\[\\]{}.,:;=+*/-]{1,3}",
            right in "[ ()\\[\\]{}.,:;=+*/-]{1,3}",
        ) {
            let vocab = Vocabulary::builtin();
            let keyword = vocab.entries()[idx % vocab.len()].localized;
            let line = format!("{left}{keyword}{right}");
            let spans = Lexer::builtin().highlight_line(&line);
            prop_assert_eq!(spans, vec![HighlightSpan::new(
                left.len()..left.len() + keyword.len(),
                HighlightKind::Keyword,
            )]);
        }

        #[test]
        fn spans_are_ordered_and_on_char_boundaries(line in "\\PC{0,40}") {
            let spans = Lexer::builtin().segment_line(&line);
            let mut cursor = 0;
            for span in &spans {
                prop_assert_eq!(span.start, cursor);
                prop_assert!(line.is_char_boundary(span.start));
                prop_assert!(line.is_char_boundary(span.end()));
                cursor = span.end();
            }
            prop_assert_eq!(cursor, line.len());
        }
    }
}
