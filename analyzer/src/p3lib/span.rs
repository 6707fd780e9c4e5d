//! Character ranges within a single source line.
use std::fmt::{self, Display, Formatter};
use std::ops::Range;

use serde::Serialize;

/// A half-open range `[start, end)` of character columns within one
/// line.
///
/// Fields which parsing did not produce carry [`Span::EMPTY`], the
/// zero-width range at column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const EMPTY: Span = Span { start: 0, end: 0 };

    #[must_use]
    pub const fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true when `column` falls inside the span.  An empty
    /// span contains nothing.
    #[must_use]
    pub const fn contains(&self, column: usize) -> bool {
        self.start <= column && column < self.end
    }

    /// Returns the text of the line covered by this span.  Columns
    /// past the end of the line are clamped to it.
    #[must_use]
    pub fn extract<'a>(&self, line: &'a str) -> &'a str {
        &line[byte_offset(line, self.start)..byte_offset(line, self.end)]
    }

    /// Converts a range of byte offsets in `line` (which must fall on
    /// character boundaries) into character columns.
    pub(crate) fn from_byte_range(line: &str, bytes: Span) -> Span {
        let column = |byte: usize| line[..byte].chars().count();
        Span::new(column(bytes.start), column(bytes.end))
    }

    #[must_use]
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Span {
        Span::new(range.start, range.end)
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

pub(crate) trait Spanned {
    fn span(&self) -> Span;
}

/// The byte offset of character column `column` of `line`, or the
/// length of the line if it is shorter than that.
fn byte_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map_or(line.len(), |(pos, _)| pos)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Finds the word (a run of letters, digits and underscores) which
/// includes the character at `column`.
pub(crate) fn word_span_at(line: &str, column: usize) -> Option<Span> {
    let chars: Vec<char> = line.chars().collect();
    if !chars.get(column).is_some_and(|ch| is_word_char(*ch)) {
        return None;
    }
    let start = chars[..column]
        .iter()
        .rposition(|ch| !is_word_char(*ch))
        .map_or(0, |pos| pos + 1);
    let end = chars[column..]
        .iter()
        .position(|ch| !is_word_char(*ch))
        .map_or(chars.len(), |pos| column + pos);
    Some(Span::new(start, end))
}

#[test]
fn test_contains() {
    let span = Span::new(4, 6);
    assert!(!span.contains(3));
    assert!(span.contains(4));
    assert!(span.contains(5));
    assert!(!span.contains(6));
    assert!(!Span::EMPTY.contains(0));
}

#[test]
fn test_word_span_at() {
    let line = "  MOV R1, COUNT_2";
    assert_eq!(word_span_at(line, 2), Some(Span::new(2, 5)));
    assert_eq!(word_span_at(line, 4), Some(Span::new(2, 5)));
    assert_eq!(word_span_at(line, 5), None);
    assert_eq!(word_span_at(line, 12), Some(Span::new(10, 17)));
    assert_eq!(word_span_at(line, 17), None);
    assert_eq!(word_span_at(line, 99), None);
}

#[test]
fn test_columns_count_characters() {
    let line = "; põe R1";
    assert_eq!(Span::from_byte_range(line, Span::new(7, 9)), Span::new(6, 8));
    assert_eq!(Span::new(6, 8).extract(line), "R1");
    assert_eq!(Span::new(2, 5).extract(line), "põe");
    assert_eq!(Span::new(6, 40).extract(line), "R1");
    assert_eq!(word_span_at(line, 3), Some(Span::new(2, 5)));
    assert_eq!(word_span_at(line, 7), Some(Span::new(6, 8)));
}
