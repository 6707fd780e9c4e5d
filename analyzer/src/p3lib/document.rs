//! An index of the lines, labels and variables of a document.
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{event, Level};

use super::line::{Line, LineType};

#[cfg(test)]
mod tests;

/// The result of classifying every line of a document (or of a range
/// of its lines).  An index is built for a single request and owns
/// all of its lines.
///
/// When a name is defined more than once, the later definition (the
/// one with the higher line number) replaces the earlier one.
#[derive(Debug, Default)]
pub struct DocumentIndex {
    lines: Vec<Line>,
    // Both maps give the position of the defining line in `lines`.
    labels: BTreeMap<String, usize>,
    variables: BTreeMap<String, usize>,
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

fn define(kind: &str, map: &mut BTreeMap<String, usize>, name: &str, pos: usize, lines: &[Line]) {
    if let Some(previous) = map.insert(name.to_string(), pos) {
        event!(
            Level::DEBUG,
            "{kind} {name} is defined again on line {}; the definition on line {} is superseded",
            lines[pos].line_number(),
            lines[previous].line_number(),
        );
    }
}

impl DocumentIndex {
    /// Classifies each `(text, line_number)` pair in turn.  The
    /// pairs should be in ascending order of line number.
    ///
    /// `cancel` is checked before each line.  When it is set, the
    /// build stops and the lines classified so far are returned.
    #[must_use]
    pub fn build<I, S>(lines: I, cancel: Option<&AtomicBool>) -> DocumentIndex
    where
        I: IntoIterator<Item = (S, usize)>,
        S: AsRef<str>,
    {
        let mut index = DocumentIndex::default();
        for (text, line_number) in lines {
            if is_cancelled(cancel) {
                event!(
                    Level::DEBUG,
                    "indexing cancelled after {} lines",
                    index.lines.len()
                );
                break;
            }
            let line = Line::classify(text.as_ref(), line_number);
            let pos = index.lines.len();
            index.lines.push(line);
            let line = &index.lines[pos];
            match line.line_type() {
                LineType::Label => {
                    define("label", &mut index.labels, line.label(), pos, &index.lines);
                }
                LineType::Assignment => {
                    define("variable", &mut index.variables, line.variable(), pos, &index.lines);
                }
                LineType::Instruction | LineType::Comment | LineType::Other => (),
            }
        }
        index
    }

    /// Indexes every line of `text`.
    #[must_use]
    pub fn from_text(text: &str, cancel: Option<&AtomicBool>) -> DocumentIndex {
        DocumentIndex::build(text.lines().enumerate().map(|(n, s)| (s, n)), cancel)
    }

    /// Indexes the lines of `text` whose (zero-based) numbers are in
    /// `range`.
    #[must_use]
    pub fn from_text_range(
        text: &str,
        range: RangeInclusive<usize>,
        cancel: Option<&AtomicBool>,
    ) -> DocumentIndex {
        DocumentIndex::build(
            text.lines()
                .enumerate()
                .skip(*range.start())
                .take_while(|(n, _)| range.contains(n))
                .map(|(n, s)| (s, n)),
            cancel,
        )
    }

    /// All the lines, in source order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Finds the line with the given line number.
    #[must_use]
    pub fn line(&self, line_number: usize) -> Option<&Line> {
        self.lines
            .binary_search_by_key(&line_number, Line::line_number)
            .ok()
            .map(|pos| &self.lines[pos])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line which defines the label `name`.
    #[must_use]
    pub fn label(&self, name: &str) -> Option<&Line> {
        self.labels.get(name).map(|pos| &self.lines[*pos])
    }

    /// The line which defines the variable `name`.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Line> {
        self.variables.get(name).map(|pos| &self.lines[*pos])
    }

    /// The labels and their defining lines, in order of name.
    pub fn labels(&self) -> impl Iterator<Item = (&str, &Line)> {
        self.labels
            .iter()
            .map(|(name, pos)| (name.as_str(), &self.lines[*pos]))
    }

    /// The variables and their defining lines, in order of name.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &Line)> {
        self.variables
            .iter()
            .map(|(name, pos)| (name.as_str(), &self.lines[*pos]))
    }
}
