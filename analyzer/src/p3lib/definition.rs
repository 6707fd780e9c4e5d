//! Go-to-definition for labels and variables.
use serde::Serialize;

use super::document::DocumentIndex;
use super::span::{word_span_at, Span};

/// Where a name is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line_number: usize,
    /// The span of the name in its defining line.
    pub span: Span,
}

/// Finds the definition of the name at `column` of line `line_number`.
/// Labels take precedence over variables of the same name.
#[must_use]
pub fn find_definition(index: &DocumentIndex, line_number: usize, column: usize) -> Option<Location> {
    let line = index.line(line_number)?;
    let name = word_span_at(line.raw(), column)?.extract(line.raw());
    if let Some(def) = index.label(name) {
        Some(Location {
            line_number: def.line_number(),
            span: def.label_span(),
        })
    } else {
        index.variable(name).map(|def| Location {
            line_number: def.line_number(),
            span: def.variable_span(),
        })
    }
}

#[cfg(test)]
const PROGRAM: &str = "\
LIMIT   EQU     5
Top:    CMP     R1, LIMIT
        BR.Z    Top
Twice:  NOP
Twice   WORD    2
        JMP     Twice
";

#[test]
fn test_label_definition() {
    let index = DocumentIndex::from_text(PROGRAM, None);
    assert_eq!(
        find_definition(&index, 2, 17),
        Some(Location {
            line_number: 1,
            span: Span::new(0, 3),
        })
    );
    // The definition itself also resolves.
    assert_eq!(
        find_definition(&index, 1, 1).map(|loc| loc.line_number),
        Some(1)
    );
}

#[test]
fn test_variable_definition() {
    let index = DocumentIndex::from_text(PROGRAM, None);
    assert_eq!(
        find_definition(&index, 1, 22),
        Some(Location {
            line_number: 0,
            span: Span::new(0, 5),
        })
    );
}

#[test]
fn test_labels_take_precedence() {
    let index = DocumentIndex::from_text(PROGRAM, None);
    assert_eq!(
        find_definition(&index, 5, 17),
        Some(Location {
            line_number: 3,
            span: Span::new(0, 5),
        })
    );
}

#[test]
fn test_nothing_to_find() {
    let index = DocumentIndex::from_text(PROGRAM, None);
    // On a mnemonic.
    assert_eq!(find_definition(&index, 1, 9), None);
    // On whitespace.
    assert_eq!(find_definition(&index, 1, 5), None);
    // No such line.
    assert_eq!(find_definition(&index, 40, 0), None);
}

#[test]
fn test_columns_after_non_ascii_names() {
    let index = DocumentIndex::from_text("Início: NOP\n        JMP     Início\n", None);
    assert_eq!(
        find_definition(&index, 1, 18),
        Some(Location {
            line_number: 0,
            span: Span::new(0, 6),
        })
    );
}
