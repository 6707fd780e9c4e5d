//! The outline of a document: its variables and labels.
use serde::Serialize;

use base::prelude::*;

use super::document::DocumentIndex;
use super::line::Line;
use super::span::{Span, Spanned};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SymbolKind {
    /// Defined with `EQU`.
    Constant,
    /// Defined with `WORD`.
    Variable,
    /// Defined with `STR` or `TAB`.
    Array,
    /// A label.
    Function,
}

impl SymbolKind {
    fn of_directive(directive: Option<Directive>) -> SymbolKind {
        match directive {
            Some(Directive::Equ) => SymbolKind::Constant,
            Some(Directive::Word) => SymbolKind::Variable,
            Some(Directive::Str | Directive::Tab) | None => SymbolKind::Array,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSymbol {
    pub name: String,
    pub kind: SymbolKind,
    pub directive: Option<Directive>,
    pub line_number: usize,
    /// The whole defining line.
    pub line_span: Span,
    /// The name within the defining line.
    pub selection: Span,
}

impl DocumentSymbol {
    fn new(name: &str, kind: SymbolKind, directive: Option<Directive>, line: &Line, selection: Span) -> Self {
        DocumentSymbol {
            name: name.to_string(),
            kind,
            directive,
            line_number: line.line_number(),
            line_span: line.span(),
            selection,
        }
    }
}

impl Spanned for DocumentSymbol {
    fn span(&self) -> Span {
        self.selection
    }
}

/// Lists the variables and labels of the document in order of
/// their defining line.
#[must_use]
pub fn document_symbols(index: &DocumentIndex) -> Vec<DocumentSymbol> {
    let variables = index.variables().map(|(name, line)| {
        let directive = line.directive();
        DocumentSymbol::new(
            name,
            SymbolKind::of_directive(directive),
            directive,
            line,
            line.variable_span(),
        )
    });
    let labels = index.labels().map(|(name, line)| {
        DocumentSymbol::new(name, SymbolKind::Function, None, line, line.label_span())
    });
    let mut symbols: Vec<DocumentSymbol> = variables.chain(labels).collect();
    symbols.sort_by_key(|sym| (sym.line_number, sym.span().start));
    symbols
}

#[test]
fn test_symbol_kinds_and_order() {
    let text = "\
Main:   CALL    Sub
Buf     TAB     16
Ptr     WORD    Buf
N       EQU     3
Msg     STR     'ok'
Sub:    RET
";
    let index = DocumentIndex::from_text(text, None);
    let symbols = document_symbols(&index);
    let summary: Vec<(&str, SymbolKind, usize)> = symbols
        .iter()
        .map(|sym| (sym.name.as_str(), sym.kind, sym.line_number))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Main", SymbolKind::Function, 0),
            ("Buf", SymbolKind::Array, 1),
            ("Ptr", SymbolKind::Variable, 2),
            ("N", SymbolKind::Constant, 3),
            ("Msg", SymbolKind::Array, 4),
            ("Sub", SymbolKind::Function, 5),
        ]
    );
    assert_eq!(symbols[1].directive, Some(Directive::Tab));
    assert_eq!(symbols[1].selection, Span::new(0, 3));
    assert_eq!(symbols[1].line_span, Span::new(0, 18));
    assert_eq!(symbols[5].selection, Span::new(0, 3));
}

#[test]
fn test_redefinition_lists_the_last_only() {
    let index = DocumentIndex::from_text("X EQU 1\nX WORD 2\n", None);
    let symbols = document_symbols(&index);
    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].kind, SymbolKind::Variable);
    assert_eq!(symbols[0].line_number, 1);
}

#[test]
fn test_empty_document() {
    assert!(document_symbols(&DocumentIndex::from_text("", None)).is_empty());
}
