//! Classification of P3 assembly source lines, and the queries an
//! editor makes of the result (hover, go-to-definition, outline).
#![deny(unreachable_pub)]
#![deny(unsafe_code)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::manual_string_new)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::return_self_not_must_use)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::unreadable_literal)]
#![warn(clippy::pedantic)]
#![allow(clippy::wildcard_imports)] // base::prelude
#![allow(clippy::redundant_closure_for_method_calls)] // fix later
#![allow(clippy::doc_markdown)] // fix soon
#![allow(clippy::trivially_copy_pass_by_ref)] // fix soon
#![allow(clippy::map_unwrap_or)] // fix soon

mod constant;
mod definition;
mod document;
mod hover;
mod knowledge;
mod line;
mod operand;
mod rx;
mod span;
mod symbols;

pub use constant::{evaluate, Rendering};
pub use definition::{find_definition, Location};
pub use document::DocumentIndex;
pub use hover::{hover, Hover};
pub use knowledge::{
    InstructionDoc, KnowledgeBase, KnowledgeBaseError, RegisterDoc, Table, INSTRUCTIONS_FILE,
    REGISTERS_FILE,
};
pub use line::{Field, Gaps, Line, LineType};
pub use operand::scan_registers;
pub use span::Span;
pub use symbols::{document_symbols, DocumentSymbol, SymbolKind};
