//! Classification of a single line of P3 assembly source.
//!
//! The language is not block-structured, so a line is taken apart
//! using positional heuristics rather than a grammar.  A line is one
//! of:
//!
//! - a comment (`; text`);
//! - an assignment (`NAME EQU value`, also `WORD`, `STR`, `TAB`);
//! - an instruction, optionally preceded by a label
//!   (`LOOP: MOV R1, R2`);
//! - something else.
//!
//! Every recognised field is recorded with its span in the line so
//! that callers can hit-test a cursor position against it.  Spans are
//! character columns; classification itself works on byte offsets
//! and converts them once it is done.
use serde::Serialize;

use base::mnemonic::strip_condition;
use base::prelude::*;

use super::operand::scan_registers;
use super::rx::LazyRegex;
use super::span::Span;

mod assignment;
#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LineType {
    /// `variable operator value`, with or without a comment.
    Assignment,
    /// `[label] instruction [data]`, with or without a comment.
    Instruction,
    /// A line containing only a comment.
    Comment,
    /// An instruction line which also declares a label (`label:`).
    Label,
    Other,
}

/// The text of one field of a line, together with where it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Field {
    pub text: String,
    pub span: Span,
}

impl Field {
    fn new(text: &str, span: Span) -> Field {
        Field {
            text: text.to_string(),
            span,
        }
    }

    /// Builds the field for the trimmed text of `line[start..end]`.
    /// Blank text yields the empty field.
    fn trimmed(line: &str, start: usize, end: usize) -> Field {
        let s = &line[start..end];
        let text = s.trim();
        if text.is_empty() {
            return Field::default();
        }
        let text_start = start + (s.len() - s.trim_start().len());
        Field::new(text, Span::new(text_start, text_start + text.len()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// The whitespace runs between the fields of an instruction line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Gaps {
    pub before_label: Span,
    pub label_to_instruction: Span,
    pub instruction_to_data: Span,
    pub data_to_comment: Span,
}

/// One classified line of source.  A `Line` is built by
/// [`Line::classify`] and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    raw: String,
    line_number: usize,
    line_type: LineType,
    label: Field,
    instruction: Field,
    data: Field,
    comment: Field,
    variable: Field,
    operator: Field,
    value: Field,
    gaps: Gaps,
    jump_instruction: bool,
}

/// Generates the text and span accessors for each field of `Line`.
macro_rules! field_accessors {
    ($($field:ident, $span_fn:ident;)*) => {
        $(
            #[must_use]
            pub fn $field(&self) -> &str {
                self.$field.text.as_str()
            }

            #[must_use]
            pub fn $span_fn(&self) -> Span {
                self.$field.span
            }
        )*
    };
}

static MNEMONIC: LazyRegex = LazyRegex::built_by(mnemonic_pattern);

/// Builds an alternation of every mnemonic, longest first.  The
/// regex engine prefers the leftmost match and, among matches at the
/// same position, the earliest alternative; so at a given start
/// position `ADDC` is chosen over `ADD`.
fn mnemonic_pattern() -> String {
    let mut names: Vec<&'static str> = Mnemonic::ALL.iter().map(Mnemonic::as_str).collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<String>>()
        .join("|")
}

/// Returns the byte position of the first `target` which is not
/// inside a single-quoted literal.
fn find_unquoted(line: &str, target: char) -> Option<usize> {
    let mut in_quotes = false;
    for (pos, ch) in line.char_indices() {
        if ch == '\'' {
            in_quotes = !in_quotes;
        } else if ch == target && !in_quotes {
            return Some(pos);
        }
    }
    None
}

/// When the code starts in column 0, its first word is taken to be a
/// label and the mnemonic search starts after it.  The exception is
/// a first word which is itself a mnemonic (`CALL LOOP`), since that
/// cannot be a label.
fn mnemonic_search_start(code: &str) -> usize {
    match code.find(char::is_whitespace) {
        Some(pos) => {
            let first_word = strip_condition(&code[..pos]);
            if Mnemonic::ALL.iter().any(|m| m.as_str() == first_word) {
                0
            } else {
                pos
            }
        }
        None => 0,
    }
}

impl Line {
    fn unclassified(raw: &str, line_number: usize) -> Line {
        Line {
            raw: raw.to_string(),
            line_number,
            line_type: LineType::Other,
            label: Field::default(),
            instruction: Field::default(),
            data: Field::default(),
            comment: Field::default(),
            variable: Field::default(),
            operator: Field::default(),
            value: Field::default(),
            gaps: Gaps::default(),
            jump_instruction: false,
        }
    }

    /// Classifies one line of text.  This never fails: text which has
    /// no recognisable shape yields a line of type
    /// [`LineType::Other`].
    #[must_use]
    pub fn classify(text: &str, line_number: usize) -> Line {
        let mut line = Line::classify_bytes(text, line_number);
        if !text.is_ascii() {
            line.convert_spans_to_columns();
        }
        line
    }

    fn convert_spans_to_columns(&mut self) {
        let raw = self.raw.as_str();
        for span in [
            &mut self.label.span,
            &mut self.instruction.span,
            &mut self.data.span,
            &mut self.comment.span,
            &mut self.variable.span,
            &mut self.operator.span,
            &mut self.value.span,
            &mut self.gaps.before_label,
            &mut self.gaps.label_to_instruction,
            &mut self.gaps.instruction_to_data,
            &mut self.gaps.data_to_comment,
        ] {
            *span = Span::from_byte_range(raw, *span);
        }
    }

    fn classify_bytes(text: &str, line_number: usize) -> Line {
        let mut line = Line::unclassified(text, line_number);
        let body = text.trim_start();
        if body.is_empty() {
            return line;
        }
        let leading = text.len() - body.len();
        line.gaps.before_label = Span::new(0, leading);

        if body.starts_with(';') {
            let comment = body.trim_end();
            line.comment = Field::new(comment, Span::new(leading, leading + comment.len()));
            line.line_type = LineType::Comment;
            return line;
        }

        let comment_start = find_unquoted(text, ';');
        let code: &str = match comment_start {
            Some(pos) => {
                let comment = text[pos..].trim_end();
                line.comment = Field::new(comment, Span::new(pos, pos + comment.len()));
                &text[..pos]
            }
            None => text,
        };

        if let Some(assignment) = assignment::parse(code) {
            line.variable = assignment.variable;
            line.operator = assignment.operator;
            line.value = assignment.value;
            line.line_type = LineType::Assignment;
            return line;
        }

        line.classify_instruction(code, leading, comment_start);
        line
    }

    fn classify_instruction(&mut self, code: &str, leading: usize, comment_start: Option<usize>) {
        // `trimmed` begins at column `leading` of the line.
        let trimmed = code.trim();
        let search_start = if leading == 0 {
            mnemonic_search_start(trimmed)
        } else {
            0
        };
        let region = &trimmed[search_start..];
        // A mnemonic inside a literal doesn't count.
        let region = match region.find(['"', '\'']) {
            Some(quote) => &region[..quote],
            None => region,
        };
        let Some(found) = MNEMONIC.find(region) else {
            return;
        };

        let keyword_index = search_start + found.start();
        let instruction_start = leading + keyword_index;
        let instruction_end = instruction_start + found.len();
        self.line_type = LineType::Instruction;
        self.instruction = Field::new(
            found.as_str(),
            Span::new(instruction_start, instruction_end),
        );
        self.jump_instruction =
            Mnemonic::from_instruction_text(found.as_str()).is_some_and(|m| m.is_jump());

        if keyword_index > 0 {
            let label = trimmed[..keyword_index].trim_end();
            let label_end = leading + label.len();
            self.label = Field::new(label, Span::new(leading, label_end));
            self.gaps.label_to_instruction = Span::new(label_end, instruction_start);
        }

        let mut current = instruction_end;
        let rest = &trimmed[keyword_index + found.len()..];
        let data = rest.trim();
        if !data.is_empty() {
            let data_start = instruction_end + (rest.len() - rest.trim_start().len());
            self.gaps.instruction_to_data = Span::new(instruction_end, data_start);
            self.data = Field::new(data, Span::new(data_start, data_start + data.len()));
            current = data_start + data.len();
        }
        if let Some(comment_pos) = comment_start {
            self.gaps.data_to_comment = Span::new(current, comment_pos);
        }

        // A colon inside a literal (`MOV R1, ':'`) doesn't end a label.
        if let Some(colon) = find_unquoted(&self.raw, ':') {
            if colon > leading && comment_start.map_or(true, |pos| colon < pos) {
                self.line_type = LineType::Label;
                let label = trimmed[..colon - leading].trim_end();
                self.label = Field::new(label, Span::new(leading, leading + label.len()));
            }
        }
    }

    field_accessors! {
        label, label_span;
        instruction, instruction_span;
        data, data_span;
        comment, comment_span;
        variable, variable_span;
        operator, operator_span;
        value, value_span;
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        self.raw.as_str()
    }

    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    #[must_use]
    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    /// The span of the whole line.
    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(0, self.raw.chars().count())
    }

    #[must_use]
    pub fn gaps(&self) -> &Gaps {
        &self.gaps
    }

    /// True when the instruction is `CALL`, `JMP` or `BR` (with or
    /// without a condition suffix).
    #[must_use]
    pub fn is_jump_instruction(&self) -> bool {
        self.jump_instruction
    }

    /// The directive of an assignment line.
    #[must_use]
    pub fn directive(&self) -> Option<Directive> {
        self.operator.text.parse().ok()
    }

    /// The registers named in the data field, in order.
    #[must_use]
    pub fn registers_in_data(&self) -> Vec<(String, Span)> {
        if self.data.is_empty() {
            Vec::new()
        } else {
            scan_registers(self.data(), self.data_span())
        }
    }

    /// If `column` is inside a single-quoted literal, returns the
    /// position of the quote which opened it.
    #[must_use]
    pub fn find_opening_quote(&self, column: usize) -> Option<usize> {
        let mut opening: Option<usize> = None;
        for (pos, ch) in self.raw.chars().enumerate() {
            if pos >= column {
                break;
            }
            if ch == '\'' {
                opening = match opening {
                    None => Some(pos),
                    Some(_) => None,
                };
            }
        }
        opening
    }
}
