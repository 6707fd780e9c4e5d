//! Hover text for a position in a line.
//!
//! Over an instruction we show its documentation, over a register in
//! the operands we show the register's documentation, and over a
//! constant we show its value in each base.
use serde::Serialize;

use base::mnemonic::strip_condition;

use super::constant::{evaluate, Rendering};
use super::knowledge::{InstructionDoc, KnowledgeBase, RegisterDoc};
use super::line::Line;
use super::span::{word_span_at, Span};

/// Hover content: a sequence of markdown paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hover {
    pub contents: Vec<String>,
}

/// Computes the hover for `column` of `line`, if there is anything to
/// say about what is there.
#[must_use]
pub fn hover(line: &Line, column: usize, kb: &KnowledgeBase) -> Option<Hover> {
    if !line.instruction().is_empty() && line.instruction_span().contains(column) {
        kb.instruction(strip_condition(line.instruction()))
            .map(render_instruction)
    } else if line.data_span().contains(column) {
        let documented_register = line
            .registers_in_data()
            .into_iter()
            .filter(|(_, span)| span.contains(column))
            .find_map(|(name, _)| kb.register(&name));
        match documented_register {
            Some(reg) => Some(render_register(reg)),
            None => constant_hover(line, line.data_span(), column),
        }
    } else if line.value_span().contains(column) {
        constant_hover(line, line.value_span(), column)
    } else {
        None
    }
}

fn constant_hover(line: &Line, field: Span, column: usize) -> Option<Hover> {
    let values = evaluate(extract_constant(line, field, column)?)?;
    if values.is_empty() {
        return None;
    }
    Some(Hover {
        contents: values
            .into_iter()
            .map(|v| Rendering::new(v).to_string())
            .collect(),
    })
}

/// Finds the text of the constant at `column`: the quoted literal
/// around the cursor, the whole field if the field is one literal, or
/// else the word under the cursor (with its minus sign, if any).
fn extract_constant(line: &Line, field: Span, column: usize) -> Option<&str> {
    let raw = line.raw();
    if let Some(open) = line.find_opening_quote(column) {
        if open >= field.start {
            let end = Span::new(open + 1, field.end)
                .extract(raw)
                .chars()
                .position(|ch| ch == '\'')
                .map_or(field.end, |pos| open + 1 + pos + 1);
            return Some(Span::new(open, end).extract(raw));
        }
    }
    let text = field.extract(raw);
    if text.chars().count() >= 3 && text.starts_with('\'') && text.ends_with('\'') {
        return Some(text);
    }
    let word = word_span_at(raw, column)?;
    if word.start > field.start && Span::new(word.start - 1, word.start).extract(raw) == "-" {
        Some(Span::new(word.start - 1, word.end).extract(raw))
    } else {
        Some(word.extract(raw))
    }
}

fn render_instruction(inst: &InstructionDoc) -> Hover {
    let mut contents = Vec::with_capacity(3);
    contents.push(format!(
        "**{}**{}: *{}*",
        inst.name,
        if inst.pseudo {
            " (pseudo-instruction)"
        } else {
            ""
        },
        inst.format
    ));
    if !inst.flags.is_empty() {
        contents.push(format!("**Flags**: {}", inst.flags));
    }
    contents.push(inst.description.clone());
    Hover { contents }
}

fn render_register(reg: &RegisterDoc) -> Hover {
    let heading = if reg.aliases.is_empty() {
        format!("Register **{}**", reg.name)
    } else {
        format!("Register **{}** ({})", reg.name, reg.aliases.join(", "))
    };
    Hover {
        contents: vec![heading, reg.description.clone()],
    }
}

#[cfg(test)]
fn knowledge() -> KnowledgeBase {
    KnowledgeBase::parse(
        "MOV;MOV op1, op2;Copies op2 to op1.;;false\n\
         BR;BR.cond label;Branches if cond holds.;;false\n\
         ADD;ADD op1, op2;Adds.;ZCNO;false\n\
         NOP;NOP;Does nothing.;;true\n",
        "R1;General purpose register.;\nR14;Stack pointer.;SP\n",
    )
    .expect("test data is valid")
}

#[cfg(test)]
fn hover_at(text: &str, column: usize) -> Option<Vec<String>> {
    hover(&Line::classify(text, 0), column, &knowledge()).map(|h| h.contents)
}

#[test]
fn test_instruction_hover() {
    assert_eq!(
        hover_at("   ADD R1, 3", 4),
        Some(vec![
            "**ADD**: *ADD op1, op2*".to_string(),
            "**Flags**: ZCNO".to_string(),
            "Adds.".to_string(),
        ])
    );
    assert_eq!(
        hover_at("   NOP", 3).map(|c| c[0].clone()),
        Some("**NOP** (pseudo-instruction): *NOP*".to_string())
    );
    // The condition is not part of the instruction name.
    assert_eq!(
        hover_at("   BR.Z Loop", 4).map(|c| c.len()),
        Some(2)
    );
    // Undocumented instruction.
    assert_eq!(hover_at("   INC R1", 4), None);
}

#[test]
fn test_register_hover() {
    assert_eq!(
        hover_at("   MOV R1, SP", 7),
        Some(vec![
            "Register **R1**".to_string(),
            "General purpose register.".to_string(),
        ])
    );
    assert_eq!(
        hover_at("   MOV R1, SP", 11).map(|c| c[0].clone()),
        Some("Register **R14** (SP)".to_string())
    );
}

#[test]
fn test_constant_hover_in_data() {
    assert_eq!(
        hover_at("   MOV R2, 8000h", 13),
        Some(vec![
            "**Dec**: -32768 | **Hex**: 8000h | **Bin**: 1000000000000000b".to_string()
        ])
    );
    assert_eq!(
        hover_at("   MOV R2, -2", 12),
        Some(vec![
            "**Dec**: -2 | **Hex**: FFFEh | **Bin**: 1111111111111110b".to_string()
        ])
    );
    assert_eq!(
        hover_at("   MOV R2, 'A'", 12),
        Some(vec![
            "**Dec**: 65 | **Hex**: 0041h | **Char**: A | **Bin**: 1000001b".to_string()
        ])
    );
    // R2 is a register, but it isn't documented, and it isn't a
    // constant either.
    assert_eq!(hover_at("   MOV R2, 5", 7), None);
}

#[test]
fn test_constant_hover_in_value() {
    let contents = hover_at("Msg STR 'Hi', 0", 9).expect("inside the literal");
    assert_eq!(contents.len(), 2);
    assert!(contents[0].starts_with("**Dec**: 72 |"));
    assert!(contents[1].starts_with("**Dec**: 105 |"));

    let contents = hover_at("Msg STR 'Hi', 0", 14).expect("on the terminator");
    assert_eq!(contents, vec!["**Dec**: 0 | **Hex**: 0000h | **Char**: \0 | **Bin**: 0b"]);

    assert_eq!(
        hover_at("Mask EQU 1010b", 10).map(|c| c.len()),
        Some(1)
    );
}

#[test]
fn test_hover_after_non_ascii_text() {
    assert_eq!(
        hover_at("   MOV R1, 'ç' ; põe", 12),
        Some(vec![
            "**Dec**: 231 | **Hex**: 00E7h | **Char**: ç | **Bin**: 11100111b".to_string()
        ])
    );
    assert_eq!(
        hover_at("Msg STR 'é', 10", 13).map(|c| c[0].clone()),
        Some("**Dec**: 10 | **Hex**: 000Ah | **Char**: \n | **Bin**: 1010b".to_string())
    );
    assert_eq!(
        hover_at("Início: MOV SP, R1", 12).map(|c| c[0].clone()),
        Some("Register **R14** (SP)".to_string())
    );
}

#[test]
fn test_no_hover() {
    // Over the label.
    assert_eq!(hover_at("Loop: MOV R1, 5", 1), None);
    // Over the comment.
    assert_eq!(hover_at("   NOP ; 5", 9), None);
    // Over the variable name.
    assert_eq!(hover_at("X EQU 5", 0), None);
    // Past the end of the line.
    assert_eq!(hover_at("   MOV R1, 5", 40), None);
}
