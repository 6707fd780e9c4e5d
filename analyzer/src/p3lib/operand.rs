//! Scanning operand text for register names.
use logos::Logos;

use base::prelude::*;

use super::span::Span;

/// Register names are recognised anywhere in operand text (the
/// matching is not word-bounded).  Any other character is `Other`.
/// Where names overlap, the longest match wins, so `R15` is never
/// seen as `R1` followed by `5`.
#[derive(Debug, Logos, PartialEq, Eq, Clone, Copy)]
enum OperandToken {
    #[regex(
        "[Pp][Cc]|[Ss][Pp]|[Rr][Ee]|[Rr]1[1-5]|[Rr][0-7]",
        |lex| lex.slice().parse::<Register>().ok(),
        priority = 5
    )]
    Register(Register),

    #[regex(r"[^\n]", priority = 1)]
    Other,
}

/// Returns the register names in `text`, left to right, each with its
/// span in the line.  `base` is the span of `text` within the line.
#[must_use]
pub fn scan_registers(text: &str, base: Span) -> Vec<(String, Span)> {
    OperandToken::lexer(text)
        .spanned()
        .filter_map(|(token, range)| match token {
            Ok(OperandToken::Register(_)) => {
                let columns = Span::from_byte_range(text, Span::from(range.clone()));
                Some((
                    text[range].to_string(),
                    Span::new(base.start + columns.start, base.start + columns.end),
                ))
            }
            Ok(OperandToken::Other) | Err(()) => None,
        })
        .collect()
}

#[cfg(test)]
fn names(text: &str) -> Vec<String> {
    scan_registers(text, Span::EMPTY)
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}

#[test]
fn test_two_registers() {
    let base = Span::new(10, 21);
    assert_eq!(
        scan_registers("MOV R0, R15", base),
        vec![
            ("R0".to_string(), Span::new(14, 16)),
            ("R15".to_string(), Span::new(18, 21)),
        ]
    );
}

#[test]
fn test_offsets_are_character_columns() {
    assert_eq!(
        scan_registers("'ã', R2", Span::new(4, 11)),
        vec![("R2".to_string(), Span::new(9, 11))]
    );
}

#[test]
fn test_no_registers() {
    assert!(scan_registers("", Span::EMPTY).is_empty());
    assert!(names("M[1234h], 'x'").is_empty());
    assert!(names("R8, R9").is_empty());
}

#[test]
fn test_special_registers_and_case() {
    assert_eq!(names("pc, Sp, RE"), vec!["pc", "Sp", "RE"]);
    assert_eq!(names("M[R11+R12], r13, R14"), vec!["R11", "R12", "r13", "R14"]);
}

#[test]
fn test_longest_name_wins() {
    // R10 isn't a register, but its prefix R1 is.
    assert_eq!(names("R10"), vec!["R1"]);
    assert_eq!(names("R15R1"), vec!["R15", "R1"]);
    assert_eq!(names("RR0"), vec!["R0"]);
}

#[test]
fn test_names_inside_words() {
    assert_eq!(names("SPACE"), vec!["SP"]);
    assert_eq!(names("ARE"), vec!["RE"]);
}

#[test]
fn test_every_register_is_recognised() {
    for reg in Register::ALL {
        let mut lexer = OperandToken::lexer(reg.as_str());
        assert_eq!(lexer.next(), Some(Ok(OperandToken::Register(*reg))));
        assert_eq!(lexer.next(), None);
    }
}
