//! Recognition of assignment lines (`NAME EQU value`).
use super::super::rx::LazyRegex;
use super::super::span::Span;
use super::Field;

/// The directive keyword must be followed by whitespace.  The lazy
/// prefix makes this the first such keyword in the line.  Keyword case
/// is ignored (ASCII only, so that the keyword is always three or four
/// bytes long).
static ASSIGNMENT: LazyRegex =
    LazyRegex::new(r"^(?<variable>.*?)(?<operator>(?i-u:EQU|WORD|STR|TAB))(?<gap>\s+)");

#[derive(Debug, PartialEq, Eq)]
pub(super) struct Assignment {
    pub(super) variable: Field,
    pub(super) operator: Field,
    pub(super) value: Field,
}

/// Parses the code part of a line (that is, the part before any
/// comment) as an assignment.
pub(super) fn parse(code: &str) -> Option<Assignment> {
    let captures = ASSIGNMENT.captures(code)?;
    let variable = captures.name("variable")?;
    let operator = captures.name("operator")?;
    let gap = captures.name("gap")?;
    Some(Assignment {
        variable: Field::trimmed(code, variable.start(), variable.end()),
        operator: Field {
            text: operator.as_str().to_ascii_uppercase(),
            span: Span::from(operator.range()),
        },
        value: Field::trimmed(code, gap.end(), code.len()),
    })
}

#[test]
fn test_simple_assignment() {
    let a = parse("COUNT EQU 10 ").expect("should be an assignment");
    assert_eq!(a.variable, Field::new("COUNT", Span::new(0, 5)));
    assert_eq!(a.operator, Field::new("EQU", Span::new(6, 9)));
    assert_eq!(a.value, Field::new("10", Span::new(10, 12)));
}

#[test]
fn test_operator_is_normalised() {
    let a = parse("  msg str 'hi'").expect("should be an assignment");
    assert_eq!(a.variable, Field::new("msg", Span::new(2, 5)));
    assert_eq!(a.operator, Field::new("STR", Span::new(6, 9)));
    assert_eq!(a.value, Field::new("'hi'", Span::new(10, 14)));
}

#[test]
fn test_first_keyword_wins() {
    // WORDS is not followed by whitespace, so it isn't the directive.
    let a = parse("WORDS WORD 5").expect("should be an assignment");
    assert_eq!(a.variable.text, "WORDS");
    assert_eq!(a.operator.span, Span::new(6, 10));
    assert_eq!(a.value.text, "5");

    let a = parse("X EQU Y EQU 2").expect("should be an assignment");
    assert_eq!(a.variable.text, "X");
    assert_eq!(a.value.text, "Y EQU 2");
}

#[test]
fn test_keyword_needs_whitespace_after_it() {
    assert_eq!(parse("TABLE"), None);
    assert_eq!(parse("X EQU"), None);
    assert_eq!(parse("  MOV R1, R2"), None);
}

#[test]
fn test_missing_value() {
    let a = parse("X WORD   ").expect("should be an assignment");
    assert_eq!(a.variable.text, "X");
    assert!(a.value.is_empty());
    assert_eq!(a.value.span, Span::EMPTY);
}
