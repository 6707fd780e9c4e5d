use std::sync::atomic::AtomicBool;

use super::*;

const PROGRAM: &str = "\
; Count down from ten
COUNT   EQU     10
Msg     STR     'Done', 0
        ORIG    0000h
Start:  MOV     R1, COUNT
Loop:   DEC     R1
        BR.NZ   Loop
        CALL    Print
Print:  RET
";

#[test]
fn test_whole_document() {
    let index = DocumentIndex::from_text(PROGRAM, None);
    assert_eq!(index.len(), 9);
    let types: Vec<LineType> = index.lines().iter().map(Line::line_type).collect();
    assert_eq!(
        types,
        vec![
            LineType::Comment,
            LineType::Assignment,
            LineType::Assignment,
            LineType::Instruction,
            LineType::Label,
            LineType::Label,
            LineType::Instruction,
            LineType::Instruction,
            LineType::Label,
        ]
    );
    let labels: Vec<&str> = index.labels().map(|(name, _)| name).collect();
    assert_eq!(labels, vec!["Loop", "Print", "Start"]);
    let variables: Vec<&str> = index.variables().map(|(name, _)| name).collect();
    assert_eq!(variables, vec!["COUNT", "Msg"]);

    assert_eq!(index.label("Loop").map(Line::line_number), Some(5));
    assert_eq!(index.variable("COUNT").map(Line::line_number), Some(1));
    assert!(index.label("COUNT").is_none());
    assert!(index.variable("Nothing").is_none());
}

#[test]
fn test_lines_are_in_source_order() {
    let index = DocumentIndex::from_text(PROGRAM, None);
    for (n, line) in index.lines().iter().enumerate() {
        assert_eq!(line.line_number(), n);
    }
    assert_eq!(index.line(6).map(Line::instruction), Some("BR"));
    assert!(index.line(9).is_none());
}

#[test]
fn test_last_definition_wins() {
    let text = "A: NOP\nX EQU 1\nA: INC R1\nX EQU 2\n";
    let index = DocumentIndex::from_text(text, None);
    assert_eq!(index.labels().count(), 1);
    assert_eq!(index.label("A").map(Line::line_number), Some(2));
    assert_eq!(index.label("A").map(Line::instruction), Some("INC"));
    assert_eq!(index.variable("X").map(Line::value), Some("2"));
}

#[test]
fn test_range() {
    let index = DocumentIndex::from_text_range(PROGRAM, 4..=6, None);
    let numbers: Vec<usize> = index.lines().iter().map(Line::line_number).collect();
    assert_eq!(numbers, vec![4, 5, 6]);
    assert!(index.label("Start").is_some());
    assert!(index.label("Print").is_none());
    assert!(index.variable("COUNT").is_none());
    assert_eq!(index.line(5).map(Line::label), Some("Loop"));
    assert!(index.line(3).is_none());
}

#[test]
fn test_range_past_the_end() {
    let index = DocumentIndex::from_text_range(PROGRAM, 7..=100, None);
    assert_eq!(index.len(), 2);
}

#[test]
fn test_empty_document() {
    let index = DocumentIndex::from_text("", None);
    assert!(index.is_empty());
    assert_eq!(index.labels().count(), 0);
}

#[test]
fn test_cancelled_before_start() {
    let cancel = AtomicBool::new(true);
    let index = DocumentIndex::from_text(PROGRAM, Some(&cancel));
    assert!(index.is_empty());
}

#[test]
fn test_cancelled_part_way() {
    let cancel = AtomicBool::new(false);
    let lines = PROGRAM.lines().enumerate().map(|(n, text)| {
        if n == 5 {
            cancel.store(true, Ordering::Relaxed);
        }
        (text, n)
    });
    let index = DocumentIndex::build(lines, Some(&cancel));
    // The flag was raised while fetching line 5, so that line is not
    // classified.
    assert_eq!(index.len(), 5);
    assert!(index.label("Start").is_some());
    assert!(index.label("Loop").is_none());
}

#[test]
fn test_build_from_owned_strings() {
    let lines = vec![(String::from("  X WORD 3"), 10), (String::from("Y: NOP"), 11)];
    let index = DocumentIndex::build(lines, None);
    assert_eq!(index.variable("X").map(Line::line_number), Some(10));
    assert_eq!(index.label("Y").map(Line::line_number), Some(11));
}
