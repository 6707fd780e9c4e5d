use test_strategy::proptest;

use super::*;

fn classify(text: &str) -> Line {
    Line::classify(text, 7)
}

fn assert_all_spans_empty(line: &Line) {
    for span in [
        line.label_span(),
        line.instruction_span(),
        line.data_span(),
        line.comment_span(),
        line.variable_span(),
        line.operator_span(),
        line.value_span(),
        line.gaps().before_label,
        line.gaps().label_to_instruction,
        line.gaps().instruction_to_data,
        line.gaps().data_to_comment,
    ] {
        assert_eq!(span, Span::EMPTY, "unexpected span in {line:?}");
    }
}

#[test]
fn test_blank_lines() {
    for text in ["", "   ", "\t \t"] {
        let line = classify(text);
        assert_eq!(line.line_type(), LineType::Other);
        assert_eq!(line.raw(), text);
        assert_eq!(line.line_number(), 7);
        assert_all_spans_empty(&line);
    }
}

#[test]
fn test_comment_line() {
    let line = classify("   ; just a remark  ");
    assert_eq!(line.line_type(), LineType::Comment);
    assert_eq!(line.comment(), "; just a remark");
    assert_eq!(line.comment_span(), Span::new(3, 18));
    assert_eq!(line.gaps().before_label, Span::new(0, 3));
    assert_eq!(line.instruction(), "");
}

#[test]
fn test_label_with_instruction_and_comment() {
    let text = "LOOP: MOV R0, 5 ; note";
    let line = classify(text);
    assert_eq!(line.line_type(), LineType::Label);
    assert_eq!(line.label(), "LOOP");
    assert_eq!(line.instruction(), "MOV");
    assert_eq!(line.data(), "R0, 5");
    assert_eq!(line.comment(), "; note");
    assert!(!line.is_jump_instruction());

    assert_eq!(line.label_span(), Span::new(0, 4));
    assert_eq!(line.instruction_span(), Span::new(6, 9));
    assert_eq!(line.data_span(), Span::new(10, 15));
    assert_eq!(line.comment_span(), Span::new(16, 22));
    assert_eq!(line.gaps().label_to_instruction, Span::new(5, 6));
    assert_eq!(line.gaps().instruction_to_data, Span::new(9, 10));
    assert_eq!(line.gaps().data_to_comment, Span::new(15, 16));
    assert_eq!(line.instruction_span().extract(text), "MOV");
    assert_eq!(line.data_span().extract(text), "R0, 5");
}

#[test]
fn test_jump_instruction_in_column_zero() {
    let line = classify("CALL LOOP");
    assert_eq!(line.line_type(), LineType::Instruction);
    assert_eq!(line.instruction(), "CALL");
    assert_eq!(line.data(), "LOOP");
    assert_eq!(line.label(), "");
    assert!(line.is_jump_instruction());
    assert_eq!(line.instruction_span(), Span::new(0, 4));
    assert_eq!(line.data_span(), Span::new(5, 9));
}

#[test]
fn test_indented_instruction() {
    let line = classify("        JMP.Z   Done");
    assert_eq!(line.line_type(), LineType::Instruction);
    assert_eq!(line.instruction(), "JMP");
    assert_eq!(line.data(), ".Z   Done");
    assert!(line.is_jump_instruction());
    assert_eq!(line.gaps().before_label, Span::new(0, 8));
    assert_eq!(line.instruction_span(), Span::new(8, 11));
    // The condition suffix follows the mnemonic directly.
    assert_eq!(line.gaps().instruction_to_data, Span::new(11, 11));
    assert_eq!(line.data_span(), Span::new(11, 20));
}

#[test]
fn test_instruction_without_data() {
    let line = classify("        RET    ; back");
    assert_eq!(line.line_type(), LineType::Instruction);
    assert_eq!(line.instruction(), "RET");
    assert_eq!(line.data(), "");
    assert_eq!(line.data_span(), Span::EMPTY);
    assert_eq!(line.gaps().data_to_comment, Span::new(11, 15));
    assert_eq!(line.comment(), "; back");
}

#[test]
fn test_column_zero_word_is_label_candidate() {
    // Without the colon this is an instruction line which has a label
    // field but is not a Label line.
    let line = classify("Start   MOV R1, R2");
    assert_eq!(line.line_type(), LineType::Instruction);
    assert_eq!(line.label(), "Start");
    assert_eq!(line.label_span(), Span::new(0, 5));
    assert_eq!(line.gaps().label_to_instruction, Span::new(5, 8));
    assert_eq!(line.instruction(), "MOV");
}

#[test]
fn test_label_candidate_is_not_searched() {
    // "ADDER" contains "ADD", but it is in the label position.
    let line = classify("ADDER: INC R1");
    assert_eq!(line.line_type(), LineType::Label);
    assert_eq!(line.label(), "ADDER");
    assert_eq!(line.instruction(), "INC");
}

#[test]
fn test_single_word_in_column_zero() {
    let line = classify("NOP");
    assert_eq!(line.line_type(), LineType::Instruction);
    assert_eq!(line.instruction(), "NOP");

    let line = classify("LOOP:");
    assert_eq!(line.line_type(), LineType::Other);
    assert_eq!(line.label(), "");
}

#[test]
fn test_leftmost_then_longest_mnemonic() {
    let line = classify("   ADDC R1, R2");
    assert_eq!(line.instruction(), "ADDC");
    let line = classify("   ROLC R1, 2");
    assert_eq!(line.instruction(), "ROLC");
    let line = classify("   RETN 2");
    assert_eq!(line.instruction(), "RETN");
    let line = classify("   SHRA R1, 3");
    assert_eq!(line.instruction(), "SHRA");
}

#[test]
fn test_mnemonic_matching_is_not_word_bounded() {
    let line = classify("   ADDCOUNT R1");
    assert_eq!(line.line_type(), LineType::Instruction);
    assert_eq!(line.instruction(), "ADDC");
    assert_eq!(line.data(), "OUNT R1");
}

#[test]
fn test_mnemonic_matching_is_case_sensitive() {
    let line = classify("   mov r1, r2");
    assert_eq!(line.line_type(), LineType::Other);
}

#[test]
fn test_no_mnemonic_inside_literal() {
    let line = classify("   'MOV' R1");
    assert_eq!(line.line_type(), LineType::Other);

    let line = classify("   MOV R1, 'CALL'");
    assert_eq!(line.instruction(), "MOV");
    assert_eq!(line.data(), "R1, 'CALL'");
    assert!(!line.is_jump_instruction());
}

#[test]
fn test_semicolon_in_quotes_is_not_a_comment() {
    let text = "   MOV R1, ';' ; load a semicolon";
    let line = classify(text);
    assert_eq!(line.line_type(), LineType::Instruction);
    assert_eq!(line.data(), "R1, ';'");
    assert_eq!(line.comment(), "; load a semicolon");
    assert_eq!(line.comment_span().start, 15);
}

#[test]
fn test_assignment() {
    let line = classify("COUNT EQU 10 ; init");
    assert_eq!(line.line_type(), LineType::Assignment);
    assert_eq!(line.variable(), "COUNT");
    assert_eq!(line.operator(), "EQU");
    assert_eq!(line.value(), "10");
    assert_eq!(line.comment(), "; init");
    assert_eq!(line.variable_span(), Span::new(0, 5));
    assert_eq!(line.operator_span(), Span::new(6, 9));
    assert_eq!(line.value_span(), Span::new(10, 12));
    assert_eq!(line.comment_span(), Span::new(13, 19));
    assert_eq!(line.directive(), Some(Directive::Equ));
    assert_eq!(line.instruction(), "");
}

#[test]
fn test_indented_assignment_spans() {
    let line = classify("    Msg  STR  'Hello; world', 0");
    assert_eq!(line.line_type(), LineType::Assignment);
    assert_eq!(line.variable(), "Msg");
    assert_eq!(line.variable_span(), Span::new(4, 7));
    assert_eq!(line.operator(), "STR");
    assert_eq!(line.value(), "'Hello; world', 0");
    assert_eq!(line.value_span(), Span::new(14, 31));
    assert_eq!(line.comment(), "");
}

#[test]
fn test_assignment_directive_in_comment_is_ignored() {
    let line = classify("   NOP ; X EQU 3");
    assert_eq!(line.line_type(), LineType::Instruction);
    assert_eq!(line.variable(), "");
}

#[test]
fn test_colon_in_comment_is_not_a_label() {
    let line = classify("   MOV R1, R2 ; note: copy");
    assert_eq!(line.line_type(), LineType::Instruction);
    assert_eq!(line.label(), "");
}

#[test]
fn test_indented_label() {
    let line = classify("  Next:  BR.NZ Next");
    assert_eq!(line.line_type(), LineType::Label);
    assert_eq!(line.label(), "Next");
    assert_eq!(line.label_span(), Span::new(2, 6));
    assert_eq!(line.instruction(), "BR");
    assert!(line.is_jump_instruction());
    assert_eq!(line.data(), ".NZ Next");
}

#[test]
fn test_colon_in_literal_is_not_a_label() {
    let line = classify("   MOV R1, ':'");
    assert_eq!(line.line_type(), LineType::Instruction);
    assert_eq!(line.label(), "");
    assert_eq!(line.label_span(), Span::EMPTY);
    assert_eq!(line.data(), "R1, ':'");

    let line = classify("Sep: MOV R1, ':'");
    assert_eq!(line.line_type(), LineType::Label);
    assert_eq!(line.label(), "Sep");
}

#[test]
fn test_spans_are_character_columns() {
    let text = "ÉTIQ: MOV R1, 5 ; põe cinco";
    let line = classify(text);
    assert_eq!(line.line_type(), LineType::Label);
    assert_eq!(line.label(), "ÉTIQ");
    assert_eq!(line.label_span(), Span::new(0, 4));
    assert_eq!(line.gaps().label_to_instruction, Span::new(5, 6));
    assert_eq!(line.instruction_span(), Span::new(6, 9));
    assert_eq!(line.data_span(), Span::new(10, 15));
    assert_eq!(line.comment_span(), Span::new(16, 27));
    assert_eq!(line.span(), Span::new(0, 27));
    assert_eq!(line.label_span().extract(text), "ÉTIQ");
    assert_eq!(line.comment_span().extract(text), "; põe cinco");

    let regs = line.registers_in_data();
    assert_eq!(regs, vec![("R1".to_string(), Span::new(10, 12))]);
}

#[test]
fn test_assignment_spans_are_character_columns() {
    let text = "Mensagem STR 'Olá', 0";
    let line = classify(text);
    assert_eq!(line.line_type(), LineType::Assignment);
    assert_eq!(line.variable_span(), Span::new(0, 8));
    assert_eq!(line.operator_span(), Span::new(9, 12));
    assert_eq!(line.value(), "'Olá', 0");
    assert_eq!(line.value_span(), Span::new(13, 21));
    assert_eq!(line.find_opening_quote(16), Some(13));
    assert_eq!(line.find_opening_quote(18), None);
}

#[test]
fn test_registers_in_data() {
    let line = classify("   MOV R1, M[R15+SP]");
    let regs = line.registers_in_data();
    let names: Vec<&str> = regs.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["R1", "R15", "SP"]);
    assert_eq!(regs[0].1, Span::new(7, 9));
    assert_eq!(regs[1].1, Span::new(13, 16));

    assert!(classify("   NOP").registers_in_data().is_empty());
}

#[test]
fn test_find_opening_quote() {
    let line = classify("X STR 'ab', 'cd'");
    assert_eq!(line.find_opening_quote(5), None);
    assert_eq!(line.find_opening_quote(7), Some(6));
    assert_eq!(line.find_opening_quote(9), Some(6));
    assert_eq!(line.find_opening_quote(10), None);
    assert_eq!(line.find_opening_quote(13), Some(12));
}

fn populated_spans_in_order(line: &Line) -> Vec<Span> {
    let spans = match line.line_type() {
        LineType::Assignment => vec![
            line.variable_span(),
            line.operator_span(),
            line.value_span(),
            line.comment_span(),
        ],
        _ => vec![
            line.gaps().before_label,
            line.label_span(),
            line.instruction_span(),
            line.data_span(),
            line.comment_span(),
        ],
    };
    spans.into_iter().filter(|s| !s.is_empty()).collect()
}

#[proptest]
fn spans_lie_within_the_line(#[strategy("[ A-Z0-9a-z:;',\\[\\]]{0,30}")] text: String) {
    let line = Line::classify(&text, 0);
    for span in populated_spans_in_order(&line) {
        assert!(span.start <= span.end);
        assert!(span.end <= text.len(), "{span} outside {text:?}");
    }
}

#[proptest]
fn simple_instruction_spans_are_ordered(
    #[strategy("[A-Z]{1,6}")] label: String,
    #[strategy(0usize..Mnemonic::ALL.len())] which: usize,
    #[strategy("[0-9]{1,4}")] operand: String,
) {
    let mnemonic = Mnemonic::ALL[which].as_str();
    let text = format!("{label}: {mnemonic} R1, {operand} ; c");
    let line = Line::classify(&text, 0);
    assert_eq!(line.line_type(), LineType::Label);
    assert_eq!(line.label(), label.as_str());
    let spans = populated_spans_in_order(&line);
    for pair in spans.windows(2) {
        assert!(pair[0].end <= pair[1].start, "{pair:?} overlap in {text:?}");
    }
}
