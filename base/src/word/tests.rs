use super::*;

use test_strategy::proptest;

#[test]
fn test_reinterpret_signed() {
    assert_eq!(reinterpret_signed(0), 0);
    assert_eq!(reinterpret_signed(0x7FFF), 0x7FFF);
    assert_eq!(reinterpret_signed(0x8000), -32768);
    assert_eq!(reinterpret_signed(0xFFFF), -1);
    assert_eq!(reinterpret_signed(-5), -5);
}

#[test]
fn test_unsigned_view() {
    assert_eq!(unsigned_view(-1), 0xFFFF);
    assert_eq!(unsigned_view(-32768), 0x8000);
    assert_eq!(unsigned_view(10), 10);
}

#[proptest]
fn unsigned_view_undoes_reinterpretation(#[strategy(0..0x1_0000i64)] bits: i64) {
    let signed = reinterpret_signed(bits);
    assert!((-32768..32768).contains(&signed));
    assert_eq!(unsigned_view(signed), bits.unsigned_abs());
}

#[proptest]
fn reinterpretation_is_idempotent(#[strategy(-32768..0x1_0000i64)] value: i64) {
    let once = reinterpret_signed(value);
    assert_eq!(reinterpret_signed(once), once);
}
