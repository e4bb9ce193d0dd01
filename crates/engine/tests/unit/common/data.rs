//! # Access Kind Tests

use cachesim_core::common::AccessKind;
use rstest::rstest;

#[rstest]
#[case('R', AccessKind::Read)]
#[case('W', AccessKind::Write)]
#[case('r', AccessKind::Write)]
#[case('X', AccessKind::Write)]
#[case('0', AccessKind::Write)]
fn trace_char_classification(#[case] c: char, #[case] expected: AccessKind) {
    assert_eq!(AccessKind::from_trace_char(c), expected);
}

#[test]
fn display_is_single_letter() {
    assert_eq!(AccessKind::Read.to_string(), "R");
    assert_eq!(AccessKind::Write.to_string(), "W");
}

#[test]
fn only_reads_are_reads() {
    assert!(AccessKind::Read.is_read());
    assert!(!AccessKind::Write.is_read());
}
