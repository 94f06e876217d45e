//! # Logic Tests

use armsim_core::core::units::alu::{Alu, AluOp, logic};
use rstest::rstest;

#[rstest]
#[case(AluOp::And, 0xF0F0, 0xFF00, 0xF000)]
#[case(AluOp::Orr, 0xF0F0, 0xFF00, 0xFFF0)]
#[case(AluOp::Eor, 0xF0F0, 0xFF00, 0x0FF0)]
#[case(AluOp::And, 0x80, 0, 0)]
#[case(AluOp::Orr, 0x80, 0, 0x80)]
fn test_logic_ops(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(logic::execute(op, a, b), expected);
}

#[test]
fn test_logic_defines_no_carry_or_overflow() {
    let res = Alu::execute(AluOp::Eor, u32::MAX, 1);
    assert_eq!(res.value, 0xFFFF_FFFE);
    assert_eq!(res.carry, None);
    assert_eq!(res.overflow, None);
}
