//! # Arithmetic Tests

use armsim_core::core::arch::flags::Flags;
use armsim_core::core::units::alu::arithmetic::{add, compare, multiply_accumulate, sub};
use armsim_core::core::units::alu::{Alu, AluOp, AluResult};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(1, 2, 3, false, false)]
#[case(0xFFFF_FFFF, 1, 0, true, false)]
#[case(0x7FFF_FFFF, 1, 0x8000_0000, false, true)]
#[case(0x8000_0000, 0x8000_0000, 0, true, true)]
fn test_add_carry_and_overflow(
    #[case] a: u32,
    #[case] b: u32,
    #[case] value: u32,
    #[case] carry: bool,
    #[case] overflow: bool,
) {
    let res = add(a, b);
    assert_eq!(res.value, value);
    assert_eq!(res.carry, Some(carry));
    assert_eq!(res.overflow, Some(overflow));
}

#[rstest]
#[case(5, 3, 2, true, false)]
#[case(3, 5, 0xFFFF_FFFE, false, false)]
#[case(0, 0, 0, true, false)]
#[case(0x8000_0000, 1, 0x7FFF_FFFF, true, true)]
#[case(0x7FFF_FFFF, 0xFFFF_FFFF, 0x8000_0000, false, true)]
fn test_sub_borrow_and_overflow(
    #[case] a: u32,
    #[case] b: u32,
    #[case] value: u32,
    #[case] carry: bool,
    #[case] overflow: bool,
) {
    let res = sub(a, b);
    assert_eq!(res.value, value);
    assert_eq!(res.carry, Some(carry), "carry means no borrow");
    assert_eq!(res.overflow, Some(overflow));
}

#[test]
fn test_mul_keeps_low_word_and_defines_no_carry() {
    let res = Alu::execute(AluOp::Mul, 0x1_0001, 0x1_0001);
    assert_eq!(res, AluResult::plain(0x0002_0001));

    // 0xFFFFFFFF * 0xFFFFFFFF = 0xFFFFFFFE_00000001
    assert_eq!(Alu::execute(AluOp::Mul, u32::MAX, u32::MAX).value, 1);
}

#[test]
fn test_multiply_accumulate_wraps() {
    assert_eq!(multiply_accumulate(3, 4, 5), AluResult::plain(17));
    assert_eq!(multiply_accumulate(0x1_0001, 0x1_0000, 7).value, 0x0001_0007);
    assert_eq!(multiply_accumulate(u32::MAX, 1, 1).value, 0);
}

#[test]
fn test_flags_fall_back_to_shifter_carry_and_previous_overflow() {
    let prev = Flags::new(false, false, false, true);
    let flags = AluResult::plain(0).flags(prev, true);
    assert_eq!(flags, Flags::new(false, true, true, true));
}

#[test]
fn test_compare_equal_operands() {
    assert_eq!(compare(10, 10), Flags::new(false, true, true, false));
}

#[test]
fn test_compare_smaller_first_operand() {
    // 3 - 5 borrows and is negative.
    assert_eq!(compare(3, 5), Flags::new(true, false, false, false));
}

proptest! {
    #[test]
    fn prop_compare_zero_iff_equal(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(compare(a, b).z, a == b);
    }

    #[test]
    fn prop_compare_negative_iff_wrapped_difference_negative(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(compare(a, b).n, (a.wrapping_sub(b) as i32) < 0);
    }

    #[test]
    fn prop_compare_carry_iff_no_borrow(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(compare(a, b).c, a >= b);
    }

    #[test]
    fn prop_compare_is_idempotent(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(compare(a, b), compare(a, b));
    }

    #[test]
    fn prop_add_wraps(a in any::<u32>(), b in any::<u32>()) {
        let res = Alu::execute(AluOp::Add, a, b);
        prop_assert_eq!(res.value, a.wrapping_add(b));
        prop_assert_eq!(res.carry, Some(u64::from(a) + u64::from(b) > u64::from(u32::MAX)));
    }
}
