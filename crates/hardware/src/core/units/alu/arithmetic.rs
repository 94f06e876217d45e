//! ALU arithmetic operations.
//!
//! Implements 32-bit wrapping addition, subtraction and multiplication, reporting the
//! A32 carry and overflow conditions:
//! - Addition carries when the unsigned sum exceeds 32 bits.
//! - Subtraction sets carry when no borrow occurs (`a >= b` unsigned).
//! - Overflow is set when the signed result does not fit in 32 bits.

use crate::core::arch::flags::Flags;
use crate::core::units::alu::{AluOp, AluResult};

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU operation (`Add`, `Sub` or `Mul`; any other value adds).
/// * `a`  - First operand.
/// * `b`  - Second operand.
pub fn execute(op: AluOp, a: u32, b: u32) -> AluResult {
    match op {
        AluOp::Sub => sub(a, b),
        AluOp::Mul => AluResult::plain(a.wrapping_mul(b)),
        _ => add(a, b),
    }
}

/// `a + b` with carry and overflow.
pub const fn add(a: u32, b: u32) -> AluResult {
    let (value, carry) = a.overflowing_add(b);
    AluResult {
        value,
        carry: Some(carry),
        overflow: Some((a as i32).overflowing_add(b as i32).1),
    }
}

/// `a - b` with no-borrow carry and overflow.
pub const fn sub(a: u32, b: u32) -> AluResult {
    let value = a.wrapping_sub(b);
    AluResult {
        value,
        carry: Some(a >= b),
        // Operands of different sign and a result whose sign differs from `a`.
        overflow: Some(((a ^ b) & (a ^ value)) >> 31 == 1),
    }
}

/// Low 32 bits of `a * b + acc`. Like `MUL`, defines neither carry nor overflow.
pub const fn multiply_accumulate(a: u32, b: u32, acc: u32) -> AluResult {
    AluResult::plain(a.wrapping_mul(b).wrapping_add(acc))
}

/// Flags produced by `CMP a, b`: the flags of `a - b` with the result discarded.
///
/// All four flags are defined, so the previous flags play no part.
pub const fn compare(a: u32, b: u32) -> Flags {
    sub(a, b).flags(Flags::new(false, false, false, false), false)
}
