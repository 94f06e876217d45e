//! ALU logical operations.
//!
//! Implements bitwise AND, OR and exclusive OR. These define no carry or overflow of
//! their own; a flag-setting logical instruction takes C from the barrel shifter.

use crate::core::units::alu::AluOp;

/// Executes a logical operation.
///
/// # Arguments
///
/// * `op` - The ALU operation (`And`, `Orr` or `Eor`).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The 32-bit result. Returns `0` for non-logic opcodes.
pub const fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::And => a & b,
        AluOp::Orr => a | b,
        AluOp::Eor => a ^ b,
        _ => 0,
    }
}
