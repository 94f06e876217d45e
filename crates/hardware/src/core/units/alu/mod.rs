//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the 32-bit integer ALU used by the execution unit.
//! All arithmetic wraps modulo 2^32. Alongside the result it reports the carry and
//! overflow an operation produces, which flag-setting instructions fold into the flags.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, multiply-accumulate and the `CMP` flag computation
//! - [`logic`]:      And, Orr, Eor
//! - [`shifts`]:     The barrel shifter (LSL, LSR, ASR, ROR) with carry-out

/// Integer arithmetic operations (add, subtract, multiply, compare).
pub mod arithmetic;

/// Bitwise logical operations (and, or, exclusive or).
pub mod logic;

/// Barrel shifter (lsl, lsr, asr, ror).
pub mod shifts;

use crate::core::arch::flags::Flags;

/// Two-operand ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// `a + b`.
    Add,
    /// `a - b`.
    Sub,
    /// Low 32 bits of `a * b`.
    Mul,
    /// `a & b`.
    And,
    /// `a | b`.
    Orr,
    /// `a ^ b`.
    Eor,
}

/// Result of an ALU operation together with the flag information it produces.
///
/// `carry` and `overflow` are `None` when the operation does not define them; the
/// flag update then keeps (or takes from the shifter) the previous value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AluResult {
    /// The 32-bit result.
    pub value: u32,
    /// Unsigned carry out (no borrow, for subtraction).
    pub carry: Option<bool>,
    /// Signed overflow.
    pub overflow: Option<bool>,
}

impl AluResult {
    /// A result that defines neither carry nor overflow.
    pub const fn plain(value: u32) -> Self {
        Self {
            value,
            carry: None,
            overflow: None,
        }
    }

    /// Computes the flags a flag-setting instruction writes for this result.
    ///
    /// # Arguments
    ///
    /// * `prev`          - Flags before the instruction.
    /// * `shifter_carry` - Carry-out of the second-operand shifter, used when the operation
    ///   defines no carry of its own.
    ///
    /// # Returns
    ///
    /// A complete flag set: N and Z from the value, C and V from the operation when it
    /// defines them and otherwise from `shifter_carry` and `prev`.
    pub const fn flags(self, prev: Flags, shifter_carry: bool) -> Flags {
        let c = match self.carry {
            Some(c) => c,
            None => shifter_carry,
        };
        let v = match self.overflow {
            Some(v) => v,
            None => prev.v,
        };
        Flags::new(self.value >> 31 == 1, self.value == 0, c, v)
    }
}

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// Dispatches to the appropriate submodule based on the operation type.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (already through the barrel shifter)
    ///
    /// # Examples
    ///
    /// ```
    /// use armsim_core::core::units::alu::{Alu, AluOp};
    ///
    /// let sum = Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1);
    /// assert_eq!(sum.value, 0);
    /// assert_eq!(sum.carry, Some(true));
    ///
    /// let masked = Alu::execute(AluOp::And, 0xF0, 0x3C);
    /// assert_eq!(masked.value, 0x30);
    /// ```
    pub fn execute(op: AluOp, a: u32, b: u32) -> AluResult {
        match op {
            AluOp::Add | AluOp::Sub | AluOp::Mul => arithmetic::execute(op, a, b),
            AluOp::And | AluOp::Orr | AluOp::Eor => AluResult::plain(logic::execute(op, a, b)),
        }
    }
}
