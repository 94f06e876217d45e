//! Barrel shifter.
//!
//! Implements LSL, LSR, ASR and ROR on 32-bit values together with the A32 shifter
//! carry-out. A zero amount returns the value unchanged and passes the carry through.
//! Amounts of 32 or more are well defined:
//! - **LSL:** 32 gives 0 with C = bit 0; beyond 32 gives 0 with C clear.
//! - **LSR:** 32 gives 0 with C = bit 31; beyond 32 gives 0 with C clear.
//! - **ASR:** 32 or more fills every bit with the sign, C = bit 31.
//! - **ROR:** rotates by `n mod 32`; a multiple of 32 leaves the value and sets C = bit 31.
//!
//! Otherwise C is the last bit shifted out.

use crate::common::constants::REGISTER_BITS;
use crate::isa::instruction::ShiftKind;

/// Output of the barrel shifter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShiftResult {
    /// The shifted value.
    pub value: u32,
    /// The shifter carry-out.
    pub carry: bool,
}

/// Tests bit `n` of `value`.
const fn bit(value: u32, n: u32) -> bool {
    (value >> n) & 1 == 1
}

/// Executes a shift.
///
/// # Arguments
///
/// * `kind`     - The shift to perform.
/// * `value`    - The value to be shifted.
/// * `amount`   - Shift amount; register-specified amounts must already be reduced to
///   their low byte.
/// * `carry_in` - Current carry flag, passed through when `amount` is zero.
pub const fn execute(kind: ShiftKind, value: u32, amount: u32, carry_in: bool) -> ShiftResult {
    if amount == 0 {
        return ShiftResult {
            value,
            carry: carry_in,
        };
    }
    match kind {
        ShiftKind::Lsl => lsl(value, amount),
        ShiftKind::Lsr => lsr(value, amount),
        ShiftKind::Asr => asr(value, amount),
        ShiftKind::Ror => ror(value, amount),
    }
}

/// Logical shift left by a non-zero amount.
const fn lsl(value: u32, amount: u32) -> ShiftResult {
    if amount < REGISTER_BITS {
        ShiftResult {
            value: value << amount,
            carry: bit(value, REGISTER_BITS - amount),
        }
    } else {
        ShiftResult {
            value: 0,
            carry: amount == REGISTER_BITS && bit(value, 0),
        }
    }
}

/// Logical shift right by a non-zero amount.
const fn lsr(value: u32, amount: u32) -> ShiftResult {
    if amount < REGISTER_BITS {
        ShiftResult {
            value: value >> amount,
            carry: bit(value, amount - 1),
        }
    } else {
        ShiftResult {
            value: 0,
            carry: amount == REGISTER_BITS && bit(value, 31),
        }
    }
}

/// Arithmetic shift right by a non-zero amount.
const fn asr(value: u32, amount: u32) -> ShiftResult {
    if amount < REGISTER_BITS {
        ShiftResult {
            value: ((value as i32) >> amount) as u32,
            carry: bit(value, amount - 1),
        }
    } else {
        ShiftResult {
            value: ((value as i32) >> 31) as u32,
            carry: bit(value, 31),
        }
    }
}

/// Rotate right by a non-zero amount.
const fn ror(value: u32, amount: u32) -> ShiftResult {
    let n = amount % REGISTER_BITS;
    if n == 0 {
        ShiftResult {
            value,
            carry: bit(value, 31),
        }
    } else {
        ShiftResult {
            value: value.rotate_right(n),
            carry: bit(value, n - 1),
        }
    }
}
