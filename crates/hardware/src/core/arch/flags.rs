//! Condition Flags (status register).
//!
//! The four condition flags live in the top nibble of the A32 status register:
//!
//! ```text
//!  31 30 29 28
//! ┌──┬──┬──┬──┬─────────────────────────┐
//! │N │Z │C │V │        (unused)         │
//! └──┴──┴──┴──┴─────────────────────────┘
//! ```
//!
//! Flags are only ever replaced as a whole: flag-setting instructions compute a complete
//! [`Flags`] value and hand it to the register file, so no instruction can leave the
//! status register half-updated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bit position of the Negative flag in the status word.
const N_BIT: u32 = 31;
/// Bit position of the Zero flag in the status word.
const Z_BIT: u32 = 30;
/// Bit position of the Carry flag in the status word.
const C_BIT: u32 = 29;
/// Bit position of the Overflow flag in the status word.
const V_BIT: u32 = 28;

/// Snapshot of the N, Z, C and V condition flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flags {
    /// Negative: bit 31 of the last flag-setting result.
    pub n: bool,
    /// Zero: the last flag-setting result was zero.
    pub z: bool,
    /// Carry: unsigned carry out of an addition, no borrow on subtraction,
    /// or the last bit shifted out by the barrel shifter.
    pub c: bool,
    /// Overflow: signed overflow of the last arithmetic result.
    pub v: bool,
}

impl Flags {
    /// Creates a flag set from its four components.
    pub const fn new(n: bool, z: bool, c: bool, v: bool) -> Self {
        Self { n, z, c, v }
    }

    /// Returns a copy with N and Z derived from `result`, keeping C and V.
    pub const fn with_result(self, result: u32) -> Self {
        Self {
            n: result >> N_BIT == 1,
            z: result == 0,
            ..self
        }
    }

    /// Returns a copy with the carry flag replaced.
    pub const fn with_carry(self, c: bool) -> Self {
        Self { c, ..self }
    }

    /// Packs the flags into the top nibble of a status word.
    pub const fn to_bits(self) -> u32 {
        (self.n as u32) << N_BIT
            | (self.z as u32) << Z_BIT
            | (self.c as u32) << C_BIT
            | (self.v as u32) << V_BIT
    }

    /// Unpacks the flags from the top nibble of a status word; other bits are ignored.
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            n: (bits >> N_BIT) & 1 == 1,
            z: (bits >> Z_BIT) & 1 == 1,
            c: (bits >> C_BIT) & 1 == 1,
            v: (bits >> V_BIT) & 1 == 1,
        }
    }
}

impl fmt::Display for Flags {
    /// Renders the flags as `NZCV`, upper case when set and lower case when clear.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pick = |set: bool, on: char, off: char| if set { on } else { off };
        write!(
            f,
            "{}{}{}{}",
            pick(self.n, 'N', 'n'),
            pick(self.z, 'Z', 'z'),
            pick(self.c, 'C', 'c'),
            pick(self.v, 'V', 'v'),
        )
    }
}
