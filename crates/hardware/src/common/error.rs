//! Simulation error definitions.
//!
//! This module defines the error taxonomy shared by every stage of the core. It provides:
//! 1. **Decode Errors:** Unsupported mnemonics, malformed operand lists, unknown register names.
//! 2. **Access Errors:** Unknown register indices, unaligned and out-of-bounds memory accesses.
//! 3. **Fetch Errors:** Program counter values that address no loaded instruction.
//!
//! Every error is fatal to the current run: the fetch-execute loop surfaces the first one
//! it meets and moves to the faulted state without retrying.

use thiserror::Error;

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised while fetching, decoding or executing an instruction.
///
/// Bounded execution (running out of cycle budget) is deliberately not an error; see
/// [`RunOutcome`](crate::sim::RunOutcome).
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// The mnemonic (or machine encoding) is outside the supported instruction set.
    ///
    /// The associated value is the offending mnemonic or a rendering of the encoding.
    #[error("unsupported opcode '{0}'")]
    UnsupportedOpcode(String),

    /// The operand list does not match the shape the opcode requires.
    #[error("malformed operands for {mnemonic}: {reason}")]
    MalformedOperands {
        /// Mnemonic as written in the raw record.
        mnemonic: String,
        /// Human-readable description of the mismatch.
        reason: String,
    },

    /// A register name or index outside the fixed register set.
    #[error("unknown register '{0}'")]
    UnknownRegister(String),

    /// A word access whose address is not a multiple of four.
    #[error("unaligned word access at {address:#010x}")]
    UnalignedAccess {
        /// The faulting byte address.
        address: u32,
    },

    /// A word access that reaches past the end of the configured memory.
    #[error("access at {address:#010x} is outside memory of {size} bytes")]
    OutOfBounds {
        /// The faulting byte address.
        address: u32,
        /// Configured memory size in bytes.
        size: usize,
    },

    /// The program counter addresses no loaded instruction.
    #[error("no instruction loaded at pc {pc:#010x}")]
    NoInstruction {
        /// The program counter value at fetch time.
        pc: u32,
    },
}

impl SimError {
    /// Builds a [`SimError::MalformedOperands`] from anything printable.
    pub fn malformed(mnemonic: &str, reason: impl Into<String>) -> Self {
        Self::MalformedOperands {
            mnemonic: mnemonic.to_owned(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors raised while decoding a raw record.
    pub const fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedOpcode(_) | Self::MalformedOperands { .. }
        )
    }
}
