//! Register names and the typed register identifier.
//!
//! Defines the sixteen architectural register names (`r0`-`r15`) together with the
//! procedure-call aliases `sp`, `lr` and `pc`, and the [`Reg`] identifier every decoded
//! operand uses.

use std::fmt;
use std::str::FromStr;

use crate::common::constants::{NUM_REGISTERS, REG_LR, REG_PC, REG_SP};
use crate::common::error::SimError;

/// Canonical alias names and the register index each one denotes.
const ALIASES: [(&str, usize); 3] = [("sp", REG_SP), ("lr", REG_LR), ("pc", REG_PC)];

/// Identifier of one of the sixteen architectural registers.
///
/// A `Reg` can only be built from a valid index or name, so holding one proves the
/// register exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reg(u8);

impl Reg {
    /// Stack pointer (`r13`).
    pub const SP: Self = Self(REG_SP as u8);
    /// Link register (`r14`).
    pub const LR: Self = Self(REG_LR as u8);
    /// Program counter (`r15`).
    pub const PC: Self = Self(REG_PC as u8);

    /// Builds a register identifier from its index.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownRegister`] if `idx` is not in `0..16`.
    pub fn new(idx: usize) -> Result<Self, SimError> {
        if idx < NUM_REGISTERS {
            Ok(Self(idx as u8))
        } else {
            Err(SimError::UnknownRegister(format!("r{idx}")))
        }
    }

    /// Builds a register identifier from a 4-bit encoding field.
    ///
    /// Only the low four bits of `field` are used, so the result is always valid.
    pub const fn from_field(field: u32) -> Self {
        Self((field & 0xF) as u8)
    }

    /// Returns the register index (0-15).
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` for the program counter.
    pub const fn is_pc(self) -> bool {
        self.0 as usize == REG_PC
    }
}

impl FromStr for Reg {
    type Err = SimError;

    /// Parses a register name case-insensitively (`r0`-`r15`, `sp`, `lr`, `pc`).
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let lower = name.trim().to_ascii_lowercase();
        if let Some(&(_, idx)) = ALIASES.iter().find(|(alias, _)| *alias == lower) {
            return Ok(Self(idx as u8));
        }
        lower
            .strip_prefix('r')
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            // Reject "r01"-style spellings so every register has one canonical numeric name.
            .filter(|digits| digits.len() == 1 || !digits.starts_with('0'))
            .and_then(|digits| digits.parse::<usize>().ok())
            .filter(|&idx| idx < NUM_REGISTERS)
            .map(|idx| Self(idx as u8))
            .ok_or_else(|| SimError::UnknownRegister(name.to_owned()))
    }
}

impl fmt::Display for Reg {
    /// Renders `sp`, `lr` and `pc` by alias and every other register as `rN`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match ALIASES.iter().find(|(_, idx)| *idx == self.index()) {
            Some((alias, _)) => f.write_str(alias),
            None => write!(f, "r{}", self.0),
        }
    }
}
