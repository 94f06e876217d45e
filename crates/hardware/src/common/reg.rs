//! Unified Register File.
//!
//! This module provides the `RegisterFile` struct, which pairs the general-purpose
//! registers with the condition flags. It provides:
//! 1. **Unified Storage:** The sixteen GPRs and the N/Z/C/V flags behind one owner.
//! 2. **Abstraction:** Fallible index-based access, plus program-counter shortcuts.
//! 3. **Observability:** A rendering of the complete register state for tracing.

use std::fmt;

use crate::common::error::Result;
use crate::core::arch::flags::Flags;
use crate::core::arch::gpr::Gpr;

/// Register file containing the general-purpose registers and the status flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: Gpr,
    flags: Flags,
}

impl RegisterFile {
    /// Creates a new register file with all registers and flags cleared.
    ///
    /// # Returns
    ///
    /// A new `RegisterFile` instance.
    pub const fn new() -> Self {
        Self {
            gpr: Gpr::new(),
            flags: Flags::new(false, false, false, false),
        }
    }

    /// Reads a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-15). Index 15 is the program counter.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownRegister`](crate::common::error::SimError::UnknownRegister)
    /// if `idx` is outside the register set.
    pub fn read(&self, idx: usize) -> Result<u32> {
        self.gpr.read(idx)
    }

    /// Writes a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-15).
    /// * `val` - The 32-bit value to write.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownRegister`](crate::common::error::SimError::UnknownRegister)
    /// if `idx` is outside the register set.
    pub fn write(&mut self, idx: usize, val: u32) -> Result<()> {
        self.gpr.write(idx, val)
    }

    /// Returns the current flags.
    pub const fn read_flags(&self) -> Flags {
        self.flags
    }

    /// Replaces all four flags at once.
    pub const fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    /// Returns the program counter.
    pub const fn pc(&self) -> u32 {
        self.gpr.pc()
    }

    /// Sets the program counter.
    pub const fn set_pc(&mut self, pc: u32) {
        self.gpr.set_pc(pc);
    }

    /// Renders every register and the flags as a multi-line string.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gpr)?;
        write!(f, "flags={}", self.flags)
    }
}
