//! General-Purpose Register File.
//!
//! This module implements the sixteen 32-bit architectural registers. It performs the following:
//! 1. **Storage:** Maintains registers `r0`-`r15`, where `r15` doubles as the program counter.
//! 2. **Invariant Enforcement:** Rejects any index outside the fixed register set.
//! 3. **Debugging:** Renders the complete register state for tracing.

use std::fmt;

use crate::common::constants::{NUM_REGISTERS, REG_PC};
use crate::common::error::{Result, SimError};

/// General-Purpose Register file.
///
/// All registers start at zero. No register is hardwired.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; NUM_REGISTERS],
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGISTERS],
        }
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-15).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownRegister`] if `idx` is outside the register set.
    pub fn read(&self, idx: usize) -> Result<u32> {
        self.regs
            .get(idx)
            .copied()
            .ok_or_else(|| SimError::UnknownRegister(format!("r{idx}")))
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-15).
    /// * `val` - The 32-bit value to write.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownRegister`] if `idx` is outside the register set.
    pub fn write(&mut self, idx: usize, val: u32) -> Result<()> {
        let slot = self
            .regs
            .get_mut(idx)
            .ok_or_else(|| SimError::UnknownRegister(format!("r{idx}")))?;
        *slot = val;
        Ok(())
    }

    /// Reads `r15`, the program counter.
    pub const fn pc(&self) -> u32 {
        self.regs[REG_PC]
    }

    /// Writes `r15`, the program counter.
    pub const fn set_pc(&mut self, pc: u32) {
        self.regs[REG_PC] = pc;
    }
}

impl fmt::Display for Gpr {
    /// Displays registers in rows of four with hexadecimal formatting.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.regs.chunks(4).enumerate() {
            for (col, val) in chunk.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "r{:<2}={val:#010x}", row * 4 + col)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
