//! Instruction Memory.
//!
//! Holds the loaded program as a sequence of raw records laid out four bytes apart from
//! a base address. The region is separate from data memory: stores never modify the
//! program, and fetches never read data memory.

use crate::common::constants::{INSTRUCTION_SIZE, WORD_ALIGN_MASK};
use crate::common::error::{Result, SimError};
use crate::isa::raw::RawInstruction;

/// Read-only instruction region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramMemory {
    base: u32,
    records: Vec<RawInstruction>,
}

impl ProgramMemory {
    /// Creates an instruction region at `base` holding `records` in order.
    pub const fn new(base: u32, records: Vec<RawInstruction>) -> Self {
        Self { base, records }
    }

    /// Address of the first record.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Number of loaded records.
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no program is loaded.
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fetches the record at `pc`.
    ///
    /// # Errors
    ///
    /// * [`SimError::UnalignedAccess`] if `pc` is not a multiple of four.
    /// * [`SimError::NoInstruction`] if no record is loaded at `pc`.
    pub fn fetch(&self, pc: u32) -> Result<&RawInstruction> {
        if pc & WORD_ALIGN_MASK != 0 {
            return Err(SimError::UnalignedAccess { address: pc });
        }
        pc.checked_sub(self.base)
            .map(|off| (off / INSTRUCTION_SIZE) as usize)
            .and_then(|idx| self.records.get(idx))
            .ok_or(SimError::NoInstruction { pc })
    }

    /// Iterates over `(address, record)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &RawInstruction)> + '_ {
        self.records.iter().enumerate().map(|(i, record)| {
            let addr = self
                .base
                .wrapping_add((i as u32).wrapping_mul(INSTRUCTION_SIZE));
            (addr, record)
        })
    }
}
