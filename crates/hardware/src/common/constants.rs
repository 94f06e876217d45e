//! Global System Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Register Constants:** Register count and the indices with architectural roles.
//! 2. **Instruction Constants:** Instruction width and the A32 pipeline bias for branches.
//! 3. **Memory Constants:** Word size and alignment mask.

/// Number of architectural general-purpose registers (`r0`-`r15`).
pub const NUM_REGISTERS: usize = 16;

/// Stack pointer register index (`r13`).
pub const REG_SP: usize = 13;

/// Link register index (`r14`), written by `BL`.
pub const REG_LR: usize = 14;

/// Program counter register index (`r15`).
pub const REG_PC: usize = 15;

/// Size of every instruction in this subset, in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Size of a memory word in bytes.
pub const WORD_SIZE: u32 = 4;

/// Low address bits that must be clear for a word access.
pub const WORD_ALIGN_MASK: u32 = WORD_SIZE - 1;

/// Distance between a branch and the base its A32 offset is relative to.
///
/// A32 branch offsets are encoded relative to the branch address plus eight
/// (the value the three-stage pipeline exposes as `pc`).
pub const BRANCH_PIPELINE_OFFSET: i32 = 8;

/// Number of bits in a register.
pub const REGISTER_BITS: u32 = 32;
