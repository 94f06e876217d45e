//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! architectural state. It coordinates the following:
//! 1. **State Management:** Maintains the register file (including the program counter)
//!    and the condition flags.
//! 2. **Memory:** Owns the flat data memory that loads and stores address.
//! 3. **Execution:** Evaluates decoded instructions and commits their effects.

/// Instruction execution and effect commit.
pub mod execution;

use crate::common::RegisterFile;
use crate::config::Config;
use crate::soc::Memory;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cpu {
    /// General-purpose registers, program counter and flags.
    pub regs: RegisterFile,
    /// Data memory.
    pub memory: Memory,
    /// Enable per-instruction tracing.
    pub trace: bool,
    /// Execution statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU with zeroed registers and `memory_size` bytes of zeroed memory.
    ///
    /// # Arguments
    ///
    /// * `memory_size` - Data memory size in bytes.
    /// * `entry` - Initial program counter.
    pub fn new(memory_size: usize, entry: u32) -> Self {
        let mut regs = RegisterFile::new();
        regs.set_pc(entry);
        Self {
            regs,
            memory: Memory::new(memory_size),
            trace: false,
            stats: SimStats::default(),
        }
    }

    /// Creates a CPU from a configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut cpu = Self::new(config.memory.size_bytes, config.general.entry_address);
        cpu.trace = config.general.trace_instructions;
        cpu
    }
}
