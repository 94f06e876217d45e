//! System-on-Chip (SoC) Components.
//!
//! This module organizes the storage attached to the core: the flat data memory and the
//! separate instruction region the fetch stage reads from.

/// Data memory and instruction memory.
pub mod memory;

pub use memory::Memory;
pub use memory::program::ProgramMemory;
