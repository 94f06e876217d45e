//! Core processor implementation.
//!
//! This module contains the CPU implementation including the architectural state,
//! the execution unit and the functional units it drives.

/// Architectural state (general-purpose registers, condition flags).
pub mod arch;

/// CPU core implementation and instruction execution.
pub mod cpu;

/// Execution units (ALU, barrel shifter).
pub mod units;

pub use self::cpu::Cpu;
