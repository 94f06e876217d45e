//! ARM instruction-subset simulator core.
//!
//! This crate implements a fetch-decode-execute core for a small 32-bit ARM (A32)
//! instruction subset with the following:
//! 1. **Core:** Sixteen 32-bit registers, N/Z/C/V flags, and an execution unit with
//!    predicated execution and an A32 barrel shifter.
//! 2. **Memory:** Flat little-endian data memory and a separate instruction region.
//! 3. **ISA:** Decoding of assembly-form records and A32 machine words for MOV, LDR, STR,
//!    ADD, SUB, MUL, MLA, CMP, AND, ORR, EOR, LSL, LSR, ASR, ROR, B and BL.
//! 4. **Simulation:** The fetch-execute loop, program image loader, configuration, and
//!    statistics collection.
//!
//! # Example
//!
//! ```
//! use armsim_core::{RunOutcome, Simulator};
//!
//! let mut sim = Simulator::new(4096, 0);
//! // mov r0, #0x80 ; lsl r1, r0, #2 ; b .
//! sim.load_words(&[0xE3A00080, 0xE1A01100, 0xEAFFFFFE]);
//! assert_eq!(sim.run(100), RunOutcome::Halted);
//! assert_eq!(sim.inspect_register(1).unwrap(), 0x200);
//! ```

/// Common types and constants (errors, registers, constants).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// CPU core (architectural state, execution, ALU).
pub mod core;
/// Instruction set (registers, conditions, raw records, decode, disassembly).
pub mod isa;
/// Fetch-execute loop and program loader.
pub mod sim;
/// Data and instruction memory.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Error type for fetch, decode and execute.
pub use crate::common::{Result, SimError};
/// Root configuration type; use `Config::default()` or parse JSON.
pub use crate::config::Config;
/// Condition flags snapshot.
pub use crate::core::arch::Flags;
/// Main CPU type; holds registers, memory and stats.
pub use crate::core::Cpu;
/// Raw instruction records accepted by [`Simulator::load_program`].
pub use crate::isa::{RawInstruction, RawOperand};
/// Top-level simulator and its run results.
pub use crate::sim::{RunOutcome, SimState, Simulator};
