//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains register names, condition codes, the raw and decoded instruction models, and
//! decoding logic for the supported A32 subset.
//!
//! # Pipeline
//!
//! * `raw`: Records as they sit in instruction memory (assembly form or machine word).
//! * `decode`: Mnemonic and operand validation for the assembly form.
//! * `encoding`: Field-level decoding of 32-bit A32 words.
//! * `instruction`: The decoded, immutable [`Instruction`](instruction::Instruction).

/// Register names and the typed register identifier.
pub mod abi;

/// Condition codes evaluated against the flags.
pub mod condition;

/// Raw-record decoder (assembly mnemonics and machine words).
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// A32 machine-word decoder.
pub mod encoding;

/// Decoded instruction model and A32 field extraction.
pub mod instruction;

/// Raw instruction records.
pub mod raw;

pub use abi::Reg;
pub use condition::Condition;
pub use decode::decode;
pub use instruction::{Instruction, Operation};
pub use raw::{RawInstruction, RawOperand};
