//! Architectural state components.
//!
//! This module contains the state every instruction reads or writes:
//! 1. **GPRs:** The sixteen 32-bit general-purpose registers.
//! 2. **Flags:** The N, Z, C and V condition flags of the status register.

/// Condition flags (N, Z, C, V).
pub mod flags;

/// General-Purpose Register file implementation.
pub mod gpr;

pub use self::flags::Flags;
pub use self::gpr::Gpr;
