//! Execution units and functional components.
//!
//! This module contains the integer ALU and its barrel shifter.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;
