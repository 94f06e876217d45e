//! # Unit Components
//!
//! This module serves as the central hub for the tests of the individual components
//! of the core. It organizes them the way the crate is organized: shared types,
//! architectural state and execution, ISA decoding, memory, and the simulation driver.





/// End-to-end runs of complete programs.
pub mod programs;



/// Unit tests for simulation statistics.
///
/// This module contains tests that ensure the [`SimStats`](armsim_core::stats::SimStats)
/// structure counts cycles, skipped instructions and the instruction mix correctly.
pub mod stats_verification;
