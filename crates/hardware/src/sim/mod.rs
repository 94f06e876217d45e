//! Simulation driver and program loading.
//!
//! Provides the fetch-execute loop and utilities for turning program images into
//! instruction records.

/// Program image loading.
pub mod loader;

/// Fetch-execute loop.
pub mod simulator;

pub use simulator::{RunOutcome, SimState, Simulator};
