//! Common utilities and types used throughout the simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Register roles, instruction width and memory alignment.
//! 2. **Error Handling:** The [`SimError`] taxonomy and the crate [`Result`] alias.
//! 3. **Register Management:** A unified interface for GPR and flag access.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types raised by fetch, decode and execute.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use error::{Result, SimError};
pub use reg::RegisterFile;
