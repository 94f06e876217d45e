//! Configuration system for the simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline constants (entry address, memory size, cycle budget).
//! 2. **Structures:** Hierarchical config for general and memory settings.
//! 3. **Enums:** Byte order of program images.
//!
//! Configuration is supplied as JSON via [`Config::from_json`], or use `Config::default()`.
//! Every field is optional in JSON and falls back to its default.

use serde::Deserialize;

/// Default configuration constants for the simulator.
mod defaults {
    /// Address of the first instruction.
    pub const ENTRY_ADDRESS: u32 = 0;

    /// Data memory size (64 KiB).
    ///
    /// Word accesses must satisfy `addr + 4 <= MEMORY_SIZE`.
    pub const MEMORY_SIZE: usize = 64 * 1024;

    /// Cycle budget for a single `run` when the embedder does not pass one.
    pub const MAX_CYCLES: u64 = 100_000;
}

/// Byte order of 32-bit words inside a program image file.
///
/// This concerns image files only; data memory is always little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ByteOrder {
    /// Most significant byte first.
    #[default]
    #[serde(alias = "big", alias = "BE")]
    Big,
    /// Least significant byte first.
    #[serde(alias = "little", alias = "LE")]
    Little,
}

/// Root simulator configuration.
///
/// # Examples
///
/// ```
/// use armsim_core::config::{ByteOrder, Config};
///
/// let config = Config::from_json(
///     r#"{ "general": { "entry_address": 256, "trace_instructions": true },
///          "memory": { "size_bytes": 4096, "image_byte_order": "Little" } }"#,
/// )
/// .unwrap();
/// assert_eq!(config.general.entry_address, 0x100);
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.memory.size_bytes, 4096);
/// assert_eq!(config.memory.image_byte_order, ByteOrder::Little);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Data memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Address of the first instruction; the program is placed here and PC starts here.
    #[serde(default = "GeneralConfig::default_entry_address")]
    pub entry_address: u32,

    /// Emit a `tracing` event for every executed cycle.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Default cycle budget used by `Simulator::run_to_completion`.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    /// Returns the default entry address.
    const fn default_entry_address() -> u32 {
        defaults::ENTRY_ADDRESS
    }

    /// Returns the default cycle budget.
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            entry_address: defaults::ENTRY_ADDRESS,
            trace_instructions: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Data memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Size of data memory in bytes.
    #[serde(default = "MemoryConfig::default_size_bytes")]
    pub size_bytes: usize,

    /// Byte order of words in program image files.
    #[serde(default)]
    pub image_byte_order: ByteOrder,
}

impl MemoryConfig {
    /// Returns the default memory size.
    const fn default_size_bytes() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::MEMORY_SIZE,
            image_byte_order: ByteOrder::default(),
        }
    }
}
