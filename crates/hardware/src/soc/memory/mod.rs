//! Data and Instruction Memory.
//!
//! This module implements the two memories of the core. It provides:
//! 1. **Buffer:** Zero-filled backing storage ([`buffer::ByteBuffer`]) for data memory.
//! 2. **Memory:** Word-addressed data memory with alignment and bounds checks.
//! 3. **Program:** The instruction region ([`program::ProgramMemory`]) holding raw records.

/// Zero-filled byte storage.
pub mod buffer;

/// Instruction memory holding raw records.
pub mod program;

use self::buffer::ByteBuffer;
use crate::common::constants::{WORD_ALIGN_MASK, WORD_SIZE};
use crate::common::error::{Result, SimError};

/// Flat, byte-addressed data memory.
///
/// Words are stored little-endian. Every word access must be 4-byte aligned and lie
/// entirely inside the configured size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    buffer: ByteBuffer,
}

impl Memory {
    /// Creates a zero-initialized memory of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            buffer: ByteBuffer::new(size),
        }
    }

    /// Returns the configured size in bytes.
    pub const fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Checks alignment first, then bounds, and returns the byte offset.
    fn check(&self, addr: u32) -> Result<usize> {
        if addr & WORD_ALIGN_MASK != 0 {
            return Err(SimError::UnalignedAccess { address: addr });
        }
        let offset = addr as usize;
        if offset
            .checked_add(WORD_SIZE as usize)
            .is_none_or(|end| end > self.size())
        {
            return Err(SimError::OutOfBounds {
                address: addr,
                size: self.size(),
            });
        }
        Ok(offset)
    }

    /// Validates a word address without accessing memory.
    ///
    /// # Errors
    ///
    /// Same as [`Memory::load_word`].
    pub fn check_word(&self, addr: u32) -> Result<()> {
        self.check(addr).map(|_| ())
    }

    /// Reads a word (32-bit, little-endian).
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address; must be a multiple of four.
    ///
    /// # Errors
    ///
    /// * [`SimError::UnalignedAccess`] if `addr % 4 != 0` (checked first).
    /// * [`SimError::OutOfBounds`] if `addr + 4` exceeds the memory size.
    pub fn load_word(&self, addr: u32) -> Result<u32> {
        let offset = self.check(addr)?;
        self.buffer
            .read_array::<4>(offset)
            .map(u32::from_le_bytes)
            .ok_or(SimError::OutOfBounds {
                address: addr,
                size: self.size(),
            })
    }

    /// Writes a word (32-bit, little-endian).
    ///
    /// # Errors
    ///
    /// Same as [`Memory::load_word`]; nothing is written on error.
    pub fn store_word(&mut self, addr: u32, value: u32) -> Result<()> {
        let offset = self.check(addr)?;
        if self.buffer.write_slice(offset, &value.to_le_bytes()) {
            Ok(())
        } else {
            Err(SimError::OutOfBounds {
                address: addr,
                size: self.size(),
            })
        }
    }

    /// Writes consecutive words starting at `addr`.
    ///
    /// Every address is validated before anything is written, so a failing call leaves
    /// memory untouched.
    ///
    /// # Errors
    ///
    /// Same as [`Memory::store_word`], reported for the first offending word.
    pub fn write_words(&mut self, addr: u32, words: &[u32]) -> Result<()> {
        let addresses: Vec<u32> = (0..words.len())
            .map(|i| {
                u32::try_from(i)
                    .ok()
                    .and_then(|i| i.checked_mul(WORD_SIZE))
                    .and_then(|off| addr.checked_add(off))
                    .ok_or(SimError::OutOfBounds {
                        address: addr,
                        size: self.size(),
                    })
            })
            .collect::<Result<_>>()?;
        for &a in &addresses {
            self.check_word(a)?;
        }
        for (&a, &w) in addresses.iter().zip(words) {
            self.store_word(a, w)?;
        }
        Ok(())
    }

    /// Returns the raw contents of memory.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }
}
