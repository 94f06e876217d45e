//! Program Image Loader.
//!
//! This module provides utilities for turning binary program images into instruction
//! records. It performs:
//! 1. **Image loading:** Reads a program image from disk into a byte buffer.
//! 2. **Word splitting:** Splits the bytes into 32-bit instruction words in the image's
//!    byte order (big-endian by default).
//! 3. **Record building:** Wraps words as machine-form raw instructions.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::common::constants::WORD_SIZE;
use crate::config::ByteOrder;
use crate::isa::raw::RawInstruction;

/// Errors raised while loading a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("could not read program image: {0}")]
    Io(#[from] std::io::Error),

    /// The image length is not a whole number of words.
    #[error("program image of {len} bytes ends with a partial word ({trailing} trailing bytes)")]
    TruncatedWord {
        /// Image length in bytes.
        len: usize,
        /// Bytes left over after the last whole word.
        trailing: usize,
    },
}

/// Loads a program image from disk into a byte vector.
///
/// # Arguments
///
/// * `path` - Path to the image file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read.
pub fn read_image(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read program image");
    Ok(bytes)
}

/// Splits an image into 32-bit words.
///
/// # Arguments
///
/// * `bytes` - The raw image.
/// * `order` - Byte order of each word in the image.
///
/// # Errors
///
/// Returns [`LoadError::TruncatedWord`] if `bytes.len()` is not a multiple of four.
pub fn words_from_bytes(bytes: &[u8], order: ByteOrder) -> Result<Vec<u32>, LoadError> {
    let chunks = bytes.chunks_exact(WORD_SIZE as usize);
    let trailing = chunks.remainder().len();
    if trailing != 0 {
        return Err(LoadError::TruncatedWord {
            len: bytes.len(),
            trailing,
        });
    }
    Ok(chunks
        .map(|chunk| {
            let mut word = [0u8; 4];
            word.copy_from_slice(chunk);
            match order {
                ByteOrder::Big => u32::from_be_bytes(word),
                ByteOrder::Little => u32::from_le_bytes(word),
            }
        })
        .collect())
}

/// Wraps machine words as raw instruction records.
pub fn program_from_words(words: &[u32]) -> Vec<RawInstruction> {
    words.iter().copied().map(RawInstruction::Machine).collect()
}

/// Reads an image file and splits it into words.
///
/// # Errors
///
/// Any error of [`read_image`] or [`words_from_bytes`].
pub fn load_image(path: impl AsRef<Path>, order: ByteOrder) -> Result<Vec<u32>, LoadError> {
    words_from_bytes(&read_image(path)?, order)
}
