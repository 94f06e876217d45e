//! Byte Buffer Implementation.
//!
//! This module provides the backing storage for data memory: a fixed-size, zero-filled
//! byte vector with bounds-checked slice access. The size is fixed at construction and
//! never changes afterwards.

/// Fixed-size, zero-initialized byte storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    /// Creates a new zero-filled buffer.
    ///
    /// # Arguments
    ///
    /// * `size` - Size of the buffer in bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Returns the size of the buffer in bytes.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for a zero-sized buffer.
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reads `N` bytes starting at `offset`, or `None` if any of them is out of range.
    pub fn read_array<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        let end = offset.checked_add(N)?;
        self.bytes.get(offset..end)?.try_into().ok()
    }

    /// Writes `data` starting at `offset`.
    ///
    /// # Returns
    ///
    /// `false` (and nothing written) if the slice would extend past the end.
    pub fn write_slice(&mut self, offset: usize, data: &[u8]) -> bool {
        let Some(end) = offset.checked_add(data.len()) else {
            return false;
        };
        match self.bytes.get_mut(offset..end) {
            Some(dst) => {
                dst.copy_from_slice(data);
                true
            }
            None => false,
        }
    }

    /// Returns the whole buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}
