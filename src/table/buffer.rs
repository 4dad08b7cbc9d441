//! Growable table buffer
//!
//! Owned dynamic byte sequence with explicit grow-preserving semantics:
//! growth keeps the old contents and zero-fills the new region, and a
//! failed allocation leaves the buffer exactly as it was.

use super::errors::{TableError, TableResult};

/// The table's backing byte buffer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TableBuffer {
    bytes: Vec<u8>,
}

impl TableBuffer {
    /// Allocates a zero-filled buffer of `size` bytes.
    pub fn with_size(size: usize) -> TableResult<Self> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size)
            .map_err(|_| TableError::OutOfResources(size))?;
        bytes.resize(size, 0);
        Ok(Self { bytes })
    }

    /// Grows the buffer to `new_size` bytes.
    ///
    /// Existing contents are preserved; the appended region is zeroed. On
    /// allocation failure the buffer is unchanged.
    pub fn grow(&mut self, new_size: usize) -> TableResult<()> {
        if new_size < self.bytes.len() {
            return Err(TableError::InvalidArgument(format!(
                "table buffer cannot shrink from {} to {} bytes",
                self.bytes.len(),
                new_size
            )));
        }
        let additional = new_size - self.bytes.len();
        self.bytes
            .try_reserve_exact(additional)
            .map_err(|_| TableError::OutOfResources(new_size))?;
        self.bytes.resize(new_size, 0);
        Ok(())
    }

    /// Current buffer size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read view of the whole buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Write view of the whole buffer.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}
