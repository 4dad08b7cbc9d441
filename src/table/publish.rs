//! Table publication
//!
//! The publishing collaborator receives the finalized, checksummed table
//! bytes and must not mutate them. Its failures are opaque to the builder
//! and surfaced verbatim.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Opaque failure reported by a publishing collaborator.
#[derive(Debug, Clone, Error)]
#[error("table publication failed: {reason}")]
pub struct PublishError {
    reason: String,
}

impl PublishError {
    /// Creates a publish error with a human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Consumer of finalized tables.
pub trait TablePublisher {
    /// Publishes one finalized table. On success the caller releases its
    /// ownership of the bytes.
    fn publish(&mut self, table: &[u8]) -> Result<(), PublishError>;
}

/// Publisher that retains published tables in memory.
#[derive(Debug, Default)]
pub struct MemoryTablePublisher {
    published: Vec<Vec<u8>>,
}

impl MemoryTablePublisher {
    /// Creates an empty publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// All tables published so far, oldest first.
    pub fn published(&self) -> &[Vec<u8>] {
        &self.published
    }

    /// The most recently published table, if any.
    pub fn last(&self) -> Option<&[u8]> {
        self.published.last().map(Vec::as_slice)
    }
}

impl TablePublisher for MemoryTablePublisher {
    fn publish(&mut self, table: &[u8]) -> Result<(), PublishError> {
        self.published.push(table.to_vec());
        Ok(())
    }
}

/// Publisher that writes each table to a file path.
#[derive(Debug)]
pub struct FileTablePublisher {
    path: PathBuf,
}

impl FileTablePublisher {
    /// Creates a publisher targeting `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The target path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TablePublisher for FileTablePublisher {
    fn publish(&mut self, table: &[u8]) -> Result<(), PublishError> {
        fs::write(&self.path, table).map_err(|e| {
            PublishError::new(format!("write {}: {}", self.path.display(), e))
        })
    }
}
