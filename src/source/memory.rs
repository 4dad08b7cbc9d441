//! In-memory error source producer

use super::errors::{SourceError, SourceResult};
use super::producer::{ErrorSourceProducer, SourceInfo};

/// Producer backed by pre-encoded descriptor bytes held in memory.
///
/// Useful for platforms whose descriptors are known at registration time,
/// and as the reference producer in tests.
pub struct MemoryErrorSource {
    name: String,
    record_count: u64,
    records: Vec<u8>,
}

impl MemoryErrorSource {
    /// Creates a producer exposing `records` as `record_count` descriptor
    /// records.
    pub fn new(name: impl Into<String>, record_count: u64, records: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            record_count,
            records,
        }
    }
}

impl ErrorSourceProducer for MemoryErrorSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn probe(&self) -> SourceResult<SourceInfo> {
        Ok(SourceInfo::new(self.record_count, self.records.len() as u64))
    }

    fn fetch(&self, out: &mut [u8]) -> SourceResult<SourceInfo> {
        if out.len() < self.records.len() {
            return Err(SourceError::BufferTooShort {
                needed: self.records.len(),
                got: out.len(),
            });
        }
        out[..self.records.len()].copy_from_slice(&self.records);
        Ok(SourceInfo::new(self.record_count, self.records.len() as u64))
    }
}
