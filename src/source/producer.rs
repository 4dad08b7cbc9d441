//! Producer capability trait

use super::errors::SourceResult;

/// Per-producer descriptor totals reported by probe and fetch calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceInfo {
    /// Number of descriptor records
    pub record_count: u64,
    /// Total size of those records in bytes
    pub byte_size: u64,
}

impl SourceInfo {
    /// Creates totals for `record_count` records spanning `byte_size` bytes.
    pub fn new(record_count: u64, byte_size: u64) -> Self {
        Self {
            record_count,
            byte_size,
        }
    }
}

/// Capability implemented by every error source producer.
///
/// Producers are registered in a [`ProducerRegistry`](super::ProducerRegistry)
/// and enumerated by the aggregator once per round: first a probe pass over
/// all producers, then a fetch pass with a live write region.
pub trait ErrorSourceProducer {
    /// Stable name used in log events when this producer is skipped.
    fn name(&self) -> &str;

    /// Reports this producer's record count and byte size without copying
    /// any data.
    fn probe(&self) -> SourceResult<SourceInfo>;

    /// Copies this producer's records into the front of `out` and returns
    /// the totals actually written.
    ///
    /// The totals must match what [`probe`](Self::probe) reported for the
    /// same round; a producer whose size changed between the two calls
    /// yields an inconsistent aggregate.
    fn fetch(&self, out: &mut [u8]) -> SourceResult<SourceInfo>;
}
