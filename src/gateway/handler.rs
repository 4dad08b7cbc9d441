//! Descriptor aggregation handler

use super::errors::{GatewayError, GatewayResult};
use crate::observability::Logger;
use crate::source::ProducerRegistry;
use crate::wire::{write_info_header, INFO_HEADER_SIZE};

/// Statistics from one aggregation round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateSummary {
    /// Record count summed during the probe pass
    pub probed_count: u64,
    /// Record bytes summed during the probe pass
    pub probed_size: u64,
    /// Records actually copied during the fetch pass
    pub copied_count: u64,
    /// Bytes actually copied during the fetch pass
    pub copied_size: u64,
    /// Producers that failed a probe or fetch call and were skipped
    pub skipped: usize,
}

/// Aggregates descriptor records from every registered producer into a
/// caller-supplied payload region.
///
/// The gateway owns its registry; the registry is borrowed for the whole
/// round, so the probe and fetch passes of one invocation always see the
/// same producer set.
pub struct AggregatorGateway {
    registry: ProducerRegistry,
}

impl AggregatorGateway {
    /// Creates a gateway over a producer registry.
    pub fn new(registry: ProducerRegistry) -> Self {
        Self { registry }
    }

    /// The registered producer set.
    pub fn registry(&self) -> &ProducerRegistry {
        &self.registry
    }

    /// Runs one aggregation round into `out`.
    ///
    /// `out` must be at least [`INFO_HEADER_SIZE`] bytes. On success the
    /// region holds the info header followed by the concatenated records;
    /// on `BufferTooSmall` it holds only the probed totals, so the caller
    /// can size a retry.
    pub fn aggregate(&self, out: &mut [u8]) -> GatewayResult<AggregateSummary> {
        if out.len() < INFO_HEADER_SIZE {
            return Err(GatewayError::InvalidArgument(format!(
                "payload region holds {} bytes, info header needs {}",
                out.len(),
                INFO_HEADER_SIZE
            )));
        }

        let mut summary = AggregateSummary::default();

        // Probe pass: sizes and counts only, no data moves.
        for producer in self.registry.iter() {
            match producer.probe() {
                Ok(info) => {
                    summary.probed_count += info.record_count;
                    summary.probed_size += info.byte_size;
                }
                Err(e) => {
                    summary.skipped += 1;
                    Logger::warn(
                        "SOURCE_SKIPPED",
                        &[
                            ("phase", "probe"),
                            ("reason", &e.to_string()),
                            ("source", producer.name()),
                        ],
                    );
                }
            }
        }

        // The totals go into the region before the capacity check so an
        // undersized caller still learns the required size.
        write_info_header(out, summary.probed_count, summary.probed_size)?;

        let required = INFO_HEADER_SIZE + summary.probed_size as usize;
        if out.len() < required {
            return Err(GatewayError::BufferTooSmall {
                record_count: summary.probed_count,
                total_byte_size: summary.probed_size,
                required,
            });
        }

        // Fetch pass: each producer writes at the cursor; the cursor only
        // advances on success, so records stay contiguous.
        let mut cursor = INFO_HEADER_SIZE;
        for producer in self.registry.iter() {
            let remaining = required - cursor;
            match producer.fetch(&mut out[cursor..required]) {
                Ok(info) if info.byte_size as usize > remaining => {
                    // The producer claims more bytes than the region it was
                    // handed; its contribution cannot be trusted.
                    summary.skipped += 1;
                    Logger::warn(
                        "SOURCE_SKIPPED",
                        &[
                            ("phase", "fetch"),
                            ("reason", "reported more bytes than its region"),
                            ("source", producer.name()),
                        ],
                    );
                }
                Ok(info) => {
                    cursor += info.byte_size as usize;
                    summary.copied_count += info.record_count;
                    summary.copied_size += info.byte_size;
                }
                Err(e) => {
                    summary.skipped += 1;
                    Logger::warn(
                        "SOURCE_SKIPPED",
                        &[
                            ("phase", "fetch"),
                            ("reason", &e.to_string()),
                            ("source", producer.name()),
                        ],
                    );
                }
            }
        }

        // A fetch-phase skip leaves the aggregate smaller than probed;
        // shrink the reported totals to the bytes actually present.
        write_info_header(out, summary.copied_count, summary.copied_size)?;
        if summary.copied_size != summary.probed_size {
            Logger::warn(
                "AGGREGATE_SHRUNK",
                &[
                    ("copied_size", &summary.copied_size.to_string()),
                    ("probed_size", &summary.probed_size.to_string()),
                ],
            );
        }

        Logger::info(
            "AGGREGATE_DONE",
            &[
                ("records", &summary.copied_count.to_string()),
                ("size", &summary.copied_size.to_string()),
                ("skipped", &summary.skipped.to_string()),
            ],
        );
        Ok(summary)
    }
}
