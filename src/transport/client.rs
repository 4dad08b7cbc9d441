//! Negotiate-then-fetch client
//!
//! Drives the two-round-trip exchange that moves the aggregate across the
//! boundary:
//!
//! ```text
//! Probing ──ok──────────────────────────────► Done
//!    │
//!    └─undersized─► Undersized ─► Fetching ──ok──► Done
//!                                    │
//!                                    └─undersized─► NegotiationFailed
//! ```
//!
//! Exactly one Undersized → Fetching transition is permitted per exchange;
//! a second undersized report is a protocol violation, never a loop.

use super::communicator::Communicator;
use super::errors::{TransportError, TransportResult};
use crate::observability::Logger;
use crate::table::{TableBuilder, TableError};
use crate::wire::{
    read_info_header, CommEnvelope, DescriptorInfo, DESCRIPTOR_SERVICE_SELECTOR,
    INFO_HEADER_SIZE,
};
use uuid::Uuid;

enum ExchangeState {
    Probing,
    Undersized,
    Fetching,
    Done,
}

/// Client side of the descriptor aggregation exchange.
pub struct DescriptorClient {
    selector: Uuid,
}

impl Default for DescriptorClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorClient {
    /// Creates a client addressing the descriptor aggregation service.
    pub fn new() -> Self {
        Self {
            selector: DESCRIPTOR_SERVICE_SELECTOR,
        }
    }

    /// Creates a client addressing a non-default selector.
    pub fn with_selector(selector: Uuid) -> Self {
        Self { selector }
    }

    /// Fetches the aggregated descriptors through `comm`.
    ///
    /// The first round trip carries a payload holding only the info fixed
    /// header. If the far side reports it undersized, the totals it wrote
    /// back size a second, final attempt. Any other error propagates
    /// unchanged.
    pub fn fetch(&self, comm: &mut dyn Communicator) -> TransportResult<DescriptorInfo> {
        let mut envelope = CommEnvelope::new(self.selector, INFO_HEADER_SIZE);
        let mut state = ExchangeState::Probing;

        loop {
            state = match state {
                ExchangeState::Probing => match comm.communicate(&mut envelope) {
                    Ok(()) => ExchangeState::Done,
                    Err(TransportError::BufferTooSmall) => ExchangeState::Undersized,
                    Err(e) => return Err(e),
                },
                ExchangeState::Undersized => {
                    let (count, size) = read_info_header(&envelope.payload)?;
                    let size = usize::try_from(size)
                        .map_err(|_| TransportError::NegotiationFailed)?;
                    let required = INFO_HEADER_SIZE + size;
                    Logger::info(
                        "ENVELOPE_RESIZED",
                        &[
                            ("payload_size", &required.to_string()),
                            ("records", &count.to_string()),
                        ],
                    );
                    envelope = CommEnvelope::new(self.selector, required);
                    ExchangeState::Fetching
                }
                ExchangeState::Fetching => match comm.communicate(&mut envelope) {
                    Ok(()) => ExchangeState::Done,
                    Err(TransportError::BufferTooSmall) => {
                        return Err(TransportError::NegotiationFailed)
                    }
                    Err(e) => return Err(e),
                },
                ExchangeState::Done => {
                    return Ok(DescriptorInfo::decode(&envelope.payload)?)
                }
            };
        }
    }
}

/// Collects the aggregated error source descriptors and appends them to
/// the table under construction.
///
/// An empty aggregate is success with nothing appended: the absence of
/// error sources is a valid terminal state.
pub fn collect_error_sources(
    comm: &mut dyn Communicator,
    builder: &mut TableBuilder,
) -> TransportResult<()> {
    let info = DescriptorClient::new().fetch(comm)?;

    if info.is_empty() {
        Logger::info("ERROR_SOURCES_NONE", &[]);
        return Ok(());
    }

    Logger::info(
        "ERROR_SOURCES_COLLECTED",
        &[
            ("records", &info.record_count.to_string()),
            ("size", &info.total_byte_size.to_string()),
        ],
    );

    let count = u32::try_from(info.record_count).map_err(|_| {
        TableError::InvalidArgument("record count exceeds table capacity".into())
    })?;
    builder.append_descriptors(&info.records, info.records.len(), count)?;
    Ok(())
}
