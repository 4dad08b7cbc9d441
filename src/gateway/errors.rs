//! Gateway error types

use thiserror::Error;
use uuid::Uuid;

use crate::wire::WireError;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors surfaced by the aggregation gateway.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Malformed caller input, rejected before any producer is invoked
    #[error("invalid aggregation buffer: {0}")]
    InvalidArgument(String),

    /// The caller's region cannot hold the aggregate; the probed totals
    /// were still written into its info header
    #[error(
        "aggregation buffer too small: need {required} bytes for \
         {record_count} record(s) spanning {total_byte_size} byte(s)"
    )]
    BufferTooSmall {
        /// Probed record count
        record_count: u64,
        /// Probed record bytes
        total_byte_size: u64,
        /// Region size needed to hold header plus records
        required: usize,
    },

    /// No handler registered for the requested selector
    #[error("no service registered for selector {0}")]
    UnknownService(Uuid),

    /// Wire-level failure while touching the payload region
    #[error(transparent)]
    Wire(#[from] WireError),
}
