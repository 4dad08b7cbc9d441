//! Transport error types

use thiserror::Error;

use crate::table::TableError;
use crate::wire::WireError;

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors surfaced by the boundary exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The far side could not fit the aggregate into the envelope payload.
    ///
    /// This is the one negotiable status: the client consumes it by
    /// resizing the envelope and resending once.
    #[error("communication buffer too small for aggregate payload")]
    BufferTooSmall,

    /// The far side reported an undersized buffer again after the resize
    #[error("size negotiation failed: buffer reported undersized after resize")]
    NegotiationFailed,

    /// Envelope or payload could not be decoded
    #[error(transparent)]
    Wire(#[from] WireError),

    /// Non-negotiable failure reported by the boundary service, surfaced
    /// verbatim; the caller must not retry blindly
    #[error("boundary service failure: {0}")]
    Service(String),

    /// Appending the fetched descriptors to the table failed
    #[error(transparent)]
    Append(#[from] TableError),
}
