//! Wire decode errors

use thiserror::Error;

/// Result type for wire codecs
pub type WireResult<T> = Result<T, WireError>;

/// Errors produced while decoding boundary-crossing structures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Input ended before a fixed-width field or declared payload
    #[error("wire data truncated: need {needed} bytes, got {got}")]
    Truncated {
        /// Bytes required to decode
        needed: usize,
        /// Bytes available
        got: usize,
    },

    /// Declared payload length disagrees with the bytes present
    #[error("payload length mismatch: declared {declared}, actual {actual}")]
    LengthMismatch {
        /// Length declared in the envelope metadata
        declared: u64,
        /// Bytes actually present after the metadata
        actual: usize,
    },
}
