//! Producer error types

use thiserror::Error;

/// Result type for producer operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors reported by an individual error source producer.
///
/// The aggregator treats every producer failure as best-effort: the failing
/// producer is skipped and logged, the round continues.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The producer could not report or copy its descriptors
    #[error("error source unavailable: {0}")]
    Unavailable(String),

    /// The fetch region was smaller than the producer's records
    #[error("fetch buffer too short: need {needed} bytes, got {got}")]
    BufferTooShort {
        /// Bytes the producer needs to copy its records
        needed: usize,
        /// Bytes actually offered
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_sizes() {
        let err = SourceError::BufferTooShort { needed: 32, got: 16 };
        let text = err.to_string();
        assert!(text.contains("32"));
        assert!(text.contains("16"));
    }
}
