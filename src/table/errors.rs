//! Table builder error types

use thiserror::Error;

use super::publish::PublishError;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Errors surfaced by the table builder.
#[derive(Debug, Clone, Error)]
pub enum TableError {
    /// Malformed caller input, rejected before any mutation
    #[error("invalid descriptor batch: {0}")]
    InvalidArgument(String),

    /// Buffer growth could not be satisfied; the committed table is
    /// untouched
    #[error("table buffer allocation of {0} bytes failed")]
    OutOfResources(usize),

    /// The publishing collaborator rejected the finalized table; the
    /// buffer is retained for a retry
    #[error(transparent)]
    Publish(#[from] PublishError),
}
