//! Error source table construction
//!
//! The table builder is the single writer of the table buffer for its
//! entire lifetime: created on first append, grown by each subsequent
//! append, finalized and handed off by install.
//!
//! # Invariants enforced
//!
//! - header length always equals the buffer's total byte size
//! - header record count equals the sum of appended counts
//! - a failed append leaves the committed table untouched
//! - the checksum is valid only after a successful install
//! - installing with nothing appended publishes nothing and succeeds

mod buffer;
mod builder;
mod errors;
mod publish;

pub use crate::acpi::TableIdentity;
pub use buffer::TableBuffer;
pub use builder::TableBuilder;
pub use errors::{TableError, TableResult};
pub use publish::{FileTablePublisher, MemoryTablePublisher, PublishError, TablePublisher};
