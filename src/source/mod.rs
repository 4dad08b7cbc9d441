//! Error source producer capability
//!
//! A producer is an independent source of descriptor records, queried
//! through a uniform capability and unaware of other producers. Each
//! producer answers two questions:
//!
//! - probe: how many records do you have, and how many bytes do they
//!   occupy? (no data is copied)
//! - fetch: copy your records into this region and report what you wrote
//!
//! A producer's reported size is expected to be stable between the probe
//! and fetch calls of one aggregation round; enforcing that is the
//! producer's responsibility, not this crate's.

mod errors;
mod memory;
mod producer;
mod registry;

pub use errors::{SourceError, SourceResult};
pub use memory::MemoryErrorSource;
pub use producer::{ErrorSourceProducer, SourceInfo};
pub use registry::ProducerRegistry;
