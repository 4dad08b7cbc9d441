//! Transport bridge
//!
//! Consumer-side half of the boundary crossing. The exact aggregate size
//! cannot be known before crossing, and a crossing is a costly blocking
//! round trip, so the exchange is a negotiate-then-fetch protocol: send a
//! minimal envelope, and if the far side reports it undersized, resize to
//! the totals it wrote back and resend exactly once.

mod client;
mod communicator;
mod errors;

pub use client::{collect_error_sources, DescriptorClient};
pub use communicator::{Communicator, InProcessCommunicator};
pub use errors::{TransportError, TransportResult};
