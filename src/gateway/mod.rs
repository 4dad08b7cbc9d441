//! Cross-domain aggregation gateway
//!
//! Runs in the producers' privilege domain. A single handler is the point
//! of contact for the consumer side: it enumerates every registered
//! producer and aggregates their descriptor records into the caller's
//! payload region.
//!
//! # Protocol per invocation
//!
//! 1. Probe pass: every producer reports (count, size); failures are
//!    skipped and contribute zero
//! 2. Totals are written into the region's info header
//! 3. Capacity check: a region smaller than header + totals yields
//!    `BufferTooSmall` and no record bytes are copied
//! 4. Fetch pass: every producer copies its records at the cursor; a
//!    failure here is skipped and the final totals shrink to what was
//!    actually copied
//!
//! # Invariants
//!
//! - Records land contiguously, in producer enumeration order
//! - The reported totals never overstate the bytes present
//! - One faulty producer never blocks the others

mod dispatch;
mod errors;
mod handler;

pub use dispatch::{ServiceDispatcher, ServiceHandler};
pub use errors::{GatewayError, GatewayResult};
pub use handler::{AggregateSummary, AggregatorGateway};
