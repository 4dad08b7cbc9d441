//! Boundary-crossing wire structures
//!
//! Definitions shared by both sides of the trust boundary: the
//! communication envelope that frames every round trip, and the descriptor
//! info payload it carries. All integers are little-endian, fixed width.
//!
//! Decoding never trusts declared lengths: truncated input and mismatched
//! payload lengths are rejected before any slicing.

mod envelope;
mod errors;
mod info;

pub use envelope::{CommEnvelope, ENVELOPE_HEADER_SIZE};
pub use errors::{WireError, WireResult};
pub use info::{
    read_info_header, write_info_header, DescriptorInfo, INFO_HEADER_SIZE,
};

use uuid::Uuid;

/// Selector identifying the descriptor aggregation service across the
/// boundary. Both the dispatcher registration and the client's envelopes
/// use this value.
pub const DESCRIPTOR_SERVICE_SELECTOR: Uuid =
    Uuid::from_u128(0x8d3a_1f6e_42b7_4c05_9a88_6c51_e0d4_27b9);
