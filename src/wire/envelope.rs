//! Communication envelope
//!
//! Every boundary round trip carries one envelope:
//!
//! ```text
//! offset  size  field
//!      0    16  domain selector (GUID)
//!     16     8  payload length (u64 LE)
//!     24     n  payload
//! ```
//!
//! The same envelope is used for the request and the response; the far side
//! mutates the payload in place.

use uuid::Uuid;

use super::errors::{WireError, WireResult};

/// Size of the envelope metadata preceding the payload
pub const ENVELOPE_HEADER_SIZE: usize = 24;

/// A boundary-crossing message: selector plus an owned payload region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommEnvelope {
    /// Service the envelope is addressed to
    pub selector: Uuid,
    /// Payload region, sized by the sender
    pub payload: Vec<u8>,
}

impl CommEnvelope {
    /// Creates an envelope with a zeroed payload of `payload_size` bytes.
    pub fn new(selector: Uuid, payload_size: usize) -> Self {
        Self {
            selector,
            payload: vec![0u8; payload_size],
        }
    }

    /// Creates an envelope around an existing payload.
    pub fn with_payload(selector: Uuid, payload: Vec<u8>) -> Self {
        Self { selector, payload }
    }

    /// Total encoded size: metadata plus payload.
    pub fn total_size(&self) -> usize {
        ENVELOPE_HEADER_SIZE + self.payload.len()
    }

    /// Encodes the envelope into its wire form.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_size());
        out.extend_from_slice(self.selector.as_bytes());
        out.extend_from_slice(&(self.payload.len() as u64).to_le_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    /// Decodes an envelope, rejecting truncated input and payload-length
    /// mismatches.
    pub fn decode(data: &[u8]) -> WireResult<Self> {
        if data.len() < ENVELOPE_HEADER_SIZE {
            return Err(WireError::Truncated {
                needed: ENVELOPE_HEADER_SIZE,
                got: data.len(),
            });
        }

        let mut selector_bytes = [0u8; 16];
        selector_bytes.copy_from_slice(&data[0..16]);
        let selector = Uuid::from_bytes(selector_bytes);

        let mut len_bytes = [0u8; 8];
        len_bytes.copy_from_slice(&data[16..24]);
        let declared = u64::from_le_bytes(len_bytes);

        let actual = data.len() - ENVELOPE_HEADER_SIZE;
        if declared != actual as u64 {
            return Err(WireError::LengthMismatch { declared, actual });
        }

        Ok(Self {
            selector,
            payload: data[ENVELOPE_HEADER_SIZE..].to_vec(),
        })
    }
}
