//! Error source table header layout
//!
//! Fixed-width, little-endian header preceding the opaque descriptor
//! records:
//!
//! ```text
//! offset  size  field
//!      0     4  signature ("HEST")
//!      4     1  revision
//!      5     1  checksum (valid only after finalization)
//!      6     6  OEM id
//!     12     8  OEM table id
//!     20     4  OEM revision
//!     24     4  creator id
//!     28     4  creator revision
//!     32     4  length (total table bytes, header included)
//!     36     4  record count
//! ```
//!
//! `length` always equals the current total size of the table buffer;
//! `record count` is the number of descriptor records appended so far.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Table signature
pub const SIGNATURE: [u8; 4] = *b"HEST";

/// Table format revision
pub const REVISION: u8 = 1;

/// Encoded header size in bytes
pub const HEADER_SIZE: usize = 40;

const OFF_SIGNATURE: usize = 0;
const OFF_REVISION: usize = 4;
const OFF_CHECKSUM: usize = 5;
const OFF_OEM_ID: usize = 6;
const OFF_OEM_TABLE_ID: usize = 12;
const OFF_OEM_REVISION: usize = 20;
const OFF_CREATOR_ID: usize = 24;
const OFF_CREATOR_REVISION: usize = 28;
const OFF_LENGTH: usize = 32;
const OFF_RECORD_COUNT: usize = 36;

/// Header decode errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Input shorter than the fixed header
    #[error("table header truncated: need {HEADER_SIZE} bytes, got {0}")]
    Truncated(usize),
    /// Signature bytes did not match
    #[error("bad table signature")]
    BadSignature,
}

/// Identification fields stamped into the table header.
///
/// The values come from platform configuration; the defaults are neutral
/// placeholders a host is expected to override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableIdentity {
    /// OEM identifier
    pub oem_id: [u8; 6],
    /// OEM table identifier
    pub oem_table_id: [u8; 8],
    /// OEM revision number
    pub oem_revision: u32,
    /// Vendor id of the table creator
    pub creator_id: u32,
    /// Revision of the table creator
    pub creator_revision: u32,
}

impl Default for TableIdentity {
    fn default() -> Self {
        Self {
            oem_id: *b"HSTGEN",
            oem_table_id: *b"HESTGEN ",
            oem_revision: 1,
            creator_id: u32::from_le_bytes(*b"HGEN"),
            creator_revision: 1,
        }
    }
}

/// In-memory form of the table header.
///
/// The builder re-encodes the full header into the first [`HEADER_SIZE`]
/// bytes of the table buffer after every mutation, so the encoded table is
/// always self-consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    /// Identification fields from platform configuration
    pub identity: TableIdentity,
    /// Checksum byte, zero until finalization
    pub checksum: u8,
    /// Total table size in bytes, header included
    pub length: u32,
    /// Number of descriptor records in the table body
    pub record_count: u32,
}

impl TableHeader {
    /// Creates a header for an empty table: no records, length equal to the
    /// header itself, checksum zero.
    pub fn new(identity: TableIdentity) -> Self {
        Self {
            identity,
            checksum: 0,
            length: HEADER_SIZE as u32,
            record_count: 0,
        }
    }

    /// Encodes the header into its fixed-width wire form.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[OFF_SIGNATURE..OFF_SIGNATURE + 4].copy_from_slice(&SIGNATURE);
        out[OFF_REVISION] = REVISION;
        out[OFF_CHECKSUM] = self.checksum;
        out[OFF_OEM_ID..OFF_OEM_ID + 6].copy_from_slice(&self.identity.oem_id);
        out[OFF_OEM_TABLE_ID..OFF_OEM_TABLE_ID + 8]
            .copy_from_slice(&self.identity.oem_table_id);
        out[OFF_OEM_REVISION..OFF_OEM_REVISION + 4]
            .copy_from_slice(&self.identity.oem_revision.to_le_bytes());
        out[OFF_CREATOR_ID..OFF_CREATOR_ID + 4]
            .copy_from_slice(&self.identity.creator_id.to_le_bytes());
        out[OFF_CREATOR_REVISION..OFF_CREATOR_REVISION + 4]
            .copy_from_slice(&self.identity.creator_revision.to_le_bytes());
        out[OFF_LENGTH..OFF_LENGTH + 4].copy_from_slice(&self.length.to_le_bytes());
        out[OFF_RECORD_COUNT..OFF_RECORD_COUNT + 4]
            .copy_from_slice(&self.record_count.to_le_bytes());
        out
    }

    /// Decodes a header from the front of an encoded table.
    pub fn decode(data: &[u8]) -> Result<Self, HeaderError> {
        if data.len() < HEADER_SIZE {
            return Err(HeaderError::Truncated(data.len()));
        }
        if data[OFF_SIGNATURE..OFF_SIGNATURE + 4] != SIGNATURE {
            return Err(HeaderError::BadSignature);
        }

        let mut oem_id = [0u8; 6];
        oem_id.copy_from_slice(&data[OFF_OEM_ID..OFF_OEM_ID + 6]);
        let mut oem_table_id = [0u8; 8];
        oem_table_id.copy_from_slice(&data[OFF_OEM_TABLE_ID..OFF_OEM_TABLE_ID + 8]);

        Ok(Self {
            identity: TableIdentity {
                oem_id,
                oem_table_id,
                oem_revision: read_u32(data, OFF_OEM_REVISION),
                creator_id: read_u32(data, OFF_CREATOR_ID),
                creator_revision: read_u32(data, OFF_CREATOR_REVISION),
            },
            checksum: data[OFF_CHECKSUM],
            length: read_u32(data, OFF_LENGTH),
            record_count: read_u32(data, OFF_RECORD_COUNT),
        })
    }
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}
