//! Descriptor info payload
//!
//! The aggregation result carried inside an envelope payload:
//!
//! ```text
//! offset  size  field
//!      0     8  record count (u64 LE)
//!      8     8  total byte size (u64 LE)
//!     16     n  concatenated descriptor records
//! ```
//!
//! The fixed header is written even when the payload region is too small
//! to hold the records, which is how an undersized caller learns the
//! required size.

use super::errors::{WireError, WireResult};

/// Size of the count/size fields preceding the record bytes
pub const INFO_HEADER_SIZE: usize = 16;

/// Aggregated descriptor totals plus the flat record list.
///
/// Produced fresh per aggregation round; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescriptorInfo {
    /// Total number of descriptor records
    pub record_count: u64,
    /// Total size of the record list in bytes
    pub total_byte_size: u64,
    /// Concatenated records, in producer enumeration order
    pub records: Vec<u8>,
}

impl DescriptorInfo {
    /// True when the aggregate holds no descriptors.
    ///
    /// An empty aggregate is a valid terminal state, not an error.
    pub fn is_empty(&self) -> bool {
        self.record_count == 0 || self.total_byte_size == 0
    }

    /// Decodes an info payload.
    ///
    /// Trailing bytes beyond the declared record size are tolerated: the
    /// aggregator may shrink its totals after a fetch-phase producer
    /// failure, leaving uncopied slack at the end of the payload region.
    pub fn decode(data: &[u8]) -> WireResult<Self> {
        let (record_count, total_byte_size) = read_info_header(data)?;
        let size = usize::try_from(total_byte_size).map_err(|_| {
            WireError::LengthMismatch {
                declared: total_byte_size,
                actual: data.len() - INFO_HEADER_SIZE,
            }
        })?;

        let available = data.len() - INFO_HEADER_SIZE;
        if available < size {
            return Err(WireError::Truncated {
                needed: INFO_HEADER_SIZE + size,
                got: data.len(),
            });
        }

        Ok(Self {
            record_count,
            total_byte_size,
            records: data[INFO_HEADER_SIZE..INFO_HEADER_SIZE + size].to_vec(),
        })
    }

    /// Encodes the info into its wire form.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(INFO_HEADER_SIZE + self.records.len());
        out.extend_from_slice(&self.record_count.to_le_bytes());
        out.extend_from_slice(&self.total_byte_size.to_le_bytes());
        out.extend_from_slice(&self.records);
        out
    }
}

/// Writes the count/size fields into the front of a payload region.
pub fn write_info_header(out: &mut [u8], record_count: u64, byte_size: u64) -> WireResult<()> {
    if out.len() < INFO_HEADER_SIZE {
        return Err(WireError::Truncated {
            needed: INFO_HEADER_SIZE,
            got: out.len(),
        });
    }
    out[0..8].copy_from_slice(&record_count.to_le_bytes());
    out[8..16].copy_from_slice(&byte_size.to_le_bytes());
    Ok(())
}

/// Reads the count/size fields from the front of a payload region.
pub fn read_info_header(data: &[u8]) -> WireResult<(u64, u64)> {
    if data.len() < INFO_HEADER_SIZE {
        return Err(WireError::Truncated {
            needed: INFO_HEADER_SIZE,
            got: data.len(),
        });
    }
    let mut count_bytes = [0u8; 8];
    count_bytes.copy_from_slice(&data[0..8]);
    let mut size_bytes = [0u8; 8];
    size_bytes.copy_from_slice(&data[8..16]);
    Ok((
        u64::from_le_bytes(count_bytes),
        u64::from_le_bytes(size_bytes),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        let info = DescriptorInfo {
            record_count: 3,
            total_byte_size: 5,
            records: vec![1, 2, 3, 4, 5],
        };
        assert_eq!(DescriptorInfo::decode(&info.encode()).unwrap(), info);
    }

    #[test]
    fn test_header_only_payload_is_empty_aggregate() {
        let mut payload = vec![0u8; INFO_HEADER_SIZE];
        write_info_header(&mut payload, 0, 0).unwrap();
        let info = DescriptorInfo::decode(&payload).unwrap();
        assert!(info.is_empty());
        assert!(info.records.is_empty());
    }

    #[test]
    fn test_decode_tolerates_trailing_slack() {
        // Shrunk totals leave uncopied bytes at the end of the region.
        let mut payload = vec![0xEE; INFO_HEADER_SIZE + 10];
        write_info_header(&mut payload, 1, 4).unwrap();
        let info = DescriptorInfo::decode(&payload).unwrap();
        assert_eq!(info.records.len(), 4);
        assert_eq!(info.record_count, 1);
    }

    #[test]
    fn test_decode_rejects_truncated_records() {
        let mut payload = vec![0u8; INFO_HEADER_SIZE + 2];
        write_info_header(&mut payload, 1, 8).unwrap();
        assert_eq!(
            DescriptorInfo::decode(&payload),
            Err(WireError::Truncated {
                needed: INFO_HEADER_SIZE + 8,
                got: INFO_HEADER_SIZE + 2
            })
        );
    }

    #[test]
    fn test_decode_rejects_short_header() {
        assert!(matches!(
            DescriptorInfo::decode(&[0u8; 4]),
            Err(WireError::Truncated { .. })
        ));
    }

    #[test]
    fn test_write_header_needs_room() {
        let mut out = [0u8; 8];
        assert!(write_info_header(&mut out, 1, 1).is_err());
    }
}
