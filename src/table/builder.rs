//! Table builder
//!
//! Accumulates batches of already-aggregated descriptor bytes into one
//! contiguous table and finalizes it for publication. The header is
//! re-encoded after every mutation, so the buffer is a self-consistent
//! table at all times; only the checksum waits for install.

use super::buffer::TableBuffer;
use super::errors::{TableError, TableResult};
use super::publish::TablePublisher;
use crate::acpi::{complement_checksum, TableHeader, TableIdentity, HEADER_SIZE};
use crate::observability::Logger;

struct BuiltTable {
    buffer: TableBuffer,
    header: TableHeader,
}

impl BuiltTable {
    fn start(identity: TableIdentity) -> TableResult<Self> {
        let buffer = TableBuffer::with_size(HEADER_SIZE)?;
        let header = TableHeader::new(identity);
        let mut table = Self { buffer, header };
        table.write_header();
        Logger::info("TABLE_HEADER_BUILT", &[("size", &HEADER_SIZE.to_string())]);
        Ok(table)
    }

    fn append(&mut self, records: &[u8], count: u32) -> TableResult<()> {
        let old_size = self.buffer.len();
        let new_size = old_size + records.len();
        let new_length = u32::try_from(new_size)
            .map_err(|_| TableError::OutOfResources(new_size))?;
        let new_count = self.header.record_count.checked_add(count).ok_or_else(|| {
            TableError::InvalidArgument("table record count overflow".into())
        })?;

        // Grow first: a failed allocation must leave the committed table
        // untouched.
        self.buffer.grow(new_size)?;
        self.buffer.as_mut_slice()[old_size..].copy_from_slice(records);

        self.header.length = new_length;
        self.header.record_count = new_count;
        self.write_header();
        Ok(())
    }

    fn finalize_checksum(&mut self) {
        self.header.checksum = 0;
        self.write_header();
        self.header.checksum = complement_checksum(self.buffer.as_slice());
        self.write_header();
    }

    fn write_header(&mut self) {
        let encoded = self.header.encode();
        self.buffer.as_mut_slice()[..HEADER_SIZE].copy_from_slice(&encoded);
    }
}

/// Builds the error source table incrementally.
///
/// Lifecycle: constructed empty, table buffer created on first append,
/// grown by each subsequent append, consumed by a successful install. A
/// failed install retains the buffer so the caller may retry or discard.
pub struct TableBuilder {
    identity: TableIdentity,
    table: Option<BuiltTable>,
}

impl TableBuilder {
    /// Creates a builder that stamps `identity` into the table header.
    pub fn new(identity: TableIdentity) -> Self {
        Self {
            identity,
            table: None,
        }
    }

    /// True while no descriptors have been appended.
    pub fn is_empty(&self) -> bool {
        self.table.is_none()
    }

    /// Current table size in bytes (0 before the first append).
    pub fn table_size(&self) -> usize {
        self.table.as_ref().map_or(0, |t| t.buffer.len())
    }

    /// Number of descriptor records appended so far.
    pub fn record_count(&self) -> u32 {
        self.table.as_ref().map_or(0, |t| t.header.record_count)
    }

    /// Read view of the table under construction, if any.
    pub fn table_bytes(&self) -> Option<&[u8]> {
        self.table.as_ref().map(|t| t.buffer.as_slice())
    }

    /// Appends a batch of `count` descriptor records spanning `byte_size`
    /// bytes.
    ///
    /// The first call allocates the header; each call grows the buffer by
    /// `byte_size`, copies the records after the existing contents, and
    /// updates the header length and record count. On failure the
    /// committed table is unchanged.
    pub fn append_descriptors(
        &mut self,
        records: &[u8],
        byte_size: usize,
        count: u32,
    ) -> TableResult<()> {
        if records.is_empty() || byte_size == 0 {
            return Err(TableError::InvalidArgument(
                "descriptor batch is empty".into(),
            ));
        }
        if records.len() != byte_size {
            return Err(TableError::InvalidArgument(format!(
                "declared size {} does not match {} record bytes",
                byte_size,
                records.len()
            )));
        }

        match self.table.as_mut() {
            Some(table) => table.append(records, count)?,
            None => {
                let mut table = BuiltTable::start(self.identity.clone())?;
                table.append(records, count)?;
                self.table = Some(table);
            }
        }

        Logger::info(
            "TABLE_APPEND",
            &[
                ("records", &count.to_string()),
                ("size", &byte_size.to_string()),
                ("table_size", &self.table_size().to_string()),
            ],
        );
        Ok(())
    }

    /// Finalizes and publishes the table.
    ///
    /// With nothing appended this is a successful no-op: the absence of
    /// error sources is a valid terminal state and nothing is published.
    /// Otherwise the whole-table checksum is computed, stored in the
    /// header, and the buffer is handed to `publisher`. On success the
    /// builder releases the buffer and returns to its pristine state; on
    /// failure the buffer is retained unchanged for a retry.
    pub fn install(&mut self, publisher: &mut dyn TablePublisher) -> TableResult<()> {
        let mut table = match self.table.take() {
            Some(table) => table,
            None => {
                Logger::info("TABLE_INSTALL_EMPTY", &[]);
                return Ok(());
            }
        };

        table.finalize_checksum();

        match publisher.publish(table.buffer.as_slice()) {
            Ok(()) => {
                Logger::info(
                    "TABLE_INSTALLED",
                    &[
                        ("length", &table.header.length.to_string()),
                        ("records", &table.header.record_count.to_string()),
                    ],
                );
                Ok(())
            }
            Err(e) => {
                Logger::error("TABLE_INSTALL_FAILED", &[("reason", &e.to_string())]);
                self.table = Some(table);
                Err(TableError::Publish(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acpi::verify_checksum;
    use crate::table::{MemoryTablePublisher, PublishError};

    fn builder() -> TableBuilder {
        TableBuilder::new(TableIdentity::default())
    }

    struct FailingPublisher;

    impl TablePublisher for FailingPublisher {
        fn publish(&mut self, _table: &[u8]) -> Result<(), PublishError> {
            Err(PublishError::new("publisher offline"))
        }
    }

    #[test]
    fn test_first_append_builds_header() {
        let mut builder = builder();
        builder.append_descriptors(&[0xAA; 16], 16, 1).unwrap();

        assert_eq!(builder.table_size(), HEADER_SIZE + 16);
        assert_eq!(builder.record_count(), 1);

        let bytes = builder.table_bytes().unwrap();
        let header = TableHeader::decode(bytes).unwrap();
        assert_eq!(header.length as usize, HEADER_SIZE + 16);
        assert_eq!(header.record_count, 1);
    }

    #[test]
    fn test_append_rejects_empty_batch() {
        let mut builder = builder();
        assert!(matches!(
            builder.append_descriptors(&[], 0, 0),
            Err(TableError::InvalidArgument(_))
        ));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_append_rejects_size_mismatch() {
        let mut builder = builder();
        assert!(matches!(
            builder.append_descriptors(&[0u8; 8], 16, 1),
            Err(TableError::InvalidArgument(_))
        ));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_appends_accumulate_length_and_count() {
        let mut builder = builder();
        builder.append_descriptors(&[0x11; 8], 8, 1).unwrap();
        builder.append_descriptors(&[0x22; 24], 24, 2).unwrap();

        let bytes = builder.table_bytes().unwrap();
        let header = TableHeader::decode(bytes).unwrap();
        assert_eq!(header.length as usize, HEADER_SIZE + 32);
        assert_eq!(header.record_count, 3);
        assert!(bytes[HEADER_SIZE..HEADER_SIZE + 8].iter().all(|b| *b == 0x11));
        assert!(bytes[HEADER_SIZE + 8..].iter().all(|b| *b == 0x22));
    }

    #[test]
    fn test_install_empty_builder_publishes_nothing() {
        let mut builder = builder();
        let mut publisher = MemoryTablePublisher::new();
        builder.install(&mut publisher).unwrap();
        assert!(publisher.published().is_empty());
    }

    #[test]
    fn test_install_finalizes_checksum_and_releases() {
        let mut builder = builder();
        builder.append_descriptors(&[0xA5; 16], 16, 1).unwrap();

        let mut publisher = MemoryTablePublisher::new();
        builder.install(&mut publisher).unwrap();

        let table = publisher.last().unwrap();
        assert!(verify_checksum(table));
        let header = TableHeader::decode(table).unwrap();
        assert_eq!(header.length as usize, table.len());

        // Ownership released: the builder is pristine again.
        assert!(builder.is_empty());
    }

    #[test]
    fn test_failed_install_retains_table_for_retry() {
        let mut builder = builder();
        builder.append_descriptors(&[0x3C; 8], 8, 1).unwrap();

        assert!(matches!(
            builder.install(&mut FailingPublisher),
            Err(TableError::Publish(_))
        ));
        assert!(!builder.is_empty());
        assert_eq!(builder.table_size(), HEADER_SIZE + 8);

        // The retry publishes the identical finalized table.
        let mut publisher = MemoryTablePublisher::new();
        builder.install(&mut publisher).unwrap();
        assert!(verify_checksum(publisher.last().unwrap()));
        assert!(builder.is_empty());
    }
}
