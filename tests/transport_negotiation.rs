//! Transport Negotiation Tests
//!
//! The exchange is two round trips at most: a probe-sized envelope, then —
//! only if the far side reports it undersized — a single resend with the
//! envelope sized from the reported totals.

use hestgen::gateway::{AggregatorGateway, ServiceDispatcher};
use hestgen::source::{MemoryErrorSource, ProducerRegistry};
use hestgen::transport::{
    Communicator, DescriptorClient, InProcessCommunicator, TransportError,
};
use hestgen::wire::{CommEnvelope, DESCRIPTOR_SERVICE_SELECTOR};
use uuid::Uuid;

// =============================================================================
// Test Utilities
// =============================================================================

fn communicator(sources: Vec<(&str, u64, Vec<u8>)>) -> InProcessCommunicator {
    let mut registry = ProducerRegistry::new();
    for (name, count, records) in sources {
        registry.register(Box::new(MemoryErrorSource::new(name, count, records)));
    }
    let mut dispatcher = ServiceDispatcher::new();
    dispatcher.register(
        DESCRIPTOR_SERVICE_SELECTOR,
        Box::new(AggregatorGateway::new(registry)),
    );
    InProcessCommunicator::new(dispatcher)
}

/// Communicator wrapper that counts round trips.
struct CountingCommunicator<C> {
    inner: C,
    round_trips: usize,
}

impl<C: Communicator> Communicator for CountingCommunicator<C> {
    fn communicate(
        &mut self,
        envelope: &mut CommEnvelope,
    ) -> Result<(), TransportError> {
        self.round_trips += 1;
        self.inner.communicate(envelope)
    }
}

// =============================================================================
// Negotiation paths
// =============================================================================

/// With no producers the aggregate fits the probe envelope: one round trip.
#[test]
fn test_empty_aggregate_needs_one_round_trip() {
    let mut comm = CountingCommunicator {
        inner: communicator(vec![]),
        round_trips: 0,
    };
    let info = DescriptorClient::new().fetch(&mut comm).unwrap();
    assert!(info.is_empty());
    assert_eq!(comm.round_trips, 1);
}

/// Two producers of 8 and 24 bytes: the probe envelope is undersized, the
/// resend carries a 32-byte record region and succeeds.
#[test]
fn test_undersized_then_resend_succeeds() {
    let mut comm = CountingCommunicator {
        inner: communicator(vec![("a", 1, vec![0xA1; 8]), ("b", 1, vec![0xB2; 24])]),
        round_trips: 0,
    };

    let info = DescriptorClient::new().fetch(&mut comm).unwrap();
    assert_eq!(comm.round_trips, 2);
    assert_eq!(info.record_count, 2);
    assert_eq!(info.total_byte_size, 32);
    assert!(info.records[..8].iter().all(|b| *b == 0xA1));
    assert!(info.records[8..].iter().all(|b| *b == 0xB2));
}

/// One producer reporting (1, 16): the fetched aggregate carries its bytes
/// verbatim.
#[test]
fn test_single_producer_records_survive_verbatim() {
    let records: Vec<u8> = (0u8..16).collect();
    let mut comm = communicator(vec![("solo", 1, records.clone())]);

    let info = DescriptorClient::new().fetch(&mut comm).unwrap();
    assert_eq!(info.record_count, 1);
    assert_eq!(info.total_byte_size, 16);
    assert_eq!(info.records, records);
}

// =============================================================================
// Error propagation
// =============================================================================

/// A non-negotiable boundary failure propagates unchanged; the client does
/// not retry it.
#[test]
fn test_service_failure_propagates_without_retry() {
    // Dispatcher with no registered service: every round trip fails.
    let dispatcher = ServiceDispatcher::new();
    let mut comm = CountingCommunicator {
        inner: InProcessCommunicator::new(dispatcher),
        round_trips: 0,
    };

    let err = DescriptorClient::new().fetch(&mut comm).unwrap_err();
    assert!(matches!(err, TransportError::Service(_)));
    assert_eq!(comm.round_trips, 1);
}

/// A client addressed to a selector nobody registered observes the same
/// terminal failure.
#[test]
fn test_stray_selector_is_terminal() {
    let mut comm = communicator(vec![("a", 1, vec![0x01; 4])]);
    let client = DescriptorClient::with_selector(Uuid::new_v4());
    assert!(matches!(
        client.fetch(&mut comm),
        Err(TransportError::Service(_))
    ));
}
