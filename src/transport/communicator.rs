//! Boundary communicator
//!
//! One blocking request/response round trip. The trait is the seam where a
//! real platform transport plugs in; the in-process implementation routes
//! through a [`ServiceDispatcher`] and is what hosted deployments and tests
//! use.

use super::errors::{TransportError, TransportResult};
use crate::gateway::{GatewayError, ServiceDispatcher};
use crate::wire::CommEnvelope;

/// A blocking boundary round trip.
///
/// `communicate` either completes, leaving the response payload in the
/// envelope, or reports a terminal error. There is no cancellation and no
/// timeout; [`TransportError::BufferTooSmall`] is the only status a caller
/// may react to by retrying.
pub trait Communicator {
    /// Performs one round trip, mutating the envelope payload in place.
    fn communicate(&mut self, envelope: &mut CommEnvelope) -> TransportResult<()>;
}

/// Communicator that crosses the boundary in process.
///
/// The envelope is encoded, decoded on the far side, and dispatched by
/// selector, so every round trip exercises the same wire format a real
/// transport would carry.
pub struct InProcessCommunicator {
    dispatcher: ServiceDispatcher,
}

impl InProcessCommunicator {
    /// Creates a communicator over a dispatcher with its services already
    /// registered.
    pub fn new(dispatcher: ServiceDispatcher) -> Self {
        Self { dispatcher }
    }
}

impl Communicator for InProcessCommunicator {
    fn communicate(&mut self, envelope: &mut CommEnvelope) -> TransportResult<()> {
        let wire_bytes = envelope.encode();
        let mut received = CommEnvelope::decode(&wire_bytes)?;

        let result = self
            .dispatcher
            .dispatch(received.selector, &mut received.payload);

        // The far side mutates the payload region in place; hand it back
        // to the caller even on an undersized report, because the probed
        // totals it carries are what sizes the retry.
        envelope.payload = received.payload;

        match result {
            Ok(()) => Ok(()),
            Err(GatewayError::BufferTooSmall { .. }) => Err(TransportError::BufferTooSmall),
            Err(e) => Err(TransportError::Service(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::AggregatorGateway;
    use crate::source::{MemoryErrorSource, ProducerRegistry};
    use crate::wire::{read_info_header, DESCRIPTOR_SERVICE_SELECTOR, INFO_HEADER_SIZE};
    use uuid::Uuid;

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

    #[test]
    fn test_round_trip_reaches_the_gateway() {
        let mut comm = communicator(vec![("a", 1, vec![0xCD; 8])]);
        let mut envelope =
            CommEnvelope::new(DESCRIPTOR_SERVICE_SELECTOR, INFO_HEADER_SIZE + 8);
        comm.communicate(&mut envelope).unwrap();
        assert_eq!(read_info_header(&envelope.payload).unwrap(), (1, 8));
        assert_eq!(&envelope.payload[INFO_HEADER_SIZE..], &[0xCD; 8]);
    }

    #[test]
    fn test_undersized_report_returns_payload_with_totals() {
        let mut comm = communicator(vec![("a", 2, vec![0xEF; 32])]);
        let mut envelope = CommEnvelope::new(DESCRIPTOR_SERVICE_SELECTOR, INFO_HEADER_SIZE);
        let err = comm.communicate(&mut envelope).unwrap_err();
        assert!(matches!(err, TransportError::BufferTooSmall));
        assert_eq!(read_info_header(&envelope.payload).unwrap(), (2, 32));
    }

    #[test]
    fn test_unknown_selector_is_a_service_error() {
        let mut comm = communicator(vec![]);
        let mut envelope = CommEnvelope::new(Uuid::new_v4(), INFO_HEADER_SIZE);
        assert!(matches!(
            comm.communicate(&mut envelope),
            Err(TransportError::Service(_))
        ));
    }
}
