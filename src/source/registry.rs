//! Producer registration and enumeration

use super::producer::ErrorSourceProducer;
use crate::observability::Logger;

/// Set of registered error source producers.
///
/// The aggregator borrows the registry for the duration of one aggregation
/// round, so the producer set observed by the probe and fetch passes of
/// that round is always the same snapshot. An empty registry is a valid
/// state: it aggregates to zero records.
#[derive(Default)]
pub struct ProducerRegistry {
    producers: Vec<Box<dyn ErrorSourceProducer>>,
}

impl ProducerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a producer. Producers are enumerated in registration order.
    pub fn register(&mut self, producer: Box<dyn ErrorSourceProducer>) {
        Logger::info("SOURCE_REGISTERED", &[("source", producer.name())]);
        self.producers.push(producer);
    }

    /// Number of registered producers.
    pub fn len(&self) -> usize {
        self.producers.len()
    }

    /// Returns true if no producers are registered.
    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    /// Iterates producers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ErrorSourceProducer> {
        self.producers.iter().map(|producer| producer.as_ref())
    }
}
