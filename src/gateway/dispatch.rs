//! Service dispatch by domain selector
//!
//! The host environment registers each boundary service under a selector
//! GUID; incoming envelopes are routed to the matching handler. Handlers
//! mutate the payload region in place.

use std::collections::HashMap;

use uuid::Uuid;

use super::errors::{GatewayError, GatewayResult};
use super::handler::AggregatorGateway;
use crate::observability::Logger;

/// A boundary service reachable through the dispatcher.
pub trait ServiceHandler {
    /// Handles one request, mutating the payload region in place.
    fn handle(&self, payload: &mut [u8]) -> GatewayResult<()>;
}

impl ServiceHandler for AggregatorGateway {
    fn handle(&self, payload: &mut [u8]) -> GatewayResult<()> {
        self.aggregate(payload).map(|_| ())
    }
}

/// Routes envelope payloads to registered service handlers.
#[derive(Default)]
pub struct ServiceDispatcher {
    handlers: HashMap<Uuid, Box<dyn ServiceHandler>>,
}

impl ServiceDispatcher {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `selector`, replacing any previous
    /// registration for the same selector.
    pub fn register(&mut self, selector: Uuid, handler: Box<dyn ServiceHandler>) {
        Logger::info(
            "SERVICE_REGISTERED",
            &[("selector", &selector.to_string())],
        );
        self.handlers.insert(selector, handler);
    }

    /// Dispatches one request payload to the handler registered for
    /// `selector`.
    pub fn dispatch(&self, selector: Uuid, payload: &mut [u8]) -> GatewayResult<()> {
        match self.handlers.get(&selector) {
            Some(handler) => handler.handle(payload),
            None => Err(GatewayError::UnknownService(selector)),
        }
    }
}
