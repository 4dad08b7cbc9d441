//! Observability subsystem for hestgen
//!
//! Structured, synchronous logging for the table construction and
//! aggregation paths.
//!
//! # Principles
//!
//! 1. Logging is read-only: no side effects on table or aggregation state
//! 2. One log line = one event
//! 3. Synchronous, no buffering, no background threads
//! 4. Deterministic output (fields sorted by key)

mod logger;

pub use logger::{Logger, Severity};
