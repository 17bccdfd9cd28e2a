//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound port traits for a single-process deployment.

mod event_sink;
mod vote_ledger;

pub use event_sink::{InMemoryEventLog, TracingEventSink};
pub use vote_ledger::InMemoryVoteLedger;
