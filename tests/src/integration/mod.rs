//! # Cross-Chain Integration Tests
//!
//! HOME issues, a relayer carries, FOREIGN claims. Each module drives a
//! [`Network`](crate::harness::Network) end to end.

pub mod ordering;
