//! # Domain Module
//!
//! Core domain types for cross-chain DAO state synchronisation.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod ledger;
pub mod parameters;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use ledger::MembershipLedger;
pub use parameters::*;
pub use value_objects::*;
