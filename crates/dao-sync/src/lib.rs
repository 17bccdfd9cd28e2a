//! # DAO Sync
//!
//! Cooperative state synchronisation for a DAO deployed on several
//! EVM-compatible chains.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! One chain is HOME and holds the authoritative manifesto, governance
//! parameters and membership. Every other chain is a FOREIGN replica that
//! converges by applying proofs relayed off-chain:
//!
//! - HOME issues a proof: the operation plus a digest binding it to a
//!   destination contract address
//! - any relayer carries the proof to a FOREIGN deployment
//! - the FOREIGN deployment recomputes the digest with its own address and
//!   applies the operation only on an exact match
//!
//! ## Security Properties
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | No forgery | Only HOME issues; digest covers every payload byte |
//! | No cross-destination replay | Destination address is part of the digest |
//! | No double mint | Mint claims fail on items already present |
//! | Domain separation | Personal-message prefix on every digest |
//! | Soulbound items | One guarded primitive rejects owner-to-owner moves |
//!
//! Replay of idempotent proofs (manifesto, parameters, delegation, burn) is
//! accepted. Proofs carry no sequence number, so a FOREIGN chain reflects
//! whichever proof it applied last.
//!
//! ## Module Structure
//!
//! ```text
//! dao-sync/
//! ├── domain/          # Value objects, operations, ledger, parameters, errors
//! ├── algorithms/      # Codec, issuer, verifier, membership, CREATE2
//! ├── ports/           # Inbound APIs, VoteWeightLedger, EventSink
//! ├── adapters/        # In-memory and tracing adapters
//! ├── config.rs        # DaoConfig
//! ├── events.rs        # DaoEvent
//! └── service.rs       # DaoContract
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryEventLog, InMemoryVoteLedger, TracingEventSink};
pub use algorithms::{compute_digest, create2_address, decode_proof, encode_proof};
pub use config::DaoConfig;
pub use domain::{
    Address, ChainId, ChainRole, CodecError, ConfigError, DaoState, ErrorKind,
    GovernanceParameters, Hash, MembershipItem, MembershipLedger, Operation, OperationTag, Proof,
    SyncError, Uint48, QUORUM_DENOMINATOR, U256,
};
pub use events::{topics, ChangeOrigin, DaoEvent};
pub use ports::{ClaimApi, EventSink, GovernanceApi, MembershipApi, ProofIssuerApi, VoteWeightLedger};
pub use service::{DaoContract, ServiceStats};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
