//! # Shared Crypto - Hashing Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Operation digests, deployment addresses |
//! | `message` | EIP-191 personal message | Domain separation of proof digests |
//!
//! Both are pure functions with no error conditions.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod hashing;
pub mod message;

// Re-exports
pub use hashing::{keccak256, keccak256_many, Hash, Keccak256Hasher};
pub use message::{hash_personal_message, to_eth_signed_message_hash, PERSONAL_MESSAGE_PREFIX_32};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
