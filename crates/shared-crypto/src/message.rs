//! # Personal-Message Hashing (EIP-191, version 0x45)
//!
//! Wraps a digest in the `"\x19Ethereum Signed Message:\n"` prefix before
//! hashing again. A digest produced this way can never be reinterpreted as a
//! transaction hash or as a typed-data (EIP-712) hash.
//!
//! The prefix must be byte-identical wherever a digest is produced and
//! re-derived, otherwise every comparison fails closed.

use crate::hashing::{keccak256_many, Hash};

/// Prefix for a 32-byte personal message.
pub const PERSONAL_MESSAGE_PREFIX_32: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Hash a 32-byte digest as a personal message.
pub fn to_eth_signed_message_hash(digest: &Hash) -> Hash {
    keccak256_many(&[PERSONAL_MESSAGE_PREFIX_32, digest])
}

/// Hash an arbitrary-length personal message.
///
/// The length is rendered in decimal ASCII, as wallets do.
pub fn hash_personal_message(message: &[u8]) -> Hash {
    let len = message.len().to_string();
    keccak256_many(&[
        b"\x19Ethereum Signed Message:\n",
        len.as_bytes(),
        message,
    ])
}
