//! # Message Codec
//!
//! Deterministic encoding of an operation into a 32-byte digest:
//!
//! ```text
//! encoded = destination(20) ‖ tag(1) ‖ payload
//! digest  = keccak256("\x19Ethereum Signed Message:\n32" ‖ keccak256(encoded))
//! ```
//!
//! Payloads are packed big-endian with a fixed field order per tag. The only
//! variable-length field (a URI or manifesto text) is always last, so a payload
//! decodes unambiguously once the tag is known.

use crate::domain::{Address, CodecError, Hash, Operation, OperationTag, Proof, Uint48, U256};
use shared_crypto::{keccak256, to_eth_signed_message_hash};

/// Width of an encoded address.
pub const ADDRESS_LEN: usize = 20;

/// Width of an ABI word.
pub const WORD_LEN: usize = 32;

/// Width of a digest.
pub const DIGEST_LEN: usize = 32;

/// `U256` as a 32-byte big-endian word.
pub fn word(value: U256) -> [u8; WORD_LEN] {
    let mut out = [0u8; WORD_LEN];
    value.to_big_endian(&mut out);
    out
}

fn read_word(bytes: &[u8]) -> U256 {
    U256::from_big_endian(&bytes[..WORD_LEN])
}

fn read_address(bytes: &[u8]) -> Address {
    let mut out = [0u8; ADDRESS_LEN];
    out.copy_from_slice(&bytes[..ADDRESS_LEN]);
    Address::new(out)
}

fn read_text(bytes: &[u8]) -> Result<String, CodecError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
}

/// Canonical payload of an operation.
pub fn encode_payload(operation: &Operation) -> Vec<u8> {
    let mut out = Vec::new();
    match operation {
        Operation::Mint {
            item_id,
            owner,
            metadata_uri,
        } => {
            out.extend_from_slice(&word(*item_id));
            out.extend_from_slice(owner.as_bytes());
            out.extend_from_slice(metadata_uri.as_bytes());
        }
        Operation::Burn { item_id } => {
            out.extend_from_slice(&word(*item_id));
        }
        Operation::SetMetadata {
            item_id,
            metadata_uri,
        } => {
            out.extend_from_slice(&word(*item_id));
            out.extend_from_slice(metadata_uri.as_bytes());
        }
        Operation::SetDelegation {
            delegator,
            delegatee,
        } => {
            out.extend_from_slice(delegator.as_bytes());
            out.extend_from_slice(delegatee.as_bytes());
        }
        Operation::SetManifesto { text } => {
            out.extend_from_slice(text.as_bytes());
        }
        Operation::UpdateVotingDelay { value } => {
            out.extend_from_slice(&word(U256::from(value.get())));
        }
        Operation::UpdateVotingPeriod { value } => {
            out.extend_from_slice(&word(U256::from(*value)));
        }
        Operation::UpdateProposalThreshold { value } | Operation::UpdateQuorumNumerator { value } => {
            out.extend_from_slice(&word(*value));
        }
    }
    out
}

/// `destination ‖ tag ‖ payload`.
pub fn encode(destination: Address, tag: OperationTag, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(ADDRESS_LEN + 1 + payload.len());
    out.extend_from_slice(destination.as_bytes());
    out.push(tag.ordinal());
    out.extend_from_slice(payload);
    out
}

/// Hash, then re-hash under the personal-message prefix.
pub fn digest(encoded: &[u8]) -> Hash {
    Hash::new(to_eth_signed_message_hash(&keccak256(encoded)))
}

/// Digest of `operation` addressed to `destination`.
pub fn compute_digest(destination: Address, operation: &Operation) -> Hash {
    digest(&encode(
        destination,
        operation.tag(),
        &encode_payload(operation),
    ))
}

fn expect_len(tag: OperationTag, bytes: &[u8], expected: usize) -> Result<(), CodecError> {
    if bytes.len() != expected {
        return Err(CodecError::PayloadLength {
            tag,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

fn expect_min_len(tag: OperationTag, bytes: &[u8], minimum: usize) -> Result<(), CodecError> {
    if bytes.len() < minimum {
        return Err(CodecError::PayloadLength {
            tag,
            expected: minimum,
            actual: bytes.len(),
        });
    }
    Ok(())
}

fn fits(tag: OperationTag, value: U256, bits: u32) -> Result<(), CodecError> {
    if value.bits() > bits as usize {
        return Err(CodecError::ValueOverflow { tag, bits });
    }
    Ok(())
}

/// Inverse of [`encode_payload`].
pub fn decode_payload(tag: OperationTag, bytes: &[u8]) -> Result<Operation, CodecError> {
    let operation = match tag {
        OperationTag::Mint => {
            expect_min_len(tag, bytes, WORD_LEN + ADDRESS_LEN)?;
            Operation::Mint {
                item_id: read_word(bytes),
                owner: read_address(&bytes[WORD_LEN..]),
                metadata_uri: read_text(&bytes[WORD_LEN + ADDRESS_LEN..])?,
            }
        }
        OperationTag::Burn => {
            expect_len(tag, bytes, WORD_LEN)?;
            Operation::Burn {
                item_id: read_word(bytes),
            }
        }
        OperationTag::SetMetadata => {
            expect_min_len(tag, bytes, WORD_LEN)?;
            Operation::SetMetadata {
                item_id: read_word(bytes),
                metadata_uri: read_text(&bytes[WORD_LEN..])?,
            }
        }
        OperationTag::SetDelegation => {
            expect_len(tag, bytes, 2 * ADDRESS_LEN)?;
            Operation::SetDelegation {
                delegator: read_address(bytes),
                delegatee: read_address(&bytes[ADDRESS_LEN..]),
            }
        }
        OperationTag::SetManifesto => Operation::SetManifesto {
            text: read_text(bytes)?,
        },
        OperationTag::UpdateVotingDelay => {
            expect_len(tag, bytes, WORD_LEN)?;
            let value = read_word(bytes);
            fits(tag, value, Uint48::BITS)?;
            let value = Uint48::new(value.low_u64()).ok_or(CodecError::ValueOverflow {
                tag,
                bits: Uint48::BITS,
            })?;
            Operation::UpdateVotingDelay { value }
        }
        OperationTag::UpdateVotingPeriod => {
            expect_len(tag, bytes, WORD_LEN)?;
            let value = read_word(bytes);
            fits(tag, value, u32::BITS)?;
            let value = u32::try_from(value.low_u64())
                .map_err(|_| CodecError::ValueOverflow { tag, bits: u32::BITS })?;
            Operation::UpdateVotingPeriod { value }
        }
        OperationTag::UpdateProposalThreshold => {
            expect_len(tag, bytes, WORD_LEN)?;
            Operation::UpdateProposalThreshold {
                value: read_word(bytes),
            }
        }
        OperationTag::UpdateQuorumNumerator => {
            expect_len(tag, bytes, WORD_LEN)?;
            Operation::UpdateQuorumNumerator {
                value: read_word(bytes),
            }
        }
    };
    Ok(operation)
}

/// Binary relay format: `tag ‖ payload ‖ digest`.
pub fn encode_proof(proof: &Proof) -> Vec<u8> {
    let payload = encode_payload(&proof.operation);
    let mut out = Vec::with_capacity(1 + payload.len() + DIGEST_LEN);
    out.push(proof.tag().ordinal());
    out.extend_from_slice(&payload);
    out.extend_from_slice(proof.digest.as_bytes());
    out
}

/// Parse the binary relay format. The digest is not checked here.
pub fn decode_proof(bytes: &[u8]) -> Result<Proof, CodecError> {
    if bytes.len() < 1 + DIGEST_LEN {
        return Err(CodecError::TruncatedProof(bytes.len()));
    }
    let tag = OperationTag::try_from(bytes[0])?;
    let split = bytes.len() - DIGEST_LEN;
    let operation = decode_payload(tag, &bytes[1..split])?;
    let digest = Hash::from_slice(&bytes[split..]).ok_or(CodecError::TruncatedProof(bytes.len()))?;
    Ok(Proof { operation, digest })
}
