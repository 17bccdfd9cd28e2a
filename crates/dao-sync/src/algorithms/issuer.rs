//! # Proof Issuer
//!
//! HOME-only construction of proofs. Every function takes the destination
//! contract address explicitly; the digest binds the proof to it.
//!
//! Membership and delegation proofs re-read local state. Manifesto and
//! parameter proofs encode whatever value the caller supplies.

use super::codec::{compute_digest, decode_payload};
use crate::config::DaoConfig;
use crate::domain::{
    invariant_home_chain, Address, DaoState, Operation, OperationTag, Proof, SyncError, U256,
};
use tracing::debug;

fn seal(destination: Address, operation: Operation) -> Proof {
    let digest = compute_digest(destination, &operation);
    debug!(
        "[dao-sync] Issued {:?} proof for {} (digest {})",
        operation.tag(),
        destination,
        digest
    );
    Proof { operation, digest }
}

fn ensure_home(config: &DaoConfig) -> Result<(), SyncError> {
    invariant_home_chain(config.chain_id, config.home_chain_id)
}

/// Proof that `item_id` exists with its current owner and URI.
pub fn issue_mint_proof(
    config: &DaoConfig,
    state: &DaoState,
    destination: Address,
    item_id: U256,
) -> Result<Proof, SyncError> {
    ensure_home(config)?;
    let owner = state.ledger.owner_of(item_id)?;
    let metadata_uri = state.ledger.token_uri(item_id)?.to_string();
    Ok(seal(
        destination,
        Operation::Mint {
            item_id,
            owner,
            metadata_uri,
        },
    ))
}

/// Proof that `item_id` was burned.
pub fn issue_burn_proof(
    config: &DaoConfig,
    destination: Address,
    item_id: U256,
) -> Result<Proof, SyncError> {
    ensure_home(config)?;
    Ok(seal(destination, Operation::Burn { item_id }))
}

/// Proof that `item_id` carries `metadata_uri`.
pub fn issue_metadata_proof(
    config: &DaoConfig,
    destination: Address,
    item_id: U256,
    metadata_uri: &str,
) -> Result<Proof, SyncError> {
    ensure_home(config)?;
    Ok(seal(
        destination,
        Operation::SetMetadata {
            item_id,
            metadata_uri: metadata_uri.to_string(),
        },
    ))
}

/// Proof that `delegator` currently delegates to `delegatee`.
pub fn issue_delegation_proof(
    config: &DaoConfig,
    state: &DaoState,
    destination: Address,
    delegator: Address,
    delegatee: Address,
) -> Result<Proof, SyncError> {
    ensure_home(config)?;
    let recorded = state.ledger.delegates(delegator);
    if recorded != delegatee {
        return Err(SyncError::DelegationMismatch {
            delegator,
            recorded,
            requested: delegatee,
        });
    }
    Ok(seal(
        destination,
        Operation::SetDelegation {
            delegator,
            delegatee,
        },
    ))
}

/// Proof for manifesto `text`, as supplied.
pub fn issue_manifesto_proof(
    config: &DaoConfig,
    destination: Address,
    text: &str,
) -> Result<Proof, SyncError> {
    ensure_home(config)?;
    Ok(seal(
        destination,
        Operation::SetManifesto {
            text: text.to_string(),
        },
    ))
}

/// Proof for a governance parameter, `value_bytes` being a 32-byte ABI word.
pub fn issue_parameter_proof(
    config: &DaoConfig,
    destination: Address,
    tag: OperationTag,
    value_bytes: &[u8],
) -> Result<Proof, SyncError> {
    ensure_home(config)?;
    if !tag.is_parameter() {
        return Err(SyncError::NotParameterOperation(tag));
    }
    let operation = decode_payload(tag, value_bytes)?;
    Ok(seal(destination, operation))
}
