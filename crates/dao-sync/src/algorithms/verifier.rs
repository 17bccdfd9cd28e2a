//! # Proof Verifier / Claim Applier
//!
//! The only path through which a proof mutates local state. Each claim
//! recomputes the digest against this deployment's own address and applies
//! the operation only on an exact match.
//!
//! Idempotence differs per claim type:
//!
//! | Claim | Already applied | Never seen |
//! |-------|-----------------|------------|
//! | mint | `AlreadyExists` | creates the item |
//! | burn | no-op | no-op, flag stays false |
//! | metadata | overwrites | sets the URI and marks the item present |
//! | delegation, manifesto, parameters | same value again | last applied wins |

use super::codec::compute_digest;
use crate::domain::{
    invariant_digest_matches, Address, DaoState, GovernanceParameters, Operation, OperationTag,
    Proof, StateTransition, SyncError,
};
use crate::events::{ChangeOrigin, DaoEvent};

/// Whether `proof` was issued for `self_address`.
pub fn verify(self_address: Address, proof: &Proof) -> bool {
    let expected = compute_digest(self_address, &proof.operation);
    invariant_digest_matches(&expected, &proof.digest)
}

fn check(self_address: Address, proof: &Proof) -> Result<(), SyncError> {
    if !verify(self_address, proof) {
        return Err(SyncError::InvalidProof);
    }
    Ok(())
}

fn unexpected(expected: &'static str, proof: &Proof) -> SyncError {
    SyncError::UnexpectedOperation {
        expected,
        found: proof.tag(),
    }
}

/// Apply any proof, dispatching on its operation.
pub fn claim(
    state: &mut DaoState,
    self_address: Address,
    proof: &Proof,
) -> Result<StateTransition, SyncError> {
    match proof.operation {
        Operation::Mint { .. } => claim_mint(state, self_address, proof),
        Operation::Burn { .. } => claim_burn(state, self_address, proof),
        Operation::SetMetadata { .. } => claim_metadata_update(state, self_address, proof),
        Operation::SetDelegation { .. } => claim_delegation(state, self_address, proof),
        Operation::SetManifesto { .. } => claim_manifesto_update(state, self_address, proof),
        Operation::UpdateVotingDelay { .. }
        | Operation::UpdateVotingPeriod { .. }
        | Operation::UpdateProposalThreshold { .. }
        | Operation::UpdateQuorumNumerator { .. } => {
            claim_parameter_update(state, self_address, proof)
        }
    }
}

/// Create an item from a mint proof. A second application fails.
pub fn claim_mint(
    state: &mut DaoState,
    self_address: Address,
    proof: &Proof,
) -> Result<StateTransition, SyncError> {
    let Operation::Mint {
        item_id,
        owner,
        metadata_uri,
    } = &proof.operation
    else {
        return Err(unexpected("mint", proof));
    };

    if state.ledger.exists_on_chain(*item_id) {
        return Err(SyncError::AlreadyExists(*item_id));
    }
    check(self_address, proof)?;

    let transfer = state.ledger.mint(*item_id, *owner, metadata_uri)?;
    let mv = state.ledger.vote_move_for(&transfer);
    Ok(StateTransition::event(DaoEvent::MembershipClaimed {
        item_id: *item_id,
        owner: *owner,
        metadata_uri: metadata_uri.clone(),
    })
    .with_move(mv))
}

/// Remove an item from a burn proof. Absent items are not an error.
pub fn claim_burn(
    state: &mut DaoState,
    self_address: Address,
    proof: &Proof,
) -> Result<StateTransition, SyncError> {
    let Operation::Burn { item_id } = &proof.operation else {
        return Err(unexpected("burn", proof));
    };
    check(self_address, proof)?;

    let transfer = state.ledger.burn(*item_id)?;
    let mv = state.ledger.vote_move_for(&transfer);
    Ok(StateTransition::event(DaoEvent::BurnClaimed {
        item_id: *item_id,
        previous_owner: transfer.from,
    })
    .with_move(mv))
}

/// Replace an item's URI and mark it present on this chain.
pub fn claim_metadata_update(
    state: &mut DaoState,
    self_address: Address,
    proof: &Proof,
) -> Result<StateTransition, SyncError> {
    let Operation::SetMetadata {
        item_id,
        metadata_uri,
    } = &proof.operation
    else {
        return Err(unexpected("metadata update", proof));
    };
    check(self_address, proof)?;

    state.ledger.set_metadata_uri(*item_id, metadata_uri);
    state.ledger.set_exists_on_chain(*item_id, true);
    Ok(StateTransition::event(DaoEvent::MetadataClaimed {
        item_id: *item_id,
        metadata_uri: metadata_uri.clone(),
    }))
}

/// Record a delegation and move the delegator's votes.
pub fn claim_delegation(
    state: &mut DaoState,
    self_address: Address,
    proof: &Proof,
) -> Result<StateTransition, SyncError> {
    let Operation::SetDelegation {
        delegator,
        delegatee,
    } = &proof.operation
    else {
        return Err(unexpected("delegation", proof));
    };
    check(self_address, proof)?;

    let previous = state.ledger.set_delegate(*delegator, *delegatee);
    let mv = state.ledger.delegation_move(*delegator, previous, *delegatee);
    Ok(StateTransition::event(DaoEvent::DelegationUpdated {
        delegator: *delegator,
        previous_delegatee: previous,
        delegatee: *delegatee,
        origin: ChangeOrigin::Claim,
    })
    .with_move(mv))
}

/// Replace the manifesto.
pub fn claim_manifesto_update(
    state: &mut DaoState,
    self_address: Address,
    proof: &Proof,
) -> Result<StateTransition, SyncError> {
    let Operation::SetManifesto { text } = &proof.operation else {
        return Err(unexpected("manifesto update", proof));
    };
    check(self_address, proof)?;

    let old = state.params.set_manifesto(text.clone());
    Ok(StateTransition::event(DaoEvent::ManifestoUpdated {
        old,
        new: text.clone(),
        origin: ChangeOrigin::Claim,
    }))
}

/// Replace one of the four governance parameters.
pub fn claim_parameter_update(
    state: &mut DaoState,
    self_address: Address,
    proof: &Proof,
) -> Result<StateTransition, SyncError> {
    if !proof.tag().is_parameter() {
        return Err(unexpected("parameter update", proof));
    }
    if !verify(self_address, proof) {
        return Err(SyncError::InvalidParameterProof);
    }

    let event = apply_parameter(&mut state.params, &proof.operation, ChangeOrigin::Claim)?;
    Ok(StateTransition::event(event))
}

/// Write a parameter operation into the store.
///
/// Shared by claims and the direct governance setters, so both paths hit the
/// same range rules. Fails without touching the store.
pub fn apply_parameter(
    params: &mut GovernanceParameters,
    operation: &Operation,
    origin: ChangeOrigin,
) -> Result<DaoEvent, SyncError> {
    let event = match operation {
        Operation::UpdateVotingDelay { value } => DaoEvent::VotingDelaySet {
            old: params.set_voting_delay(*value),
            new: *value,
            origin,
        },
        Operation::UpdateVotingPeriod { value } => DaoEvent::VotingPeriodSet {
            old: params.set_voting_period(*value)?,
            new: *value,
            origin,
        },
        Operation::UpdateProposalThreshold { value } => DaoEvent::ProposalThresholdSet {
            old: params.set_proposal_threshold(*value),
            new: *value,
            origin,
        },
        Operation::UpdateQuorumNumerator { value } => DaoEvent::QuorumNumeratorUpdated {
            old: params.set_quorum_numerator(*value)?,
            new: *value,
            origin,
        },
        other => return Err(SyncError::NotParameterOperation(other.tag())),
    };
    Ok(event)
}

/// Tag a claim path accepts, for logging.
pub fn claim_kind(tag: OperationTag) -> &'static str {
    match tag {
        OperationTag::Mint => "mint",
        OperationTag::Burn => "burn",
        OperationTag::SetMetadata => "metadata",
        OperationTag::SetDelegation => "delegation",
        OperationTag::SetManifesto => "manifesto",
        OperationTag::UpdateVotingDelay
        | OperationTag::UpdateVotingPeriod
        | OperationTag::UpdateProposalThreshold
        | OperationTag::UpdateQuorumNumerator => "parameter",
    }
}
