//! # Direct Membership Mutations
//!
//! HOME-side mint, burn, metadata and delegation. Chain and role checks are
//! done by the caller; these functions validate arguments, mutate, and
//! describe the side effects.

use crate::domain::{Address, DaoState, StateTransition, SyncError, U256};
use crate::events::{ChangeOrigin, DaoEvent};

/// Mint the next item to `to`. Returns the new id.
pub fn mint(
    state: &mut DaoState,
    to: Address,
    metadata_uri: &str,
) -> Result<(U256, StateTransition), SyncError> {
    if to.is_zero() {
        return Err(SyncError::InvalidOwner(to));
    }
    let item_id = state.ledger.allocate_item_id();
    let transfer = state.ledger.mint(item_id, to, metadata_uri)?;
    let mv = state.ledger.vote_move_for(&transfer);
    let transition = StateTransition::event(DaoEvent::MembershipMinted {
        item_id,
        owner: to,
        metadata_uri: metadata_uri.to_string(),
    })
    .with_move(mv);
    Ok((item_id, transition))
}

/// Burn an owned item.
pub fn burn(state: &mut DaoState, item_id: U256) -> Result<StateTransition, SyncError> {
    state.ledger.owner_of(item_id)?;
    let transfer = state.ledger.burn(item_id)?;
    let mv = state.ledger.vote_move_for(&transfer);
    Ok(StateTransition::event(DaoEvent::MembershipBurned {
        item_id,
        previous_owner: transfer.from,
    })
    .with_move(mv))
}

/// Replace the URI of an owned item.
pub fn set_metadata(
    state: &mut DaoState,
    item_id: U256,
    metadata_uri: &str,
) -> Result<StateTransition, SyncError> {
    state.ledger.owner_of(item_id)?;
    state.ledger.set_metadata_uri(item_id, metadata_uri);
    Ok(StateTransition::event(DaoEvent::MetadataUpdated {
        item_id,
        metadata_uri: metadata_uri.to_string(),
    }))
}

/// Point `delegator`'s votes at `delegatee`.
pub fn delegate(state: &mut DaoState, delegator: Address, delegatee: Address) -> StateTransition {
    let previous = state.ledger.set_delegate(delegator, delegatee);
    let mv = state.ledger.delegation_move(delegator, previous, delegatee);
    StateTransition::event(DaoEvent::DelegationUpdated {
        delegator,
        previous_delegatee: previous,
        delegatee,
        origin: ChangeOrigin::Direct,
    })
    .with_move(mv)
}
