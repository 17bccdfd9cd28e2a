//! # Domain Invariants
//!
//! Business rules enforced by every entry point. Each check runs before any
//! state is touched, so a failure never leaves a partial mutation behind.

use super::errors::SyncError;
use super::value_objects::{Address, ChainId, Hash, U256};

/// Fixed quorum denominator (quorum = numerator / 100 of total supply).
pub const QUORUM_DENOMINATOR: u64 = 100;

/// Invariant: HOME-only entry points run on HOME.
pub fn invariant_home_chain(chain_id: ChainId, home_chain_id: ChainId) -> Result<(), SyncError> {
    if chain_id != home_chain_id {
        return Err(SyncError::WrongChain {
            home: home_chain_id,
            actual: chain_id,
        });
    }
    Ok(())
}

/// Invariant: direct governance mutations come from the executor.
pub fn invariant_governance_executor(caller: Address, executor: Address) -> Result<(), SyncError> {
    if caller != executor {
        return Err(SyncError::Unauthorized(caller));
    }
    Ok(())
}

/// Invariant: soulbound items never move owner to owner.
///
/// Mint (`from == 0`) and burn (`to == 0`) are the only legal transitions.
pub fn invariant_non_transferable(
    item_id: U256,
    from: Address,
    to: Address,
) -> Result<(), SyncError> {
    if !from.is_zero() && !to.is_zero() {
        return Err(SyncError::NonTransferable { item_id, from, to });
    }
    Ok(())
}

/// Invariant: recomputed digest equals the carried digest.
///
/// Compares every byte; the position of a mismatch is not observable.
pub fn invariant_digest_matches(expected: &Hash, carried: &Hash) -> bool {
    expected
        .as_bytes()
        .iter()
        .zip(carried.as_bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Invariant: voting period is nonzero.
pub fn invariant_voting_period(period: u32) -> Result<(), SyncError> {
    if period == 0 {
        return Err(SyncError::InvalidVotingPeriod(period));
    }
    Ok(())
}

/// Invariant: quorum numerator does not exceed the denominator.
pub fn invariant_quorum_fraction(numerator: U256) -> Result<(), SyncError> {
    let denominator = U256::from(QUORUM_DENOMINATOR);
    if numerator > denominator {
        return Err(SyncError::QuorumNumeratorTooLarge {
            numerator,
            denominator,
        });
    }
    Ok(())
}
