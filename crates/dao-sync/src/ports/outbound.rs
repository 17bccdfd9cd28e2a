//! # Outbound Ports
//!
//! What a deployment needs from its surroundings: vote-weight bookkeeping
//! (the governance layer's checkpoints) and somewhere to publish events.

use crate::domain::{Address, VotingPowerMove};
use crate::events::DaoEvent;

/// Vote-weight accounting - outbound port.
pub trait VoteWeightLedger: Send + Sync {
    /// Move `mv.amount` units from `mv.from` to `mv.to`. Zero means uncounted.
    fn move_voting_power(&self, mv: &VotingPowerMove);

    /// Units currently held by `account`.
    fn get_votes(&self, account: Address) -> u64;

    /// Units held across all delegatees.
    fn total_votes(&self) -> u64;
}

/// Event publication - outbound port.
pub trait EventSink: Send + Sync {
    /// Publish an event that has already taken effect.
    fn emit(&self, event: &DaoEvent);
}
