//! Vote Weight Adapter
//!
//! Implements `VoteWeightLedger` with an in-memory checkpoint table.

use crate::domain::{Address, VotingPowerMove};
use crate::ports::outbound::VoteWeightLedger;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{trace, warn};

/// In-memory vote weights keyed by delegatee.
///
/// The governance layer proper keeps block-numbered checkpoints; only the
/// latest value matters here.
pub struct InMemoryVoteLedger {
    votes: RwLock<HashMap<Address, u64>>,
}

impl InMemoryVoteLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self {
            votes: RwLock::new(HashMap::new()),
        }
    }

    /// Every delegatee with a nonzero weight.
    pub fn snapshot(&self) -> HashMap<Address, u64> {
        self.votes.read().clone()
    }
}

impl Default for InMemoryVoteLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl VoteWeightLedger for InMemoryVoteLedger {
    fn move_voting_power(&self, mv: &VotingPowerMove) {
        if mv.amount == 0 || mv.from == mv.to {
            return;
        }
        trace!(
            "[dao-sync] Moving {} votes {} -> {}",
            mv.amount,
            mv.from,
            mv.to
        );

        let mut votes = self.votes.write();
        if !mv.from.is_zero() {
            let remaining = match votes.get(&mv.from).copied() {
                Some(held) if held >= mv.amount => held - mv.amount,
                held => {
                    warn!(
                        "[dao-sync] Vote underflow for {}: held {:?}, moving {}",
                        mv.from, held, mv.amount
                    );
                    0
                }
            };
            if remaining == 0 {
                votes.remove(&mv.from);
            } else {
                votes.insert(mv.from, remaining);
            }
        }
        if !mv.to.is_zero() {
            *votes.entry(mv.to).or_insert(0) += mv.amount;
        }
    }

    fn get_votes(&self, account: Address) -> u64 {
        self.votes.read().get(&account).copied().unwrap_or(0)
    }

    fn total_votes(&self) -> u64 {
        self.votes.read().values().sum()
    }
}
