//! # Membership Ledger
//!
//! Chain-local membership state: soulbound items, their metadata, the
//! per-item "exists on this chain" flag, and delegation records.
//!
//! Ownership only ever changes through [`MembershipLedger::update`], the single
//! guarded primitive that rejects owner-to-owner moves.

use super::entities::{DelegationRecord, MembershipItem, Transfer, VotingPowerMove};
use super::errors::SyncError;
use super::invariants::invariant_non_transferable;
use super::value_objects::{Address, U256};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Membership state of one deployment.
#[derive(Clone, Debug, Default)]
pub struct MembershipLedger {
    owners: BTreeMap<U256, Address>,
    metadata: BTreeMap<U256, String>,
    exists_on_chain: BTreeSet<U256>,
    balances: HashMap<Address, u64>,
    delegations: HashMap<Address, Address>,
    next_item_id: U256,
    total_supply: u64,
}

impl MembershipLedger {
    /// Empty ledger; the HOME counter starts at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Current owner, or `ItemNotFound`.
    pub fn owner_of(&self, item_id: U256) -> Result<Address, SyncError> {
        self.owners
            .get(&item_id)
            .copied()
            .ok_or(SyncError::ItemNotFound(item_id))
    }

    /// Current owner, zero when absent.
    pub fn owner_or_zero(&self, item_id: U256) -> Address {
        self.owners.get(&item_id).copied().unwrap_or(Address::ZERO)
    }

    /// Metadata URI of an owned item.
    pub fn token_uri(&self, item_id: U256) -> Result<&str, SyncError> {
        self.owner_of(item_id)?;
        Ok(self.metadata.get(&item_id).map_or("", String::as_str))
    }

    /// Stored metadata regardless of ownership.
    pub fn raw_metadata(&self, item_id: U256) -> Option<&str> {
        self.metadata.get(&item_id).map(String::as_str)
    }

    /// Number of items owned by `owner`.
    pub fn balance_of(&self, owner: Address) -> u64 {
        self.balances.get(&owner).copied().unwrap_or(0)
    }

    /// Number of owned items on this chain.
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Whether this chain tracks the item as present.
    pub fn exists_on_chain(&self, item_id: U256) -> bool {
        self.exists_on_chain.contains(&item_id)
    }

    /// Current delegatee of `account`, zero if none.
    pub fn delegates(&self, account: Address) -> Address {
        self.delegations
            .get(&account)
            .copied()
            .unwrap_or(Address::ZERO)
    }

    /// Delegation record of `account`, if any.
    pub fn delegation(&self, account: Address) -> Option<DelegationRecord> {
        self.delegations
            .get(&account)
            .map(|delegatee| DelegationRecord {
                delegator: account,
                delegatee: *delegatee,
            })
    }

    /// Next id the HOME counter would hand out (before skipping owned ids).
    pub fn next_item_id(&self) -> U256 {
        self.next_item_id
    }

    /// Snapshot of everything known about an item.
    pub fn item(&self, item_id: U256) -> Option<MembershipItem> {
        let owner = self.owner_or_zero(item_id);
        let exists = self.exists_on_chain(item_id);
        let metadata = self.metadata.get(&item_id);
        if owner.is_zero() && !exists && metadata.is_none() {
            return None;
        }
        Some(MembershipItem {
            item_id,
            owner,
            metadata_uri: metadata.cloned().unwrap_or_default(),
            exists_on_this_chain: exists,
        })
    }

    /// Owned items, ascending by id.
    pub fn items(&self) -> impl Iterator<Item = (U256, Address)> + '_ {
        self.owners.iter().map(|(id, owner)| (*id, *owner))
    }

    /// Ids with the presence flag set, ascending. Includes unowned ids
    /// marked present by a metadata claim.
    pub fn present_items(&self) -> impl Iterator<Item = U256> + '_ {
        self.exists_on_chain.iter().copied()
    }

    /// Stored metadata for every tracked id, owned or not, ascending by id.
    pub fn metadata_entries(&self) -> impl Iterator<Item = (U256, &str)> + '_ {
        self.metadata.iter().map(|(id, uri)| (*id, uri.as_str()))
    }

    /// Live delegation records, in no particular order.
    pub fn delegations(&self) -> impl Iterator<Item = DelegationRecord> + '_ {
        self.delegations
            .iter()
            .map(|(delegator, delegatee)| DelegationRecord {
                delegator: *delegator,
                delegatee: *delegatee,
            })
    }

    // =========================================================================
    // GUARDED PRIMITIVE
    // =========================================================================

    /// Move `item_id` to `to` (zero burns).
    ///
    /// Fails when both the current owner and `to` are nonzero. Moving an
    /// absent item to zero is a no-op.
    pub fn update(&mut self, item_id: U256, to: Address) -> Result<Transfer, SyncError> {
        let from = self.owner_or_zero(item_id);
        invariant_non_transferable(item_id, from, to)?;

        let transfer = Transfer { item_id, from, to };
        if transfer.is_noop() {
            return Ok(transfer);
        }

        if !from.is_zero() {
            self.owners.remove(&item_id);
            if let Some(balance) = self.balances.get_mut(&from) {
                *balance = balance.saturating_sub(1);
                if *balance == 0 {
                    self.balances.remove(&from);
                }
            }
            self.total_supply = self.total_supply.saturating_sub(1);
        }

        if !to.is_zero() {
            self.owners.insert(item_id, to);
            *self.balances.entry(to).or_insert(0) += 1;
            self.total_supply += 1;
        }

        Ok(transfer)
    }

    /// Voting units implied by an ownership change.
    pub fn vote_move_for(&self, transfer: &Transfer) -> VotingPowerMove {
        VotingPowerMove {
            from: self.vote_holder(transfer.from),
            to: self.vote_holder(transfer.to),
            amount: u64::from(!transfer.is_noop()),
        }
    }

    /// Voting units implied by a delegation change.
    pub fn delegation_move(
        &self,
        delegator: Address,
        previous: Address,
        delegatee: Address,
    ) -> VotingPowerMove {
        VotingPowerMove {
            from: previous,
            to: delegatee,
            amount: self.balance_of(delegator),
        }
    }

    // The zero side of a mint or burn never holds votes.
    fn vote_holder(&self, owner: Address) -> Address {
        if owner.is_zero() {
            Address::ZERO
        } else {
            self.delegates(owner)
        }
    }

    // =========================================================================
    // COMPOSITE MUTATIONS
    // =========================================================================

    /// Create an item and mark it present.
    pub fn mint(
        &mut self,
        item_id: U256,
        owner: Address,
        metadata_uri: &str,
    ) -> Result<Transfer, SyncError> {
        if owner.is_zero() {
            return Err(SyncError::InvalidOwner(owner));
        }
        let transfer = self.update(item_id, owner)?;
        self.metadata.insert(item_id, metadata_uri.to_string());
        self.exists_on_chain.insert(item_id);
        Ok(transfer)
    }

    /// Destroy an item (if present) and mark it absent.
    pub fn burn(&mut self, item_id: U256) -> Result<Transfer, SyncError> {
        let transfer = self.update(item_id, Address::ZERO)?;
        self.metadata.remove(&item_id);
        self.exists_on_chain.remove(&item_id);
        Ok(transfer)
    }

    /// Replace metadata; returns the previous URI.
    pub fn set_metadata_uri(&mut self, item_id: U256, metadata_uri: &str) -> Option<String> {
        self.metadata.insert(item_id, metadata_uri.to_string())
    }

    /// Set or clear the presence flag.
    pub fn set_exists_on_chain(&mut self, item_id: U256, exists: bool) {
        if exists {
            self.exists_on_chain.insert(item_id);
        } else {
            self.exists_on_chain.remove(&item_id);
        }
    }

    /// Record a delegation (last write wins); returns the previous delegatee.
    pub fn set_delegate(&mut self, delegator: Address, delegatee: Address) -> Address {
        let previous = self.delegates(delegator);
        if delegatee.is_zero() {
            self.delegations.remove(&delegator);
        } else {
            self.delegations.insert(delegator, delegatee);
        }
        previous
    }

    /// Hand out the next HOME item id, skipping ids already owned locally.
    pub fn allocate_item_id(&mut self) -> U256 {
        while self.owners.contains_key(&self.next_item_id) {
            self.next_item_id = self.next_item_id.saturating_add(U256::one());
        }
        let id = self.next_item_id;
        self.next_item_id = self.next_item_id.saturating_add(U256::one());
        id
    }
}
