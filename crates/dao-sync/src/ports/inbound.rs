//! # Inbound Ports
//!
//! What a deployment exposes: proof issuance and claims to relayers, direct
//! setters to the governance executor, and membership views.
//!
//! All mutating calls take `&mut self`; one deployment executes one call at a
//! time.

use crate::domain::{
    Address, GovernanceParameters, MembershipItem, OperationTag, Proof, SyncError, Uint48, U256,
};

/// Proof issuance (HOME only).
pub trait ProofIssuerApi {
    /// Proof of an item's current owner and URI.
    fn issue_mint_proof(&self, destination: Address, item_id: U256) -> Result<Proof, SyncError>;

    /// Proof of a burn.
    fn issue_burn_proof(&self, destination: Address, item_id: U256) -> Result<Proof, SyncError>;

    /// Proof of a metadata change.
    fn issue_metadata_proof(
        &self,
        destination: Address,
        item_id: U256,
        metadata_uri: &str,
    ) -> Result<Proof, SyncError>;

    /// Proof of the currently recorded delegation.
    fn issue_delegation_proof(
        &self,
        destination: Address,
        delegator: Address,
        delegatee: Address,
    ) -> Result<Proof, SyncError>;

    /// Proof of a manifesto value.
    fn issue_manifesto_proof(&self, destination: Address, text: &str) -> Result<Proof, SyncError>;

    /// Proof of a governance parameter value.
    fn issue_parameter_proof(
        &self,
        destination: Address,
        tag: OperationTag,
        value_bytes: &[u8],
    ) -> Result<Proof, SyncError>;
}

/// Claim application (any chain).
pub trait ClaimApi {
    /// Apply any proof.
    fn claim(&mut self, proof: &Proof) -> Result<(), SyncError>;

    /// Apply a mint proof.
    fn claim_mint(&mut self, proof: &Proof) -> Result<(), SyncError>;

    /// Apply a burn proof.
    fn claim_burn(&mut self, proof: &Proof) -> Result<(), SyncError>;

    /// Apply a metadata proof.
    fn claim_metadata_update(&mut self, proof: &Proof) -> Result<(), SyncError>;

    /// Apply a delegation proof.
    fn claim_delegation(&mut self, proof: &Proof) -> Result<(), SyncError>;

    /// Apply a manifesto proof.
    fn claim_manifesto_update(&mut self, proof: &Proof) -> Result<(), SyncError>;

    /// Apply a parameter proof.
    fn claim_parameter_update(&mut self, proof: &Proof) -> Result<(), SyncError>;
}

/// Direct governance setters (HOME only, governance executor only).
pub trait GovernanceApi {
    /// Replace the manifesto.
    fn set_manifesto(&mut self, caller: Address, text: &str) -> Result<(), SyncError>;

    /// Replace the voting delay.
    fn set_voting_delay(&mut self, caller: Address, value: Uint48) -> Result<(), SyncError>;

    /// Replace the voting period.
    fn set_voting_period(&mut self, caller: Address, value: u32) -> Result<(), SyncError>;

    /// Replace the proposal threshold.
    fn set_proposal_threshold(&mut self, caller: Address, value: U256) -> Result<(), SyncError>;

    /// Replace the quorum numerator.
    fn update_quorum_numerator(&mut self, caller: Address, value: U256) -> Result<(), SyncError>;

    /// Current parameters.
    fn parameters(&self) -> &GovernanceParameters;
}

/// Membership mutations (HOME only) and views (any chain).
pub trait MembershipApi {
    /// Mint the next item to `to` (executor only).
    fn mint(&mut self, caller: Address, to: Address, metadata_uri: &str) -> Result<U256, SyncError>;

    /// Burn an item (executor only).
    fn burn(&mut self, caller: Address, item_id: U256) -> Result<(), SyncError>;

    /// Replace an item's URI (executor only).
    fn set_metadata(
        &mut self,
        caller: Address,
        item_id: U256,
        metadata_uri: &str,
    ) -> Result<(), SyncError>;

    /// Delegate the caller's votes.
    fn delegate(&mut self, caller: Address, delegatee: Address) -> Result<(), SyncError>;

    /// Current owner.
    fn owner_of(&self, item_id: U256) -> Result<Address, SyncError>;

    /// Metadata URI of an owned item.
    fn token_uri(&self, item_id: U256) -> Result<String, SyncError>;

    /// Items owned by `owner`.
    fn balance_of(&self, owner: Address) -> u64;

    /// Owned items on this chain.
    fn total_supply(&self) -> u64;

    /// Whether this chain tracks the item as present.
    fn exists_on_chain(&self, item_id: U256) -> bool;

    /// Current delegatee of `account`.
    fn delegates(&self, account: Address) -> Address;

    /// Snapshot of an item.
    fn item(&self, item_id: U256) -> Option<MembershipItem>;

    /// Voting units held by `account`.
    fn get_votes(&self, account: Address) -> u64;
}
