//! # Domain Events
//!
//! Everything a deployment announces after a successful mutation. Direct
//! HOME mutations and applied claims both emit events; the `origin` field
//! tells them apart where both paths exist.
//!
//! Events are published only after the state change committed. A failed call
//! publishes nothing.

use crate::domain::value_objects::{Address, Uint48, U256};
use serde::{Deserialize, Serialize};

/// Which entry point produced a change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeOrigin {
    /// Governance executor (or member, for delegation) on HOME.
    Direct,
    /// Verified proof.
    Claim,
}

/// Domain events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DaoEvent {
    /// HOME minted a new item.
    MembershipMinted {
        /// Item id
        item_id: U256,
        /// Owner
        owner: Address,
        /// Metadata URI
        metadata_uri: String,
    },
    /// HOME burned an item.
    MembershipBurned {
        /// Item id
        item_id: U256,
        /// Owner before the burn
        previous_owner: Address,
    },
    /// HOME replaced an item's metadata.
    MetadataUpdated {
        /// Item id
        item_id: U256,
        /// New URI
        metadata_uri: String,
    },
    /// A mint proof was applied.
    MembershipClaimed {
        /// Item id
        item_id: U256,
        /// Owner
        owner: Address,
        /// Metadata URI
        metadata_uri: String,
    },
    /// A burn proof was applied.
    BurnClaimed {
        /// Item id
        item_id: U256,
        /// Owner before the burn, zero if the item was never seen here
        previous_owner: Address,
    },
    /// A metadata proof was applied.
    MetadataClaimed {
        /// Item id
        item_id: U256,
        /// New URI
        metadata_uri: String,
    },
    /// A delegation changed.
    DelegationUpdated {
        /// Delegating account
        delegator: Address,
        /// Previous delegatee, zero if none
        previous_delegatee: Address,
        /// New delegatee
        delegatee: Address,
        /// Entry point
        origin: ChangeOrigin,
    },
    /// Manifesto replaced.
    ManifestoUpdated {
        /// Previous text
        old: String,
        /// New text
        new: String,
        /// Entry point
        origin: ChangeOrigin,
    },
    /// Voting delay replaced.
    VotingDelaySet {
        /// Previous value
        old: Uint48,
        /// New value
        new: Uint48,
        /// Entry point
        origin: ChangeOrigin,
    },
    /// Voting period replaced.
    VotingPeriodSet {
        /// Previous value
        old: u32,
        /// New value
        new: u32,
        /// Entry point
        origin: ChangeOrigin,
    },
    /// Proposal threshold replaced.
    ProposalThresholdSet {
        /// Previous value
        old: U256,
        /// New value
        new: U256,
        /// Entry point
        origin: ChangeOrigin,
    },
    /// Quorum numerator replaced.
    QuorumNumeratorUpdated {
        /// Previous value
        old: U256,
        /// New value
        new: U256,
        /// Entry point
        origin: ChangeOrigin,
    },
}

impl DaoEvent {
    /// Topic this event is published under.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::MembershipMinted { .. }
            | Self::MembershipBurned { .. }
            | Self::MetadataUpdated { .. } => topics::MEMBERSHIP,
            Self::MembershipClaimed { .. }
            | Self::BurnClaimed { .. }
            | Self::MetadataClaimed { .. } => topics::MEMBERSHIP_CLAIMS,
            Self::DelegationUpdated { .. } => topics::DELEGATION,
            Self::ManifestoUpdated { .. } => topics::MANIFESTO,
            Self::VotingDelaySet { .. }
            | Self::VotingPeriodSet { .. }
            | Self::ProposalThresholdSet { .. }
            | Self::QuorumNumeratorUpdated { .. } => topics::PARAMETERS,
        }
    }

    /// Whether the event was produced by applying a proof.
    #[must_use]
    pub fn is_claim(&self) -> bool {
        match self {
            Self::MembershipClaimed { .. }
            | Self::BurnClaimed { .. }
            | Self::MetadataClaimed { .. } => true,
            Self::MembershipMinted { .. }
            | Self::MembershipBurned { .. }
            | Self::MetadataUpdated { .. } => false,
            Self::DelegationUpdated { origin, .. }
            | Self::ManifestoUpdated { origin, .. }
            | Self::VotingDelaySet { origin, .. }
            | Self::VotingPeriodSet { origin, .. }
            | Self::ProposalThresholdSet { origin, .. }
            | Self::QuorumNumeratorUpdated { origin, .. } => *origin == ChangeOrigin::Claim,
        }
    }
}

/// Event topics.
pub mod topics {
    /// Direct membership changes on HOME.
    pub const MEMBERSHIP: &str = "dao.membership";

    /// Membership changes applied from proofs.
    pub const MEMBERSHIP_CLAIMS: &str = "dao.membership.claims";

    /// Delegation changes.
    pub const DELEGATION: &str = "dao.delegation";

    /// Manifesto changes.
    pub const MANIFESTO: &str = "dao.manifesto";

    /// Governance parameter changes.
    pub const PARAMETERS: &str = "dao.parameters";
}
