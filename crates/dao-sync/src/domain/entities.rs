//! # Domain Entities
//!
//! Operations, proofs and the records they mutate.

use super::errors::CodecError;
use super::value_objects::{Address, Hash, Uint48, U256};
use crate::events::DaoEvent;
use serde::{Deserialize, Serialize};

/// Operation discriminant embedded in every digest.
///
/// The ordinals are part of the wire format. Renumbering a variant silently
/// invalidates every proof issued under the old numbering, so new variants
/// may only be appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OperationTag {
    /// Membership item created.
    Mint = 0,
    /// Membership item destroyed.
    Burn = 1,
    /// Membership item metadata replaced.
    SetMetadata = 2,
    /// Vote delegation changed.
    SetDelegation = 3,
    /// Manifesto text replaced.
    SetManifesto = 4,
    /// Voting delay (uint48) changed.
    UpdateVotingDelay = 5,
    /// Voting period (uint32) changed.
    UpdateVotingPeriod = 6,
    /// Proposal threshold (uint256) changed.
    UpdateProposalThreshold = 7,
    /// Quorum numerator (uint256) changed.
    UpdateQuorumNumerator = 8,
}

impl OperationTag {
    /// Every tag, in ordinal order.
    pub const ALL: [Self; 9] = [
        Self::Mint,
        Self::Burn,
        Self::SetMetadata,
        Self::SetDelegation,
        Self::SetManifesto,
        Self::UpdateVotingDelay,
        Self::UpdateVotingPeriod,
        Self::UpdateProposalThreshold,
        Self::UpdateQuorumNumerator,
    ];

    /// The single byte written into the digest preimage.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Field width for the four governance parameters, `None` otherwise.
    #[must_use]
    pub const fn parameter_bits(self) -> Option<u32> {
        match self {
            Self::UpdateVotingDelay => Some(48),
            Self::UpdateVotingPeriod => Some(32),
            Self::UpdateProposalThreshold | Self::UpdateQuorumNumerator => Some(256),
            _ => None,
        }
    }

    /// True for the four governance parameter tags.
    #[must_use]
    pub const fn is_parameter(self) -> bool {
        self.parameter_bits().is_some()
    }
}

impl TryFrom<u8> for OperationTag {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(CodecError::UnknownTag(value))
    }
}

/// A synchronised mutation, one variant per tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Item `item_id` exists and belongs to `owner`.
    Mint {
        /// Item id
        item_id: U256,
        /// Owner on HOME
        owner: Address,
        /// Metadata URI on HOME
        metadata_uri: String,
    },
    /// Item `item_id` no longer exists.
    Burn {
        /// Item id
        item_id: U256,
    },
    /// Item `item_id` has new metadata.
    SetMetadata {
        /// Item id
        item_id: U256,
        /// New metadata URI
        metadata_uri: String,
    },
    /// `delegator` delegates to `delegatee`.
    SetDelegation {
        /// Delegating account
        delegator: Address,
        /// New delegatee
        delegatee: Address,
    },
    /// Manifesto replaced.
    SetManifesto {
        /// New manifesto text
        text: String,
    },
    /// Voting delay changed.
    UpdateVotingDelay {
        /// New delay
        value: Uint48,
    },
    /// Voting period changed.
    UpdateVotingPeriod {
        /// New period
        value: u32,
    },
    /// Proposal threshold changed.
    UpdateProposalThreshold {
        /// New threshold
        value: U256,
    },
    /// Quorum numerator changed.
    UpdateQuorumNumerator {
        /// New numerator
        value: U256,
    },
}

impl Operation {
    /// Discriminant of this operation.
    #[must_use]
    pub fn tag(&self) -> OperationTag {
        match self {
            Self::Mint { .. } => OperationTag::Mint,
            Self::Burn { .. } => OperationTag::Burn,
            Self::SetMetadata { .. } => OperationTag::SetMetadata,
            Self::SetDelegation { .. } => OperationTag::SetDelegation,
            Self::SetManifesto { .. } => OperationTag::SetManifesto,
            Self::UpdateVotingDelay { .. } => OperationTag::UpdateVotingDelay,
            Self::UpdateVotingPeriod { .. } => OperationTag::UpdateVotingPeriod,
            Self::UpdateProposalThreshold { .. } => OperationTag::UpdateProposalThreshold,
            Self::UpdateQuorumNumerator { .. } => OperationTag::UpdateQuorumNumerator,
        }
    }
}

/// A self-verifying statement that `operation` happened on HOME.
///
/// The destination address is not carried: the verifying contract supplies
/// its own address when it recomputes the digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Operation fields.
    pub operation: Operation,
    /// `personal_hash(keccak(destination ‖ tag ‖ payload))`.
    pub digest: Hash,
}

impl Proof {
    /// Discriminant of the carried operation.
    #[must_use]
    pub fn tag(&self) -> OperationTag {
        self.operation.tag()
    }

    /// JSON relay format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the JSON relay format.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Binary relay format: `tag ‖ payload ‖ digest`.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        crate::algorithms::codec::encode_proof(self)
    }

    /// Parse the binary relay format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        crate::algorithms::codec::decode_proof(bytes)
    }
}

/// A soulbound membership item as seen on one chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipItem {
    /// Item id (HOME counter value).
    pub item_id: U256,
    /// Current owner, zero when absent.
    pub owner: Address,
    /// Metadata URI.
    pub metadata_uri: String,
    /// Whether this chain tracks the item as present.
    pub exists_on_this_chain: bool,
}

/// One live delegation per delegator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationRecord {
    /// Delegating account.
    pub delegator: Address,
    /// Current delegatee.
    pub delegatee: Address,
}

/// Ownership change produced by the ledger's guarded primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    /// Item id.
    pub item_id: U256,
    /// Previous owner, zero for a mint.
    pub from: Address,
    /// New owner, zero for a burn.
    pub to: Address,
}

impl Transfer {
    /// Neither side is an owner.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from.is_zero() && self.to.is_zero()
    }
}

/// Voting units moved between delegatees. Zero means "uncounted".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VotingPowerMove {
    /// Delegatee losing units.
    pub from: Address,
    /// Delegatee gaining units.
    pub to: Address,
    /// Units moved.
    pub amount: u64,
}

/// Side effects of a successful mutation, applied by the service afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateTransition {
    /// Domain events to publish.
    pub events: Vec<DaoEvent>,
    /// Voting power to move.
    pub vote_moves: Vec<VotingPowerMove>,
}

impl StateTransition {
    /// Transition carrying a single event.
    #[must_use]
    pub fn event(event: DaoEvent) -> Self {
        Self {
            events: vec![event],
            vote_moves: Vec::new(),
        }
    }

    /// Add a voting power move, skipping empty ones.
    #[must_use]
    pub fn with_move(mut self, mv: VotingPowerMove) -> Self {
        if mv.amount > 0 && mv.from != mv.to {
            self.vote_moves.push(mv);
        }
        self
    }
}
