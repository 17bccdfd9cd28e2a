//! # Domain Errors
//!
//! Error types for proof issuance, claim application and direct governance
//! mutations. Every error is a hard failure: the call that returned it left
//! local state exactly as it found it.

use super::entities::OperationTag;
use super::value_objects::{Address, ChainId, U256};
use thiserror::Error;

/// Coarse error taxonomy shared with relayers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// HOME-only entry point invoked on a FOREIGN deployment.
    WrongChain,
    /// Recomputed digest differs from the carried one.
    DigestMismatch,
    /// Mint claim for an item already present on this chain.
    AlreadyApplied,
    /// Referenced item or delegation does not exist.
    NotFound,
    /// Caller lacks the governance-executor role.
    Unauthorized,
    /// Arguments or payload rejected before any state change.
    InvalidInput,
}

/// Errors from the message codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Tag ordinal not assigned to any operation.
    #[error("Unknown operation tag: {0}")]
    UnknownTag(u8),

    /// Payload length impossible for the tag.
    #[error("Invalid payload length for {tag:?}: expected {expected}, got {actual}")]
    PayloadLength {
        /// Operation tag
        tag: OperationTag,
        /// Expected length (minimum for variable-length payloads)
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Text field is not UTF-8.
    #[error("Payload text is not valid UTF-8")]
    InvalidUtf8,

    /// Parameter word does not fit the tag's width.
    #[error("Value overflows {bits}-bit field for {tag:?}")]
    ValueOverflow {
        /// Operation tag
        tag: OperationTag,
        /// Field width in bits
        bits: u32,
    },

    /// Binary proof shorter than tag + digest.
    #[error("Truncated proof: {0} bytes")]
    TruncatedProof(usize),
}

/// Cross-chain synchronisation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// HOME-only operation invoked elsewhere.
    #[error("Not home chain: home={home}, this={actual}")]
    WrongChain {
        /// The DAO's home chain
        home: ChainId,
        /// Chain of this deployment
        actual: ChainId,
    },

    /// Digest mismatch on a membership, delegation or manifesto claim.
    #[error("Invalid proof")]
    InvalidProof,

    /// Digest mismatch on a parameter claim.
    #[error("Invalid parameter proof")]
    InvalidParameterProof,

    /// Mint claim for an item already tracked on this chain.
    #[error("Item already exists: {0}")]
    AlreadyExists(U256),

    /// Item has no current owner.
    #[error("Item not found: {0}")]
    ItemNotFound(U256),

    /// Requested delegatee differs from the recorded one.
    #[error("Delegation mismatch for {delegator}: recorded={recorded}, requested={requested}")]
    DelegationMismatch {
        /// Delegating account
        delegator: Address,
        /// Delegatee currently on record
        recorded: Address,
        /// Delegatee the proof was requested for
        requested: Address,
    },

    /// Caller is not the governance executor.
    #[error("Unauthorized caller: {0}")]
    Unauthorized(Address),

    /// Owner-to-owner move of a soulbound item.
    #[error("Item {item_id} is non-transferable: {from} -> {to}")]
    NonTransferable {
        /// Item
        item_id: U256,
        /// Current owner
        from: Address,
        /// Requested owner
        to: Address,
    },

    /// Mint to the zero address.
    #[error("Invalid owner: {0}")]
    InvalidOwner(Address),

    /// Proof carries a different operation than the claim path expects.
    #[error("Unexpected operation: expected {expected}, found {found:?}")]
    UnexpectedOperation {
        /// What the claim path accepts
        expected: &'static str,
        /// What the proof carries
        found: OperationTag,
    },

    /// Tag is not one of the four governance parameters.
    #[error("Not a parameter operation: {0:?}")]
    NotParameterOperation(OperationTag),

    /// Voting period of zero.
    #[error("Invalid voting period: {0}")]
    InvalidVotingPeriod(u32),

    /// Quorum numerator above the denominator.
    #[error("Quorum numerator too large: {numerator} > {denominator}")]
    QuorumNumeratorTooLarge {
        /// Requested numerator
        numerator: U256,
        /// Fixed denominator
        denominator: U256,
    },

    /// Malformed payload.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl SyncError {
    /// Map onto the coarse taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::WrongChain { .. } => ErrorKind::WrongChain,
            Self::InvalidProof | Self::InvalidParameterProof => ErrorKind::DigestMismatch,
            Self::AlreadyExists(_) => ErrorKind::AlreadyApplied,
            Self::ItemNotFound(_) | Self::DelegationMismatch { .. } => ErrorKind::NotFound,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::NonTransferable { .. }
            | Self::InvalidOwner(_)
            | Self::UnexpectedOperation { .. }
            | Self::NotParameterOperation(_)
            | Self::InvalidVotingPeriod(_)
            | Self::QuorumNumeratorTooLarge { .. }
            | Self::Codec(_) => ErrorKind::InvalidInput,
        }
    }

    /// True for both digest-mismatch variants.
    #[must_use]
    pub fn is_digest_mismatch(&self) -> bool {
        self.kind() == ErrorKind::DigestMismatch
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Environment variable present but unparsable.
    #[error("Invalid value for {var}: {reason}")]
    InvalidVar {
        /// Variable name
        var: &'static str,
        /// Parse failure
        reason: String,
    },

    /// Initial parameters break a store rule.
    #[error("Invalid initial parameters: {0}")]
    InvalidParameters(#[from] SyncError),
}
