//! # Governance Parameter Store
//!
//! The four synchronised scalars plus the manifesto. One instance per chain,
//! replicated field by field. Setters enforce the store's range rules and hand
//! back the previous value.

use super::errors::SyncError;
use super::invariants::{invariant_quorum_fraction, invariant_voting_period, QUORUM_DENOMINATOR};
use super::ledger::MembershipLedger;
use super::value_objects::{Uint48, U256};
use serde::{Deserialize, Serialize};

/// Default voting delay: one day of 12-second blocks.
pub const DEFAULT_VOTING_DELAY: u64 = 7_200;

/// Default voting period: one week of 12-second blocks.
pub const DEFAULT_VOTING_PERIOD: u32 = 50_400;

/// Default quorum numerator (4%).
pub const DEFAULT_QUORUM_NUMERATOR: u64 = 4;

/// Synchronised governance parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParameters {
    voting_delay: Uint48,
    voting_period: u32,
    proposal_threshold: U256,
    quorum_numerator: U256,
    manifesto: String,
}

impl Default for GovernanceParameters {
    fn default() -> Self {
        Self {
            voting_delay: Uint48::new(DEFAULT_VOTING_DELAY).unwrap_or(Uint48::ZERO),
            voting_period: DEFAULT_VOTING_PERIOD,
            proposal_threshold: U256::zero(),
            quorum_numerator: U256::from(DEFAULT_QUORUM_NUMERATOR),
            manifesto: String::new(),
        }
    }
}

impl GovernanceParameters {
    /// Build a parameter set, rejecting out-of-range values.
    pub fn new(
        voting_delay: Uint48,
        voting_period: u32,
        proposal_threshold: U256,
        quorum_numerator: U256,
        manifesto: impl Into<String>,
    ) -> Result<Self, SyncError> {
        let params = Self {
            voting_delay,
            voting_period,
            proposal_threshold,
            quorum_numerator,
            manifesto: manifesto.into(),
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the range rules.
    pub fn validate(&self) -> Result<(), SyncError> {
        invariant_voting_period(self.voting_period)?;
        invariant_quorum_fraction(self.quorum_numerator)
    }

    /// Blocks between proposal and vote start.
    pub fn voting_delay(&self) -> Uint48 {
        self.voting_delay
    }

    /// Blocks a vote stays open.
    pub fn voting_period(&self) -> u32 {
        self.voting_period
    }

    /// Votes required to propose.
    pub fn proposal_threshold(&self) -> U256 {
        self.proposal_threshold
    }

    /// Quorum numerator over [`Self::quorum_denominator`].
    pub fn quorum_numerator(&self) -> U256 {
        self.quorum_numerator
    }

    /// Fixed quorum denominator.
    pub fn quorum_denominator(&self) -> U256 {
        U256::from(QUORUM_DENOMINATOR)
    }

    /// Manifesto text (typically a content hash).
    pub fn manifesto(&self) -> &str {
        &self.manifesto
    }

    /// Votes needed for quorum given `total_supply` voting units.
    pub fn quorum(&self, total_supply: u64) -> U256 {
        U256::from(total_supply).saturating_mul(self.quorum_numerator) / self.quorum_denominator()
    }

    /// Replace the voting delay; returns the old value.
    pub fn set_voting_delay(&mut self, value: Uint48) -> Uint48 {
        std::mem::replace(&mut self.voting_delay, value)
    }

    /// Replace the voting period; returns the old value.
    pub fn set_voting_period(&mut self, value: u32) -> Result<u32, SyncError> {
        invariant_voting_period(value)?;
        Ok(std::mem::replace(&mut self.voting_period, value))
    }

    /// Replace the proposal threshold; returns the old value.
    pub fn set_proposal_threshold(&mut self, value: U256) -> U256 {
        std::mem::replace(&mut self.proposal_threshold, value)
    }

    /// Replace the quorum numerator; returns the old value.
    pub fn set_quorum_numerator(&mut self, value: U256) -> Result<U256, SyncError> {
        invariant_quorum_fraction(value)?;
        Ok(std::mem::replace(&mut self.quorum_numerator, value))
    }

    /// Replace the manifesto; returns the old text.
    pub fn set_manifesto(&mut self, text: impl Into<String>) -> String {
        std::mem::replace(&mut self.manifesto, text.into())
    }
}

/// Complete mutable state of one deployment.
///
/// Passed explicitly into every issuer and verifier function.
#[derive(Clone, Debug, Default)]
pub struct DaoState {
    /// Membership items and delegations.
    pub ledger: MembershipLedger,
    /// Governance parameters and manifesto.
    pub params: GovernanceParameters,
}

impl DaoState {
    /// Fresh state with the given parameters and an empty ledger.
    pub fn with_params(params: GovernanceParameters) -> Self {
        Self {
            ledger: MembershipLedger::new(),
            params,
        }
    }
}
