//! # Deployment Configuration
//!
//! Identity of one deployment: which chain it runs on, which chain is HOME,
//! its own contract address (the proof destination it verifies against) and
//! the governance executor allowed to call the direct setters.

use crate::domain::{Address, ChainId, ChainRole, ConfigError, GovernanceParameters};
use serde::{Deserialize, Serialize};

/// Environment variable: this deployment's chain id.
pub const ENV_CHAIN_ID: &str = "DAO_CHAIN_ID";
/// Environment variable: the DAO's home chain id.
pub const ENV_HOME_CHAIN_ID: &str = "DAO_HOME_CHAIN_ID";
/// Environment variable: this deployment's contract address.
pub const ENV_CONTRACT_ADDRESS: &str = "DAO_CONTRACT_ADDRESS";
/// Environment variable: the governance executor address.
pub const ENV_GOVERNANCE_EXECUTOR: &str = "DAO_GOVERNANCE_EXECUTOR";

/// Configuration of one deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoConfig {
    /// Chain this deployment runs on.
    pub chain_id: ChainId,
    /// The DAO's source-of-truth chain.
    pub home_chain_id: ChainId,
    /// Address of this contract instance.
    pub contract_address: Address,
    /// Account allowed to call the direct governance setters.
    pub governance_executor: Address,
    /// Parameters at deployment.
    pub initial: GovernanceParameters,
}

impl Default for DaoConfig {
    fn default() -> Self {
        Self {
            chain_id: ChainId(1),
            home_chain_id: ChainId(1),
            contract_address: Address::ZERO,
            governance_executor: Address::ZERO,
            initial: GovernanceParameters::default(),
        }
    }
}

impl DaoConfig {
    /// Same DAO, deployed on `chain_id`.
    #[must_use]
    pub fn for_chain(mut self, chain_id: impl Into<ChainId>) -> Self {
        self.chain_id = chain_id.into();
        self
    }

    /// Set the home chain.
    #[must_use]
    pub fn with_home_chain(mut self, home_chain_id: impl Into<ChainId>) -> Self {
        self.home_chain_id = home_chain_id.into();
        self
    }

    /// Set the contract address.
    #[must_use]
    pub fn with_contract_address(mut self, address: Address) -> Self {
        self.contract_address = address;
        self
    }

    /// Set the governance executor.
    #[must_use]
    pub fn with_governance_executor(mut self, executor: Address) -> Self {
        self.governance_executor = executor;
        self
    }

    /// Set the initial parameters.
    #[must_use]
    pub fn with_initial(mut self, initial: GovernanceParameters) -> Self {
        self.initial = initial;
        self
    }

    /// HOME or FOREIGN.
    pub fn role(&self) -> ChainRole {
        ChainRole::of(self.chain_id, self.home_chain_id)
    }

    /// True when this deployment is HOME.
    pub fn is_home(&self) -> bool {
        self.role() == ChainRole::Home
    }

    /// Reject initial parameters that break a store rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.initial.validate()?;
        Ok(())
    }

    /// Defaults overridden by `DAO_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_CHAIN_ID) {
            config.chain_id = parse_chain_id(ENV_CHAIN_ID, &raw)?;
        }
        if let Some(raw) = lookup(ENV_HOME_CHAIN_ID) {
            config.home_chain_id = parse_chain_id(ENV_HOME_CHAIN_ID, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CONTRACT_ADDRESS) {
            config.contract_address = parse_address(ENV_CONTRACT_ADDRESS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_GOVERNANCE_EXECUTOR) {
            config.governance_executor = parse_address(ENV_GOVERNANCE_EXECUTOR, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_chain_id(var: &'static str, raw: &str) -> Result<ChainId, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(ChainId)
        .map_err(|e| ConfigError::InvalidVar {
            var,
            reason: e.to_string(),
        })
}

fn parse_address(var: &'static str, raw: &str) -> Result<Address, ConfigError> {
    raw.trim().parse().map_err(|e: crate::domain::HexParseError| ConfigError::InvalidVar {
        var,
        reason: e.to_string(),
    })
}
