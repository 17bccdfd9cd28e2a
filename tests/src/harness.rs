//! # Multi-Chain Harness
//!
//! A `Network` is one HOME deployment plus any number of FOREIGN deployments,
//! all sharing the CREATE2 address of the DAO contract unless placed
//! elsewhere explicitly. Relaying is done by hand, the way an off-chain
//! relayer would: issue on HOME, then submit to one or more FOREIGN chains.

use anyhow::{anyhow, Context};
use dao_sync::{
    create2_address, Address, ChainId, ClaimApi, DaoConfig, DaoContract, GovernanceParameters,
    Hash, InMemoryEventLog, InMemoryVoteLedger, MembershipApi, Proof, SyncError, U256,
};
use std::collections::BTreeMap;

/// Concrete deployment type used throughout the suite.
pub type Deployment = DaoContract<InMemoryVoteLedger, InMemoryEventLog>;

/// HOME chain id used by default.
pub const HOME_CHAIN: u64 = 1;

/// Factory that deploys the DAO on every chain.
pub const FACTORY: Address = Address::from_low_u64(0xFAC7);

/// Governance executor on HOME.
pub const EXECUTOR: Address = Address::from_low_u64(0xE0);

/// CREATE2 salt for the DAO contract.
pub const SALT: [u8; 32] = [0x5A; 32];

/// Stand-in init code for the DAO contract.
pub const INIT_CODE: &[u8] = b"cross-dao governor v1";

/// The shared deployment address.
pub fn dao_address() -> Address {
    create2_address(FACTORY, Hash::new(SALT), INIT_CODE)
}

/// Observable state used to compare deployments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Governance parameters and manifesto.
    pub params: GovernanceParameters,
    /// `(item_id, owner)` for every owned item.
    pub owners: Vec<(U256, Address)>,
    /// Every id with the presence flag set, owned or not.
    pub exists: Vec<U256>,
    /// `(item_id, uri)` for every id with stored metadata, owned or not.
    pub metadata: Vec<(U256, String)>,
    /// `(delegator, delegatee)`, sorted.
    pub delegations: Vec<(Address, Address)>,
    /// `(delegatee, weight)` for every nonzero vote weight, sorted.
    pub votes: Vec<(Address, u64)>,
}

/// Capture the observable state of a deployment.
pub fn snapshot(deployment: &Deployment) -> Snapshot {
    let ledger = &deployment.state().ledger;
    let mut delegations: Vec<(Address, Address)> = ledger
        .delegations()
        .map(|record| (record.delegator, record.delegatee))
        .collect();
    delegations.sort();
    let mut votes: Vec<(Address, u64)> = deployment.vote_ledger().snapshot().into_iter().collect();
    votes.sort();
    Snapshot {
        params: deployment.state().params.clone(),
        owners: ledger.items().collect(),
        exists: ledger.present_items().collect(),
        metadata: ledger
            .metadata_entries()
            .map(|(id, uri)| (id, uri.to_string()))
            .collect(),
        delegations,
        votes,
    }
}

/// One HOME deployment and its FOREIGN replicas.
pub struct Network {
    home: Deployment,
    foreign: BTreeMap<ChainId, Deployment>,
    template: DaoConfig,
}

impl Network {
    /// HOME on chain 1 and FOREIGN replicas on `foreign_chains`, all at
    /// [`dao_address`].
    pub fn new(foreign_chains: &[u64]) -> anyhow::Result<Self> {
        dao_telemetry::init_test_logging();
        let template = DaoConfig::default()
            .for_chain(HOME_CHAIN)
            .with_home_chain(HOME_CHAIN)
            .with_contract_address(dao_address())
            .with_governance_executor(EXECUTOR);

        let home = deploy(template.clone())?;
        let mut network = Self {
            home,
            foreign: BTreeMap::new(),
            template,
        };
        for chain in foreign_chains {
            network.add_foreign(*chain)?;
        }
        Ok(network)
    }

    /// Deploy a FOREIGN replica at the shared address.
    pub fn add_foreign(&mut self, chain: u64) -> anyhow::Result<()> {
        self.add_foreign_at(chain, dao_address())
    }

    /// Deploy a FOREIGN replica at a specific address.
    pub fn add_foreign_at(&mut self, chain: u64, address: Address) -> anyhow::Result<()> {
        if chain == HOME_CHAIN {
            return Err(anyhow!("chain {chain} is HOME"));
        }
        let config = self
            .template
            .clone()
            .for_chain(chain)
            .with_contract_address(address);
        let deployment = deploy(config)?;
        self.foreign.insert(ChainId(chain), deployment);
        Ok(())
    }

    /// HOME deployment.
    pub fn home(&self) -> &Deployment {
        &self.home
    }

    /// HOME deployment, mutable.
    pub fn home_mut(&mut self) -> &mut Deployment {
        &mut self.home
    }

    /// FOREIGN deployment on `chain`.
    pub fn foreign(&self, chain: u64) -> anyhow::Result<&Deployment> {
        self.foreign
            .get(&ChainId(chain))
            .with_context(|| format!("no deployment on chain {chain}"))
    }

    /// FOREIGN deployment on `chain`, mutable.
    pub fn foreign_mut(&mut self, chain: u64) -> anyhow::Result<&mut Deployment> {
        self.foreign
            .get_mut(&ChainId(chain))
            .with_context(|| format!("no deployment on chain {chain}"))
    }

    /// FOREIGN chain ids.
    pub fn foreign_chains(&self) -> Vec<u64> {
        self.foreign.keys().map(|c| c.0).collect()
    }

    /// Submit `proof` to one FOREIGN chain.
    pub fn relay_to(&mut self, chain: u64, proof: &Proof) -> anyhow::Result<Result<(), SyncError>> {
        let _span =
            dao_telemetry::chain_span!("relay", chain_id = chain, tag = ?proof.tag()).entered();
        Ok(self.foreign_mut(chain)?.claim(proof))
    }

    /// Submit `proof` to every FOREIGN chain; results keyed by chain.
    pub fn relay(&mut self, proof: &Proof) -> BTreeMap<u64, Result<(), SyncError>> {
        self.foreign
            .iter_mut()
            .map(|(chain, deployment)| {
                let _span =
                    dao_telemetry::chain_span!("relay", chain_id = chain.0, tag = ?proof.tag())
                        .entered();
                (chain.0, deployment.claim(proof))
            })
            .collect()
    }

    /// Submit `proof` everywhere, failing on the first rejection.
    pub fn relay_all(&mut self, proof: &Proof) -> anyhow::Result<()> {
        for (chain, result) in self.relay(proof) {
            result.with_context(|| format!("claim rejected on chain {chain}"))?;
        }
        Ok(())
    }

    /// Submit a binary-encoded proof to one FOREIGN chain.
    pub fn relay_bytes_to(&mut self, chain: u64, bytes: &[u8]) -> anyhow::Result<()> {
        let proof = Proof::from_bytes(bytes).context("decoding relay bytes")?;
        self.foreign_mut(chain)?
            .claim(&proof)
            .with_context(|| format!("claim rejected on chain {chain}"))
    }

    /// Submit a JSON-encoded proof to one FOREIGN chain.
    pub fn relay_json_to(&mut self, chain: u64, json: &str) -> anyhow::Result<()> {
        let proof = Proof::from_json(json).context("decoding relay json")?;
        self.foreign_mut(chain)?
            .claim(&proof)
            .with_context(|| format!("claim rejected on chain {chain}"))
    }

    /// Mint on HOME through the governance executor.
    pub fn mint_on_home(&mut self, to: Address, uri: &str) -> anyhow::Result<U256> {
        Ok(self.home.mint(EXECUTOR, to, uri)?)
    }

    /// FOREIGN chains whose observable state differs from HOME.
    pub fn divergent_chains(&self) -> Vec<u64> {
        let reference = snapshot(&self.home);
        self.foreign
            .iter()
            .filter(|(_, deployment)| snapshot(deployment) != reference)
            .map(|(chain, _)| chain.0)
            .collect()
    }

    /// True when every FOREIGN chain matches HOME.
    pub fn converged(&self) -> bool {
        self.divergent_chains().is_empty()
    }
}

fn deploy(config: DaoConfig) -> anyhow::Result<Deployment> {
    let chain = config.chain_id;
    DaoContract::new(config, InMemoryVoteLedger::new(), InMemoryEventLog::new())
        .with_context(|| format!("deploying on chain {chain}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::convergence::member;
    use dao_sync::{ChainRole, ProofIssuerApi};

    #[test]
    fn test_network_layout() {
        let net = Network::new(&[10, 137]).unwrap();
        assert_eq!(net.home().role(), ChainRole::Home);
        assert_eq!(net.foreign_chains(), vec![10, 137]);
        assert_eq!(net.foreign(10).unwrap().role(), ChainRole::Foreign);
        assert_eq!(net.foreign(137).unwrap().address(), dao_address());
        assert!(net.foreign(42).is_err());
    }

    #[test]
    fn test_home_chain_cannot_be_foreign() {
        let mut net = Network::new(&[]).unwrap();
        assert!(net.add_foreign(HOME_CHAIN).is_err());
    }

    #[test]
    fn test_fresh_network_is_converged() {
        let net = Network::new(&[10, 137]).unwrap();
        assert!(net.converged());
    }

    #[test]
    fn test_ghost_metadata_claim_is_divergence() {
        let mut net = Network::new(&[10, 137]).unwrap();
        let dest = net.home().address();
        // HOME never minted item 7.
        let ghost = net
            .home()
            .issue_metadata_proof(dest, U256::from(7), "ipfs://ghost")
            .unwrap();
        net.relay_to(10, &ghost).unwrap().unwrap();

        assert!(!net.home().exists_on_chain(U256::from(7)));
        assert!(net.foreign(10).unwrap().exists_on_chain(U256::from(7)));
        assert!(!net.converged());
        assert_eq!(net.divergent_chains(), vec![10]);

        let home = snapshot(net.home());
        let replica = snapshot(net.foreign(10).unwrap());
        assert_eq!(home.owners, replica.owners);
        assert_eq!(replica.exists, vec![U256::from(7)]);
        assert_eq!(replica.metadata, vec![(U256::from(7), "ipfs://ghost".to_string())]);
    }

    #[test]
    fn test_burn_claim_of_absent_item_keeps_convergence() {
        let mut net = Network::new(&[10]).unwrap();
        let dest = net.home().address();
        let burn = net.home().issue_burn_proof(dest, U256::from(3)).unwrap();
        net.relay_all(&burn).unwrap();
        assert!(net.converged());
    }

    #[test]
    fn test_vote_weights_are_compared() {
        let mut net = Network::new(&[10]).unwrap();
        let dest = net.home().address();
        net.home_mut().delegate(member(1), member(2)).unwrap();
        let id = net.mint_on_home(member(1), "ipfs://a").unwrap();
        let delegation = net
            .home()
            .issue_delegation_proof(dest, member(1), member(2))
            .unwrap();
        let mint = net.home().issue_mint_proof(dest, id).unwrap();

        // Mint first: the replica counts no votes for the undelegated owner.
        net.relay_to(10, &mint).unwrap().unwrap();
        assert_eq!(net.foreign(10).unwrap().get_votes(member(2)), 0);
        assert!(!net.converged());

        net.relay_to(10, &delegation).unwrap().unwrap();
        assert!(net.converged());
        assert_eq!(snapshot(net.home()).votes, vec![(member(2), 1)]);
    }

    #[test]
    fn test_dao_address_is_stable() {
        assert_eq!(dao_address(), dao_address());
        assert!(!dao_address().is_zero());
    }
}
