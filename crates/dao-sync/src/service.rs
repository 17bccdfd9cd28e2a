//! # DAO Contract Service
//!
//! One `DaoContract` is one deployment on one chain. It owns the deployment's
//! configuration and state, wires the pure algorithms to the outbound ports,
//! and implements the inbound API traits.
//!
//! Every mutating call runs the same pipeline:
//!
//! 1. chain check (`WrongChain`)
//! 2. caller role (`Unauthorized`)
//! 3. argument / proof validation
//! 4. state mutation
//! 5. vote-weight moves and event publication
//!
//! Steps 1-3 never touch state, and step 4 fails before its first write, so a
//! failed call publishes nothing and changes nothing.

use crate::algorithms::{self, membership, verifier};
use crate::config::DaoConfig;
use crate::domain::{
    invariant_governance_executor, invariant_home_chain, Address, ChainRole, ConfigError,
    DaoState, GovernanceParameters, MembershipItem, Operation, OperationTag, Proof,
    StateTransition, SyncError, Uint48, U256,
};
use crate::events::{ChangeOrigin, DaoEvent};
use crate::ports::inbound::{ClaimApi, GovernanceApi, MembershipApi, ProofIssuerApi};
use crate::ports::outbound::{EventSink, VoteWeightLedger};
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

/// Statistics for one deployment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Proofs handed out (HOME only).
    pub proofs_issued: u64,
    /// Proofs applied.
    pub claims_applied: u64,
    /// Proofs rejected.
    pub claims_rejected: u64,
    /// Direct mutations committed.
    pub direct_mutations: u64,
    /// Direct mutations refused.
    pub direct_rejected: u64,
    /// Events published.
    pub events_emitted: u64,
}

type ClaimFn = fn(&mut DaoState, Address, &Proof) -> Result<StateTransition, SyncError>;

/// A DAO deployment.
pub struct DaoContract<V: VoteWeightLedger, E: EventSink> {
    config: DaoConfig,
    state: DaoState,
    votes: V,
    events: E,
    stats: RwLock<ServiceStats>,
}

impl<V: VoteWeightLedger, E: EventSink> DaoContract<V, E> {
    /// Deploy with `config.initial` as the starting parameters.
    pub fn new(config: DaoConfig, votes: V, events: E) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "[dao-sync] Deployed at {} on chain {} ({:?}, home {})",
            config.contract_address,
            config.chain_id,
            config.role(),
            config.home_chain_id
        );
        Ok(Self {
            state: DaoState::with_params(config.initial.clone()),
            config,
            votes,
            events,
            stats: RwLock::new(ServiceStats::default()),
        })
    }

    /// Deployment configuration.
    pub fn config(&self) -> &DaoConfig {
        &self.config
    }

    /// This contract's address (the destination it verifies against).
    pub fn address(&self) -> Address {
        self.config.contract_address
    }

    /// HOME or FOREIGN.
    pub fn role(&self) -> ChainRole {
        self.config.role()
    }

    /// Read-only view of local state.
    pub fn state(&self) -> &DaoState {
        &self.state
    }

    /// Current statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    /// Vote-weight adapter.
    pub fn vote_ledger(&self) -> &V {
        &self.votes
    }

    /// Event adapter.
    pub fn event_sink(&self) -> &E {
        &self.events
    }

    fn ensure_home(&self) -> Result<(), SyncError> {
        invariant_home_chain(self.config.chain_id, self.config.home_chain_id)
    }

    fn ensure_executor(&self, caller: Address) -> Result<(), SyncError> {
        self.ensure_home()?;
        invariant_governance_executor(caller, self.config.governance_executor)
    }

    fn commit(&mut self, transition: StateTransition) {
        for mv in &transition.vote_moves {
            self.votes.move_voting_power(mv);
        }
        for event in &transition.events {
            self.events.emit(event);
        }
        self.stats.write().events_emitted += transition.events.len() as u64;
    }

    fn issued(&self, result: Result<Proof, SyncError>) -> Result<Proof, SyncError> {
        match &result {
            Ok(_) => self.stats.write().proofs_issued += 1,
            Err(e) => debug!("[dao-sync] Proof issuance refused: {}", e),
        }
        result
    }

    fn run_claim(&mut self, proof: &Proof, apply: ClaimFn) -> Result<(), SyncError> {
        let kind = verifier::claim_kind(proof.tag());
        match apply(&mut self.state, self.config.contract_address, proof) {
            Ok(transition) => {
                info!(
                    "[dao-sync] Applied {} claim on chain {} (digest {})",
                    kind, self.config.chain_id, proof.digest
                );
                self.stats.write().claims_applied += 1;
                self.commit(transition);
                Ok(())
            }
            Err(e) => {
                warn!(
                    "[dao-sync] Rejected {} claim on chain {}: {}",
                    kind, self.config.chain_id, e
                );
                self.stats.write().claims_rejected += 1;
                Err(e)
            }
        }
    }

    fn run_direct<T>(
        &mut self,
        what: &'static str,
        result: Result<(T, StateTransition), SyncError>,
    ) -> Result<T, SyncError> {
        match result {
            Ok((value, transition)) => {
                info!("[dao-sync] {} on chain {}", what, self.config.chain_id);
                self.stats.write().direct_mutations += 1;
                self.commit(transition);
                Ok(value)
            }
            Err(e) => {
                warn!("[dao-sync] {} refused: {}", what, e);
                self.stats.write().direct_rejected += 1;
                Err(e)
            }
        }
    }

    fn set_parameter(&mut self, caller: Address, operation: Operation) -> Result<(), SyncError> {
        let what = match operation.tag() {
            OperationTag::UpdateVotingDelay => "Voting delay update",
            OperationTag::UpdateVotingPeriod => "Voting period update",
            OperationTag::UpdateProposalThreshold => "Proposal threshold update",
            _ => "Quorum numerator update",
        };
        let result = self.ensure_executor(caller).and_then(|()| {
            verifier::apply_parameter(&mut self.state.params, &operation, ChangeOrigin::Direct)
                .map(|event| ((), StateTransition::event(event)))
        });
        self.run_direct(what, result)
    }
}

impl<V: VoteWeightLedger, E: EventSink> ProofIssuerApi for DaoContract<V, E> {
    #[instrument(skip(self), fields(chain = %self.config.chain_id))]
    fn issue_mint_proof(&self, destination: Address, item_id: U256) -> Result<Proof, SyncError> {
        self.issued(algorithms::issue_mint_proof(
            &self.config,
            &self.state,
            destination,
            item_id,
        ))
    }

    #[instrument(skip(self), fields(chain = %self.config.chain_id))]
    fn issue_burn_proof(&self, destination: Address, item_id: U256) -> Result<Proof, SyncError> {
        self.issued(algorithms::issue_burn_proof(&self.config, destination, item_id))
    }

    #[instrument(skip(self), fields(chain = %self.config.chain_id))]
    fn issue_metadata_proof(
        &self,
        destination: Address,
        item_id: U256,
        metadata_uri: &str,
    ) -> Result<Proof, SyncError> {
        self.issued(algorithms::issue_metadata_proof(
            &self.config,
            destination,
            item_id,
            metadata_uri,
        ))
    }

    #[instrument(skip(self), fields(chain = %self.config.chain_id))]
    fn issue_delegation_proof(
        &self,
        destination: Address,
        delegator: Address,
        delegatee: Address,
    ) -> Result<Proof, SyncError> {
        self.issued(algorithms::issue_delegation_proof(
            &self.config,
            &self.state,
            destination,
            delegator,
            delegatee,
        ))
    }

    #[instrument(skip(self), fields(chain = %self.config.chain_id))]
    fn issue_manifesto_proof(&self, destination: Address, text: &str) -> Result<Proof, SyncError> {
        self.issued(algorithms::issue_manifesto_proof(&self.config, destination, text))
    }

    #[instrument(skip(self, value_bytes), fields(chain = %self.config.chain_id))]
    fn issue_parameter_proof(
        &self,
        destination: Address,
        tag: OperationTag,
        value_bytes: &[u8],
    ) -> Result<Proof, SyncError> {
        self.issued(algorithms::issue_parameter_proof(
            &self.config,
            destination,
            tag,
            value_bytes,
        ))
    }
}

impl<V: VoteWeightLedger, E: EventSink> ClaimApi for DaoContract<V, E> {
    #[instrument(skip(self, proof), fields(chain = %self.config.chain_id, tag = ?proof.tag()))]
    fn claim(&mut self, proof: &Proof) -> Result<(), SyncError> {
        self.run_claim(proof, verifier::claim)
    }

    #[instrument(skip(self, proof), fields(chain = %self.config.chain_id))]
    fn claim_mint(&mut self, proof: &Proof) -> Result<(), SyncError> {
        self.run_claim(proof, verifier::claim_mint)
    }

    #[instrument(skip(self, proof), fields(chain = %self.config.chain_id))]
    fn claim_burn(&mut self, proof: &Proof) -> Result<(), SyncError> {
        self.run_claim(proof, verifier::claim_burn)
    }

    #[instrument(skip(self, proof), fields(chain = %self.config.chain_id))]
    fn claim_metadata_update(&mut self, proof: &Proof) -> Result<(), SyncError> {
        self.run_claim(proof, verifier::claim_metadata_update)
    }

    #[instrument(skip(self, proof), fields(chain = %self.config.chain_id))]
    fn claim_delegation(&mut self, proof: &Proof) -> Result<(), SyncError> {
        self.run_claim(proof, verifier::claim_delegation)
    }

    #[instrument(skip(self, proof), fields(chain = %self.config.chain_id))]
    fn claim_manifesto_update(&mut self, proof: &Proof) -> Result<(), SyncError> {
        self.run_claim(proof, verifier::claim_manifesto_update)
    }

    #[instrument(skip(self, proof), fields(chain = %self.config.chain_id))]
    fn claim_parameter_update(&mut self, proof: &Proof) -> Result<(), SyncError> {
        self.run_claim(proof, verifier::claim_parameter_update)
    }
}

impl<V: VoteWeightLedger, E: EventSink> GovernanceApi for DaoContract<V, E> {
    #[instrument(skip(self, text), fields(chain = %self.config.chain_id))]
    fn set_manifesto(&mut self, caller: Address, text: &str) -> Result<(), SyncError> {
        let result = self.ensure_executor(caller).map(|()| {
            let old = self.state.params.set_manifesto(text);
            let event = DaoEvent::ManifestoUpdated {
                old,
                new: text.to_string(),
                origin: ChangeOrigin::Direct,
            };
            ((), StateTransition::event(event))
        });
        self.run_direct("Manifesto update", result)
    }

    #[instrument(skip(self), fields(chain = %self.config.chain_id))]
    fn set_voting_delay(&mut self, caller: Address, value: Uint48) -> Result<(), SyncError> {
        self.set_parameter(caller, Operation::UpdateVotingDelay { value })
    }

    #[instrument(skip(self), fields(chain = %self.config.chain_id))]
    fn set_voting_period(&mut self, caller: Address, value: u32) -> Result<(), SyncError> {
        self.set_parameter(caller, Operation::UpdateVotingPeriod { value })
    }

    #[instrument(skip(self), fields(chain = %self.config.chain_id))]
    fn set_proposal_threshold(&mut self, caller: Address, value: U256) -> Result<(), SyncError> {
        self.set_parameter(caller, Operation::UpdateProposalThreshold { value })
    }

    #[instrument(skip(self), fields(chain = %self.config.chain_id))]
    fn update_quorum_numerator(&mut self, caller: Address, value: U256) -> Result<(), SyncError> {
        self.set_parameter(caller, Operation::UpdateQuorumNumerator { value })
    }

    fn parameters(&self) -> &GovernanceParameters {
        &self.state.params
    }
}

impl<V: VoteWeightLedger, E: EventSink> MembershipApi for DaoContract<V, E> {
    #[instrument(skip(self, metadata_uri), fields(chain = %self.config.chain_id))]
    fn mint(&mut self, caller: Address, to: Address, metadata_uri: &str) -> Result<U256, SyncError> {
        let result = self
            .ensure_executor(caller)
            .and_then(|()| membership::mint(&mut self.state, to, metadata_uri));
        self.run_direct("Mint", result)
    }

    #[instrument(skip(self), fields(chain = %self.config.chain_id))]
    fn burn(&mut self, caller: Address, item_id: U256) -> Result<(), SyncError> {
        let result = self
            .ensure_executor(caller)
            .and_then(|()| membership::burn(&mut self.state, item_id))
            .map(|t| ((), t));
        self.run_direct("Burn", result)
    }

    #[instrument(skip(self, metadata_uri), fields(chain = %self.config.chain_id))]
    fn set_metadata(
        &mut self,
        caller: Address,
        item_id: U256,
        metadata_uri: &str,
    ) -> Result<(), SyncError> {
        let result = self
            .ensure_executor(caller)
            .and_then(|()| membership::set_metadata(&mut self.state, item_id, metadata_uri))
            .map(|t| ((), t));
        self.run_direct("Metadata update", result)
    }

    #[instrument(skip(self), fields(chain = %self.config.chain_id))]
    fn delegate(&mut self, caller: Address, delegatee: Address) -> Result<(), SyncError> {
        let result = self
            .ensure_home()
            .map(|()| ((), membership::delegate(&mut self.state, caller, delegatee)));
        self.run_direct("Delegation", result)
    }

    fn owner_of(&self, item_id: U256) -> Result<Address, SyncError> {
        self.state.ledger.owner_of(item_id)
    }

    fn token_uri(&self, item_id: U256) -> Result<String, SyncError> {
        self.state.ledger.token_uri(item_id).map(str::to_string)
    }

    fn balance_of(&self, owner: Address) -> u64 {
        self.state.ledger.balance_of(owner)
    }

    fn total_supply(&self) -> u64 {
        self.state.ledger.total_supply()
    }

    fn exists_on_chain(&self, item_id: U256) -> bool {
        self.state.ledger.exists_on_chain(item_id)
    }

    fn delegates(&self, account: Address) -> Address {
        self.state.ledger.delegates(account)
    }

    fn item(&self, item_id: U256) -> Option<MembershipItem> {
        self.state.ledger.item(item_id)
    }

    fn get_votes(&self, account: Address) -> u64 {
        self.votes.get_votes(account)
    }
}
