//! # Soulbound Membership
//!
//! No sequence of issued proofs, replays and direct calls may move an item
//! from one nonzero owner to a different nonzero owner on any deployment.

#[cfg(test)]
mod tests {
    use crate::harness::{Network, EXECUTOR};
    use crate::integration::convergence::{apply_and_relay, member, Action};
    use dao_sync::{
        Address, ClaimApi, MembershipApi, MembershipLedger, Proof, ProofIssuerApi, SyncError,
        Uint48, U256,
    };
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    const CHAINS: [u64; 2] = [10, 137];

    #[test]
    fn test_ledger_rejects_owner_to_owner_move() {
        let mut ledger = MembershipLedger::new();
        ledger.mint(U256::from(7), member(1), "ipfs://a").unwrap();

        let err = ledger.update(U256::from(7), member(2)).unwrap_err();
        assert_eq!(
            err,
            SyncError::NonTransferable {
                item_id: U256::from(7),
                from: member(1),
                to: member(2),
            }
        );
        assert_eq!(ledger.owner_of(U256::from(7)).unwrap(), member(1));
        assert_eq!(ledger.balance_of(member(2)), 0);
    }

    #[test]
    fn test_ledger_allows_mint_and_burn_edges() {
        let mut ledger = MembershipLedger::new();
        let id = U256::from(3);
        ledger.update(id, member(1)).unwrap();
        ledger.update(id, Address::ZERO).unwrap();
        ledger.update(id, member(2)).unwrap();
        assert_eq!(ledger.owner_of(id).unwrap(), member(2));
    }

    #[test]
    fn test_mint_claim_cannot_overwrite_owner() {
        let mut net = Network::new(&[10]).unwrap();
        let dest = net.home().address();
        let id = net.mint_on_home(member(1), "ipfs://a").unwrap();
        let proof = net.home().issue_mint_proof(dest, id).unwrap();
        net.relay_all(&proof).unwrap();

        // Even a HOME-issued proof for the same id cannot reassign it.
        assert_eq!(
            net.relay_to(10, &proof).unwrap(),
            Err(SyncError::AlreadyExists(id))
        );
        assert_eq!(net.foreign(10).unwrap().owner_of(id).unwrap(), member(1));
    }

    #[test]
    fn test_members_cannot_mint_or_burn_directly() {
        let mut net = Network::new(&[10]).unwrap();
        let id = net.mint_on_home(member(1), "ipfs://a").unwrap();

        let home = net.home_mut();
        assert_eq!(
            home.burn(member(1), id),
            Err(SyncError::Unauthorized(member(1)))
        );
        assert_eq!(
            home.mint(member(2), member(2), "ipfs://mine"),
            Err(SyncError::Unauthorized(member(2)))
        );
        assert_eq!(home.owner_of(id).unwrap(), member(1));

        // The executor on a FOREIGN chain is refused as well.
        let foreign = net.foreign_mut(10).unwrap();
        assert!(matches!(
            foreign.mint(EXECUTOR, member(2), "ipfs://x"),
            Err(SyncError::WrongChain { .. })
        ));
    }

    #[derive(Clone, Debug)]
    enum Step {
        /// Legitimate HOME change relayed everywhere.
        Home(Action),
        /// Resubmit an earlier proof to one deployment (0 = HOME).
        Replay(prop::sample::Index, usize),
        /// Mint/burn attempt by a member on one deployment (0 = HOME).
        Direct(u8, usize),
    }

    fn arb_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            3 => (0u8..4).prop_map(Action::Mint),
            2 => any::<usize>().prop_map(Action::Burn),
            1 => (any::<usize>(), "[a-z]{0,8}").prop_map(|(n, s)| Action::SetMetadata(n, s)),
            1 => (0u8..4, 0u8..4).prop_map(|(a, b)| Action::Delegate(a, b)),
            1 => (0u64..=Uint48::MAX.get()).prop_map(Action::VotingDelay),
        ]
    }

    fn arb_step() -> impl Strategy<Value = Step> {
        prop_oneof![
            3 => arb_action().prop_map(Step::Home),
            3 => (any::<prop::sample::Index>(), 0..=CHAINS.len()).prop_map(|(i, c)| Step::Replay(i, c)),
            1 => (0u8..4, 0..=CHAINS.len()).prop_map(|(n, c)| Step::Direct(n, c)),
        ]
    }

    /// Owners of every item on every deployment, HOME first.
    fn owners(net: &Network) -> Vec<BTreeMap<U256, Address>> {
        let mut all = vec![net.home().state().ledger.items().collect()];
        for chain in CHAINS {
            if let Ok(deployment) = net.foreign(chain) {
                all.push(deployment.state().ledger.items().collect());
            }
        }
        all
    }

    /// Mint and burn proofs for every item HOME currently owns.
    fn harvest(net: &Network, pool: &mut Vec<Proof>) {
        let dest = net.home().address();
        let ids: Vec<U256> = net.home().state().ledger.items().map(|(id, _)| id).collect();
        for id in ids {
            if let Ok(proof) = net.home().issue_mint_proof(dest, id) {
                if !pool.contains(&proof) {
                    pool.push(proof);
                }
            }
            if let Ok(proof) = net.home().issue_burn_proof(dest, id) {
                if !pool.contains(&proof) {
                    pool.push(proof);
                }
            }
        }
    }

    fn submit(net: &mut Network, target: usize, proof: &Proof) -> Result<(), SyncError> {
        match target.checked_sub(1) {
            None => net.home_mut().claim(proof),
            Some(i) => net
                .relay_to(CHAINS[i], proof)
                .expect("chain deployed"),
        }
    }

    fn direct(net: &mut Network, n: u8, target: usize) -> bool {
        let caller = member(n);
        let deployment = match target.checked_sub(1) {
            None => net.home_mut(),
            Some(i) => net.foreign_mut(CHAINS[i]).expect("chain deployed"),
        };
        let minted = deployment.mint(caller, caller, "ipfs://self").is_err();
        let burned = deployment.burn(caller, U256::zero()).is_err();
        minted && burned
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_no_owner_to_owner_move(steps in prop::collection::vec(arb_step(), 1..32)) {
            let mut net = Network::new(&CHAINS).unwrap();
            let mut pool: Vec<Proof> = Vec::new();

            for step in &steps {
                let before = owners(&net);
                match step {
                    Step::Home(action) => {
                        apply_and_relay(&mut net, action).unwrap();
                        harvest(&net, &mut pool);
                    }
                    Step::Replay(index, target) => {
                        if !pool.is_empty() {
                            let proof = pool[index.index(pool.len())].clone();
                            let _ = submit(&mut net, *target, &proof);
                        }
                    }
                    Step::Direct(n, target) => {
                        prop_assert!(direct(&mut net, *n, *target));
                    }
                }

                let after = owners(&net);
                for (prev, next) in before.iter().zip(after.iter()) {
                    for (id, owner) in prev {
                        if let Some(now) = next.get(id) {
                            prop_assert_eq!(now, owner, "item {} changed hands after {:?}", id, step);
                        }
                    }
                }
            }
        }
    }
}
