//! # Replay Attacks
//!
//! A proof is bound to one destination address. Submitting it to an instance
//! at any other address must fail with a digest mismatch for every operation
//! type, and leave that instance untouched.

#[cfg(test)]
mod tests {
    use crate::harness::{snapshot, Network, EXECUTOR};
    use crate::integration::convergence::member;
    use dao_sync::algorithms::word;
    use dao_sync::{
        Address, ClaimApi, GovernanceApi, MembershipApi, OperationTag, Proof, ProofIssuerApi,
        SyncError, U256,
    };

    const TWIN: u64 = 10;
    const STRANGER: u64 = 20;

    fn stranger_address() -> Address {
        Address::from_low_u64(0xDEF)
    }

    /// One valid proof per operation type, all for the shared address.
    fn proofs_for_every_operation(net: &mut Network) -> Vec<Proof> {
        let dest = net.home().address();
        let id = net.mint_on_home(member(1), "ipfs://a").unwrap();
        net.home_mut().delegate(member(1), member(2)).unwrap();
        let home = net.home();
        vec![
            home.issue_mint_proof(dest, id).unwrap(),
            home.issue_burn_proof(dest, id).unwrap(),
            home.issue_metadata_proof(dest, id, "ipfs://b").unwrap(),
            home.issue_delegation_proof(dest, member(1), member(2))
                .unwrap(),
            home.issue_manifesto_proof(dest, "QmNew").unwrap(),
            home.issue_parameter_proof(dest, OperationTag::UpdateVotingDelay, &word(U256::from(1)))
                .unwrap(),
            home.issue_parameter_proof(dest, OperationTag::UpdateVotingPeriod, &word(U256::from(2)))
                .unwrap(),
            home.issue_parameter_proof(
                dest,
                OperationTag::UpdateProposalThreshold,
                &word(U256::from(3)),
            )
            .unwrap(),
            home.issue_parameter_proof(
                dest,
                OperationTag::UpdateQuorumNumerator,
                &word(U256::from(4)),
            )
            .unwrap(),
        ]
    }

    #[test]
    fn test_cross_destination_rejected_for_every_operation() {
        let mut net = Network::new(&[TWIN]).unwrap();
        net.add_foreign_at(STRANGER, stranger_address()).unwrap();
        let proofs = proofs_for_every_operation(&mut net);
        assert_eq!(proofs.len(), OperationTag::ALL.len());

        let before = snapshot(net.foreign(STRANGER).unwrap());
        for proof in &proofs {
            let err = net.relay_to(STRANGER, proof).unwrap().unwrap_err();
            assert!(
                err.is_digest_mismatch(),
                "{:?} accepted at wrong destination: {err}",
                proof.tag()
            );
        }
        let stranger = net.foreign(STRANGER).unwrap();
        assert_eq!(snapshot(stranger), before);
        assert!(stranger.event_sink().is_empty());
        assert_eq!(stranger.stats().claims_rejected, proofs.len() as u64);
        assert!(!stranger.exists_on_chain(U256::zero()));
    }

    #[test]
    fn test_parameter_mismatch_uses_parameter_error() {
        let mut net = Network::new(&[]).unwrap();
        net.add_foreign_at(STRANGER, stranger_address()).unwrap();
        let dest = net.home().address();
        let proof = net
            .home()
            .issue_parameter_proof(dest, OperationTag::UpdateVotingPeriod, &word(U256::from(9)))
            .unwrap();
        assert_eq!(
            net.relay_to(STRANGER, &proof).unwrap(),
            Err(SyncError::InvalidParameterProof)
        );
    }

    #[test]
    fn test_each_proof_accepted_at_its_own_destination() {
        let mut net = Network::new(&[TWIN]).unwrap();
        let proofs = proofs_for_every_operation(&mut net);
        // Mint before burn etc.: the list is in a valid application order.
        for proof in &proofs {
            net.relay_to(TWIN, proof).unwrap().unwrap();
        }
    }

    #[test]
    fn test_proof_targeted_at_stranger_rejected_by_twin() {
        let mut net = Network::new(&[TWIN]).unwrap();
        net.add_foreign_at(STRANGER, stranger_address()).unwrap();
        net.home_mut().set_manifesto(EXECUTOR, "QmNew").unwrap();
        let proof = net
            .home()
            .issue_manifesto_proof(stranger_address(), "QmNew")
            .unwrap();

        net.relay_to(STRANGER, &proof).unwrap().unwrap();
        assert_eq!(
            net.relay_to(TWIN, &proof).unwrap(),
            Err(SyncError::InvalidProof)
        );
        // HOME itself sits at the shared address, not 0xDEF.
        assert_eq!(net.home_mut().claim(&proof), Err(SyncError::InvalidProof));
    }

    #[test]
    fn test_double_mint_rejected_everywhere() {
        let mut net = Network::new(&[TWIN, 137]).unwrap();
        let id = net.mint_on_home(member(1), "ipfs://a").unwrap();
        let proof = net.home().issue_mint_proof(net.home().address(), id).unwrap();
        net.relay_all(&proof).unwrap();

        for (chain, result) in net.relay(&proof) {
            assert_eq!(result, Err(SyncError::AlreadyExists(id)), "chain {chain}");
        }
        // HOME already tracks the item too.
        assert_eq!(
            net.home_mut().claim(&proof),
            Err(SyncError::AlreadyExists(id))
        );
        assert_eq!(net.foreign(TWIN).unwrap().total_supply(), 1);
    }

    #[test]
    fn test_home_accepts_its_own_idempotent_proofs() {
        let mut net = Network::new(&[]).unwrap();
        let dest = net.home().address();
        net.home_mut().set_manifesto(EXECUTOR, "QmNew").unwrap();
        let proof = net.home().issue_manifesto_proof(dest, "QmNew").unwrap();
        net.home_mut().claim(&proof).unwrap();
        assert_eq!(net.home().parameters().manifesto(), "QmNew");
    }
}
