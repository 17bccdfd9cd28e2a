//! # Ordering Without Guarantees
//!
//! Proofs carry no sequence number. A replica reflects whichever proof it
//! applied last, chains may lag each other, and convergence only follows
//! when a relayer delivers in issuance order.

#[cfg(test)]
mod tests {
    use crate::harness::{Network, EXECUTOR};
    use crate::integration::convergence::member;
    use dao_sync::algorithms::word;
    use dao_sync::{GovernanceApi, MembershipApi, OperationTag, ProofIssuerApi, SyncError, U256};

    #[test]
    fn test_last_applied_wins_not_last_issued() {
        let mut net = Network::new(&[10]).unwrap();
        let dest = net.home().address();

        net.home_mut().set_manifesto(EXECUTOR, "QmV2").unwrap();
        let v2 = net.home().issue_manifesto_proof(dest, "QmV2").unwrap();
        net.home_mut().set_manifesto(EXECUTOR, "QmV3").unwrap();
        let v3 = net.home().issue_manifesto_proof(dest, "QmV3").unwrap();

        // #3 before #2.
        net.relay_to(10, &v3).unwrap().unwrap();
        net.relay_to(10, &v2).unwrap().unwrap();
        assert_eq!(net.foreign(10).unwrap().parameters().manifesto(), "QmV2");
        assert!(!net.converged());

        // Re-delivering the latest proof repairs the replica.
        net.relay_to(10, &v3).unwrap().unwrap();
        assert!(net.converged());
    }

    #[test]
    fn test_parameters_replicate_independently() {
        let mut net = Network::new(&[10]).unwrap();
        let dest = net.home().address();

        net.home_mut().set_voting_period(EXECUTOR, 10).unwrap();
        net.home_mut()
            .update_quorum_numerator(EXECUTOR, U256::from(20))
            .unwrap();
        let quorum = net
            .home()
            .issue_parameter_proof(dest, OperationTag::UpdateQuorumNumerator, &word(U256::from(20)))
            .unwrap();

        // Only the quorum proof is relayed.
        net.relay_to(10, &quorum).unwrap().unwrap();
        let foreign = net.foreign(10).unwrap();
        assert_eq!(foreign.parameters().quorum_numerator(), U256::from(20));
        assert_ne!(foreign.parameters().voting_period(), 10);
    }

    #[test]
    fn test_chains_lag_independently() {
        let mut net = Network::new(&[10, 137]).unwrap();
        let dest = net.home().address();
        net.home_mut().set_manifesto(EXECUTOR, "QmNew").unwrap();
        let proof = net.home().issue_manifesto_proof(dest, "QmNew").unwrap();

        net.relay_to(137, &proof).unwrap().unwrap();
        assert_eq!(net.divergent_chains(), vec![10]);
        net.relay_to(10, &proof).unwrap().unwrap();
        assert!(net.converged());
    }

    #[test]
    fn test_metadata_before_mint_blocks_the_mint_claim() {
        let mut net = Network::new(&[10]).unwrap();
        let dest = net.home().address();
        let id = net.mint_on_home(member(1), "ipfs://a").unwrap();
        let mint = net.home().issue_mint_proof(dest, id).unwrap();
        net.home_mut().set_metadata(EXECUTOR, id, "ipfs://b").unwrap();
        let meta = net.home().issue_metadata_proof(dest, id, "ipfs://b").unwrap();

        // Metadata first marks the item present without an owner.
        net.relay_to(10, &meta).unwrap().unwrap();
        let err = net.relay_to(10, &mint).unwrap().unwrap_err();
        assert_eq!(err, SyncError::AlreadyExists(id));

        let foreign = net.foreign(10).unwrap();
        assert!(foreign.exists_on_chain(id));
        assert!(foreign.owner_of(id).is_err());
        assert!(!net.converged());
    }

    #[test]
    fn test_burn_before_mint_then_mint_resurrects() {
        let mut net = Network::new(&[10]).unwrap();
        let dest = net.home().address();
        let id = net.mint_on_home(member(1), "ipfs://a").unwrap();
        let mint = net.home().issue_mint_proof(dest, id).unwrap();
        net.home_mut().burn(EXECUTOR, id).unwrap();
        let burn = net.home().issue_burn_proof(dest, id).unwrap();

        net.relay_to(10, &burn).unwrap().unwrap();
        net.relay_to(10, &mint).unwrap().unwrap();

        // HOME burned it; the replica holds it.
        assert!(!net.home().exists_on_chain(id));
        assert_eq!(net.foreign(10).unwrap().owner_of(id).unwrap(), member(1));
        assert!(!net.converged());
    }

    #[test]
    fn test_stale_mint_replays_after_claimed_burn() {
        let mut net = Network::new(&[10]).unwrap();
        let dest = net.home().address();
        let id = net.mint_on_home(member(1), "ipfs://a").unwrap();
        let mint = net.home().issue_mint_proof(dest, id).unwrap();
        net.home_mut().burn(EXECUTOR, id).unwrap();
        let burn = net.home().issue_burn_proof(dest, id).unwrap();

        net.relay_to(10, &mint).unwrap().unwrap();
        net.relay_to(10, &burn).unwrap().unwrap();
        assert!(net.converged());

        // The burn cleared the presence flag, so the old mint proof applies again.
        net.relay_to(10, &mint).unwrap().unwrap();
        assert!(net.foreign(10).unwrap().exists_on_chain(id));
    }
}
