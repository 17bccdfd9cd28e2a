//! # Algorithms Module
//!
//! Pure protocol logic over an explicit [`DaoState`](crate::domain::DaoState):
//! digest codec, HOME-side issuance, claim verification and application,
//! direct membership mutations and CREATE2 addressing.

pub mod codec;
pub mod deployment;
pub mod issuer;
pub mod membership;
pub mod verifier;

pub use codec::{
    compute_digest, decode_payload, decode_proof, digest, encode, encode_payload, encode_proof,
    word,
};
pub use deployment::create2_address;
pub use issuer::{
    issue_burn_proof, issue_delegation_proof, issue_manifesto_proof, issue_metadata_proof,
    issue_mint_proof, issue_parameter_proof,
};
pub use verifier::{
    apply_parameter, claim, claim_burn, claim_delegation, claim_kind, claim_manifesto_update,
    claim_metadata_update, claim_mint, claim_parameter_update, verify,
};
