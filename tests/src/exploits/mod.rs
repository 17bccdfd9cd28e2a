//! # Attack Simulations
//!
//! What a hostile relayer or member can try with nothing but valid proofs,
//! tampered proofs and the public entry points.

pub mod replay;
pub mod soulbound;
