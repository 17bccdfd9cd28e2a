//! # Deployment Addressing
//!
//! CREATE2 address derivation (EIP-1014). Identical bytecode and salt give the
//! same contract address on every chain, which is what lets one proof
//! destination serve HOME and all FOREIGN deployments.

use crate::domain::{Address, Hash};
use shared_crypto::{keccak256, keccak256_many};

/// Address = keccak256(0xff ++ deployer ++ salt ++ `keccak256(init_code)`)\[12:\]
#[must_use]
pub fn create2_address(deployer: Address, salt: Hash, init_code: &[u8]) -> Address {
    let code_hash = keccak256(init_code);
    let hash = keccak256_many(&[
        &[0xff][..],
        &deployer.as_bytes()[..],
        &salt.as_bytes()[..],
        &code_hash[..],
    ]);

    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..32]);
    Address::new(addr)
}
