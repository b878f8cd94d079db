use cosmwasm_std::{MessageInfo, Uint256};
use sha2::{Digest, Sha256};

use crate::error::ContractError;

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}

/// Deterministic word derivation: sha256(request_id_be || index_be) read
/// big-endian. Reproducible across runs so equivalence tests stay hermetic;
/// tests needing specific values pass an override instead.
pub fn derive_random_words(request_id: u64, num_words: u32) -> Vec<Uint256> {
    (0..num_words)
        .map(|index| {
            let mut hasher = Sha256::new();
            hasher.update(request_id.to_be_bytes());
            hasher.update(index.to_be_bytes());
            let digest: [u8; 32] = hasher.finalize().into();
            Uint256::from_be_bytes(digest)
        })
        .collect()
}
