

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use vaultstore_types::{AccountId, Amount, Result};

/// Hash reference (hex-encoded SHA256)
pub type HashRef = String;

/// Compute SHA256 hash of data
pub fn compute_hash(data: &[u8]) -> HashRef {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Point-in-time view of store state for monitoring consumers.
/// Read-only: there is no restore path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub owner: AccountId,
    pub value: i64,
    pub balances: BTreeMap<AccountId, Amount>,
}

impl StoreSnapshot {
    /// Hex SHA256 of the JSON encoding; balances are ordered so equal state hashes equal
    pub fn digest(&self) -> Result<HashRef> {
        let json = serde_json::to_vec(self)?;
        Ok(compute_hash(&json))
    }
}
