

use thiserror::Error;

use crate::{AccountId, Amount};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    #[error("Unauthorized: {caller} is not the owner")]
    Unauthorized { caller: AccountId },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient balance: account={account}, requested={requested}, available={available}")]
    InsufficientBalance {
        account: AccountId,
        requested: Amount,
        available: Amount,
    },

    #[error("Balance overflow: {0}")]
    BalanceOverflow(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl VaultError {
    /// True for the guard failures raised by store operations
    pub fn is_guard_failure(&self) -> bool {
        matches!(
            self,
            VaultError::Unauthorized { .. }
                | VaultError::InvalidAmount(_)
                | VaultError::InsufficientBalance { .. }
                | VaultError::BalanceOverflow(_)
        )
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        VaultError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        VaultError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VaultError>;
