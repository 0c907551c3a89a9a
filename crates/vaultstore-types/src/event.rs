

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{AccountId, Amount};

/// Notification emitted by every successful store mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum LedgerEvent {
    ValueChanged { old_value: i64, new_value: i64 },
    Deposited { account: AccountId, amount: Amount },
    Withdrawn { account: AccountId, amount: Amount },
}

impl LedgerEvent {
    /// Event name as observed by subscribers
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::ValueChanged { .. } => "ValueChanged",
            LedgerEvent::Deposited { .. } => "Deposited",
            LedgerEvent::Withdrawn { .. } => "Withdrawn",
        }
    }

    /// Account whose balance the event touched, if any
    pub fn account(&self) -> Option<&AccountId> {
        match self {
            LedgerEvent::ValueChanged { .. } => None,
            LedgerEvent::Deposited { account, .. } | LedgerEvent::Withdrawn { account, .. } => {
                Some(account)
            }
        }
    }
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerEvent::ValueChanged { old_value, new_value } => {
                write!(f, "ValueChanged({}, {})", old_value, new_value)
            }
            LedgerEvent::Deposited { account, amount } => {
                write!(f, "Deposited({}, {})", account, amount)
            }
            LedgerEvent::Withdrawn { account, amount } => {
                write!(f, "Withdrawn({}, {})", account, amount)
            }
        }
    }
}
