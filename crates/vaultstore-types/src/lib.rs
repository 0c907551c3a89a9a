

mod account;
mod amount;
mod event;
mod error;

pub use account::AccountId;
pub use amount::{Amount, DECIMALS};
pub use event::LedgerEvent;
pub use error::{Result, VaultError};
