

use vaultstore_types::{AccountId, Amount, LedgerEvent, Result};

/// Owner-administered value store with a per-account balance ledger.
///
/// Every mutation is all-or-nothing: on error no state changes and no
/// event is emitted. On success exactly one event is emitted and returned.
pub trait OwnedStore {
    /// The identity fixed at construction
    fn owner(&self) -> &AccountId;

    /// Replace the configuration value (owner only)
    fn set_value(&mut self, caller: &AccountId, new_value: i64) -> Result<LedgerEvent>;

    /// Credit `amount` to the caller's own balance
    fn deposit(&mut self, caller: &AccountId, amount: Amount) -> Result<LedgerEvent>;

    /// Debit `amount` from the caller's own balance (owner only)
    fn withdraw(&mut self, caller: &AccountId, amount: Amount) -> Result<LedgerEvent>;

    /// Current configuration value
    fn value(&self) -> i64;

    /// Balance for an account, zero if it never deposited
    fn balance(&self, account: &AccountId) -> Amount;

    fn is_owner(&self, account: &AccountId) -> bool {
        self.owner() == account
    }

    /// Check if account has sufficient balance
    fn has_sufficient(&self, account: &AccountId, required: Amount) -> bool {
        self.balance(account) >= required
    }
}
