

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info};
use vaultstore_types::{AccountId, Amount, LedgerEvent, Result, VaultError};

use crate::config::StoreConfig;
use crate::events::{EventLog, EventSink};
use crate::snapshot::StoreSnapshot;
use crate::store::OwnedStore;

/// In-memory single-writer store.
/// Owner is fixed at construction; balances are never negative.
pub struct LedgerStore {
    owner: AccountId,
    value: i64,
    balances: BTreeMap<AccountId, Amount>,
    log: Option<EventLog>,
    sinks: Vec<Box<dyn EventSink + Send + Sync>>,
}

impl LedgerStore {
    /// Construct a store owned by the constructing identity
    pub fn new(owner: AccountId) -> Self {
        Self::with_config(owner, &StoreConfig::default())
    }

    pub fn with_config(owner: AccountId, config: &StoreConfig) -> Self {
        info!(owner = %owner, initial_value = config.initial_value, "ledger store created");
        LedgerStore {
            owner,
            value: config.initial_value,
            balances: BTreeMap::new(),
            log: config
                .record_events
                .then(|| EventLog::with_retention(config.event_retention)),
            sinks: Vec::new(),
        }
    }

    /// Register an additional event consumer
    pub fn add_sink(&mut self, sink: Box<dyn EventSink + Send + Sync>) {
        self.sinks.push(sink);
    }

    /// Ordered history of emitted events, empty when recording is disabled
    pub fn events(&self) -> &[LedgerEvent] {
        self.log.as_ref().map(EventLog::as_slice).unwrap_or(&[])
    }

    /// Take the retained event history, leaving it empty
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        self.log.as_mut().map(EventLog::drain).unwrap_or_default()
    }

    /// Accounts holding a ledger entry
    pub fn accounts(&self) -> Vec<AccountId> {
        self.balances.keys().cloned().collect()
    }

    /// Sum of all balances
    pub fn total_balance(&self) -> Result<Amount> {
        self.balances.values().try_fold(Amount::ZERO, |acc, amount| {
            acc.checked_add(*amount)
                .ok_or_else(|| VaultError::BalanceOverflow("total balance".to_string()))
        })
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            owner: self.owner.clone(),
            value: self.value,
            balances: self.balances.clone(),
        }
    }

    fn require_owner(&self, caller: &AccountId, operation: &str) -> Result<()> {
        if self.is_owner(caller) {
            return Ok(());
        }
        debug!(caller = %caller, operation, "rejected: caller is not the owner");
        Err(VaultError::Unauthorized {
            caller: caller.clone(),
        })
    }

    fn emit(&mut self, event: LedgerEvent) -> LedgerEvent {
        if let Some(log) = self.log.as_mut() {
            log.emit(&event);
        }
        for sink in &mut self.sinks {
            sink.emit(&event);
        }
        event
    }
}

impl OwnedStore for LedgerStore {
    fn owner(&self) -> &AccountId {
        &self.owner
    }

    fn set_value(&mut self, caller: &AccountId, new_value: i64) -> Result<LedgerEvent> {
        self.require_owner(caller, "set_value")?;

        let old_value = self.value;
        self.value = new_value;
        info!(old_value, new_value, "value changed");

        Ok(self.emit(LedgerEvent::ValueChanged {
            old_value,
            new_value,
        }))
    }

    fn deposit(&mut self, caller: &AccountId, amount: Amount) -> Result<LedgerEvent> {
        if !amount.is_positive() {
            debug!(caller = %caller, "rejected: zero deposit");
            return Err(VaultError::InvalidAmount(
                "deposit amount must be positive".to_string(),
            ));
        }

        let updated = self.balance(caller).checked_add(amount).ok_or_else(|| {
            debug!(caller = %caller, amount = %amount, "rejected: balance overflow");
            VaultError::BalanceOverflow(format!("deposit of {} to {}", amount, caller))
        })?;

        self.balances.insert(caller.clone(), updated);
        info!(account = %caller, amount = %amount, balance = %updated, "deposited");

        Ok(self.emit(LedgerEvent::Deposited {
            account: caller.clone(),
            amount,
        }))
    }

    fn withdraw(&mut self, caller: &AccountId, amount: Amount) -> Result<LedgerEvent> {
        self.require_owner(caller, "withdraw")?;

        let available = self.balance(caller);
        let updated = available.checked_sub(amount).ok_or_else(|| {
            debug!(caller = %caller, amount = %amount, available = %available, "rejected: insufficient balance");
            VaultError::InsufficientBalance {
                account: caller.clone(),
                requested: amount,
                available,
            }
        })?;

        self.balances.insert(caller.clone(), updated);
        info!(account = %caller, amount = %amount, balance = %updated, "withdrawn");

        Ok(self.emit(LedgerEvent::Withdrawn {
            account: caller.clone(),
            amount,
        }))
    }

    fn value(&self) -> i64 {
        self.value
    }

    fn balance(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }
}

impl fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerStore")
            .field("owner", &self.owner)
            .field("value", &self.value)
            .field("balances", &self.balances)
            .field("events", &self.events().len())
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
