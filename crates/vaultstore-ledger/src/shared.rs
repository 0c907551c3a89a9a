

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::broadcast;
use vaultstore_types::{AccountId, Amount, LedgerEvent, Result, VaultError};

use crate::config::StoreConfig;
use crate::events::BroadcastSink;
use crate::memory::LedgerStore;
use crate::snapshot::StoreSnapshot;
use crate::store::OwnedStore;

/// Thread-safe handle to a [`LedgerStore`].
///
/// Mutations are serialized behind a write lock and publish their event
/// while still holding it, so subscribers observe events in commit order.
/// Reads share the lock and never see a half-applied write.
#[derive(Debug, Clone)]
pub struct SharedLedgerStore {
    inner: Arc<RwLock<LedgerStore>>,
    events: broadcast::Sender<LedgerEvent>,
}

impl SharedLedgerStore {
    pub fn new(owner: AccountId) -> Self {
        let config = StoreConfig::default();
        let (sender, _) = broadcast::channel(config.event_channel_capacity);
        Self::wrap(LedgerStore::with_config(owner, &config), sender)
    }

    pub fn with_config(owner: AccountId, config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        Self::from_store(
            LedgerStore::with_config(owner, config),
            config.event_channel_capacity,
        )
    }

    /// Wrap an existing store with a broadcast channel of `capacity` events
    pub fn from_store(store: LedgerStore, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(VaultError::Config(
                "event_channel_capacity must be greater than zero".to_string(),
            ));
        }
        let (sender, _) = broadcast::channel(capacity);
        Ok(Self::wrap(store, sender))
    }

    fn wrap(mut store: LedgerStore, sender: broadcast::Sender<LedgerEvent>) -> Self {
        store.add_sink(Box::new(BroadcastSink::new(sender.clone())));
        SharedLedgerStore {
            inner: Arc::new(RwLock::new(store)),
            events: sender,
        }
    }

    /// Receive every event emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    pub fn owner(&self) -> AccountId {
        self.read().owner().clone()
    }

    pub fn set_value(&self, caller: &AccountId, new_value: i64) -> Result<LedgerEvent> {
        self.write().set_value(caller, new_value)
    }

    pub fn deposit(&self, caller: &AccountId, amount: Amount) -> Result<LedgerEvent> {
        self.write().deposit(caller, amount)
    }

    pub fn withdraw(&self, caller: &AccountId, amount: Amount) -> Result<LedgerEvent> {
        self.write().withdraw(caller, amount)
    }

    pub fn value(&self) -> i64 {
        self.read().value()
    }

    pub fn balance(&self, account: &AccountId) -> Amount {
        self.read().balance(account)
    }

    pub fn events(&self) -> Vec<LedgerEvent> {
        self.read().events().to_vec()
    }

    /// Take the retained event history, leaving it empty
    pub fn drain_events(&self) -> Vec<LedgerEvent> {
        self.write().drain_events()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.read().snapshot()
    }

    // Mutations are all-or-nothing, so a panic elsewhere never leaves the
    // store half-written and a poisoned lock is safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, LedgerStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
