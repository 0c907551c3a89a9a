//! Simple VaultStore demo
//!
//! Runs the owner/non-owner walkthrough against a shared store and logs
//! every notification seen by a subscriber task.
//! Set `VAULTSTORE_CONFIG` to a JSON config file to override defaults.

use tracing_subscriber::EnvFilter;
use vaultstore_ledger::{monitor, SharedLedgerStore, StoreConfig};
use vaultstore_types::{AccountId, Amount, Result};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var("VAULTSTORE_CONFIG") {
        Ok(path) => StoreConfig::load_from_file(path)?,
        Err(_) => StoreConfig::default(),
    };

    let owner = AccountId::new("owner");
    let alice = AccountId::new("alice");
    let store = SharedLedgerStore::with_config(owner.clone(), &config)?;

    let events = store.subscribe();
    let monitor_task = tokio::spawn(monitor(events, |event| {
        tracing::info!(event = %event, "notification");
    }));

    store.set_value(&owner, 100)?;
    store.deposit(&owner, Amount::parse("1.0")?)?;
    store.withdraw(&owner, Amount::parse("0.4")?)?;
    store.deposit(&alice, Amount::parse("2.0")?)?;

    if let Err(e) = store.withdraw(&alice, Amount::parse("0.1")?) {
        tracing::warn!(error = %e, "withdrawal rejected");
    }

    let snapshot = store.snapshot();
    tracing::info!(
        value = snapshot.value,
        owner_balance = %store.balance(&owner),
        alice_balance = %store.balance(&alice),
        digest = %snapshot.digest()?,
        "final state"
    );

    // closing the channel ends the monitor loop
    drop(store);
    match monitor_task.await {
        Ok(skipped) if skipped > 0 => tracing::warn!(skipped, "monitor missed notifications"),
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "monitor task failed"),
    }

    Ok(())
}
