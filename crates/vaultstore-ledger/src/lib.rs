

mod store;
mod memory;
mod events;
mod config;
mod snapshot;
mod shared;

pub use store::OwnedStore;
pub use memory::LedgerStore;
pub use events::{monitor, BroadcastSink, EventLog, EventSink};
pub use config::StoreConfig;
pub use snapshot::{compute_hash, HashRef, StoreSnapshot};
pub use shared::SharedLedgerStore;
