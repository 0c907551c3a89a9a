

use serde::{Deserialize, Serialize};
use std::path::Path;
use vaultstore_types::{Result, VaultError};

/// Configuration for a ledger store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Configuration value at construction
    pub initial_value: i64,

    /// Buffered events per subscriber before lagging receivers drop old ones
    pub event_channel_capacity: usize,

    /// Keep an in-memory history of emitted events
    pub record_events: bool,

    /// Newest events kept in that history; older ones are discarded
    pub event_retention: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_value: 0,
            event_channel_capacity: 1024,
            record_events: true,
            event_retention: 1024,
        }
    }
}

impl StoreConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: StoreConfig =
            serde_json::from_str(json).map_err(|e| VaultError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.event_channel_capacity == 0 {
            return Err(VaultError::Config(
                "event_channel_capacity must be greater than zero".to_string(),
            ));
        }
        if self.event_retention == 0 {
            return Err(VaultError::Config(
                "event_retention must be greater than zero; disable record_events instead"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
