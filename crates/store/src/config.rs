//! Store configuration.
//!
//! Settings come from the environment with defaults for everything:
//!
//! | variable | default |
//! |---|---|
//! | `STOCKROOM_STORAGE_KEY` | `inventoryData` |
//! | `STOCKROOM_DATA_DIR` | unset (in-memory storage) |
//! | `STOCKROOM_EXPIRY_WINDOW_DAYS` | `30` |
//! | `STOCKROOM_STOCK_POLICY` | `allow-negative` (or `clamp`) |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use stockroom_inventory::StockPolicy;

use crate::storage::{FileStorage, InMemoryStorage, SnapshotStorage};

/// Key of the slot the snapshot is written to.
pub const DEFAULT_STORAGE_KEY: &str = "inventoryData";

/// How far ahead the expiring-items view looks.
pub const DEFAULT_EXPIRY_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    /// Directory for file-backed storage. `None` keeps snapshots in memory.
    pub data_dir: Option<PathBuf>,
    pub expiry_window_days: u32,
    pub stock_policy: StockPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
            expiry_window_days: DEFAULT_EXPIRY_WINDOW_DAYS,
            stock_policy: StockPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Load from process environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup (unset → default).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(key) = lookup("STOCKROOM_STORAGE_KEY") {
            let key = key.trim();
            if key.is_empty() {
                anyhow::bail!("STOCKROOM_STORAGE_KEY must not be empty");
            }
            config.storage_key = key.to_string();
        }

        if let Some(dir) = lookup("STOCKROOM_DATA_DIR") {
            if !dir.trim().is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(days) = lookup("STOCKROOM_EXPIRY_WINDOW_DAYS") {
            config.expiry_window_days = days
                .trim()
                .parse()
                .with_context(|| format!("invalid STOCKROOM_EXPIRY_WINDOW_DAYS: {days:?}"))?;
        }

        if let Some(policy) = lookup("STOCKROOM_STOCK_POLICY") {
            config.stock_policy = policy
                .parse()
                .with_context(|| format!("invalid STOCKROOM_STOCK_POLICY: {policy:?}"))?;
        }

        Ok(config)
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_expiry_window_days(mut self, days: u32) -> Self {
        self.expiry_window_days = days;
        self
    }

    pub fn with_stock_policy(mut self, policy: StockPolicy) -> Self {
        self.stock_policy = policy;
        self
    }

    /// Build the storage backend this configuration asks for.
    pub fn open_storage(&self) -> anyhow::Result<Arc<dyn SnapshotStorage>> {
        match &self.data_dir {
            Some(dir) => {
                let storage = FileStorage::new(dir)
                    .with_context(|| format!("failed to open snapshot storage at {dir:?}"))?;
                Ok(Arc::new(storage))
            }
            None => Ok(Arc::new(InMemoryStorage::new())),
        }
    }
}
