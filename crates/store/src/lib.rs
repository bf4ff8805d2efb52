//! `stockroom-store`: the inventory state container.
//!
//! One [`InventoryStore`] owns the four record collections (items,
//! warehouses, movements, item groups) as an immutable [`Snapshot`] behind an
//! `Arc`. Every mutation produces a new snapshot (copy-on-write), persists it
//! to a [`SnapshotStorage`] slot, and announces a [`StoreChange`] to
//! subscribers. Derived views and dashboard metrics are recomputed from the
//! current snapshot on every read.

pub mod change;
pub mod config;
pub mod error;
pub mod metrics;
pub mod sample;
pub mod scope;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use change::{ChangeKind, StoreChange};
pub use config::StoreConfig;
pub use error::StorageError;
pub use metrics::{
    CategorySummary, DashboardMetrics, ItemActivity, MovementTotals, TypeTotal, WarehouseSummary,
};
pub use scope::SharedStore;
pub use snapshot::{Snapshot, UNKNOWN_LABEL};
pub use storage::{FileStorage, InMemoryStorage, SnapshotStorage};
pub use store::{InventoryStore, InventoryView};
