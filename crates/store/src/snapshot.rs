//! The complete in-memory state of all four collections at one instant.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::entity;
use stockroom_core::{ItemGroupId, ItemId, MovementId, WarehouseId};
use stockroom_inventory::{Item, ItemGroup, Movement, Warehouse};

use crate::error::StorageError;

/// Label shown for a reference whose target no longer exists.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Persisted layout: `{ items, warehouses, movements, itemGroups }`.
///
/// Collections keep insertion order. Snapshots are handed out behind an
/// `Arc` and never mutated in place once shared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub warehouses: Vec<Warehouse>,
    #[serde(default)]
    pub movements: Vec<Movement>,
    #[serde(default)]
    pub item_groups: Vec<ItemGroup>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        entity::find(&self.items, id)
    }

    pub fn warehouse(&self, id: &WarehouseId) -> Option<&Warehouse> {
        entity::find(&self.warehouses, id)
    }

    pub fn movement(&self, id: &MovementId) -> Option<&Movement> {
        entity::find(&self.movements, id)
    }

    pub fn item_group(&self, id: &ItemGroupId) -> Option<&ItemGroup> {
        entity::find(&self.item_groups, id)
    }

    /// Items whose quantity is at or below their reorder point.
    pub fn low_stock_items(&self) -> Vec<&Item> {
        self.items.iter().filter(|i| i.is_low_stock()).collect()
    }

    /// Items with an expiry date on or before `now + window_days`.
    pub fn expiring_items(&self, now: DateTime<Utc>, window_days: u32) -> Vec<&Item> {
        let cutoff = expiry_cutoff(now, window_days);
        self.items.iter().filter(|i| i.expires_by(cutoff)).collect()
    }

    /// Warehouse name, or [`UNKNOWN_LABEL`] for a dangling reference.
    pub fn warehouse_label(&self, id: &WarehouseId) -> &str {
        self.warehouse(id).map_or(UNKNOWN_LABEL, |w| w.name.as_str())
    }

    /// Item name, or [`UNKNOWN_LABEL`] for a dangling reference.
    pub fn item_label(&self, id: &ItemId) -> &str {
        self.item(id).map_or(UNKNOWN_LABEL, |i| i.name.as_str())
    }

    pub fn items_in_warehouse(&self, id: &WarehouseId) -> Vec<&Item> {
        self.items.iter().filter(|i| &i.warehouse_id == id).collect()
    }

    /// Members of a group that still exist, in group order.
    pub fn items_in_group(&self, id: &ItemGroupId) -> Vec<&Item> {
        self.item_group(id)
            .map(|g| g.item_ids.iter().filter_map(|item_id| self.item(item_id)).collect())
            .unwrap_or_default()
    }

    /// Movements referencing `id`, oldest first.
    pub fn movements_for_item(&self, id: &ItemId) -> Vec<&Movement> {
        self.movements.iter().filter(|m| &m.item_id == id).collect()
    }

    /// Items whose owning warehouse no longer exists.
    pub fn orphaned_items(&self) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|i| self.warehouse(&i.warehouse_id).is_none())
            .collect()
    }
}

/// Last expiry date that still counts as "expiring" when evaluated at `now`.
pub fn expiry_cutoff(now: DateTime<Utc>, window_days: u32) -> NaiveDate {
    let today = now.date_naive();
    today
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX)
}
