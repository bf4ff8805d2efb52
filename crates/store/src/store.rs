//! The inventory store: owns the snapshot and every operation that changes it.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use stockroom_core::entity;
use stockroom_core::{ItemGroupId, ItemId, MovementId, WarehouseId};
use stockroom_events::{Event, EventBus, InMemoryEventBus, Subscription};
use stockroom_inventory::{
    Item, ItemGroup, ItemGroupPatch, ItemPatch, Movement, NewItem, NewItemGroup, NewMovement,
    NewWarehouse, Warehouse, WarehousePatch,
};

use crate::change::{ChangeKind, StoreChange};
use crate::config::StoreConfig;
use crate::error::StorageError;
use crate::sample;
use crate::snapshot::Snapshot;
use crate::storage::{InMemoryStorage, SnapshotStorage};

/// Everything a consumer renders from: the raw collections plus the two
/// derived views, taken at one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryView {
    pub revision: u64,
    pub snapshot: Arc<Snapshot>,
    pub low_stock_items: Vec<Item>,
    pub expiring_items: Vec<Item>,
}

/// Single-session inventory store.
///
/// Operations run to completion synchronously and are never interleaved
/// (`&mut self`). Each effective mutation:
///
/// 1. builds the next snapshot without touching any snapshot already handed
///    out by [`InventoryStore::snapshot`],
/// 2. writes the full snapshot to storage under the configured key,
/// 3. publishes a [`StoreChange`] to subscribers.
///
/// Lookups that miss (update/delete of an unknown id) change nothing, write
/// nothing and publish nothing.
pub struct InventoryStore {
    config: StoreConfig,
    state: Arc<Snapshot>,
    storage: Arc<dyn SnapshotStorage>,
    bus: InMemoryEventBus<StoreChange>,
    revision: u64,
    last_persist_error: Option<StorageError>,
}

impl core::fmt::Debug for InventoryStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryStore")
            .field("config", &self.config)
            .field("revision", &self.revision)
            .field("items", &self.state.items.len())
            .field("warehouses", &self.state.warehouses.len())
            .field("movements", &self.state.movements.len())
            .field("item_groups", &self.state.item_groups.len())
            .field("last_persist_error", &self.last_persist_error)
            .finish()
    }
}

impl InventoryStore {
    /// Start a session from the sample dataset.
    pub fn new(config: StoreConfig, storage: Arc<dyn SnapshotStorage>) -> Self {
        Self::with_snapshot(config, storage, sample::sample_snapshot())
    }

    /// Start a session from an explicit snapshot.
    ///
    /// The starting state is written to storage straight away, so the slot
    /// always mirrors the session.
    pub fn with_snapshot(
        config: StoreConfig,
        storage: Arc<dyn SnapshotStorage>,
        snapshot: Snapshot,
    ) -> Self {
        let mut store = Self {
            config,
            state: Arc::new(snapshot),
            storage,
            bus: InMemoryEventBus::new(),
            revision: 0,
            last_persist_error: None,
        };
        store.persist();
        store
    }

    /// Restore the last persisted snapshot, falling back to the sample
    /// dataset when the slot is empty, unreadable or malformed.
    pub fn open(config: StoreConfig, storage: Arc<dyn SnapshotStorage>) -> Self {
        let restored = match storage.read(&config.storage_key) {
            Ok(Some(json)) => match Snapshot::from_json(&json) {
                Ok(snapshot) => Some(snapshot),
                Err(err) => {
                    tracing::warn!(
                        key = %config.storage_key,
                        "persisted snapshot is malformed, using sample data: {err}"
                    );
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(
                    key = %config.storage_key,
                    "failed to read persisted snapshot, using sample data: {err}"
                );
                None
            }
        };

        match restored {
            Some(snapshot) => {
                tracing::info!(
                    key = %config.storage_key,
                    items = snapshot.items.len(),
                    movements = snapshot.movements.len(),
                    "restored inventory snapshot"
                );
                Self::with_snapshot(config, storage, snapshot)
            }
            None => {
                tracing::info!(key = %config.storage_key, "starting from sample inventory data");
                Self::new(config, storage)
            }
        }
    }

    /// Default configuration, in-memory storage, sample data.
    pub fn in_memory() -> Self {
        Self::new(StoreConfig::default(), Arc::new(InMemoryStorage::new()))
    }

    /// Default configuration, in-memory storage, no records.
    pub fn empty() -> Self {
        Self::with_snapshot(
            StoreConfig::default(),
            Arc::new(InMemoryStorage::new()),
            Snapshot::default(),
        )
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The current snapshot. Later mutations never alter it.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.state)
    }

    /// Number of effective mutations applied in this session.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Error from the most recent persistence attempt, cleared by the next
    /// successful write.
    pub fn last_persist_error(&self) -> Option<&StorageError> {
        self.last_persist_error.as_ref()
    }

    /// Receive one [`StoreChange`] per effective mutation from now on.
    pub fn subscribe(&self) -> Subscription<StoreChange> {
        self.bus.subscribe()
    }

    pub fn items(&self) -> &[Item] {
        &self.state.items
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.state.warehouses
    }

    pub fn movements(&self) -> &[Movement] {
        &self.state.movements
    }

    pub fn item_groups(&self) -> &[ItemGroup] {
        &self.state.item_groups
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.state.item(id)
    }

    pub fn warehouse(&self, id: &WarehouseId) -> Option<&Warehouse> {
        self.state.warehouse(id)
    }

    pub fn item_group(&self, id: &ItemGroupId) -> Option<&ItemGroup> {
        self.state.item_group(id)
    }

    pub fn low_stock_items(&self) -> Vec<&Item> {
        self.state.low_stock_items()
    }

    /// Items expiring within the configured window of the current time.
    pub fn expiring_items(&self) -> Vec<&Item> {
        self.expiring_items_at(Utc::now())
    }

    pub fn expiring_items_at(&self, now: DateTime<Utc>) -> Vec<&Item> {
        self.state.expiring_items(now, self.config.expiry_window_days)
    }

    /// Collections plus derived views, evaluated now.
    pub fn view(&self) -> InventoryView {
        self.view_at(Utc::now())
    }

    pub fn view_at(&self, now: DateTime<Utc>) -> InventoryView {
        InventoryView {
            revision: self.revision,
            snapshot: self.snapshot(),
            low_stock_items: self.low_stock_items().into_iter().cloned().collect(),
            expiring_items: self.expiring_items_at(now).into_iter().cloned().collect(),
        }
    }

    // ---- items ----

    /// Append a new item. SKUs are not checked for uniqueness.
    pub fn add_item(&mut self, new: NewItem) -> ItemId {
        let id = ItemId::new();
        let item = Item::from_new(id, new, Utc::now());
        tracing::debug!(item_id = %id, sku = %item.sku, "item added");

        self.state_mut().items.push(item);
        self.commit(ChangeKind::ItemAdded(id));
        id
    }

    /// Merge `patch` onto the item with `id`. Returns whether it existed.
    pub fn update_item(&mut self, id: ItemId, patch: ItemPatch) -> bool {
        let Some(idx) = entity::position(&self.state.items, &id) else {
            tracing::debug!(item_id = %id, "update of unknown item ignored");
            return false;
        };

        patch.apply(&mut self.state_mut().items[idx]);
        tracing::debug!(item_id = %id, "item updated");
        self.commit(ChangeKind::ItemUpdated(id));
        true
    }

    /// Remove the item with `id`. Movements and group memberships that
    /// reference it are left in place.
    pub fn delete_item(&mut self, id: ItemId) -> bool {
        let Some(idx) = entity::position(&self.state.items, &id) else {
            tracing::debug!(item_id = %id, "delete of unknown item ignored");
            return false;
        };

        self.state_mut().items.remove(idx);
        tracing::debug!(item_id = %id, "item deleted");
        self.commit(ChangeKind::ItemDeleted(id));
        true
    }

    // ---- warehouses ----

    pub fn add_warehouse(&mut self, new: NewWarehouse) -> WarehouseId {
        let id = WarehouseId::new();
        let warehouse = Warehouse::from_new(id, new);
        tracing::debug!(warehouse_id = %id, name = %warehouse.name, "warehouse added");

        self.state_mut().warehouses.push(warehouse);
        self.commit(ChangeKind::WarehouseAdded(id));
        id
    }

    pub fn update_warehouse(&mut self, id: WarehouseId, patch: WarehousePatch) -> bool {
        let Some(idx) = entity::position(&self.state.warehouses, &id) else {
            tracing::debug!(warehouse_id = %id, "update of unknown warehouse ignored");
            return false;
        };

        patch.apply(&mut self.state_mut().warehouses[idx]);
        tracing::debug!(warehouse_id = %id, "warehouse updated");
        self.commit(ChangeKind::WarehouseUpdated(id));
        true
    }

    /// Remove the warehouse with `id`. Items still pointing at it keep the
    /// dangling reference.
    pub fn delete_warehouse(&mut self, id: WarehouseId) -> bool {
        let Some(idx) = entity::position(&self.state.warehouses, &id) else {
            tracing::debug!(warehouse_id = %id, "delete of unknown warehouse ignored");
            return false;
        };

        self.state_mut().warehouses.remove(idx);
        let stranded = self.state.items_in_warehouse(&id).len();
        if stranded > 0 {
            tracing::debug!(
                warehouse_id = %id,
                stranded,
                "warehouse deleted with items still assigned"
            );
        } else {
            tracing::debug!(warehouse_id = %id, "warehouse deleted");
        }
        self.commit(ChangeKind::WarehouseDeleted(id));
        true
    }

    // ---- movements ----

    /// Record a movement and apply its effect to the referenced item in the
    /// same step.
    ///
    /// - `in`: quantity rises by the movement quantity.
    /// - `out`: quantity falls by it; below zero only under
    ///   [`StockPolicy::AllowNegative`](stockroom_inventory::StockPolicy).
    /// - `transfer`: quantity unchanged, warehouse reassigned to the
    ///   destination when one is given.
    ///
    /// A movement naming an unknown item is still logged; no item changes.
    pub fn add_movement(&mut self, new: NewMovement) -> MovementId {
        let id = MovementId::new();
        let movement = Movement::from_new(id, new, Utc::now());
        let item_id = movement.item_id;
        let policy = self.config.stock_policy;

        let state = self.state_mut();
        match entity::position(&state.items, &item_id) {
            Some(idx) => {
                let effect = movement.apply_to(&mut state.items[idx], policy);
                if effect.went_negative() {
                    tracing::warn!(
                        item_id = %item_id,
                        quantity = effect.new_quantity,
                        "stock went negative"
                    );
                }
                if effect.clamped {
                    tracing::debug!(item_id = %item_id, "outbound movement clamped at zero");
                }
                tracing::debug!(
                    movement_id = %id,
                    item_id = %item_id,
                    kind = %movement.kind,
                    from = effect.previous_quantity,
                    to = effect.new_quantity,
                    "movement recorded"
                );
            }
            None => {
                tracing::warn!(
                    movement_id = %id,
                    item_id = %item_id,
                    "movement recorded for unknown item"
                );
            }
        }
        state.movements.push(movement);

        self.commit(ChangeKind::MovementRecorded { movement_id: id, item_id });
        id
    }

    // ---- item groups ----

    pub fn add_item_group(&mut self, new: NewItemGroup) -> ItemGroupId {
        let id = ItemGroupId::new();
        let group = ItemGroup::from_new(id, new);
        tracing::debug!(group_id = %id, name = %group.name, "item group added");

        self.state_mut().item_groups.push(group);
        self.commit(ChangeKind::ItemGroupAdded(id));
        id
    }

    pub fn update_item_group(&mut self, id: ItemGroupId, patch: ItemGroupPatch) -> bool {
        let Some(idx) = entity::position(&self.state.item_groups, &id) else {
            tracing::debug!(group_id = %id, "update of unknown item group ignored");
            return false;
        };

        patch.apply(&mut self.state_mut().item_groups[idx]);
        tracing::debug!(group_id = %id, "item group updated");
        self.commit(ChangeKind::ItemGroupUpdated(id));
        true
    }

    /// Remove the group with `id`. `Item::group_ids` entries are left as-is.
    pub fn delete_item_group(&mut self, id: ItemGroupId) -> bool {
        let Some(idx) = entity::position(&self.state.item_groups, &id) else {
            tracing::debug!(group_id = %id, "delete of unknown item group ignored");
            return false;
        };

        self.state_mut().item_groups.remove(idx);
        tracing::debug!(group_id = %id, "item group deleted");
        self.commit(ChangeKind::ItemGroupDeleted(id));
        true
    }

    // ---- internals ----

    /// Writable access to the next snapshot. Clones the collections first if
    /// any reader still holds the current one.
    fn state_mut(&mut self) -> &mut Snapshot {
        Arc::make_mut(&mut self.state)
    }

    fn commit(&mut self, kind: ChangeKind) {
        self.revision += 1;
        self.persist();

        let change = StoreChange {
            revision: self.revision,
            kind,
            occurred_at: Utc::now(),
        };
        tracing::debug!(
            event_type = change.event_type(),
            revision = change.revision,
            "inventory store changed"
        );
        if let Err(err) = self.bus.publish(change) {
            tracing::warn!("failed to publish store change: {err}");
        }
    }

    /// Write the full snapshot. Failures are logged and remembered, never
    /// propagated: the in-memory state stays authoritative.
    fn persist(&mut self) {
        let result = self
            .state
            .to_json()
            .and_then(|json| self.storage.write(&self.config.storage_key, &json));

        match result {
            Ok(()) => self.last_persist_error = None,
            Err(err) => {
                tracing::warn!(
                    key = %self.config.storage_key,
                    revision = self.revision,
                    "failed to persist inventory snapshot: {err}"
                );
                self.last_persist_error = Some(err);
            }
        }
    }
}
