//! Change notifications published after every effective mutation.

use chrono::{DateTime, Utc};

use stockroom_core::{ItemGroupId, ItemId, MovementId, WarehouseId};
use stockroom_events::Event;

/// What changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    ItemAdded(ItemId),
    ItemUpdated(ItemId),
    ItemDeleted(ItemId),
    WarehouseAdded(WarehouseId),
    WarehouseUpdated(WarehouseId),
    WarehouseDeleted(WarehouseId),
    MovementRecorded { movement_id: MovementId, item_id: ItemId },
    ItemGroupAdded(ItemGroupId),
    ItemGroupUpdated(ItemGroupId),
    ItemGroupDeleted(ItemGroupId),
}

/// Announces that the store moved to snapshot `revision`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub revision: u64,
    pub kind: ChangeKind,
    pub occurred_at: DateTime<Utc>,
}

impl Event for StoreChange {
    fn event_type(&self) -> &'static str {
        match self.kind {
            ChangeKind::ItemAdded(_) => "inventory.item.added",
            ChangeKind::ItemUpdated(_) => "inventory.item.updated",
            ChangeKind::ItemDeleted(_) => "inventory.item.deleted",
            ChangeKind::WarehouseAdded(_) => "inventory.warehouse.added",
            ChangeKind::WarehouseUpdated(_) => "inventory.warehouse.updated",
            ChangeKind::WarehouseDeleted(_) => "inventory.warehouse.deleted",
            ChangeKind::MovementRecorded { .. } => "inventory.movement.recorded",
            ChangeKind::ItemGroupAdded(_) => "inventory.item_group.added",
            ChangeKind::ItemGroupUpdated(_) => "inventory.item_group.updated",
            ChangeKind::ItemGroupDeleted(_) => "inventory.item_group.deleted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(kind: ChangeKind) -> StoreChange {
        StoreChange { revision: 7, kind, occurred_at: Utc::now() }
    }

    #[test]
    fn event_types_are_dotted_per_collection() {
        let item = ItemId::from_u128(1);
        let cases = [
            (ChangeKind::ItemAdded(item), "inventory.item.added"),
            (ChangeKind::ItemDeleted(item), "inventory.item.deleted"),
            (
                ChangeKind::WarehouseUpdated(WarehouseId::from_u128(1)),
                "inventory.warehouse.updated",
            ),
            (
                ChangeKind::MovementRecorded {
                    movement_id: MovementId::from_u128(1),
                    item_id: item,
                },
                "inventory.movement.recorded",
            ),
            (
                ChangeKind::ItemGroupAdded(ItemGroupId::from_u128(1)),
                "inventory.item_group.added",
            ),
        ];

        for (kind, expected) in cases {
            let event = change(kind);
            assert_eq!(event.event_type(), expected);
            assert_eq!(event.version(), 1);
        }
    }

    #[test]
    fn occurred_at_is_the_recorded_timestamp() {
        let event = change(ChangeKind::ItemUpdated(ItemId::from_u128(2)));
        assert_eq!(Event::occurred_at(&event), event.occurred_at);
    }
}
