//! Fixed sample dataset every new session starts from.
//!
//! Ids are deterministic so consumers and tests can refer to sample records
//! directly. Prices and costs are in paise.

use std::num::NonZeroU32;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use stockroom_core::{ItemGroupId, ItemId, MovementId, WarehouseId};
use stockroom_inventory::{
    Item, ItemComponent, ItemGroup, Movement, NewItem, NewItemGroup, NewMovement, NewWarehouse,
    Warehouse,
};

use crate::snapshot::Snapshot;

pub const MAIN_WAREHOUSE: WarehouseId = WarehouseId::from_u128(1);
pub const NORTH_WAREHOUSE: WarehouseId = WarehouseId::from_u128(2);
pub const WEST_COAST_WAREHOUSE: WarehouseId = WarehouseId::from_u128(3);

pub const LAPTOP: ItemId = ItemId::from_u128(1);
pub const WIRELESS_MOUSE: ItemId = ItemId::from_u128(2);
pub const USB_HUB: ItemId = ItemId::from_u128(3);
pub const VITAMIN_C: ItemId = ItemId::from_u128(4);
pub const PROTEIN_POWDER: ItemId = ItemId::from_u128(5);
pub const OFFICE_DESK: ItemId = ItemId::from_u128(6);
pub const ERGONOMIC_CHAIR: ItemId = ItemId::from_u128(7);
pub const WORKSTATION_KIT: ItemId = ItemId::from_u128(8);

pub const COMPUTER_ACCESSORIES: ItemGroupId = ItemGroupId::from_u128(1);
pub const HEALTH_PRODUCTS: ItemGroupId = ItemGroupId::from_u128(2);
pub const OFFICE_FURNITURE: ItemGroupId = ItemGroupId::from_u128(3);

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn warehouses() -> Vec<Warehouse> {
    vec![
        Warehouse::from_new(
            MAIN_WAREHOUSE,
            NewWarehouse::new("Main Warehouse")
                .located_at("123 MG Road", "Bangalore", "Karnataka", "560001", "India")
                .managed_by("Rajesh Kumar")
                .with_contact("080-12345678", "rajesh@example.com"),
        ),
        Warehouse::from_new(
            NORTH_WAREHOUSE,
            NewWarehouse::new("North Warehouse")
                .located_at("456 Chandni Chowk", "Delhi", "Delhi", "110006", "India")
                .managed_by("Priya Singh")
                .with_contact("011-98765432", "priya@example.com"),
        ),
        Warehouse::from_new(
            WEST_COAST_WAREHOUSE,
            NewWarehouse::new("West Coast Warehouse")
                .located_at("789 Marine Drive", "Mumbai", "Maharashtra", "400002", "India")
                .managed_by("Amit Shah")
                .with_contact("022-45678901", "amit@example.com"),
        ),
    ]
}

fn items() -> Vec<Item> {
    let rows: Vec<(ItemId, NewItem, DateTime<Utc>)> = vec![
        (
            LAPTOP,
            NewItem::new("Laptop - Pro Model", "TECH-LP-001", MAIN_WAREHOUSE)
                .with_description("High-performance laptop for professionals")
                .with_category("Electronics")
                .with_pricing(9_599_999, 7_500_000)
                .with_stock(24, 10)
                .with_location("Aisle A, Shelf 3")
                .with_barcode("LP00123456")
                .in_group(COMPUTER_ACCESSORIES),
            at(2023, 6, 1, 10, 0),
        ),
        (
            WIRELESS_MOUSE,
            NewItem::new("Wireless Mouse", "TECH-WM-002", MAIN_WAREHOUSE)
                .with_description("Bluetooth wireless mouse")
                .with_category("Electronics")
                .with_pricing(299_999, 150_000)
                .with_stock(75, 25)
                .with_location("Aisle A, Shelf 2")
                .with_barcode("WM00234567")
                .in_group(COMPUTER_ACCESSORIES),
            at(2023, 6, 1, 10, 30),
        ),
        (
            USB_HUB,
            NewItem::new("USB-C Hub", "TECH-UH-003", NORTH_WAREHOUSE)
                .with_description("7-in-1 USB-C multiport adapter")
                .with_category("Electronics")
                .with_pricing(349_900, 180_000)
                .with_stock(8, 15)
                .with_location("Rack 4")
                .with_barcode("UH00345678")
                .in_group(COMPUTER_ACCESSORIES),
            at(2023, 6, 2, 9, 15),
        ),
        (
            VITAMIN_C,
            NewItem::new("Vitamin C Tablets", "HLTH-VC-004", NORTH_WAREHOUSE)
                .with_description("1000mg vitamin C, 60 tablets")
                .with_category("Health")
                .with_pricing(59_900, 32_000)
                .with_stock(120, 40)
                .with_unit("bottle")
                .with_location("Cold Room 1")
                .with_expiry_date(date(2024, 3, 31))
                .in_group(HEALTH_PRODUCTS),
            at(2023, 6, 3, 11, 0),
        ),
        (
            PROTEIN_POWDER,
            NewItem::new("Whey Protein Powder", "HLTH-WP-005", WEST_COAST_WAREHOUSE)
                .with_description("Chocolate flavour, 1kg")
                .with_category("Health")
                .with_pricing(249_900, 160_000)
                .with_stock(18, 20)
                .with_unit("tub")
                .with_location("Bay 2")
                .with_expiry_date(date(2024, 9, 30))
                .in_group(HEALTH_PRODUCTS),
            at(2023, 6, 3, 11, 45),
        ),
        (
            OFFICE_DESK,
            NewItem::new("Standing Desk", "FURN-SD-006", WEST_COAST_WAREHOUSE)
                .with_description("Height-adjustable standing desk")
                .with_category("Furniture")
                .with_pricing(3_499_900, 2_400_000)
                .with_stock(12, 5)
                .with_location("Floor Zone B")
                .in_group(OFFICE_FURNITURE),
            at(2023, 6, 4, 14, 0),
        ),
        (
            ERGONOMIC_CHAIR,
            NewItem::new("Ergonomic Chair", "FURN-EC-007", WEST_COAST_WAREHOUSE)
                .with_description("Mesh back chair with lumbar support")
                .with_category("Furniture")
                .with_pricing(1_899_900, 1_100_000)
                .with_stock(5, 5)
                .with_location("Floor Zone B")
                .in_group(OFFICE_FURNITURE),
            at(2023, 6, 4, 14, 30),
        ),
        (
            WORKSTATION_KIT,
            NewItem::new("Workstation Kit", "FURN-WK-008", MAIN_WAREHOUSE)
                .with_description("Desk, chair and mouse bundle")
                .with_category("Furniture")
                .with_pricing(5_599_900, 3_650_000)
                .with_stock(3, 2)
                .with_unit("kit")
                .with_location("Aisle D")
                .in_group(OFFICE_FURNITURE)
                .assembled_from(vec![
                    ItemComponent { item_id: OFFICE_DESK, quantity: 1 },
                    ItemComponent { item_id: ERGONOMIC_CHAIR, quantity: 1 },
                    ItemComponent { item_id: WIRELESS_MOUSE, quantity: 1 },
                ]),
            at(2023, 6, 5, 9, 0),
        ),
    ];

    rows.into_iter()
        .map(|(id, new, created)| Item::from_new(id, new, created))
        .collect()
}

fn item_groups() -> Vec<ItemGroup> {
    vec![
        ItemGroup::from_new(
            COMPUTER_ACCESSORIES,
            NewItemGroup::new("Computer Accessories")
                .with_description("All computer and tech accessories")
                .with_items([LAPTOP, WIRELESS_MOUSE, USB_HUB]),
        ),
        ItemGroup::from_new(
            HEALTH_PRODUCTS,
            NewItemGroup::new("Health Products")
                .with_description("Supplements and health items")
                .with_items([VITAMIN_C, PROTEIN_POWDER]),
        ),
        ItemGroup::from_new(
            OFFICE_FURNITURE,
            NewItemGroup::new("Office Furniture")
                .with_description("Desks, chairs, and office furniture")
                .with_items([OFFICE_DESK, ERGONOMIC_CHAIR, WORKSTATION_KIT]),
        ),
    ]
}

fn units(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN)
}

fn movements() -> Vec<Movement> {
    let rows: Vec<(u128, NewMovement, DateTime<Utc>)> = vec![
        (
            1,
            NewMovement::inbound(LAPTOP, units(10))
                .to_warehouse(MAIN_WAREHOUSE)
                .with_reference("PO-2023-001")
                .with_notes("Initial stock")
                .performed_by("Rajesh Kumar"),
            at(2023, 6, 1, 10, 0),
        ),
        (
            2,
            NewMovement::inbound(WIRELESS_MOUSE, units(25))
                .to_warehouse(MAIN_WAREHOUSE)
                .with_reference("PO-2023-001")
                .with_notes("Initial stock")
                .performed_by("Rajesh Kumar"),
            at(2023, 6, 1, 10, 30),
        ),
        (
            3,
            NewMovement::inbound(VITAMIN_C, units(120))
                .to_warehouse(NORTH_WAREHOUSE)
                .with_reference("PO-2023-002")
                .performed_by("Priya Singh"),
            at(2023, 6, 3, 11, 0),
        ),
        (
            4,
            NewMovement::outbound(WIRELESS_MOUSE, units(5))
                .from_warehouse(MAIN_WAREHOUSE)
                .with_reference("SO-2023-014")
                .performed_by("Rajesh Kumar"),
            at(2023, 6, 8, 16, 20),
        ),
        (
            5,
            NewMovement::transfer(OFFICE_DESK, units(4), WEST_COAST_WAREHOUSE)
                .from_warehouse(MAIN_WAREHOUSE)
                .with_notes("Rebalance furniture stock")
                .performed_by("Amit Shah"),
            at(2023, 6, 10, 12, 0),
        ),
    ];

    rows.into_iter()
        .map(|(n, new, date)| Movement::from_new(MovementId::from_u128(n), new, date))
        .collect()
}

/// The full sample snapshot.
pub fn sample_snapshot() -> Snapshot {
    Snapshot {
        items: items(),
        warehouses: warehouses(),
        movements: movements(),
        item_groups: item_groups(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_deterministic() {
        assert_eq!(sample_snapshot(), sample_snapshot());
    }

    #[test]
    fn sample_references_resolve() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.items.len(), 8);
        assert_eq!(snapshot.warehouses.len(), 3);
        assert_eq!(snapshot.item_groups.len(), 3);

        assert!(snapshot.orphaned_items().is_empty());
        for group in &snapshot.item_groups {
            assert_eq!(snapshot.items_in_group(&group.id).len(), group.item_ids.len());
        }
        for movement in &snapshot.movements {
            assert!(snapshot.item(&movement.item_id).is_some());
        }
    }

    #[test]
    fn sample_has_low_stock_items() {
        let snapshot = sample_snapshot();
        let low: Vec<_> = snapshot.low_stock_items().iter().map(|i| i.id).collect();
        assert_eq!(low, vec![USB_HUB, PROTEIN_POWDER, ERGONOMIC_CHAIR]);
    }
}
