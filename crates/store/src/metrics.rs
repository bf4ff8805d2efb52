//! Dashboard and report metrics derived from a snapshot.
//!
//! All figures are computed on demand from the snapshot they are called on;
//! nothing here is cached. Money is in the smallest currency unit and values
//! are signed, so an item with a negative balance lowers the totals.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use stockroom_core::{ItemId, WarehouseId};
use stockroom_inventory::{Movement, MovementType};

use crate::snapshot::Snapshot;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_items: usize,
    /// Σ quantity × cost.
    pub total_stock_value: i64,
    /// Σ quantity × price.
    pub total_retail_value: i64,
    /// total_retail_value − total_stock_value.
    pub potential_profit: i64,
    pub low_stock_items: usize,
    /// Existing items referenced by at least one movement.
    pub items_with_movement: usize,
    pub total_warehouses: usize,
    pub total_item_groups: usize,
}

/// Per-category roll-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub item_count: usize,
    pub total_quantity: i64,
    pub cost_value: i64,
    pub retail_value: i64,
    /// retail − cost; negative when items sell below cost.
    pub potential_profit: i64,
    /// Mean unit price across the category's items.
    pub average_price: u64,
    pub low_stock_count: usize,
}

/// Per-warehouse roll-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseSummary {
    pub warehouse_id: WarehouseId,
    pub name: String,
    pub is_active: bool,
    pub item_count: usize,
    pub total_units: i64,
    pub low_stock_count: usize,
    pub stock_value: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeTotal {
    pub transactions: usize,
    pub units: u64,
}

/// Movement counts and units per movement type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementTotals {
    pub inbound: TypeTotal,
    pub outbound: TypeTotal,
    pub transfer: TypeTotal,
}

impl MovementTotals {
    pub fn get(&self, kind: MovementType) -> TypeTotal {
        match kind {
            MovementType::In => self.inbound,
            MovementType::Out => self.outbound,
            MovementType::Transfer => self.transfer,
        }
    }

    fn record(&mut self, movement: &Movement) {
        let slot = match movement.kind {
            MovementType::In => &mut self.inbound,
            MovementType::Out => &mut self.outbound,
            MovementType::Transfer => &mut self.transfer,
        };
        slot.transactions += 1;
        slot.units += u64::from(movement.quantity.get());
    }
}

/// Units moved for one item, split by movement type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemActivity {
    pub item_id: ItemId,
    pub name: String,
    pub inbound: u64,
    pub outbound: u64,
    pub transferred: u64,
    pub total: u64,
}

impl Snapshot {
    /// Σ quantity × cost over all items.
    pub fn stock_value(&self) -> i64 {
        self.items.iter().map(|i| i.stock_value()).fold(0, i64::saturating_add)
    }

    /// Σ quantity × price over all items.
    pub fn retail_value(&self) -> i64 {
        self.items.iter().map(|i| i.retail_value()).fold(0, i64::saturating_add)
    }

    pub fn dashboard_metrics(&self) -> DashboardMetrics {
        let moved: HashSet<&ItemId> = self.movements.iter().map(|m| &m.item_id).collect();
        let total_stock_value = self.stock_value();
        let total_retail_value = self.retail_value();

        DashboardMetrics {
            total_items: self.items.len(),
            total_stock_value,
            total_retail_value,
            potential_profit: total_retail_value.saturating_sub(total_stock_value),
            low_stock_items: self.items.iter().filter(|i| i.is_low_stock()).count(),
            items_with_movement: self
                .items
                .iter()
                .filter(|i| moved.contains(&i.id))
                .count(),
            total_warehouses: self.warehouses.len(),
            total_item_groups: self.item_groups.len(),
        }
    }

    /// One entry per distinct category, in order of first appearance.
    pub fn category_breakdown(&self) -> Vec<CategorySummary> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut summaries: Vec<CategorySummary> = Vec::new();
        let mut price_totals: Vec<u64> = Vec::new();

        for item in &self.items {
            let slot = *index.entry(item.category.as_str()).or_insert_with(|| {
                summaries.push(CategorySummary {
                    category: item.category.clone(),
                    item_count: 0,
                    total_quantity: 0,
                    cost_value: 0,
                    retail_value: 0,
                    potential_profit: 0,
                    average_price: 0,
                    low_stock_count: 0,
                });
                price_totals.push(0);
                summaries.len() - 1
            });

            let summary = &mut summaries[slot];
            summary.item_count += 1;
            summary.total_quantity = summary.total_quantity.saturating_add(item.quantity);
            summary.cost_value = summary.cost_value.saturating_add(item.stock_value());
            summary.retail_value = summary.retail_value.saturating_add(item.retail_value());
            if item.is_low_stock() {
                summary.low_stock_count += 1;
            }
            price_totals[slot] = price_totals[slot].saturating_add(item.price);
        }

        for (summary, price_total) in summaries.iter_mut().zip(price_totals) {
            summary.potential_profit = summary.retail_value.saturating_sub(summary.cost_value);
            summary.average_price = price_total / summary.item_count as u64;
        }

        summaries
    }

    /// One entry per warehouse, in collection order. Items pointing at a
    /// deleted warehouse are not counted anywhere; see
    /// [`Snapshot::orphaned_items`].
    pub fn warehouse_summaries(&self) -> Vec<WarehouseSummary> {
        self.warehouses
            .iter()
            .map(|w| {
                let items = self.items_in_warehouse(&w.id);
                WarehouseSummary {
                    warehouse_id: w.id,
                    name: w.name.clone(),
                    is_active: w.is_active,
                    item_count: items.len(),
                    total_units: items
                        .iter()
                        .map(|i| i.quantity)
                        .fold(0, i64::saturating_add),
                    low_stock_count: items.iter().filter(|i| i.is_low_stock()).count(),
                    stock_value: items
                        .iter()
                        .map(|i| i.stock_value())
                        .fold(0, i64::saturating_add),
                }
            })
            .collect()
    }

    pub fn movement_totals(&self) -> MovementTotals {
        let mut totals = MovementTotals::default();
        for movement in &self.movements {
            totals.record(movement);
        }
        totals
    }

    /// Items ranked by units moved, busiest first. Items without movements
    /// are left out; ties keep collection order.
    pub fn item_activity(&self) -> Vec<ItemActivity> {
        let mut per_item: HashMap<ItemId, MovementTotals> = HashMap::new();
        for movement in &self.movements {
            per_item.entry(movement.item_id).or_default().record(movement);
        }

        let mut activity: Vec<ItemActivity> = self
            .items
            .iter()
            .filter_map(|item| {
                let totals = per_item.get(&item.id)?;
                let inbound = totals.inbound.units;
                let outbound = totals.outbound.units;
                let transferred = totals.transfer.units;
                Some(ItemActivity {
                    item_id: item.id,
                    name: item.name.clone(),
                    inbound,
                    outbound,
                    transferred,
                    total: inbound + outbound + transferred,
                })
            })
            .collect();

        activity.sort_by(|a, b| b.total.cmp(&a.total));
        activity
    }

    /// The `limit` newest movements, newest first.
    pub fn recent_movements(&self, limit: usize) -> Vec<&Movement> {
        let mut movements: Vec<&Movement> = self.movements.iter().collect();
        movements.sort_by(|a, b| b.date.cmp(&a.date));
        movements.truncate(limit);
        movements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    use chrono::{DateTime, TimeZone, Utc};
    use stockroom_core::{ItemGroupId, MovementId};
    use stockroom_inventory::{
        Item, ItemGroup, NewItem, NewItemGroup, NewMovement, NewWarehouse, Warehouse,
    };

    fn units(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, day, 8, 0, 0).unwrap()
    }

    fn item(
        n: u128,
        category: &str,
        warehouse: u128,
        quantity: i64,
        price: u64,
        cost: u64,
    ) -> Item {
        let warehouse = WarehouseId::from_u128(warehouse);
        let new = NewItem::new(format!("Item {n}"), format!("SKU-{n}"), warehouse)
            .with_category(category)
            .with_pricing(price, cost)
            .with_stock(quantity, 5);
        Item::from_new(ItemId::from_u128(n), new, at(1))
    }

    fn movement(n: u128, new: NewMovement, day: u32) -> Movement {
        Movement::from_new(MovementId::from_u128(n), new, at(day))
    }

    fn fixture() -> Snapshot {
        let transfer_to_north =
            NewMovement::transfer(ItemId::from_u128(2), units(2), WarehouseId::from_u128(2));
        Snapshot {
            items: vec![
                item(1, "Electronics", 1, 10, 300, 200),
                item(2, "Health", 2, 4, 50, 20),
                item(3, "Electronics", 1, -2, 100, 80),
                item(4, "Electronics", 7, 1, 500, 600),
            ],
            warehouses: vec![
                Warehouse::from_new(WarehouseId::from_u128(1), NewWarehouse::new("Main")),
                Warehouse::from_new(
                    WarehouseId::from_u128(2),
                    NewWarehouse::new("North").inactive(),
                ),
            ],
            movements: vec![
                movement(1, NewMovement::inbound(ItemId::from_u128(1), units(10)), 3),
                movement(2, NewMovement::outbound(ItemId::from_u128(1), units(4)), 5),
                movement(3, transfer_to_north, 4),
                movement(4, NewMovement::inbound(ItemId::from_u128(99), units(1)), 6),
            ],
            item_groups: vec![ItemGroup::from_new(
                ItemGroupId::from_u128(1),
                NewItemGroup::new("All"),
            )],
        }
    }

    #[test]
    fn dashboard_metrics_cover_every_collection() {
        let metrics = fixture().dashboard_metrics();

        assert_eq!(metrics.total_items, 4);
        // Item 3 sits at -2 and pulls both totals down.
        assert_eq!(metrics.total_stock_value, 10 * 200 + 4 * 20 - 2 * 80 + 600);
        assert_eq!(metrics.total_retail_value, 10 * 300 + 4 * 50 - 2 * 100 + 500);
        assert_eq!(metrics.potential_profit, 3500 - 2520);
        // Items 2, 3 and 4 are at or below the reorder point of 5.
        assert_eq!(metrics.low_stock_items, 3);
        // Movement 4 references a missing item and is not counted.
        assert_eq!(metrics.items_with_movement, 2);
        assert_eq!(metrics.total_warehouses, 2);
        assert_eq!(metrics.total_item_groups, 1);
    }

    #[test]
    fn category_breakdown_keeps_first_seen_order() {
        let breakdown = fixture().category_breakdown();
        let names: Vec<_> = breakdown.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Electronics", "Health"]);

        let electronics = &breakdown[0];
        assert_eq!(electronics.item_count, 3);
        assert_eq!(electronics.total_quantity, 10 - 2 + 1);
        assert_eq!(electronics.cost_value, 2000 - 160 + 600);
        assert_eq!(electronics.retail_value, 3000 - 200 + 500);
        assert_eq!(electronics.potential_profit, 3300 - 2440);
        assert_eq!(electronics.average_price, (300 + 100 + 500) / 3);
        assert_eq!(electronics.low_stock_count, 2);
    }

    #[test]
    fn negative_balance_subtracts_from_dashboard_value() {
        let snapshot = Snapshot {
            items: vec![item(1, "A", 1, 10, 80, 50), item(2, "A", 1, -4, 80, 50)],
            ..Default::default()
        };
        let metrics = snapshot.dashboard_metrics();
        assert_eq!(metrics.total_stock_value, 300);
        assert_eq!(metrics.total_retail_value, 480);
        assert_eq!(metrics.potential_profit, 180);
    }

    #[test]
    fn potential_profit_can_be_negative() {
        let snapshot = Snapshot {
            items: vec![item(1, "Clearance", 1, 10, 5, 9)],
            ..Default::default()
        };
        assert_eq!(snapshot.category_breakdown()[0].potential_profit, -40);
    }

    #[test]
    fn warehouse_summaries_skip_orphaned_items() {
        let summaries = fixture().warehouse_summaries();
        assert_eq!(summaries.len(), 2);

        let main = &summaries[0];
        assert_eq!(main.name, "Main");
        assert_eq!(main.item_count, 2);
        assert_eq!(main.total_units, 8);
        assert_eq!(main.low_stock_count, 1);
        assert_eq!(main.stock_value, 2000 - 160);

        assert!(!summaries[1].is_active);
        assert_eq!(summaries[1].item_count, 1);
    }

    #[test]
    fn movement_totals_split_by_type() {
        let totals = fixture().movement_totals();
        let total = |transactions, units| TypeTotal { transactions, units };
        assert_eq!(totals.get(MovementType::In), total(2, 11));
        assert_eq!(totals.get(MovementType::Out), total(1, 4));
        assert_eq!(totals.get(MovementType::Transfer), total(1, 2));
    }

    #[test]
    fn item_activity_ranks_busiest_first() {
        let activity = fixture().item_activity();
        assert_eq!(activity.len(), 2);

        assert_eq!(activity[0].item_id, ItemId::from_u128(1));
        let busiest = &activity[0];
        assert_eq!((busiest.inbound, busiest.outbound, busiest.total), (10, 4, 14));
        assert_eq!(activity[1].item_id, ItemId::from_u128(2));
        assert_eq!(activity[1].transferred, 2);
    }

    #[test]
    fn recent_movements_are_newest_first_and_limited() {
        let snapshot = fixture();
        let recent: Vec<_> = snapshot.recent_movements(3).iter().map(|m| m.id).collect();
        assert_eq!(
            recent,
            vec![MovementId::from_u128(4), MovementId::from_u128(2), MovementId::from_u128(3)]
        );
        assert_eq!(snapshot.recent_movements(100).len(), 4);
    }

    #[test]
    fn empty_snapshot_has_zeroed_metrics() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.dashboard_metrics().total_stock_value, 0);
        assert!(snapshot.category_breakdown().is_empty());
        assert_eq!(snapshot.movement_totals(), MovementTotals::default());
    }
}
