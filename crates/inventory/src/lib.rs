//! Inventory records.
//!
//! Plain record types for items, warehouses, stock movements and item groups,
//! their creation inputs and partial-update patches, and the rules for how a
//! movement changes an item. Deterministic domain logic only (no IO, no
//! storage).

pub mod group;
pub mod item;
pub mod movement;
pub mod warehouse;

pub use group::{ItemGroup, ItemGroupPatch, NewItemGroup};
pub use item::{Item, ItemComponent, ItemPatch, NewItem};
pub use movement::{Movement, MovementType, NewMovement, StockEffect, StockPolicy};
pub use warehouse::{NewWarehouse, Warehouse, WarehousePatch};
