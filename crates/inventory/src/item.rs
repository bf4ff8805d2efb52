use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, ItemGroupId, ItemId, WarehouseId};

/// One component line of an assembly: `quantity` units of `item_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemComponent {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// A stocked product tracked for quantity and value.
///
/// Money fields are in the smallest currency unit (e.g. paise, cents).
/// `quantity` is signed: an `out` movement may take it below zero unless the
/// store runs with [`StockPolicy::ClampAtZero`](crate::StockPolicy).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub sku: String,
    pub description: String,
    pub category: String,
    /// Unit sale price.
    pub price: u64,
    /// Unit cost.
    pub cost: u64,
    pub quantity: i64,
    pub unit: String,
    /// Owning warehouse. May dangle after the warehouse is deleted.
    pub warehouse_id: WarehouseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub reorder_point: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub barcodes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_ids: Vec<ItemGroupId>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_assembly: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ItemComponent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Item {
    /// Build a record from creation input; both timestamps are set to `now`.
    pub fn from_new(id: ItemId, new: NewItem, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            sku: new.sku,
            description: new.description,
            category: new.category,
            price: new.price,
            cost: new.cost,
            quantity: new.quantity,
            unit: new.unit,
            warehouse_id: new.warehouse_id,
            location: new.location,
            reorder_point: new.reorder_point,
            expiry_date: new.expiry_date,
            barcodes: new.barcodes,
            image_url: new.image_url,
            group_ids: new.group_ids,
            is_assembly: new.is_assembly,
            components: new.components,
            created_at: now,
            updated_at: now,
        }
    }

    /// Quantity has fallen to or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_point
    }

    /// Has an expiry date on or before `cutoff`.
    pub fn expires_by(&self, cutoff: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|d| d <= cutoff)
    }

    /// quantity × cost. Signed: a negative balance subtracts from totals.
    pub fn stock_value(&self) -> i64 {
        signed_value(self.quantity, self.cost)
    }

    /// quantity × price.
    pub fn retail_value(&self) -> i64 {
        signed_value(self.quantity, self.price)
    }
}

fn signed_value(quantity: i64, unit: u64) -> i64 {
    quantity.saturating_mul(i64::try_from(unit).unwrap_or(i64::MAX))
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Creation input for an [`Item`]: every field except the id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: u64,
    #[serde(default)]
    pub cost: u64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub unit: String,
    pub warehouse_id: WarehouseId,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub reorder_point: i64,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub barcodes: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub group_ids: Vec<ItemGroupId>,
    #[serde(default)]
    pub is_assembly: bool,
    #[serde(default)]
    pub components: Vec<ItemComponent>,
}

impl NewItem {
    pub fn new(name: impl Into<String>, sku: impl Into<String>, warehouse_id: WarehouseId) -> Self {
        Self {
            name: name.into(),
            sku: sku.into(),
            description: String::new(),
            category: String::new(),
            price: 0,
            cost: 0,
            quantity: 0,
            unit: "pc".to_string(),
            warehouse_id,
            location: None,
            reorder_point: 0,
            expiry_date: None,
            barcodes: Vec::new(),
            image_url: None,
            group_ids: Vec::new(),
            is_assembly: false,
            components: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_pricing(mut self, price: u64, cost: u64) -> Self {
        self.price = price;
        self.cost = cost;
        self
    }

    pub fn with_stock(mut self, quantity: i64, reorder_point: i64) -> Self {
        self.quantity = quantity;
        self.reorder_point = reorder_point;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_expiry_date(mut self, date: NaiveDate) -> Self {
        self.expiry_date = Some(date);
        self
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcodes.push(barcode.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn in_group(mut self, group_id: ItemGroupId) -> Self {
        self.group_ids.push(group_id);
        self
    }

    /// Mark as an assembly built from the given components.
    pub fn assembled_from(mut self, components: Vec<ItemComponent>) -> Self {
        self.is_assembly = true;
        self.components = components;
        self
    }
}

/// Partial update for an [`Item`].
///
/// `None` leaves the field untouched. For fields that are optional on the
/// record, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<u64>,
    pub cost: Option<u64>,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    pub warehouse_id: Option<WarehouseId>,
    pub location: Option<Option<String>>,
    pub reorder_point: Option<i64>,
    pub expiry_date: Option<Option<NaiveDate>>,
    pub barcodes: Option<Vec<String>>,
    pub image_url: Option<Option<String>>,
    pub group_ids: Option<Vec<ItemGroupId>>,
    pub is_assembly: Option<bool>,
    pub components: Option<Vec<ItemComponent>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ItemPatch {
    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite exactly the fields set in the patch.
    pub fn apply(&self, item: &mut Item) {
        if let Some(v) = &self.name {
            item.name = v.clone();
        }
        if let Some(v) = &self.sku {
            item.sku = v.clone();
        }
        if let Some(v) = &self.description {
            item.description = v.clone();
        }
        if let Some(v) = &self.category {
            item.category = v.clone();
        }
        if let Some(v) = self.price {
            item.price = v;
        }
        if let Some(v) = self.cost {
            item.cost = v;
        }
        if let Some(v) = self.quantity {
            item.quantity = v;
        }
        if let Some(v) = &self.unit {
            item.unit = v.clone();
        }
        if let Some(v) = self.warehouse_id {
            item.warehouse_id = v;
        }
        if let Some(v) = &self.location {
            item.location = v.clone();
        }
        if let Some(v) = self.reorder_point {
            item.reorder_point = v;
        }
        if let Some(v) = self.expiry_date {
            item.expiry_date = v;
        }
        if let Some(v) = &self.barcodes {
            item.barcodes = v.clone();
        }
        if let Some(v) = &self.image_url {
            item.image_url = v.clone();
        }
        if let Some(v) = &self.group_ids {
            item.group_ids = v.clone();
        }
        if let Some(v) = self.is_assembly {
            item.is_assembly = v;
        }
        if let Some(v) = &self.components {
            item.components = v.clone();
        }
        if let Some(v) = self.updated_at {
            item.updated_at = v;
        }
    }
}
