//! Stock movements and how they change an item.

use core::num::NonZeroU32;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, Entity, ItemId, MovementId, WarehouseId};

use crate::item::Item;

/// Direction of a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Stock received.
    In,
    /// Stock issued.
    Out,
    /// Stock relocated between warehouses.
    Transfer,
}

impl MovementType {
    pub const ALL: [MovementType; 3] =
        [MovementType::In, MovementType::Out, MovementType::Transfer];

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::In => "in",
            MovementType::Out => "out",
            MovementType::Transfer => "transfer",
        }
    }
}

impl core::fmt::Display for MovementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do when an `out` movement would take stock below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockPolicy {
    /// Let the balance go negative.
    #[default]
    AllowNegative,
    /// Floor the balance at zero.
    ClampAtZero,
}

impl FromStr for StockPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow-negative" | "allow_negative" | "negative" => Ok(Self::AllowNegative),
            "clamp" | "clamp-at-zero" | "clamp_at_zero" => Ok(Self::ClampAtZero),
            other => Err(DomainError::validation(format!("unknown stock policy: {other}"))),
        }
    }
}

/// Audit-log entry recording a stock change or transfer.
///
/// `quantity` is a non-zero magnitude; the sign of its effect comes from
/// `kind`. A zero quantity is rejected when the record is deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: MovementId,
    #[serde(rename = "type")]
    pub kind: MovementType,
    pub item_id: ItemId,
    pub quantity: NonZeroU32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_warehouse_id: Option<WarehouseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_warehouse_id: Option<WarehouseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performed_by: Option<String>,
}

/// Outcome of applying a movement to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockEffect {
    pub previous_quantity: i64,
    pub new_quantity: i64,
    /// Warehouse the item was moved into, if the movement relocated it.
    pub relocated_to: Option<WarehouseId>,
    /// The policy floored the balance at zero.
    pub clamped: bool,
}

impl StockEffect {
    pub fn went_negative(&self) -> bool {
        self.new_quantity < 0
    }
}

impl Movement {
    pub fn from_new(id: MovementId, new: NewMovement, date: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: new.kind,
            item_id: new.item_id,
            quantity: new.quantity,
            from_warehouse_id: new.from_warehouse_id,
            to_warehouse_id: new.to_warehouse_id,
            reference: new.reference,
            notes: new.notes,
            date,
            performed_by: new.performed_by,
        }
    }

    /// Signed change this movement makes to the on-hand balance.
    pub fn quantity_delta(&self) -> i64 {
        match self.kind {
            MovementType::In => i64::from(self.quantity.get()),
            MovementType::Out => -i64::from(self.quantity.get()),
            MovementType::Transfer => 0,
        }
    }

    /// Apply the movement's side effect to `item`.
    ///
    /// - `in` raises the balance, `out` lowers it (subject to `policy`).
    /// - `transfer` leaves the balance alone and reassigns the owning
    ///   warehouse to `to_warehouse_id` when one is given.
    /// - `updated_at` becomes the movement date.
    ///
    /// The caller is responsible for matching `item.id` to `self.item_id`.
    pub fn apply_to(&self, item: &mut Item, policy: StockPolicy) -> StockEffect {
        let previous_quantity = item.quantity;
        let mut new_quantity = previous_quantity.saturating_add(self.quantity_delta());
        let mut clamped = false;

        let clamping = policy == StockPolicy::ClampAtZero && self.kind == MovementType::Out;
        if new_quantity < 0 && clamping {
            // A balance that was already negative stays where it is.
            new_quantity = previous_quantity.min(0);
            clamped = true;
        }

        let relocated_to = match self.kind {
            MovementType::Transfer => self.to_warehouse_id,
            MovementType::In | MovementType::Out => None,
        };

        item.quantity = new_quantity;
        if let Some(warehouse_id) = relocated_to {
            item.warehouse_id = warehouse_id;
        }
        item.updated_at = self.date;

        StockEffect {
            previous_quantity,
            new_quantity,
            relocated_to,
            clamped,
        }
    }
}

impl Entity for Movement {
    type Id = MovementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Creation input for a [`Movement`]: everything except the id and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovement {
    #[serde(rename = "type")]
    pub kind: MovementType,
    pub item_id: ItemId,
    pub quantity: NonZeroU32,
    #[serde(default)]
    pub from_warehouse_id: Option<WarehouseId>,
    #[serde(default)]
    pub to_warehouse_id: Option<WarehouseId>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub performed_by: Option<String>,
}

impl NewMovement {
    fn bare(kind: MovementType, item_id: ItemId, quantity: NonZeroU32) -> Self {
        Self {
            kind,
            item_id,
            quantity,
            from_warehouse_id: None,
            to_warehouse_id: None,
            reference: None,
            notes: None,
            performed_by: None,
        }
    }

    /// Stock received into `item_id`.
    pub fn inbound(item_id: ItemId, quantity: NonZeroU32) -> Self {
        Self::bare(MovementType::In, item_id, quantity)
    }

    /// Stock issued from `item_id`.
    pub fn outbound(item_id: ItemId, quantity: NonZeroU32) -> Self {
        Self::bare(MovementType::Out, item_id, quantity)
    }

    /// Relocate `item_id` into `to`.
    pub fn transfer(item_id: ItemId, quantity: NonZeroU32, to: WarehouseId) -> Self {
        let mut m = Self::bare(MovementType::Transfer, item_id, quantity);
        m.to_warehouse_id = Some(to);
        m
    }

    pub fn from_warehouse(mut self, warehouse_id: WarehouseId) -> Self {
        self.from_warehouse_id = Some(warehouse_id);
        self
    }

    pub fn to_warehouse(mut self, warehouse_id: WarehouseId) -> Self {
        self.to_warehouse_id = Some(warehouse_id);
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn performed_by(mut self, name: impl Into<String>) -> Self {
        self.performed_by = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::NewItem;
    use chrono::TimeZone;

    fn units(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn test_item(quantity: i64) -> Item {
        let new = NewItem::new("Widget", "W-1", WarehouseId::from_u128(1)).with_stock(quantity, 2);
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Item::from_new(ItemId::from_u128(1), new, created)
    }

    fn movement(new: NewMovement) -> Movement {
        Movement::from_new(MovementId::from_u128(99), new, test_time())
    }

    #[test]
    fn inbound_raises_balance() {
        let mut item = test_item(10);
        let effect = movement(NewMovement::inbound(item.id, units(5)))
            .apply_to(&mut item, StockPolicy::AllowNegative);

        assert_eq!(item.quantity, 15);
        assert_eq!(effect.previous_quantity, 10);
        assert_eq!(effect.new_quantity, 15);
        assert_eq!(item.updated_at, test_time());
    }

    #[test]
    fn outbound_may_go_negative_when_allowed() {
        let mut item = test_item(0);
        let effect = movement(NewMovement::outbound(item.id, units(5)))
            .apply_to(&mut item, StockPolicy::AllowNegative);

        assert_eq!(item.quantity, -5);
        assert!(effect.went_negative());
        assert!(!effect.clamped);
    }

    #[test]
    fn outbound_is_floored_when_clamping() {
        let mut item = test_item(3);
        let effect = movement(NewMovement::outbound(item.id, units(5)))
            .apply_to(&mut item, StockPolicy::ClampAtZero);

        assert_eq!(item.quantity, 0);
        assert!(effect.clamped);
        assert!(!effect.went_negative());
    }

    #[test]
    fn inbound_keeps_warehouse_even_with_destination() {
        let mut item = test_item(1);
        let original = item.warehouse_id;
        let new = NewMovement::inbound(item.id, units(1)).to_warehouse(WarehouseId::from_u128(7));
        let m = movement(new);
        m.apply_to(&mut item, StockPolicy::AllowNegative);

        assert_eq!(item.warehouse_id, original);
    }

    #[test]
    fn transfer_relocates_without_touching_quantity() {
        let mut item = test_item(8);
        let target = WarehouseId::from_u128(2);
        let effect = movement(NewMovement::transfer(item.id, units(8), target))
            .apply_to(&mut item, StockPolicy::AllowNegative);

        assert_eq!(item.quantity, 8);
        assert_eq!(item.warehouse_id, target);
        assert_eq!(effect.relocated_to, Some(target));
    }

    #[test]
    fn transfer_without_destination_is_a_no_op_on_location() {
        let mut item = test_item(8);
        let original = item.warehouse_id;
        let mut new = NewMovement::transfer(item.id, units(1), WarehouseId::from_u128(2));
        new.to_warehouse_id = None;
        movement(new).apply_to(&mut item, StockPolicy::AllowNegative);

        assert_eq!(item.warehouse_id, original);
        assert_eq!(item.quantity, 8);
    }

    #[test]
    fn stock_policy_parses_config_spellings() {
        assert_eq!("clamp".parse::<StockPolicy>().unwrap(), StockPolicy::ClampAtZero);
        assert_eq!(
            "Allow-Negative".parse::<StockPolicy>().unwrap(),
            StockPolicy::AllowNegative
        );
        assert!("sometimes".parse::<StockPolicy>().is_err());
    }

    #[test]
    fn wire_format_uses_type_key_and_lowercase_kind() {
        let m = movement(
            NewMovement::outbound(ItemId::from_u128(1), units(2)).with_reference("SO-1"),
        );
        let json = serde_json::to_value(&m).unwrap();

        assert_eq!(json["type"], "out");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["reference"], "SO-1");
        assert!(json.get("toWarehouseId").is_none());
        assert!(json.get("itemId").is_some());
    }

    #[test]
    fn zero_quantity_is_rejected_on_the_wire() {
        let item_id = ItemId::from_u128(1);
        let zero = serde_json::json!({ "type": "out", "itemId": item_id, "quantity": 0 });
        assert!(serde_json::from_value::<NewMovement>(zero).is_err());

        let one = serde_json::json!({ "type": "out", "itemId": item_id, "quantity": 1 });
        let parsed: NewMovement = serde_json::from_value(one).unwrap();
        assert_eq!(parsed.quantity.get(), 1);

        let mut stored = serde_json::to_value(movement(NewMovement::inbound(item_id, units(3))))
            .unwrap();
        stored["quantity"] = 0.into();
        assert!(serde_json::from_value::<Movement>(stored).is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: with clamping on, no sequence of movements leaves a
            /// non-negative balance below zero.
            #[test]
            fn clamped_balance_never_goes_negative(
                start in 0i64..1_000,
                moves in prop::collection::vec((any::<bool>(), 1u32..500), 0..40)
            ) {
                let mut item = test_item(start);
                for (inbound, qty) in moves {
                    let new = if inbound {
                        NewMovement::inbound(item.id, units(qty))
                    } else {
                        NewMovement::outbound(item.id, units(qty))
                    };
                    movement(new).apply_to(&mut item, StockPolicy::ClampAtZero);
                    prop_assert!(item.quantity >= 0);
                }
            }

            /// Property: with negatives allowed, the balance is the start plus
            /// the signed sum of every movement.
            #[test]
            fn unclamped_balance_is_signed_sum(
                start in -100i64..1_000,
                moves in prop::collection::vec((any::<bool>(), 1u32..500), 0..40)
            ) {
                let mut item = test_item(start);
                let mut expected = start;
                for (inbound, qty) in moves {
                    let m = movement(if inbound {
                        NewMovement::inbound(item.id, units(qty))
                    } else {
                        NewMovement::outbound(item.id, units(qty))
                    });
                    expected += m.quantity_delta();
                    m.apply_to(&mut item, StockPolicy::AllowNegative);
                }
                prop_assert_eq!(item.quantity, expected);
            }
        }
    }
}
