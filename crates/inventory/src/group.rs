use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, ItemGroupId, ItemId};

/// A named collection of items for categorization.
///
/// Membership is a plain id list. It is not kept in sync with
/// `Item::group_ids`, and ids may outlive the items they name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemGroup {
    pub id: ItemGroupId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub item_ids: Vec<ItemId>,
}

impl ItemGroup {
    pub fn from_new(id: ItemGroupId, new: NewItemGroup) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            item_ids: new.item_ids,
        }
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.item_ids.contains(item_id)
    }
}

impl Entity for ItemGroup {
    type Id = ItemGroupId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Creation input for an [`ItemGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItemGroup {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub item_ids: Vec<ItemId>,
}

impl NewItemGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            item_ids: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_items(mut self, item_ids: impl IntoIterator<Item = ItemId>) -> Self {
        self.item_ids.extend(item_ids);
        self
    }
}

/// Partial update for an [`ItemGroup`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemGroupPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub item_ids: Option<Vec<ItemId>>,
}

impl ItemGroupPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, group: &mut ItemGroup) {
        if let Some(v) = &self.name {
            group.name = v.clone();
        }
        if let Some(v) = &self.description {
            group.description = v.clone();
        }
        if let Some(v) = &self.item_ids {
            group.item_ids = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_replaces_membership_wholesale() {
        let new = NewItemGroup::new("Office Furniture")
            .with_description("Desks and chairs")
            .with_items([ItemId::from_u128(6), ItemId::from_u128(7)]);
        let mut group = ItemGroup::from_new(ItemGroupId::from_u128(3), new);
        assert!(group.contains(&ItemId::from_u128(7)));

        ItemGroupPatch {
            item_ids: Some(vec![ItemId::from_u128(8)]),
            ..Default::default()
        }
        .apply(&mut group);

        assert_eq!(group.item_ids, vec![ItemId::from_u128(8)]);
        assert_eq!(group.name, "Office Furniture");
        assert_eq!(group.description.as_deref(), Some("Desks and chairs"));
    }
}
