use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, WarehouseId};

/// A physical storage location holding items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    /// Street address.
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub is_active: bool,
}

impl Warehouse {
    pub fn from_new(id: WarehouseId, new: NewWarehouse) -> Self {
        Self {
            id,
            name: new.name,
            address: new.address,
            city: new.city,
            state: new.state,
            zip: new.zip,
            country: new.country,
            manager: new.manager,
            phone: new.phone,
            email: new.email,
            is_active: new.is_active,
        }
    }

    /// Single-line postal address, skipping empty parts.
    pub fn full_address(&self) -> String {
        [&self.address, &self.city, &self.state, &self.zip, &self.country]
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Creation input for a [`Warehouse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWarehouse {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl NewWarehouse {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            country: String::new(),
            manager: None,
            phone: None,
            email: None,
            is_active: true,
        }
    }

    pub fn located_at(
        mut self,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.address = address.into();
        self.city = city.into();
        self.state = state.into();
        self.zip = zip.into();
        self.country = country.into();
        self
    }

    pub fn managed_by(mut self, manager: impl Into<String>) -> Self {
        self.manager = Some(manager.into());
        self
    }

    pub fn with_contact(mut self, phone: impl Into<String>, email: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self.email = Some(email.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Partial update for a [`Warehouse`]. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarehousePatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub manager: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl WarehousePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, warehouse: &mut Warehouse) {
        if let Some(v) = &self.name {
            warehouse.name = v.clone();
        }
        if let Some(v) = &self.address {
            warehouse.address = v.clone();
        }
        if let Some(v) = &self.city {
            warehouse.city = v.clone();
        }
        if let Some(v) = &self.state {
            warehouse.state = v.clone();
        }
        if let Some(v) = &self.zip {
            warehouse.zip = v.clone();
        }
        if let Some(v) = &self.country {
            warehouse.country = v.clone();
        }
        if let Some(v) = &self.manager {
            warehouse.manager = v.clone();
        }
        if let Some(v) = &self.phone {
            warehouse.phone = v.clone();
        }
        if let Some(v) = &self.email {
            warehouse.email = v.clone();
        }
        if let Some(v) = self.is_active {
            warehouse.is_active = v;
        }
    }
}
