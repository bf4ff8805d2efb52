//! Shared store handle and scoped access.
//!
//! The application builds one [`SharedStore`] at start-up and hands clones to
//! its consumers. Code that cannot take the handle as a parameter runs inside
//! [`provide`] and fetches it with [`current`]; doing so outside any scope is
//! a usage error, not a data condition.

use std::cell::RefCell;
use std::sync::{Arc, PoisonError, RwLock};

use stockroom_core::{DomainError, DomainResult};
use stockroom_inventory::Item;

use crate::store::{InventoryStore, InventoryView};

/// Cloneable handle to the session's store.
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<RwLock<InventoryStore>>,
}

impl SharedStore {
    pub fn new(store: InventoryStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run `f` with read access.
    pub fn read<R>(&self, f: impl FnOnce(&InventoryStore) -> R) -> R {
        // Lock poisoning is not treated as fatal.
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` with write access.
    pub fn write<R>(&self, f: impl FnOnce(&mut InventoryStore) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn view(&self) -> InventoryView {
        self.read(InventoryStore::view)
    }

    /// Both handles point at the same store.
    pub fn same_store(&self, other: &SharedStore) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

thread_local! {
    static ACTIVE: RefCell<Vec<SharedStore>> = const { RefCell::new(Vec::new()) };
}

/// Pops the active store when the scope ends, panics included.
struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        ACTIVE.with(|active| {
            active.borrow_mut().pop();
        });
    }
}

/// Make `store` the active store on this thread while `f` runs.
///
/// Scopes nest: the innermost store wins, and the outer one is active again
/// once `f` returns.
pub fn provide<R>(store: &SharedStore, f: impl FnOnce() -> R) -> R {
    ACTIVE.with(|active| active.borrow_mut().push(store.clone()));
    let _guard = ScopeGuard;
    f()
}

/// The active store, or a usage error outside [`provide`].
pub fn current() -> DomainResult<SharedStore> {
    ACTIVE
        .with(|active| active.borrow().last().cloned())
        .ok_or_else(|| DomainError::usage("inventory store accessed outside of a store scope"))
}

/// Collections and derived views of the active store.
pub fn view() -> DomainResult<InventoryView> {
    Ok(current()?.view())
}

/// Low-stock items of the active store.
pub fn low_stock_items() -> DomainResult<Vec<Item>> {
    Ok(current()?.read(|store| store.low_stock_items().into_iter().cloned().collect()))
}

/// Expiring items of the active store, evaluated now.
pub fn expiring_items() -> DomainResult<Vec<Item>> {
    Ok(current()?.read(|store| store.expiring_items().into_iter().cloned().collect()))
}
