//! Cart store.
//!
//! Owns the ordered list of line items. The whole list is rewritten to
//! durable storage after every successful mutation; there is no incremental
//! diff persistence. Totals are recomputed from the full list on every call,
//! never cached.

use std::cell::RefCell;

use tienda_core::ProductId;

use crate::models::{CartItem, CartTotals, Product};
use crate::storage::{Storage, StorageError, keys};

/// Errors from cart mutations.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// The product is missing an id or a name.
    #[error("cannot add product without {missing}")]
    InvalidProduct {
        /// The field that was missing or empty.
        missing: &'static str,
    },

    /// The snapshot rewrite failed. The in-memory mutation stands.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The in-memory cart plus its persisted snapshot.
pub struct CartStore {
    items: RefCell<Vec<CartItem>>,
    storage: Storage,
}

impl CartStore {
    /// Create an empty cart over the given storage.
    #[must_use]
    pub const fn new(storage: Storage) -> Self {
        Self {
            items: RefCell::new(Vec::new()),
            storage,
        }
    }

    /// Replace the in-memory list with the persisted snapshot.
    ///
    /// A missing or corrupt snapshot hydrates an empty cart; the page must
    /// come up either way.
    pub fn hydrate(&self) {
        *self.items.borrow_mut() = read_snapshot(&self.storage);
    }

    /// Add one unit of a product.
    ///
    /// If the product id is already in the cart its quantity goes up by one;
    /// otherwise the product is appended as a new line with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidProduct`] without mutating anything if
    /// the product has an empty id or name, and [`CartError::Storage`] if
    /// the snapshot rewrite fails after the in-memory mutation.
    pub fn add(&self, product: Product) -> Result<(), CartError> {
        if product.id.is_empty() {
            return Err(CartError::InvalidProduct { missing: "id" });
        }
        if product.name.is_empty() {
            return Err(CartError::InvalidProduct { missing: "name" });
        }

        {
            let mut items = self.items.borrow_mut();
            if let Some(existing) = items.iter_mut().find(|item| item.id == product.id) {
                existing.quantity += 1;
            } else {
                items.push(CartItem::first_of(product));
            }
        }
        Ok(self.persist()?)
    }

    /// Add `delta` to an item's quantity.
    ///
    /// A result of zero or less removes the line entirely. An unknown id is
    /// a no-op, persisted state untouched.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the snapshot rewrite fails.
    pub fn change_quantity(&self, id: &ProductId, delta: i32) -> Result<(), StorageError> {
        {
            let mut items = self.items.borrow_mut();
            let Some(index) = items.iter().position(|item| &item.id == id) else {
                return Ok(());
            };
            let current = items.get(index).map_or(0, |item| i64::from(item.quantity));
            let next = current + i64::from(delta);
            if next <= 0 {
                items.remove(index);
            } else if let Some(item) = items.get_mut(index) {
                // next is positive and was a u32 plus an i32, so it fits
                item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
            }
        }
        self.persist()
    }

    /// Delete an item unconditionally. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the snapshot rewrite fails.
    pub fn remove(&self, id: &ProductId) -> Result<(), StorageError> {
        let removed = {
            let mut items = self.items.borrow_mut();
            let before = items.len();
            items.retain(|item| &item.id != id);
            items.len() != before
        };
        if removed { self.persist() } else { Ok(()) }
    }

    /// Count and total, recomputed fresh from the full list.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::of(&self.items.borrow())
    }

    /// A copy of the current items, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.items.borrow().clone()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Rewrite the whole snapshot.
    fn persist(&self) -> Result<(), StorageError> {
        let encoded =
            serde_json::to_string(&*self.items.borrow()).map_err(|source| {
                StorageError::Encode {
                    key: keys::SHOPPING_CART.to_owned(),
                    source,
                }
            })?;
        self.storage.durable().set(keys::SHOPPING_CART, &encoded)
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Read the persisted cart snapshot.
///
/// Shared with the checkout summary, which is a pure function of the
/// snapshot at the moment the checkout view opens. Corrupt snapshots read
/// as empty, with a warning.
#[must_use]
pub fn read_snapshot(storage: &Storage) -> Vec<CartItem> {
    let Some(raw) = storage.durable().get(keys::SHOPPING_CART) else {
        return Vec::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "discarding unparseable cart snapshot");
        Vec::new()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use tienda_core::Money;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("Producto {id}"), Money::from_cents(cents), None)
    }

    fn store() -> CartStore {
        CartStore::new(Storage::in_memory())
    }

    #[test]
    fn test_add_same_id_twice_merges() {
        let cart = store();
        cart.add(product("a", 1000)).unwrap();
        cart.add(product("a", 1000)).unwrap();

        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let cart = store();
        cart.add(product("b", 100)).unwrap();
        cart.add(product("a", 200)).unwrap();
        cart.add(product("b", 100)).unwrap();

        let ids: Vec<_> = cart.items().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![ProductId::new("b"), ProductId::new("a")]);
    }

    #[test]
    fn test_add_invalid_product_is_rejected() {
        let cart = store();
        let err = cart.add(product("", 100)).unwrap_err();
        assert!(matches!(err, CartError::InvalidProduct { missing: "id" }));

        let err = cart
            .add(Product::new("a", "", Money::from_cents(100), None))
            .unwrap_err();
        assert!(matches!(err, CartError::InvalidProduct { missing: "name" }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_to_zero_removes_line() {
        let cart = store();
        cart.add(product("a", 1000)).unwrap();
        cart.add(product("a", 1000)).unwrap();

        cart.change_quantity(&ProductId::new("a"), -2).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_never_stores_zero() {
        let cart = store();
        cart.add(product("a", 1000)).unwrap();
        cart.change_quantity(&ProductId::new("a"), -5).unwrap();
        assert!(cart.items().iter().all(|item| item.quantity >= 1) && cart.is_empty());
    }

    #[test]
    fn test_change_quantity_unknown_id_is_noop() {
        let cart = store();
        cart.add(product("a", 1000)).unwrap();
        cart.change_quantity(&ProductId::new("zzz"), 1).unwrap();
        assert_eq!(cart.totals().count, 1);
    }

    #[test]
    fn test_remove() {
        let cart = store();
        cart.add(product("a", 1000)).unwrap();
        cart.add(product("b", 500)).unwrap();

        cart.remove(&ProductId::new("a")).unwrap();
        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ProductId::new("b"));

        // removing an absent id changes nothing
        cart.remove(&ProductId::new("a")).unwrap();
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_totals_recomputed_fresh() {
        let cart = store();
        cart.add(product("a", 1000)).unwrap();
        cart.add(product("b", 550)).unwrap();
        cart.add(product("b", 550)).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.count, 3);
        assert_eq!(totals.total, Money::from_cents(2100));

        cart.change_quantity(&ProductId::new("a"), 1).unwrap();
        let totals = cart.totals();
        assert_eq!(totals.count, 4);
        assert_eq!(totals.total, Money::from_cents(3100));
    }

    #[test]
    fn test_mutations_rewrite_snapshot() {
        let storage = Storage::in_memory();
        let cart = CartStore::new(storage.clone());
        cart.add(product("a", 1000)).unwrap();

        let other = CartStore::new(storage.clone());
        other.hydrate();
        assert_eq!(other.items(), cart.items());

        cart.remove(&ProductId::new("a")).unwrap();
        assert_eq!(storage.durable().get(keys::SHOPPING_CART).unwrap(), "[]");
    }

    #[test]
    fn test_hydrate_corrupt_snapshot_is_empty() {
        let storage = Storage::in_memory();
        storage
            .durable()
            .set(keys::SHOPPING_CART, "{not json")
            .unwrap();
        let cart = CartStore::new(storage);
        cart.hydrate();
        assert!(cart.is_empty());
    }
}
