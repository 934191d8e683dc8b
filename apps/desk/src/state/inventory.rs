//! # Inventory State
//!
//! The in-memory copy of the product catalogue.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory Operations                                 │
//! │                                                                         │
//! │  Operator Action          Desk Operation          Inventory Change      │
//! │  ───────────────          ──────────────          ────────────────      │
//! │                                                                         │
//! │  reload / add / remove ──► reload() ────────────► replace(all rows)    │
//! │                                                                         │
//! │  sell <id> <qty> ────────► sell() ──────────────► product.stock -= qty │
//! │                                                                         │
//! │  list ───────────────────► products() ──────────► (read only)          │
//! │                                                                         │
//! │  NOTE: Stock decrements are local only; the next reload restores       │
//! │        whatever the remote sheet holds.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use pharmacy_core::billing;
use pharmacy_core::{CoreResult, Invoice, Product};

/// The product collection as last loaded.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    products: Vec<Product>,
}

impl Inventory {
    /// Creates an empty, never-loaded inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection. Nothing is merged.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    /// Sells from product `id`; on error nothing changes.
    pub fn sell(&mut self, id: i64, quantity: i64) -> CoreResult<Invoice> {
        billing::sell_from(&mut self.products, id, quantity)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

/// Shared inventory state.
///
/// ## Thread Safety
/// `Arc<Mutex<Inventory>>`; the lock is only taken inside the closures
/// below and never held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct InventoryState {
    inventory: Arc<Mutex<Inventory>>,
}

impl InventoryState {
    /// Creates an empty inventory state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the inventory.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = inventory_state.with_inventory(|inv| inv.products().len());
    /// ```
    pub fn with_inventory<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Inventory) -> R,
    {
        let inventory = self.inventory.lock().expect("Inventory mutex poisoned");
        f(&inventory)
    }

    /// Executes a function with write access to the inventory.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let invoice = inventory_state.with_inventory_mut(|inv| inv.sell(id, 3))?;
    /// ```
    pub fn with_inventory_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Inventory) -> R,
    {
        let mut inventory = self.inventory.lock().expect("Inventory mutex poisoned");
        f(&mut inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacy_core::{CoreError, DiscountRate, Money};

    fn product(id: i64, stock: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            price: Money::from_cents(1000),
            discount: DiscountRate::zero(),
            stock,
        }
    }

    #[test]
    fn test_replace_discards_previous_products() {
        let mut inventory = Inventory::new();
        assert!(inventory.products().is_empty());

        inventory.replace(vec![product(1, 5), product(2, 5)]);
        inventory.replace(vec![product(3, 1)]);

        assert_eq!(inventory.products(), &[product(3, 1)]);
    }

    #[test]
    fn test_sell_through_state() {
        let state = InventoryState::new();
        state.with_inventory_mut(|inv| inv.replace(vec![product(1, 5), product(2, 5)]));

        let invoice = state.with_inventory_mut(|inv| inv.sell(2, 3)).unwrap();
        assert_eq!(invoice.product.id, 2);

        state.with_inventory(|inv| {
            assert_eq!(inv.products()[0].stock, 5);
            assert_eq!(inv.products()[1].stock, 2);
        });
    }

    #[test]
    fn test_sell_unknown_id() {
        let state = InventoryState::new();
        let err = state.with_inventory_mut(|inv| inv.sell(9, 1)).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(9)));
    }

    #[test]
    fn test_clones_share_inventory() {
        let state = InventoryState::new();
        let other = state.clone();
        other.with_inventory_mut(|inv| inv.replace(vec![product(1, 1)]));
        assert_eq!(state.with_inventory(|inv| inv.products().len()), 1);
    }
}
