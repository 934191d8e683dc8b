//! # Desk Controller
//!
//! Owns the remote store client, the inventory and the last invoice, and
//! implements every operation the counter offers.
//!
//! ## Source of Truth
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  create / delete ──► RemoteStore ──ok──► reload() ──► InventoryState   │
//! │                          │                                              │
//! │                          └──err──► NetworkFailure, inventory untouched  │
//! │                                                                         │
//! │  sell ─────────────────────────────────────────────► InventoryState    │
//! │                                                      InvoiceSlot        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The remote sheet is authoritative. A created product only appears once
//! the reload after the write brings it back. If that reload fails the
//! write still counts as done and the failure is only logged.

use std::time::Instant;

use chrono::Utc;
use pharmacy_core::validation::ProductDraft;
use pharmacy_core::{Invoice, Product};
use pharmacy_store::RemoteStore;
use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::state::{InventoryState, InvoiceSlot};

/// Outcome of one reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSummary {
    /// Rows coerced into products.
    pub loaded: usize,

    /// Rows dropped because they did not coerce.
    pub skipped: usize,
}

/// The counter's controller.
#[derive(Debug)]
pub struct Desk<S> {
    store: S,
    inventory: InventoryState,
    invoice: InvoiceSlot,
}

impl<S: RemoteStore> Desk<S> {
    /// Creates a desk with an empty inventory.
    pub fn new(store: S) -> Self {
        Desk {
            store,
            inventory: InventoryState::new(),
            invoice: InvoiceSlot::new(),
        }
    }

    // =========================================================================
    // Inventory Sync
    // =========================================================================

    /// Replaces the inventory with whatever the store holds.
    ///
    /// On failure the error is logged and the inventory is left exactly as
    /// it was.
    pub async fn reload(&self) -> Result<ReloadSummary, ApiError> {
        let start = Instant::now();
        debug!("reload called");

        let rows = match self.store.list_rows().await {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "Inventory reload failed; keeping current inventory");
                return Err(e.into());
            }
        };

        let total = rows.len();
        let mut products = Vec::with_capacity(total);
        for row in rows {
            let label = row.label();
            match row.into_product() {
                Ok(product) => products.push(product),
                Err(e) => warn!(row = %label, reason = %e, "Skipping product row"),
            }
        }

        let summary = ReloadSummary {
            loaded: products.len(),
            skipped: total - products.len(),
        };
        self.inventory.with_inventory_mut(|inv| inv.replace(products));

        info!(
            loaded = summary.loaded,
            skipped = summary.skipped,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Inventory reloaded"
        );
        Ok(summary)
    }

    // =========================================================================
    // Product Mutation
    // =========================================================================

    /// Validates `draft`, writes it to the store, then reloads.
    ///
    /// The new product's id is the current Unix time in milliseconds.
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, ApiError> {
        let id = Utc::now().timestamp_millis();
        self.create_product_with_id(draft, id).await
    }

    /// [`Desk::create_product`] with a caller-chosen id.
    pub async fn create_product_with_id(
        &self,
        draft: ProductDraft,
        id: i64,
    ) -> Result<Product, ApiError> {
        let start = Instant::now();
        debug!(id, name = %draft.name, "create_product called");

        let product = draft.into_product(id)?;

        if let Err(e) = self.store.create(&product).await {
            error!(id, error = %e, "Failed to add product");
            return Err(e.into());
        }

        info!(
            id,
            name = %product.name,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Product added"
        );
        self.reload_after_write().await;
        Ok(product)
    }

    /// Deletes product `id` from the store, then reloads.
    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        let start = Instant::now();
        debug!(id, "delete_product called");

        if let Err(e) = self.store.delete(id).await {
            error!(id, error = %e, "Failed to remove product");
            return Err(e.into());
        }

        info!(
            id,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Product removed"
        );
        self.reload_after_write().await;
        Ok(())
    }

    /// A failed reload after a successful write is logged, not returned.
    async fn reload_after_write(&self) {
        if self.reload().await.is_err() {
            warn!("Write succeeded but the follow-up reload failed; inventory may be stale");
        }
    }

    // =========================================================================
    // Billing
    // =========================================================================

    /// Sells `quantity` units of product `id` and records the invoice.
    ///
    /// On rejection neither the inventory nor the last invoice changes.
    pub fn sell(&self, id: i64, quantity: i64) -> Result<Invoice, ApiError> {
        debug!(id, quantity, "sell called");

        let invoice = self
            .inventory
            .with_inventory_mut(|inv| inv.sell(id, quantity))?;
        self.invoice.set(invoice.clone());

        info!(
            id,
            quantity,
            total_cents = invoice.total.cents(),
            remaining = invoice.product.stock - quantity,
            "Sale recorded"
        );
        Ok(invoice)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// A copy of the current inventory, in load order.
    pub fn products(&self) -> Vec<Product> {
        self.inventory.with_inventory(|inv| inv.products().to_vec())
    }

    /// The most recent invoice, if any.
    pub fn last_invoice(&self) -> Option<Invoice> {
        self.invoice.get()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use pharmacy_store::{RawProductRow, StoreError, StoreResult};
    use serde_json::json;

    use super::*;
    use crate::error::ErrorCode;

    /// In-memory store with switchable failures.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryStore {
        pub rows: Mutex<Vec<RawProductRow>>,
        pub fail_list: Mutex<bool>,
        pub fail_writes: Mutex<bool>,
    }

    impl MemoryStore {
        pub(crate) fn with_rows(rows: Vec<RawProductRow>) -> Arc<Self> {
            Arc::new(MemoryStore {
                rows: Mutex::new(rows),
                ..Default::default()
            })
        }

        pub(crate) fn set_fail_list(&self, fail: bool) {
            *self.fail_list.lock().unwrap() = fail;
        }

        pub(crate) fn set_fail_writes(&self, fail: bool) {
            *self.fail_writes.lock().unwrap() = fail;
        }
    }

    #[async_trait]
    impl RemoteStore for MemoryStore {
        async fn list_rows(&self) -> StoreResult<Vec<RawProductRow>> {
            if *self.fail_list.lock().unwrap() {
                return Err(StoreError::Network("connection refused".into()));
            }
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn create(&self, product: &Product) -> StoreResult<()> {
            if *self.fail_writes.lock().unwrap() {
                return Err(StoreError::status(500, "sheet unavailable"));
            }
            self.rows.lock().unwrap().push(RawProductRow::from(product));
            Ok(())
        }

        async fn delete(&self, id: i64) -> StoreResult<()> {
            if *self.fail_writes.lock().unwrap() {
                return Err(StoreError::status(500, "sheet unavailable"));
            }
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|row| row.id != json!(id) && row.id != json!(id.to_string()));
            if rows.len() == before {
                return Err(StoreError::status(404, "not found"));
            }
            Ok(())
        }
    }

    pub(crate) fn row(id: i64, name: &str, price: &str, discount: &str, stock: i64) -> RawProductRow {
        serde_json::from_value(json!({
            "id": id.to_string(),
            "name": name,
            "price": price,
            "discount": discount,
            "stock": stock.to_string(),
        }))
        .unwrap()
    }

    pub(crate) fn sample_rows() -> Vec<RawProductRow> {
        vec![
            row(1, "Amoxicillin", "100", "10", 5),
            row(2, "Cetirizine", "35.50", "0", 2),
        ]
    }

    #[tokio::test]
    async fn test_reload_replaces_inventory() {
        let store = MemoryStore::with_rows(sample_rows());
        let desk = Desk::new(store.clone());

        let summary = desk.reload().await.unwrap();
        assert_eq!(summary, ReloadSummary { loaded: 2, skipped: 0 });

        *store.rows.lock().unwrap() = vec![row(3, "Zinc", "4", "0", 9)];
        desk.reload().await.unwrap();

        let products = desk.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 3);
    }

    #[tokio::test]
    async fn test_reload_skips_bad_rows() {
        let mut rows = sample_rows();
        rows.push(row(3, "Broken", "abc", "0", 1));
        rows.push(row(4, "Too generous", "10", "150", 1));
        let desk = Desk::new(MemoryStore::with_rows(rows));

        let summary = desk.reload().await.unwrap();
        assert_eq!(summary, ReloadSummary { loaded: 2, skipped: 2 });
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_inventory() {
        let store = MemoryStore::with_rows(sample_rows());
        let desk = Desk::new(store.clone());
        desk.reload().await.unwrap();

        store.set_fail_list(true);
        *store.rows.lock().unwrap() = Vec::new();

        let err = desk.reload().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NetworkFailure);
        assert_eq!(desk.products().len(), 2);
    }

    #[tokio::test]
    async fn test_create_then_reload_shows_product() {
        let store = MemoryStore::with_rows(Vec::new());
        let desk = Desk::new(store.clone());

        let created = desk
            .create_product(ProductDraft::new("Paracetamol", "12.50", "0", "100"))
            .await
            .unwrap();
        assert!(created.id > 0);

        let products = desk.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, created.id);
        assert_eq!(products[0].price.cents(), 1250);
        assert!(products[0].discount.is_zero());
        assert_eq!(products[0].stock, 100);
    }

    #[tokio::test]
    async fn test_failed_create_changes_nothing() {
        let store = MemoryStore::with_rows(sample_rows());
        let desk = Desk::new(store.clone());
        desk.reload().await.unwrap();

        store.set_fail_writes(true);
        let err = desk
            .create_product_with_id(ProductDraft::new("Ibuprofen", "8", "0", "10"), 99)
            .await
            .unwrap_err();

        assert!(err.is_network_failure());
        assert_eq!(desk.products().len(), 2);
        assert_eq!(store.rows.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_store() {
        let store = MemoryStore::with_rows(Vec::new());
        let desk = Desk::new(store.clone());

        let err = desk
            .create_product(ProductDraft::new("Ibuprofen", "eight", "0", "10"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_succeeds_even_if_reload_fails() {
        let store = MemoryStore::with_rows(Vec::new());
        let desk = Desk::new(store.clone());
        store.set_fail_list(true);

        let created = desk
            .create_product_with_id(ProductDraft::new("Zinc", "4", "0", "9"), 5)
            .await;

        assert!(created.is_ok());
        assert!(desk.products().is_empty());
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_then_reload() {
        let store = MemoryStore::with_rows(sample_rows());
        let desk = Desk::new(store.clone());
        desk.reload().await.unwrap();

        desk.delete_product(1).await.unwrap();
        let products = desk.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 2);

        store.set_fail_writes(true);
        let err = desk.delete_product(2).await.unwrap_err();
        assert!(err.is_network_failure());
        assert_eq!(desk.products().len(), 1);
    }

    #[tokio::test]
    async fn test_sell_updates_stock_and_invoice() {
        let desk = Desk::new(MemoryStore::with_rows(sample_rows()));
        desk.reload().await.unwrap();

        let invoice = desk.sell(1, 3).unwrap();
        assert_eq!(invoice.discount_per_unit.cents(), 1000);
        assert_eq!(invoice.discount_amount.cents(), 3000);
        assert_eq!(invoice.total.cents(), 27000);

        let products = desk.products();
        assert_eq!(products[0].stock, 2);
        assert_eq!(products[1].stock, 2);
        assert_eq!(desk.last_invoice(), Some(invoice));
    }

    #[tokio::test]
    async fn test_rejected_sale_keeps_stock_and_invoice() {
        let desk = Desk::new(MemoryStore::with_rows(sample_rows()));
        desk.reload().await.unwrap();
        assert!(desk.last_invoice().is_none());

        let err = desk.sell(2, 3).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(desk.products()[1].stock, 2);
        assert!(desk.last_invoice().is_none());

        let first = desk.sell(2, 1).unwrap();
        assert!(desk.sell(2, 5).is_err());
        assert_eq!(desk.last_invoice(), Some(first));

        let err = desk.sell(42, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_reload_restores_sold_stock() {
        let desk = Desk::new(MemoryStore::with_rows(sample_rows()));
        desk.reload().await.unwrap();
        desk.sell(1, 3).unwrap();

        desk.reload().await.unwrap();
        assert_eq!(desk.products()[0].stock, 5);
    }
}
