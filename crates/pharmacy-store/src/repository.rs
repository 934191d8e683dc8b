//! # Remote Store Trait
//!
//! The three operations the desk needs from wherever products are kept.
//!
//! `SheetStore` implements this over HTTP; tests implement it in memory.
//! Rows come back raw so the caller decides what to do with rows that do
//! not coerce.

use std::sync::Arc;

use async_trait::async_trait;
use pharmacy_core::Product;

use crate::error::StoreResult;
use crate::wire::RawProductRow;

/// Product storage the desk reads from and writes to.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Every row currently stored, uncoerced.
    async fn list_rows(&self) -> StoreResult<Vec<RawProductRow>>;

    /// Stores one new product.
    async fn create(&self, product: &Product) -> StoreResult<()>;

    /// Removes the product with `id`.
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

#[async_trait]
impl<S: RemoteStore + ?Sized> RemoteStore for Arc<S> {
    async fn list_rows(&self) -> StoreResult<Vec<RawProductRow>> {
        (**self).list_rows().await
    }

    async fn create(&self, product: &Product) -> StoreResult<()> {
        (**self).create(product).await
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        (**self).delete(id).await
    }
}
