//! # Domain Types
//!
//! Core domain types used throughout the pharmacy counter.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌──────────────────────────┐               │
//! │  │    Product      │        │        Invoice           │               │
//! │  │  ─────────────  │  sell  │  ──────────────────────  │               │
//! │  │  id (i64)       │ ─────► │  product (snapshot)      │               │
//! │  │  name           │        │  quantity                │               │
//! │  │  price (Money)  │        │  discount_per_unit       │               │
//! │  │  discount (bps) │        │  subtotal                │               │
//! │  │  stock          │        │  discount_amount         │               │
//! │  └─────────────────┘        │  total                   │               │
//! │                             │  issued_at               │               │
//! │                             └──────────────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A product `id` is a millisecond timestamp taken when the product was
//! created at a counter. The remote sheet keeps whatever id was written,
//! so the id read back on reload is the one assigned here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{DiscountRate, Money};

// =============================================================================
// Product
// =============================================================================

/// A product held in the pharmacy inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Timestamp-derived identifier.
    pub id: i64,

    /// Display name shown in the inventory and on the invoice.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Percentage discount applied per unit.
    pub discount: DiscountRate,

    /// Units on hand. Never negative.
    pub stock: i64,
}

impl Product {
    /// Discount on one unit, rounded to the minor unit.
    ///
    /// `None` only for a rate above 100% on a price near `i64::MAX`.
    #[inline]
    pub fn discount_per_unit(&self) -> Option<Money> {
        self.price.percentage(self.discount)
    }

    /// Checks if `quantity` units are on hand.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity <= self.stock
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// The record of one sale.
///
/// Uses the snapshot pattern: `product` is frozen as it was before the
/// sale, so later reloads or sales never change a printed invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Product at time of sale (frozen, pre-sale stock).
    pub product: Product,

    /// Units sold.
    pub quantity: i64,

    /// Discount on one unit, for display.
    pub discount_per_unit: Money,

    /// Unit price × quantity.
    pub subtotal: Money,

    /// Discount over the whole line (not per unit).
    pub discount_amount: Money,

    /// Amount payable: `subtotal - discount_amount`.
    pub total: Money,

    /// When the sale was billed.
    pub issued_at: DateTime<Utc>,
}

impl Invoice {
    /// Unit price at time of sale.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.product.price
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
