//! # pharmacy-core: Pure Business Logic for the Pharmacy Counter
//!
//! This crate holds every calculation the counter performs, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pharmacy Billing Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Operator Console (apps/desk)                    │   │
//! │  │    add ──► list ──► sell ──► invoice ──► print                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pharmacy-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  billing  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ sell()    │  │   draft   │  │   │
//! │  │   │  Invoice  │  │ Discount  │  │ Invoice   │  │  parsing  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              pharmacy-store (Remote Store client)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Invoice)
//! - [`money`] - Money and DiscountRate, parsed with rust_decimal
//! - [`billing`] - The sale calculation
//! - [`invoice`] - Receipt text rendering
//! - [`error`] - Domain error types
//! - [`validation`] - Operator input parsing and checks
//!
//! ## Example Usage
//!
//! ```rust
//! use pharmacy_core::{billing, DiscountRate, Money, Product};
//!
//! let mut product = Product {
//!     id: 1,
//!     name: "Paracetamol".to_string(),
//!     price: Money::from_cents(10000),
//!     discount: DiscountRate::from_bps(1000), // 10%
//!     stock: 5,
//! };
//!
//! let invoice = billing::sell(&mut product, 3).unwrap();
//! assert_eq!(invoice.discount_amount.cents(), 3000); // 30.00
//! assert_eq!(invoice.total.cents(), 27000); // 270.00
//! assert_eq!(product.stock, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod invoice;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{DiscountRate, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency symbol used when nothing else is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Maximum length of a product name.
///
/// ## Business Reason
/// Sheet cells and receipt lines both become unreadable past this.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
