//! # Validation Module
//!
//! Turns operator-typed text into typed values, and checks business rules
//! before anything is sent to the remote store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console                                                      │
//! │  └── Splits the line into fields (name, price, discount, stock)        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Every numeric field must parse                                    │
//! │  ├── price >= 0, stock >= 0, 0 <= discount <= 100                      │
//! │  └── name non-empty                                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote sheet                                                 │
//! │  └── No schema enforcement at all                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pharmacy_core::validation::ProductDraft;
//!
//! let draft = ProductDraft::new("Paracetamol", "12.50", "0", "100");
//! let product = draft.into_product(1_700_000_000_000).unwrap();
//! assert_eq!(product.price.cents(), 1250);
//! assert_eq!(product.stock, 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::{parse_decimal, to_hundredths, DiscountRate, Money, MAX_DISCOUNT_BPS};
use crate::types::Product;
use crate::MAX_PRODUCT_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// The upper bound is the product's stock, checked by billing.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (free samples)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount rate.
///
/// ## Rules
/// - Must be between 0% and 100% (0 to 10000 bps)
pub fn validate_discount(rate: DiscountRate) -> ValidationResult<()> {
    if rate.bps() > MAX_DISCOUNT_BPS {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a stock level.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Parsers
// =============================================================================

fn invalid_number(field: &str, value: &str) -> ValidationError {
    ValidationError::InvalidNumber {
        field: field.to_string(),
        value: value.trim().to_string(),
    }
}

/// Parses and validates a price ("12.50").
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let price = Money::parse(text).ok_or_else(|| invalid_number("price", text))?;
    validate_price(price)?;
    Ok(price)
}

/// Parses and validates a discount percentage ("10", "12.5").
pub fn parse_discount(text: &str) -> ValidationResult<DiscountRate> {
    // Hundredths of a percent are basis points. Negative text parses as a
    // number but not as a rate.
    let bps = parse_decimal(text)
        .and_then(to_hundredths)
        .ok_or_else(|| invalid_number("discount", text))?;
    let rate = u32::try_from(bps)
        .map(DiscountRate::from_bps)
        .map_err(|_| ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        })?;
    validate_discount(rate)?;
    Ok(rate)
}

/// Parses and validates a stock level ("100").
pub fn parse_stock(text: &str) -> ValidationResult<i64> {
    let stock = text
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid_number("stock", text))?;
    validate_stock(stock)?;
    Ok(stock)
}

/// Parses a sale quantity ("3").
pub fn parse_quantity(text: &str) -> ValidationResult<i64> {
    let qty = text
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid_number("quantity", text))?;
    validate_quantity(qty)?;
    Ok(qty)
}

/// Parses a product id ("1712345678901").
pub fn parse_product_id(text: &str) -> ValidationResult<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| invalid_number("id", text))
}

// =============================================================================
// Product Draft
// =============================================================================

/// The four fields of the "Add Product" form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub discount: String,
    pub stock: String,
}

impl ProductDraft {
    /// Creates a draft from raw field text.
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        discount: impl Into<String>,
        stock: impl Into<String>,
    ) -> Self {
        ProductDraft {
            name: name.into(),
            price: price.into(),
            discount: discount.into(),
            stock: stock.into(),
        }
    }

    /// Validates every field and builds a product with the given id.
    ///
    /// Fields are checked in form order and the first failure is returned.
    pub fn into_product(self, id: i64) -> ValidationResult<Product> {
        validate_product_name(&self.name)?;
        let price = parse_price(&self.price)?;
        let discount = parse_discount(&self.discount)?;
        let stock = parse_stock(&self.stock)?;

        Ok(Product {
            id,
            name: self.name.trim().to_string(),
            price,
            discount,
            stock,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
