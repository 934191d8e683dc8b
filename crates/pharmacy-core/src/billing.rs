//! # Billing
//!
//! The sale calculation: discount, total, and the stock decrement.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sell(product, quantity)                                                │
//! │       │                                                                 │
//! │       ├── quantity <= 0?        → ValidationError::MustBePositive       │
//! │       ├── quantity > stock?     → CoreError::InsufficientStock          │
//! │       │                           (product untouched)                   │
//! │       ├── price × quantity > i64? → CoreError::AmountTooLarge           │
//! │       │                           (product untouched)                   │
//! │       ▼                                                                 │
//! │  subtotal        = price × quantity                                     │
//! │  discount_amount = round(price × quantity × bps / 10000)                │
//! │  total           = subtotal - discount_amount                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stock -= quantity, Invoice { snapshot of product before the sale }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! The line discount is rounded once, over the whole line, so
//! `total == subtotal - discount_amount` holds to the paisa. The per-unit
//! discount shown on the receipt is rounded on its own and is display only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Invoice, Product};
use crate::validation::validate_quantity;

/// Amounts for one sale line, before anything is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAmounts {
    pub discount_per_unit: Money,
    pub subtotal: Money,
    pub discount_amount: Money,
    pub total: Money,
}

/// Computes the amounts for selling `quantity` units of `product`.
///
/// Pure: no stock check, no mutation. Fails only when the line does not
/// fit in `Money`.
///
/// ## Example
/// ```rust
/// use pharmacy_core::{billing, DiscountRate, Money, Product};
///
/// let product = Product {
///     id: 1,
///     name: "Amoxicillin".to_string(),
///     price: Money::from_cents(10000),
///     discount: DiscountRate::from_bps(1000),
///     stock: 5,
/// };
/// let line = billing::line_amounts(&product, 3).unwrap();
/// assert_eq!(line.discount_per_unit.cents(), 1000);
/// assert_eq!(line.discount_amount.cents(), 3000);
/// assert_eq!(line.total.cents(), 27000);
/// ```
pub fn line_amounts(product: &Product, quantity: i64) -> CoreResult<LineAmounts> {
    let too_large = || CoreError::AmountTooLarge {
        name: product.name.clone(),
        quantity,
    };

    let subtotal = product
        .price
        .checked_mul_quantity(quantity)
        .ok_or_else(too_large)?;
    let discount_amount = subtotal.percentage(product.discount).ok_or_else(too_large)?;
    let total = subtotal.checked_sub(discount_amount).ok_or_else(too_large)?;
    let discount_per_unit = product.discount_per_unit().ok_or_else(too_large)?;

    Ok(LineAmounts {
        discount_per_unit,
        subtotal,
        discount_amount,
        total,
    })
}

/// Sells `quantity` units of `product`, stamping the invoice with now.
pub fn sell(product: &mut Product, quantity: i64) -> CoreResult<Invoice> {
    sell_at(product, quantity, Utc::now())
}

/// Sells `quantity` units of `product` with an explicit invoice time.
///
/// On error the product is left exactly as it was.
pub fn sell_at(
    product: &mut Product,
    quantity: i64,
    issued_at: DateTime<Utc>,
) -> CoreResult<Invoice> {
    validate_quantity(quantity)?;

    if !product.can_sell(quantity) {
        return Err(CoreError::InsufficientStock {
            name: product.name.clone(),
            available: product.stock,
            requested: quantity,
        });
    }

    let line = line_amounts(product, quantity)?;
    let snapshot = product.clone();
    product.stock -= quantity;

    Ok(Invoice {
        product: snapshot,
        quantity,
        discount_per_unit: line.discount_per_unit,
        subtotal: line.subtotal,
        discount_amount: line.discount_amount,
        total: line.total,
        issued_at,
    })
}

/// Finds product `id` in `products` and sells from it.
///
/// Only the matching product is mutated; every other entry is untouched.
pub fn sell_from(products: &mut [Product], id: i64, quantity: i64) -> CoreResult<Invoice> {
    let product = products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(CoreError::ProductNotFound(id))?;
    sell(product, quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::DiscountRate;
    use crate::validation::ProductDraft;

    fn product(id: i64, price_cents: i64, discount_bps: u32, stock: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            price: Money::from_cents(price_cents),
            discount: DiscountRate::from_bps(discount_bps),
            stock,
        }
    }

    #[test]
    fn test_sell_worked_example() {
        // price 100, discount 10%, stock 5, sell 3
        let mut p = product(1, 10000, 1000, 5);
        let invoice = sell(&mut p, 3).unwrap();

        assert_eq!(invoice.discount_per_unit.cents(), 1000);
        assert_eq!(invoice.discount_amount.cents(), 3000);
        assert_eq!(invoice.total.cents(), 27000);
        assert_eq!(invoice.quantity, 3);
        assert_eq!(p.stock, 2);
    }

    #[test]
    fn test_invoice_snapshots_pre_sale_product() {
        let mut p = product(1, 10000, 1000, 5);
        let invoice = sell(&mut p, 3).unwrap();

        assert_eq!(invoice.product.stock, 5);
        assert_eq!(invoice.unit_price().cents(), 10000);
    }

    #[test]
    fn test_sell_rejects_over_stock() {
        let mut p = product(1, 10000, 1000, 2);
        let err = sell(&mut p, 3).unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 2,
                requested: 3,
                ..
            }
        ));
        assert_eq!(p.stock, 2);
    }

    #[test]
    fn test_sell_entire_stock() {
        let mut p = product(1, 500, 0, 4);
        sell(&mut p, 4).unwrap();
        assert_eq!(p.stock, 0);
        assert!(sell(&mut p, 1).is_err());
    }

    #[test]
    fn test_sell_rejects_non_positive_quantity() {
        let mut p = product(1, 500, 0, 4);
        assert!(matches!(sell(&mut p, 0), Err(CoreError::Validation(_))));
        assert!(matches!(sell(&mut p, -2), Err(CoreError::Validation(_))));
        assert_eq!(p.stock, 4);
    }

    #[test]
    fn test_total_identity_holds_across_prices() {
        // total == subtotal - discount, discount == round(price × q × rate)
        let prices = [1, 5, 99, 1250, 1999, 10000, 123457];
        let rates = [0, 1, 333, 1000, 1250, 5000, 9999, 10000];
        for &price in &prices {
            for &bps in &rates {
                for qty in 1..=7 {
                    let mut p = product(1, price, bps, 10);
                    let invoice = sell(&mut p, qty).unwrap();

                    let exact = price as i128 * qty as i128 * bps as i128;
                    let expected_discount = ((exact + 5000) / 10000) as i64;

                    assert_eq!(invoice.subtotal.cents(), price * qty);
                    assert_eq!(invoice.discount_amount.cents(), expected_discount);
                    assert_eq!(
                        invoice.total.cents(),
                        invoice.subtotal.cents() - invoice.discount_amount.cents()
                    );
                    assert!(!invoice.total.is_negative());
                    assert_eq!(p.stock, 10 - qty);
                }
            }
        }
    }

    #[test]
    fn test_sell_rejects_line_too_large_for_money() {
        // Both fields pass validation on their own; the line does not fit.
        let mut p = ProductDraft::new("Bulk", "10000000000000000", "0", "10")
            .into_product(1)
            .unwrap();

        let err = sell(&mut p, 10).unwrap_err();

        assert!(matches!(
            err,
            CoreError::AmountTooLarge { quantity: 10, .. }
        ));
        assert_eq!(p.stock, 10);
    }

    #[test]
    fn test_largest_line_that_fits_still_sells() {
        let mut p = product(1, i64::MAX / 2, 10_000, 2);
        let invoice = sell(&mut p, 2).unwrap();
        assert_eq!(invoice.subtotal.cents(), (i64::MAX / 2) * 2);
        assert!(invoice.total.is_zero());
    }

    #[test]
    fn test_sell_from_only_touches_target() {
        let mut products = vec![
            product(1, 1000, 0, 10),
            product(2, 2000, 500, 7),
            product(3, 3000, 0, 1),
        ];

        let invoice = sell_from(&mut products, 2, 4).unwrap();

        assert_eq!(invoice.product.id, 2);
        assert_eq!(products[0].stock, 10);
        assert_eq!(products[1].stock, 3);
        assert_eq!(products[2].stock, 1);
    }

    #[test]
    fn test_sell_from_unknown_id() {
        let mut products = vec![product(1, 1000, 0, 10)];
        let err = sell_from(&mut products, 99, 1).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(99)));
        assert_eq!(products[0].stock, 10);
    }

    #[test]
    fn test_sell_at_uses_given_time() {
        let when = DateTime::parse_from_rfc3339("2024-03-01T10:15:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut p = product(1, 1000, 0, 1);
        let invoice = sell_at(&mut p, 1, when).unwrap();
        assert_eq!(invoice.issued_at, when);
    }
}
