//! # Invoice Rendering
//!
//! Turns an [`Invoice`] into the plain-text receipt handed to the printer.
//!
//! ## Receipt Layout
//! ```text
//! ┌──────────────────────────────────────┐
//! │ City Pharmacy                        │
//! │ Invoice                              │
//! │ Date: 2024-03-01 10:15 UTC           │
//! │ ------------------------------------ │
//! │ Product: Amoxicillin                 │
//! │ Quantity: 3                          │
//! │ Unit Price: ₹100.00                  │
//! │ Discount per unit: ₹10.00            │
//! │ Total Discount: ₹30.00               │
//! │ ------------------------------------ │
//! │ Total Amount: ₹270.00                │
//! └──────────────────────────────────────┘
//! ```
//!
//! Amounts are rendered with a currency symbol prefix and two decimals.
//! Rendering never changes any amount; rounding already happened in
//! [`crate::billing`].

use std::fmt::Write;

use crate::types::Invoice;
use crate::DEFAULT_CURRENCY_SYMBOL;

/// Width of the separator rule.
const RULE_WIDTH: usize = 36;

/// Display settings for receipts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptStyle {
    /// Prefix for every amount ("₹").
    pub currency_symbol: String,

    /// Heading line; omitted when empty.
    pub store_name: String,
}

impl Default for ReceiptStyle {
    fn default() -> Self {
        ReceiptStyle {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            store_name: String::new(),
        }
    }
}

/// Renders the receipt text for `invoice`, newline-terminated.
pub fn render_receipt(invoice: &Invoice, style: &ReceiptStyle) -> String {
    let symbol = style.currency_symbol.as_str();
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing into a String cannot fail.
    if !style.store_name.is_empty() {
        let _ = writeln!(out, "{}", style.store_name);
    }
    let _ = writeln!(out, "Invoice");
    let _ = writeln!(
        out,
        "Date: {}",
        invoice.issued_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Product: {}", invoice.product.name);
    let _ = writeln!(out, "Quantity: {}", invoice.quantity);
    let _ = writeln!(out, "Unit Price: {}", invoice.unit_price().format_with(symbol));
    let _ = writeln!(
        out,
        "Discount per unit: {}",
        invoice.discount_per_unit.format_with(symbol)
    );
    let _ = writeln!(
        out,
        "Total Discount: {}",
        invoice.discount_amount.format_with(symbol)
    );
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Total Amount: {}", invoice.total.format_with(symbol));

    out
}
