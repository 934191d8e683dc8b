//! # Product Commands
//!
//! Inventory listing, reload, add and remove.
//!
//! ## Add Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add Paracetamol 500mg 12.50 0 100                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductDraft { name, price, discount, stock } (raw text)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate ──err──► "! price is not a valid number: 'abc'"              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST to store ──err──► "! Network failure: ..."                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reload, "Product added successfully!"                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write;

use pharmacy_core::invoice::ReceiptStyle;
use pharmacy_core::validation::{parse_product_id, ProductDraft};
use pharmacy_core::Product;
use pharmacy_store::RemoteStore;

use crate::desk::Desk;
use crate::error::ApiError;

/// Widest name column before truncation.
const NAME_WIDTH: usize = 28;

/// Renders the inventory as a fixed-width table.
///
/// ```text
/// ID              Name                         Price      Discount  Stock
/// 1712345678901   Paracetamol                  ₹12.50     0%          100
/// ```
pub fn render_inventory(products: &[Product], style: &ReceiptStyle) -> String {
    if products.is_empty() {
        return "Inventory is empty.\n".to_string();
    }

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{:<15} {:<width$} {:>10} {:>9} {:>6}",
        "ID",
        "Name",
        "Price",
        "Discount",
        "Stock",
        width = NAME_WIDTH
    );
    for product in products {
        let _ = writeln!(
            out,
            "{:<15} {:<width$} {:>10} {:>9} {:>6}",
            product.id,
            truncate(&product.name, NAME_WIDTH),
            product.price.format_with(&style.currency_symbol),
            product.discount.to_string(),
            product.stock,
            width = NAME_WIDTH
        );
    }
    out
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(width - 1).collect();
        short.push('…');
        short
    }
}

/// `list`
pub fn list_products<S: RemoteStore>(desk: &Desk<S>, style: &ReceiptStyle) -> String {
    render_inventory(&desk.products(), style)
}

/// `reload`
pub async fn reload_inventory<S: RemoteStore>(desk: &Desk<S>) -> Result<String, ApiError> {
    let summary = desk.reload().await?;
    let mut reply = format!("Loaded {} products", summary.loaded);
    if summary.skipped > 0 {
        let _ = write!(reply, " ({} unreadable rows skipped)", summary.skipped);
    }
    Ok(reply)
}

/// `add <name…> <price> <discount> <stock>`
pub async fn add_product<S: RemoteStore>(
    desk: &Desk<S>,
    draft: ProductDraft,
) -> Result<String, ApiError> {
    desk.create_product(draft).await?;
    Ok("Product added successfully!".to_string())
}

/// `remove <id>`
pub async fn remove_product<S: RemoteStore>(
    desk: &Desk<S>,
    id: &str,
) -> Result<String, ApiError> {
    let id = parse_product_id(id)?;
    desk.delete_product(id).await?;
    Ok("Product removed successfully!".to_string())
}
