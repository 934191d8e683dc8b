//! # Sale Commands
//!
//! Selling, showing the last invoice, and printing it.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sale Lifecycle                                     │
//! │                                                                         │
//! │  sell <id> <qty>                                                        │
//! │       │                                                                 │
//! │       ├── qty > stock ──► "! Not enough stock ..." (nothing changes)    │
//! │       ▼                                                                 │
//! │  stock decremented, invoice stored, receipt shown                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  invoice ──► receipt shown again                                        │
//! │  print   ──► receipt sent to the configured printer                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use pharmacy_core::invoice::{render_receipt, ReceiptStyle};
use pharmacy_core::validation::{parse_product_id, parse_quantity};
use pharmacy_store::RemoteStore;

use crate::desk::Desk;
use crate::error::ApiError;
use crate::printer::ReceiptPrinter;

/// `sell <id> <qty>`: returns the receipt text.
pub fn sell<S: RemoteStore>(
    desk: &Desk<S>,
    id: &str,
    quantity: &str,
    style: &ReceiptStyle,
) -> Result<String, ApiError> {
    let id = parse_product_id(id)?;
    let quantity = parse_quantity(quantity)?;
    let invoice = desk.sell(id, quantity)?;
    Ok(render_receipt(&invoice, style))
}

/// `invoice`
pub fn show_invoice<S: RemoteStore>(
    desk: &Desk<S>,
    style: &ReceiptStyle,
) -> Result<String, ApiError> {
    let invoice = desk.last_invoice().ok_or_else(ApiError::no_invoice)?;
    Ok(render_receipt(&invoice, style))
}

/// `print`
pub async fn print_invoice<S: RemoteStore, W: Write>(
    desk: &Desk<S>,
    style: &ReceiptStyle,
    printer: &ReceiptPrinter,
    out: &mut W,
) -> Result<String, ApiError> {
    let invoice = desk.last_invoice().ok_or_else(ApiError::no_invoice)?;
    let receipt = render_receipt(&invoice, style);
    printer.print(&receipt, out).await?;
    Ok(format!("Invoice sent to {}", printer.describe()))
}
