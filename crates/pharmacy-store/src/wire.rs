//! # Wire Format
//!
//! Row shapes exchanged with the spreadsheet API.
//!
//! The sheet has no schema: any cell may come back as a JSON string or a
//! JSON number, and a hand-edited sheet can hold anything at all. Rows are
//! read as [`RawProductRow`] and only become a [`Product`] through
//! [`RawProductRow::into_product`].
//!
//! ## Shapes
//! ```text
//! GET  response   { "data": [ row, ... ] }      or      [ row, ... ]
//!
//! row (read)      { "id": "1712345678901", "name": "Paracetamol",
//!                   "price": "12.5", "discount": 0, "stock": "100" }
//!
//! POST body       { "data": { "id": 1712345678901, "name": "Paracetamol",
//!                             "price": "12.50", "discount": "0.00",
//!                             "stock": 100 } }
//! ```
//!
//! Prices and discounts are written as two-decimal strings so the sheet
//! stores exactly what was typed.

use pharmacy_core::validation::{
    parse_discount, parse_price, validate_product_name, validate_stock,
};
use pharmacy_core::money::parse_decimal;
use pharmacy_core::Product;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// =============================================================================
// Inbound Rows
// =============================================================================

/// One row as the sheet returns it. Unknown columns are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProductRow {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub discount: Value,
    #[serde(default)]
    pub stock: Value,
}

/// Why a row could not become a product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// Cell is absent, null, or blank.
    #[error("missing {field}")]
    Missing { field: &'static str },

    /// Cell holds a value that does not fit the column.
    #[error("invalid {field} '{value}': {reason}")]
    Invalid {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl CoercionError {
    /// Column the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            CoercionError::Missing { field } | CoercionError::Invalid { field, .. } => field,
        }
    }
}

/// Text form of a scalar cell; `None` for null, blank, arrays and objects.
fn cell_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn required(value: &Value, field: &'static str) -> Result<String, CoercionError> {
    cell_text(value).ok_or(CoercionError::Missing { field })
}

fn invalid(field: &'static str, value: &str, reason: impl ToString) -> CoercionError {
    CoercionError::Invalid {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Whole number from an integer cell.
///
/// Floats are accepted only when they carry no fraction ("100.0"), which
/// is how some sheets echo integers back.
fn integer_cell(value: &Value, field: &'static str) -> Result<i64, CoercionError> {
    let text = required(value, field)?;

    parse_decimal(&text)
        .filter(|d| d.is_integer())
        .and_then(|d| d.to_i64())
        .ok_or_else(|| invalid(field, &text, "not a whole number"))
}

impl RawProductRow {
    /// Coerces the row into a typed product.
    ///
    /// ## Rules
    /// - `id`, `stock`: whole numbers; `stock >= 0`
    /// - `price`: decimal, `>= 0`, stored to the paisa
    /// - `discount`: decimal percentage in `[0, 100]`
    /// - `name`: non-empty
    pub fn into_product(self) -> Result<Product, CoercionError> {
        let id = integer_cell(&self.id, "id")?;

        let name = required(&self.name, "name")?;
        validate_product_name(&name).map_err(|e| invalid("name", &name, e))?;

        let price_text = required(&self.price, "price")?;
        let price = parse_price(&price_text).map_err(|e| invalid("price", &price_text, e))?;

        let discount_text = required(&self.discount, "discount")?;
        let discount = parse_discount(&discount_text)
            .map_err(|e| invalid("discount", &discount_text, e))?;

        let stock = integer_cell(&self.stock, "stock")?;
        validate_stock(stock).map_err(|e| invalid("stock", &stock.to_string(), e))?;

        Ok(Product {
            id,
            name,
            price,
            discount,
            stock,
        })
    }

    /// Best-effort label for log lines about this row.
    pub fn label(&self) -> String {
        match (cell_text(&self.id), cell_text(&self.name)) {
            (Some(id), Some(name)) => format!("{} ({})", id, name),
            (Some(id), None) => id,
            (None, Some(name)) => name,
            (None, None) => "<unlabelled row>".to_string(),
        }
    }
}

/// The row a product becomes once written to the sheet.
impl From<&Product> for RawProductRow {
    fn from(product: &Product) -> Self {
        let record = ProductRecord::from(product);
        RawProductRow {
            id: Value::from(record.id),
            name: Value::from(record.name),
            price: Value::from(record.price),
            discount: Value::from(record.discount),
            stock: Value::from(record.stock),
        }
    }
}

/// Body of a list response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    /// `{ "data": [...] }`
    Wrapped { data: Vec<RawProductRow> },

    /// `[...]`
    Bare(Vec<RawProductRow>),
}

impl ListResponse {
    /// The rows, whichever shape carried them.
    pub fn into_rows(self) -> Vec<RawProductRow> {
        match self {
            ListResponse::Wrapped { data } => data,
            ListResponse::Bare(rows) => rows,
        }
    }
}

// =============================================================================
// Outbound Records
// =============================================================================

/// A product as written to the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub discount: String,
    pub stock: i64,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        ProductRecord {
            id: product.id,
            name: product.name.clone(),
            price: product.price.to_string(),
            discount: product.discount.to_decimal_string(),
            stock: product.stock,
        }
    }
}

/// `{ "data": record }`, the create request body.
#[derive(Debug, Serialize)]
pub struct CreateRequest<'a> {
    pub data: &'a ProductRecord,
}

// =============================================================================
// Unit Tests
// =============================================================================
