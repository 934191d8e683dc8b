//! # Commands Module
//!
//! One function per console command. Each returns the text to show the
//! operator, or an [`ApiError`](crate::error::ApiError) that the console
//! prints as a notification.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here
//! ├── product.rs   ◄─── list, reload, add, remove
//! └── sale.rs      ◄─── sell, invoice, print
//! ```

pub mod product;
pub mod sale;
