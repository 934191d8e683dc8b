//! # pharmacy-store: Remote Store Client
//!
//! All product data lives in a hosted spreadsheet exposed as a small REST
//! API. This crate is the only place that talks to it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pharmacy Data Flow                               │
//! │                                                                         │
//! │  Desk (reload / create / delete)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 pharmacy-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌────────────────┐   │   │
//! │  │   │  RemoteStore  │   │  SheetStore   │   │     wire       │   │   │
//! │  │   │  (trait)      │◄──│  (reqwest)    │──►│ RawProductRow  │   │   │
//! │  │   │               │   │               │   │ coercion       │   │   │
//! │  │   └───────────────┘   └───────────────┘   └────────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Spreadsheet API                                                │   │
//! │  │    GET    <endpoint>           → { data: [...] } | [...]        │   │
//! │  │    POST   <endpoint>           ← { data: {...} }                │   │
//! │  │    DELETE <endpoint>/id/<id>                                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - `SheetStore`, the HTTP implementation
//! - [`config`] - Endpoint and timeout settings
//! - [`error`] - Store error types
//! - [`repository`] - The `RemoteStore` trait
//! - [`wire`] - Row shapes on the wire and their coercion into `Product`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pharmacy_store::{RemoteStore, SheetStore, StoreConfig};
//!
//! let store = SheetStore::new(&StoreConfig::default())?;
//! let rows = store.list_rows().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod repository;
pub mod wire;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::SheetStore;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use repository::RemoteStore;
pub use wire::{CoercionError, ListResponse, ProductRecord, RawProductRow};
