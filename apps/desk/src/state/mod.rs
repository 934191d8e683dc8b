//! # State Module
//!
//! Application state owned by the desk.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  InventoryState  │  │   InvoiceSlot    │  │     DeskConfig       │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  Arc<Mutex<      │  │  Arc<Mutex<      │  │  store endpoint      │  │
//! │  │    Inventory     │  │    Option<       │  │  currency symbol     │  │
//! │  │  >>              │  │      Invoice>>>  │  │  printer             │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • InventoryState, InvoiceSlot: short closures, never across .await    │
//! │  • DeskConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod inventory;
mod invoice;

pub use config::{DeskConfig, DisplayConfig, PrinterConfig, PrinterKind};
pub use inventory::{Inventory, InventoryState};
pub use invoice::InvoiceSlot;
