//! # Invoice Slot
//!
//! Holds the most recent invoice. Each successful sale overwrites it; a
//! rejected sale leaves it alone.

use std::sync::{Arc, Mutex};

use pharmacy_core::Invoice;

/// Shared last-invoice slot.
#[derive(Debug, Clone, Default)]
pub struct InvoiceSlot {
    last: Arc<Mutex<Option<Invoice>>>,
}

impl InvoiceSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `invoice`, replacing whatever was there.
    pub fn set(&self, invoice: Invoice) {
        let mut last = self.last.lock().expect("Invoice mutex poisoned");
        *last = Some(invoice);
    }

    /// A copy of the last invoice, if any sale has happened.
    pub fn get(&self) -> Option<Invoice> {
        self.last.lock().expect("Invoice mutex poisoned").clone()
    }
}
