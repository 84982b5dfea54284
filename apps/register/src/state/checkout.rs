//! # Checkout State
//!
//! The customer name, date and status typed next to the cart. Kept apart
//! from the cart so editing them never touches the ledger.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;
use till_core::ReceiptMeta;

/// Thread-safe checkout metadata.
#[derive(Debug, Clone)]
pub struct CheckoutState {
    meta: Arc<Mutex<ReceiptMeta>>,
}

impl CheckoutState {
    /// Fresh form for the given day.
    pub fn new(today: NaiveDate) -> Self {
        CheckoutState {
            meta: Arc::new(Mutex::new(ReceiptMeta::for_date(today))),
        }
    }

    pub fn get(&self) -> ReceiptMeta {
        self.meta
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update<F>(&self, f: F) -> ReceiptMeta
    where
        F: FnOnce(&mut ReceiptMeta),
    {
        let mut meta = self.meta.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut meta);
        meta.clone()
    }
}
