//! # History State
//!
//! The session's copy of [`TransactionHistory`].

use std::sync::{Arc, Mutex, PoisonError};

use till_core::TransactionHistory;

/// Thread-safe transaction history.
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    history: Arc<Mutex<TransactionHistory>>,
}

impl HistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TransactionHistory) -> R,
    {
        let history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        f(&history)
    }

    pub fn with_history_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TransactionHistory) -> R,
    {
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut history)
    }

    pub fn snapshot(&self) -> TransactionHistory {
        self.with_history(|h| h.clone())
    }
}
