//! # History Store
//!
//! Persists the transaction history as one JSON array under the
//! `transactions` key.
//!
//! ```text
//! Startup ──► load() ──► TransactionHistory (empty if never saved)
//! Commit / delete / authority refresh ──► save(&history)
//! ```
//!
//! The stored copy is a cache. The inventory authority's list wins whenever
//! it can be fetched.

use tracing::{debug, info};

use crate::error::DbResult;
use crate::repository::kv::KvRepository;
use till_core::TransactionHistory;

/// Key the history blob is stored under.
pub const HISTORY_KEY: &str = "transactions";

/// Loads and saves the local transaction history.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    kv: KvRepository,
}

impl HistoryStore {
    pub fn new(kv: KvRepository) -> Self {
        HistoryStore { kv }
    }

    /// Reads the stored history.
    ///
    /// A missing row is an empty history; an unreadable one is an error.
    pub async fn load(&self) -> DbResult<TransactionHistory> {
        let history = self
            .kv
            .get_json::<TransactionHistory>(HISTORY_KEY)
            .await?
            .unwrap_or_default();

        info!(entries = history.len(), "Loaded local transaction history");
        Ok(history)
    }

    /// Overwrites the stored history.
    pub async fn save(&self, history: &TransactionHistory) -> DbResult<()> {
        self.kv.put_json(HISTORY_KEY, history).await?;
        debug!(entries = history.len(), "Saved local transaction history");
        Ok(())
    }

    /// Removes the stored history.
    pub async fn clear(&self) -> DbResult<()> {
        self.kv.delete(HISTORY_KEY).await?;
        Ok(())
    }
}
