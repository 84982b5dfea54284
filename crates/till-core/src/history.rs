//! # Transaction History
//!
//! Most-recent-first list of committed transactions, capped at
//! [`HISTORY_LIMIT`](crate::HISTORY_LIMIT) entries.
//!
//! Serializes as a bare JSON array so it can be stored as-is under the
//! `transactions` key.

use serde::{Deserialize, Serialize};

use crate::types::{Transaction, TransactionId};
use crate::HISTORY_LIMIT;

/// Local view of the authority's transaction list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionHistory {
    entries: Vec<Transaction>,
}

impl TransactionHistory {
    pub fn new() -> Self {
        TransactionHistory {
            entries: Vec::new(),
        }
    }

    /// Builds a history from an already-ordered list (newest first).
    ///
    /// Anything past the cap is dropped.
    pub fn from_entries(mut entries: Vec<Transaction>) -> Self {
        entries.truncate(HISTORY_LIMIT);
        TransactionHistory { entries }
    }

    /// Puts a freshly committed transaction at the front.
    ///
    /// A stale entry with the same id is replaced rather than duplicated.
    pub fn prepend(&mut self, transaction: Transaction) {
        self.entries.retain(|t| t.id != transaction.id);
        self.entries.insert(0, transaction);
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// Removes a transaction by id.
    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.entries.iter().position(|t| t.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Replaces everything with the authority's list.
    pub fn replace_all(&mut self, entries: Vec<Transaction>) {
        *self = TransactionHistory::from_entries(entries);
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.entries.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TransactionId) -> bool {
        self.get(id).is_some()
    }

    /// Newest first.
    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&Transaction> {
        self.entries.first()
    }

    /// Highest transaction id on record; feeds the receipt counter.
    pub fn max_id(&self) -> Option<TransactionId> {
        self.entries.iter().map(|t| t.id).max()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::TransactionStatus;

    fn tx(id: TransactionId) -> Transaction {
        Transaction {
            id,
            receipt_number: format!("T-{:05}", id),
            date: "2024-05-01".to_string(),
            customer_name: "Customer".to_string(),
            products: Vec::new(),
            total: Money::zero(),
            status: TransactionStatus::Completed,
        }
    }

    #[test]
    fn test_prepend_is_newest_first() {
        let mut history = TransactionHistory::new();
        history.prepend(tx(1));
        history.prepend(tx(2));

        assert_eq!(history.latest().unwrap().id, 2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.max_id(), Some(2));
    }

    #[test]
    fn test_never_exceeds_limit() {
        let mut history = TransactionHistory::new();
        for id in 1..=(HISTORY_LIMIT as i64 + 25) {
            history.prepend(tx(id));
            assert!(history.len() <= HISTORY_LIMIT);
        }

        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.latest().unwrap().id, HISTORY_LIMIT as i64 + 25);
        // Oldest entries fell off the end
        assert!(!history.contains(1));
    }

    #[test]
    fn test_from_entries_truncates() {
        let entries: Vec<_> = (1..=80).rev().map(tx).collect();
        let history = TransactionHistory::from_entries(entries);

        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.latest().unwrap().id, 80);
    }

    #[test]
    fn test_prepend_replaces_same_id() {
        let mut history = TransactionHistory::from_entries(vec![tx(5), tx(4)]);
        let mut updated = tx(4);
        updated.customer_name = "Dana".to_string();

        history.prepend(updated);

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().customer_name, "Dana");
    }

    #[test]
    fn test_remove() {
        let mut history = TransactionHistory::from_entries(vec![tx(3), tx(2), tx(1)]);

        assert_eq!(history.remove(2).map(|t| t.id), Some(2));
        assert!(history.remove(2).is_none());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_serializes_as_array() {
        let history = TransactionHistory::from_entries(vec![tx(1)]);
        let json = serde_json::to_value(&history).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["receiptNumber"], "T-00001");

        let back: TransactionHistory = serde_json::from_value(json).unwrap();
        assert_eq!(back, history);
    }
}
