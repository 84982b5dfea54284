//! # Transaction Commands
//!
//! Read access to the local history. Deleting goes through
//! [`confirm`](super::confirm).

use tracing::debug;

use till_core::{Transaction, TransactionId};

use crate::error::{RegisterError, RegisterResult};
use crate::session::Session;

/// Local history, newest first.
pub fn list_transactions(session: &Session) -> Vec<Transaction> {
    session.history().with_history(|h| h.entries().to_vec())
}

pub fn get_transaction(session: &Session, id: TransactionId) -> RegisterResult<Transaction> {
    debug!(transaction_id = id, "get_transaction command");

    session
        .history()
        .with_history(|h| h.get(id).cloned())
        .ok_or_else(|| RegisterError::not_found("Transaction", id))
}
