//! # Checkout Commands
//!
//! The checkout form (customer, date, status), the live preview and the
//! commit itself.
//!
//! ## Commit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  commit(&session)                                                       │
//! │     │                                                                   │
//! │     ├── cart empty? ─────────────────────────────► CART_EMPTY           │
//! │     ├── claim commit slot ───────────────────────► COMMIT_IN_FLIGHT     │
//! │     ├── draft = cart lines + form                                       │
//! │     ├── POST /transactions ── error ─────────────► surfaced, no change  │
//! │     │        │                                                          │
//! │     │        ▼ canonical Transaction                                    │
//! │     ├── history.prepend  ── cart.clear ── counter past tx.id            │
//! │     ├── release commit slot                                             │
//! │     ├── save history blob      (failure: warn only)                     │
//! │     └── GET /stock + reconcile (failure: warn only)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The authority adjusts stock itself when it records the transaction, so the
//! register never sends per-line stock updates.

use serde::Serialize;
use tracing::{debug, info, warn};

use till_core::receipt::{self, Receipt};
use till_core::validation::{normalize_customer_name, validate_date};
use till_core::{ReceiptMeta, Transaction, TransactionStatus};

use crate::commands::product::refresh_catalog;
use crate::error::RegisterResult;
use crate::events::StateChange;
use crate::session::Session;

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitOutcome {
    /// Exactly what the authority returned
    pub transaction: Transaction,
    pub receipt: Receipt,
    /// Whether the post-commit catalog reload succeeded
    pub catalog_refreshed: bool,
}

// =============================================================================
// Checkout Form
// =============================================================================

pub fn get_meta(session: &Session) -> ReceiptMeta {
    session.checkout().get()
}

/// Sets the customer name; blank means the walk-in default.
pub fn set_customer_name(session: &Session, name: &str) -> RegisterResult<ReceiptMeta> {
    let name = normalize_customer_name(name)?;
    debug!(customer = %name, "set_customer_name command");

    let meta = session.checkout().update(|m| m.customer_name = name);
    session.notify(StateChange::MetaChanged);
    Ok(meta)
}

/// Sets the transaction date from `YYYY-MM-DD`.
pub fn set_date(session: &Session, date: &str) -> RegisterResult<ReceiptMeta> {
    let date = validate_date(date)?;
    debug!(%date, "set_date command");

    let meta = session.checkout().update(|m| m.date = date);
    session.notify(StateChange::MetaChanged);
    Ok(meta)
}

pub fn set_status(session: &Session, status: TransactionStatus) -> ReceiptMeta {
    debug!(%status, "set_status command");

    let meta = session.checkout().update(|m| m.status = status);
    session.notify(StateChange::MetaChanged);
    meta
}

// =============================================================================
// Preview & Commit
// =============================================================================

/// Receipt for the cart as it stands, with a placeholder number.
///
/// Pure: the cart and the receipt counter are left as they are.
pub fn preview(session: &Session) -> Receipt {
    let meta = session.checkout().get();
    let counter = session.receipt_counter();

    session
        .cart()
        .with_cart(|c| receipt::preview(c, &meta, counter))
}

/// Sends the cart to the authority as a transaction.
///
/// ## Errors
/// - `CART_EMPTY` if there is nothing to sell
/// - `COMMIT_IN_FLIGHT` if another commit has not returned yet
/// - `AUTHORITY_REQUEST_FAILED` / `MALFORMED_RESPONSE` from the authority;
///   cart and history are left exactly as they were
pub async fn commit(session: &Session) -> RegisterResult<CommitOutcome> {
    debug!("commit command");

    let meta = session.checkout().get();
    // CartEmpty is checked before the slot so an empty cart never blocks
    let draft = session.cart().with_cart(|c| receipt::draft(c, &meta))?;

    let guard = session.begin_commit()?;

    let transaction = session.authority().commit_transaction(&draft).await?;

    info!(
        transaction_id = transaction.id,
        receipt_number = %transaction.receipt_number,
        total = %transaction.total,
        "Transaction committed"
    );

    session
        .history()
        .with_history_mut(|h| h.prepend(transaction.clone()));
    session.cart().with_cart_mut(|c| c.clear());
    session.advance_counter_past(transaction.id);

    session.notify(StateChange::HistoryChanged);
    session.notify(StateChange::CartChanged);
    drop(guard);

    session.persist_history().await;

    let catalog_refreshed = match refresh_catalog(session).await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Catalog refresh after commit failed");
            false
        }
    };

    let receipt = receipt::from_transaction(&transaction);
    if receipt.total != transaction.total {
        warn!(
            reported = %transaction.total,
            lines = %receipt.total,
            "Authority total differs from the sum of its lines"
        );
    }

    Ok(CommitOutcome {
        transaction,
        receipt,
        catalog_refreshed,
    })
}
