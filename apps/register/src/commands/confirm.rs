//! # Confirmation Commands
//!
//! Clearing the cart and deleting products or transactions are two-phase:
//!
//! ```text
//! request_confirmation(intent) ──► ConfirmationRequest { ticket, prompt }
//!                                         │
//!                         front end asks the cashier
//!                                         │
//! resolve_confirmation(ticket, Grant) ──► action performed ──► Resolution
//! resolve_confirmation(ticket, Deny)  ──► Resolution::Denied
//! ```
//!
//! Preconditions are checked at request time so the cashier is never asked
//! about something that cannot happen. The action itself runs only on
//! `Grant`, and local state changes only after the authority confirms.

use serde::Serialize;
use tracing::{debug, info};

use till_core::{
    ConfirmationRequest, Consent, CoreError, Intent, ProductId, Ticket, TransactionId,
};

use crate::error::{RegisterError, RegisterResult};
use crate::events::StateChange;
use crate::session::Session;

/// What resolving a ticket did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Resolution {
    Denied,
    CartCleared,
    TransactionDeleted { id: TransactionId, message: String },
    ProductDeleted { id: ProductId, message: String },
}

/// Opens a confirmation for a destructive action.
///
/// ## Errors
/// - `CART_EMPTY` for `ClearCart` on an empty cart
/// - `COMMIT_IN_FLIGHT` for `ClearCart` or `DeleteProduct` during a commit
/// - `NOT_FOUND` if the transaction or product is not known locally
pub fn request_confirmation(
    session: &Session,
    intent: Intent,
) -> RegisterResult<ConfirmationRequest> {
    debug!(?intent, "request_confirmation command");

    match intent {
        Intent::ClearCart => {
            session.ensure_cart_editable()?;
            if session.cart().with_cart(|c| c.is_empty()) {
                return Err(CoreError::CartEmpty.into());
            }
        }
        Intent::DeleteTransaction(id) => {
            if !session.history().with_history(|h| h.contains(id)) {
                return Err(RegisterError::not_found("Transaction", id));
            }
        }
        Intent::DeleteProduct(id) => {
            session.ensure_cart_editable()?;
            if session.catalog().get(id).is_none() {
                return Err(RegisterError::not_found("Product", id));
            }
        }
    }

    Ok(session.confirmations().request(intent))
}

/// The request still waiting for an answer, if any.
pub fn pending_confirmation(session: &Session) -> Option<ConfirmationRequest> {
    session.confirmations().pending().copied()
}

/// Answers a pending confirmation.
///
/// ## Errors
/// - `CONFIRMATION_MISMATCH` if `ticket` is stale or unknown (nothing happens,
///   and the pending request stays open)
/// - `COMMIT_IN_FLIGHT` when granting a cart-touching intent during a commit;
///   the request stays open so it can be granted afterwards
/// - Whatever the granted action fails with; state is then unchanged
pub async fn resolve_confirmation(
    session: &Session,
    ticket: Ticket,
    consent: Consent,
) -> RegisterResult<Resolution> {
    debug!(ticket = ticket.0, ?consent, "resolve_confirmation command");

    let granted = {
        let mut book = session.confirmations();
        let touches_cart = book.pending().is_some_and(|r| {
            r.ticket == ticket && matches!(r.intent, Intent::ClearCart | Intent::DeleteProduct(_))
        });
        if consent == Consent::Grant && touches_cart {
            session.ensure_cart_editable()?;
        }
        book.resolve(ticket, consent)?
    };

    let Some(intent) = granted else {
        return Ok(Resolution::Denied);
    };

    match intent {
        Intent::ClearCart => clear_cart(session),
        Intent::DeleteTransaction(id) => delete_transaction(session, id).await,
        Intent::DeleteProduct(id) => delete_product(session, id).await,
    }
}

fn clear_cart(session: &Session) -> RegisterResult<Resolution> {
    session.ensure_cart_editable()?;

    session.cart().with_cart_mut(|c| c.clear());
    session.notify(StateChange::CartChanged);

    Ok(Resolution::CartCleared)
}

async fn delete_transaction(session: &Session, id: TransactionId) -> RegisterResult<Resolution> {
    let message = session.authority().delete_transaction(id).await?;
    info!(transaction_id = id, "Transaction deleted");

    session.history().with_history_mut(|h| h.remove(id));
    session.notify(StateChange::HistoryChanged);
    session.persist_history().await;

    Ok(Resolution::TransactionDeleted { id, message })
}

async fn delete_product(session: &Session, id: ProductId) -> RegisterResult<Resolution> {
    let message = session.authority().delete_product(id).await?;
    info!(product_id = id, "Product deleted");

    session.catalog().remove(id);
    session.notify(StateChange::CatalogChanged);
    session.drop_from_cart(id);

    Ok(Resolution::ProductDeleted { id, message })
}
