//! # Receipt Commands
//!
//! Text receipts in the active locale with the configured business header
//! and currency symbol.

use till_core::receipt::{self, Receipt};
use till_core::TransactionId;

use crate::commands::{checkout, transaction};
use crate::error::RegisterResult;
use crate::session::Session;

/// Renders any receipt with the session's style.
pub fn render(session: &Session, receipt: &Receipt) -> String {
    let style = session.config().receipt_style(session.locale().get());
    receipt::render(receipt, &style)
}

/// Live receipt for the current cart.
pub fn render_preview(session: &Session) -> String {
    render(session, &checkout::preview(session))
}

/// Receipt for a transaction in the history.
pub fn render_transaction(session: &Session, id: TransactionId) -> RegisterResult<String> {
    let transaction = transaction::get_transaction(session, id)?;
    Ok(render(session, &receipt::from_transaction(&transaction)))
}
