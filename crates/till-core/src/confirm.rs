//! # Two-Phase Confirmation
//!
//! Destructive actions are not performed when requested. The register hands
//! out a ticket and waits for the front end to come back with consent.
//!
//! ```text
//! ┌──────────────────┐  request(intent)   ┌──────────────────┐
//! │  Front end       │ ─────────────────► │ ConfirmationBook │
//! │                  │ ◄───────────────── │  pending: 1 slot │
//! │  shows prompt    │  {ticket, prompt}  │                  │
//! │                  │                    │                  │
//! │  yes / no        │  resolve(ticket)   │                  │
//! │                  │ ─────────────────► │  Grant → intent  │
//! └──────────────────┘                    │  Deny  → nothing │
//!                                         └──────────────────┘
//! ```
//!
//! Only the most recent request is pending. Asking again supersedes it, and
//! a ticket can be resolved once.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::locale::Label;
use crate::types::{ProductId, TransactionId};

/// Opaque handle for one pending confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct Ticket(pub u64);

/// What will happen once consent is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum Intent {
    ClearCart,
    DeleteTransaction(TransactionId),
    DeleteProduct(ProductId),
}

impl Intent {
    /// Prompt shown to the cashier.
    pub fn prompt(&self) -> Label {
        match self {
            Intent::ClearCart => Label::ConfirmClearCart,
            Intent::DeleteTransaction(_) => Label::ConfirmDeleteTransaction,
            Intent::DeleteProduct(_) => Label::ConfirmDeleteProduct,
        }
    }
}

/// Handed to the front end; echo the ticket back with the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConfirmationRequest {
    pub ticket: Ticket,
    pub intent: Intent,
    pub prompt: Label,
}

/// The cashier's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Consent {
    Grant,
    Deny,
}

/// Issues tickets and checks them on the way back.
#[derive(Debug, Default)]
pub struct ConfirmationBook {
    next: u64,
    pending: Option<ConfirmationRequest>,
}

impl ConfirmationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a request, superseding any earlier one.
    pub fn request(&mut self, intent: Intent) -> ConfirmationRequest {
        self.next += 1;
        let request = ConfirmationRequest {
            ticket: Ticket(self.next),
            intent,
            prompt: intent.prompt(),
        };
        self.pending = Some(request);
        request
    }

    /// Closes the pending request.
    ///
    /// ## Returns
    /// - `Ok(Some(intent))` on `Grant`: the caller performs the intent
    /// - `Ok(None)` on `Deny`: nothing happens
    /// - `Err(UnknownTicket)` if the ticket is not the pending one; the
    ///   pending request (if any) stays open
    pub fn resolve(&mut self, ticket: Ticket, consent: Consent) -> CoreResult<Option<Intent>> {
        match self.pending {
            Some(request) if request.ticket == ticket => {
                self.pending = None;
                Ok(match consent {
                    Consent::Grant => Some(request.intent),
                    Consent::Deny => None,
                })
            }
            _ => Err(CoreError::UnknownTicket(ticket.0)),
        }
    }

    pub fn pending(&self) -> Option<&ConfirmationRequest> {
        self.pending.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_returns_intent_once() {
        let mut book = ConfirmationBook::new();
        let request = book.request(Intent::DeleteTransaction(7));
        assert_eq!(request.prompt, Label::ConfirmDeleteTransaction);

        let granted = book.resolve(request.ticket, Consent::Grant).unwrap();
        assert_eq!(granted, Some(Intent::DeleteTransaction(7)));

        let again = book.resolve(request.ticket, Consent::Grant);
        assert_eq!(again, Err(CoreError::UnknownTicket(request.ticket.0)));
    }

    #[test]
    fn test_deny_does_nothing() {
        let mut book = ConfirmationBook::new();
        let request = book.request(Intent::ClearCart);

        assert_eq!(book.resolve(request.ticket, Consent::Deny).unwrap(), None);
        assert!(book.pending().is_none());
    }

    #[test]
    fn test_superseded_ticket_is_stale() {
        let mut book = ConfirmationBook::new();
        let first = book.request(Intent::ClearCart);
        let second = book.request(Intent::DeleteProduct(3));

        assert!(book.resolve(first.ticket, Consent::Grant).is_err());
        // The newer request is still open
        assert_eq!(book.pending().map(|r| r.ticket), Some(second.ticket));
        assert_eq!(
            book.resolve(second.ticket, Consent::Grant).unwrap(),
            Some(Intent::DeleteProduct(3))
        );
    }

    #[test]
    fn test_unknown_ticket() {
        let mut book = ConfirmationBook::new();
        assert!(book.resolve(Ticket(42), Consent::Deny).is_err());
    }

    #[test]
    fn test_intent_wire_shape() {
        let json = serde_json::to_value(Intent::DeleteProduct(3)).unwrap();
        assert_eq!(json["kind"], "deleteProduct");
        assert_eq!(json["id"], 3);
    }
}
