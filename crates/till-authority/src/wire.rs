//! # Wire Payloads
//!
//! Response shapes as the authority actually sends them. They are looser
//! than the domain types so a missing field becomes a clear
//! `MalformedResponse` instead of an opaque decode error.

use serde::Deserialize;

use crate::error::AuthorityError;
use till_core::{CartLine, Money, Transaction, TransactionId, TransactionStatus};

/// A transaction as returned by `POST /transactions` and `GET /transactions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub id: Option<TransactionId>,
    pub receipt_number: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub products: Vec<CartLine>,
    pub total: Option<Money>,
    #[serde(default)]
    pub status: TransactionStatus,
}

impl TryFrom<TransactionPayload> for Transaction {
    type Error = AuthorityError;

    fn try_from(payload: TransactionPayload) -> Result<Self, Self::Error> {
        let id = payload
            .id
            .ok_or_else(|| AuthorityError::MalformedResponse("transaction has no id".to_string()))?;

        let receipt_number = payload
            .receipt_number
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| {
                AuthorityError::MalformedResponse(format!("transaction {} has no receiptNumber", id))
            })?;

        let mut transaction = Transaction {
            id,
            receipt_number,
            date: payload.date,
            customer_name: payload.customer_name,
            products: payload.products,
            total: Money::zero(),
            status: payload.status,
        };
        transaction.total = payload.total.unwrap_or_else(|| transaction.lines_total());

        Ok(transaction)
    }
}

/// Body of an error response: `{"error": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

/// Body of a delete response: `{"message": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageBody {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Transaction, AuthorityError> {
        let payload: TransactionPayload = serde_json::from_str(json).unwrap();
        Transaction::try_from(payload)
    }

    #[test]
    fn test_complete_payload() {
        let tx = parse(
            r#"{"id": 99, "receiptNumber": "T-00099", "date": "2024-05-01T00:00:00",
                "customerName": "Dana", "products": [], "total": 7.0, "status": "Completed"}"#,
        )
        .unwrap();

        assert_eq!(tx.id, 99);
        assert_eq!(tx.receipt_number, "T-00099");
        assert_eq!(tx.total, Money::from_cents(700));
        assert_eq!(tx.status, TransactionStatus::Completed);
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let err = parse(r#"{"receiptNumber": "T-00099", "total": 7.0}"#).unwrap_err();
        assert!(matches!(err, AuthorityError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_receipt_number_is_malformed() {
        let err = parse(r#"{"id": 99, "total": 7.0}"#).unwrap_err();
        assert!(matches!(err, AuthorityError::MalformedResponse(_)));

        let err = parse(r#"{"id": 99, "receiptNumber": "", "total": 7.0}"#).unwrap_err();
        assert!(matches!(err, AuthorityError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_total_is_recomputed() {
        let tx = parse(
            r#"{"id": 3, "receiptNumber": "T-00003",
                "products": [{"product": {"id": 7, "name": "Tea", "price": 3.5, "stock": 8}, "quantity": 2}]}"#,
        )
        .unwrap();

        assert_eq!(tx.total, Money::from_cents(700));
        assert_eq!(tx.status, TransactionStatus::Completed);
    }

    #[test]
    fn test_error_body_prefers_error_field() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "Invalid input", "message": "x"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid input"));
    }
}
