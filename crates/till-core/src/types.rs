//! # Domain Types
//!
//! Core domain types used throughout Till POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │  Transaction    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  product (snap) │◄──│  products       │       │
//! │  │  name           │   │  quantity ≥ 1   │   │  id, receipt #  │       │
//! │  │  price          │   └─────────────────┘   │  total, status  │       │
//! │  │  stock          │                         └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌───────────────────┐                           │
//! │  │ DraftTransaction│   │ TransactionStatus │                           │
//! │  │  no id, no #    │   │  Pending          │                           │
//! │  │  (sent on POST) │   │  Completed        │                           │
//! │  └─────────────────┘   │  Cancelled        │                           │
//! │                        └───────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Canonical Identity
//! Products and transactions are identified by integers assigned by the
//! inventory authority. Nothing in this crate ever invents one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::locale::Label;
use crate::money::Money;

/// Authority-assigned product identifier.
pub type ProductId = i64;

/// Authority-assigned transaction identifier.
pub type TransactionId = i64;

// =============================================================================
// Product
// =============================================================================

/// A product as reported by the inventory authority.
///
/// The register only ever holds read-only copies; the authority owns the
/// record and its stock level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier, stable across fetches.
    pub id: ProductId,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Unit price.
    #[ts(type = "number")]
    pub price: Money,

    /// Units on hand; upper bound on the orderable quantity.
    pub stock: u32,
}

impl Product {
    /// Checks if at least one unit can be sold.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Body of `POST /stock`: a product before the authority has assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    #[ts(type = "number")]
    pub price: Money,
    pub stock: u32,
}

/// Body of `POST /stock/update`.
///
/// The authority subtracts `quantity` from the product's stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockUpdate {
    pub product_id: ProductId,
    pub quantity: u32,
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart.
///
/// Holds a frozen snapshot of the product taken when it was added (refreshed
/// by [`crate::cart::CartLedger::reconcile`] after a catalog reload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price × quantity, unrounded.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Transaction Status
// =============================================================================

/// Status chosen by the cashier at commit time.
///
/// Set once and never transitioned by the register afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[serde(alias = "Pending")]
    Pending,
    #[default]
    #[serde(alias = "Completed")]
    Completed,
    #[serde(alias = "Cancelled")]
    Cancelled,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 3] = [
        TransactionStatus::Pending,
        TransactionStatus::Completed,
        TransactionStatus::Cancelled,
    ];

    /// Wire name (`"pending"`, `"completed"`, `"cancelled"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }

    /// UI label key for the status.
    pub fn label(&self) -> Label {
        match self {
            TransactionStatus::Pending => Label::Pending,
            TransactionStatus::Completed => Label::Completed,
            TransactionStatus::Cancelled => Label::Cancelled,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TransactionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: TransactionStatus::ALL
                    .iter()
                    .map(|s| s.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Transactions
// =============================================================================

/// A canonical transaction as confirmed by the inventory authority.
///
/// `id` and `receipt_number` only ever come from the authority's response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub receipt_number: String,
    pub date: String,
    pub customer_name: String,
    pub products: Vec<CartLine>,
    #[ts(type = "number")]
    pub total: Money,
    pub status: TransactionStatus,
}

impl Transaction {
    /// Σ quantity × price over the recorded lines.
    pub fn lines_total(&self) -> Money {
        self.products.iter().map(CartLine::line_total).sum()
    }
}

/// An uncommitted transaction payload awaiting authority confirmation.
///
/// Carries no id and no receipt number; the authority assigns both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DraftTransaction {
    pub date: String,
    pub customer_name: String,
    pub products: Vec<CartLine>,
    #[ts(type = "number")]
    pub total: Money,
    pub status: TransactionStatus,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default() {
        assert_eq!(TransactionStatus::default(), TransactionStatus::Completed);
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&TransactionStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");

        let parsed: TransactionStatus = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(parsed, TransactionStatus::Completed);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Pending".parse::<TransactionStatus>().unwrap(), TransactionStatus::Pending);
        assert!("refunded".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn test_transaction_wire_shape() {
        let json = r#"{
            "id": 99,
            "receiptNumber": "T-00099",
            "date": "2024-05-01T10:00:00",
            "customerName": "Dana",
            "products": [{"product": {"id": 7, "name": "Tea", "price": 3.5, "stock": 10}, "quantity": 2}],
            "total": 7.0,
            "status": "completed"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.id, 99);
        assert_eq!(tx.receipt_number, "T-00099");
        assert_eq!(tx.products[0].line_total(), Money::from_cents(700));
        assert_eq!(tx.lines_total(), tx.total);
    }

    #[test]
    fn test_draft_has_no_identity_fields() {
        let draft = DraftTransaction {
            date: "2024-05-01".to_string(),
            customer_name: "Customer".to_string(),
            products: Vec::new(),
            total: Money::zero(),
            status: TransactionStatus::Pending,
        };
        let value = serde_json::to_value(&draft).unwrap();

        assert!(value.get("id").is_none());
        assert!(value.get("receiptNumber").is_none());
        assert_eq!(value["customerName"], "Customer");
    }
}
