//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Cart and projection rule violations            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  till-db          └── DbError        - Local history storage           │
//! │  till-authority   └── AuthorityError - Inventory service calls         │
//! │  register         └── RegisterError  - What the front end sees         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │        AuthorityError ──────────────┼──► RegisterError → Front end     │
//! │        DbError ─────────────────────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, id, etc.)
//! 3. Errors are enum variants, never String
//! 4. A failed cart operation never leaves the ledger half-changed

use thiserror::Error;

use crate::types::{ProductId, TransactionId};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// All of these are local and synchronous: the ledger is unchanged when one
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The line already holds every unit in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Cola" (stock 2, in cart 2)
    ///      │
    ///      ▼
    /// StockExceeded { name: "Cola", available: 2 }
    ///      │
    ///      ▼
    /// UI shows: "Only 2 items available in stock."
    /// ```
    #[error("Only {available} {name} available in stock")]
    StockExceeded { name: String, available: u32 },

    /// The product has no stock at all.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// Operation needs at least one cart line.
    #[error("Cart is empty")]
    CartEmpty,

    /// No product with this id in the local catalog.
    #[error("Product not found: {0}")]
    NoSuchProduct(ProductId),

    /// No transaction with this id in the local history.
    #[error("Transaction not found: {0}")]
    NoSuchTransaction(TransactionId),

    /// The confirmation ticket was never issued, already used, or superseded.
    #[error("Confirmation ticket {0} is not pending")]
    UnknownTicket(u64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any request leaves for the inventory authority.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparsable date or amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::StockExceeded {
            name: "Cola".to_string(),
            available: 2,
        };
        assert_eq!(err.to_string(), "Only 2 Cola available in stock");

        let err = CoreError::OutOfStock {
            name: "Bread".to_string(),
        };
        assert_eq!(err.to_string(), "Bread is out of stock");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
