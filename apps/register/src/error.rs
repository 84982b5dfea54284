//! # Register Error Type
//!
//! Unified error type for register commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Till POS                               │
//! │                                                                         │
//! │  Command Function  ── Result<T, RegisterError>                          │
//! │         │                                                               │
//! │         ├── CoreError::StockExceeded ─────────► STOCK_EXCEEDED          │
//! │         ├── CoreError::OutOfStock ────────────► OUT_OF_STOCK            │
//! │         ├── CoreError::CartEmpty ─────────────► CART_EMPTY              │
//! │         ├── ValidationError ──────────────────► VALIDATION_ERROR        │
//! │         ├── AuthorityError::RequestFailed ────► AUTHORITY_REQUEST_FAILED│
//! │         ├── AuthorityError::Transport ────────► AUTHORITY_REQUEST_FAILED│
//! │         ├── AuthorityError::MalformedResponse ► MALFORMED_RESPONSE      │
//! │         ├── DbError ──────────────────────────► STORAGE_ERROR           │
//! │         └── second commit ────────────────────► COMMIT_IN_FLIGHT        │
//! │                                                                         │
//! │  Front end shows `message`, branches on `code`.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;

use till_authority::AuthorityError;
use till_core::{CoreError, ValidationError};
use till_db::DbError;

/// Error returned from register commands.
///
/// ## Serialization
/// ```json
/// { "code": "STOCK_EXCEEDED", "message": "Only 2 Cola available in stock" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Line already holds all available stock
    StockExceeded,

    /// Product has no stock
    OutOfStock,

    /// Operation needs a non-empty cart
    CartEmpty,

    /// Authority rejected the call or could not be reached
    AuthorityRequestFailed,

    /// Authority answered without required fields
    MalformedResponse,

    /// A commit is already outstanding
    CommitInFlight,

    /// Input validation failed
    ValidationError,

    /// Product or transaction not known locally
    NotFound,

    /// Confirmation ticket is stale or unknown
    ConfirmationMismatch,

    /// Local storage failed
    StorageError,
}

impl ErrorCode {
    /// Wire name, e.g. `STOCK_EXCEEDED`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::StockExceeded => "STOCK_EXCEEDED",
            ErrorCode::OutOfStock => "OUT_OF_STOCK",
            ErrorCode::CartEmpty => "CART_EMPTY",
            ErrorCode::AuthorityRequestFailed => "AUTHORITY_REQUEST_FAILED",
            ErrorCode::MalformedResponse => "MALFORMED_RESPONSE",
            ErrorCode::CommitInFlight => "COMMIT_IN_FLIGHT",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ConfirmationMismatch => "CONFIRMATION_MISMATCH",
            ErrorCode::StorageError => "STORAGE_ERROR",
        }
    }
}

impl RegisterError {
    /// Creates a new register error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        RegisterError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        RegisterError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        RegisterError::new(ErrorCode::ValidationError, message)
    }

    /// A commit is already being processed.
    pub fn commit_in_flight() -> Self {
        RegisterError::new(
            ErrorCode::CommitInFlight,
            "A transaction is already being completed",
        )
    }
}

/// Converts core errors to register errors.
impl From<CoreError> for RegisterError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::StockExceeded { .. } => ErrorCode::StockExceeded,
            CoreError::OutOfStock { .. } => ErrorCode::OutOfStock,
            CoreError::CartEmpty => ErrorCode::CartEmpty,
            CoreError::NoSuchProduct(_) | CoreError::NoSuchTransaction(_) => ErrorCode::NotFound,
            CoreError::UnknownTicket(_) => ErrorCode::ConfirmationMismatch,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        RegisterError::new(code, err.to_string())
    }
}

impl From<ValidationError> for RegisterError {
    fn from(err: ValidationError) -> Self {
        RegisterError::validation(err.to_string())
    }
}

/// Converts authority errors to register errors.
impl From<AuthorityError> for RegisterError {
    fn from(err: AuthorityError) -> Self {
        match err {
            AuthorityError::RequestFailed { message, .. } => {
                RegisterError::new(ErrorCode::AuthorityRequestFailed, message)
            }
            AuthorityError::Transport(e) => {
                tracing::error!("Inventory service transport error: {}", e);
                RegisterError::new(
                    ErrorCode::AuthorityRequestFailed,
                    "Inventory service is unreachable",
                )
            }
            AuthorityError::MalformedResponse(detail) => {
                tracing::error!("Malformed inventory response: {}", detail);
                RegisterError::new(
                    ErrorCode::MalformedResponse,
                    "Inventory service sent an incomplete response",
                )
            }
            AuthorityError::InvalidConfig(detail) => {
                RegisterError::new(ErrorCode::AuthorityRequestFailed, detail)
            }
        }
    }
}

/// Converts database errors to register errors.
impl From<DbError> for RegisterError {
    fn from(err: DbError) -> Self {
        tracing::error!("Local storage error: {}", err);
        RegisterError::new(ErrorCode::StorageError, "Local storage operation failed")
    }
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for RegisterError {}

/// Result type for register commands.
pub type RegisterResult<T> = Result<T, RegisterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_codes() {
        let err: RegisterError = CoreError::StockExceeded {
            name: "Cola".to_string(),
            available: 2,
        }
        .into();
        assert_eq!(err.code, ErrorCode::StockExceeded);
        assert_eq!(err.message, "Only 2 Cola available in stock");

        let err: RegisterError = CoreError::UnknownTicket(3).into();
        assert_eq!(err.code, ErrorCode::ConfirmationMismatch);
    }

    #[test]
    fn test_authority_message_is_kept() {
        let err: RegisterError = AuthorityError::RequestFailed {
            status: 400,
            message: "No products in transaction".to_string(),
        }
        .into();

        assert_eq!(err.code, ErrorCode::AuthorityRequestFailed);
        assert_eq!(err.message, "No products in transaction");
    }

    #[test]
    fn test_serialized_shape() {
        let err = RegisterError::commit_in_flight();
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "COMMIT_IN_FLIGHT");
        assert_eq!(err.to_string(), "[COMMIT_IN_FLIGHT] A transaction is already being completed");
    }
}
