//! # Authority Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP outcome                          AuthorityError                   │
//! │  ────────────                          ──────────────                   │
//! │  connect refused / timeout / TLS  ──►  Transport                        │
//! │  4xx / 5xx  {"error": "..."}      ──►  RequestFailed{status, message}   │
//! │  2xx but body missing id / #      ──►  MalformedResponse                │
//! │  bad base URL / client build      ──►  InvalidConfig                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are retried.

use thiserror::Error;

/// Result type for authority calls.
pub type AuthorityResult<T> = Result<T, AuthorityError>;

/// Inventory authority call failures.
#[derive(Debug, Error)]
pub enum AuthorityError {
    /// The authority answered with a non-success status.
    ///
    /// `message` is the body's `error` field when present.
    #[error("Inventory service rejected the request ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    /// The request never got a usable answer.
    #[error("Inventory service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response was missing required fields or was not JSON.
    #[error("Malformed response from inventory service: {0}")]
    MalformedResponse(String),

    /// The client could not be built.
    #[error("Invalid inventory service configuration: {0}")]
    InvalidConfig(String),
}

impl AuthorityError {
    /// The authority's own message, if it sent one.
    pub fn authority_message(&self) -> Option<&str> {
        match self {
            AuthorityError::RequestFailed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// HTTP status for `RequestFailed`.
    pub fn status(&self) -> Option<u16> {
        match self {
            AuthorityError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Checks if the authority reported the entity as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
