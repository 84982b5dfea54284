//! # till-core: Pure Business Logic for Till POS
//!
//! This crate is the **heart** of Till POS: the cart ledger and the rules
//! that derive transactions and receipts from it. No I/O lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Till POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end (terminal / web)                   │   │
//! │  │    Product list ──► Cart ──► Checkout form ──► Receipt          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 register (Session + commands)                   │   │
//! │  └──────────┬──────────────────┬────────────────────┬──────────────┘   │
//! │             │                  │                    │                   │
//! │  ┌──────────▼──────────┐ ┌─────▼────────────┐ ┌─────▼──────────────┐   │
//! │  │ ★ till-core ★       │ │ till-authority   │ │ till-db            │   │
//! │  │ cart, receipt,      │ │ REST client for  │ │ SQLite history     │   │
//! │  │ history, locale     │ │ /stock, /trans.. │ │ blob               │   │
//! │  └─────────────────────┘ └──────────────────┘ └────────────────────┘   │
//! │                                                                         │
//! │   NO I/O • NO DATABASE • NO NETWORK • NO CLOCK                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, Transaction)
//! - [`money`] - Exact decimal Money
//! - [`cart`] - The cart ledger
//! - [`receipt`] - Draft/receipt projection and text rendering
//! - [`history`] - Capped, newest-first transaction list
//! - [`locale`] - UI label tables (en/ar/he)
//! - [`confirm`] - Two-phase confirmation tickets
//! - [`validation`] - Input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{CartLedger, Money, Product};
//!
//! let tea = Product { id: 7, name: "Tea".into(), price: Money::from_cents(350), stock: 10 };
//!
//! let mut cart = CartLedger::new();
//! cart.add_line(&tea).unwrap();
//! cart.add_line(&tea).unwrap();
//!
//! assert_eq!(cart.total().to_string(), "7.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod confirm;
pub mod error;
pub mod history;
pub mod locale;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartLedger, CartTotals};
pub use confirm::{ConfirmationBook, ConfirmationRequest, Consent, Intent, Ticket};
pub use error::{CoreError, CoreResult, ValidationError};
pub use history::TransactionHistory;
pub use locale::{Label, Locale};
pub use money::Money;
pub use receipt::{BusinessIdentity, Receipt, ReceiptLine, ReceiptMeta, ReceiptStyle};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of transactions kept locally.
pub const HISTORY_LIMIT: usize = 50;

/// Prefix of every receipt number.
pub const RECEIPT_PREFIX: &str = "T-";

/// Minimum digits after the prefix (zero-padded).
pub const RECEIPT_DIGITS: usize = 5;

/// Customer name used when the cashier leaves the field blank.
pub const DEFAULT_CUSTOMER: &str = "Customer";

/// Maximum length of product and customer names, in characters.
pub const MAX_NAME_LEN: usize = 200;
