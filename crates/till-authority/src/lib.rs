//! # till-authority: Inventory Authority Client
//!
//! Every network call the register makes goes through this crate.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Session ──► Arc<dyn InventoryAuthority>                               │
//! │                       │                                                 │
//! │          ┌────────────┴─────────────┐                                   │
//! │          ▼                          ▼                                   │
//! │   HttpAuthority               test doubles                              │
//! │   (reqwest, JSON)             (scripted responses)                      │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   GET/POST/DELETE  {base_url}/stock, /stock/update, /stock/search,      │
//! │                    /transactions, /transactions/{id}                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - No retries. A failed call is reported once and nothing local changes.
//! - Identity (`id`, `receiptNumber`) is only ever taken from a response.
//! - A success response missing identity is [`AuthorityError::MalformedResponse`].

pub mod authority;
pub mod config;
pub mod error;
pub mod http;
pub mod wire;

pub use authority::InventoryAuthority;
pub use config::AuthorityConfig;
pub use error::{AuthorityError, AuthorityResult};
pub use http::HttpAuthority;
