//! # State Module
//!
//! Shared state behind the register [`Session`](crate::session::Session).
//!
//! Each concern gets its own state type so a command only locks what it
//! touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐                  │
//! │  │  CartState   │  │ CatalogState │  │ HistoryState │                  │
//! │  │  Arc<Mutex<  │  │  Arc<Mutex<  │  │  Arc<Mutex<  │                  │
//! │  │  CartLedger  │  │ Vec<Product> │  │ Transaction  │                  │
//! │  │  >>          │  │  >>          │  │ History>>    │                  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘                  │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐                  │
//! │  │ LocaleState  │  │CheckoutState │  │ ConfigState  │                  │
//! │  │  Locale      │  │ ReceiptMeta  │  │  read-only   │                  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘                  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Mutex-backed states: locked only inside short closures              │
//! │  • Locks are never held across an .await                               │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod checkout;
mod config;
mod history;
mod locale;

pub use cart::CartState;
pub use catalog::CatalogState;
pub use checkout::CheckoutState;
pub use config::{ConfigState, CONFIG_PATH_VAR};
pub use history::HistoryState;
pub use locale::LocaleState;
