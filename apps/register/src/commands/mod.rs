//! # Register Commands
//!
//! Every operation a front end can ask of the register.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs          ◄─── You are here (exports)
//! ├── cart.rs         ◄─── Add / increment / decrement lines
//! ├── product.rs      ◄─── Catalog refresh, search, add, deduct stock
//! ├── checkout.rs     ◄─── Customer, date, status, preview, commit
//! ├── transaction.rs  ◄─── History queries
//! ├── receipt.rs      ◄─── Text receipts in the active locale
//! ├── locale.rs       ◄─── Language switching
//! └── confirm.rs      ◄─── Two-phase destructive actions
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  front end ──► commands::cart::add_to_cart(&session, 7)                 │
//! │                      │                                                  │
//! │                      ├── locks one state, applies a till-core rule      │
//! │                      ├── session.notify(StateChange::CartChanged)       │
//! │                      ▼                                                  │
//! │               RegisterResult<CartView>                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands that talk to the authority are `async`; everything else is
//! synchronous and observable as soon as it returns.

pub mod cart;
pub mod checkout;
pub mod confirm;
pub mod locale;
pub mod product;
pub mod receipt;
pub mod transaction;
