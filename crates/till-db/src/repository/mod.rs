//! # Repository Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session                                                                │
//! │       │  db.history().save(&history)                                    │
//! │       ▼                                                                 │
//! │  HistoryStore   ── JSON encode/decode of TransactionHistory             │
//! │       │  kv.put("transactions", json)                                   │
//! │       ▼                                                                 │
//! │  KvRepository   ── raw rows in kv_store                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`kv::KvRepository`] - Plain key-value rows
//! - [`history::HistoryStore`] - The transaction history blob

pub mod history;
pub mod kv;
