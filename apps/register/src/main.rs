//! # Till Register Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till POS Register                              │
//! │                                                                         │
//! │   stdin ──► repl ──► commands ──► Session ──┬──► inventory authority    │
//! │                                             │    (HTTP, system of record)│
//! │                                             └──► till.db (history blob) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    till_register::run().await
}
