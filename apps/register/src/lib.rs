//! # Till Register Library
//!
//! The application layer of Till POS: a [`Session`](session::Session) that
//! owns all register state, the commands that drive it, and a terminal
//! front end.
//!
//! ## Module Organization
//! ```text
//! till_register/
//! ├── lib.rs          ◄─── You are here (logging & startup)
//! ├── session.rs      ◄─── Session: state, counter, commit guard
//! ├── events.rs       ◄─── StateChange notifications
//! ├── state/
//! │   ├── cart.rs     ◄─── CartState
//! │   ├── catalog.rs  ◄─── CatalogState
//! │   ├── history.rs  ◄─── HistoryState
//! │   ├── checkout.rs ◄─── CheckoutState (customer, date, status)
//! │   ├── locale.rs   ◄─── LocaleState
//! │   └── config.rs   ◄─── ConfigState (config crate layering)
//! ├── commands/       ◄─── cart, product, checkout, transaction,
//! │                        receipt, locale, confirm
//! ├── repl.rs         ◄─── stdin command loop
//! └── error.rs        ◄─── RegisterError {code, message}
//! ```

pub mod commands;
pub mod error;
pub mod events;
pub mod repl;
pub mod session;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use session::Session;
use state::ConfigState;
use till_authority::HttpAuthority;
use till_db::Database;

/// Runs the register until the cashier quits.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging ── tracing-subscriber, RUST_LOG overrides       │
/// │  2. Load Configuration ── defaults → till.toml → TILL_* variables      │
/// │  3. Open Database ─────── SQLite (WAL), pending migrations             │
/// │  4. Build Authority ───── reqwest client with base URL + timeout       │
/// │  5. Session::startup ──── local history, then /stock, /transactions    │
/// │  6. Command loop ──────── until quit or end of input                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Till POS register");

    let config = ConfigState::load().context("Invalid configuration")?;
    info!(
        authority = %config.authority_url,
        database = ?config.database_path,
        "Configuration loaded"
    );

    if let Some(dir) = config.database_path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create {}", dir.display()))?;
        }
    }

    let db = Database::new(config.db_config())
        .await
        .context("Could not open local database")?;
    info!("Database connected and migrations applied");

    let authority = HttpAuthority::new(config.authority_config())
        .context("Could not build inventory client")?;

    let session = Session::new(
        config,
        Arc::new(authority),
        Some(db.history()),
        Local::now().date_naive(),
    );
    session.startup().await;

    repl::run(&session).await?;

    db.close().await;
    info!("Register closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=till=trace` - Show trace for till crates only
/// - Default: INFO, DEBUG for till crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,till=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .init();
}
