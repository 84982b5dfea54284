//! # Register Session
//!
//! One [`Session`] per running register. It owns every piece of mutable
//! state and the handles to the outside world; commands are plain functions
//! over `&Session`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Session                                       │
//! │                                                                         │
//! │  CartState  CatalogState  HistoryState  CheckoutState  LocaleState     │
//! │  ConfigState (read-only)                                               │
//! │                                                                         │
//! │  receipt counter ── AtomicU64, starts at 1, only moves forward         │
//! │  commit flag ────── AtomicBool, held by CommitGuard during commit      │
//! │  confirmations ──── ConfirmationBook (one pending ticket)              │
//! │                                                                         │
//! │  authority: Arc<dyn InventoryAuthority>   (system of record)           │
//! │  store:     Option<HistoryStore>          (local history blob)         │
//! │  events:    broadcast::Sender<StateChange>                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Session::new` performs no I/O. Loading happens in [`Session::startup`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use till_authority::InventoryAuthority;
use till_core::{ConfirmationBook, Product, ProductId};
use till_db::HistoryStore;

use crate::error::{RegisterError, RegisterResult};
use crate::events::{StateChange, EVENT_CAPACITY};
use crate::state::{
    CartState, CatalogState, CheckoutState, ConfigState, HistoryState, LocaleState,
};

/// What [`Session::startup`] managed to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupReport {
    /// Entries read from the local blob
    pub local_entries: usize,
    /// Products fetched, `None` if the authority was unreachable
    pub products: Option<usize>,
    /// Transactions fetched, `None` if the authority was unreachable
    pub transactions: Option<usize>,
}

/// Marks a commit as outstanding until dropped.
///
/// On release, any cart reconciliation held back during the commit runs.
pub(crate) struct CommitGuard<'a> {
    session: &'a Session,
}

impl Drop for CommitGuard<'_> {
    fn drop(&mut self) {
        self.session.commit_in_flight.store(false, Ordering::Release);
        if self.session.reconcile_deferred.swap(false, Ordering::AcqRel) {
            self.session.reconcile_cart();
        }
    }
}

/// The register's whole runtime context.
pub struct Session {
    cart: CartState,
    catalog: CatalogState,
    history: HistoryState,
    checkout: CheckoutState,
    locale: LocaleState,
    config: ConfigState,

    receipt_counter: AtomicU64,
    commit_in_flight: AtomicBool,
    reconcile_deferred: AtomicBool,
    confirmations: Mutex<ConfirmationBook>,

    authority: Arc<dyn InventoryAuthority>,
    store: Option<HistoryStore>,
    events: broadcast::Sender<StateChange>,
}

impl Session {
    /// Creates a session with an empty cart and counter 1.
    ///
    /// `store` is optional: without it history lives in memory only.
    pub fn new(
        config: ConfigState,
        authority: Arc<dyn InventoryAuthority>,
        store: Option<HistoryStore>,
        today: NaiveDate,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Session {
            cart: CartState::new(),
            catalog: CatalogState::new(),
            history: HistoryState::new(),
            checkout: CheckoutState::new(today),
            locale: LocaleState::new(config.default_locale),
            config,
            receipt_counter: AtomicU64::new(1),
            commit_in_flight: AtomicBool::new(false),
            reconcile_deferred: AtomicBool::new(false),
            confirmations: Mutex::new(ConfirmationBook::new()),
            authority,
            store,
            events,
        }
    }

    // =========================================================================
    // Startup
    // =========================================================================

    /// Loads local history, then the authority's products and transactions.
    ///
    /// ## Order
    /// 1. Local blob (so something is visible even offline)
    /// 2. `GET /stock`
    /// 3. `GET /transactions`, which replaces the local list and is written back
    ///
    /// Every step that fails is logged and skipped.
    pub async fn startup(&self) -> StartupReport {
        let mut report = StartupReport::default();

        if let Some(store) = &self.store {
            match store.load().await {
                Ok(local) => {
                    report.local_entries = local.len();
                    self.history.with_history_mut(|h| *h = local);
                    self.sync_counter();
                    self.notify(StateChange::HistoryChanged);
                }
                Err(e) => warn!(error = %e, "Could not read local transaction history"),
            }
        }

        match self.authority.list_products().await {
            Ok(products) => {
                report.products = Some(products.len());
                self.install_catalog(products);
            }
            Err(e) => warn!(error = %e, "Could not load products"),
        }

        match self.authority.list_transactions().await {
            Ok(transactions) => {
                report.transactions = Some(transactions.len());
                self.history.with_history_mut(|h| h.replace_all(transactions));
                self.sync_counter();
                self.persist_history().await;
                self.notify(StateChange::HistoryChanged);
            }
            Err(e) => warn!(error = %e, "Could not load transactions"),
        }

        info!(
            local = report.local_entries,
            products = ?report.products,
            transactions = ?report.transactions,
            "Register session started"
        );
        report
    }

    // =========================================================================
    // State Access
    // =========================================================================

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn history(&self) -> &HistoryState {
        &self.history
    }

    pub fn checkout(&self) -> &CheckoutState {
        &self.checkout
    }

    pub fn locale(&self) -> &LocaleState {
        &self.locale
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub(crate) fn authority(&self) -> &dyn InventoryAuthority {
        self.authority.as_ref()
    }

    pub(crate) fn confirmations(&self) -> MutexGuard<'_, ConfirmationBook> {
        self.confirmations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribes to state change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.events.subscribe()
    }

    pub(crate) fn notify(&self, change: StateChange) {
        // No subscribers is fine
        let _ = self.events.send(change);
    }

    // =========================================================================
    // Receipt Counter
    // =========================================================================

    /// Number the next preview shows. Reading never advances it.
    pub fn receipt_counter(&self) -> u64 {
        self.receipt_counter.load(Ordering::Acquire)
    }

    /// Moves the counter past `id` if it is not already.
    pub(crate) fn advance_counter_past(&self, id: i64) {
        if let Ok(id) = u64::try_from(id) {
            let previous = self
                .receipt_counter
                .fetch_max(id.saturating_add(1), Ordering::AcqRel);
            if previous <= id {
                debug!(counter = id + 1, "Receipt counter advanced");
            }
        }
    }

    fn sync_counter(&self) {
        if let Some(max_id) = self.history.with_history(|h| h.max_id()) {
            self.advance_counter_past(max_id);
        }
    }

    // =========================================================================
    // Commit Guard
    // =========================================================================

    /// Whether a commit is waiting on the authority.
    pub fn commit_in_flight(&self) -> bool {
        self.commit_in_flight.load(Ordering::Acquire)
    }

    /// Claims the single commit slot.
    ///
    /// ## Errors
    /// `COMMIT_IN_FLIGHT` if another commit holds it.
    pub(crate) fn begin_commit(&self) -> RegisterResult<CommitGuard<'_>> {
        self.commit_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| RegisterError::commit_in_flight())?;

        Ok(CommitGuard { session: self })
    }

    /// Rejects cart edits and catalog writes while the cart snapshot is out
    /// for commit.
    pub(crate) fn ensure_cart_editable(&self) -> RegisterResult<()> {
        if self.commit_in_flight() {
            return Err(RegisterError::commit_in_flight());
        }
        Ok(())
    }

    // =========================================================================
    // Shared Steps
    // =========================================================================

    /// Replaces the catalog and brings the cart in line with it.
    pub(crate) fn install_catalog(&self, products: Vec<Product>) {
        self.catalog.replace(products);
        self.notify(StateChange::CatalogChanged);
        self.reconcile_cart();
    }

    /// Takes one product as the authority returned it.
    pub(crate) fn apply_product(&self, product: Product) {
        self.catalog.upsert(product);
        self.notify(StateChange::CatalogChanged);
        self.reconcile_cart();
    }

    /// Removes a deleted product's line from the cart.
    pub(crate) fn drop_from_cart(&self, id: ProductId) {
        if self.commit_in_flight() {
            self.reconcile_deferred.store(true, Ordering::Release);
            return;
        }
        if self.cart.with_cart_mut(|c| c.remove_product(id)) {
            self.notify(StateChange::CartChanged);
        }
    }

    /// Clamps cart lines to the catalog. Held back while a commit is out, so
    /// a failed commit returns the cart exactly as it was sent.
    fn reconcile_cart(&self) {
        if self.commit_in_flight() {
            self.reconcile_deferred.store(true, Ordering::Release);
            return;
        }

        let fresh = self.catalog.snapshot();
        let touched: Vec<ProductId> = self.cart.with_cart_mut(|c| c.reconcile(&fresh));

        if !touched.is_empty() {
            info!(products = ?touched, "Cart adjusted to new stock levels");
            self.notify(StateChange::CartChanged);
        }
    }

    /// Writes the history blob. Failures are logged, never returned.
    ///
    /// ## Returns
    /// `true` if the blob was written.
    pub(crate) async fn persist_history(&self) -> bool {
        let Some(store) = &self.store else {
            return false;
        };

        let snapshot = self.history.snapshot();
        match store.save(&snapshot).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Could not save local transaction history");
                false
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("receipt_counter", &self.receipt_counter())
            .field("commit_in_flight", &self.commit_in_flight())
            .field("catalog_len", &self.catalog.len())
            .field("persistent", &self.store.is_some())
            .finish_non_exhaustive()
    }
}
