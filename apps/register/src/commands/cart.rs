//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌──────────┐  add_to_cart   ┌──────────┐   commit    ┌──────────┐
//! │  Empty   │───────────────►│ In Cart  │────────────►│  Empty   │
//! │  Cart    │                │          │ (checkout)  │  Cart    │
//! └──────────┘                └──────────┘             └──────────┘
//!                              │  ▲    │
//!                   increment  │  │    │ clear (confirm.rs)
//!                   decrement ─┘  │    └──────────────────►
//! ```
//!
//! All of these are rejected with `COMMIT_IN_FLIGHT` while a commit is out.

use serde::Serialize;
use tracing::debug;

use till_core::{CartLedger, CartLine, CartTotals, ProductId};

use crate::error::{RegisterError, RegisterResult};
use crate::events::StateChange;
use crate::session::Session;

/// Cart contents plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&CartLedger> for CartView {
    fn from(cart: &CartLedger) -> Self {
        CartView {
            lines: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Current cart.
pub fn get_cart(session: &Session) -> CartView {
    session.cart().with_cart(|c| CartView::from(c))
}

/// Adds one unit of a catalog product.
///
/// ## Errors
/// - `NOT_FOUND` if the product is not in the catalog
/// - `OUT_OF_STOCK` / `STOCK_EXCEEDED` from the ledger (cart unchanged)
pub fn add_to_cart(session: &Session, product_id: ProductId) -> RegisterResult<CartView> {
    debug!(product_id, "add_to_cart command");
    session.ensure_cart_editable()?;

    let product = session
        .catalog()
        .get(product_id)
        .ok_or_else(|| RegisterError::not_found("Product", product_id))?;

    let view = session.cart().with_cart_mut(|c| {
        c.add_line(&product)?;
        Ok::<CartView, RegisterError>(CartView::from(&*c))
    })?;

    session.notify(StateChange::CartChanged);
    Ok(view)
}

/// One more unit of a line already in the cart.
///
/// At the stock bound, or for a product not in the cart, nothing changes.
pub fn increment(session: &Session, product_id: ProductId) -> RegisterResult<CartView> {
    debug!(product_id, "increment command");
    session.ensure_cart_editable()?;

    let (changed, view) = session
        .cart()
        .with_cart_mut(|c| (c.increment(product_id), CartView::from(&*c)));

    if changed {
        session.notify(StateChange::CartChanged);
    }
    Ok(view)
}

/// One less unit; the line goes away at zero.
pub fn decrement(session: &Session, product_id: ProductId) -> RegisterResult<CartView> {
    debug!(product_id, "decrement command");
    session.ensure_cart_editable()?;

    let (changed, view) = session
        .cart()
        .with_cart_mut(|c| (c.decrement(product_id), CartView::from(&*c)));

    if changed {
        session.notify(StateChange::CartChanged);
    }
    Ok(view)
}
