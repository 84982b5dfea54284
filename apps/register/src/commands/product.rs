//! # Product Commands
//!
//! The catalog is a read-only copy of the authority's stock list. Every
//! write goes to the authority first and the local copy only ever takes the
//! product the authority sends back.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_product    validate ──► POST /stock ──► upsert returned product   │
//! │  deduct_stock   validate ──► POST /stock/update ──► refresh catalog     │
//! │  refresh        GET /stock ──► replace catalog ──► reconcile cart       │
//! │  search         local, case-insensitive substring                       │
//! │  delete         confirm.rs (two-phase)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info, warn};

use till_core::validation::{
    validate_price, validate_product_name, validate_quantity, validate_search_query,
    validate_stock,
};
use till_core::{Money, NewProduct, Product, ProductId, StockUpdate};

use crate::error::{RegisterError, RegisterResult};
use crate::session::Session;

/// Current catalog.
pub fn list_products(session: &Session) -> Vec<Product> {
    session.catalog().snapshot()
}

/// Filters the local catalog by name.
///
/// ## Rules
/// - Case-insensitive substring match
/// - Empty term returns everything
pub fn search_products(session: &Session, term: &str) -> RegisterResult<Vec<Product>> {
    let term = validate_search_query(term)?;
    debug!(term = %term, "search_products command");

    Ok(session.catalog().search(&term))
}

/// Asks the authority directly (`GET /stock/search`), bypassing the catalog.
pub async fn search_authority(session: &Session, term: &str) -> RegisterResult<Vec<Product>> {
    let term = validate_search_query(term)?;
    debug!(term = %term, "search_authority command");

    Ok(session.authority().search_products(&term).await?)
}

/// Reloads the catalog from the authority.
///
/// Cart lines are re-priced, clamped to the new stock, or dropped if the
/// product is gone or sold out.
///
/// ## Errors
/// `COMMIT_IN_FLIGHT` while a commit is out; the cart it sent must stay as is.
pub async fn refresh_catalog(session: &Session) -> RegisterResult<Vec<Product>> {
    debug!("refresh_catalog command");
    session.ensure_cart_editable()?;

    let products = session.authority().list_products().await?;
    session.install_catalog(products);

    Ok(session.catalog().snapshot())
}

/// Creates a product, or tops up an existing one with the same name.
///
/// ## Validation
/// - name: non-empty, at most 200 characters
/// - price: > 0
/// - stock: ≥ 0
///
/// ## Returns
/// The product as the authority stored it.
pub async fn add_product(
    session: &Session,
    name: &str,
    price: Money,
    stock: i64,
) -> RegisterResult<Product> {
    debug!(name = %name, price = %price, stock, "add_product command");
    session.ensure_cart_editable()?;

    validate_product_name(name)?;
    validate_price(price)?;
    let stock = validate_stock(stock)?;

    let new_product = NewProduct {
        name: name.trim().to_string(),
        price,
        stock,
    };
    let product = session.authority().add_product(&new_product).await?;

    info!(product_id = product.id, name = %product.name, stock = product.stock, "Product saved");
    session.apply_product(product.clone());

    Ok(product)
}

/// Removes `quantity` units from a product's stock (breakage, shrinkage).
///
/// ## Errors
/// - `VALIDATION_ERROR` if quantity is not positive
/// - `NOT_FOUND` if the product is not in the catalog
/// - `COMMIT_IN_FLIGHT` while a commit is out
/// - `AUTHORITY_REQUEST_FAILED` if the authority refuses (e.g. not enough stock)
pub async fn deduct_stock(
    session: &Session,
    product_id: ProductId,
    quantity: i64,
) -> RegisterResult<Product> {
    debug!(product_id, quantity, "deduct_stock command");

    let quantity = validate_quantity(quantity)?;
    session.ensure_cart_editable()?;
    if session.catalog().get(product_id).is_none() {
        return Err(RegisterError::not_found("Product", product_id));
    }

    let update = StockUpdate {
        product_id,
        quantity,
    };
    let product = session.authority().update_stock(&update).await?;
    info!(product_id, stock = product.stock, "Stock deducted");

    session.apply_product(product.clone());

    if let Err(e) = refresh_catalog(session).await {
        warn!(error = %e, "Catalog refresh after stock update failed");
    }

    Ok(product)
}
