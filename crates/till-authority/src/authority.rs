//! The seam between the register and the inventory service.

use async_trait::async_trait;

use crate::error::AuthorityResult;
use till_core::{
    DraftTransaction, NewProduct, Product, ProductId, StockUpdate, Transaction, TransactionId,
};

/// Operations offered by the inventory authority.
///
/// One method per endpoint. Implementations must not retry and must never
/// invent ids: every identity in a returned value comes from the service.
#[async_trait]
pub trait InventoryAuthority: Send + Sync {
    /// `GET /stock`
    async fn list_products(&self) -> AuthorityResult<Vec<Product>>;

    /// `GET /stock/search?q=`
    async fn search_products(&self, term: &str) -> AuthorityResult<Vec<Product>>;

    /// `POST /stock`. The service merges by name, so the returned product may
    /// carry an existing id.
    async fn add_product(&self, product: &NewProduct) -> AuthorityResult<Product>;

    /// `DELETE /stock/{id}`; returns the service's confirmation message.
    async fn delete_product(&self, id: ProductId) -> AuthorityResult<String>;

    /// `POST /stock/update`; returns the updated product.
    async fn update_stock(&self, update: &StockUpdate) -> AuthorityResult<Product>;

    /// `GET /transactions`, newest first.
    async fn list_transactions(&self) -> AuthorityResult<Vec<Transaction>>;

    /// `POST /transactions`; returns the canonical transaction.
    async fn commit_transaction(&self, draft: &DraftTransaction) -> AuthorityResult<Transaction>;

    /// `DELETE /transactions/{id}`; returns the service's confirmation message.
    async fn delete_transaction(&self, id: TransactionId) -> AuthorityResult<String>;
}
