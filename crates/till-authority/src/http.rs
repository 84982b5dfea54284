//! # HTTP Authority
//!
//! `reqwest` implementation of [`InventoryAuthority`].
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  commit_transaction(draft)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST {base}/transactions   body = DraftTransaction (no id, no #)      │
//! │       │                                                                 │
//! │       ├── send fails ───────────────► Transport                        │
//! │       ├── status ≥ 400 ─────────────► RequestFailed{status, error}     │
//! │       ├── body not JSON ────────────► MalformedResponse                │
//! │       ├── id / receiptNumber missing ► MalformedResponse               │
//! │       ▼                                                                 │
//! │  Transaction (canonical)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::authority::InventoryAuthority;
use crate::config::AuthorityConfig;
use crate::error::{AuthorityError, AuthorityResult};
use crate::wire::{ErrorBody, MessageBody, TransactionPayload};
use till_core::{
    DraftTransaction, NewProduct, Product, ProductId, StockUpdate, Transaction, TransactionId,
};

/// HTTP client for the inventory authority.
#[derive(Debug, Clone)]
pub struct HttpAuthority {
    client: Client,
    config: AuthorityConfig,
}

impl HttpAuthority {
    /// Builds the client with the configured timeout.
    pub fn new(config: AuthorityConfig) -> AuthorityResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AuthorityError::InvalidConfig(e.to_string()))?;

        Ok(HttpAuthority { client, config })
    }

    pub fn config(&self) -> &AuthorityConfig {
        &self.config
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AuthorityResult<T> {
        let url = self.config.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AuthorityResult<T> {
        let url = self.config.url(path);
        debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn delete(&self, path: &str) -> AuthorityResult<String> {
        let url = self.config.url(path);
        debug!(%url, "DELETE");
        let response = self.client.delete(&url).send().await?;
        let body: MessageBody = Self::handle_response(response).await?;
        Ok(body.message.unwrap_or_else(|| "Deleted".to_string()))
    }

    /// Maps non-success statuses to `RequestFailed` and decodes the body.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> AuthorityResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = Self::error_message(status, &text);
            warn!(status = status.as_u16(), %message, "Inventory service returned an error");
            return Err(AuthorityError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| AuthorityError::MalformedResponse(e.to_string()))
    }

    fn error_message(status: StatusCode, text: &str) -> String {
        serde_json::from_str::<ErrorBody>(text)
            .ok()
            .and_then(ErrorBody::into_message)
            .or_else(|| Some(text.trim().to_string()).filter(|t| !t.is_empty()))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string())
    }
}

#[async_trait]
impl InventoryAuthority for HttpAuthority {
    async fn list_products(&self) -> AuthorityResult<Vec<Product>> {
        self.get("stock").await
    }

    async fn search_products(&self, term: &str) -> AuthorityResult<Vec<Product>> {
        let url = self.config.url("stock/search");
        debug!(%url, term, "GET");
        let response = self.client.get(&url).query(&[("q", term)]).send().await?;
        Self::handle_response(response).await
    }

    async fn add_product(&self, product: &NewProduct) -> AuthorityResult<Product> {
        self.post("stock", product).await
    }

    async fn delete_product(&self, id: ProductId) -> AuthorityResult<String> {
        self.delete(&format!("stock/{}", id)).await
    }

    async fn update_stock(&self, update: &StockUpdate) -> AuthorityResult<Product> {
        self.post("stock/update", update).await
    }

    async fn list_transactions(&self) -> AuthorityResult<Vec<Transaction>> {
        let payloads: Vec<TransactionPayload> = self.get("transactions").await?;
        payloads.into_iter().map(Transaction::try_from).collect()
    }

    async fn commit_transaction(&self, draft: &DraftTransaction) -> AuthorityResult<Transaction> {
        let payload: TransactionPayload = self.post("transactions", draft).await?;
        Transaction::try_from(payload)
    }

    async fn delete_transaction(&self, id: TransactionId) -> AuthorityResult<String> {
        self.delete(&format!("transactions/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(
            HttpAuthority::error_message(StatusCode::BAD_REQUEST, r#"{"error": "Invalid input"}"#),
            "Invalid input"
        );
        assert_eq!(
            HttpAuthority::error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
        assert_eq!(
            HttpAuthority::error_message(StatusCode::NOT_FOUND, ""),
            "Not Found"
        );
    }
}
