//! HttpAuthority against a mock inventory service.

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use till_authority::{AuthorityConfig, AuthorityError, HttpAuthority, InventoryAuthority};
use till_core::{
    CartLine, DraftTransaction, Money, NewProduct, Product, StockUpdate, TransactionStatus,
};

fn authority(server: &MockServer) -> HttpAuthority {
    let config = AuthorityConfig::new(format!("{}/api", server.uri()))
        .request_timeout(Duration::from_secs(2));
    HttpAuthority::new(config).unwrap()
}

fn tea() -> Product {
    Product {
        id: 7,
        name: "Tea".to_string(),
        price: Money::from_cents(350),
        stock: 10,
    }
}

fn draft() -> DraftTransaction {
    DraftTransaction {
        date: "2024-05-01".to_string(),
        customer_name: "Dana".to_string(),
        products: vec![CartLine {
            product: tea(),
            quantity: 2,
        }],
        total: Money::from_cents(700),
        status: TransactionStatus::Completed,
    }
}

#[tokio::test]
async fn test_list_products() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "name": "Tea", "price": 3.5, "stock": 10},
            {"id": 8, "name": "Bread", "price": 8, "stock": 0}
        ])))
        .mount(&server)
        .await;

    let products = authority(&server).list_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0], tea());
    assert_eq!(products[1].price.to_string(), "8.00");
    assert!(!products[1].in_stock());
}

#[tokio::test]
async fn test_search_sends_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stock/search"))
        .and(query_param("q", "te"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "name": "Tea", "price": 3.5, "stock": 10}
        ])))
        .mount(&server)
        .await;

    let found = authority(&server).search_products("te").await.unwrap();
    assert_eq!(found, vec![tea()]);
}

#[tokio::test]
async fn test_commit_posts_draft_and_returns_canonical() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/transactions"))
        .and(body_json(json!({
            "date": "2024-05-01",
            "customerName": "Dana",
            "products": [{"product": {"id": 7, "name": "Tea", "price": 3.5, "stock": 10}, "quantity": 2}],
            "total": 7.0,
            "status": "completed"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 99,
            "receiptNumber": "T-00099",
            "date": "2024-05-01T00:00:00",
            "customerName": "Dana",
            "products": [{"product": {"id": 7, "name": "Tea", "price": 3.5, "stock": 10}, "quantity": 2}],
            "total": 7.0,
            "status": "Completed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tx = authority(&server).commit_transaction(&draft()).await.unwrap();

    assert_eq!(tx.id, 99);
    assert_eq!(tx.receipt_number, "T-00099");
    assert_eq!(tx.total.to_string(), "7.00");
    assert_eq!(tx.status, TransactionStatus::Completed);
}

#[tokio::test]
async fn test_commit_without_id_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/transactions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "receiptNumber": "T-00099",
            "total": 7.0
        })))
        .mount(&server)
        .await;

    let err = authority(&server).commit_transaction(&draft()).await.unwrap_err();
    assert!(matches!(err, AuthorityError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_non_json_success_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stock"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = authority(&server).list_products().await.unwrap_err();
    assert!(matches!(err, AuthorityError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_error_status_carries_authority_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/stock"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid input"})))
        .mount(&server)
        .await;

    let new_product = NewProduct {
        name: "Tea".to_string(),
        price: Money::from_cents(350),
        stock: 10,
    };
    let err = authority(&server).add_product(&new_product).await.unwrap_err();

    match err {
        AuthorityError::RequestFailed { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid input");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_transaction_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/transactions/4"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Transaction not found"})))
        .mount(&server)
        .await;

    let err = authority(&server).delete_transaction(4).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.authority_message(), Some("Transaction not found"));
}

#[tokio::test]
async fn test_delete_product_returns_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/stock/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Product deleted", "id": 7})))
        .mount(&server)
        .await;

    let message = authority(&server).delete_product(7).await.unwrap();
    assert_eq!(message, "Product deleted");
}

#[tokio::test]
async fn test_update_stock_snake_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/stock/update"))
        .and(body_json(json!({"product_id": 7, "quantity": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"id": 7, "name": "Tea", "price": 3.5, "stock": 7}
        )))
        .mount(&server)
        .await;

    let updated = authority(&server)
        .update_stock(&StockUpdate {
            product_id: 7,
            quantity: 3,
        })
        .await
        .unwrap();
    assert_eq!(updated.stock, 7);
}

#[tokio::test]
async fn test_list_transactions_rejects_incomplete_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "receiptNumber": "T-00002", "total": 1.0},
            {"id": 1, "total": 1.0}
        ])))
        .mount(&server)
        .await;

    let err = authority(&server).list_transactions().await.unwrap_err();
    assert!(matches!(err, AuthorityError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_unreachable_is_transport() {
    // Nothing listens on port 9 (discard) in test environments
    let config = AuthorityConfig::new("http://127.0.0.1:9/api").request_timeout(Duration::from_secs(1));
    let authority = HttpAuthority::new(config).unwrap();

    let err = authority.list_products().await.unwrap_err();
    assert!(matches!(err, AuthorityError::Transport(_)));
}
