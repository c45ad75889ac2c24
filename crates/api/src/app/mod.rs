//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store wiring and the read operation handlers call
//! - `routes/`: HTTP routes + handlers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use poview_infra::PurchaseOrderStore;

pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(store: Arc<dyn PurchaseOrderStore>) -> Router {
    let services = Arc::new(AppServices::new(store));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(axum::middleware::from_fn(poview_observability::log_requests))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use poview_infra::{InMemoryPurchaseOrderStore, StoreError};
    use poview_purchasing::PurchaseOrder;
    use tower::ServiceExt;

    struct FailingStore;

    #[async_trait::async_trait]
    impl PurchaseOrderStore for FailingStore {
        async fn list_with_line_items(&self) -> Result<Vec<PurchaseOrder>, StoreError> {
            Err(StoreError::Unavailable("database is down".to_string()))
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let res = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = build_app(Arc::new(InMemoryPurchaseOrderStore::new()));
        let (status, _) = get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_store_lists_empty_array() {
        let app = build_app(Arc::new(InMemoryPurchaseOrderStore::new()));
        let (status, body) = get(app, "/api/purchase-orders").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn seeded_store_lists_every_order() {
        let store = InMemoryPurchaseOrderStore::seeded().unwrap();
        let expected = store.len();
        let app = build_app(Arc::new(store));

        let (status, body) = get(app, "/api/purchase-orders").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), expected);
    }

    #[tokio::test]
    async fn store_failure_is_a_500_with_json_body() {
        let app = build_app(Arc::new(FailingStore));
        let (status, body) = get(app, "/api/purchase-orders").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "store_error");
        assert!(body["message"].as_str().unwrap().contains("database is down"));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = build_app(Arc::new(InMemoryPurchaseOrderStore::new()));
        let (status, _) = get(app, "/api/purchase-orders/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
