//! Client for the purchase-order read API.
//!
//! One GET per page load, no retry. A failed load degrades to an empty list
//! but keeps the error so the page can say what went wrong.

use reqwest::header::CACHE_CONTROL;

use poview_core::DomainError;
use poview_purchasing::PurchaseOrder;

/// Cache tag attached to every list request.
pub const CACHE_TAG: &str = "purchase-orders";
pub const CACHE_TAGS_HEADER: &str = "x-cache-tags";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid purchase order data: {0}")]
    Invalid(#[from] DomainError),
}

/// Result of a page-load fetch: the orders to show, plus the error if the
/// load failed (in which case `orders` is empty).
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub orders: Vec<PurchaseOrder>,
    pub error: Option<FetchError>,
}

impl FetchOutcome {
    pub fn loaded(orders: Vec<PurchaseOrder>) -> Self {
        Self {
            orders,
            error: None,
        }
    }

    pub fn failed(error: FetchError) -> Self {
        Self {
            orders: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct PurchaseOrdersClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PurchaseOrdersClient {
    /// `api_url` is the API base, e.g. `http://localhost:3100`.
    pub fn new(api_url: &str) -> Self {
        Self::with_http_client(reqwest::Client::new(), api_url)
    }

    pub fn with_http_client(http: reqwest::Client, api_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/api/purchase-orders", api_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Load every order. Never fails: errors are logged and returned alongside
    /// an empty list.
    pub async fn get_data(&self) -> FetchOutcome {
        match self.fetch().await {
            Ok(orders) => FetchOutcome::loaded(orders),
            Err(e) => {
                tracing::error!(error = %e, url = %self.endpoint, "error fetching purchase orders");
                FetchOutcome::failed(e)
            }
        }
    }

    /// Load every order, validating each one before handing it out.
    pub async fn fetch(&self) -> Result<Vec<PurchaseOrder>, FetchError> {
        let resp = self
            .http
            .get(&self.endpoint)
            .header(CACHE_CONTROL, "no-cache")
            .header(CACHE_TAGS_HEADER, CACHE_TAG)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Api(status.as_u16(), resp.text().await.unwrap_or_default()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let orders: Vec<PurchaseOrder> =
            serde_json::from_slice(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        for order in &orders {
            order.validate()?;
        }
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{
        Router,
        http::{HeaderMap, StatusCode},
        routing::get,
    };

    async fn serve(app: Router) -> (String, tokio::task::JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (base_url, handle)
    }

    fn canned(status: StatusCode, body: &'static str) -> Router {
        Router::new().route("/api/purchase-orders", get(move || async move { (status, body) }))
    }

    const ONE_ORDER: &str = r#"[{"id":1,"vendor_name":"Acme","order_date":null,
        "expected_delivery_date":"2024-01-20T00:00:00Z",
        "purchase_order_line_items":[
            {"id":10,"purchase_order_id":1,"item_id":7,"quantity":2,"unit_cost":"10.50"},
            {"id":11,"purchase_order_id":1,"item_id":8,"quantity":1,"unit_cost":5}]}]"#;

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let client = PurchaseOrdersClient::new("http://api.local:3100/");
        assert_eq!(client.endpoint(), "http://api.local:3100/api/purchase-orders");
    }

    #[tokio::test]
    async fn sends_no_cache_and_cache_tag_headers() {
        let seen: Arc<Mutex<Option<HeaderMap>>> = Arc::default();
        let captured = seen.clone();
        let app = Router::new().route(
            "/api/purchase-orders",
            get(move |headers: HeaderMap| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(headers);
                    "[]"
                }
            }),
        );
        let (base_url, handle) = serve(app).await;

        let outcome = PurchaseOrdersClient::new(&base_url).get_data().await;
        assert!(outcome.is_ok());
        assert!(outcome.orders.is_empty());

        let headers = seen.lock().unwrap().take().unwrap();
        assert_eq!(headers["cache-control"], "no-cache");
        assert_eq!(headers[CACHE_TAGS_HEADER], CACHE_TAG);
        handle.abort();
    }

    #[tokio::test]
    async fn decodes_string_and_number_unit_costs() {
        let (base_url, handle) = serve(canned(StatusCode::OK, ONE_ORDER)).await;

        let orders = PurchaseOrdersClient::new(&base_url).fetch().await.unwrap();
        assert_eq!(orders.len(), 1);
        let totals = poview_purchasing::compute_totals(orders[0].line_items());
        assert_eq!(totals.quantity, 3);
        assert_eq!(totals.total_cost.to_string(), "26.00");
        handle.abort();
    }

    #[tokio::test]
    async fn server_error_degrades_to_empty_list() {
        let (base_url, handle) = serve(canned(StatusCode::INTERNAL_SERVER_ERROR, "boom")).await;

        let outcome = PurchaseOrdersClient::new(&base_url).get_data().await;
        assert!(outcome.orders.is_empty());
        match outcome.error {
            Some(FetchError::Api(500, body)) => assert_eq!(body, "boom"),
            other => panic!("expected Api(500), got {other:?}"),
        }
        handle.abort();
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let (base_url, handle) = serve(canned(StatusCode::OK, "{not json")).await;

        let outcome = PurchaseOrdersClient::new(&base_url).get_data().await;
        assert!(outcome.orders.is_empty());
        assert!(matches!(outcome.error, Some(FetchError::Parse(_))));
        handle.abort();
    }

    #[tokio::test]
    async fn orphaned_line_item_is_rejected() {
        let body = r#"[{"id":1,"vendor_name":"Acme","order_date":null,"expected_delivery_date":null,
            "purchase_order_line_items":[
                {"id":10,"purchase_order_id":2,"item_id":7,"quantity":2,"unit_cost":"1"}]}]"#;
        let (base_url, handle) = serve(canned(StatusCode::OK, body)).await;

        let outcome = PurchaseOrdersClient::new(&base_url).get_data().await;
        assert!(outcome.orders.is_empty());
        assert!(matches!(
            outcome.error,
            Some(FetchError::Invalid(DomainError::InvariantViolation(_)))
        ));
        handle.abort();
    }

    #[tokio::test]
    async fn overflowing_line_total_is_rejected() {
        let body = r#"[{"id":1,"vendor_name":"Acme","order_date":null,"expected_delivery_date":null,
            "purchase_order_line_items":[
                {"id":10,"purchase_order_id":1,"item_id":7,"quantity":2,
                 "unit_cost":"79228162514264337593543950335"}]}]"#;
        let (base_url, handle) = serve(canned(StatusCode::OK, body)).await;

        let outcome = PurchaseOrdersClient::new(&base_url).get_data().await;
        assert!(outcome.orders.is_empty());
        assert!(matches!(
            outcome.error,
            Some(FetchError::Invalid(DomainError::Validation(_)))
        ));
        handle.abort();
    }

    #[tokio::test]
    async fn blank_vendor_name_does_not_drop_the_list() {
        let body = r#"[
            {"id":1,"vendor_name":"Acme","order_date":null,"expected_delivery_date":null,
             "purchase_order_line_items":[]},
            {"id":2,"vendor_name":"","order_date":null,"expected_delivery_date":null,
             "purchase_order_line_items":[]}]"#;
        let (base_url, handle) = serve(canned(StatusCode::OK, body)).await;

        let outcome = PurchaseOrdersClient::new(&base_url).get_data().await;
        assert!(outcome.is_ok());
        let vendors: Vec<&str> = outcome.orders.iter().map(|o| o.vendor_name.as_str()).collect();
        assert_eq!(vendors, vec!["Acme", ""]);
        handle.abort();
    }

    #[tokio::test]
    async fn unreachable_api_is_a_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let outcome = PurchaseOrdersClient::new(&base_url).get_data().await;
        assert!(outcome.orders.is_empty());
        assert!(matches!(outcome.error, Some(FetchError::Network(_))));
    }
}
