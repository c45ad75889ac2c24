use axum::{Router, routing::get};

pub mod purchase_orders;
pub mod system;

/// Router for the read endpoints.
pub fn router() -> Router {
    Router::new().route(
        "/api/purchase-orders",
        get(purchase_orders::list_purchase_orders),
    )
}
