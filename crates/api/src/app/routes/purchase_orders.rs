use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};

use crate::app::errors;
use crate::app::services::AppServices;

/// `GET /api/purchase-orders`: the full list, line items included.
pub async fn list_purchase_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_purchase_orders().await {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
