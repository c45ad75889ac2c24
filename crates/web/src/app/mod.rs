//! Front-end application wiring (Axum router + shared state).
//!
//! - `routes.rs`: page handlers and query parsing
//! - `errors.rs`: error pages

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::fetch::PurchaseOrdersClient;
use crate::render::PageRenderer;
use crate::view::{INDEX_PATH, PLAIN_PATH};

pub mod errors;
pub mod routes;

/// Shared state behind every page handler.
#[derive(Debug)]
pub struct WebState {
    pub client: PurchaseOrdersClient,
    pub renderer: PageRenderer,
}

impl WebState {
    pub fn new(client: PurchaseOrdersClient, renderer: PageRenderer) -> Self {
        Self { client, renderer }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(state: WebState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route(INDEX_PATH, get(routes::index_table))
        .route(PLAIN_PATH, get(routes::plain_table))
        .layer(Extension(Arc::new(state)))
        .layer(axum::middleware::from_fn(poview_observability::log_requests))
}
