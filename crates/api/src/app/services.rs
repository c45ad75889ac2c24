use std::sync::Arc;

use poview_infra::{
    ApiConfig, InMemoryPurchaseOrderStore, PostgresPurchaseOrderStore, PurchaseOrderStore,
    StoreError,
};
use poview_purchasing::PurchaseOrder;

/// Shared state behind every handler.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn PurchaseOrderStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn PurchaseOrderStore>) -> Self {
        Self { store }
    }

    /// Every purchase order with its line items, sorted by expected delivery date.
    ///
    /// Failures are logged here and handed back to the caller.
    pub async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>, StoreError> {
        self.store
            .list_with_line_items()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to list purchase orders"))
    }
}

/// Pick the store for this process: Postgres when a database URL is configured,
/// otherwise the in-memory store seeded with demo data.
pub async fn build_store(config: &ApiConfig) -> Result<Arc<dyn PurchaseOrderStore>, StoreError> {
    match config.database_url.as_deref() {
        Some(url) => {
            let store = PostgresPurchaseOrderStore::connect(url, config.max_connections).await?;
            if config.apply_schema {
                store.ensure_schema().await?;
            }
            tracing::info!(max_connections = config.max_connections, "using postgres store");
            Ok(Arc::new(store))
        }
        None => {
            let store = InMemoryPurchaseOrderStore::seeded()?;
            tracing::warn!(orders = store.len(), "DATABASE_URL not set; serving in-memory demo data");
            Ok(Arc::new(store))
        }
    }
}
