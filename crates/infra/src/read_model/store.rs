use std::sync::Arc;

use thiserror::Error;

use poview_core::DomainError;
use poview_purchasing::PurchaseOrder;

/// Read-only access to purchase orders and their line items.
#[async_trait::async_trait]
pub trait PurchaseOrderStore: Send + Sync {
    /// Every purchase order with its line items.
    ///
    /// Orders are sorted ascending by expected delivery date (undated orders last,
    /// ties by id); each order's line items are sorted by id.
    async fn list_with_line_items(&self) -> Result<Vec<PurchaseOrder>, StoreError>;
}

#[async_trait::async_trait]
impl<S> PurchaseOrderStore for Arc<S>
where
    S: PurchaseOrderStore + ?Sized,
{
    async fn list_with_line_items(&self) -> Result<Vec<PurchaseOrder>, StoreError> {
        (**self).list_with_line_items().await
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid row: {0}")]
    InvalidRow(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
