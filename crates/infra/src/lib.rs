//! Infrastructure layer: data access, demo fixtures and configuration.

pub mod config;
pub mod read_model;
pub mod seed;

pub use config::{ApiConfig, ConfigError, WebConfig};
pub use read_model::{
    InMemoryPurchaseOrderStore, PostgresPurchaseOrderStore, PurchaseOrderStore, StoreError,
};
