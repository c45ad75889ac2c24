//! Read-side storage for purchase orders.
//!
//! One trait, two backends: an in-memory store for dev/tests and a Postgres store
//! for real deployments.

pub mod in_memory;
pub mod postgres;
pub mod store;

pub use in_memory::InMemoryPurchaseOrderStore;
pub use postgres::PostgresPurchaseOrderStore;
pub use store::{PurchaseOrderStore, StoreError};
