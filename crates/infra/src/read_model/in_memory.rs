use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use poview_core::{DomainError, Entity, PurchaseOrderId};
use poview_purchasing::PurchaseOrder;

use super::store::{PurchaseOrderStore, StoreError};
use crate::seed;

/// In-memory purchase order store for tests/dev.
///
/// Every insert is validated, so the store never holds an orphaned or negative
/// line item.
#[derive(Debug, Default)]
pub struct InMemoryPurchaseOrderStore {
    inner: RwLock<BTreeMap<PurchaseOrderId, PurchaseOrder>>,
}

impl InMemoryPurchaseOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the demo fixture.
    pub fn seeded() -> Result<Self, StoreError> {
        Self::with_orders(seed::demo_orders())
    }

    pub fn with_orders(orders: impl IntoIterator<Item = PurchaseOrder>) -> Result<Self, StoreError> {
        let store = Self::new();
        for order in orders {
            store.insert(order)?;
        }
        Ok(store)
    }

    /// Add one order (with its line items).
    ///
    /// Rejects invalid orders, duplicate order ids and line item ids already used
    /// by another order with `StoreError::Domain`. A poisoned lock is
    /// `StoreError::Unavailable`.
    pub fn insert(&self, order: PurchaseOrder) -> Result<(), StoreError> {
        order.validate()?;

        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;

        if map.contains_key(&order.id()) {
            return Err(DomainError::conflict(format!(
                "purchase order {} already exists",
                order.id
            ))
            .into());
        }

        let taken: BTreeSet<_> = map
            .values()
            .flat_map(|o| o.line_items().iter().map(|item| item.id))
            .collect();
        let mut incoming = BTreeSet::new();
        for item in order.line_items() {
            if taken.contains(&item.id) || !incoming.insert(item.id) {
                return Err(DomainError::conflict(format!(
                    "line item {} already exists",
                    item.id
                ))
                .into());
            }
        }

        map.insert(order.id(), order);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl PurchaseOrderStore for InMemoryPurchaseOrderStore {
    async fn list_with_line_items(&self) -> Result<Vec<PurchaseOrder>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;

        let mut orders: Vec<PurchaseOrder> = map.values().cloned().collect();
        drop(map);

        for order in &mut orders {
            order.purchase_order_line_items.sort_by_key(|item| item.id);
        }
        orders.sort_by(PurchaseOrder::cmp_by_expected_delivery);
        Ok(orders)
    }
}
