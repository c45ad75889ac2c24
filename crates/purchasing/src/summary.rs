use serde::Serialize;

use poview_core::{Entity, PurchaseOrderId};

use crate::order::PurchaseOrder;
use crate::totals::{OrderTotals, compute_totals};

/// A purchase order paired with the totals derived from its current line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseOrderSummary {
    #[serde(flatten)]
    pub order: PurchaseOrder,
    #[serde(flatten)]
    pub totals: OrderTotals,
}

impl PurchaseOrderSummary {
    pub fn new(order: PurchaseOrder) -> Self {
        let totals = compute_totals(order.line_items());
        Self { order, totals }
    }

    pub fn id(&self) -> PurchaseOrderId {
        self.order.id
    }
}

impl Entity for PurchaseOrderSummary {
    type Id = PurchaseOrderId;

    fn id(&self) -> PurchaseOrderId {
        self.order.id
    }
}

/// Compute the summary row of every order, preserving input order.
pub fn summarize(orders: Vec<PurchaseOrder>) -> Vec<PurchaseOrderSummary> {
    orders.into_iter().map(PurchaseOrderSummary::new).collect()
}
