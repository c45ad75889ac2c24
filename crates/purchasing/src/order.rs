use core::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use poview_core::{DomainError, DomainResult, Entity, ItemId, LineItemId, PurchaseOrderId};

use crate::totals::checked_totals;

/// Purchase order line item.
///
/// `unit_cost` travels as a string-encoded decimal on the wire and is always a
/// parsed `Decimal` in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLineItem {
    pub id: LineItemId,
    pub purchase_order_id: PurchaseOrderId,
    pub item_id: ItemId,
    pub quantity: i32,
    pub unit_cost: Decimal,
}

impl PurchaseOrderLineItem {
    /// Check the per-line invariants (non-negative quantity and unit cost).
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity < 0 {
            return Err(DomainError::validation(format!(
                "line item {}: quantity must not be negative",
                self.id
            )));
        }
        if self.unit_cost < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "line item {}: unit_cost must not be negative",
                self.id
            )));
        }
        Ok(())
    }
}

impl Entity for PurchaseOrderLineItem {
    type Id = LineItemId;

    fn id(&self) -> LineItemId {
        self.id
    }
}

/// A vendor order together with the line items it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub vendor_name: String,
    pub order_date: Option<DateTime<Utc>>,
    pub expected_delivery_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub purchase_order_line_items: Vec<PurchaseOrderLineItem>,
}

impl PurchaseOrder {
    pub fn line_items(&self) -> &[PurchaseOrderLineItem] {
        &self.purchase_order_line_items
    }

    /// Check the order and every line item it owns.
    ///
    /// Fails with `InvariantViolation` when a line item points at another order,
    /// and with `Validation` when a line is invalid or the totals overflow.
    pub fn validate(&self) -> DomainResult<()> {
        for item in &self.purchase_order_line_items {
            if item.purchase_order_id != self.id {
                return Err(DomainError::invariant(format!(
                    "line item {} belongs to purchase order {}, found under {}",
                    item.id, item.purchase_order_id, self.id
                )));
            }
            item.validate()?;
        }
        checked_totals(&self.purchase_order_line_items)?;
        Ok(())
    }

    /// Ordering used by the list endpoint: expected delivery date ascending,
    /// undated orders last, ties broken by id.
    pub fn cmp_by_expected_delivery(&self, other: &Self) -> Ordering {
        cmp_optional_dates(self.expected_delivery_date, other.expected_delivery_date)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl Entity for PurchaseOrder {
    type Id = PurchaseOrderId;

    fn id(&self) -> PurchaseOrderId {
        self.id
    }
}

/// Chronological comparison where a missing date sorts after every present one.
pub fn cmp_optional_dates(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
