//! Client-side sort over the full in-memory set of summary rows.
//!
//! Rows are sorted ascending with a stable comparator and then reversed for a
//! descending request, so flipping the direction always yields the exact
//! reverse ordering.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use poview_core::DomainError;

use crate::order::cmp_optional_dates;
use crate::summary::PurchaseOrderSummary;

/// Sortable column, in heading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    VendorName,
    OrderDate,
    ExpectedDeliveryDate,
    Quantity,
    TotalCost,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Id,
        SortKey::VendorName,
        SortKey::OrderDate,
        SortKey::ExpectedDeliveryDate,
        SortKey::Quantity,
        SortKey::TotalCost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::VendorName => "vendor_name",
            SortKey::OrderDate => "order_date",
            SortKey::ExpectedDeliveryDate => "expected_delivery_date",
            SortKey::Quantity => "quantity",
            SortKey::TotalCost => "total_cost",
        }
    }

    /// Map a column heading index (0-based) to its key.
    pub fn from_heading_index(index: usize) -> Option<SortKey> {
        Self::ALL.get(index).copied()
    }

    pub fn heading_index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|k| k == self)
            .unwrap_or_default()
    }

    fn compare(&self, a: &PurchaseOrderSummary, b: &PurchaseOrderSummary) -> Ordering {
        match self {
            SortKey::Id => a.order.id.cmp(&b.order.id),
            SortKey::VendorName => cmp_text(&a.order.vendor_name, &b.order.vendor_name),
            SortKey::OrderDate => cmp_optional_dates(a.order.order_date, b.order.order_date),
            SortKey::ExpectedDeliveryDate => cmp_optional_dates(
                a.order.expected_delivery_date,
                b.order.expected_delivery_date,
            ),
            SortKey::Quantity => a.totals.quantity.cmp(&b.totals.quantity),
            SortKey::TotalCost => a.totals.total_cost.cmp(&b.totals.total_cost),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return SortKey::from_heading_index(index)
                .ok_or_else(|| DomainError::validation(format!("no sortable column at index {index}")));
        }
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::validation(format!("unknown sort key: {s}")))
    }
}

/// Sort direction. A column that was not sorted before starts descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortDirection::Ascending),
            "descending" | "desc" => Ok(SortDirection::Descending),
            other => Err(DomainError::validation(format!(
                "sort direction must be ascending or descending (got {other})"
            ))),
        }
    }
}

/// Requested sort: which column and which way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// The sort a click on `key`'s heading produces given the current one:
    /// same column flips direction, a new column starts at the default direction.
    pub fn next_for(current: Option<SortSpec>, key: SortKey) -> SortSpec {
        match current {
            Some(spec) if spec.key == key => SortSpec::new(key, spec.direction.toggled()),
            _ => SortSpec::new(key, SortDirection::default()),
        }
    }
}

/// Reorder the full row set in place.
pub fn sort_rows(rows: &mut [PurchaseOrderSummary], spec: SortSpec) {
    rows.sort_by(|a, b| spec.key.compare(a, b));
    if spec.direction == SortDirection::Descending {
        rows.reverse();
    }
}

// Case-insensitive first so "acme" and "Acme" sit together; exact compare keeps it total.
fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
