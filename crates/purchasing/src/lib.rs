//! Purchasing domain module (purchase orders and their line items).
//!
//! This crate contains the read-side rules for purchase orders, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage): derived totals,
//! the client-side sort and the row selection state.

pub mod order;
pub mod selection;
pub mod sort;
pub mod summary;
pub mod totals;

pub use order::{PurchaseOrder, PurchaseOrderLineItem, cmp_optional_dates};
pub use selection::{SelectedCount, Selection};
pub use sort::{SortDirection, SortKey, SortSpec, sort_rows};
pub use summary::{PurchaseOrderSummary, summarize};
pub use totals::{
    OrderTotals, checked_line_total, checked_totals, compute_totals, line_total, parse_unit_cost,
};
