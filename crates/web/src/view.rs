//! View models handed to the templates.
//!
//! Everything is pre-formatted here so the templates only lay out strings.

use serde::Serialize;

use poview_purchasing::{
    PurchaseOrderLineItem, PurchaseOrderSummary, SelectedCount, Selection, SortKey, SortSpec,
    line_total,
};

use crate::fetch::FetchError;
use crate::format::{
    format_currency, format_date, format_plain_money, format_stored_money,
};

pub const INDEX_PATH: &str = "/purchase-orders";
pub const PLAIN_PATH: &str = "/purchase-orders/plain";

/// Message shown above the table when the list could not be loaded.
pub fn fetch_notice(error: &FetchError) -> String {
    format!("Purchase orders could not be loaded ({error}). Showing an empty list.")
}

/// Link to the index table with the given sort and selection.
pub fn index_href(sort: Option<SortSpec>, selection: &Selection) -> String {
    let mut params = Vec::new();
    if let Some(spec) = sort {
        params.push(format!("sort={}", spec.key));
        params.push(format!("direction={}", spec.direction));
    }
    if !selection.is_empty() {
        params.push(format!("selected={selection}"));
    }

    if params.is_empty() {
        INDEX_PATH.to_string()
    } else {
        format!("{INDEX_PATH}?{}", params.join("&"))
    }
}

fn heading_title(key: SortKey) -> &'static str {
    match key {
        SortKey::Id => "Order",
        SortKey::VendorName => "Vendor",
        SortKey::OrderDate => "Order Date",
        SortKey::ExpectedDeliveryDate => "Expected Delivery Date",
        SortKey::Quantity => "Quantity",
        SortKey::TotalCost => "Total Cost",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadingView {
    pub title: &'static str,
    /// Numeric and date columns are right-aligned.
    pub align_end: bool,
    /// Clicking the heading applies this sort.
    pub href: String,
    /// `ascending` / `descending` when this column is the active sort.
    pub sorted: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineItemView {
    pub item_id: i32,
    pub unit_cost: String,
    pub quantity: i32,
    pub total_cost: String,
}

impl LineItemView {
    fn new(item: &PurchaseOrderLineItem) -> Self {
        Self {
            item_id: item.item_id.get(),
            unit_cost: format_currency(item.unit_cost),
            quantity: item.quantity,
            total_cost: format_currency(line_total(item)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexRowView {
    pub id: i32,
    pub vendor_name: String,
    pub order_date: String,
    pub expected_delivery_date: String,
    pub quantity: i64,
    pub total_cost: String,
    pub selected: bool,
    /// Link that flips this row's selection.
    pub toggle_href: String,
    /// Filled only for selected rows.
    pub line_items: Vec<LineItemView>,
}

/// The sortable, selectable index table.
#[derive(Debug, Clone, Serialize)]
pub struct IndexTableView {
    pub headings: Vec<HeadingView>,
    pub rows: Vec<IndexRowView>,
    pub item_count: usize,
    pub resource_name: &'static str,
    pub selected_count: String,
    pub any_selected: bool,
    pub select_all_href: String,
    pub clear_href: String,
    pub plain_href: &'static str,
    pub notice: Option<String>,
}

impl IndexTableView {
    /// `rows` must already be in display order; `selection` is expected to hold
    /// visible ids only.
    pub fn build(
        rows: &[PurchaseOrderSummary],
        sort: Option<SortSpec>,
        selection: &Selection,
        notice: Option<String>,
    ) -> Self {
        let headings = SortKey::ALL
            .into_iter()
            .map(|key| HeadingView {
                title: heading_title(key),
                align_end: !matches!(key, SortKey::Id | SortKey::VendorName),
                href: index_href(Some(SortSpec::next_for(sort, key)), selection),
                sorted: sort
                    .filter(|spec| spec.key == key)
                    .map(|spec| spec.direction.as_str()),
            })
            .collect();

        let table_rows = rows
            .iter()
            .map(|row| {
                let order = &row.order;
                let selected = selection.is_selected(order.id);
                IndexRowView {
                    id: order.id.get(),
                    vendor_name: order.vendor_name.clone(),
                    order_date: format_date(order.order_date),
                    expected_delivery_date: format_date(order.expected_delivery_date),
                    quantity: row.totals.quantity,
                    total_cost: format_currency(row.totals.total_cost),
                    selected,
                    toggle_href: index_href(sort, &selection.toggled(order.id)),
                    line_items: if selected {
                        order.line_items().iter().map(LineItemView::new).collect()
                    } else {
                        Vec::new()
                    },
                }
            })
            .collect();

        let mut all = Selection::new();
        all.select_all(rows);
        let count = selection.count(rows);

        Self {
            headings,
            rows: table_rows,
            item_count: rows.len(),
            resource_name: if rows.len() == 1 { "order" } else { "orders" },
            selected_count: count.to_string(),
            any_selected: count != SelectedCount::Some(0),
            select_all_href: index_href(sort, &all),
            clear_href: index_href(sort, &Selection::new()),
            plain_href: PLAIN_PATH,
            notice,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlainLineItemView {
    pub item_id: i32,
    pub quantity: i32,
    pub unit_cost: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlainRowView {
    pub id: i32,
    pub vendor_name: String,
    pub expected_delivery_date: String,
    pub order_date: String,
    pub total_cost: String,
    pub quantity: i64,
    pub line_items: Vec<PlainLineItemView>,
}

/// The plain HTML table: every order with all of its line items inline.
#[derive(Debug, Clone, Serialize)]
pub struct PlainTableView {
    pub rows: Vec<PlainRowView>,
    pub index_href: &'static str,
    pub notice: Option<String>,
}

impl PlainTableView {
    pub fn build(rows: &[PurchaseOrderSummary], notice: Option<String>) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                let order = &row.order;
                PlainRowView {
                    id: order.id.get(),
                    vendor_name: order.vendor_name.clone(),
                    expected_delivery_date: format_date(order.expected_delivery_date),
                    order_date: format_date(order.order_date),
                    total_cost: format_plain_money(row.totals.total_cost),
                    quantity: row.totals.quantity,
                    line_items: order
                        .line_items()
                        .iter()
                        .map(|item| PlainLineItemView {
                            item_id: item.item_id.get(),
                            quantity: item.quantity,
                            unit_cost: format_stored_money(item.unit_cost),
                        })
                        .collect(),
                }
            })
            .collect();

        Self {
            rows,
            index_href: INDEX_PATH,
            notice,
        }
    }
}
