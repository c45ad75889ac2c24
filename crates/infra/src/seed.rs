//! Demo fixture served by the in-memory store when no database is configured.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use poview_core::{ItemId, LineItemId, PurchaseOrderId};
use poview_purchasing::{PurchaseOrder, PurchaseOrderLineItem};

fn day(y: i32, m: u32, d: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single()
}

fn line(id: i32, order: i32, item: i32, quantity: i32, cents: i64) -> PurchaseOrderLineItem {
    PurchaseOrderLineItem {
        id: LineItemId::new(id),
        purchase_order_id: PurchaseOrderId::new(order),
        item_id: ItemId::new(item),
        quantity,
        unit_cost: Decimal::new(cents, 2),
    }
}

/// Six orders covering the interesting shapes: several lines, a single line,
/// no lines at all, and an order without an expected delivery date.
pub fn demo_orders() -> Vec<PurchaseOrder> {
    vec![
        PurchaseOrder {
            id: PurchaseOrderId::new(1),
            vendor_name: "Northwind Traders".to_string(),
            order_date: day(2024, 1, 8),
            expected_delivery_date: day(2024, 2, 2),
            purchase_order_line_items: vec![
                line(1, 1, 101, 2, 1050),
                line(2, 1, 102, 1, 500),
                line(3, 1, 117, 12, 325),
            ],
        },
        PurchaseOrder {
            id: PurchaseOrderId::new(2),
            vendor_name: "acme supply co".to_string(),
            order_date: day(2024, 1, 3),
            expected_delivery_date: day(2024, 1, 24),
            purchase_order_line_items: vec![line(4, 2, 205, 40, 199)],
        },
        PurchaseOrder {
            id: PurchaseOrderId::new(3),
            vendor_name: "Globex Corporation".to_string(),
            order_date: day(2024, 1, 15),
            expected_delivery_date: day(2024, 3, 1),
            purchase_order_line_items: vec![
                line(5, 3, 310, 5, 12999),
                line(6, 3, 311, 5, 8950),
            ],
        },
        PurchaseOrder {
            id: PurchaseOrderId::new(4),
            vendor_name: "Initech".to_string(),
            order_date: day(2024, 1, 20),
            expected_delivery_date: day(2024, 2, 14),
            purchase_order_line_items: vec![],
        },
        PurchaseOrder {
            id: PurchaseOrderId::new(5),
            vendor_name: "Umbrella Logistics".to_string(),
            order_date: day(2024, 1, 22),
            expected_delivery_date: None,
            purchase_order_line_items: vec![line(7, 5, 412, 3, 7500), line(8, 5, 101, 0, 1050)],
        },
        PurchaseOrder {
            id: PurchaseOrderId::new(10),
            vendor_name: "Stark Industrial".to_string(),
            order_date: day(2024, 2, 1),
            expected_delivery_date: day(2024, 2, 2),
            purchase_order_line_items: vec![line(9, 10, 520, 1, 250000)],
        },
    ]
}
