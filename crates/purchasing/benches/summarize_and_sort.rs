use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use poview_core::{ItemId, LineItemId, PurchaseOrderId};
use poview_purchasing::{
    sort_rows, summarize, PurchaseOrder, PurchaseOrderLineItem, SortDirection, SortKey, SortSpec,
};

fn make_orders(count: usize, lines_per_order: usize) -> Vec<PurchaseOrder> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let id = PurchaseOrderId::new(i as i32 + 1);
            PurchaseOrder {
                id,
                vendor_name: format!("Vendor {:04}", (i * 7919) % count),
                order_date: Some(base + Duration::days((i % 90) as i64)),
                expected_delivery_date: Some(base + Duration::days((i * 31 % 365) as i64)),
                purchase_order_line_items: (0..lines_per_order)
                    .map(|n| PurchaseOrderLineItem {
                        id: LineItemId::new((i * lines_per_order + n) as i32 + 1),
                        purchase_order_id: id,
                        item_id: ItemId::new(n as i32),
                        quantity: ((i + n) % 50) as i32,
                        unit_cost: Decimal::new(((i * 13 + n) % 100_000) as i64, 2),
                    })
                    .collect(),
            }
        })
        .collect()
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");

    for count in [100usize, 1_000, 10_000] {
        let orders = make_orders(count, 8);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &orders, |b, orders| {
            b.iter(|| summarize(black_box(orders.clone())));
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_rows");
    let rows = summarize(make_orders(10_000, 8));

    for key in [SortKey::VendorName, SortKey::ExpectedDeliveryDate, SortKey::TotalCost] {
        group.bench_with_input(BenchmarkId::from_parameter(key), &rows, |b, rows| {
            b.iter(|| {
                let mut rows = rows.clone();
                sort_rows(&mut rows, SortSpec::new(key, SortDirection::Descending));
                black_box(rows)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_summarize, bench_sort);
criterion_main!(benches);
