//! Postgres-backed purchase order store.
//!
//! ## Queries
//!
//! A list is two round-trips: the orders (sorted by expected delivery date), then
//! every line item whose `purchase_order_id` is in that set. Line items are
//! grouped under their parent in memory.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database (any code) | `Database` |
//! | PoolClosed / PoolTimedOut / Io | `Unavailable` |
//! | ColumnDecode / ColumnNotFound / Decode | `InvalidRow` |
//! | Other | `Database` |

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{FromRow, Row};
use tracing::{Span, instrument};

use poview_core::{ItemId, LineItemId, PurchaseOrderId};
use poview_purchasing::{PurchaseOrder, PurchaseOrderLineItem};

use super::store::{PurchaseOrderStore, StoreError};

const SCHEMA: &str = include_str!("../../migrations/0001_purchase_orders.sql");

/// Postgres-backed read store.
///
/// `PgPool` is internally reference-counted, so the store is cheap to clone and
/// share across request handlers.
#[derive(Debug, Clone)]
pub struct PostgresPurchaseOrderStore {
    pool: PgPool,
}

impl PostgresPurchaseOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the tables and indexes if they do not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl PurchaseOrderStore for PostgresPurchaseOrderStore {
    #[instrument(
        skip(self),
        fields(
            order_count = tracing::field::Empty,
            line_item_count = tracing::field::Empty
        ),
        err
    )]
    async fn list_with_line_items(&self) -> Result<Vec<PurchaseOrder>, StoreError> {
        let span = Span::current();

        let order_rows = sqlx::query(
            r#"
            SELECT
                id,
                vendor_name,
                order_date,
                expected_delivery_date
            FROM purchase_orders
            ORDER BY expected_delivery_date ASC NULLS LAST, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_purchase_orders", e))?;

        let mut orders = Vec::with_capacity(order_rows.len());
        for row in &order_rows {
            let order = PurchaseOrderRow::from_row(row)
                .map_err(|e| StoreError::InvalidRow(format!("purchase_orders: {e}")))?;
            orders.push(order);
        }
        span.record("order_count", orders.len());

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
        let item_rows = sqlx::query(
            r#"
            SELECT
                id,
                purchase_order_id,
                item_id,
                quantity,
                unit_cost
            FROM purchase_order_line_items
            WHERE purchase_order_id = ANY($1)
            ORDER BY purchase_order_id ASC, id ASC
            "#,
        )
        .bind(order_ids.as_slice())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_purchase_order_line_items", e))?;
        span.record("line_item_count", item_rows.len());

        let mut items_by_order: HashMap<i32, Vec<PurchaseOrderLineItem>> = HashMap::new();
        for row in &item_rows {
            let item = LineItemRow::from_row(row)
                .map_err(|e| StoreError::InvalidRow(format!("purchase_order_line_items: {e}")))?;
            items_by_order
                .entry(item.purchase_order_id)
                .or_default()
                .push(item.into());
        }

        Ok(orders
            .into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect())
    }
}

/// Map SQLx errors to StoreError.
fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::Database {
            operation,
            message: match db_err.code() {
                Some(code) => format!("{} (code {})", db_err.message(), code),
                None => db_err.message().to_string(),
            },
        },
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool unavailable in {operation}"))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {operation}: {e}")),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_) => StoreError::InvalidRow(format!("{operation}: {err}")),
        other => StoreError::Database {
            operation,
            message: other.to_string(),
        },
    }
}

// SQLx row types

#[derive(Debug)]
struct PurchaseOrderRow {
    id: i32,
    vendor_name: String,
    order_date: Option<DateTime<Utc>>,
    expected_delivery_date: Option<DateTime<Utc>>,
}

impl<'r> FromRow<'r, PgRow> for PurchaseOrderRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(PurchaseOrderRow {
            id: row.try_get("id")?,
            vendor_name: row.try_get("vendor_name")?,
            order_date: row.try_get("order_date")?,
            expected_delivery_date: row.try_get("expected_delivery_date")?,
        })
    }
}

impl PurchaseOrderRow {
    fn into_order(self, items: Vec<PurchaseOrderLineItem>) -> PurchaseOrder {
        PurchaseOrder {
            id: PurchaseOrderId::new(self.id),
            vendor_name: self.vendor_name,
            order_date: self.order_date,
            expected_delivery_date: self.expected_delivery_date,
            purchase_order_line_items: items,
        }
    }
}

#[derive(Debug)]
struct LineItemRow {
    id: i32,
    purchase_order_id: i32,
    item_id: i32,
    quantity: i32,
    unit_cost: Decimal,
}

impl<'r> FromRow<'r, PgRow> for LineItemRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(LineItemRow {
            id: row.try_get("id")?,
            purchase_order_id: row.try_get("purchase_order_id")?,
            item_id: row.try_get("item_id")?,
            quantity: row.try_get("quantity")?,
            unit_cost: row.try_get("unit_cost")?,
        })
    }
}

impl From<LineItemRow> for PurchaseOrderLineItem {
    fn from(row: LineItemRow) -> Self {
        PurchaseOrderLineItem {
            id: LineItemId::new(row.id),
            purchase_order_id: PurchaseOrderId::new(row.purchase_order_id),
            item_id: ItemId::new(row.item_id),
            quantity: row.quantity,
            unit_cost: row.unit_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_map_to_unavailable() {
        assert!(matches!(
            map_sqlx_error("list_purchase_orders", sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error("list_purchase_orders", sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn decode_errors_map_to_invalid_row() {
        let err = map_sqlx_error(
            "list_purchase_orders",
            sqlx::Error::ColumnNotFound("vendor_name".to_string()),
        );
        match err {
            StoreError::InvalidRow(msg) => assert!(msg.contains("vendor_name")),
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn bundled_schema_defines_both_tables() {
        assert!(SCHEMA.contains("CREATE TABLE IF NOT EXISTS purchase_orders"));
        assert!(SCHEMA.contains("REFERENCES purchase_orders (id)"));
        assert!(SCHEMA.contains("CHECK (quantity >= 0)"));
    }

    // Requires a live database: `POVIEW_TEST_DATABASE_URL=postgres://... cargo test -- --ignored`
    #[tokio::test]
    #[ignore]
    async fn lists_rows_from_a_live_database() {
        let Ok(url) = std::env::var("POVIEW_TEST_DATABASE_URL") else {
            return;
        };
        let store = PostgresPurchaseOrderStore::connect(&url, 2).await.unwrap();
        store.ensure_schema().await.unwrap();

        let orders = store.list_with_line_items().await.unwrap();
        for pair in orders.windows(2) {
            assert_ne!(
                pair[0].cmp_by_expected_delivery(&pair[1]),
                std::cmp::Ordering::Greater
            );
        }
        for order in &orders {
            order.validate().unwrap();
        }
    }
}
