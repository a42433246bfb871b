//! # Order Repository
//!
//! Database operations for orders.
//!
//! ## Storage Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How an Order Is Stored                               │
//! │                                                                         │
//! │  orders row                                                             │
//! │  ├── customer_id  ──── plain text, NO foreign key: deleting the        │
//! │  │                     customer leaves this dangling on purpose        │
//! │  ├── items        ──── JSON array of line items (value objects,        │
//! │  │                     replaced wholesale on update)                   │
//! │  ├── subtotal / discount_total / total ── derived, written only       │
//! │  │                     alongside the inputs they were computed from    │
//! │  └── created_at   ──── listings sort on this, newest first            │
//! │                                                                         │
//! │  Reads LEFT JOIN customers to attach the display name; an orphaned    │
//! │  reference reads back as customer_name = NULL, never as a failure.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use meridian_core::{Order, OrderChanges, OrderItem};

/// Optional equality filters for order listings.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<String>,
    pub customer_id: Option<String>,
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

/// Row shape for the orders table joined with the owning customer's name.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    customer_id: String,
    status: String,
    order_discount_percent: f64,
    items: String,
    subtotal: f64,
    discount_total: f64,
    total: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    customer_name: Option<String>,
}

impl OrderRow {
    /// Decodes the row, parsing the JSON items column.
    fn into_order(self) -> DbResult<(Order, Option<String>)> {
        let items: Vec<OrderItem> =
            serde_json::from_str(&self.items).map_err(|e| DbError::invalid_json("items", e))?;

        let order = Order {
            id: self.id,
            customer_id: self.customer_id,
            status: self.status,
            order_discount_percent: self.order_discount_percent,
            items,
            subtotal: self.subtotal,
            discount_total: self.discount_total,
            total: self.total,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };

        Ok((order, self.customer_name))
    }
}

/// Shared SELECT prefix: order columns plus the joined customer name.
const SELECT_ORDER: &str = r#"
    SELECT
        o.id,
        o.customer_id,
        o.status,
        o.order_discount_percent,
        o.items,
        o.subtotal,
        o.discount_total,
        o.total,
        o.created_at,
        o.updated_at,
        c.name AS customer_name
    FROM orders o
    LEFT JOIN customers c ON c.id = o.customer_id
"#;

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a new order.
    ///
    /// The order arrives fully priced; this method persists it verbatim.
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        debug!(id = %order.id, customer_id = %order.customer_id, "Inserting order");

        let items_json = encode_items(&order.items)?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_id, status, order_discount_percent, items,
                subtotal, discount_total, total,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(&order.status)
        .bind(order.order_discount_percent)
        .bind(items_json)
        .bind(order.subtotal)
        .bind(order.discount_total)
        .bind(order.total)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets an order by id, without the joined customer name.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        Ok(self
            .get_with_customer(id)
            .await?
            .map(|(order, _name)| order))
    }

    /// Gets an order by id together with the referenced customer's display
    /// name, or `None` for the name if the reference no longer resolves.
    pub async fn get_with_customer(
        &self,
        id: &str,
    ) -> DbResult<Option<(Order, Option<String>)>> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("{SELECT_ORDER} WHERE o.id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(OrderRow::into_order).transpose()
    }

    /// Lists orders newest-first, with optional equality filters on status
    /// and customer reference. Each order carries the referenced customer's
    /// name when it still resolves.
    pub async fn list_with_customer(
        &self,
        filter: &OrderFilter,
    ) -> DbResult<Vec<(Order, Option<String>)>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_ORDER);
        query.push(" WHERE 1 = 1");

        if let Some(status) = &filter.status {
            query.push(" AND o.status = ").push_bind(status);
        }
        if let Some(customer_id) = &filter.customer_id {
            query.push(" AND o.customer_id = ").push_bind(customer_id);
        }

        query.push(" ORDER BY o.created_at DESC");

        let rows: Vec<OrderRow> = query.build_query_as().fetch_all(&self.pool).await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    /// Persists a planned update: only the fields the mutation coordinator
    /// marked as changed, in a single statement (all applied or none).
    ///
    /// ## Returns
    /// * `Ok(())` - Update applied
    /// * `Err(DbError::NotFound)` - Order doesn't exist
    pub async fn apply_changes(
        &self,
        id: &str,
        changes: &OrderChanges,
        now: DateTime<Utc>,
    ) -> DbResult<()> {
        debug!(
            id = %id,
            repriced = changes.totals.is_some(),
            "Applying order changes"
        );

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE orders SET updated_at = ");
        query.push_bind(now);

        if let Some(status) = &changes.status {
            query.push(", status = ").push_bind(status);
        }
        if let Some(percent) = changes.order_discount_percent {
            query.push(", order_discount_percent = ").push_bind(percent);
        }
        if let Some(items) = &changes.items {
            query.push(", items = ").push_bind(encode_items(items)?);
        }
        if let Some(totals) = &changes.totals {
            query.push(", subtotal = ").push_bind(totals.subtotal);
            query.push(", discount_total = ").push_bind(totals.discount_total);
            query.push(", total = ").push_bind(totals.total);
        }

        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    /// Deletes an order by id. No side effects on the customer.
    ///
    /// ## Returns
    /// * `Ok(())` - Order deleted
    /// * `Err(DbError::NotFound)` - Order doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }
}

/// Serializes line items for the JSON column.
fn encode_items(items: &[OrderItem]) -> DbResult<String> {
    serde_json::to_string(items).map_err(|e| DbError::invalid_json("items", e))
}

/// Helper to generate a new order ID.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
