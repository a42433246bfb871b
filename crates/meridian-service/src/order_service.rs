//! # Order Service
//!
//! Order operation contracts: create, read, partial update, delete.
//!
//! ## Update Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                update_order(order_id, patch)                            │
//! │                                                                         │
//! │  fetch stored order ── missing? → NotFound                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate patch (supplied fields only)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  plan_update(stored, patch) ← mutation coordinator (meridian-core)     │
//! │       │                                                                 │
//! │       ├── empty changes → return stored order, no write, no re-price   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_changes ── single UPDATE, only the changed fields               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  return the freshly persisted order                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};
use meridian_core::validation::{
    validate_discount_percent, validate_items, validate_order_patch,
};
use meridian_core::{plan_update, Order, OrderItem, OrderPatch, ValidationError};
use meridian_db::{generate_order_id, Database, OrderFilter};

// =============================================================================
// Request / Response Shapes
// =============================================================================

/// Creation request for an order.
///
/// `status` defaults to "Pending" when omitted or empty; the discount
/// defaults to 0 and the items to an empty sequence. The derived totals are
/// not part of the request at all: they are computed, never accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    pub customer_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub order_discount_percent: f64,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Read-time shape of an order: the stored record plus the referenced
/// customer's display name, absent when the reference no longer resolves.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub customer_name: Option<String>,
}

// =============================================================================
// Order Service
// =============================================================================

/// Order operations.
#[derive(Debug, Clone)]
pub struct OrderService {
    db: Database,
}

impl OrderService {
    /// Creates a new OrderService.
    pub fn new(db: Database) -> Self {
        OrderService { db }
    }

    /// Creates an order for an existing customer.
    ///
    /// The registry guard runs first: the customer id must resolve to a
    /// stored customer, otherwise the operation fails with
    /// `invalid customer reference` and persists nothing. Totals are
    /// computed by the pricing engine from the supplied items and discount.
    pub async fn create(&self, new_order: NewOrder) -> ServiceResult<Order> {
        validate_discount_percent("order_discount_percent", new_order.order_discount_percent)?;
        validate_items(&new_order.items)?;

        // Read-then-act reference check. Not atomic against a concurrent
        // customer deletion; that race is an accepted limitation.
        if !self.db.customers().exists(&new_order.customer_id).await? {
            return Err(ValidationError::InvalidCustomerReference {
                customer_id: new_order.customer_id,
            }
            .into());
        }

        let order = Order::create(
            generate_order_id(),
            new_order.customer_id,
            new_order.status,
            new_order.order_discount_percent,
            new_order.items,
            Utc::now(),
        );

        self.db.orders().insert(&order).await?;

        info!(id = %order.id, customer_id = %order.customer_id, "Order created");
        Ok(order)
    }

    /// Gets an order by id, shaped with the referenced customer's name.
    ///
    /// No computation: the derived fields are returned exactly as last
    /// persisted. An orphaned customer reference degrades to
    /// `customer_name: None` rather than failing the read.
    pub async fn get(&self, id: &str) -> ServiceResult<OrderView> {
        let (order, customer_name) = self
            .db
            .orders()
            .get_with_customer(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Order", id))?;

        Ok(OrderView {
            order,
            customer_name,
        })
    }

    /// Lists orders newest-first with optional equality filters on status
    /// and customer reference.
    pub async fn list(&self, filter: OrderFilter) -> ServiceResult<Vec<OrderView>> {
        let rows = self.db.orders().list_with_customer(&filter).await?;

        Ok(rows
            .into_iter()
            .map(|(order, customer_name)| OrderView {
                order,
                customer_name,
            })
            .collect())
    }

    /// Applies a partial update to an order.
    ///
    /// Re-pricing happens if and only if the patch supplies items and/or
    /// the order-level discount; the omitted one falls back to the stored
    /// value. A status-only patch leaves the stored totals untouched, and
    /// an empty patch returns the order unchanged without writing.
    pub async fn update(&self, id: &str, patch: OrderPatch) -> ServiceResult<Order> {
        let current = self
            .db
            .orders()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Order", id))?;

        validate_order_patch(&patch)?;

        let changes = plan_update(&current, patch);
        if changes.is_empty() {
            debug!(id = %id, "Empty patch, returning order unchanged");
            return Ok(current);
        }

        self.db.orders().apply_changes(id, &changes, Utc::now()).await?;

        info!(id = %id, repriced = changes.totals.is_some(), "Order updated");

        self.db
            .orders()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Order", id))
    }

    /// Deletes an order by id. No side effects on the customer.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        self.db.orders().delete(id).await?;

        info!(id = %id, "Order deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer_service::CustomerService;
    use meridian_core::CustomerFields;
    use meridian_db::DbConfig;

    fn item(name: &str, quantity: i64, unit_price: f64, discount_percent: f64) -> OrderItem {
        OrderItem {
            name: name.to_string(),
            quantity,
            unit_price,
            discount_percent,
        }
    }

    async fn setup() -> (Database, CustomerService, OrderService) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (
            db.clone(),
            CustomerService::new(db.clone()),
            OrderService::new(db),
        )
    }

    async fn seeded_customer(customers: &CustomerService, email: &str) -> String {
        customers
            .create(CustomerFields {
                name: "Ada".to_string(),
                email: email.to_string(),
                phone: None,
                address: None,
                note: None,
            })
            .await
            .unwrap()
            .id
    }

    fn new_order(customer_id: &str) -> NewOrder {
        NewOrder {
            customer_id: customer_id.to_string(),
            status: None,
            order_discount_percent: 5.0,
            items: vec![item("Widget", 2, 50.0, 10.0)],
        }
    }

    #[tokio::test]
    async fn test_create_prices_and_defaults_status() {
        let (_db, customers, orders) = setup().await;
        let customer_id = seeded_customer(&customers, "ada@example.com").await;

        let order = orders.create(new_order(&customer_id)).await.unwrap();

        assert_eq!(order.status, "Pending");
        assert_eq!(order.subtotal, 100.00);
        assert_eq!(order.discount_total, 14.50);
        assert_eq!(order.total, 85.50);
    }

    #[tokio::test]
    async fn test_create_with_defaults_yields_zero_totals() {
        let (_db, customers, orders) = setup().await;
        let customer_id = seeded_customer(&customers, "ada@example.com").await;

        // Omitted status/discount/items, as a bare request would arrive.
        let request: NewOrder =
            serde_json::from_str(&format!(r#"{{"customer_id":"{customer_id}"}}"#)).unwrap();
        let order = orders.create(request).await.unwrap();

        assert_eq!(order.status, "Pending");
        assert!(order.items.is_empty());
        assert_eq!(
            (order.subtotal, order.discount_total, order.total),
            (0.0, 0.0, 0.0)
        );
    }

    #[tokio::test]
    async fn test_create_with_unknown_customer_fails_and_persists_nothing() {
        let (_db, _customers, orders) = setup().await;

        let err = orders.create(new_order("no-such-customer")).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::InvalidCustomerReference { .. })
        ));
        assert_eq!(err.to_string(), "invalid customer reference: no-such-customer");

        assert!(orders.list(OrderFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_fields() {
        let (_db, customers, orders) = setup().await;
        let customer_id = seeded_customer(&customers, "ada@example.com").await;

        let mut bad_discount = new_order(&customer_id);
        bad_discount.order_discount_percent = 120.0;
        assert!(matches!(
            orders.create(bad_discount).await.unwrap_err(),
            ServiceError::Validation(_)
        ));

        let mut bad_quantity = new_order(&customer_id);
        bad_quantity.items = vec![item("Widget", 0, 50.0, 0.0)];
        assert!(matches!(
            orders.create(bad_quantity).await.unwrap_err(),
            ServiceError::Validation(_)
        ));

        assert!(orders.list(OrderFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_only_update_never_touches_stored_totals() {
        let (db, customers, orders) = setup().await;
        let customer_id = seeded_customer(&customers, "ada@example.com").await;
        let order = orders.create(new_order(&customer_id)).await.unwrap();

        // Force the stored totals to diverge from what re-pricing would
        // produce, then prove a status-only patch leaves them byte-for-byte.
        sqlx::query("UPDATE orders SET subtotal = 999.0, discount_total = 111.0, total = 888.0 WHERE id = ?1")
            .bind(&order.id)
            .execute(db.pool())
            .await
            .unwrap();

        let updated = orders
            .update(
                &order.id,
                OrderPatch {
                    status: Some("Paid".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, "Paid");
        assert_eq!(updated.subtotal, 999.0);
        assert_eq!(updated.discount_total, 111.0);
        assert_eq!(updated.total, 888.0);
    }

    #[tokio::test]
    async fn test_discount_only_update_reprices_with_stored_items() {
        let (_db, customers, orders) = setup().await;
        let customer_id = seeded_customer(&customers, "ada@example.com").await;
        let order = orders.create(new_order(&customer_id)).await.unwrap();

        let updated = orders
            .update(
                &order.id,
                OrderPatch {
                    order_discount_percent: Some(0.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Stored items (2 × $50.00 at 10%) with the new 0% order discount.
        assert_eq!(updated.items, order.items);
        assert_eq!(updated.subtotal, 100.00);
        assert_eq!(updated.discount_total, 10.00);
        assert_eq!(updated.total, 90.00);
    }

    #[tokio::test]
    async fn test_items_only_update_reprices_with_stored_discount() {
        let (_db, customers, orders) = setup().await;
        let customer_id = seeded_customer(&customers, "ada@example.com").await;
        let order = orders.create(new_order(&customer_id)).await.unwrap();

        let updated = orders
            .update(
                &order.id,
                OrderPatch {
                    items: Some(vec![item("Gadget", 1, 40.0, 0.0)]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // New items with the stored 5% order discount.
        assert_eq!(updated.order_discount_percent, 5.0);
        assert_eq!(updated.subtotal, 40.00);
        assert_eq!(updated.discount_total, 2.00);
        assert_eq!(updated.total, 38.00);
    }

    #[tokio::test]
    async fn test_both_supplied_update_uses_both_new_values() {
        let (_db, customers, orders) = setup().await;
        let customer_id = seeded_customer(&customers, "ada@example.com").await;
        let order = orders.create(new_order(&customer_id)).await.unwrap();

        let updated = orders
            .update(
                &order.id,
                OrderPatch {
                    status: Some("Paid".to_string()),
                    order_discount_percent: Some(50.0),
                    items: Some(vec![item("Gadget", 2, 10.0, 0.0)]),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, "Paid");
        assert_eq!(updated.subtotal, 20.00);
        assert_eq!(updated.discount_total, 10.00);
        assert_eq!(updated.total, 10.00);
    }

    #[tokio::test]
    async fn test_empty_patch_is_a_noop() {
        let (_db, customers, orders) = setup().await;
        let customer_id = seeded_customer(&customers, "ada@example.com").await;
        let order = orders.create(new_order(&customer_id)).await.unwrap();

        let unchanged = orders.update(&order.id, OrderPatch::default()).await.unwrap();

        assert_eq!(unchanged.status, order.status);
        assert_eq!(unchanged.items, order.items);
        assert_eq!(unchanged.updated_at, order.updated_at, "no write happened");
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_patch_without_writing() {
        let (_db, customers, orders) = setup().await;
        let customer_id = seeded_customer(&customers, "ada@example.com").await;
        let order = orders.create(new_order(&customer_id)).await.unwrap();

        let err = orders
            .update(
                &order.id,
                OrderPatch {
                    status: Some("Paid".to_string()),
                    order_discount_percent: Some(150.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        // The valid half of the patch was not applied either.
        let stored = orders.get(&order.id).await.unwrap();
        assert_eq!(stored.order.status, "Pending");
    }

    #[tokio::test]
    async fn test_update_missing_order_is_not_found() {
        let (_db, _customers, orders) = setup().await;

        let err = orders
            .update("no-such-id", OrderPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_deleting_customer_orphans_order_reads_gracefully() {
        let (_db, customers, orders) = setup().await;
        let customer_id = seeded_customer(&customers, "ada@example.com").await;
        let order = orders.create(new_order(&customer_id)).await.unwrap();

        let view = orders.get(&order.id).await.unwrap();
        assert_eq!(view.customer_name.as_deref(), Some("Ada"));

        customers.delete(&customer_id).await.unwrap();

        let view = orders.get(&order.id).await.unwrap();
        assert_eq!(view.customer_name, None);
        assert_eq!(view.order.total, 85.50, "totals unaffected by orphaning");
    }

    #[tokio::test]
    async fn test_list_filters() {
        let (_db, customers, orders) = setup().await;
        let ada = seeded_customer(&customers, "ada@example.com").await;
        let bea = seeded_customer(&customers, "bea@example.com").await;

        orders.create(new_order(&ada)).await.unwrap();
        let mut paid = new_order(&ada);
        paid.status = Some("Paid".to_string());
        orders.create(paid).await.unwrap();
        orders.create(new_order(&bea)).await.unwrap();

        assert_eq!(orders.list(OrderFilter::default()).await.unwrap().len(), 3);

        let pending = orders
            .list(OrderFilter {
                status: Some("Pending".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(pending.len(), 2);

        let adas = orders
            .list(OrderFilter {
                customer_id: Some(ada.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(adas.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_order() {
        let (_db, customers, orders) = setup().await;
        let customer_id = seeded_customer(&customers, "ada@example.com").await;
        let order = orders.create(new_order(&customer_id)).await.unwrap();

        orders.delete(&order.id).await.unwrap();

        assert!(matches!(
            orders.get(&order.id).await.unwrap_err(),
            ServiceError::NotFound { .. }
        ));
        assert!(matches!(
            orders.delete(&order.id).await.unwrap_err(),
            ServiceError::NotFound { .. }
        ));

        // The customer is untouched by order deletion.
        assert!(customers.get(&customer_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_new_order_request_ignores_supplied_totals() {
        let (_db, customers, orders) = setup().await;
        let customer_id = seeded_customer(&customers, "ada@example.com").await;

        // A caller trying to set derived fields directly: serde drops the
        // unknown keys, and pricing computes the real values.
        let request: NewOrder = serde_json::from_str(&format!(
            r#"{{
                "customer_id": "{customer_id}",
                "items": [{{"name":"Widget","quantity":2,"unit_price":50.0,"discount_percent":10.0}}],
                "order_discount_percent": 5.0,
                "subtotal": 1.0,
                "discount_total": 1.0,
                "total": 1.0
            }}"#
        ))
        .unwrap();

        let order = orders.create(request).await.unwrap();
        assert_eq!(order.subtotal, 100.00);
        assert_eq!(order.discount_total, 14.50);
        assert_eq!(order.total, 85.50);
    }
}
