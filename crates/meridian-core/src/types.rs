//! # Domain Types
//!
//! Core domain types used throughout Meridian Orders.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐       ┌─────────────────────────────────┐         │
//! │  │    Customer     │       │             Order               │         │
//! │  │  ─────────────  │       │  ─────────────────────────────  │         │
//! │  │  id (UUID)      │◄──────│  customer_id (set at creation,  │         │
//! │  │  name           │       │               immutable)        │         │
//! │  │  email (UNIQUE) │       │  status ("Pending", ...)        │         │
//! │  │  phone?         │       │  order_discount_percent         │         │
//! │  │  address?       │       │  items: Vec<OrderItem>          │         │
//! │  │  note?          │       │  subtotal      ┐                │         │
//! │  └─────────────────┘       │  discount_total├─ derived, only │         │
//! │                            │  total         ┘  the pricing   │         │
//! │  ┌─────────────────┐       │                    engine writes│         │
//! │  │   OrderItem     │       └─────────────────────────────────┘         │
//! │  │  ─────────────  │                                                   │
//! │  │  name           │  Value object: no id, no lifecycle of its own.   │
//! │  │  quantity ≥ 1   │  Replaced wholesale whenever the order's item    │
//! │  │  unit_price ≥ 0 │  list is replaced.                               │
//! │  │  discount %     │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Referential Integrity
//! An order references exactly one customer by id. The reference is checked
//! at order creation and never again: deleting a customer leaves existing
//! orders in place with an orphaned reference (tolerated, not repaired).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing::compute_totals;
use crate::DEFAULT_ORDER_STATUS;

// =============================================================================
// Order Status Vocabulary
// =============================================================================

/// Documented order status values.
///
/// ## Why Not an Enum?
/// The status vocabulary (Pending/Paid/Shipped/Cancelled) is advisory: it is
/// stored and compared as text and the engine does not validate transitions
/// or reject values outside the set. Callers that want a closed set can
/// enforce one above this layer.
pub mod status {
    pub const PENDING: &str = "Pending";
    pub const PAID: &str = "Paid";
    pub const SHIPPED: &str = "Shipped";
    pub const CANCELLED: &str = "Cancelled";
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer full name.
    pub name: String,

    /// Email address, unique across all customers (case-sensitive as stored).
    pub email: String,

    /// Phone number.
    pub phone: Option<String>,

    /// Mailing address.
    pub address: Option<String>,

    /// Internal note.
    pub note: Option<String>,

    /// When the customer was created.
    pub created_at: DateTime<Utc>,

    /// When the customer was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The editable fields of a customer.
///
/// Used both for creation and for update: a customer update is a full
/// replacement of these fields, never a partial patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerFields {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl Customer {
    /// Builds a customer from its editable fields.
    ///
    /// Pure: the caller supplies identity and clock.
    pub fn from_fields(id: String, fields: CustomerFields, now: DateTime<Utc>) -> Self {
        Customer {
            id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            address: fields.address,
            note: fields.note,
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item embedded inside an order.
///
/// Value object: it has no identity and no lifecycle of its own. The
/// containing order's item list is replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Item name/description.
    pub name: String,

    /// Quantity of the item (must be >= 1).
    pub quantity: i64,

    /// Unit price (must be >= 0).
    pub unit_price: f64,

    /// Discount percent applied to this line (0-100).
    #[serde(default)]
    pub discount_percent: f64,
}

// =============================================================================
// Order
// =============================================================================

/// An order: a customer reference, status, discount, items, and derived
/// totals.
///
/// ## Derived-Field Invariant
/// At every observable state, `subtotal`, `discount_total`, and `total` are
/// exactly what [`compute_totals`] produces for the current `items` and
/// `order_discount_percent`, and `total = subtotal - discount_total` at
/// two-decimal precision. The fields are never independently settable:
/// [`Order::create`] computes them, the mutation coordinator recomputes
/// them, and the update boundary strips any externally supplied values
/// (see [`crate::mutation::OrderPatch`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Reference to the owning customer's id. Set at creation, immutable
    /// thereafter; may dangle after the customer is deleted.
    pub customer_id: String,

    /// Status text. See [`status`] for the documented vocabulary.
    pub status: String,

    /// Discount percent applied to the whole order after item-level
    /// discounts (0-100).
    pub order_discount_percent: f64,

    /// Ordered line items.
    pub items: Vec<OrderItem>,

    /// Derived: sum of quantity × unit_price across items.
    pub subtotal: f64,

    /// Derived: item-level discounts plus the order-level discount.
    pub discount_total: f64,

    /// Derived: subtotal minus discount_total.
    pub total: f64,

    /// When the order was created. Listings sort on this, newest first.
    pub created_at: DateTime<Utc>,

    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new order with freshly computed derived fields.
    ///
    /// Status defaults to [`DEFAULT_ORDER_STATUS`] when omitted or empty.
    /// The caller is responsible for having resolved `customer_id` to a
    /// live customer (the registry guard) and for having validated the
    /// items and discount beforehand.
    ///
    /// Pure: the caller supplies identity and clock.
    pub fn create(
        id: String,
        customer_id: String,
        status: Option<String>,
        order_discount_percent: f64,
        items: Vec<OrderItem>,
        now: DateTime<Utc>,
    ) -> Self {
        let status = status
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ORDER_STATUS.to_string());

        let totals = compute_totals(&items, order_discount_percent);

        Order {
            id,
            customer_id,
            status,
            order_discount_percent,
            items,
            subtotal: totals.subtotal,
            discount_total: totals.discount_total,
            total: totals.total,
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
