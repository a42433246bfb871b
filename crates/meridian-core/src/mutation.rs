//! # Mutation Coordinator
//!
//! Plans a partial order update: which fields change, and whether the
//! derived totals must be recomputed.
//!
//! ## The Re-pricing Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              When Does an Update Re-price the Order?                    │
//! │                                                                         │
//! │  Patch supplies…          Recompute?   Inputs to the pricing engine    │
//! │  ───────────────────────  ──────────   ─────────────────────────────   │
//! │  nothing                  no           (no-op, order unchanged)        │
//! │  status only              no           (totals byte-for-byte as-is)    │
//! │  discount only            YES          new discount + STORED items     │
//! │  items only               YES          new items + STORED discount     │
//! │  discount + items         YES          both new values                 │
//! │                                                                         │
//! │  The asymmetric fallback is the load-bearing part: an omitted field   │
//! │  falls back to the order's persisted value, never to zero/empty.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::pricing::{compute_totals, OrderTotals};
use crate::types::{Order, OrderItem};

// =============================================================================
// Order Patch
// =============================================================================

/// A partial update to an order: zero or more of status, order-level
/// discount, and the item list.
///
/// ## Derived-Field Immutability
/// This is the boundary that parses external update requests. Only the
/// three mutable fields exist here, so any externally supplied `subtotal`,
/// `discount_total`, or `total` is dropped during deserialization rather
/// than trusted. The customer reference is likewise absent: it is immutable
/// after creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderPatch {
    pub status: Option<String>,
    pub order_discount_percent: Option<f64>,
    pub items: Option<Vec<OrderItem>>,
}

impl OrderPatch {
    /// True when the patch supplies no recognized fields at all.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.order_discount_percent.is_none() && self.items.is_none()
    }
}

// =============================================================================
// Order Changes
// =============================================================================

/// The merged field set to persist for an update: only the fields the patch
/// actually supplied, plus freshly computed totals when re-pricing was
/// triggered.
#[derive(Debug, Clone, Default)]
pub struct OrderChanges {
    pub status: Option<String>,
    pub order_discount_percent: Option<f64>,
    pub items: Option<Vec<OrderItem>>,
    pub totals: Option<OrderTotals>,
}

impl OrderChanges {
    /// True when there is nothing to persist.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.order_discount_percent.is_none()
            && self.items.is_none()
            && self.totals.is_none()
    }
}

// =============================================================================
// Update Planning
// =============================================================================

/// Decides what an update changes and recomputes totals when required.
///
/// Recomputation triggers if and only if the patch supplies a new item list
/// and/or a new order-level discount. Whichever of the two the patch did
/// *not* supply is taken from the order's current persisted value. A
/// status-only patch leaves the derived fields untouched, even if
/// recomputing would yield a different value than stored. An empty patch
/// yields empty changes.
///
/// Pure: the current order is read, never modified.
pub fn plan_update(current: &Order, patch: OrderPatch) -> OrderChanges {
    let reprice = patch.items.is_some() || patch.order_discount_percent.is_some();

    let mut changes = OrderChanges {
        status: patch.status,
        order_discount_percent: patch.order_discount_percent,
        items: patch.items,
        totals: None,
    };

    if reprice {
        let items = changes.items.as_deref().unwrap_or(&current.items);
        let discount = changes
            .order_discount_percent
            .unwrap_or(current.order_discount_percent);
        changes.totals = Some(compute_totals(items, discount));
    }

    changes
}

// =============================================================================
// Unit Tests
// =============================================================================
