//! # Pricing Engine
//!
//! The deterministic computation of an order's derived totals.
//!
//! ## Computation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Totals Are Computed                              │
//! │                                                                         │
//! │  for each item:                                                        │
//! │    line_subtotal = quantity × unit_price                               │
//! │    line_discount = line_subtotal × item_discount% / 100                │
//! │        │                                                                │
//! │        ▼  (unrounded accumulation)                                     │
//! │  subtotal            = Σ line_subtotal                                 │
//! │  item_discount_total = Σ line_discount                                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  after_item_discounts = subtotal − item_discount_total                 │
//! │  order_discount       = after_item_discounts × order_discount% / 100  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  discount_total = item_discount_total + order_discount                 │
//! │  total          = after_item_discounts − order_discount                │
//! │        │                                                                │
//! │        ▼  (round ONCE, each output independently)                      │
//! │  OrderTotals { subtotal, discount_total, total }                       │
//! │                                                                         │
//! │  Rounding each line first and summing produces different results      │
//! │  and must not be used.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::round_currency;
use crate::types::OrderItem;

// =============================================================================
// Order Totals
// =============================================================================

/// The derived monetary fields of an order, at two-decimal precision.
///
/// Only ever produced by [`compute_totals`]; never accepted as caller input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of quantity × unit_price across all items, before any discount.
    pub subtotal: f64,

    /// Item-level discounts plus the order-level discount.
    pub discount_total: f64,

    /// subtotal − discount_total.
    pub total: f64,
}

impl OrderTotals {
    /// Totals of an order with no items.
    pub const ZERO: OrderTotals = OrderTotals {
        subtotal: 0.0,
        discount_total: 0.0,
        total: 0.0,
    };
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// Computes (subtotal, discount_total, total) for a sequence of items and an
/// order-level discount percent.
///
/// Pure and deterministic: no side effects, no error conditions for
/// well-formed numeric input. Range validation of the discount is the
/// caller's responsibility (see [`crate::validation`]).
///
/// Intermediate values accumulate unrounded; the three outputs are rounded
/// independently at the end and nowhere else.
///
/// ## Example
/// ```rust
/// use meridian_core::pricing::compute_totals;
/// use meridian_core::types::OrderItem;
///
/// let items = vec![OrderItem {
///     name: "Widget".to_string(),
///     quantity: 2,
///     unit_price: 50.0,
///     discount_percent: 10.0,
/// }];
///
/// let totals = compute_totals(&items, 5.0);
/// assert_eq!((totals.subtotal, totals.discount_total, totals.total), (100.0, 14.5, 85.5));
/// ```
pub fn compute_totals(items: &[OrderItem], order_discount_percent: f64) -> OrderTotals {
    let mut subtotal = 0.0_f64;
    let mut item_discount_total = 0.0_f64;

    for item in items {
        let line_subtotal = item.quantity as f64 * item.unit_price;
        let line_discount = line_subtotal * (item.discount_percent / 100.0);
        subtotal += line_subtotal;
        item_discount_total += line_discount;
    }

    let after_item_discounts = subtotal - item_discount_total;
    let order_discount = after_item_discounts * (order_discount_percent / 100.0);
    let discount_total = item_discount_total + order_discount;
    let total = after_item_discounts - order_discount;

    OrderTotals {
        subtotal: round_currency(subtotal),
        discount_total: round_currency(discount_total),
        total: round_currency(total),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::round_currency;

    fn item(name: &str, quantity: i64, unit_price: f64, discount_percent: f64) -> OrderItem {
        OrderItem {
            name: name.to_string(),
            quantity,
            unit_price,
            discount_percent,
        }
    }

    #[test]
    fn test_worked_example() {
        // 2 × $50.00 with 10% line discount, then 5% order discount:
        // line_subtotal 100.00, line_discount 10.00, after_item 90.00,
        // order_discount 4.50 → (100.00, 14.50, 85.50)
        let totals = compute_totals(&[item("Widget", 2, 50.0, 10.0)], 5.0);
        assert_eq!(totals.subtotal, 100.00);
        assert_eq!(totals.discount_total, 14.50);
        assert_eq!(totals.total, 85.50);
    }

    #[test]
    fn test_empty_items_yield_zeros_for_any_discount() {
        for pct in [0.0, 5.0, 50.0, 100.0] {
            assert_eq!(compute_totals(&[], pct), OrderTotals::ZERO);
        }
    }

    #[test]
    fn test_no_discounts() {
        let totals = compute_totals(
            &[item("A", 3, 2.50, 0.0), item("B", 1, 10.00, 0.0)],
            0.0,
        );
        assert_eq!(totals.subtotal, 17.50);
        assert_eq!(totals.discount_total, 0.00);
        assert_eq!(totals.total, 17.50);
    }

    #[test]
    fn test_item_discounts_only() {
        // 4 × $25.00 at 25% off: subtotal 100, discount 25, total 75
        let totals = compute_totals(&[item("A", 4, 25.0, 25.0)], 0.0);
        assert_eq!(totals.subtotal, 100.00);
        assert_eq!(totals.discount_total, 25.00);
        assert_eq!(totals.total, 75.00);
    }

    #[test]
    fn test_order_discount_applies_after_item_discounts() {
        // 1 × $200.00 at 50% off → after_item 100.00; 10% order discount
        // is taken from 100.00, not 200.00.
        let totals = compute_totals(&[item("A", 1, 200.0, 50.0)], 10.0);
        assert_eq!(totals.subtotal, 200.00);
        assert_eq!(totals.discount_total, 110.00);
        assert_eq!(totals.total, 90.00);
    }

    #[test]
    fn test_full_order_discount() {
        let totals = compute_totals(&[item("A", 2, 9.99, 0.0)], 100.0);
        assert_eq!(totals.subtotal, 19.98);
        assert_eq!(totals.discount_total, 19.98);
        assert_eq!(totals.total, 0.00);
    }

    #[test]
    fn test_rounding_happens_after_accumulation() {
        // Three lines of 1 × $0.333 at 0%: unrounded sum 0.999 rounds to
        // 1.00. Per-line rounding (0.33 × 3 = 0.99) would disagree, which
        // is exactly the ordering this pins down.
        let items = vec![
            item("A", 1, 0.333, 0.0),
            item("B", 1, 0.333, 0.0),
            item("C", 1, 0.333, 0.0),
        ];
        let totals = compute_totals(&items, 0.0);
        assert_eq!(totals.subtotal, 1.00);
        assert_eq!(totals.total, 1.00);
    }

    #[test]
    fn test_total_matches_rounded_difference() {
        let cases: &[(Vec<OrderItem>, f64)] = &[
            (vec![item("A", 2, 50.0, 10.0)], 5.0),
            (vec![item("A", 3, 19.99, 15.0), item("B", 1, 4.25, 0.0)], 7.5),
            (vec![item("A", 7, 1.01, 33.0)], 12.0),
        ];

        for (items, pct) in cases {
            let totals = compute_totals(items, *pct);
            assert_eq!(
                totals.total,
                round_currency(totals.subtotal - totals.discount_total),
                "items={items:?} pct={pct}"
            );
        }
    }
}
