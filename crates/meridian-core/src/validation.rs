//! # Validation Module
//!
//! Input validation for Meridian Orders.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Type checks (quantity is an integer, discount is a number)        │
//! │  └── Derived fields stripped from patches                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - Business rule validation                       │
//! │  ├── Field ranges (discount 0-100, quantity ≥ 1, price ≥ 0)           │
//! │  └── Required fields (name, email)                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE constraint on customers.email (the uniqueness guard)       │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use meridian_core::validation::{validate_discount_percent, validate_quantity};
//!
//! validate_discount_percent("order_discount_percent", 5.0).unwrap();
//! validate_quantity(3).unwrap();
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::mutation::OrderPatch;
use crate::types::{CustomerFields, OrderItem};

// =============================================================================
// Field Limits
// =============================================================================

/// Maximum length for customer and item names.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length for an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required, bounded text field.
fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an item quantity.
///
/// ## Rules
/// - Must be at least 1
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::MustBeAtLeast {
            field: "quantity".to_string(),
            min: 1,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (free items)
pub fn validate_unit_price(unit_price: f64) -> ValidationResult<()> {
    if !(unit_price >= 0.0) {
        return Err(ValidationError::NegativeAmount {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount percent (item-level or order-level).
///
/// ## Rules
/// - Must be within [0, 100]
pub fn validate_discount_percent(field: &str, percent: f64) -> ValidationResult<()> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: 100.0,
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates the editable fields of a customer (creation and replacement).
///
/// Email uniqueness is NOT checked here: it is enforced by the store's
/// unique index at insert time, so there is no check-then-insert race
/// window.
pub fn validate_customer_fields(fields: &CustomerFields) -> ValidationResult<()> {
    validate_text("name", &fields.name, MAX_NAME_LEN)?;
    validate_text("email", &fields.email, MAX_EMAIL_LEN)?;
    Ok(())
}

/// Validates a single order line item.
pub fn validate_item(item: &OrderItem) -> ValidationResult<()> {
    validate_text("item name", &item.name, MAX_NAME_LEN)?;
    validate_quantity(item.quantity)?;
    validate_unit_price(item.unit_price)?;
    validate_discount_percent("discount_percent", item.discount_percent)?;
    Ok(())
}

/// Validates an order's item list.
pub fn validate_items(items: &[OrderItem]) -> ValidationResult<()> {
    for item in items {
        validate_item(item)?;
    }
    Ok(())
}

/// Validates a partial order update before it is planned.
///
/// Only the supplied fields are checked; omitted fields fall back to
/// already-validated persisted values.
pub fn validate_order_patch(patch: &OrderPatch) -> ValidationResult<()> {
    if let Some(percent) = patch.order_discount_percent {
        validate_discount_percent("order_discount_percent", percent)?;
    }

    if let Some(items) = &patch.items {
        validate_items(items)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str) -> CustomerFields {
        CustomerFields {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            address: None,
            note: None,
        }
    }

    fn item(quantity: i64, unit_price: f64, discount_percent: f64) -> OrderItem {
        OrderItem {
            name: "Widget".to_string(),
            quantity,
            unit_price,
            discount_percent,
        }
    }

    #[test]
    fn test_validate_customer_fields() {
        assert!(validate_customer_fields(&fields("Ada", "ada@example.com")).is_ok());
        assert!(validate_customer_fields(&fields("", "ada@example.com")).is_err());
        assert!(validate_customer_fields(&fields("   ", "ada@example.com")).is_err());
        assert!(validate_customer_fields(&fields("Ada", "")).is_err());
        assert!(validate_customer_fields(&fields(&"A".repeat(300), "a@b.c")).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(0.0).is_ok());
        assert!(validate_unit_price(10.99).is_ok());
        assert!(validate_unit_price(-0.01).is_err());
        assert!(validate_unit_price(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_discount_percent() {
        assert!(validate_discount_percent("discount_percent", 0.0).is_ok());
        assert!(validate_discount_percent("discount_percent", 100.0).is_ok());
        assert!(validate_discount_percent("discount_percent", -0.5).is_err());
        assert!(validate_discount_percent("discount_percent", 100.5).is_err());
        assert!(validate_discount_percent("discount_percent", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_item() {
        assert!(validate_item(&item(2, 50.0, 10.0)).is_ok());
        assert!(validate_item(&item(0, 50.0, 10.0)).is_err());
        assert!(validate_item(&item(2, -1.0, 10.0)).is_err());
        assert!(validate_item(&item(2, 50.0, 101.0)).is_err());

        let nameless = OrderItem {
            name: String::new(),
            quantity: 1,
            unit_price: 1.0,
            discount_percent: 0.0,
        };
        assert!(validate_item(&nameless).is_err());
    }

    #[test]
    fn test_validate_order_patch_checks_only_supplied_fields() {
        assert!(validate_order_patch(&OrderPatch::default()).is_ok());

        let bad_discount = OrderPatch {
            order_discount_percent: Some(150.0),
            ..Default::default()
        };
        assert!(validate_order_patch(&bad_discount).is_err());

        let bad_items = OrderPatch {
            items: Some(vec![item(0, 1.0, 0.0)]),
            ..Default::default()
        };
        assert!(validate_order_patch(&bad_items).is_err());

        let status_only = OrderPatch {
            status: Some("Paid".to_string()),
            ..Default::default()
        };
        assert!(validate_order_patch(&status_only).is_ok());
    }
}
