//! # meridian-core: Pure Business Logic for Meridian Orders
//!
//! This crate is the **heart** of Meridian Orders. It contains the order
//! pricing and consistency engine as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Meridian Orders Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                meridian-service (operations)                    │   │
//! │  │   create_customer, create_order, update_order, delete_order    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ meridian-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │ mutation  │  │ validation│  │   │
//! │  │   │ Customer  │  │  totals   │  │  patches  │  │   rules   │  │   │
//! │  │   │  Order    │  │ rounding  │  │ re-price  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 meridian-db (Database Layer)                    │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Order, OrderItem)
//! - [`money`] - Two-decimal currency rounding
//! - [`pricing`] - Derived-total computation (subtotal, discount, total)
//! - [`mutation`] - Partial-update planning and re-pricing rules
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Derived Fields Are Never Inputs**: subtotal/discount_total/total are
//!    only ever produced by [`pricing::compute_totals`], never accepted from a
//!    caller
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use meridian_core::pricing::compute_totals;
//! use meridian_core::types::OrderItem;
//!
//! let items = vec![OrderItem {
//!     name: "Widget".to_string(),
//!     quantity: 2,
//!     unit_price: 50.0,
//!     discount_percent: 10.0,
//! }];
//!
//! // 2 × $50.00, 10% off the line, then 5% off the order
//! let totals = compute_totals(&items, 5.0);
//! assert_eq!(totals.subtotal, 100.00);
//! assert_eq!(totals.discount_total, 14.50);
//! assert_eq!(totals.total, 85.50);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod mutation;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use meridian_core::Order` instead of
// `use meridian_core::types::Order`

pub use error::ValidationError;
pub use mutation::{plan_update, OrderChanges, OrderPatch};
pub use pricing::{compute_totals, OrderTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Status assigned to an order when the caller omits one (or supplies an
/// empty string).
pub const DEFAULT_ORDER_STATUS: &str = "Pending";
