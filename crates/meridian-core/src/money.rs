//! # Money Module
//!
//! Two-decimal currency rounding for order totals.
//!
//! ## Why Round at the Boundary?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE ROUNDING-ORDER PROBLEM                                             │
//! │                                                                         │
//! │  Totals accumulate UNROUNDED and round once at the end:                │
//! │                                                                         │
//! │    line 1: 3 × $1.333..  = 3.999..  ┐                                  │
//! │    line 2: 1 × $0.005    = 0.005    ├─ sum first, round the sum        │
//! │                                     ┘                                  │
//! │                                                                         │
//! │  Rounding each line first and summing produces DIFFERENT results      │
//! │  and must not be used. Every total in the system is rounded exactly   │
//! │  once, here.                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use meridian_core::money::round_currency;
//!
//! assert_eq!(round_currency(14.499999), 14.50);
//! assert_eq!(round_currency(0.125), 0.13); // half rounds away from zero
//! ```

/// Number of minor units per major currency unit (cents per dollar).
const CURRENCY_SCALE: f64 = 100.0;

/// Rounds a monetary value to exactly two decimal places.
///
/// Uses round-half-away-from-zero (the behavior of [`f64::round`] on the
/// cent-scaled value). The same rule is applied everywhere totals are
/// produced; intermediate line values are never rounded.
///
/// Total function: every real input maps to a real output, no error
/// conditions.
///
/// ## Example
/// ```rust
/// use meridian_core::money::round_currency;
///
/// assert_eq!(round_currency(85.5), 85.50);
/// assert_eq!(round_currency(4.504999), 4.50);
/// assert_eq!(round_currency(-0.125), -0.13);
/// ```
#[inline]
pub fn round_currency(value: f64) -> f64 {
    (value * CURRENCY_SCALE).round() / CURRENCY_SCALE
}

// =============================================================================
// Unit Tests
// =============================================================================
