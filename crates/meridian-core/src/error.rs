//! # Error Types
//!
//! Domain-specific error types for meridian-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  meridian-core errors (this file)                                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  meridian-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  meridian-service errors (separate crate)                              │
//! │  └── ServiceError     - What callers see (Validation | NotFound | Db)  │
//! │                                                                         │
//! │  Flow: ValidationError ─┐                                              │
//! │        DbError ─────────┴──► ServiceError ──► caller                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, value, range)
//! 3. Errors are enum variants, never String
//! 4. Validation failures are surfaced to the caller, never retried

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// They are always surfaced to the caller; nothing is silently defaulted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is outside its allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Integer value is below its minimum.
    #[error("{field} must be at least {min}")]
    MustBeAtLeast { field: String, min: i64 },

    /// Monetary value is negative.
    #[error("{field} must not be negative")]
    NegativeAmount { field: String },

    /// Another customer already owns this email address.
    ///
    /// ## When This Occurs
    /// - Creating a customer with an email that is already stored
    /// - Replacing a customer's fields with another customer's email
    #[error("duplicate email: {email}")]
    DuplicateEmail { email: String },

    /// An order names a customer id that does not resolve.
    ///
    /// ## When This Occurs
    /// - Creating an order for a customer that was never created
    /// - Creating an order for a customer that has been deleted
    #[error("invalid customer reference: {customer_id}")]
    InvalidCustomerReference { customer_id: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(err.to_string(), "discount_percent must be between 0 and 100");
    }

    #[test]
    fn test_guard_error_messages() {
        let err = ValidationError::DuplicateEmail {
            email: "a@example.com".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate email: a@example.com");

        let err = ValidationError::InvalidCustomerReference {
            customer_id: "missing-id".to_string(),
        };
        assert_eq!(err.to_string(), "invalid customer reference: missing-id");
    }
}
