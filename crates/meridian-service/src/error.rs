//! # Service Error Types
//!
//! The caller-visible error taxonomy.
//!
//! ## Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Caller-Visible Outcomes                              │
//! │                                                                         │
//! │  Validation  - duplicate email, invalid customer reference,            │
//! │                out-of-range field (discount outside [0,100],           │
//! │                quantity < 1). Surfaced, never retried.                 │
//! │                                                                         │
//! │  NotFound    - the target id does not resolve. Surfaced, never         │
//! │                retried.                                                 │
//! │                                                                         │
//! │  Db          - infrastructure failure (connection, migration, query).  │
//! │                                                                         │
//! │  No failure is swallowed or defaulted, and there is no partial         │
//! │  success: an update either fully applies or fails before any field    │
//! │  is persisted.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use meridian_core::ValidationError;
use meridian_db::DbError;

/// Errors surfaced by the service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller input violates a business rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The operation targets an id that does not resolve.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The persistence collaborator failed.
    #[error(transparent)]
    Db(DbError),
}

impl ServiceError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Maps database errors into the caller taxonomy.
///
/// ## Mapping
/// ```text
/// DbError::NotFound              → ServiceError::NotFound
/// DbError::UniqueViolation(email)→ ValidationError::DuplicateEmail
/// Other                          → ServiceError::Db
/// ```
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::NotFound { entity, id },

            DbError::UniqueViolation { field, value } if field.contains("email") => {
                ServiceError::Validation(ValidationError::DuplicateEmail { email: value })
            }

            other => ServiceError::Db(other),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================
