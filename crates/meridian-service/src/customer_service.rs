//! # Customer Service
//!
//! Customer operation contracts: create, read, replace, delete.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Customer Lifecycle                                  │
//! │                                                                         │
//! │  create(fields) ── validate ── conditional insert (unique email)       │
//! │       │                              │                                  │
//! │       │                              └── duplicate → ValidationError,  │
//! │       │                                  nothing persisted             │
//! │       ▼                                                                 │
//! │  update(id, fields) ── full replacement of editable fields             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  delete(id) ── NO cascade: orders keep their (now orphaned)            │
//! │                customer reference                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::info;

use crate::error::ServiceResult;
use meridian_core::validation::validate_customer_fields;
use meridian_core::{Customer, CustomerFields};
use meridian_db::{generate_customer_id, Database};

/// Customer operations.
#[derive(Debug, Clone)]
pub struct CustomerService {
    db: Database,
}

impl CustomerService {
    /// Creates a new CustomerService.
    pub fn new(db: Database) -> Self {
        CustomerService { db }
    }

    /// Creates a customer.
    ///
    /// ## Failure Modes
    /// * `ValidationError` (empty name/email) - nothing persisted
    /// * `ValidationError::DuplicateEmail` - the insert is conditional on
    ///   the unique email index, so nothing persists on conflict
    pub async fn create(&self, fields: CustomerFields) -> ServiceResult<Customer> {
        validate_customer_fields(&fields)?;

        let customer = Customer::from_fields(generate_customer_id(), fields, Utc::now());
        self.db.customers().insert(&customer).await?;

        info!(id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Gets a customer by id.
    pub async fn get(&self, id: &str) -> ServiceResult<Customer> {
        self.db
            .customers()
            .get_by_id(id)
            .await?
            .ok_or_else(|| crate::error::ServiceError::not_found("Customer", id))
    }

    /// Lists all customers.
    pub async fn list(&self) -> ServiceResult<Vec<Customer>> {
        Ok(self.db.customers().list().await?)
    }

    /// Replaces a customer's editable fields wholesale.
    ///
    /// The new email also passes through the unique index, so stealing
    /// another customer's email fails with the same duplicate-email outcome
    /// as creation.
    pub async fn update(&self, id: &str, fields: CustomerFields) -> ServiceResult<Customer> {
        validate_customer_fields(&fields)?;

        self.db.customers().update(id, &fields, Utc::now()).await?;

        info!(id = %id, "Customer updated");
        self.get(id).await
    }

    /// Deletes a customer by id.
    ///
    /// No cascade: existing orders keep referencing the deleted customer
    /// and their reads degrade to an absent customer name.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        self.db.customers().delete(id).await?;

        info!(id = %id, "Customer deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use meridian_core::ValidationError;
    use meridian_db::DbConfig;

    fn fields(name: &str, email: &str) -> CustomerFields {
        CustomerFields {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            address: None,
            note: None,
        }
    }

    async fn service() -> CustomerService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        CustomerService::new(db)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let svc = service().await;

        let created = svc.create(fields("Ada", "ada@example.com")).await.unwrap();
        let fetched = svc.get(&created.id).await.unwrap();
        assert_eq!(fetched.name, "Ada");
        assert_eq!(fetched.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let svc = service().await;

        let err = svc.create(fields("", "ada@example.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        assert!(svc.list().await.unwrap().is_empty(), "nothing persisted");
    }

    #[tokio::test]
    async fn test_duplicate_email_fails_and_persists_nothing() {
        let svc = service().await;

        svc.create(fields("Ada", "ada@example.com")).await.unwrap();
        let err = svc
            .create(fields("Imposter", "ada@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::DuplicateEmail { .. })
        ));
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_is_full_replacement() {
        let svc = service().await;

        let mut with_phone = fields("Ada", "ada@example.com");
        with_phone.phone = Some("555-0100".to_string());
        let created = svc.create(with_phone).await.unwrap();

        let updated = svc
            .update(&created.id, fields("Ada Lovelace", "ada@example.com"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Ada Lovelace");
        assert_eq!(updated.phone, None, "omitted fields are cleared");
    }

    #[tokio::test]
    async fn test_update_cannot_steal_an_email() {
        let svc = service().await;

        svc.create(fields("Ada", "ada@example.com")).await.unwrap();
        let bea = svc.create(fields("Bea", "bea@example.com")).await.unwrap();

        let err = svc
            .update(&bea.id, fields("Bea", "ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::DuplicateEmail { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_update_delete_missing_are_not_found() {
        let svc = service().await;

        assert!(matches!(
            svc.get("no-such-id").await.unwrap_err(),
            ServiceError::NotFound { .. }
        ));
        assert!(matches!(
            svc.update("no-such-id", fields("X", "x@example.com"))
                .await
                .unwrap_err(),
            ServiceError::NotFound { .. }
        ));
        assert!(matches!(
            svc.delete("no-such-id").await.unwrap_err(),
            ServiceError::NotFound { .. }
        ));
    }
}
