//! # Customer Repository
//!
//! Database operations for customer records.
//!
//! ## The Uniqueness Guard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              How Email Uniqueness Is Enforced                           │
//! │                                                                         │
//! │  ❌ WRONG: check-then-insert (race window between the two steps)       │
//! │     SELECT … WHERE email = ?   then   INSERT …                         │
//! │                                                                         │
//! │  ✅ CORRECT: conditional insert against the unique index               │
//! │     INSERT … → UNIQUE constraint failed: customers.email               │
//! │              → DbError::UniqueViolation { field: "email" }             │
//! │                                                                         │
//! │  Concurrent creations with the same email cannot both succeed; the     │
//! │  loser gets a caller-visible duplicate-email failure and nothing is    │
//! │  persisted.                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use meridian_core::{Customer, CustomerFields};

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

/// Row shape for the customers table.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            note: row.note,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const CUSTOMER_COLUMNS: &str = "id, name, email, phone, address, note, created_at, updated_at";

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a new customer.
    ///
    /// Conditional on the unique email index: a duplicate email fails here
    /// and persists nothing.
    ///
    /// ## Returns
    /// * `Ok(())` - Customer inserted
    /// * `Err(DbError::UniqueViolation)` - Email already belongs to another
    ///   customer
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, phone, address, note, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.note)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| rewrite_email_violation(e.into(), &customer.email))?;

        Ok(())
    }

    /// Gets a customer by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    /// Gets a customer by email (exact, case-sensitive match).
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    /// Checks whether a customer id resolves to a stored customer.
    ///
    /// The existence half of the registry guard: order creation calls this
    /// before computing and persisting anything.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(found != 0)
    }

    /// Lists all customers, sorted by name.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let rows: Vec<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Replaces a customer's editable fields wholesale.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Customer doesn't exist
    /// * `Err(DbError::UniqueViolation)` - New email belongs to another
    ///   customer
    pub async fn update(
        &self,
        id: &str,
        fields: &CustomerFields,
        now: DateTime<Utc>,
    ) -> DbResult<()> {
        debug!(id = %id, "Updating customer");

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                name = ?2,
                email = ?3,
                phone = ?4,
                address = ?5,
                note = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.address)
        .bind(&fields.note)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| rewrite_email_violation(e.into(), &fields.email))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Deletes a customer by id.
    ///
    /// No cascade: orders referencing this customer stay in place with an
    /// orphaned reference.
    ///
    /// ## Returns
    /// * `Ok(())` - Customer deleted
    /// * `Err(DbError::NotFound)` - Customer doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }
}

/// Fills in the colliding email value, which SQLite's error message lacks.
fn rewrite_email_violation(err: DbError, email: &str) -> DbError {
    match err {
        DbError::UniqueViolation { field, .. } if field.contains("email") => {
            DbError::duplicate("email", email)
        }
        other => other,
    }
}

/// Helper to generate a new customer ID.
pub fn generate_customer_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn fields(name: &str, email: &str) -> CustomerFields {
        CustomerFields {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            address: None,
            note: None,
        }
    }

    fn customer(name: &str, email: &str) -> Customer {
        Customer::from_fields(generate_customer_id(), fields(name, email), Utc::now())
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = test_db().await;
        let repo = db.customers();

        let ada = customer("Ada", "ada@example.com");
        repo.insert(&ada).await.unwrap();

        let by_id = repo.get_by_id(&ada.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "ada@example.com");

        let by_email = repo.get_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, ada.id);

        assert!(repo.exists(&ada.id).await.unwrap());
        assert!(!repo.exists("no-such-id").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_and_nothing_persists() {
        let db = test_db().await;
        let repo = db.customers();

        repo.insert(&customer("Ada", "ada@example.com")).await.unwrap();

        let dup = customer("Imposter", "ada@example.com");
        let err = repo.insert(&dup).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "email"));

        assert!(repo.get_by_id(&dup.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_uniqueness_is_case_sensitive() {
        let db = test_db().await;
        let repo = db.customers();

        repo.insert(&customer("Ada", "ada@example.com")).await.unwrap();
        // Different byte sequence, different email as stored.
        repo.insert(&customer("Ada2", "Ada@example.com")).await.unwrap();

        assert!(repo.get_by_email("Ada@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_replaces_fields_wholesale() {
        let db = test_db().await;
        let repo = db.customers();

        let mut ada = customer("Ada", "ada@example.com");
        ada.phone = Some("555-0100".to_string());
        repo.insert(&ada).await.unwrap();

        // Replacement omits phone, so phone is cleared, not kept.
        repo.update(&ada.id, &fields("Ada Lovelace", "ada@example.com"), Utc::now())
            .await
            .unwrap();

        let stored = repo.get_by_id(&ada.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ada Lovelace");
        assert_eq!(stored.phone, None);
    }

    #[tokio::test]
    async fn test_update_missing_customer_is_not_found() {
        let db = test_db().await;
        let err = db
            .customers()
            .update("no-such-id", &fields("X", "x@example.com"), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.customers();

        let ada = customer("Ada", "ada@example.com");
        repo.insert(&ada).await.unwrap();
        repo.delete(&ada.id).await.unwrap();

        assert!(repo.get_by_id(&ada.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&ada.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[test]
    fn test_generated_ids_are_unique_uuids() {
        let a = generate_customer_id();
        let b = generate_customer_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[tokio::test]
    async fn test_list_sorts_by_name() {
        let db = test_db().await;
        let repo = db.customers();

        repo.insert(&customer("Charlie", "c@example.com")).await.unwrap();
        repo.insert(&customer("Ada", "a@example.com")).await.unwrap();
        repo.insert(&customer("Bea", "b@example.com")).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Ada", "Bea", "Charlie"]);
    }
}
