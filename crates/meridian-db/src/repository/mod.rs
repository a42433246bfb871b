//! # Repository Module
//!
//! Repository implementations for database operations.
//!
//! ## Repository Pattern
//! Each repository wraps the connection pool and exposes the operations the
//! service layer consumes: point lookup by id, point lookup by email,
//! insert, partial-field update, delete, and ordered listings with optional
//! equality filters.

pub mod customer;
pub mod order;
