//! # Meridian Service
//!
//! Caller-facing operation contracts composing the pure pricing and
//! mutation-planning logic (meridian-core) with the SQLite persistence
//! layer (meridian-db).
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        meridian-service                                 │
//! │                                                                         │
//! │  CustomerService                 OrderService                           │
//! │  ├── create   (unique email)     ├── create  (reference guard,         │
//! │  ├── get                         │            pricing engine)           │
//! │  ├── list                        ├── get     (customer name attached)   │
//! │  ├── update  (full replacement)  ├── list    (newest first, filters)   │
//! │  └── delete  (no cascade)        ├── update  (partial, re-price only   │
//! │                                  │            when inputs change)       │
//! │                                  └── delete                             │
//! │                                                                         │
//! │            │                              │                             │
//! │            ▼                              ▼                             │
//! │      meridian-core  (validation, pricing, plan_update)                 │
//! │      meridian-db    (repositories, unique index, migrations)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transport is out of scope: these services return `ServiceResult` values
//! that any HTTP or RPC layer can serialize.

pub mod customer_service;
pub mod error;
pub mod order_service;

pub use customer_service::CustomerService;
pub use error::{ServiceError, ServiceResult};
pub use order_service::{NewOrder, OrderService, OrderView};
