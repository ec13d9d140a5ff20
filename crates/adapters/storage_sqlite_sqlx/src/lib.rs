//! # airserv-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `airserv-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! The schema enforces `equipments.service_id → services.id` with
//! `ON DELETE CASCADE`; foreign keys are switched on for every connection.
//!
//! ## Dependency rule
//! Depends on `airserv-app` (for port traits) and `airserv-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod columns;
pub mod error;
pub mod pool;

pub mod activity_log;
pub mod equipment_repo;
pub mod service_repo;

pub use activity_log::SqliteActivityLog;
pub use equipment_repo::SqliteEquipmentRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use service_repo::SqliteServiceRepository;
