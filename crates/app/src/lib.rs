//! # airserv-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ServiceRepository` — CRUD and status access for services
//!   - `EquipmentRepository` — CRUD for equipment, status listing per service
//!   - `ActivityLogStore` — append, query and purge audit records
//! - Define **driving/inbound ports** as use-case structs:
//!   - `StatusCoordinator` — applies the status resolver after every equipment
//!     mutation and on bulk refresh
//!   - `ServiceCatalog`, `EquipmentService`, `ActivityService`, `DashboardService`
//! - Provide in-process infrastructure that doesn't need IO (housekeeping loop)
//!
//! ## Dependency rule
//! Depends on `airserv-domain` only (plus `tokio::sync`/`tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod housekeeping;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
