//! # airserv-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a JSON API for services, equipment, the activity log and
//!   dashboard statistics (`/api/services`, `/api/equipments`, …)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Record an activity entry after each successful mutation, attributed to
//!   the actor reported by the upstream authentication layer
//! - Map application errors into HTTP status codes
//!
//! ## Dependency rule
//! Depends on `airserv-app` (for port traits and services) and `airserv-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod context;
pub mod error;
pub mod router;
pub mod state;
