//! # airserv-domain
//!
//! Pure domain model for the airserv airport-services administration backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Services** (logical airport subsystems such as WiFi or CCTV)
//! - Define **Equipment** (units belonging to exactly one service)
//! - Define the **status resolver**, the single rule deriving a service's
//!   status from the statuses of its equipment
//! - Define **Activity** records (append-only audit trail)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod activity;
pub mod equipment;
pub mod service;
pub mod status;
