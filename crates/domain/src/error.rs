//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`AirservError`]
//! via `#[from]` (or an explicit `From` impl for boxed sources).

use crate::id::ServiceId;

/// Top-level error returned by domain validation and application use-cases.
#[derive(Debug, thiserror::Error)]
pub enum AirservError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The triggering mutation was committed but the owning service's
    /// derived status could not be refreshed.
    #[error("status of service {service_id} could not be refreshed")]
    StaleStatus {
        service_id: ServiceId,
        #[source]
        source: Box<AirservError>,
    },
}

/// Invariant violations detected before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("equipment must reference a service")]
    MissingService,

    #[error("invalid {kind} identifier: {value}")]
    InvalidId { kind: &'static str, value: String },

    #[error("invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),
}

/// A referenced record does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
