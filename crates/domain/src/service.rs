//! Service — a logical airport subsystem (WiFi, telephony, CCTV, …) whose
//! status is derived from its equipment.

use serde::{Deserialize, Serialize};

use crate::error::{AirservError, ValidationError};
use crate::id::ServiceId;
use crate::status::OperationalStatus;
use crate::time::{Timestamp, now};

/// Icon assigned when a service is created without one.
pub const DEFAULT_ICON: &str = "⚙️";

/// A logical airport subsystem.
///
/// `status` is derived from the service's equipment by the status resolver.
/// It can be overridden explicitly, but the next reconciliation replaces any
/// value that disagrees with the equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub status: OperationalStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Service {
    /// Create a builder for constructing a [`Service`].
    #[must_use]
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AirservError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), AirservError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Apply an administrative edit and bump `updated_at`.
    pub fn apply(&mut self, update: ServiceUpdate, at: Timestamp) {
        self.name = update.name;
        if let Some(icon) = update.icon {
            self.icon = icon;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = at;
    }
}

/// Administrative edit of a service. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceUpdate {
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub status: Option<OperationalStatus>,
}

/// A service together with the number of equipment units it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
    #[serde(flatten)]
    pub service: Service,
    pub equipment_count: u64,
}

/// Step-by-step builder for [`Service`].
#[derive(Debug, Default)]
pub struct ServiceBuilder {
    id: Option<ServiceId>,
    name: Option<String>,
    icon: Option<String>,
    description: Option<String>,
    status: Option<OperationalStatus>,
    created_at: Option<Timestamp>,
    updated_at: Option<Timestamp>,
}

impl ServiceBuilder {
    #[must_use]
    pub fn id(mut self, id: ServiceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: OperationalStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[must_use]
    pub fn updated_at(mut self, updated_at: Timestamp) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Consume the builder, validate, and return a [`Service`].
    ///
    /// Missing timestamps default to the current time, a missing icon to
    /// [`DEFAULT_ICON`] and a missing status to active.
    ///
    /// # Errors
    ///
    /// Returns [`AirservError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Service, AirservError> {
        let created_at = self.created_at.unwrap_or_else(now);
        let service = Service {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            icon: self.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            description: self.description.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        };
        service.validate()?;
        Ok(service)
    }
}
