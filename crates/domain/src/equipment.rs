//! Equipment — a physical or logical unit belonging to exactly one service.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::error::{AirservError, ValidationError};
use crate::id::{EquipmentId, ServiceId};
use crate::status::OperationalStatus;
use crate::time::{Timestamp, now};

/// A unit (access point, camera, switch, …) owned by a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub service_id: ServiceId,
    pub name: String,
    pub ip_address: Option<IpAddr>,
    pub status: OperationalStatus,
    pub location: Option<String>,
    pub model: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Equipment {
    /// Create a builder for constructing an [`Equipment`].
    #[must_use]
    pub fn builder() -> EquipmentBuilder {
        EquipmentBuilder::default()
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

    /// Replace the editable fields and bump `updated_at`.
    ///
    /// The owning service never changes.
    pub fn apply(&mut self, update: EquipmentUpdate, at: Timestamp) {
        self.name = update.name;
        self.ip_address = update.ip_address;
        self.status = update.status;
        self.location = update.location;
        self.model = update.model;
        self.updated_at = at;
    }
}

/// Full replacement of the editable fields of an equipment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentUpdate {
    pub name: String,
    pub ip_address: Option<IpAddr>,
    pub status: OperationalStatus,
    pub location: Option<String>,
    pub model: Option<String>,
}

/// Step-by-step builder for [`Equipment`].
#[derive(Debug, Default)]
pub struct EquipmentBuilder {
    id: Option<EquipmentId>,
    service_id: Option<ServiceId>,
    name: Option<String>,
    ip_address: Option<IpAddr>,
    status: Option<OperationalStatus>,
    location: Option<String>,
    model: Option<String>,
    created_at: Option<Timestamp>,
    updated_at: Option<Timestamp>,
}

impl EquipmentBuilder {
    #[must_use]
    pub fn id(mut self, id: EquipmentId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn service_id(mut self, service_id: ServiceId) -> Self {
        self.service_id = Some(service_id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn ip_address(mut self, ip_address: IpAddr) -> Self {
        self.ip_address = Some(ip_address);
        self
    }

    #[must_use]
    pub fn status(mut self, status: OperationalStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
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

    /// Consume the builder, validate, and return an [`Equipment`].
    ///
    /// # Errors
    ///
    /// Returns [`AirservError::Validation`] if the owning service is missing
    /// or `name` is missing or blank.
    pub fn build(self) -> Result<Equipment, AirservError> {
        let service_id = self.service_id.ok_or(ValidationError::MissingService)?;
        let created_at = self.created_at.unwrap_or_else(now);
        let equipment = Equipment {
            id: self.id.unwrap_or_default(),
            service_id,
            name: self.name.unwrap_or_default(),
            ip_address: self.ip_address,
            status: self.status.unwrap_or_default(),
            location: self.location,
            model: self.model,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        };
        equipment.validate()?;
        Ok(equipment)
    }
}
