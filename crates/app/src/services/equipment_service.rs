//! Equipment service — use-cases for managing equipment.
//!
//! Every successful mutation is followed by a reconciliation of the owning
//! service. The mutation is never rolled back when that reconciliation fails;
//! the caller gets [`AirservError::StaleStatus`] instead.

use std::sync::Arc;

use airserv_domain::equipment::{Equipment, EquipmentUpdate};
use airserv_domain::error::{AirservError, NotFoundError};
use airserv_domain::id::{EquipmentId, ServiceId};
use airserv_domain::time::now;

use crate::ports::{EquipmentRepository, ServiceRepository};
use crate::services::status_coordinator::StatusCoordinator;

/// Application service for equipment CRUD.
pub struct EquipmentService<E, S> {
    repo: E,
    services: S,
    coordinator: Arc<StatusCoordinator<S, E>>,
}

impl<E, S> EquipmentService<E, S>
where
    E: EquipmentRepository + Send + Sync,
    S: ServiceRepository + Send + Sync,
{
    /// Create a new service backed by the given repositories and coordinator.
    pub fn new(repo: E, services: S, coordinator: Arc<StatusCoordinator<S, E>>) -> Self {
        Self {
            repo,
            services,
            coordinator,
        }
    }

    async fn ensure_service_exists(&self, service_id: ServiceId) -> Result<(), AirservError> {
        match self.services.get_status(service_id).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError {
                entity: "Service",
                id: service_id.to_string(),
            }
            .into()),
        }
    }

    async fn refresh_service(&self, service_id: ServiceId) -> Result<(), AirservError> {
        match self.coordinator.reconcile(service_id).await {
            Ok(_) => Ok(()),
            Err(source) => {
                tracing::error!(%service_id, error = %source, "service status left stale");
                Err(AirservError::StaleStatus {
                    service_id,
                    source: Box::new(source),
                })
            }
        }
    }

    /// Attach a new equipment to an existing service.
    ///
    /// # Errors
    ///
    /// Returns [`AirservError::Validation`] if invariants fail,
    /// [`AirservError::NotFound`] if the service does not exist,
    /// [`AirservError::StaleStatus`] if the equipment was stored but the
    /// service status could not be refreshed, or a storage error.
    #[tracing::instrument(skip(self, equipment), fields(equipment_name = %equipment.name))]
    pub async fn create_equipment(&self, equipment: Equipment) -> Result<Equipment, AirservError> {
        equipment.validate()?;
        self.ensure_service_exists(equipment.service_id).await?;
        let created = self.repo.create(equipment).await?;
        self.refresh_service(created.service_id).await?;
        Ok(created)
    }

    /// Look up an equipment by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`AirservError::NotFound`] when no equipment with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_equipment(&self, id: EquipmentId) -> Result<Equipment, AirservError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Equipment",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List the equipment of one service, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AirservError::NotFound`] when the service does not exist,
    /// or a storage error from the repositories.
    pub async fn list_for_service(
        &self,
        service_id: ServiceId,
    ) -> Result<Vec<Equipment>, AirservError> {
        self.ensure_service_exists(service_id).await?;
        self.repo.find_by_service(service_id).await
    }

    /// Replace the editable fields of an equipment.
    ///
    /// The owning service is reconciled even when the status did not change;
    /// in that case the reconciliation performs no write.
    ///
    /// # Errors
    ///
    /// Returns [`AirservError::NotFound`] if the equipment does not exist,
    /// [`AirservError::Validation`] if the edit breaks invariants,
    /// [`AirservError::StaleStatus`] if the service status could not be
    /// refreshed, or a storage error.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_equipment(
        &self,
        id: EquipmentId,
        update: EquipmentUpdate,
    ) -> Result<Equipment, AirservError> {
        let mut equipment = self.get_equipment(id).await?;
        equipment.apply(update, now());
        equipment.validate()?;
        let updated = self.repo.update(equipment).await?;
        self.refresh_service(updated.service_id).await?;
        Ok(updated)
    }

    /// Delete an equipment and return it.
    ///
    /// # Errors
    ///
    /// Returns [`AirservError::NotFound`] if the equipment does not exist,
    /// [`AirservError::StaleStatus`] if the service status could not be
    /// refreshed, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_equipment(&self, id: EquipmentId) -> Result<Equipment, AirservError> {
        let equipment = self.get_equipment(id).await?;
        if !self.repo.delete(id).await? {
            return Err(NotFoundError {
                entity: "Equipment",
                id: id.to_string(),
            }
            .into());
        }
        self.refresh_service(equipment.service_id).await?;
        Ok(equipment)
    }
}
