//! Storage port — repository traits for services and equipment.

use std::future::Future;

use airserv_domain::equipment::Equipment;
use airserv_domain::error::AirservError;
use airserv_domain::id::{EquipmentId, ServiceId};
use airserv_domain::service::{Service, ServiceSummary};
use airserv_domain::status::OperationalStatus;
use airserv_domain::time::Timestamp;

/// Repository for persisting and querying [`Service`]s.
///
/// Deleting a service must delete its equipment as well.
pub trait ServiceRepository {
    /// Create a new service in storage.
    fn create(&self, service: Service)
    -> impl Future<Output = Result<Service, AirservError>> + Send;

    /// Get a service by its unique identifier.
    fn get_by_id(
        &self,
        id: ServiceId,
    ) -> impl Future<Output = Result<Option<Service>, AirservError>> + Send;

    /// Get all services, newest first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Service>, AirservError>> + Send;

    /// Get all services with their equipment count, newest first.
    fn get_summaries(
        &self,
    ) -> impl Future<Output = Result<Vec<ServiceSummary>, AirservError>> + Send;

    /// Persist the name, icon, description and `updated_at` of an existing
    /// service. The stored status is left untouched; use [`Self::set_status`].
    fn update(&self, service: Service)
    -> impl Future<Output = Result<Service, AirservError>> + Send;

    /// Delete a service and its equipment. Returns `false` when nothing was deleted.
    fn delete(&self, id: ServiceId) -> impl Future<Output = Result<bool, AirservError>> + Send;

    /// Read the persisted status of a service, `None` when it does not exist.
    fn get_status(
        &self,
        id: ServiceId,
    ) -> impl Future<Output = Result<Option<OperationalStatus>, AirservError>> + Send;

    /// Write the status and `updated_at` of a service.
    /// Returns `false` when the service does not exist.
    fn set_status(
        &self,
        id: ServiceId,
        status: OperationalStatus,
        at: Timestamp,
    ) -> impl Future<Output = Result<bool, AirservError>> + Send;
}

/// Repository for persisting and querying [`Equipment`].
pub trait EquipmentRepository {
    /// Create a new equipment in storage.
    fn create(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, AirservError>> + Send;

    /// Get an equipment by its unique identifier.
    fn get_by_id(
        &self,
        id: EquipmentId,
    ) -> impl Future<Output = Result<Option<Equipment>, AirservError>> + Send;

    /// Get the equipment of one service, ordered by name.
    fn find_by_service(
        &self,
        service_id: ServiceId,
    ) -> impl Future<Output = Result<Vec<Equipment>, AirservError>> + Send;

    /// Get all equipment.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Equipment>, AirservError>> + Send;

    /// Persist every editable field of an existing equipment.
    fn update(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, AirservError>> + Send;

    /// Delete an equipment. Returns `false` when nothing was deleted.
    fn delete(&self, id: EquipmentId) -> impl Future<Output = Result<bool, AirservError>> + Send;

    /// Read the current statuses of every equipment of one service.
    fn list_statuses(
        &self,
        service_id: ServiceId,
    ) -> impl Future<Output = Result<Vec<OperationalStatus>, AirservError>> + Send;
}
