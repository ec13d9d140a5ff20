//! Shared application state for axum handlers.

use std::sync::Arc;

use airserv_app::ports::{ActivityLogStore, EquipmentRepository, ServiceRepository};
use airserv_app::services::activity_service::ActivityService;
use airserv_app::services::dashboard_service::DashboardService;
use airserv_app::services::equipment_service::EquipmentService;
use airserv_app::services::service_catalog::ServiceCatalog;
use airserv_app::services::status_coordinator::StatusCoordinator;

/// Application state shared across all axum handlers.
///
/// Generic over the service repository, equipment repository and activity
/// store to avoid dynamic dispatch. `Clone` is implemented manually so the
/// underlying types themselves do not need to be `Clone`; only the `Arc`
/// wrappers are cloned.
pub struct AppState<S, E, L> {
    /// Service CRUD and status overrides.
    pub catalog: Arc<ServiceCatalog<S, E>>,
    /// Equipment CRUD, reconciling the owning service after each write.
    pub equipments: Arc<EquipmentService<E, S>>,
    /// Coordinator used for bulk status refresh.
    pub coordinator: Arc<StatusCoordinator<S, E>>,
    /// Audit trail.
    pub activity: Arc<ActivityService<L>>,
    /// Aggregated statistics.
    pub dashboard: Arc<DashboardService<S, E, L>>,
}

impl<S, E, L> Clone for AppState<S, E, L> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            equipments: Arc::clone(&self.equipments),
            coordinator: Arc::clone(&self.coordinator),
            activity: Arc::clone(&self.activity),
            dashboard: Arc::clone(&self.dashboard),
        }
    }
}

impl<S, E, L> AppState<S, E, L>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// The coordinator must be the same instance the equipment service
    /// uses, and the activity service may be shared with background tasks.
    pub fn from_arcs(
        catalog: Arc<ServiceCatalog<S, E>>,
        equipments: Arc<EquipmentService<E, S>>,
        coordinator: Arc<StatusCoordinator<S, E>>,
        activity: Arc<ActivityService<L>>,
        dashboard: Arc<DashboardService<S, E, L>>,
    ) -> Self {
        Self {
            catalog,
            equipments,
            coordinator,
            activity,
            dashboard,
        }
    }
}
