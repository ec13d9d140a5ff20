//! Status coordinator — keeps each service's persisted status equal to the
//! resolver's output over its equipment.

use serde::Serialize;
use tokio::sync::Mutex;

use airserv_domain::error::AirservError;
use airserv_domain::id::ServiceId;
use airserv_domain::status::{OperationalStatus, resolve};
use airserv_domain::time::now;

use crate::ports::{EquipmentRepository, ServiceRepository};

/// Outcome of reconciling one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub service_id: ServiceId,
    /// Status the service holds after reconciliation.
    pub status: OperationalStatus,
    /// Whether a write was needed.
    pub changed: bool,
}

/// Recomputes and persists derived service statuses.
///
/// Reconciliations run one at a time: the read of the equipment, the read of
/// the current status and the conditional write happen under a single lock.
/// Since every caller reconciles after its own mutation has committed, the
/// last reconciliation for a service always observes all prior mutations.
pub struct StatusCoordinator<S, E> {
    services: S,
    equipments: E,
    lock: Mutex<()>,
}

impl<S, E> StatusCoordinator<S, E>
where
    S: ServiceRepository + Send + Sync,
    E: EquipmentRepository + Send + Sync,
{
    /// Create a coordinator over the given repositories.
    pub fn new(services: S, equipments: E) -> Self {
        Self {
            services,
            equipments,
            lock: Mutex::new(()),
        }
    }

    /// Recompute the status of one service and persist it if it changed.
    ///
    /// Returns `None` when the service does not exist.
    ///
    /// # Errors
    ///
    /// Returns a storage error when reading the equipment or writing the
    /// status fails. The service keeps its last persisted status.
    #[tracing::instrument(skip(self))]
    pub async fn reconcile(
        &self,
        service_id: ServiceId,
    ) -> Result<Option<Reconciliation>, AirservError> {
        let _guard = self.lock.lock().await;

        let statuses = self.equipments.list_statuses(service_id).await?;
        let resolved = resolve(statuses);

        let Some(current) = self.services.get_status(service_id).await? else {
            tracing::debug!("service not found, nothing to reconcile");
            return Ok(None);
        };

        if current == resolved {
            return Ok(Some(Reconciliation {
                service_id,
                status: current,
                changed: false,
            }));
        }

        if !self.services.set_status(service_id, resolved, now()).await? {
            tracing::debug!("service deleted during reconciliation");
            return Ok(None);
        }

        tracing::info!(from = %current, to = %resolved, "service status changed");
        Ok(Some(Reconciliation {
            service_id,
            status: resolved,
            changed: true,
        }))
    }

    /// Reconcile every service. Returns the number of services processed.
    ///
    /// # Errors
    ///
    /// Stops at the first storage error and returns it.
    #[tracing::instrument(skip(self))]
    pub async fn reconcile_all(&self) -> Result<usize, AirservError> {
        let services = self.services.get_all().await?;
        let mut changed = 0usize;
        for service in &services {
            if let Some(outcome) = self.reconcile(service.id).await? {
                changed += usize::from(outcome.changed);
            }
        }
        tracing::info!(processed = services.len(), changed, "bulk reconciliation done");
        Ok(services.len())
    }
}
