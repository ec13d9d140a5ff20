//! Dashboard service — aggregated counters for the admin overview.

use std::collections::HashMap;

use serde::Serialize;

use airserv_domain::activity::ActivityLogEntry;
use airserv_domain::error::AirservError;
use airserv_domain::id::ServiceId;
use airserv_domain::status::OperationalStatus;

use crate::ports::{ActivityLogStore, EquipmentRepository, ServiceRepository};

/// Number of activity entries shown on the dashboard.
pub const RECENT_ACTIVITY: usize = 10;

/// Totals split by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl StatusCounts {
    fn add(&mut self, status: OperationalStatus) {
        self.total += 1;
        match status {
            OperationalStatus::Active => self.active += 1,
            OperationalStatus::Inactive => self.inactive += 1,
        }
    }
}

impl FromIterator<OperationalStatus> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = OperationalStatus>>(iter: I) -> Self {
        let mut counts = Self::default();
        for status in iter {
            counts.add(status);
        }
        counts
    }
}

/// Per-service equipment breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceBreakdown {
    pub service_id: ServiceId,
    pub name: String,
    pub service_status: OperationalStatus,
    pub equipments: StatusCounts,
}

/// Everything the dashboard overview displays.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub services: StatusCounts,
    pub equipments: StatusCounts,
    pub services_detail: Vec<ServiceBreakdown>,
    pub recent_activities: Vec<ActivityLogEntry>,
}

/// Read-only aggregation over services, equipment and activity.
pub struct DashboardService<S, E, L> {
    services: S,
    equipments: E,
    activity: L,
}

impl<S, E, L> DashboardService<S, E, L>
where
    S: ServiceRepository + Send + Sync,
    E: EquipmentRepository + Send + Sync,
    L: ActivityLogStore + Send + Sync,
{
    pub fn new(services: S, equipments: E, activity: L) -> Self {
        Self {
            services,
            equipments,
            activity,
        }
    }

    /// Compute the dashboard statistics from the persisted statuses.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from any repository.
    pub async fn stats(&self) -> Result<DashboardStats, AirservError> {
        let services = self.services.get_all().await?;
        let equipments = self.equipments.get_all().await?;
        let recent_activities = self.activity.get_recent(RECENT_ACTIVITY).await?;

        let mut per_service: HashMap<ServiceId, StatusCounts> = HashMap::new();
        for equipment in &equipments {
            per_service
                .entry(equipment.service_id)
                .or_default()
                .add(equipment.status);
        }

        let mut services_detail: Vec<ServiceBreakdown> = services
            .iter()
            .map(|service| ServiceBreakdown {
                service_id: service.id,
                name: service.name.clone(),
                service_status: service.status,
                equipments: per_service.get(&service.id).copied().unwrap_or_default(),
            })
            .collect();
        services_detail.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(DashboardStats {
            services: services.iter().map(|s| s.status).collect(),
            equipments: equipments.iter().map(|e| e.status).collect(),
            services_detail,
            recent_activities,
        })
    }
}
