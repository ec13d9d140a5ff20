//! JSON REST handler for dashboard statistics.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use airserv_app::ports::{ActivityLogStore, EquipmentRepository, ServiceRepository};
use airserv_app::services::dashboard_service::DashboardStats;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the stats endpoint.
pub enum StatsResponse {
    Ok(Json<DashboardStats>),
}

impl IntoResponse for StatsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/dashboard/stats`
pub async fn stats<S, E, L>(
    State(state): State<AppState<S, E, L>>,
) -> Result<StatsResponse, ApiError>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    let stats = state.dashboard.stats().await?;
    Ok(StatsResponse::Ok(Json(stats)))
}
