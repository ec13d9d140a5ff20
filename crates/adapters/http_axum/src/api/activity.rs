//! JSON REST handler for the activity log.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use airserv_app::ports::{ActivityLogStore, EquipmentRepository, ServiceRepository};
use airserv_domain::activity::ActivityLogEntry;

use crate::error::ApiError;
use crate::state::AppState;

/// Page size when `?limit=` is omitted.
const DEFAULT_LIMIT: usize = 50;

/// Query parameters for listing activity.
#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<ActivityLogEntry>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/activity?limit=N`
pub async fn list<S, E, L>(
    State(state): State<AppState<S, E, L>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let entries = state.activity.recent(limit).await?;
    Ok(ListResponse::Ok(Json(entries)))
}
