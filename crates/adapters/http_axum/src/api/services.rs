//! JSON REST handlers for airport services.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use airserv_app::ports::{ActivityLogStore, EquipmentRepository, ServiceRepository};
use airserv_app::services::service_catalog::ServiceDetail;
use airserv_domain::activity::ActivityAction;
use airserv_domain::id::ServiceId;
use airserv_domain::service::{Service, ServiceSummary, ServiceUpdate};
use airserv_domain::status::OperationalStatus;

use crate::context::RequestActor;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a service.
#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub status: Option<OperationalStatus>,
}

/// Request body for editing a service. Omitted optional fields are kept.
#[derive(Deserialize)]
pub struct UpdateServiceRequest {
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub status: Option<OperationalStatus>,
}

impl From<UpdateServiceRequest> for ServiceUpdate {
    fn from(req: UpdateServiceRequest) -> Self {
        Self {
            name: req.name,
            icon: req.icon,
            description: req.description,
            status: req.status,
        }
    }
}

/// Request body for the explicit status override.
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OperationalStatus,
}

/// Response body of the bulk refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub updated_count: usize,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<ServiceSummary>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<ServiceDetail>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Service>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the update endpoints.
pub enum UpdateResponse {
    Ok(Json<Service>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Possible responses from the refresh endpoint.
pub enum RefreshStatusesResponse {
    Ok(Json<RefreshResponse>),
}

impl IntoResponse for RefreshStatusesResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/services`
pub async fn list<S, E, L>(
    State(state): State<AppState<S, E, L>>,
) -> Result<ListResponse, ApiError>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    let services = state.catalog.list_services().await?;
    Ok(ListResponse::Ok(Json(services)))
}

/// `GET /api/services/{id}`
pub async fn get<S, E, L>(
    State(state): State<AppState<S, E, L>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    let service_id = ServiceId::parse(&id)?;
    let detail = state.catalog.get_service_detail(service_id).await?;
    Ok(GetResponse::Ok(Json(detail)))
}

/// `POST /api/services`
pub async fn create<S, E, L>(
    State(state): State<AppState<S, E, L>>,
    RequestActor(actor): RequestActor,
    Json(req): Json<CreateServiceRequest>,
) -> Result<CreateResponse, ApiError>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    let mut builder = Service::builder().name(req.name);
    if let Some(icon) = req.icon {
        builder = builder.icon(icon);
    }
    if let Some(description) = req.description {
        builder = builder.description(description);
    }
    if let Some(status) = req.status {
        builder = builder.status(status);
    }

    let created = state.catalog.create_service(builder.build()?).await?;
    state
        .activity
        .record(
            &actor,
            ActivityAction::CreateService,
            format!("Created service {}", created.name),
        )
        .await;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/services/{id}`
pub async fn update<S, E, L>(
    State(state): State<AppState<S, E, L>>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
    Json(req): Json<UpdateServiceRequest>,
) -> Result<UpdateResponse, ApiError>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    let service_id = ServiceId::parse(&id)?;
    let updated = state
        .catalog
        .update_service(service_id, req.into())
        .await?;
    state
        .activity
        .record(
            &actor,
            ActivityAction::UpdateService,
            format!("Updated service {}", updated.name),
        )
        .await;
    Ok(UpdateResponse::Ok(Json(updated)))
}

/// `PUT /api/services/{id}/status`
pub async fn update_status<S, E, L>(
    State(state): State<AppState<S, E, L>>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<UpdateResponse, ApiError>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    let service_id = ServiceId::parse(&id)?;
    let updated = state
        .catalog
        .override_status(service_id, req.status)
        .await?;
    state
        .activity
        .record(
            &actor,
            ActivityAction::UpdateServiceStatus,
            format!("Set status of service {} to {}", updated.name, updated.status),
        )
        .await;
    Ok(UpdateResponse::Ok(Json(updated)))
}

/// `DELETE /api/services/{id}`
pub async fn delete<S, E, L>(
    State(state): State<AppState<S, E, L>>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    let service_id = ServiceId::parse(&id)?;
    let deleted = state.catalog.delete_service(service_id).await?;
    state
        .activity
        .record(
            &actor,
            ActivityAction::DeleteService,
            format!("Deleted service {}", deleted.name),
        )
        .await;
    Ok(DeleteResponse::NoContent)
}

/// `POST /api/services/refresh-statuses`
pub async fn refresh_statuses<S, E, L>(
    State(state): State<AppState<S, E, L>>,
    RequestActor(actor): RequestActor,
) -> Result<RefreshStatusesResponse, ApiError>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    let updated_count = state.coordinator.reconcile_all().await?;
    state
        .activity
        .record(
            &actor,
            ActivityAction::RefreshStatuses,
            format!("Refreshed status of {updated_count} services"),
        )
        .await;
    Ok(RefreshStatusesResponse::Ok(Json(RefreshResponse {
        updated_count,
    })))
}
