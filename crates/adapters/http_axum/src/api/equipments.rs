//! JSON REST handlers for equipment.

use std::net::IpAddr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use airserv_app::ports::{ActivityLogStore, EquipmentRepository, ServiceRepository};
use airserv_domain::activity::ActivityAction;
use airserv_domain::equipment::{Equipment, EquipmentUpdate};
use airserv_domain::error::{AirservError, ValidationError};
use airserv_domain::id::{EquipmentId, ServiceId};
use airserv_domain::status::OperationalStatus;

use crate::context::RequestActor;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating an equipment.
#[derive(Deserialize)]
pub struct CreateEquipmentRequest {
    pub service_id: String,
    pub name: String,
    pub ip_address: Option<String>,
    pub status: Option<OperationalStatus>,
    pub location: Option<String>,
    pub model: Option<String>,
}

/// Request body for replacing the editable fields of an equipment.
///
/// Omitted optional fields are cleared and an omitted status means active.
#[derive(Deserialize)]
pub struct UpdateEquipmentRequest {
    pub name: String,
    pub ip_address: Option<String>,
    #[serde(default)]
    pub status: OperationalStatus,
    pub location: Option<String>,
    pub model: Option<String>,
}

/// Blank means "no address".
fn parse_ip(value: Option<String>) -> Result<Option<IpAddr>, ValidationError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::InvalidIpAddress(raw.to_string())),
    }
}

/// The equipment change reached the store, even when the service status
/// could not be refreshed afterwards.
fn committed<T>(outcome: &Result<T, AirservError>) -> bool {
    matches!(outcome, Ok(_) | Err(AirservError::StaleStatus { .. }))
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Equipment>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Equipment>),
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
    Created(Json<Equipment>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
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

/// `GET /api/services/{id}/equipments`
pub async fn list_for_service<S, E, L>(
    State(state): State<AppState<S, E, L>>,
    Path(id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    let service_id = ServiceId::parse(&id)?;
    let equipments = state.equipments.list_for_service(service_id).await?;
    Ok(ListResponse::Ok(Json(equipments)))
}

/// `GET /api/equipments/{id}`
pub async fn get<S, E, L>(
    State(state): State<AppState<S, E, L>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    let equipment_id = EquipmentId::parse(&id)?;
    let equipment = state.equipments.get_equipment(equipment_id).await?;
    Ok(GetResponse::Ok(Json(equipment)))
}

/// `POST /api/equipments`
pub async fn create<S, E, L>(
    State(state): State<AppState<S, E, L>>,
    RequestActor(actor): RequestActor,
    Json(req): Json<CreateEquipmentRequest>,
) -> Result<CreateResponse, ApiError>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    let service_id = ServiceId::parse(&req.service_id)?;

    let mut builder = Equipment::builder().service_id(service_id).name(req.name);
    if let Some(ip_address) = parse_ip(req.ip_address)? {
        builder = builder.ip_address(ip_address);
    }
    if let Some(status) = req.status {
        builder = builder.status(status);
    }
    if let Some(location) = req.location {
        builder = builder.location(location);
    }
    if let Some(model) = req.model {
        builder = builder.model(model);
    }

    let equipment = builder.build()?;
    let details = format!("Created equipment {}", equipment.name);
    let outcome = state.equipments.create_equipment(equipment).await;
    if committed(&outcome) {
        state
            .activity
            .record(&actor, ActivityAction::CreateEquipment, details)
            .await;
    }
    Ok(CreateResponse::Created(Json(outcome?)))
}

/// `PUT /api/equipments/{id}`
pub async fn update<S, E, L>(
    State(state): State<AppState<S, E, L>>,
    RequestActor(actor): RequestActor,
    Path(id): Path<String>,
    Json(req): Json<UpdateEquipmentRequest>,
) -> Result<GetResponse, ApiError>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    let equipment_id = EquipmentId::parse(&id)?;
    let update = EquipmentUpdate {
        name: req.name,
        ip_address: parse_ip(req.ip_address)?,
        status: req.status,
        location: req.location,
        model: req.model,
    };

    let details = format!("Updated equipment {}", update.name);
    let outcome = state
        .equipments
        .update_equipment(equipment_id, update)
        .await;
    if committed(&outcome) {
        state
            .activity
            .record(&actor, ActivityAction::UpdateEquipment, details)
            .await;
    }
    Ok(GetResponse::Ok(Json(outcome?)))
}

/// `DELETE /api/equipments/{id}`
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
    let equipment_id = EquipmentId::parse(&id)?;
    let outcome = state.equipments.delete_equipment(equipment_id).await;
    if committed(&outcome) {
        let target = match &outcome {
            Ok(deleted) => deleted.name.clone(),
            Err(_) => equipment_id.to_string(),
        };
        state
            .activity
            .record(
                &actor,
                ActivityAction::DeleteEquipment,
                format!("Deleted equipment {target}"),
            )
            .await;
    }
    outcome?;
    Ok(DeleteResponse::NoContent)
}
