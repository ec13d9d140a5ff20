//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod activity;
#[allow(clippy::missing_errors_doc)]
pub mod dashboard;
#[allow(clippy::missing_errors_doc)]
pub mod equipments;
#[allow(clippy::missing_errors_doc)]
pub mod services;

use axum::Router;
use axum::routing::{get, post, put};

use airserv_app::ports::{ActivityLogStore, EquipmentRepository, ServiceRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, E, L>() -> Router<AppState<S, E, L>>
where
    S: ServiceRepository + Send + Sync + 'static,
    E: EquipmentRepository + Send + Sync + 'static,
    L: ActivityLogStore + Send + Sync + 'static,
{
    Router::new()
        // Services
        .route(
            "/services",
            get(services::list::<S, E, L>).post(services::create::<S, E, L>),
        )
        .route(
            "/services/refresh-statuses",
            post(services::refresh_statuses::<S, E, L>),
        )
        .route(
            "/services/{id}",
            get(services::get::<S, E, L>)
                .put(services::update::<S, E, L>)
                .delete(services::delete::<S, E, L>),
        )
        .route(
            "/services/{id}/status",
            put(services::update_status::<S, E, L>),
        )
        .route(
            "/services/{id}/equipments",
            get(equipments::list_for_service::<S, E, L>),
        )
        // Equipment
        .route("/equipments", post(equipments::create::<S, E, L>))
        .route(
            "/equipments/{id}",
            get(equipments::get::<S, E, L>)
                .put(equipments::update::<S, E, L>)
                .delete(equipments::delete::<S, E, L>),
        )
        // Activity
        .route("/activity", get(activity::list::<S, E, L>))
        // Dashboard
        .route("/dashboard/stats", get(dashboard::stats::<S, E, L>))
}
