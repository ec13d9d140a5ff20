//! # airservd — airport services daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Start the housekeeping loop
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT) and close the pool
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use airserv_adapter_http_axum::state::AppState;
use airserv_adapter_storage_sqlite_sqlx::{
    SqliteActivityLog, SqliteEquipmentRepository, SqliteServiceRepository,
};
use airserv_app::housekeeping;
use airserv_app::services::activity_service::ActivityService;
use airserv_app::services::dashboard_service::DashboardService;
use airserv_app::services::equipment_service::EquipmentService;
use airserv_app::services::service_catalog::ServiceCatalog;
use airserv_app::services::status_coordinator::StatusCoordinator;

use crate::config::Config;

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Database
    let db = airserv_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Services
    let coordinator = Arc::new(StatusCoordinator::new(
        SqliteServiceRepository::new(pool.clone()),
        SqliteEquipmentRepository::new(pool.clone()),
    ));
    let catalog = Arc::new(ServiceCatalog::new(
        SqliteServiceRepository::new(pool.clone()),
        SqliteEquipmentRepository::new(pool.clone()),
    ));
    let equipments = Arc::new(EquipmentService::new(
        SqliteEquipmentRepository::new(pool.clone()),
        SqliteServiceRepository::new(pool.clone()),
        Arc::clone(&coordinator),
    ));
    let activity = Arc::new(ActivityService::new(SqliteActivityLog::new(pool.clone())));
    let dashboard = Arc::new(DashboardService::new(
        SqliteServiceRepository::new(pool.clone()),
        SqliteEquipmentRepository::new(pool.clone()),
        SqliteActivityLog::new(pool),
    ));

    // Housekeeping
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let housekeeping_task = config.housekeeping().map(|settings| {
        tokio::spawn(housekeeping::run(
            settings,
            Arc::clone(&activity),
            Arc::clone(&coordinator),
            shutdown_rx,
        ))
    });

    // HTTP
    let state = AppState::from_arcs(catalog, equipments, coordinator, activity, dashboard);
    let app = airserv_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "airservd listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // Shutdown
    let _ = shutdown_tx.send(true);
    if let Some(task) = housekeeping_task
        && let Err(err) = task.await
    {
        tracing::warn!(error = %err, "housekeeping task ended abnormally");
    }
    db.close().await;
    tracing::info!("airservd stopped");

    Ok(())
}
