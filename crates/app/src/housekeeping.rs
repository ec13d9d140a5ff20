//! Housekeeping loop — periodic activity retention and status drift repair.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::ports::{ActivityLogStore, EquipmentRepository, ServiceRepository};
use crate::services::activity_service::ActivityService;
use crate::services::status_coordinator::StatusCoordinator;

/// What the housekeeping loop does on every tick.
#[derive(Debug, Clone)]
pub struct HousekeepingConfig {
    /// Time between two sweeps.
    pub interval: Duration,
    /// Activity entries older than this are deleted. `None` keeps everything.
    pub activity_retention: Option<chrono::Duration>,
    /// Run a bulk reconciliation on every sweep.
    pub reconcile: bool,
}

/// Result of one sweep. `None` means the step was skipped or failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub purged: Option<usize>,
    pub reconciled: Option<usize>,
}

/// Run a single sweep. Failures are logged, never propagated.
pub async fn sweep<L, S, E>(
    config: &HousekeepingConfig,
    activity: &ActivityService<L>,
    coordinator: &StatusCoordinator<S, E>,
) -> SweepReport
where
    L: ActivityLogStore + Send + Sync,
    S: ServiceRepository + Send + Sync,
    E: EquipmentRepository + Send + Sync,
{
    let mut report = SweepReport::default();

    if let Some(retention) = config.activity_retention {
        match activity.purge_older_than(retention).await {
            Ok(purged) => report.purged = Some(purged),
            Err(err) => tracing::warn!(error = %err, "activity purge failed"),
        }
    }

    if config.reconcile {
        match coordinator.reconcile_all().await {
            Ok(processed) => report.reconciled = Some(processed),
            Err(err) => tracing::warn!(error = %err, "status sweep failed"),
        }
    }

    report
}

/// Sweep on every `config.interval` until `shutdown` flips to `true`
/// or its sender is dropped.
pub async fn run<L, S, E>(
    config: HousekeepingConfig,
    activity: Arc<ActivityService<L>>,
    coordinator: Arc<StatusCoordinator<S, E>>,
    mut shutdown: watch::Receiver<bool>,
) where
    L: ActivityLogStore + Send + Sync,
    S: ServiceRepository + Send + Sync,
    E: EquipmentRepository + Send + Sync,
{
    let mut ticker = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::info!(interval = ?config.interval, "housekeeping started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                sweep(&config, &activity, &coordinator).await;
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    tracing::info!("housekeeping stopped");
}
