//! Activity service — audit trail recording, querying and retention.

use chrono::Duration;

use airserv_domain::activity::{ActivityAction, ActivityLogEntry};
use airserv_domain::error::AirservError;
use airserv_domain::time::cutoff;

use crate::ports::ActivityLogStore;

/// Largest page served by [`ActivityService::recent`].
pub const MAX_RECENT: usize = 500;

/// Who performed an action and from where.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    pub id: Option<String>,
    pub origin: Option<String>,
}

/// Application service over the activity log.
pub struct ActivityService<L> {
    store: L,
}

impl<L: ActivityLogStore + Send + Sync> ActivityService<L> {
    /// Create a new service backed by the given store.
    pub fn new(store: L) -> Self {
        Self { store }
    }

    /// Append an audit record.
    ///
    /// Failures are logged and swallowed: auditing never fails the action
    /// being audited.
    pub async fn record(&self, actor: &Actor, action: ActivityAction, details: impl Into<String>) {
        let entry = ActivityLogEntry::new(actor.id.clone(), action, details, actor.origin.clone());
        if let Err(err) = self.store.record(entry).await {
            tracing::warn!(%action, error = %err, "failed to record activity");
        }
    }

    /// Most recent entries, newest first. `limit` is capped at [`MAX_RECENT`].
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn recent(&self, limit: usize) -> Result<Vec<ActivityLogEntry>, AirservError> {
        self.store.get_recent(limit.min(MAX_RECENT)).await
    }

    /// Delete entries older than `retention`. Returns the number deleted.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self))]
    pub async fn purge_older_than(&self, retention: Duration) -> Result<usize, AirservError> {
        let purged = self.store.purge_before(cutoff(retention)).await?;
        if purged > 0 {
            tracing::info!(purged, "activity retention sweep");
        }
        Ok(purged)
    }
}
