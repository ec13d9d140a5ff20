//! Activity log port — append-only persistence for audit records.

use std::future::Future;

use airserv_domain::activity::ActivityLogEntry;
use airserv_domain::error::AirservError;
use airserv_domain::time::Timestamp;

/// Store for [`ActivityLogEntry`] records.
pub trait ActivityLogStore {
    /// Append a new entry.
    fn record(
        &self,
        entry: ActivityLogEntry,
    ) -> impl Future<Output = Result<ActivityLogEntry, AirservError>> + Send;

    /// Get the most recent entries, newest first.
    fn get_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ActivityLogEntry>, AirservError>> + Send;

    /// Delete every entry recorded strictly before `before`.
    /// Returns the number of deleted entries.
    fn purge_before(
        &self,
        before: Timestamp,
    ) -> impl Future<Output = Result<usize, AirservError>> + Send;
}
