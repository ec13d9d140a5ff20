//! `SQLite` implementation of [`ActivityLogStore`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use airserv_app::ports::ActivityLogStore;
use airserv_domain::activity::ActivityLogEntry;
use airserv_domain::error::AirservError;
use airserv_domain::time::Timestamp;

use crate::columns::{decode, decode_timestamp, encode_timestamp};
use crate::error::StorageError;

struct Wrapper(ActivityLogEntry);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let action: String = row.try_get("action")?;
        let recorded_at: String = row.try_get("recorded_at")?;

        Ok(Self(ActivityLogEntry {
            id: decode(&id)?,
            actor_id: row.try_get("actor_id")?,
            action: decode(&action)?,
            details: row.try_get("details")?,
            origin: row.try_get("origin")?,
            recorded_at: decode_timestamp(&recorded_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO activity_logs (id, actor_id, action, details, origin, recorded_at)
    VALUES (?, ?, ?, ?, ?, ?)
";
const SELECT_RECENT: &str = "SELECT * FROM activity_logs ORDER BY recorded_at DESC LIMIT ?";
const DELETE_BEFORE: &str = "DELETE FROM activity_logs WHERE recorded_at < ?";

/// `SQLite`-backed append-only activity log.
pub struct SqliteActivityLog {
    pool: SqlitePool,
}

impl SqliteActivityLog {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ActivityLogStore for SqliteActivityLog {
    fn record(
        &self,
        entry: ActivityLogEntry,
    ) -> impl Future<Output = Result<ActivityLogEntry, AirservError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(entry.id.to_string())
                .bind(&entry.actor_id)
                .bind(entry.action.as_str())
                .bind(&entry.details)
                .bind(&entry.origin)
                .bind(encode_timestamp(entry.recorded_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(entry)
        }
    }

    fn get_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ActivityLogEntry>, AirservError>> + Send {
        let pool = self.pool.clone();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
                .bind(limit)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn purge_before(
        &self,
        before: Timestamp,
    ) -> impl Future<Output = Result<usize, AirservError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BEFORE)
                .bind(encode_timestamp(before))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(usize::try_from(result.rows_affected()).unwrap_or(usize::MAX))
        }
    }
}
