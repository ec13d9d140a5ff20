//! `SQLite` implementation of [`ServiceRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use airserv_app::ports::ServiceRepository;
use airserv_domain::error::{AirservError, NotFoundError};
use airserv_domain::id::ServiceId;
use airserv_domain::service::{Service, ServiceSummary};
use airserv_domain::status::OperationalStatus;
use airserv_domain::time::Timestamp;

use crate::columns::{decode, decode_timestamp, encode_timestamp};
use crate::error::StorageError;

fn service_from_row(row: &SqliteRow) -> Result<Service, sqlx::Error> {
    let id: String = row.try_get("id")?;
    let status: String = row.try_get("status")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Service {
        id: decode(&id)?,
        name: row.try_get("name")?,
        icon: row.try_get("icon")?,
        description: row.try_get("description")?,
        status: decode(&status)?,
        created_at: decode_timestamp(&created_at)?,
        updated_at: decode_timestamp(&updated_at)?,
    })
}

/// Wrapper for converting database rows into domain [`Service`].
struct Wrapper(Service);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Service> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        service_from_row(row).map(Self)
    }
}

/// Wrapper for rows of the summary query.
struct SummaryWrapper(ServiceSummary);

impl<'r> FromRow<'r, SqliteRow> for SummaryWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let count: i64 = row.try_get("equipment_count")?;
        Ok(Self(ServiceSummary {
            service: service_from_row(row)?,
            equipment_count: u64::try_from(count).unwrap_or_default(),
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO services (id, name, icon, description, status, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM services WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM services ORDER BY created_at DESC";
const SELECT_SUMMARIES: &str = r"
    SELECT s.*, COUNT(e.id) AS equipment_count
    FROM services s
    LEFT JOIN equipments e ON e.service_id = s.id
    GROUP BY s.id
    ORDER BY s.created_at DESC
";
const UPDATE: &str = r"
    UPDATE services
    SET name = ?, icon = ?, description = ?, updated_at = ?
    WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM services WHERE id = ?";
const SELECT_STATUS: &str = "SELECT status FROM services WHERE id = ?";
const UPDATE_STATUS: &str = "UPDATE services SET status = ?, updated_at = ? WHERE id = ?";

/// `SQLite`-backed service repository.
pub struct SqliteServiceRepository {
    pool: SqlitePool,
}

impl SqliteServiceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ServiceRepository for SqliteServiceRepository {
    async fn create(&self, service: Service) -> Result<Service, AirservError> {
        sqlx::query(INSERT)
            .bind(service.id.to_string())
            .bind(&service.name)
            .bind(&service.icon)
            .bind(&service.description)
            .bind(service.status.as_str())
            .bind(encode_timestamp(service.created_at))
            .bind(encode_timestamp(service.updated_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(service)
    }

    async fn get_by_id(&self, id: ServiceId) -> Result<Option<Service>, AirservError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Service>, AirservError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get_summaries(&self) -> Result<Vec<ServiceSummary>, AirservError> {
        let rows: Vec<SummaryWrapper> = sqlx::query_as(SELECT_SUMMARIES)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, service: Service) -> Result<Service, AirservError> {
        let result = sqlx::query(UPDATE)
            .bind(&service.name)
            .bind(&service.icon)
            .bind(&service.description)
            .bind(encode_timestamp(service.updated_at))
            .bind(service.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(NotFoundError {
                entity: "Service",
                id: service.id.to_string(),
            }
            .into());
        }
        Ok(service)
    }

    async fn delete(&self, id: ServiceId) -> Result<bool, AirservError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_status(&self, id: ServiceId) -> Result<Option<OperationalStatus>, AirservError> {
        let row: Option<(String,)> = sqlx::query_as(SELECT_STATUS)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        row.map(|(status,)| decode(&status))
            .transpose()
            .map_err(|err| StorageError::from(err).into())
    }

    async fn set_status(
        &self,
        id: ServiceId,
        status: OperationalStatus,
        at: Timestamp,
    ) -> Result<bool, AirservError> {
        let result = sqlx::query(UPDATE_STATUS)
            .bind(status.as_str())
            .bind(encode_timestamp(at))
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
