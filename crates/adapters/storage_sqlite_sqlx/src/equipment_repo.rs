//! `SQLite` implementation of [`EquipmentRepository`].

use std::future::Future;
use std::net::IpAddr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use airserv_app::ports::EquipmentRepository;
use airserv_domain::equipment::Equipment;
use airserv_domain::error::{AirservError, NotFoundError};
use airserv_domain::id::{EquipmentId, ServiceId};
use airserv_domain::status::OperationalStatus;

use crate::columns::{decode, decode_timestamp, encode_timestamp};
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Equipment`].
struct Wrapper(Equipment);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Equipment> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let service_id: String = row.try_get("service_id")?;
        let ip_address: Option<String> = row.try_get("ip_address")?;
        let status: String = row.try_get("status")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Self(Equipment {
            id: decode(&id)?,
            service_id: decode(&service_id)?,
            name: row.try_get("name")?,
            ip_address: ip_address
                .as_deref()
                .map(decode::<IpAddr>)
                .transpose()?,
            status: decode(&status)?,
            location: row.try_get("location")?,
            model: row.try_get("model")?,
            created_at: decode_timestamp(&created_at)?,
            updated_at: decode_timestamp(&updated_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO equipments
        (id, service_id, name, ip_address, status, location, model, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM equipments WHERE id = ?";
const SELECT_BY_SERVICE: &str = "SELECT * FROM equipments WHERE service_id = ? ORDER BY name";
const SELECT_ALL: &str = "SELECT * FROM equipments ORDER BY name";
const UPDATE: &str = r"
    UPDATE equipments
    SET name = ?, ip_address = ?, status = ?, location = ?, model = ?, updated_at = ?
    WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM equipments WHERE id = ?";
const SELECT_STATUSES: &str = "SELECT status FROM equipments WHERE service_id = ?";

/// `SQLite`-backed equipment repository.
pub struct SqliteEquipmentRepository {
    pool: SqlitePool,
}

impl SqliteEquipmentRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EquipmentRepository for SqliteEquipmentRepository {
    fn create(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, AirservError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(equipment.id.to_string())
                .bind(equipment.service_id.to_string())
                .bind(&equipment.name)
                .bind(equipment.ip_address.map(|ip| ip.to_string()))
                .bind(equipment.status.as_str())
                .bind(&equipment.location)
                .bind(&equipment.model)
                .bind(encode_timestamp(equipment.created_at))
                .bind(encode_timestamp(equipment.updated_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(equipment)
        }
    }

    fn get_by_id(
        &self,
        id: EquipmentId,
    ) -> impl Future<Output = Result<Option<Equipment>, AirservError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_by_service(
        &self,
        service_id: ServiceId,
    ) -> impl Future<Output = Result<Vec<Equipment>, AirservError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_SERVICE)
                .bind(service_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Equipment>, AirservError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, AirservError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&equipment.name)
                .bind(equipment.ip_address.map(|ip| ip.to_string()))
                .bind(equipment.status.as_str())
                .bind(&equipment.location)
                .bind(&equipment.model)
                .bind(encode_timestamp(equipment.updated_at))
                .bind(equipment.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: "Equipment",
                    id: equipment.id.to_string(),
                }
                .into());
            }

            Ok(equipment)
        }
    }

    fn delete(&self, id: EquipmentId) -> impl Future<Output = Result<bool, AirservError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }

    fn list_statuses(
        &self,
        service_id: ServiceId,
    ) -> impl Future<Output = Result<Vec<OperationalStatus>, AirservError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<(String,)> = sqlx::query_as(SELECT_STATUSES)
                .bind(service_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let statuses = rows
                .iter()
                .map(|(status,)| decode(status))
                .collect::<Result<Vec<_>, _>>()
                .map_err(StorageError::from)?;
            Ok(statuses)
        }
    }
}
