use crate::domain::{models::location::{Location, NewLocation}, ports::LocationRepository};
use crate::error::AppError;
use crate::infra::database::WriteGate;
use crate::infra::repositories::{on_foreign_key_violation, require_id, rows::LOCATION_SELECT};
use async_trait::async_trait;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{debug, info, warn};

pub struct SqliteLocationRepo {
    pool: SqlitePool,
    gate: WriteGate,
}

impl SqliteLocationRepo {
    pub fn new(pool: SqlitePool, gate: WriteGate) -> Self {
        Self { pool, gate }
    }

    /// Lookup usable both on the pool and inside another store's transaction.
    pub(crate) async fn fetch<'c, E>(&self, executor: E, id: i64) -> Result<Option<Location>, AppError>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let sql = format!("{} WHERE l.id = ?", LOCATION_SELECT);
        sqlx::query_as::<_, Location>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(AppError::Database)
    }
}

#[async_trait]
impl LocationRepository for SqliteLocationRepo {
    async fn insert(&self, location: &NewLocation) -> Result<Location, AppError> {
        let _guard = self.gate.lock().await;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO locations (street, number, city, country, imageUrl) VALUES (?, ?, ?, ?, ?) RETURNING id"
        )
            .bind(&location.street)
            .bind(&location.number)
            .bind(&location.city)
            .bind(&location.country)
            .bind(&location.image_url)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        info!("Created location {} in {}, {}", id, location.city, location.country);
        Ok(Location::new(id, location))
    }

    async fn update(&self, id: i64, location: &NewLocation) -> Result<Location, AppError> {
        require_id(id, "location")?;
        let _guard = self.gate.lock().await;

        let result = sqlx::query(
            "UPDATE locations SET street = ?, number = ?, city = ?, country = ?, imageUrl = ? WHERE id = ?"
        )
            .bind(&location.street)
            .bind(&location.number)
            .bind(&location.city)
            .bind(&location.country)
            .bind(&location.image_url)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            debug!("Update of unknown location {} matched no row", id);
        } else {
            info!("Updated location {}", id);
        }
        Ok(Location::new(id, location))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Location>, AppError> {
        self.fetch(&self.pool, id).await
    }

    async fn get_all(&self) -> Result<Vec<Location>, AppError> {
        let sql = format!("{} ORDER BY l.id", LOCATION_SELECT);
        sqlx::query_as::<_, Location>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let _guard = self.gate.lock().await;

        let result = sqlx::query("DELETE FROM locations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| on_foreign_key_violation(e, || {
                warn!("Refused to delete location {} that holidays still reference", id);
                AppError::Conflict(format!("Location {} is still referenced by holidays", id))
            }))?;

        info!("Deleted location {} ({} row(s))", id, result.rows_affected());
        Ok(())
    }
}
