use crate::domain::{models::location::{Location, NewLocation}, ports::LocationRepository};
use crate::error::AppError;
use crate::infra::repositories::{on_foreign_key_violation, require_id, rows::LOCATION_SELECT};
use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};
use tracing::{debug, info, warn};

pub struct PostgresLocationRepo {
    pool: PgPool,
}

impl PostgresLocationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn fetch<'c, E>(&self, executor: E, id: i64) -> Result<Option<Location>, AppError>
    where
        E: Executor<'c, Database = Postgres>,
    {
        let sql = format!("{} WHERE l.id = $1", LOCATION_SELECT);
        sqlx::query_as::<_, Location>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(AppError::Database)
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepo {
    async fn insert(&self, location: &NewLocation) -> Result<Location, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO locations (street, number, city, country, imageUrl)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id"#
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

        let result = sqlx::query(
            "UPDATE locations SET street = $1, number = $2, city = $3, country = $4, imageUrl = $5 WHERE id = $6"
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
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
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
