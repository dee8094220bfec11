use std::sync::Arc;

use crate::domain::{models::holiday::{Holiday, HolidayFilter, NewHoliday}, ports::HolidayRepository};
use crate::error::AppError;
use crate::infra::database::WriteGate;
use crate::infra::repositories::{
    on_foreign_key_violation, require_id,
    rows::{HolidayRow, HOLIDAY_SELECT},
    sqlite_location_repo::SqliteLocationRepo,
};
use async_trait::async_trait;
use sqlx::{Executor, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

pub struct SqliteHolidayRepo {
    pool: SqlitePool,
    gate: WriteGate,
    locations: Arc<SqliteLocationRepo>,
}

impl SqliteHolidayRepo {
    pub fn new(pool: SqlitePool, gate: WriteGate, locations: Arc<SqliteLocationRepo>) -> Self {
        Self { pool, gate, locations }
    }

    pub(crate) async fn fetch<'c, E>(&self, executor: E, id: i64) -> Result<Option<Holiday>, AppError>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let sql = format!("{} WHERE h.id = ?", HOLIDAY_SELECT);
        let row = sqlx::query_as::<_, HolidayRow>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(AppError::Database)?;
        Ok(row.map(Holiday::from))
    }

    /// Takes one free slot. The caller holds the write gate and owns the transaction.
    pub(crate) async fn reserve_slot(&self, conn: &mut SqliteConnection, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE holidays SET freeSlots = freeSlots - 1 WHERE id = ? AND freeSlots > 0")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM holidays WHERE id = ?")
                .bind(id)
                .fetch_one(&mut *conn)
                .await
                .map_err(AppError::Database)?;

            if exists == 0 {
                return Err(AppError::NotFound(format!("Holiday {} not found", id)));
            }
            warn!("Holiday {} is fully booked", id);
            return Err(AppError::CapacityExceeded(format!("Holiday {} has no free slots left", id)));
        }

        debug!("Reserved a slot on holiday {}", id);
        Ok(())
    }

    /// Gives one slot back. Same locking contract as `reserve_slot`.
    pub(crate) async fn release_slot(&self, conn: &mut SqliteConnection, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE holidays SET freeSlots = freeSlots + 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Holiday {} not found", id)));
        }

        debug!("Released a slot on holiday {}", id);
        Ok(())
    }
}

#[async_trait]
impl HolidayRepository for SqliteHolidayRepo {
    async fn insert(&self, holiday: &NewHoliday) -> Result<Holiday, AppError> {
        holiday.validate()?;
        let _guard = self.gate.lock().await;
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let location = self.locations.fetch(&mut *tx, holiday.location_id).await?
            .ok_or_else(|| AppError::NotFound(format!("Location {} not found", holiday.location_id)))?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO holidays (title, startDate, duration, price, freeSlots, locationId) VALUES (?, ?, ?, ?, ?, ?) RETURNING id"
        )
            .bind(&holiday.title)
            .bind(&holiday.start_date)
            .bind(holiday.duration)
            .bind(holiday.price)
            .bind(holiday.free_slots)
            .bind(holiday.location_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| on_foreign_key_violation(e, || AppError::NotFound(format!("Location {} not found", holiday.location_id))))?;

        tx.commit().await.map_err(AppError::Database)?;

        info!("Created holiday {} '{}' with {} free slots", id, holiday.title, holiday.free_slots);
        Ok(Holiday::new(id, holiday, location))
    }

    async fn update(&self, id: i64, holiday: &NewHoliday) -> Result<Holiday, AppError> {
        require_id(id, "holiday")?;
        holiday.validate()?;
        let _guard = self.gate.lock().await;
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let location = self.locations.fetch(&mut *tx, holiday.location_id).await?
            .ok_or_else(|| AppError::NotFound(format!("Location {} not found", holiday.location_id)))?;

        let result = sqlx::query(
            "UPDATE holidays SET title = ?, startDate = ?, duration = ?, price = ?, freeSlots = ?, locationId = ? WHERE id = ?"
        )
            .bind(&holiday.title)
            .bind(&holiday.start_date)
            .bind(holiday.duration)
            .bind(holiday.price)
            .bind(holiday.free_slots)
            .bind(holiday.location_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| on_foreign_key_violation(e, || AppError::NotFound(format!("Location {} not found", holiday.location_id))))?;

        tx.commit().await.map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            debug!("Update of unknown holiday {} matched no row", id);
        } else {
            info!("Updated holiday {} ({} free slots)", id, holiday.free_slots);
        }
        Ok(Holiday::new(id, holiday, location))
    }

    async fn get_all(&self, filter: &HolidayFilter) -> Result<Vec<Holiday>, AppError> {
        let mut query = QueryBuilder::<Sqlite>::new(HOLIDAY_SELECT);
        query.push(" WHERE 1=1");

        if let Some(location) = &filter.location {
            query.push(" AND (l.city = ").push_bind(location.clone())
                .push(" OR l.country = ").push_bind(location.clone())
                .push(")");
        }
        if let Some(start_date) = &filter.start_date {
            query.push(" AND h.startDate = ").push_bind(start_date.clone());
        }
        if let Some(duration) = filter.duration {
            query.push(" AND h.duration = ").push_bind(duration);
        }
        query.push(" ORDER BY h.id");

        let rows = query.build_query_as::<HolidayRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        debug!("Holiday listing matched {} row(s) for {:?}", rows.len(), filter);
        Ok(rows.into_iter().map(Holiday::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Holiday>, AppError> {
        self.fetch(&self.pool, id).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let _guard = self.gate.lock().await;

        let result = sqlx::query("DELETE FROM holidays WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| on_foreign_key_violation(e, || {
                warn!("Refused to delete holiday {} that reservations still reference", id);
                AppError::Conflict(format!("Holiday {} still has reservations", id))
            }))?;

        info!("Deleted holiday {} ({} row(s))", id, result.rows_affected());
        Ok(())
    }
}
