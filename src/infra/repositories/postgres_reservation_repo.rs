use std::sync::Arc;

use crate::domain::{models::reservation::{NewReservation, Reservation}, ports::ReservationRepository};
use crate::error::AppError;
use crate::infra::repositories::{
    on_foreign_key_violation, require_id,
    postgres_holiday_repo::PostgresHolidayRepo,
    rows::{ReservationRow, RESERVATION_SELECT},
};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::info;

pub struct PostgresReservationRepo {
    pool: PgPool,
    holidays: Arc<PostgresHolidayRepo>,
}

impl PostgresReservationRepo {
    pub fn new(pool: PgPool, holidays: Arc<PostgresHolidayRepo>) -> Self {
        Self { pool, holidays }
    }

    /// Locks the reservation row so a concurrent update or delete waits for this transaction.
    async fn lock_holiday_of(conn: &mut PgConnection, id: i64) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT holidayId FROM reservations WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepo {
    async fn insert(&self, reservation: &NewReservation) -> Result<Reservation, AppError> {
        reservation.validate()?;
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        self.holidays.reserve_slot(&mut *tx, reservation.holiday_id).await?;

        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO reservations (contactName, phoneNumber, holidayId)
               VALUES ($1, $2, $3)
               RETURNING id"#
        )
            .bind(&reservation.contact_name)
            .bind(&reservation.phone_number)
            .bind(reservation.holiday_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| on_foreign_key_violation(e, || AppError::NotFound(format!("Holiday {} not found", reservation.holiday_id))))?;

        let holiday = self.holidays.fetch(&mut *tx, reservation.holiday_id).await?
            .ok_or_else(|| AppError::NotFound(format!("Holiday {} not found", reservation.holiday_id)))?;

        tx.commit().await.map_err(AppError::Database)?;

        info!("Created reservation {} on holiday {} ({} free slots left)", id, holiday.id, holiday.free_slots);
        Ok(Reservation::new(id, reservation, holiday))
    }

    async fn update(&self, id: i64, reservation: &NewReservation) -> Result<Reservation, AppError> {
        require_id(id, "reservation")?;
        reservation.validate()?;
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let previous_holiday = Self::lock_holiday_of(&mut *tx, id).await?;
        if previous_holiday != reservation.holiday_id {
            self.holidays.release_slot(&mut *tx, previous_holiday).await?;
        }
        // Charged even when the holiday is unchanged.
        self.holidays.reserve_slot(&mut *tx, reservation.holiday_id).await?;

        sqlx::query("UPDATE reservations SET contactName = $1, phoneNumber = $2, holidayId = $3 WHERE id = $4")
            .bind(&reservation.contact_name)
            .bind(&reservation.phone_number)
            .bind(reservation.holiday_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let holiday = self.holidays.fetch(&mut *tx, reservation.holiday_id).await?
            .ok_or_else(|| AppError::NotFound(format!("Holiday {} not found", reservation.holiday_id)))?;

        tx.commit().await.map_err(AppError::Database)?;

        info!("Updated reservation {} (holiday {} -> {})", id, previous_holiday, reservation.holiday_id);
        Ok(Reservation::new(id, reservation, holiday))
    }

    async fn get_all(&self) -> Result<Vec<Reservation>, AppError> {
        let sql = format!("{} ORDER BY r.id", RESERVATION_SELECT);
        let rows = sqlx::query_as::<_, ReservationRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError> {
        let sql = format!("{} WHERE r.id = $1", RESERVATION_SELECT);
        let row = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.map(Reservation::from))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let holiday_id = Self::lock_holiday_of(&mut *tx, id).await?;
        self.holidays.release_slot(&mut *tx, holiday_id).await?;

        sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        info!("Deleted reservation {} and released a slot on holiday {}", id, holiday_id);
        Ok(())
    }
}
