pub mod sqlite_holiday_repo;
pub mod sqlite_location_repo;
pub mod sqlite_reservation_repo;

pub mod postgres_holiday_repo;
pub mod postgres_location_repo;
pub mod postgres_reservation_repo;

pub(crate) mod rows;

use crate::error::AppError;

/// Turns a foreign-key violation into the caller-facing error, anything else into `Database`.
pub(crate) fn on_foreign_key_violation<F>(err: sqlx::Error, mapped: F) -> AppError
where
    F: FnOnce() -> AppError,
{
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => mapped(),
        _ => AppError::Database(err),
    }
}

pub(crate) fn require_id(id: i64, entity: &str) -> Result<(), AppError> {
    if id <= 0 {
        return Err(AppError::Validation(format!("invalid {} id", entity)));
    }
    Ok(())
}
