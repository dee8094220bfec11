use crate::domain::models::{
    holiday::{Holiday, HolidayFilter, NewHoliday},
    location::{Location, NewLocation},
    reservation::{NewReservation, Reservation},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn insert(&self, location: &NewLocation) -> Result<Location, AppError>;
    /// Replaces every field of the row. An unknown id is a no-op that still echoes the input.
    async fn update(&self, id: i64, location: &NewLocation) -> Result<Location, AppError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Location>, AppError>;
    async fn get_all(&self) -> Result<Vec<Location>, AppError>;
    /// Fails with `Conflict` while holidays still reference the location.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait HolidayRepository: Send + Sync {
    async fn insert(&self, holiday: &NewHoliday) -> Result<Holiday, AppError>;
    async fn update(&self, id: i64, holiday: &NewHoliday) -> Result<Holiday, AppError>;
    async fn get_all(&self, filter: &HolidayFilter) -> Result<Vec<Holiday>, AppError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Holiday>, AppError>;
    /// Fails with `Conflict` while reservations still reference the holiday.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

/// Every mutation here also moves the referenced holiday's free-slot count,
/// in the same transaction as the reservation row.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn insert(&self, reservation: &NewReservation) -> Result<Reservation, AppError>;
    async fn update(&self, id: i64, reservation: &NewReservation) -> Result<Reservation, AppError>;
    async fn get_all(&self) -> Result<Vec<Reservation>, AppError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
