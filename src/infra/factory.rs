use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::infra::database::Database;
use crate::infra::repositories::{
    postgres_holiday_repo::PostgresHolidayRepo, postgres_location_repo::PostgresLocationRepo,
    postgres_reservation_repo::PostgresReservationRepo,
    sqlite_holiday_repo::SqliteHolidayRepo, sqlite_location_repo::SqliteLocationRepo,
    sqlite_reservation_repo::SqliteReservationRepo,
};
use crate::state::AppState;

/// Connects, brings the schema up to date and wires the three stores.
pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let database = Database::connect(config).await?;
    database.migrate().await?;
    Ok(build_state(config, database))
}

/// Wires stores onto an already opened database. Each store gets the store it
/// hydrates from, so reservations reach holidays and holidays reach locations.
pub fn build_state(config: &Config, database: Database) -> AppState {
    match &database {
        Database::Postgres { pool } => {
            info!("Wiring PostgreSQL stores");
            let locations = Arc::new(PostgresLocationRepo::new(pool.clone()));
            let holidays = Arc::new(PostgresHolidayRepo::new(pool.clone(), locations.clone()));
            let reservations = Arc::new(PostgresReservationRepo::new(pool.clone(), holidays.clone()));

            AppState {
                config: config.clone(),
                database: database.clone(),
                location_repo: locations,
                holiday_repo: holidays,
                reservation_repo: reservations,
            }
        }
        Database::Sqlite { pool, gate } => {
            info!("Wiring SQLite stores");
            let locations = Arc::new(SqliteLocationRepo::new(pool.clone(), gate.clone()));
            let holidays = Arc::new(SqliteHolidayRepo::new(pool.clone(), gate.clone(), locations.clone()));
            let reservations = Arc::new(SqliteReservationRepo::new(pool.clone(), gate.clone(), holidays.clone()));

            AppState {
                config: config.clone(),
                database: database.clone(),
                location_repo: locations,
                holiday_repo: holidays,
                reservation_repo: reservations,
            }
        }
    }
}
