use std::sync::Arc;
use crate::domain::ports::{HolidayRepository, LocationRepository, ReservationRepository};
use crate::config::Config;
use crate::infra::database::Database;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub database: Database,
    pub location_repo: Arc<dyn LocationRepository>,
    pub holiday_repo: Arc<dyn HolidayRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
}

impl AppState {
    pub async fn close(&self) {
        self.database.close().await;
    }
}
