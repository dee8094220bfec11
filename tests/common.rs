use travel_agency_backend::{
    bootstrap_state,
    config::Config,
    domain::models::{
        holiday::{Holiday, NewHoliday},
        location::{Location, NewLocation},
        reservation::{NewReservation, Reservation},
    },
    state::AppState,
};
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub state: AppState,
    pub db_filename: String,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let config = Config {
            database_url: db_url,
            max_connections: Some(5),
            slow_statement_ms: 500,
            log_dir: "./logs".to_string(),
        };

        let state = bootstrap_state(&config)
            .await
            .expect("Failed to bootstrap test db");

        Self { state, db_filename }
    }

    pub async fn location(&self, city: &str, country: &str) -> Location {
        self.state.location_repo.insert(&new_location(city, country)).await.unwrap()
    }

    pub async fn holiday(&self, location_id: i64, title: &str, duration: i32, free_slots: i32) -> Holiday {
        self.state.holiday_repo.insert(&new_holiday(location_id, title, duration, free_slots)).await.unwrap()
    }

    pub async fn reservation(&self, holiday_id: i64, contact_name: &str) -> Reservation {
        self.state.reservation_repo.insert(&new_reservation(holiday_id, contact_name)).await.unwrap()
    }

    pub async fn free_slots(&self, holiday_id: i64) -> i32 {
        self.state.holiday_repo.get_by_id(holiday_id).await.unwrap()
            .expect("holiday should exist")
            .free_slots
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

#[allow(dead_code)]
pub fn new_location(city: &str, country: &str) -> NewLocation {
    NewLocation {
        street: "Main Street".to_string(),
        number: "1".to_string(),
        city: city.to_string(),
        country: country.to_string(),
        image_url: format!("https://img.example/{}.jpg", city.to_lowercase()),
    }
}

#[allow(dead_code)]
pub fn new_holiday(location_id: i64, title: &str, duration: i32, free_slots: i32) -> NewHoliday {
    NewHoliday {
        title: title.to_string(),
        start_date: "2024-06-01".to_string(),
        duration,
        price: 499.99,
        free_slots,
        location_id,
    }
}

#[allow(dead_code)]
pub fn new_reservation(holiday_id: i64, contact_name: &str) -> NewReservation {
    NewReservation {
        contact_name: contact_name.to_string(),
        phone_number: "555".to_string(),
        holiday_id,
    }
}
