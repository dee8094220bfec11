mod common;

use common::TestApp;
use travel_agency_backend::{
    bootstrap_state,
    config::Config,
    domain::models::holiday::HolidayFilter,
};

#[tokio::test]
async fn test_reset_clears_rows_and_restarts_ids() {
    let app = TestApp::new().await;
    let location = app.location("Paris", "France").await;
    let holiday = app.holiday(location.id, "Paris Trip", 5, 10).await;
    app.reservation(holiday.id, "Ann").await;

    app.state.database.reset().await.unwrap();

    assert!(app.state.location_repo.get_all().await.unwrap().is_empty());
    assert!(app.state.holiday_repo.get_all(&HolidayFilter::default()).await.unwrap().is_empty());
    assert!(app.state.reservation_repo.get_all().await.unwrap().is_empty());

    let location = app.location("Rome", "Italy").await;
    assert_eq!(location.id, 1);
    let holiday = app.holiday(location.id, "Roman Holiday", 5, 10).await;
    assert_eq!(holiday.id, 1);
    assert_eq!(app.reservation(holiday.id, "Bob").await.id, 1);
}

#[tokio::test]
async fn test_reopening_keeps_existing_data() {
    let app = TestApp::new().await;
    let location = app.location("Paris", "France").await;

    // Migrations are idempotent on an existing file.
    let reopened = bootstrap_state(&Config {
        database_url: format!("sqlite://{}", app.db_filename),
        max_connections: Some(1),
        slow_statement_ms: 500,
        log_dir: "./logs".to_string(),
    })
    .await
    .unwrap();

    let fetched = reopened.location_repo.get_by_id(location.id).await.unwrap().unwrap();
    assert_eq!(fetched, location);
    reopened.close().await;
}

#[tokio::test]
async fn test_closed_database_reports_persistence_error() {
    let app = TestApp::new().await;
    app.state.close().await;

    let err = app.state.location_repo.get_all().await.unwrap_err();
    assert!(matches!(err, travel_agency_backend::error::AppError::Database(_)));
}
