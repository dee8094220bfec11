mod common;

use common::{new_location, TestApp};
use travel_agency_backend::error::AppError;

#[tokio::test]
async fn test_insert_then_get_by_id() {
    let app = TestApp::new().await;
    let fields = new_location("Paris", "France");

    let created = app.state.location_repo.insert(&fields).await.unwrap();
    assert_eq!(created.id, 1);

    let fetched = app.state.location_repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.street, fields.street);
    assert_eq!(fetched.number, fields.number);
    assert_eq!(fetched.city, "Paris");
    assert_eq!(fetched.country, "France");
    assert_eq!(fetched.image_url, fields.image_url);
}

#[tokio::test]
async fn test_identifiers_are_unique() {
    let app = TestApp::new().await;

    let first = app.location("Paris", "France").await;
    let second = app.location("Rome", "Italy").await;
    app.state.location_repo.delete(second.id).await.unwrap();
    let third = app.location("Oslo", "Norway").await;

    assert_ne!(first.id, second.id);
    assert_ne!(second.id, third.id);
    assert_ne!(first.id, third.id);
}

#[tokio::test]
async fn test_get_unknown_location_is_none() {
    let app = TestApp::new().await;
    assert!(app.state.location_repo.get_by_id(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_all() {
    let app = TestApp::new().await;
    assert!(app.state.location_repo.get_all().await.unwrap().is_empty());

    app.location("Paris", "France").await;
    app.location("London", "United Kingdom").await;

    let all = app.state.location_repo.get_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|l| l.city == "Paris"));
    assert!(all.iter().any(|l| l.city == "London"));
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let app = TestApp::new().await;
    let created = app.location("Paris", "France").await;

    let mut fields = new_location("Lyon", "France");
    fields.street = "Rue B".to_string();
    fields.number = "22".to_string();

    let updated = app.state.location_repo.update(created.id, &fields).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.city, "Lyon");

    let fetched = app.state.location_repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.street, "Rue B");
    assert_eq!(fetched.number, "22");
    assert_eq!(fetched.city, "Lyon");
}

#[tokio::test]
async fn test_update_unknown_location_echoes_input() {
    let app = TestApp::new().await;
    let fields = new_location("Nowhere", "Atlantis");

    let echoed = app.state.location_repo.update(99, &fields).await.unwrap();
    assert_eq!(echoed.id, 99);
    assert_eq!(echoed.city, "Nowhere");
    assert!(app.state.location_repo.get_by_id(99).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_without_identifier_is_rejected() {
    let app = TestApp::new().await;
    let err = app.state.location_repo.update(0, &new_location("Paris", "France")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_delete() {
    let app = TestApp::new().await;
    let created = app.location("Paris", "France").await;

    app.state.location_repo.delete(created.id).await.unwrap();
    assert!(app.state.location_repo.get_by_id(created.id).await.unwrap().is_none());

    // No row matched, still fine.
    app.state.location_repo.delete(created.id).await.unwrap();
}

#[tokio::test]
async fn test_delete_referenced_location_is_refused() {
    let app = TestApp::new().await;
    let location = app.location("Paris", "France").await;
    let holiday = app.holiday(location.id, "Paris Trip", 5, 10).await;

    let err = app.state.location_repo.delete(location.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(app.state.location_repo.get_by_id(location.id).await.unwrap().is_some());

    app.state.holiday_repo.delete(holiday.id).await.unwrap();
    app.state.location_repo.delete(location.id).await.unwrap();
    assert!(app.state.location_repo.get_by_id(location.id).await.unwrap().is_none());
}
