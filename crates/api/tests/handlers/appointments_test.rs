use axum::http::StatusCode;
use barberbook_core::{
    models::appointment::{Appointment, AppointmentStatus},
    store::BookingOutcome,
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, appointment, at, monday, service};

fn booking_body() -> Value {
    json!({
        "date": "2024-06-03",
        "time": "10:00",
        "service": "corte e barba",
        "client_name": "  João  ",
        "client_phone": ""
    })
}

#[tokio::test]
async fn test_create_appointment_books_with_catalog_duration() {
    let mut ctx = TestContext::configured().with_services(vec![
        service("Corte", 30),
        service("Corte e Barba", 60),
    ]);
    let id = Uuid::new_v4();
    ctx.ledger
        .expect_book_appointment()
        .withf(|new, fallback| {
            new.start_time == at(monday(), "10:00")
                && new.duration_minutes == 60
                && new.client_name == "João"
                && new.client_phone.is_none()
                && *fallback == 30
        })
        .times(1)
        .returning(move |new, _| {
            Ok(BookingOutcome::Booked(Appointment {
                id,
                client_name: new.client_name,
                client_phone: new.client_phone,
                service_name: new.service_name,
                start_time: new.start_time,
                duration_minutes: Some(new.duration_minutes),
                status: AppointmentStatus::Scheduled,
            }))
        });

    let response = ctx
        .server()
        .post("/api/appointments")
        .json(&booking_body())
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "id": id.to_string(),
            "client_name": "João",
            "client_phone": null,
            "service": "corte e barba",
            "date": "2024-06-03",
            "time": "10:00",
            "duration_minutes": 60,
            "status": "scheduled"
        })
    );
}

#[tokio::test]
async fn test_create_appointment_conflict_lists_alternatives() {
    let mut ctx = TestContext::configured()
        .with_services(vec![service("Corte e Barba", 60)])
        .with_appointments(vec![appointment(at(monday(), "09:30"), Some(60))]);
    ctx.ledger
        .expect_book_appointment()
        .times(1)
        .returning(|_, _| Ok(BookingOutcome::SlotTaken));

    let response = ctx
        .server()
        .post("/api/appointments")
        .json(&booking_body())
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "error": "Slot conflict: 2024-06-03 10:00 is no longer available; \
                      alternatives: [10:30, 11:00, 11:30, 12:00, 12:30]"
        })
    );
}

#[tokio::test]
async fn test_create_appointment_requires_client_name() {
    let mut ctx = TestContext::new();
    ctx.store.expect_get_business_settings().never();
    ctx.ledger.expect_book_appointment().never();

    let response = ctx
        .server()
        .post("/api/appointments")
        .json(&json!({
            "date": "2024-06-03",
            "time": "10:00",
            "service": "Corte"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Validation error: client_name is required" })
    );
}

#[tokio::test]
async fn test_create_appointment_ledger_failure() {
    let mut ctx = TestContext::configured().with_services(vec![service("Corte", 30)]);
    ctx.ledger
        .expect_book_appointment()
        .returning(|_, _| Err(eyre::eyre!("deadlock detected")));

    let response = ctx
        .server()
        .post("/api/appointments")
        .json(&booking_body())
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_cancel_appointment() {
    let mut ctx = TestContext::new();
    let mut cancelled = appointment(at(monday(), "15:00"), Some(30));
    cancelled.status = AppointmentStatus::Cancelled;
    let id = cancelled.id;
    ctx.ledger
        .expect_cancel_appointment()
        .with(predicate::eq(id))
        .times(1)
        .returning(move |_| Ok(Some(cancelled.clone())));

    let response = ctx
        .server()
        .post(&format!("/api/appointments/{}/cancel", id))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["status"], json!("cancelled"));
    assert_eq!(body["time"], json!("15:00"));
}

#[tokio::test]
async fn test_cancel_unknown_appointment_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.ledger
        .expect_cancel_appointment()
        .returning(|_| Ok(None));

    let response = ctx
        .server()
        .post(&format!("/api/appointments/{}/cancel", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_complete_appointment() {
    let mut ctx = TestContext::new();
    let mut completed = appointment(at(monday(), "09:00"), None);
    completed.status = AppointmentStatus::Completed;
    let id = completed.id;
    ctx.ledger
        .expect_complete_appointment()
        .with(predicate::eq(id))
        .returning(move |_| Ok(Some(completed.clone())));

    let response = ctx
        .server()
        .post(&format!("/api/appointments/{}/complete", id))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["status"], json!("completed"));
    assert_eq!(body["duration_minutes"], Value::Null);
}

#[tokio::test]
async fn test_complete_unknown_appointment_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.ledger
        .expect_complete_appointment()
        .returning(|_| Ok(None));

    let response = ctx
        .server()
        .post(&format!("/api/appointments/{}/complete", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
