use axum::http::StatusCode;
use chrono::Weekday;
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, appointment, at, interval, monday, service};

#[tokio::test]
async fn test_list_slots_marks_booked_start_as_occupied() {
    let mut ctx = TestContext::configured()
        .with_services(vec![service("Corte", 30), service("Corte e Barba", 60)])
        .with_appointments(vec![appointment(at(monday(), "10:00"), Some(30))]);
    ctx.store
        .expect_get_active_work_intervals()
        .with(predicate::eq(Weekday::Mon))
        .times(1)
        .returning(|_| {
            Ok(vec![
                interval(Weekday::Mon, "13:00", "15:00"),
                interval(Weekday::Mon, "09:00", "12:00"),
            ])
        });

    let response = ctx
        .server()
        .get("/api/availability/slots")
        .add_query_param("date", "2024-06-03")
        .add_query_param("service", "corte")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "date": "2024-06-03",
            "duration_minutes": 30,
            "closed": false,
            "available": [
                "09:00", "09:30", "10:30", "11:00", "11:30",
                "13:00", "13:30", "14:00", "14:30"
            ],
            "occupied": ["10:00"],
            "periods": {
                "morning": ["09:00", "09:30", "10:30", "11:00", "11:30"],
                "afternoon": ["13:00", "13:30", "14:00", "14:30"]
            }
        })
    );
}

#[tokio::test]
async fn test_list_slots_closed_day_skips_other_reads() {
    let mut ctx = TestContext::configured();
    ctx.store
        .expect_get_active_work_intervals()
        .with(predicate::eq(Weekday::Sun))
        .returning(|_| Ok(vec![]));
    ctx.store.expect_get_active_services().never();
    ctx.store.expect_get_scheduled_appointments().never();

    let response = ctx
        .server()
        .get("/api/availability/slots")
        .add_query_param("date", "2024-06-09")
        .add_query_param("service", "Corte")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["closed"], json!(true));
    assert_eq!(body["available"], json!([]));
    assert_eq!(body["occupied"], json!([]));
}

#[tokio::test]
async fn test_check_slot_free() {
    let ctx = TestContext::configured()
        .with_services(vec![service("Corte", 30)])
        .with_appointments(vec![appointment(at(monday(), "10:00"), Some(30))]);

    let response = ctx
        .server()
        .get("/api/availability/check")
        .add_query_param("date", "2024-06-03")
        .add_query_param("time", "10:30")
        .add_query_param("service", "Corte")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "available": true }));
}

#[tokio::test]
async fn test_check_slot_taken_suggests_alternatives() {
    let ctx = TestContext::configured()
        .with_services(vec![service("Corte", 30)])
        .with_appointments(vec![
            appointment(at(monday(), "09:00"), Some(60)),
            appointment(at(monday(), "14:00"), Some(30)),
        ]);

    let response = ctx
        .server()
        .get("/api/availability/check")
        .add_query_param("date", "2024-06-03")
        .add_query_param("time", "14:00")
        .add_query_param("service", "Corte")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "available": false,
            "alternatives": ["10:00", "10:30", "11:00", "11:30", "12:00"]
        })
    );
}

#[tokio::test]
async fn test_check_slot_unknown_service_uses_default_duration() {
    // 60 min request at 09:30 would collide with 10:00; the 30 min default does not
    let ctx = TestContext::configured()
        .with_services(vec![service("Corte e Barba", 60)])
        .with_appointments(vec![appointment(at(monday(), "10:00"), Some(30))]);

    let response = ctx
        .server()
        .get("/api/availability/check")
        .add_query_param("date", "2024-06-03")
        .add_query_param("time", "09:30")
        .add_query_param("service", "Pigmentação")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["available"], json!(true));
}

#[tokio::test]
async fn test_invalid_parameters_rejected_before_store_access() {
    let mut ctx = TestContext::new();
    ctx.store.expect_get_business_settings().never();
    let server = ctx.server();

    let missing_date = server
        .get("/api/availability/slots")
        .add_query_param("service", "Corte")
        .await;
    assert_eq!(missing_date.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        missing_date.json::<Value>(),
        json!({ "error": "Validation error: date is required" })
    );

    let bad_date = server
        .get("/api/availability/slots")
        .add_query_param("date", "03/06/2024")
        .add_query_param("service", "Corte")
        .await;
    assert_eq!(bad_date.status_code(), StatusCode::BAD_REQUEST);

    let bad_time = server
        .get("/api/availability/check")
        .add_query_param("date", "2024-06-03")
        .add_query_param("time", "25:00")
        .add_query_param("service", "Corte")
        .await;
    assert_eq!(bad_time.status_code(), StatusCode::BAD_REQUEST);

    let blank_service = server
        .get("/api/availability/check")
        .add_query_param("date", "2024-06-03")
        .add_query_param("time", "10:00")
        .add_query_param("service", "   ")
        .await;
    assert_eq!(blank_service.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_settings_is_configuration_error() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_get_business_settings()
        .returning(|| Ok(None));
    ctx.store.expect_get_active_work_intervals().never();

    let response = ctx
        .server()
        .get("/api/availability/slots")
        .add_query_param("date", "2024-06-03")
        .add_query_param("service", "Corte")
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    let message = body["error"].as_str().unwrap_or_default();
    assert!(message.starts_with("Business configuration missing"));
}

#[tokio::test]
async fn test_store_failure_surfaces_as_server_error() {
    let mut ctx = TestContext::configured().with_services(vec![service("Corte", 30)]);
    ctx.store
        .expect_get_scheduled_appointments()
        .returning(|_, _| Err(eyre::eyre!("connection reset by peer")));

    let response = ctx
        .server()
        .get("/api/availability/check")
        .add_query_param("date", "2024-06-03")
        .add_query_param("time", "10:00")
        .add_query_param("service", "Corte")
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert!(
        body["error"]
            .as_str()
            .unwrap_or_default()
            .starts_with("Database error")
    );
}
