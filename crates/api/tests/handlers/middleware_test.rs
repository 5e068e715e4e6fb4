use axum::http::StatusCode;
use barberbook_api::middleware::error_handling::{AppError, map_error};
use barberbook_core::errors::BookingError;
use rstest::rstest;

#[rstest]
#[case(BookingError::NotFound("Appointment".to_string()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Conflict("10:00 taken".to_string()), StatusCode::CONFLICT)]
#[case(
    BookingError::ConfigurationMissing("No settings".to_string()),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[case(BookingError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[tokio::test]
async fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_report_converts_to_database_error() {
    let error: AppError = eyre::eyre!("pool timed out").into();

    assert!(matches!(error.0, BookingError::Database(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
