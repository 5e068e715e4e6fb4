//! # Availability Handlers
//!
//! HTTP entry points for the availability engine.
//!
//! Both handlers follow the same sequence:
//!
//! 1. Validate query parameters (no store access on malformed input)
//! 2. Load the business settings; a store without settings is a
//!    configuration error, not an empty answer
//! 3. Run the engine query with those settings passed explicitly
//!
//! Results are snapshots. A slot reported free here can still be taken by a
//! concurrent booking; `POST /api/appointments` re-checks under a lock.

use axum::{
    Json,
    extract::{Query, State},
};
use barberbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        availability::{SlotCheck, SlotListing},
        settings::BusinessSettings,
    },
    query::{SlotCheckQuery, SlotListingQuery},
    scheduling::availability::AvailabilityService,
    store::SchedulingStore,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the slot listing endpoint
///
/// Fields are optional so a missing parameter is reported with the same
/// validation error body as a malformed one.
#[derive(Debug, Default, Deserialize)]
pub struct SlotListingParams {
    /// Calendar date, `YYYY-MM-DD`
    pub date: Option<String>,
    /// Service name, matched case-insensitively
    pub service: Option<String>,
}

/// Query parameters for the single-slot check endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SlotCheckParams {
    pub date: Option<String>,
    /// Requested start, `HH:MM`
    pub time: Option<String>,
    pub service: Option<String>,
}

/// Loads the business settings or fails with `ConfigurationMissing`.
pub async fn load_settings(store: &dyn SchedulingStore) -> BookingResult<BusinessSettings> {
    store.get_business_settings().await?.ok_or_else(|| {
        BookingError::ConfigurationMissing("No business settings have been configured".to_string())
    })
}

/// Lists free and occupied slots for a date and service
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/slots?date=2024-06-03&service=Corte
/// ```
///
/// # Errors
///
/// * `BookingError::Validation` - Missing or malformed date or service
/// * `BookingError::ConfigurationMissing` - No business settings stored
/// * `BookingError::Database` - A store read failed
#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<SlotListingParams>,
) -> Result<Json<SlotListing>, AppError> {
    let query = SlotListingQuery::parse(params.date.as_deref(), params.service.as_deref())?;
    debug!("Listing slots for '{}' on {}", query.service, query.date);

    let settings = load_settings(state.store.as_ref()).await?;
    let listing = AvailabilityService::new(state.store.as_ref(), &settings)
        .list_available_slots(&query)
        .await?;

    Ok(Json(listing))
}

/// Checks one slot and proposes alternatives when it is taken
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/check?date=2024-06-03&time=14:00&service=Corte
/// ```
///
/// Alternatives come from the fixed fallback window in the business settings,
/// not from the configured work intervals.
#[axum::debug_handler]
pub async fn check_slot(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<SlotCheckParams>,
) -> Result<Json<SlotCheck>, AppError> {
    let query = SlotCheckQuery::parse(
        params.date.as_deref(),
        params.time.as_deref(),
        params.service.as_deref(),
    )?;
    debug!(
        "Checking {} {} for '{}'",
        query.date, query.time, query.service
    );

    let settings = load_settings(state.store.as_ref()).await?;
    let check = AvailabilityService::new(state.store.as_ref(), &settings)
        .check_slot_availability(&query)
        .await?;

    Ok(Json(check))
}
