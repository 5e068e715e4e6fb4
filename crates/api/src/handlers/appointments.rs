use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use barberbook_core::{
    errors::BookingError,
    models::appointment::{AppointmentResponse, CreateAppointmentRequest, NewAppointment},
    query::{SlotCheckQuery, required},
    scheduling::availability::{
        AvailabilityService, fallback_duration, requested_end, suggest_alternatives,
    },
    store::BookingOutcome,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{ApiState, handlers::availability::load_settings, middleware::error_handling::AppError};

/// Books an appointment if the slot is still free at write time.
///
/// The ledger re-runs the conflict check inside its own transaction, so two
/// clients that both saw the slot as free cannot both book it. The loser gets
/// a 409 listing alternatives.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), AppError> {
    let query = SlotCheckQuery::parse(
        payload.date.as_deref(),
        payload.time.as_deref(),
        payload.service.as_deref(),
    )?;
    let client_name = required("client_name", payload.client_name.as_deref())?.to_string();
    let client_phone = payload
        .client_phone
        .as_deref()
        .map(str::trim)
        .filter(|phone| !phone.is_empty())
        .map(str::to_string);

    let settings = load_settings(state.store.as_ref()).await?;
    let engine = AvailabilityService::new(state.store.as_ref(), &settings);
    let duration = engine.resolve_duration(&query.service).await?;

    let new_start = query.time.on(query.date);
    let new = NewAppointment {
        client_name,
        client_phone,
        service_name: query.service.clone(),
        start_time: new_start,
        duration_minutes: duration,
    };

    match state
        .ledger
        .book_appointment(new, fallback_duration(&settings))
        .await?
    {
        BookingOutcome::Booked(appointment) => {
            info!(
                "Booked appointment {} for {} {}",
                appointment.id, query.date, query.time
            );
            Ok((StatusCode::CREATED, Json(appointment.into())))
        }
        BookingOutcome::SlotTaken => {
            let appointments = engine
                .appointments_until(query.date, requested_end(new_start, duration))
                .await?;
            let alternatives = suggest_alternatives(query.date, duration, &appointments, &settings)
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();

            Err(AppError(BookingError::Conflict(format!(
                "{} {} is no longer available; alternatives: [{}]",
                query.date,
                query.time,
                alternatives.join(", ")
            ))))
        }
    }
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = state.ledger.cancel_appointment(id).await?.ok_or_else(|| {
        BookingError::NotFound(format!("No scheduled appointment with ID {}", id))
    })?;

    info!("Cancelled appointment {}", id);
    Ok(Json(appointment.into()))
}

#[axum::debug_handler]
pub async fn complete_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = state.ledger.complete_appointment(id).await?.ok_or_else(|| {
        BookingError::NotFound(format!("No scheduled appointment with ID {}", id))
    })?;

    info!("Completed appointment {}", id);
    Ok(Json(appointment.into()))
}
