use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/availability/slots",
            get(handlers::availability::list_slots),
        )
        .route(
            "/api/availability/check",
            get(handlers::availability::check_slot),
        )
}
