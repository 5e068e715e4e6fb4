//! # Barberbook API
//!
//! The API crate provides the HTTP boundary of the appointment availability
//! engine: slot listings, single-slot checks with alternatives, and the
//! booking endpoints that write through the appointment ledger.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Validate input, load business settings and call the engine
//! - **Middleware**: Map domain errors to HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! Handlers only see the collaborator traits from `barberbook_core::store`,
//! so tests can swap the PostgreSQL store for mocks.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use barberbook_core::store::{AppointmentLedger, SchedulingStore};
use barberbook_db::{DbPool, store::PgStore};
use eyre::Result;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// Holds the read side (`store`) and write side (`ledger`) of persistence.
/// Both are usually the same `PgStore`.
pub struct ApiState {
    pub store: Arc<dyn SchedulingStore>,
    pub ledger: Arc<dyn AppointmentLedger>,
}

impl ApiState {
    pub fn from_pool(db_pool: DbPool) -> Self {
        let store = Arc::new(PgStore::new(db_pool));
        Self {
            store: store.clone(),
            ledger: store,
        }
    }
}

/// Builds the router with every endpoint attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot listing and slot checks
        .merge(routes::availability::routes())
        // Booking and status transitions
        .merge(routes::appointments::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and database connection
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `db_pool` - PostgreSQL connection pool backing the store and ledger
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::from_pool(db_pool));
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins: Vec<axum::http::HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware; bounds every store read a request makes
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TimeoutLayer::new(std::time::Duration::from_secs(
                config.request_timeout,
            )))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
