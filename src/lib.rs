//! # Velora - Provider Availability Backend
//!
//! Backend service for providers on the Velora beauty-services marketplace:
//! recurring weekly working hours, date-specific overrides, and per-date
//! resolution of effective availability for calendars and booking logic.
//!
//! ## Modules
//!
//! - [`handlers`] - HTTP request handlers for the availability endpoints
//! - [`models`] - The availability engine: time values, day/weekly
//!   schedules, date overrides, resolution
//! - [`services`] - Business logic and document storage
//! - [`utils`] - Utility constants and input validation

pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    get_availability, get_override_draft, health_check, list_overrides, remove_override,
    resolve_availability, resolve_calendar, save_override, save_weekday, save_weekly_schedule,
};
use crate::models::AppState;
use crate::services::repository::{PgScheduleRepository, ScheduleRepository};

/// Creates an Axum router backed by Postgres storage.
///
/// This is a convenience function that calls [`app_with_repository`] with a
/// [`PgScheduleRepository`] over the given pool.
#[inline]
pub fn app(db_pool: PgPool) -> Router {
    app_with_repository(Arc::new(PgScheduleRepository::new(db_pool)))
}

/// Creates an Axum router with application routes and state.
///
/// # Arguments
///
/// * `repository` - Storage backend for availability documents; tests pass
///   an in-memory implementation here
///
/// # Returns
///
/// A configured Axum router with all application routes and request tracing
pub fn app_with_repository(repository: Arc<dyn ScheduleRepository>) -> Router {
    let state = Arc::new(AppState::new(repository));

    let availability_routes = Router::new()
        .route(
            "/api/providers/{provider_id}/availability",
            get(get_availability),
        )
        .route(
            "/api/providers/{provider_id}/availability/weekly",
            put(save_weekly_schedule),
        )
        .route(
            "/api/providers/{provider_id}/availability/weekly/{weekday}",
            put(save_weekday),
        )
        .route(
            "/api/providers/{provider_id}/availability/overrides",
            get(list_overrides),
        )
        .route(
            "/api/providers/{provider_id}/availability/overrides/{date}",
            get(get_override_draft)
                .put(save_override)
                .delete(remove_override),
        )
        .route(
            "/api/providers/{provider_id}/availability/resolve",
            get(resolve_availability),
        )
        .route(
            "/api/providers/{provider_id}/availability/calendar",
            get(resolve_calendar),
        );

    Router::new()
        .route("/health-check", get(health_check))
        .merge(availability_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
