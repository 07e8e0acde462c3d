//! # Availability Handlers
//!
//! This module implements the HTTP endpoints for a provider's availability
//! session: fetching the document, saving the weekly schedule (whole or one
//! weekday at a time), the date-override lifecycle (draft, save, remove,
//! listing), and per-date resolution for calendar rendering and booking
//! logic.
//!
//! All mutations carry the document version they were based on and fail
//! with `409 Conflict` when another session has saved in the meantime.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    AppState, DateOverride, DaySchedule, ProviderAvailability, Weekday, WeeklySchedule, date_key,
    parse_date_key,
};
use crate::services::availability::AvailabilityService;

/// Full availability document returned by the fetch endpoint.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub version: i64,
    #[serde(flatten)]
    pub availability: ProviderAvailability,
}

/// Request payload for replacing the weekly schedule.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveWeeklyRequest {
    /// Document version the edit was based on; 0 when unstored.
    #[validate(range(min = 0))]
    pub version: i64,
    pub weekly: WeeklySchedule,
}

/// Request payload for replacing a single weekday's entry.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveDayRequest {
    #[validate(range(min = 0))]
    pub version: i64,
    pub day: DaySchedule,
}

/// Request payload for saving a date override.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveOverrideRequest {
    #[validate(range(min = 0))]
    pub version: i64,
    #[serde(rename = "override")]
    pub entry: DateOverride,
}

/// Query payload for removing a date override.
#[derive(Debug, Deserialize, Validate)]
pub struct RemoveOverrideQuery {
    #[validate(range(min = 0))]
    pub version: i64,
}

/// New document version returned by every mutation.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub version: i64,
}

/// A stored override or a freshly seeded draft for the editor.
#[derive(Debug, Serialize)]
pub struct OverrideDraftResponse {
    pub date: String,
    /// Whether the entry is persisted or a draft seeded from the weekly
    /// schedule.
    pub stored: bool,
    pub version: i64,
    #[serde(rename = "override")]
    pub entry: DateOverride,
}

#[derive(Debug, Serialize)]
pub struct OverrideListEntry {
    pub date: String,
    #[serde(rename = "override")]
    pub entry: DateOverride,
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub from: String,
    pub to: String,
}

fn parse_date_param(raw: &str) -> AppResult<Date> {
    parse_date_key(raw).map_err(|_| AppError::BadRequest("Invalid date, expected YYYY-MM-DD"))
}

fn parse_weekday_param(raw: &str) -> AppResult<Weekday> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Unknown weekday name"))
}

/// Fetches the provider's availability document.
///
/// GET /api/providers/{provider_id}/availability
///
/// Providers without a stored document get the default weekly hours
/// (Monday-Friday open 09:00-18:00, weekend closed) at version 0, so the
/// first save acts as the initial insert.
///
/// # Returns
///
/// - `200 OK` with [`AvailabilityResponse`]
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(provider_id = %provider_id, request_id = %uuid::Uuid::new_v4()))]
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    debug!("Fetching availability document");

    let stored = AvailabilityService::fetch(state.repository.as_ref(), provider_id).await?;

    Ok(Json(AvailabilityResponse {
        version: stored.version,
        availability: stored.availability,
    }))
}

/// Replaces the provider's weekly schedule.
///
/// PUT /api/providers/{provider_id}/availability/weekly
///
/// Stored date overrides are kept untouched. The payload must carry the
/// document version the edit was based on.
///
/// # Returns
///
/// - `200 OK` with the new version
/// - `400 Bad Request` - Malformed payload or incoherent working hours
/// - `409 Conflict` - Document was saved by another session in the meantime
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(provider_id = %provider_id, request_id = %uuid::Uuid::new_v4()))]
pub async fn save_weekly_schedule(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<Uuid>,
    Json(payload): Json<SaveWeeklyRequest>,
) -> AppResult<impl IntoResponse> {
    debug!("Processing weekly schedule save");

    // 1. Validate shape
    if payload.validate().is_err() {
        warn!("Invalid weekly schedule payload");
        return Err(AppError::BadRequest("Invalid input"));
    }

    // 2. Persist under the optimistic-concurrency check; range coherence is
    //    validated at the service's save boundary
    let version = AvailabilityService::save_weekly(
        state.repository.as_ref(),
        provider_id,
        payload.weekly,
        payload.version,
    )
    .await?;

    info!(version, "Weekly schedule saved");
    Ok(Json(SaveResponse { version }))
}

/// Replaces a single weekday's entry in the weekly schedule.
///
/// PUT /api/providers/{provider_id}/availability/weekly/{weekday}
///
/// The weekday path segment is the lowercase English name. All other
/// weekdays keep their stored configuration.
///
/// # Returns
///
/// - `200 OK` with the new version
/// - `400 Bad Request` - Unknown weekday name, malformed payload, or
///   incoherent working hours
/// - `409 Conflict` - Document was saved by another session in the meantime
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(provider_id = %provider_id, request_id = %uuid::Uuid::new_v4()))]
pub async fn save_weekday(
    State(state): State<Arc<AppState>>,
    Path((provider_id, weekday)): Path<(Uuid, String)>,
    Json(payload): Json<SaveDayRequest>,
) -> AppResult<impl IntoResponse> {
    debug!(weekday = %weekday, "Processing weekday save");

    // 1. Validate the weekday key and payload shape
    let weekday = parse_weekday_param(&weekday)?;
    if payload.validate().is_err() {
        warn!("Invalid weekday payload");
        return Err(AppError::BadRequest("Invalid input"));
    }

    // 2. Persist
    let version = AvailabilityService::save_weekday(
        state.repository.as_ref(),
        provider_id,
        weekday,
        payload.day,
        payload.version,
    )
    .await?;

    info!(version, %weekday, "Weekday saved");
    Ok(Json(SaveResponse { version }))
}

/// Lists the provider's date overrides in ascending date order.
///
/// GET /api/providers/{provider_id}/availability/overrides
///
/// # Returns
///
/// - `200 OK` with an array of [`OverrideListEntry`]
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(provider_id = %provider_id, request_id = %uuid::Uuid::new_v4()))]
pub async fn list_overrides(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    debug!("Listing date overrides");

    let stored = AvailabilityService::fetch(state.repository.as_ref(), provider_id).await?;
    let entries: Vec<OverrideListEntry> = stored
        .availability
        .overrides
        .iter()
        .map(|(date, entry)| OverrideListEntry {
            date: date_key(date),
            entry: *entry,
        })
        .collect();

    Ok(Json(entries))
}

/// Fetches the override editor's starting state for a date.
///
/// GET /api/providers/{provider_id}/availability/overrides/{date}
///
/// Returns the stored override when one exists, otherwise a draft seeded
/// from that date's weekday in the weekly schedule. Opening the editor
/// never writes anything; a draft only persists via the save endpoint.
///
/// # Returns
///
/// - `200 OK` with [`OverrideDraftResponse`]
/// - `400 Bad Request` - Malformed date
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(provider_id = %provider_id, request_id = %uuid::Uuid::new_v4()))]
pub async fn get_override_draft(
    State(state): State<Arc<AppState>>,
    Path((provider_id, date)): Path<(Uuid, String)>,
) -> AppResult<impl IntoResponse> {
    debug!(date = %date, "Fetching override draft");

    let date = parse_date_param(&date)?;
    let (entry, stored, version) =
        AvailabilityService::override_draft(state.repository.as_ref(), provider_id, date).await?;

    Ok(Json(OverrideDraftResponse {
        date: date_key(date),
        stored,
        version,
        entry,
    }))
}

/// Saves a date override.
///
/// PUT /api/providers/{provider_id}/availability/overrides/{date}
///
/// # Returns
///
/// - `200 OK` with the new version
/// - `400 Bad Request` - Malformed date/payload or incoherent working hours
/// - `409 Conflict` - Document was saved by another session in the meantime
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(provider_id = %provider_id, request_id = %uuid::Uuid::new_v4()))]
pub async fn save_override(
    State(state): State<Arc<AppState>>,
    Path((provider_id, date)): Path<(Uuid, String)>,
    Json(payload): Json<SaveOverrideRequest>,
) -> AppResult<impl IntoResponse> {
    debug!(date = %date, "Processing override save");

    // 1. Validate the date key and payload shape
    let date = parse_date_param(&date)?;
    if payload.validate().is_err() {
        warn!("Invalid override payload");
        return Err(AppError::BadRequest("Invalid input"));
    }

    // 2. Persist
    let version = AvailabilityService::save_override(
        state.repository.as_ref(),
        provider_id,
        date,
        payload.entry,
        payload.version,
    )
    .await?;

    info!(version, "Override saved");
    Ok(Json(SaveResponse { version }))
}

/// Removes a date override, reverting the date to its weekly default.
///
/// DELETE /api/providers/{provider_id}/availability/overrides/{date}?version=N
///
/// Removal is idempotent: deleting a date with no stored override succeeds
/// without writing.
///
/// # Returns
///
/// - `200 OK` with the (possibly unchanged) version
/// - `400 Bad Request` - Malformed date or version
/// - `409 Conflict` - Document was saved by another session in the meantime
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(provider_id = %provider_id, request_id = %uuid::Uuid::new_v4()))]
pub async fn remove_override(
    State(state): State<Arc<AppState>>,
    Path((provider_id, date)): Path<(Uuid, String)>,
    Query(query): Query<RemoveOverrideQuery>,
) -> AppResult<impl IntoResponse> {
    debug!(date = %date, "Processing override removal");

    let date = parse_date_param(&date)?;
    if query.validate().is_err() {
        warn!("Invalid version parameter");
        return Err(AppError::BadRequest("Invalid input"));
    }

    let version = AvailabilityService::remove_override(
        state.repository.as_ref(),
        provider_id,
        date,
        query.version,
    )
    .await?;

    Ok(Json(SaveResponse { version }))
}

/// Resolves the effective availability for one calendar date.
///
/// GET /api/providers/{provider_id}/availability/resolve?date=YYYY-MM-DD
///
/// A stored override for the date wins; otherwise the date's weekday entry
/// in the weekly schedule applies. This is the contract booking and
/// slot-generation logic consume.
///
/// # Returns
///
/// - `200 OK` with the effective availability
/// - `400 Bad Request` - Malformed date
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(provider_id = %provider_id, request_id = %uuid::Uuid::new_v4()))]
pub async fn resolve_availability(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<Uuid>,
    Query(query): Query<ResolveQuery>,
) -> AppResult<impl IntoResponse> {
    debug!(date = %query.date, "Resolving availability");

    let date = parse_date_param(&query.date)?;
    let availability =
        AvailabilityService::resolve(state.repository.as_ref(), provider_id, date).await?;

    Ok(Json(availability))
}

/// Resolves every date in an inclusive range, for calendar rendering.
///
/// GET /api/providers/{provider_id}/availability/calendar?from=…&to=…
///
/// # Returns
///
/// - `200 OK` with one entry per date, in order
/// - `400 Bad Request` - Malformed dates, reversed range, or a range beyond
///   the supported span
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(provider_id = %provider_id, request_id = %uuid::Uuid::new_v4()))]
pub async fn resolve_calendar(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<Uuid>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<impl IntoResponse> {
    debug!(from = %query.from, to = %query.to, "Resolving calendar range");

    let from = parse_date_param(&query.from)?;
    let to = parse_date_param(&query.to)?;
    let days =
        AvailabilityService::resolve_range(state.repository.as_ref(), provider_id, from, to)
            .await?;

    Ok(Json(days))
}
