//! # Availability Service
//!
//! Orchestrates the availability engine over the schedule repository: every
//! mutation is a read-modify-write of the provider's whole document under
//! the optimistic-concurrency check, and every read falls back to the
//! default weekly hours when nothing has been stored yet.

use serde::Serialize;
use time::Date;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    DateOverride, DaySchedule, EffectiveAvailability, ProviderAvailability, Weekday,
    WeeklySchedule, date_key,
};
use crate::services::repository::{ScheduleRepository, UNSTORED_VERSION, VersionedSchedule};
use crate::utils::constant::MAX_CALENDAR_SPAN_DAYS;

/// One resolved calendar day, as returned by the range resolution.
#[derive(Debug, Clone, Serialize)]
pub struct DayAvailability {
    pub date: String,
    pub availability: EffectiveAvailability,
}

pub struct AvailabilityService;

impl AvailabilityService {
    /// Loads the provider's document, falling back to the default weekly
    /// hours (Mon-Fri open, weekend closed) at version [`UNSTORED_VERSION`]
    /// when nothing has been stored yet.
    pub async fn fetch(
        repository: &dyn ScheduleRepository,
        provider_id: Uuid,
    ) -> AppResult<VersionedSchedule> {
        let stored = repository.load(provider_id).await?;
        Ok(stored.unwrap_or_else(|| {
            debug!("No stored schedule, serving defaults");
            VersionedSchedule {
                availability: ProviderAvailability::default(),
                version: UNSTORED_VERSION,
            }
        }))
    }

    /// Replaces the weekly schedule, keeping the stored overrides.
    #[instrument(skip_all, fields(provider_id = %provider_id))]
    pub async fn save_weekly(
        repository: &dyn ScheduleRepository,
        provider_id: Uuid,
        weekly: WeeklySchedule,
        expected_version: i64,
    ) -> AppResult<i64> {
        weekly.validate()?;

        let mut stored = Self::fetch(repository, provider_id).await?;
        stored.availability.weekly = weekly;

        let version = repository
            .save(provider_id, &stored.availability, expected_version)
            .await?;
        info!(version, "Weekly schedule saved");
        Ok(version)
    }

    /// Replaces a single weekday's entry in the weekly schedule.
    #[instrument(skip_all, fields(provider_id = %provider_id, weekday = %weekday))]
    pub async fn save_weekday(
        repository: &dyn ScheduleRepository,
        provider_id: Uuid,
        weekday: Weekday,
        day: DaySchedule,
        expected_version: i64,
    ) -> AppResult<i64> {
        day.validate()?;

        let mut stored = Self::fetch(repository, provider_id).await?;
        stored.availability.weekly.set_day(weekday, day);

        let version = repository
            .save(provider_id, &stored.availability, expected_version)
            .await?;
        info!(version, "Weekday schedule saved");
        Ok(version)
    }

    /// The stored override for `date`, or a draft seeded from the weekly
    /// schedule. Returns the entry, whether it is actually stored, and the
    /// document version the draft was based on. Never mutates the store.
    pub async fn override_draft(
        repository: &dyn ScheduleRepository,
        provider_id: Uuid,
        date: Date,
    ) -> AppResult<(DateOverride, bool, i64)> {
        let stored = Self::fetch(repository, provider_id).await?;
        let is_stored = stored.availability.overrides.contains(date);
        let draft = stored
            .availability
            .overrides
            .draft_for(date, &stored.availability.weekly);
        Ok((draft, is_stored, stored.version))
    }

    /// Saves (inserts or replaces) a date override.
    #[instrument(skip_all, fields(provider_id = %provider_id, date = %date_key(date)))]
    pub async fn save_override(
        repository: &dyn ScheduleRepository,
        provider_id: Uuid,
        date: Date,
        entry: DateOverride,
        expected_version: i64,
    ) -> AppResult<i64> {
        entry.validate()?;

        let mut stored = Self::fetch(repository, provider_id).await?;
        stored.availability.overrides.save(date, entry);

        let version = repository
            .save(provider_id, &stored.availability, expected_version)
            .await?;
        info!(version, "Date override saved");
        Ok(version)
    }

    /// Removes a date override. Removal is idempotent: when no entry exists
    /// for `date`, nothing is written and the current version is returned
    /// unchanged.
    #[instrument(skip_all, fields(provider_id = %provider_id, date = %date_key(date)))]
    pub async fn remove_override(
        repository: &dyn ScheduleRepository,
        provider_id: Uuid,
        date: Date,
        expected_version: i64,
    ) -> AppResult<i64> {
        let mut stored = Self::fetch(repository, provider_id).await?;
        if !stored.availability.overrides.remove(date) {
            debug!("No override stored for date, nothing to remove");
            return Ok(stored.version);
        }

        let version = repository
            .save(provider_id, &stored.availability, expected_version)
            .await?;
        info!(version, "Date override removed");
        Ok(version)
    }

    /// Resolves the effective availability for one calendar date.
    pub async fn resolve(
        repository: &dyn ScheduleRepository,
        provider_id: Uuid,
        date: Date,
    ) -> AppResult<EffectiveAvailability> {
        let stored = Self::fetch(repository, provider_id).await?;
        Ok(stored.availability.resolve(date))
    }

    /// Resolves every date in the inclusive `from..=to` range, bounded by
    /// [`MAX_CALENDAR_SPAN_DAYS`].
    pub async fn resolve_range(
        repository: &dyn ScheduleRepository,
        provider_id: Uuid,
        from: Date,
        to: Date,
    ) -> AppResult<Vec<DayAvailability>> {
        if from > to {
            return Err(AppError::BadRequest("`from` must not be after `to`"));
        }
        if (to - from).whole_days() >= MAX_CALENDAR_SPAN_DAYS {
            return Err(AppError::BadRequest("Date range is too large"));
        }

        let stored = Self::fetch(repository, provider_id).await?;

        let mut days = Vec::new();
        let mut date = from;
        loop {
            days.push(DayAvailability {
                date: date_key(date),
                availability: stored.availability.resolve(date),
            });
            if date == to {
                break;
            }
            date = date
                .next_day()
                .ok_or(AppError::BadRequest("Date range exceeds the supported calendar"))?;
        }
        Ok(days)
    }
}
