//! # Schedule Repository
//!
//! Storage for provider availability documents, behind a trait so the HTTP
//! layer is independent of the backing store.
//!
//! ## Implementations
//!
//! - [`PgScheduleRepository`] - Production implementation, one Postgres row
//!   per provider with JSONB document columns
//! - [`InMemoryScheduleRepository`] - Map-backed implementation for tests
//!   and local development
//!
//! Both enforce the same optimistic-concurrency contract: a save carries the
//! version the caller read, and fails with a conflict when the stored
//! document has moved on. Version 0 means "no document stored yet" and
//! performs the initial insert.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{DateOverrideStore, ProviderAvailability, WeeklySchedule};

/// Version clients send when no document has been stored for the provider
/// yet.
pub const UNSTORED_VERSION: i64 = 0;

/// A provider's stored availability document together with its version.
#[derive(Debug, Clone)]
pub struct VersionedSchedule {
    pub availability: ProviderAvailability,
    pub version: i64,
}

/// Trait for availability document storage
///
/// This trait provides a common interface for different storage backends,
/// allowing the application to switch between Postgres and an in-memory
/// implementation for testing.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Loads the stored document for a provider, if any.
    async fn load(&self, provider_id: Uuid) -> AppResult<Option<VersionedSchedule>>;

    /// Stores `availability` for the provider under the optimistic
    /// concurrency check.
    ///
    /// `expected_version` must match the currently stored version
    /// ([`UNSTORED_VERSION`] when nothing is stored yet). Returns the new
    /// version on success.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when another session has modified the
    /// document since `expected_version` was read.
    async fn save(
        &self,
        provider_id: Uuid,
        availability: &ProviderAvailability,
        expected_version: i64,
    ) -> AppResult<i64>;
}

/// Postgres-backed repository: one `provider_schedules` row per provider.
pub struct PgScheduleRepository {
    db_pool: PgPool,
}

impl PgScheduleRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[derive(sqlx::FromRow)]
struct ScheduleRow {
    weekly: Json<WeeklySchedule>,
    overrides: Json<DateOverrideStore>,
    version: i64,
}

#[async_trait]
impl ScheduleRepository for PgScheduleRepository {
    #[instrument(skip(self))]
    async fn load(&self, provider_id: Uuid) -> AppResult<Option<VersionedSchedule>> {
        let row = sqlx::query_as::<_, ScheduleRow>(
            "SELECT weekly, overrides, version FROM provider_schedules WHERE provider_id = $1",
        )
        .bind(provider_id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(row.map(|row| VersionedSchedule {
            availability: ProviderAvailability {
                weekly: row.weekly.0,
                overrides: row.overrides.0,
            },
            version: row.version,
        }))
    }

    #[instrument(skip(self, availability))]
    async fn save(
        &self,
        provider_id: Uuid,
        availability: &ProviderAvailability,
        expected_version: i64,
    ) -> AppResult<i64> {
        if expected_version == UNSTORED_VERSION {
            let result = sqlx::query(
                "INSERT INTO provider_schedules (provider_id, weekly, overrides, version) \
                 VALUES ($1, $2, $3, 1) \
                 ON CONFLICT (provider_id) DO NOTHING",
            )
            .bind(provider_id)
            .bind(Json(&availability.weekly))
            .bind(Json(&availability.overrides))
            .execute(&self.db_pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::Conflict(
                    "Schedule was created by another session",
                ));
            }
            debug!("Inserted initial schedule document");
            return Ok(1);
        }

        let result = sqlx::query(
            "UPDATE provider_schedules \
             SET weekly = $2, overrides = $3, version = version + 1, updated_at = now() \
             WHERE provider_id = $1 AND version = $4",
        )
        .bind(provider_id)
        .bind(Json(&availability.weekly))
        .bind(Json(&availability.overrides))
        .bind(expected_version)
        .execute(&self.db_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "Schedule was modified by another session",
            ));
        }
        Ok(expected_version + 1)
    }
}

/// In-memory repository for integration tests and local development
///
/// Mirrors the Postgres compare-and-set semantics over a concurrent map so
/// tests exercise the same conflict paths without a database.
#[derive(Default)]
pub struct InMemoryScheduleRepository {
    entries: DashMap<Uuid, VersionedSchedule>,
}

impl InMemoryScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepository {
    async fn load(&self, provider_id: Uuid) -> AppResult<Option<VersionedSchedule>> {
        Ok(self
            .entries
            .get(&provider_id)
            .map(|entry| entry.value().clone()))
    }

    async fn save(
        &self,
        provider_id: Uuid,
        availability: &ProviderAvailability,
        expected_version: i64,
    ) -> AppResult<i64> {
        match self.entries.entry(provider_id) {
            Entry::Vacant(slot) => {
                if expected_version != UNSTORED_VERSION {
                    return Err(AppError::Conflict(
                        "Schedule was modified by another session",
                    ));
                }
                slot.insert(VersionedSchedule {
                    availability: availability.clone(),
                    version: 1,
                });
                Ok(1)
            }
            Entry::Occupied(mut slot) => {
                if slot.get().version != expected_version {
                    return Err(AppError::Conflict(
                        "Schedule was modified by another session",
                    ));
                }
                let version = expected_version + 1;
                slot.insert(VersionedSchedule {
                    availability: availability.clone(),
                    version,
                });
                Ok(version)
            }
        }
    }
}
