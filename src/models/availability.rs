//! # Provider Availability Document
//!
//! The full availability session for one provider: the recurring weekly
//! schedule plus the date override store, and the resolution function that
//! answers "what are the effective hours on this date". Resolution is the
//! contract booking/slot generation consumes.

use serde::{Deserialize, Serialize};
use time::Date;

use super::{BreakWindow, DateOverrideStore, ScheduleError, TimeRange, Weekday, WeeklySchedule};

/// A provider's complete availability configuration.
///
/// This is the unit of persistence: one document per provider, replaced
/// wholesale on save so readers never observe a partially updated schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAvailability {
    pub weekly: WeeklySchedule,
    #[serde(default)]
    pub overrides: DateOverrideStore,
}

/// The resolved open/closed status and working hours for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveAvailability {
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<TimeRange>,
    #[serde(rename = "break", skip_serializing_if = "Option::is_none")]
    pub break_window: Option<BreakWindow>,
}

impl ProviderAvailability {
    /// Resolves the effective availability for a calendar date.
    ///
    /// Two-tier lookup: a stored override wins outright (its hours and
    /// break are reported as-is, with `open` derived from the unavailable
    /// flag); otherwise the date's weekday entry in the weekly schedule
    /// applies, reporting hours only for open days.
    pub fn resolve(&self, date: Date) -> EffectiveAvailability {
        if let Some(entry) = self.overrides.get(date) {
            return EffectiveAvailability {
                open: !entry.unavailable,
                hours: Some(entry.hours),
                break_window: Some(entry.break_window),
            };
        }

        let day = self.weekly.day(Weekday::from_date(date));
        EffectiveAvailability {
            open: day.open,
            hours: day.open.then_some(day.hours),
            break_window: day.open.then_some(day.break_window),
        }
    }

    /// Save-boundary check across the weekly schedule and every override.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.weekly.validate()?;
        self.overrides
            .iter()
            .try_for_each(|(_, entry)| entry.validate())
    }
}
