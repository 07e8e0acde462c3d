//! # Day Schedule Model
//!
//! One day's working configuration: an open/closed flag, a working-hour
//! range, and an optional break window. Field-level mutators are
//! deliberately permissive (live editing must never error); range coherence
//! is checked by [`validate_ranges`] at the save boundary only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TimeOfDay;
use crate::utils::constant::{
    DEFAULT_BREAK_END, DEFAULT_BREAK_START, DEFAULT_DAY_END, DEFAULT_DAY_START,
};

/// Validation failures raised when a schedule payload crosses the save
/// boundary.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("working hours must start before they end")]
    UnorderedHours,

    #[error("break must start before it ends")]
    UnorderedBreak,

    #[error("break must fall within working hours")]
    BreakOutsideHours,
}

/// A start/end pair of wall-clock times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeRange {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// True when the range is non-empty, i.e. `start < end`.
    pub fn is_ordered(&self) -> bool {
        self.start < self.end
    }

    /// True when `other` nests entirely within this range.
    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// An optional mid-day pause during which the provider is not bookable.
///
/// The window keeps its start/end times even while disabled, so re-enabling
/// a break restores the previously configured times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakWindow {
    pub enabled: bool,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl BreakWindow {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

/// Identifies which time field of a day is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeField {
    Start,
    End,
    BreakStart,
    BreakEnd,
}

/// One weekday's working configuration.
///
/// `hours` and `break` are meaningful only while `open` is set, but they are
/// always retained: closing a day and re-opening it restores its previous
/// custom hours instead of resetting to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub open: bool,
    pub hours: TimeRange,
    #[serde(rename = "break")]
    pub break_window: BreakWindow,
}

impl DaySchedule {
    /// A day with the standard hours (09:00-18:00, break 13:00-14:00
    /// disabled) and the given open flag.
    pub fn with_default_hours(open: bool) -> Self {
        Self {
            open,
            hours: TimeRange::new(DEFAULT_DAY_START, DEFAULT_DAY_END),
            break_window: BreakWindow {
                enabled: false,
                start: DEFAULT_BREAK_START,
                end: DEFAULT_BREAK_END,
            },
        }
    }

    /// Flips the open flag, leaving hours and break untouched.
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    /// Replaces exactly one time field.
    pub fn set_time(&mut self, field: TimeField, value: TimeOfDay) {
        match field {
            TimeField::Start => self.hours.start = value,
            TimeField::End => self.hours.end = value,
            TimeField::BreakStart => self.break_window.start = value,
            TimeField::BreakEnd => self.break_window.end = value,
        }
    }

    pub fn set_break_enabled(&mut self, enabled: bool) {
        self.break_window.enabled = enabled;
    }

    /// Save-boundary check. Closed days are accepted as-is since their
    /// hours are not effective.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if !self.open {
            return Ok(());
        }
        validate_ranges(&self.hours, &self.break_window)
    }
}

/// Shared range-coherence check for day schedules and date overrides: the
/// working hours must be ordered and an enabled break must be ordered and
/// nest within them.
pub(crate) fn validate_ranges(
    hours: &TimeRange,
    break_window: &BreakWindow,
) -> Result<(), ScheduleError> {
    if !hours.is_ordered() {
        return Err(ScheduleError::UnorderedHours);
    }
    if break_window.enabled {
        if !break_window.range().is_ordered() {
            return Err(ScheduleError::UnorderedBreak);
        }
        if !hours.contains(&break_window.range()) {
            return Err(ScheduleError::BreakOutsideHours);
        }
    }
    Ok(())
}
