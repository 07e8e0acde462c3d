//! # Weekly Schedule Store
//!
//! The recurring default: one [`DaySchedule`] per weekday. The set of
//! weekdays is closed, so "unknown weekday key" is unrepresentable rather
//! than a runtime error, and the schedule always holds exactly seven
//! entries in calendar order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;

use super::{DaySchedule, ScheduleError};

/// Error returned when a string is not a lowercase English weekday name.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("expected a lowercase weekday name (monday..sunday)")]
pub struct InvalidWeekday;

/// Days of the week, Monday-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in calendar order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Maps a calendar date to its weekday key.
    ///
    /// This is the only place a [`Date`] converts to a [`Weekday`], keeping
    /// the Monday-first convention in one spot instead of scattering
    /// Sunday-first offset arithmetic across components.
    pub fn from_date(date: Date) -> Self {
        match date.weekday() {
            time::Weekday::Monday => Weekday::Monday,
            time::Weekday::Tuesday => Weekday::Tuesday,
            time::Weekday::Wednesday => Weekday::Wednesday,
            time::Weekday::Thursday => Weekday::Thursday,
            time::Weekday::Friday => Weekday::Friday,
            time::Weekday::Saturday => Weekday::Saturday,
            time::Weekday::Sunday => Weekday::Sunday,
        }
    }

    /// Zero-based index with Monday = 0.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = InvalidWeekday;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            _ => Err(InvalidWeekday),
        }
    }
}

/// A provider's recurring weekly hours: exactly one [`DaySchedule`] per
/// weekday, by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
    pub sunday: DaySchedule,
}

impl Default for WeeklySchedule {
    /// Monday through Friday open with the standard hours, weekend closed.
    fn default() -> Self {
        Self {
            monday: DaySchedule::with_default_hours(true),
            tuesday: DaySchedule::with_default_hours(true),
            wednesday: DaySchedule::with_default_hours(true),
            thursday: DaySchedule::with_default_hours(true),
            friday: DaySchedule::with_default_hours(true),
            saturday: DaySchedule::with_default_hours(false),
            sunday: DaySchedule::with_default_hours(false),
        }
    }
}

impl WeeklySchedule {
    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        match weekday {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, weekday: Weekday) -> &mut DaySchedule {
        match weekday {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        }
    }

    /// Applies `update` to exactly the named weekday's entry.
    pub fn update_day(&mut self, weekday: Weekday, update: impl FnOnce(&mut DaySchedule)) {
        update(self.day_mut(weekday));
    }

    /// Replaces the named weekday's entry wholesale.
    pub fn set_day(&mut self, weekday: Weekday, day: DaySchedule) {
        *self.day_mut(weekday) = day;
    }

    /// The seven days in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        Weekday::ALL.into_iter().map(move |weekday| (weekday, self.day(weekday)))
    }

    /// Save-boundary check across all seven days.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.iter().try_for_each(|(_, day)| day.validate())
    }
}
