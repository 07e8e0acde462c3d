//! # Date Override Store
//!
//! Date-specific exceptions layered over the recurring weekly default.
//! Overrides are sparse: only explicitly saved dates hold an entry, and the
//! store is the second half of the override-first/weekly-fallback resolution
//! in [`ProviderAvailability::resolve`](super::ProviderAvailability::resolve).
//!
//! Entries are keyed by calendar date and kept in a [`BTreeMap`], so listing
//! is ordered by date regardless of insertion order. On the wire the store
//! is a JSON object keyed by `YYYY-MM-DD` strings.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use super::day::validate_ranges;
use super::{BreakWindow, ScheduleError, TimeRange, Weekday, WeeklySchedule};

const DATE_KEY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Error returned when a string is not a `YYYY-MM-DD` calendar date.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("expected a calendar date in YYYY-MM-DD format")]
pub struct InvalidDateKey;

/// Formats a date as the `YYYY-MM-DD` key used on the wire and in storage.
pub fn date_key(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parses a `YYYY-MM-DD` key back into a calendar date.
pub fn parse_date_key(input: &str) -> Result<Date, InvalidDateKey> {
    Date::parse(input, DATE_KEY_FORMAT).map_err(|_| InvalidDateKey)
}

/// A single calendar date's exception to the weekly schedule.
///
/// `hours` and `break` carry the custom working hours used when the date is
/// not marked unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOverride {
    pub unavailable: bool,
    pub hours: TimeRange,
    #[serde(rename = "break")]
    pub break_window: BreakWindow,
}

impl DateOverride {
    /// Seeds a fresh override draft from the date's weekday default: closed
    /// weekdays seed as unavailable, and the hours/break are independent
    /// copies, so editing the draft never touches the weekly schedule.
    pub fn seed_from_weekly(date: Date, weekly: &WeeklySchedule) -> Self {
        let day = weekly.day(Weekday::from_date(date));
        Self {
            unavailable: !day.open,
            hours: day.hours,
            break_window: day.break_window,
        }
    }

    /// Save-boundary check. Unavailable dates are accepted as-is since
    /// their hours are not effective.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.unavailable {
            return Ok(());
        }
        validate_ranges(&self.hours, &self.break_window)
    }
}

/// All of a provider's date-specific exceptions, ordered by date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateOverrideStore {
    entries: BTreeMap<Date, DateOverride>,
}

impl DateOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, date: Date) -> bool {
        self.entries.contains_key(&date)
    }

    pub fn get(&self, date: Date) -> Option<&DateOverride> {
        self.entries.get(&date)
    }

    /// The stored entry for `date`, or a fresh draft seeded from the weekly
    /// schedule. Never mutates the store; a draft only lands via [`save`].
    ///
    /// [`save`]: DateOverrideStore::save
    pub fn draft_for(&self, date: Date, weekly: &WeeklySchedule) -> DateOverride {
        self.entries
            .get(&date)
            .copied()
            .unwrap_or_else(|| DateOverride::seed_from_weekly(date, weekly))
    }

    /// Inserts or replaces the entry for `date`.
    pub fn save(&mut self, date: Date, entry: DateOverride) {
        self.entries.insert(date, entry);
    }

    /// Removes the entry for `date` if present. Removal is idempotent:
    /// returns whether an entry was actually removed.
    pub fn remove(&mut self, date: Date) -> bool {
        self.entries.remove(&date).is_some()
    }

    /// Entries in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, &DateOverride)> {
        self.entries.iter().map(|(date, entry)| (*date, entry))
    }
}

impl Serialize for DateOverrideStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (date, entry) in &self.entries {
            map.serialize_entry(&date_key(*date), entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DateOverrideStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, DateOverride>::deserialize(deserializer)?;
        let mut entries = BTreeMap::new();
        for (key, entry) in raw {
            let date = parse_date_key(&key).map_err(serde::de::Error::custom)?;
            entries.insert(date, entry);
        }
        Ok(Self { entries })
    }
}
