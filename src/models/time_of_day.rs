//! # Time-of-Day Values and Input Parsing
//!
//! A wall-clock time type (date-independent, minute precision) together with
//! the keystroke-level parser backing schedule time fields. The parser
//! accepts every well-formed prefix of a 24-hour `HH:MM` value so a text
//! input never flashes an error while the user is mid-typing, and only
//! produces a [`TimeOfDay`] once both segments are fully entered.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::utils::validator::TIME_INPUT_REGEX;

/// Error returned when a string is not a complete, in-range `HH:MM` time.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("expected a 24-hour time in HH:MM format")]
pub struct InvalidTimeValue;

/// A wall-clock time with minute precision.
///
/// Values are immutable once constructed; schedule edits replace the old
/// value rather than mutating it. Ordering compares by minutes since
/// midnight, so `09:30 < 10:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Creates a new time of day.
    ///
    /// # Panics
    ///
    /// Panics if `hour > 23` or `minute > 59`. Out-of-range components are a
    /// programming error; values arriving from user input go through
    /// [`TimeInput::parse_partial`] instead.
    pub const fn new(hour: u8, minute: u8) -> Self {
        assert!(hour < 24, "hour must be 0-23");
        assert!(minute < 60, "minute must be 0-59");
        Self { hour, minute }
    }

    pub const fn hour(self) -> u8 {
        self.hour
    }

    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight, the canonical comparison key.
    pub const fn minutes_since_midnight(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Strict zero-padded 24-hour `HH:MM`, the round-trippable text-input
    /// representation.
    pub fn to_input_value(self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }

    /// 12-hour display label with an AM/PM suffix, e.g. `9:00 AM`.
    ///
    /// Deliberately locale-independent so formatting is deterministic and
    /// testable; midnight renders as `12:00 AM`, noon as `12:00 PM`.
    pub fn to_display_string(self) -> String {
        let (hour, meridiem) = match self.hour {
            0 => (12, "AM"),
            1..=11 => (self.hour, "AM"),
            12 => (12, "PM"),
            _ => (self.hour - 12, "PM"),
        };
        format!("{}:{:02} {}", hour, self.minute, meridiem)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeValue;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match TimeInput::parse_partial(input) {
            TimeInput::Complete(time) => Ok(time),
            _ => Err(InvalidTimeValue),
        }
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Outcome of validating a partially typed time string.
///
/// Live typing must distinguish three cases: input that can never become a
/// valid time (reject the keystroke), a well-formed prefix (keep typing, no
/// error, no value yet), and a fully entered time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInput {
    /// The input can never become a valid time; the edit is rejected.
    Invalid,
    /// A well-formed prefix of a time; the user is still typing.
    Incomplete,
    /// Both segments fully typed and in range.
    Complete(TimeOfDay),
}

impl TimeInput {
    /// Validates a partially typed time string.
    ///
    /// Accepted shapes are `""`, `H`, `HH`, `HH:`, `HH:M` and `HH:MM` (hour
    /// segments of one digit allowed throughout). A leading colon is invalid
    /// because minutes require an hour. Range violations only fire once a
    /// segment has both digits, so `"2"` is a fine prefix even though `"25"`
    /// is not.
    pub fn parse_partial(input: &str) -> Self {
        if input.is_empty() {
            return TimeInput::Incomplete;
        }
        if !TIME_INPUT_REGEX.is_match(input) {
            return TimeInput::Invalid;
        }
        // Minutes without an hour ("::30" is already rejected by the regex,
        // ":30" is not).
        if input.starts_with(':') {
            return TimeInput::Invalid;
        }

        let (hour_part, minute_part) = match input.split_once(':') {
            Some((hours, minutes)) => (hours, Some(minutes)),
            None => (input, None),
        };

        if hour_part.len() == 2 && hour_part.parse::<u8>().map_or(true, |h| h > 23) {
            return TimeInput::Invalid;
        }
        if let Some(minutes) = minute_part
            && minutes.len() == 2
            && minutes.parse::<u8>().map_or(true, |m| m > 59)
        {
            return TimeInput::Invalid;
        }

        if let Some(minutes) = minute_part
            && hour_part.len() == 2
            && minutes.len() == 2
            && let (Ok(hour), Ok(minute)) = (hour_part.parse(), minutes.parse())
        {
            return TimeInput::Complete(TimeOfDay::new(hour, minute));
        }

        TimeInput::Incomplete
    }

    /// True unless the input can never become a valid time.
    pub fn is_valid(self) -> bool {
        !matches!(self, TimeInput::Invalid)
    }

    /// True once both segments are fully typed and in range.
    pub fn is_complete(self) -> bool {
        matches!(self, TimeInput::Complete(_))
    }

    /// The parsed time, when complete.
    pub fn time(self) -> Option<TimeOfDay> {
        match self {
            TimeInput::Complete(time) => Some(time),
            _ => None,
        }
    }
}
