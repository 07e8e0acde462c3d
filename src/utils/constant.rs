//! # Application Constants
//!
//! This module defines configuration constants used throughout the Velora
//! application: the default working hours a fresh schedule starts from and
//! the limits applied to calendar queries.

use crate::models::TimeOfDay;

/// Default start of a working day for a newly created schedule.
pub const DEFAULT_DAY_START: TimeOfDay = TimeOfDay::new(9, 0);

/// Default end of a working day for a newly created schedule.
pub const DEFAULT_DAY_END: TimeOfDay = TimeOfDay::new(18, 0);

/// Default break start (the break itself starts out disabled).
pub const DEFAULT_BREAK_START: TimeOfDay = TimeOfDay::new(13, 0);

/// Default break end (the break itself starts out disabled).
pub const DEFAULT_BREAK_END: TimeOfDay = TimeOfDay::new(14, 0);

/// Maximum number of days a single calendar resolution query may span.
///
/// Two months covers any calendar widget while keeping the response size
/// bounded.
pub const MAX_CALENDAR_SPAN_DAYS: i64 = 62;
