mod availability;
mod day;
mod overrides;
mod state;
mod time_of_day;
mod weekly;

pub use availability::{EffectiveAvailability, ProviderAvailability};
pub use day::{BreakWindow, DaySchedule, ScheduleError, TimeField, TimeRange};
pub use overrides::{date_key, parse_date_key, DateOverride, DateOverrideStore, InvalidDateKey};
pub use state::AppState;
pub use time_of_day::{InvalidTimeValue, TimeInput, TimeOfDay};
pub use weekly::{InvalidWeekday, Weekday, WeeklySchedule};
