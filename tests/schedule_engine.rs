//! Engine-level behavior of the weekly schedule, date overrides, and
//! effective-availability resolution.

use time::macros::date;
use velora::models::{
    DateOverride, DateOverrideStore, DaySchedule, ProviderAvailability, ScheduleError, TimeField,
    TimeOfDay, TimeRange, Weekday, WeeklySchedule, date_key, parse_date_key,
};

// 2024-01-01 was a Monday, which makes the surrounding dates convenient
// fixtures: the 6th/7th are the first weekend, the 8th the next Monday.
const MONDAY: time::Date = date!(2024 - 01 - 01);
const SATURDAY: time::Date = date!(2024 - 01 - 06);
const SUNDAY: time::Date = date!(2024 - 01 - 07);

#[test_log::test]
fn default_day_has_standard_hours() {
    let day = DaySchedule::with_default_hours(true);
    assert!(day.open);
    assert_eq!(day.hours.start, TimeOfDay::new(9, 0));
    assert_eq!(day.hours.end, TimeOfDay::new(18, 0));
    assert!(!day.break_window.enabled);
    assert_eq!(day.break_window.start, TimeOfDay::new(13, 0));
    assert_eq!(day.break_window.end, TimeOfDay::new(14, 0));
}

#[test_log::test]
fn toggling_a_day_preserves_its_custom_hours() {
    let mut day = DaySchedule::with_default_hours(true);
    day.set_time(TimeField::Start, TimeOfDay::new(7, 30));
    day.set_time(TimeField::End, TimeOfDay::new(15, 0));

    day.toggle_open();
    assert!(!day.open);
    day.toggle_open();
    assert!(day.open);

    // Re-opening restores the custom hours instead of resetting to defaults.
    assert_eq!(day.hours.start, TimeOfDay::new(7, 30));
    assert_eq!(day.hours.end, TimeOfDay::new(15, 0));
}

#[test_log::test]
fn set_time_updates_exactly_one_field() {
    let original = DaySchedule::with_default_hours(true);

    let mut day = original;
    day.set_time(TimeField::BreakStart, TimeOfDay::new(12, 0));
    assert_eq!(day.break_window.start, TimeOfDay::new(12, 0));
    assert_eq!(day.hours, original.hours);
    assert_eq!(day.break_window.end, original.break_window.end);
    assert_eq!(day.break_window.enabled, original.break_window.enabled);
    assert_eq!(day.open, original.open);
}

#[test_log::test]
fn day_validation_rejects_incoherent_ranges() {
    let mut day = DaySchedule::with_default_hours(true);
    assert_eq!(day.validate(), Ok(()));

    day.hours = TimeRange::new(TimeOfDay::new(18, 0), TimeOfDay::new(9, 0));
    assert_eq!(day.validate(), Err(ScheduleError::UnorderedHours));

    // A closed day's hours are not effective, so they are accepted as-is.
    day.open = false;
    assert_eq!(day.validate(), Ok(()));

    let mut day = DaySchedule::with_default_hours(true);
    day.set_break_enabled(true);
    day.set_time(TimeField::BreakStart, TimeOfDay::new(14, 0));
    day.set_time(TimeField::BreakEnd, TimeOfDay::new(13, 0));
    assert_eq!(day.validate(), Err(ScheduleError::UnorderedBreak));

    let mut day = DaySchedule::with_default_hours(true);
    day.set_break_enabled(true);
    day.set_time(TimeField::BreakStart, TimeOfDay::new(8, 0));
    day.set_time(TimeField::BreakEnd, TimeOfDay::new(9, 30));
    assert_eq!(day.validate(), Err(ScheduleError::BreakOutsideHours));

    // Disabled break windows are ignored entirely.
    let mut day = DaySchedule::with_default_hours(true);
    day.set_time(TimeField::BreakStart, TimeOfDay::new(20, 0));
    assert_eq!(day.validate(), Ok(()));
}

#[test_log::test]
fn default_weekly_schedule_opens_weekdays_only() {
    let weekly = WeeklySchedule::default();
    for (weekday, day) in weekly.iter() {
        let expected = !matches!(weekday, Weekday::Saturday | Weekday::Sunday);
        assert_eq!(day.open, expected, "{weekday} open flag");
    }
}

#[test_log::test]
fn update_day_touches_only_the_named_weekday() {
    let original = WeeklySchedule::default();
    let mut updated = original.clone();
    updated.update_day(Weekday::Tuesday, |day| {
        day.set_time(TimeField::Start, TimeOfDay::new(11, 0));
    });

    for weekday in Weekday::ALL {
        if weekday == Weekday::Tuesday {
            assert_eq!(updated.day(weekday).hours.start, TimeOfDay::new(11, 0));
        } else {
            assert_eq!(updated.day(weekday), original.day(weekday), "{weekday}");
        }
    }
}

#[test_log::test]
fn weekday_mapping_is_monday_first() {
    assert_eq!(Weekday::from_date(MONDAY), Weekday::Monday);
    assert_eq!(Weekday::from_date(SATURDAY), Weekday::Saturday);
    assert_eq!(Weekday::from_date(SUNDAY), Weekday::Sunday);
    assert_eq!(Weekday::Monday.index(), 0);
    assert_eq!(Weekday::Sunday.index(), 6);

    for weekday in Weekday::ALL {
        assert_eq!(weekday.as_str().parse::<Weekday>(), Ok(weekday));
    }
    assert!("caturday".parse::<Weekday>().is_err());
    assert!("Monday".parse::<Weekday>().is_err());
}

#[test_log::test]
fn seeding_copies_the_weekday_entry() {
    let weekly = WeeklySchedule::default();

    let saturday_draft = DateOverride::seed_from_weekly(SATURDAY, &weekly);
    assert!(saturday_draft.unavailable);
    assert_eq!(saturday_draft.hours, weekly.saturday.hours);

    let monday_draft = DateOverride::seed_from_weekly(MONDAY, &weekly);
    assert!(!monday_draft.unavailable);
    assert_eq!(monday_draft.hours, weekly.monday.hours);
    assert_eq!(monday_draft.break_window, weekly.monday.break_window);
}

#[test_log::test]
fn editing_a_seeded_draft_never_touches_the_weekly_schedule() {
    let weekly = WeeklySchedule::default();
    let mut draft = DateOverride::seed_from_weekly(MONDAY, &weekly);

    draft.hours = TimeRange::new(TimeOfDay::new(10, 0), TimeOfDay::new(14, 0));
    draft.unavailable = true;

    assert_eq!(weekly.monday.hours.start, TimeOfDay::new(9, 0));
    assert_eq!(weekly.monday.hours.end, TimeOfDay::new(18, 0));
    assert!(weekly.monday.open);
}

#[test_log::test]
fn draft_for_prefers_the_stored_entry() {
    let weekly = WeeklySchedule::default();
    let mut store = DateOverrideStore::new();

    let mut entry = DateOverride::seed_from_weekly(SATURDAY, &weekly);
    entry.unavailable = false;
    entry.hours = TimeRange::new(TimeOfDay::new(10, 0), TimeOfDay::new(14, 0));
    store.save(SATURDAY, entry);

    assert_eq!(store.draft_for(SATURDAY, &weekly), entry);
    // A date without an entry still seeds fresh and leaves the store alone.
    let sunday_draft = store.draft_for(SUNDAY, &weekly);
    assert!(sunday_draft.unavailable);
    assert_eq!(store.len(), 1);
}

#[test_log::test]
fn removal_is_idempotent() {
    let weekly = WeeklySchedule::default();
    let mut store = DateOverrideStore::new();
    store.save(SATURDAY, DateOverride::seed_from_weekly(SATURDAY, &weekly));

    assert!(store.remove(SATURDAY));
    let after_first = store.clone();
    assert!(!store.remove(SATURDAY));
    assert_eq!(store, after_first);
    assert!(store.is_empty());
}

#[test_log::test]
fn listing_is_ordered_by_date_regardless_of_insertion_order() {
    let weekly = WeeklySchedule::default();
    let mut store = DateOverrideStore::new();
    let dates = [
        date!(2024 - 03 - 15),
        date!(2024 - 01 - 06),
        date!(2024 - 02 - 29),
        date!(2024 - 01 - 02),
    ];
    for date in dates {
        store.save(date, DateOverride::seed_from_weekly(date, &weekly));
    }

    let listed: Vec<_> = store.iter().map(|(date, _)| date).collect();
    assert_eq!(
        listed,
        vec![
            date!(2024 - 01 - 02),
            date!(2024 - 01 - 06),
            date!(2024 - 02 - 29),
            date!(2024 - 03 - 15),
        ]
    );
}

#[test_log::test]
fn resolution_prefers_overrides_and_falls_back_to_weekly() {
    let mut availability = ProviderAvailability::default();

    // Saturday is closed by the weekly default.
    let resolved = availability.resolve(SATURDAY);
    assert!(!resolved.open);
    assert_eq!(resolved.hours, None);
    assert_eq!(resolved.break_window, None);

    // An override opens that Saturday with custom hours.
    let mut entry = DateOverride::seed_from_weekly(SATURDAY, &availability.weekly);
    entry.unavailable = false;
    entry.hours = TimeRange::new(TimeOfDay::new(10, 0), TimeOfDay::new(14, 0));
    availability.overrides.save(SATURDAY, entry);

    let resolved = availability.resolve(SATURDAY);
    assert!(resolved.open);
    assert_eq!(resolved.hours, Some(entry.hours));

    // Removing the override reverts to the weekly default.
    availability.overrides.remove(SATURDAY);
    assert!(!availability.resolve(SATURDAY).open);

    // Open weekdays report their hours and break window.
    let resolved = availability.resolve(MONDAY);
    assert!(resolved.open);
    assert_eq!(resolved.hours, Some(availability.weekly.monday.hours));
    assert_eq!(
        resolved.break_window,
        Some(availability.weekly.monday.break_window)
    );
}

#[test_log::test]
fn an_unavailable_override_wins_over_an_open_weekday() {
    let mut availability = ProviderAvailability::default();
    let mut entry = DateOverride::seed_from_weekly(MONDAY, &availability.weekly);
    entry.unavailable = true;
    availability.overrides.save(MONDAY, entry);

    let resolved = availability.resolve(MONDAY);
    assert!(!resolved.open);
    // The stored hours are reported as-is; `open` is the authoritative flag.
    assert_eq!(resolved.hours, Some(entry.hours));
}

#[test_log::test]
fn date_keys_are_strict_iso_dates() {
    assert_eq!(date_key(SATURDAY), "2024-01-06");
    assert_eq!(parse_date_key("2024-01-06"), Ok(SATURDAY));
    assert!(parse_date_key("2024-1-6").is_err());
    assert!(parse_date_key("2024-02-30").is_err());
    assert!(parse_date_key("06-01-2024").is_err());
    assert!(parse_date_key("tomorrow").is_err());
}

#[test_log::test]
fn wire_format_matches_the_stored_document_shape() {
    let mut availability = ProviderAvailability::default();
    let mut entry = DateOverride::seed_from_weekly(SATURDAY, &availability.weekly);
    entry.unavailable = false;
    availability.overrides.save(SATURDAY, entry);

    let value = serde_json::to_value(&availability).unwrap();
    assert_eq!(value["weekly"]["monday"]["open"], true);
    assert_eq!(value["weekly"]["monday"]["hours"]["start"], "09:00");
    assert_eq!(value["weekly"]["monday"]["break"]["enabled"], false);
    assert_eq!(value["weekly"]["saturday"]["open"], false);
    assert_eq!(value["overrides"]["2024-01-06"]["unavailable"], false);

    let round_tripped: ProviderAvailability = serde_json::from_value(value).unwrap();
    assert_eq!(round_tripped, availability);
}
