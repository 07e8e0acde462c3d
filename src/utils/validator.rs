//! # Text Input Validation Utilities
//!
//! This module provides validation utilities for free-text user input,
//! currently the pattern gate for partially typed time values.

use std::sync::LazyLock;

use regex::Regex;

/// Partial time input pattern
///
/// Matches every prefix a user can pass through while typing a 24-hour
/// `HH:MM` value into a text field: up to two hour digits, an optional
/// colon, and up to two minute digits. Anything else (letters, a second
/// colon, more than two digits per segment) can never become a valid time
/// and is rejected outright.
///
/// Range checks (hour <= 23, minute <= 59) and the leading-colon rule are
/// applied separately by the parser; this regex only gates the shape.
pub static TIME_INPUT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{0,2}(:\d{0,2})?$").expect("Failed to compile time input regex")
});
