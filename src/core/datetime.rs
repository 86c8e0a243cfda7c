//! Time expression grammar.
//!
//! Normalizes the time-shaped tokens of a quick-entry line into a
//! [`TimeSpec`]. Supported shapes, in precedence order:
//!
//! - `now`, `now+1h`, `now+45m` (relative to the injected clock)
//! - `30m`, `2h` (bare duration starting now)
//! - `930-1030`, `1400-1530` (compact range)
//! - `9-11`, `9:30-11`, `2pm-3:30pm`, `9 - 11` (general range)
//! - `10:30-45m`, `2pm-1h` (start plus duration)
//!
//! The first shape that matches structurally decides the result. A matching
//! shape with out-of-range values yields an empty spec instead of falling
//! through to a later shape.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Serialize, Serializer};

use crate::error::QuickEntryError;

const MINUTES_PER_DAY: i32 = 24 * 60;

/// A wall-clock time of day, rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Create a clock time, rejecting hours past 23 and minutes past 59.
    #[must_use]
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            hour: u8::try_from(hour).ok()?,
            minute: u8::try_from(minute).ok()?,
        })
    }

    /// Truncate a `chrono` time to minute precision.
    #[must_use]
    pub fn from_naive(time: NaiveTime) -> Self {
        // NaiveTime guarantees hour < 24 and minute < 60.
        Self {
            hour: u8::try_from(time.hour()).unwrap_or(0),
            minute: u8::try_from(time.minute()).unwrap_or(0),
        }
    }

    /// Convert back to a `chrono` time on the minute.
    #[must_use]
    pub fn to_naive(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN)
    }

    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight.
    #[must_use]
    pub fn minutes_since_midnight(&self) -> i32 {
        i32::from(self.hour) * 60 + i32::from(self.minute)
    }

    /// Shift by a (possibly negative) number of minutes, wrapping at midnight.
    #[must_use]
    pub fn add_minutes(self, minutes: i32) -> Self {
        let total = (self.minutes_since_midnight() + minutes).rem_euclid(MINUTES_PER_DAY);
        Self {
            hour: u8::try_from(total / 60).unwrap_or(0),
            minute: u8::try_from(total % 60).unwrap_or(0),
        }
    }

    /// Round to the nearest half hour. Quarter past rounds up.
    #[must_use]
    pub fn round_to_half_hour(self) -> Self {
        let total = self.minutes_since_midnight();
        let rounded = ((total + 15) / 30) * 30;
        Self::default().add_minutes(rounded)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = QuickEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self::from_naive)
            .map_err(|e| QuickEntryError::InvalidInput(format!("Invalid clock time '{s}': {e}")))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of parsing a time expression.
///
/// An empty spec means the expression was not understood. Callers must treat
/// that as a failure to resolve a time, not as "no time intended".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<ClockTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<ClockTime>,
    /// Length in minutes. Negative when the end precedes the start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
}

impl TimeSpec {
    /// A spec that starts at `start` with no length.
    #[must_use]
    pub const fn starting_at(start: ClockTime) -> Self {
        Self {
            start: Some(start),
            end: None,
            duration: None,
        }
    }

    /// A spec spanning `start..end`, with the signed duration between them.
    #[must_use]
    pub fn range(start: ClockTime, end: ClockTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            duration: Some(end.minutes_since_midnight() - start.minutes_since_midnight()),
        }
    }

    /// Whether the expression failed to resolve.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.duration.is_none()
    }

    /// Whether the spec has a start and either an end or a duration.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.start.is_some() && (self.end.is_some() || self.duration.is_some())
    }
}

static RELATIVE_NOW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^now\+(\d+)([hm])$").unwrap_or_else(|e| panic!("Invalid relative-now regex: {e}"))
});

static BARE_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)([hm])$").unwrap_or_else(|e| panic!("Invalid duration regex: {e}"))
});

static COMPACT_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{3,4})-(\d{3,4})$").unwrap_or_else(|e| panic!("Invalid compact regex: {e}"))
});

static GENERAL_RANGE: Lazy<Regex> = Lazy::new(|| {
    // "9-11", "9:30am - 11pm", "9 11"
    Regex::new(r"^(\d{1,2})(?::(\d{2}))?\s*(am|pm)?[\s-]+(\d{1,2})(?::(\d{2}))?\s*(am|pm)?$")
        .unwrap_or_else(|e| panic!("Invalid range regex: {e}"))
});

static TIME_PLUS_DURATION: Lazy<Regex> = Lazy::new(|| {
    // "10:30-45m", "2pm-1h"
    Regex::new(r"^(\d{1,2})(?::(\d{2}))?\s*(am|pm)?-(\d+)([hm])$")
        .unwrap_or_else(|e| panic!("Invalid time-plus-duration regex: {e}"))
});

/// Parse a time expression against the given clock reading.
///
/// `now` is only consulted by relative shapes (`now`, `now+1h`, `30m`).
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use quickentry::core::parse_time_expression;
///
/// let now = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
/// let spec = parse_time_expression("930-1030", now);
/// assert_eq!(spec.start.unwrap().to_string(), "09:30");
/// assert_eq!(spec.end.unwrap().to_string(), "10:30");
/// assert_eq!(spec.duration, Some(60));
///
/// assert!(parse_time_expression("soon", now).is_empty());
/// ```
#[must_use]
pub fn parse_time_expression(expr: &str, now: NaiveTime) -> TimeSpec {
    let expr = expr.trim().to_lowercase();
    let now = ClockTime::from_naive(now);

    if expr == "now" {
        return TimeSpec::starting_at(now);
    }

    if let Some(caps) = RELATIVE_NOW.captures(&expr) {
        tracing::trace!(%expr, "relative-now time");
        return relative_to(now, &caps);
    }

    if let Some(caps) = BARE_DURATION.captures(&expr) {
        tracing::trace!(%expr, "bare duration");
        return relative_to(now, &caps);
    }

    if let Some(caps) = COMPACT_RANGE.captures(&expr) {
        tracing::trace!(%expr, "compact range");
        return match (compact_time(&caps[1]), compact_time(&caps[2])) {
            (Some(start), Some(end)) => TimeSpec::range(start, end),
            _ => TimeSpec::default(),
        };
    }

    if let Some(caps) = GENERAL_RANGE.captures(&expr) {
        tracing::trace!(%expr, "general range");
        let start = clock_time(&caps, 1, 2, 3);
        let end = clock_time(&caps, 4, 5, 6);
        return match (start, end) {
            (Some(start), Some(end)) => TimeSpec::range(start, end),
            _ => TimeSpec::default(),
        };
    }

    if let Some(caps) = TIME_PLUS_DURATION.captures(&expr) {
        tracing::trace!(%expr, "time plus duration");
        let Some(start) = clock_time(&caps, 1, 2, 3) else {
            return TimeSpec::default();
        };
        return match duration_minutes(&caps[4], &caps[5]) {
            Some(duration) => TimeSpec {
                duration: Some(duration),
                ..TimeSpec::starting_at(start)
            },
            None => TimeSpec::default(),
        };
    }

    TimeSpec::default()
}

/// Build a spec starting at `now` from an amount/unit capture pair.
fn relative_to(now: ClockTime, caps: &Captures<'_>) -> TimeSpec {
    match duration_minutes(&caps[1], &caps[2]) {
        Some(duration) => TimeSpec {
            duration: Some(duration),
            ..TimeSpec::starting_at(now)
        },
        None => TimeSpec::default(),
    }
}

/// Convert an amount and an `h`/`m` unit to minutes.
fn duration_minutes(amount: &str, unit: &str) -> Option<i32> {
    let amount: i32 = amount.parse().ok()?;
    match unit {
        "h" => amount.checked_mul(60),
        _ => Some(amount),
    }
}

/// Split a 3-4 digit group into hour and minute ("930" is 09:30).
fn compact_time(digits: &str) -> Option<ClockTime> {
    let padded = format!("{digits:0>4}");
    let hour: u32 = padded[..2].parse().ok()?;
    let minute: u32 = padded[2..].parse().ok()?;
    ClockTime::new(hour, minute)
}

/// Read an `H[:MM][am|pm]` triple out of the capture groups.
fn clock_time(caps: &Captures<'_>, hour: usize, minute: usize, meridiem: usize) -> Option<ClockTime> {
    let hour: u32 = caps.get(hour)?.as_str().parse().ok()?;
    let minute: u32 = caps
        .get(minute)
        .map_or(Some(0), |m| m.as_str().parse().ok())?;
    let hour = to_24_hour(hour, caps.get(meridiem).map(|m| m.as_str()));
    ClockTime::new(hour, minute)
}

/// Apply an am/pm suffix: 12am is midnight, 12pm stays noon.
fn to_24_hour(hour: u32, meridiem: Option<&str>) -> u32 {
    match meridiem {
        Some("am") if hour == 12 => 0,
        Some("pm") if hour < 12 => hour + 12,
        _ => hour,
    }
}
