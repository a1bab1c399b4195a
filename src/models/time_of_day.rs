//! Time-of-day model and parsing.
//!
//! This module defines the [`TimeOfDay`] type used for all clock-time values
//! in the engine. A `TimeOfDay` carries no date; interval arithmetic anchors
//! both endpoints to an arbitrary reference day and adds a day to an end time
//! that precedes its start (see [`crate::calculation`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// A wall-clock time of day in 24-hour format.
///
/// Invariant: `hour` is 0–23 and `minute` is 0–59, enforced at construction.
///
/// Serialized as the `"HH:MM"` string everywhere (the JSON store, the API,
/// and configuration files).
///
/// # Example
///
/// ```
/// use salary_engine::models::TimeOfDay;
///
/// let t = TimeOfDay::parse("08:30").unwrap();
/// assert_eq!(t.hour(), 8);
/// assert_eq!(t.minute(), 30);
/// assert_eq!(t.to_string(), "08:30");
/// assert!(TimeOfDay::parse("25:00").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Creates a time of day, validating the hour and minute ranges.
    pub fn new(hour: u8, minute: u8) -> EngineResult<Self> {
        if hour > 23 || minute > 59 {
            return Err(EngineError::InvalidTimeFormat {
                input: format!("{hour}:{minute}"),
            });
        }
        Ok(Self { hour, minute })
    }

    /// Creates a time of day without range validation.
    ///
    /// For the static shift catalog, where the values are literals checked
    /// by the catalog's own tests.
    pub(crate) const fn from_hm(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Parses a trimmed `"HH:MM"` string.
    ///
    /// Fails with [`EngineError::InvalidTimeFormat`] unless the input has
    /// exactly two numeric fields separated by `:` and both fields are in
    /// range.
    pub fn parse(text: &str) -> EngineResult<Self> {
        let trimmed = text.trim();
        let invalid = || EngineError::InvalidTimeFormat {
            input: text.to_string(),
        };

        let (hour_text, minute_text) = trimmed.split_once(':').ok_or_else(invalid)?;
        if minute_text.contains(':') {
            return Err(invalid());
        }

        let hour: u8 = hour_text.parse().map_err(|_| invalid())?;
        let minute: u8 = minute_text.parse().map_err(|_| invalid())?;

        Self::new(hour, minute).map_err(|_| invalid())
    }

    /// The hour component (0–23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// The minute component (0–59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight of the reference day.
    pub fn minutes_from_midnight(&self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
