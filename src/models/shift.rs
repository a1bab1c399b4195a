//! Shift definitions and break intervals.
//!
//! This module defines the [`ShiftKind`], [`BreakInterval`] and
//! [`ShiftDefinition`] types describing the fixed factory work schedules.
//! The concrete catalog of shifts lives in
//! [`crate::calculation::ShiftCatalog`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::time_of_day::{TimeOfDay, MINUTES_PER_DAY};

/// The two factory shift patterns.
///
/// # Example
///
/// ```
/// use salary_engine::models::ShiftKind;
///
/// assert_eq!(ShiftKind::Day.code(), "C341");
/// assert_eq!(ShiftKind::Night.code(), "C342");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    /// Day shift, nominally 08:30–17:30.
    Day,
    /// Night shift, nominally 16:45–01:25 (next day).
    Night,
}

impl ShiftKind {
    /// The factory roster code for this shift.
    pub fn code(&self) -> &'static str {
        match self {
            ShiftKind::Day => "C341",
            ShiftKind::Night => "C342",
        }
    }

    /// A human-readable label for this shift.
    pub fn label(&self) -> &'static str {
        match self {
            ShiftKind::Day => "Day Shift",
            ShiftKind::Night => "Night Shift",
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An unpaid break window within a shift.
///
/// Both endpoints are expressed relative to the shift's nominal day. An end
/// time textually earlier than the start means the break ends on the
/// following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakInterval {
    /// The start of the break.
    pub start: TimeOfDay,
    /// The end of the break.
    pub end: TimeOfDay,
}

impl BreakInterval {
    /// Creates a break interval from two `"HH:MM"` strings.
    ///
    /// Intended for building static schedules; panics on invalid input.
    #[cfg(test)]
    pub(crate) fn from_strs(start: &str, end: &str) -> Self {
        Self {
            start: TimeOfDay::parse(start).unwrap(),
            end: TimeOfDay::parse(end).unwrap(),
        }
    }

    /// The scheduled length of the break in minutes, accounting for a break
    /// that wraps past midnight.
    pub fn scheduled_minutes(&self) -> i64 {
        let start = self.start.minutes_from_midnight();
        let mut end = self.end.minutes_from_midnight();
        if end < start {
            end += MINUTES_PER_DAY;
        }
        end - start
    }
}

/// A named work schedule template: nominal start, nominal end and the
/// ordered unpaid break windows.
///
/// Definitions are immutable, created once at catalog construction and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    /// Which shift this is.
    pub kind: ShiftKind,
    /// Nominal clock-in time.
    pub start: TimeOfDay,
    /// Nominal clock-out time (possibly on the following day).
    pub end: TimeOfDay,
    /// Unpaid break windows, in schedule order.
    pub breaks: Vec<BreakInterval>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_kind_codes() {
        assert_eq!(ShiftKind::Day.code(), "C341");
        assert_eq!(ShiftKind::Night.code(), "C342");
    }

    #[test]
    fn test_shift_kind_display() {
        assert_eq!(ShiftKind::Day.to_string(), "Day Shift");
        assert_eq!(ShiftKind::Night.to_string(), "Night Shift");
    }

    #[test]
    fn test_shift_kind_serialization() {
        assert_eq!(serde_json::to_string(&ShiftKind::Day).unwrap(), "\"day\"");
        let kind: ShiftKind = serde_json::from_str("\"night\"").unwrap();
        assert_eq!(kind, ShiftKind::Night);
    }

    #[test]
    fn test_break_scheduled_minutes() {
        assert_eq!(BreakInterval::from_strs("10:40", "11:25").scheduled_minutes(), 45);
        assert_eq!(BreakInterval::from_strs("17:20", "17:35").scheduled_minutes(), 15);
    }

    #[test]
    fn test_break_wrapping_midnight() {
        // A break from 23:50 to 00:10 spans midnight.
        assert_eq!(BreakInterval::from_strs("23:50", "00:10").scheduled_minutes(), 20);
    }

    #[test]
    fn test_break_serialization_uses_time_strings() {
        let interval = BreakInterval::from_strs("20:55", "21:40");
        let json = serde_json::to_string(&interval).unwrap();
        assert_eq!(json, "{\"start\":\"20:55\",\"end\":\"21:40\"}");

        let parsed: BreakInterval = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, interval);
    }
}
