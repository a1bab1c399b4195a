//! Shift detection against the fixed shift catalog.
//!
//! The factory runs two shift patterns. Detection first compares the
//! candidate interval to each shift's nominal endpoints within a tolerance
//! window, then falls back to a time-of-day heuristic on the start time.
//! When neither resolves, the outcome is an explicit
//! [`ShiftMatch::Unmatched`] rather than a guessed shift.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_DETECT_TOLERANCE_MINUTES;
use crate::models::{BreakInterval, ShiftDefinition, ShiftKind, TimeOfDay, MINUTES_PER_DAY};

/// The outcome of shift detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftMatch {
    /// The interval resolved to a known shift.
    Matched(ShiftKind),
    /// The interval matched no shift within tolerance and fell outside both
    /// heuristic windows. The caller decides how to handle this.
    Unmatched,
}

// Heuristic windows for the start-time fallback, minutes from midnight.
const MORNING_WINDOW: (i64, i64) = (6 * 60, 12 * 60);
const EVENING_WINDOW: (i64, i64) = (16 * 60, 23 * 60 + 59);

/// The fixed table of known shifts.
///
/// Holds exactly two definitions, carrying the production roster times.
/// Read-only after construction.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::{ShiftCatalog, ShiftMatch};
/// use salary_engine::models::{ShiftKind, TimeOfDay};
///
/// let catalog = ShiftCatalog::standard(30);
/// let start = TimeOfDay::parse("08:30").unwrap();
/// let end = TimeOfDay::parse("17:30").unwrap();
/// assert_eq!(catalog.detect(start, end), ShiftMatch::Matched(ShiftKind::Day));
/// ```
#[derive(Debug, Clone)]
pub struct ShiftCatalog {
    day: ShiftDefinition,
    night: ShiftDefinition,
    tolerance_minutes: i64,
}

impl ShiftCatalog {
    /// Builds the standard two-shift catalog with the given detection
    /// tolerance in minutes.
    pub fn standard(tolerance_minutes: i64) -> Self {
        let hm = TimeOfDay::from_hm;
        let br = |sh, sm, eh, em| BreakInterval {
            start: hm(sh, sm),
            end: hm(eh, em),
        };

        let day = ShiftDefinition {
            kind: ShiftKind::Day,
            start: hm(8, 30),
            end: hm(17, 30),
            breaks: vec![
                br(8, 30, 8, 40),
                br(10, 40, 11, 25),
                br(13, 5, 13, 15),
                br(14, 35, 14, 45),
                br(16, 10, 16, 20),
                br(17, 20, 17, 35),
            ],
        };

        let night = ShiftDefinition {
            kind: ShiftKind::Night,
            start: hm(16, 45),
            end: hm(1, 25),
            breaks: vec![
                br(18, 45, 18, 55),
                br(20, 55, 21, 40),
                br(23, 10, 23, 20),
                br(0, 50, 1, 0),
                br(2, 25, 2, 35),
                br(3, 35, 3, 50),
            ],
        };

        Self {
            day,
            night,
            tolerance_minutes,
        }
    }

    /// Resolves the shift for a candidate start/end pair.
    ///
    /// Each known shift matches when both the start and the (midnight-
    /// normalized) end lie within the tolerance window of its nominal
    /// endpoints. Failing that, a start in the morning window maps to the
    /// day shift and a start in the evening window to the night shift.
    pub fn detect(&self, start: TimeOfDay, end: TimeOfDay) -> ShiftMatch {
        for def in [&self.day, &self.night] {
            if self.matches_definition(def, start, end) {
                return ShiftMatch::Matched(def.kind);
            }
        }

        let start_min = start.minutes_from_midnight();
        if (MORNING_WINDOW.0..=MORNING_WINDOW.1).contains(&start_min) {
            ShiftMatch::Matched(ShiftKind::Day)
        } else if (EVENING_WINDOW.0..=EVENING_WINDOW.1).contains(&start_min) {
            ShiftMatch::Matched(ShiftKind::Night)
        } else {
            ShiftMatch::Unmatched
        }
    }

    fn matches_definition(&self, def: &ShiftDefinition, start: TimeOfDay, end: TimeOfDay) -> bool {
        let start_diff = (start.minutes_from_midnight() - def.start.minutes_from_midnight()).abs();

        let candidate_end = normalized_end(start, end);
        let nominal_end = normalized_end(def.start, def.end);
        let end_diff = (candidate_end - nominal_end).abs();

        start_diff <= self.tolerance_minutes && end_diff <= self.tolerance_minutes
    }

    /// The break schedule for a shift.
    pub fn breaks_for(&self, kind: ShiftKind) -> &[BreakInterval] {
        self.definition(kind).breaks.as_slice()
    }

    /// The full definition for a shift.
    pub fn definition(&self, kind: ShiftKind) -> &ShiftDefinition {
        match kind {
            ShiftKind::Day => &self.day,
            ShiftKind::Night => &self.night,
        }
    }

    /// Resolves a roster code ("C341"/"C342", case-insensitive) to the
    /// shift's nominal start time. Lets users clock in with the code
    /// instead of typing the time.
    pub fn nominal_start_for_code(&self, text: &str) -> Option<TimeOfDay> {
        let code = text.trim();
        [&self.day, &self.night]
            .into_iter()
            .find(|def| code.eq_ignore_ascii_case(def.kind.code()))
            .map(|def| def.start)
    }
}

impl Default for ShiftCatalog {
    fn default() -> Self {
        Self::standard(DEFAULT_DETECT_TOLERANCE_MINUTES)
    }
}

/// End of the interval in minutes from the start's midnight, pushed to the
/// next day when it precedes the start.
fn normalized_end(start: TimeOfDay, end: TimeOfDay) -> i64 {
    let mut end_min = end.minutes_from_midnight();
    if end_min < start.minutes_from_midnight() {
        end_min += MINUTES_PER_DAY;
    }
    end_min
}
