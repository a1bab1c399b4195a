//! Splitting paid minutes into regular, overtime and night overtime.
//!
//! Paid minutes up to the regular daily limit are regular time. The excess
//! is overtime, classified by a single policy: for the night shift, or for
//! any interval crossing midnight, every overtime minute is night overtime;
//! for a same-day day shift, night overtime is the portion of overtime that
//! falls at or after the night start hour.

use crate::config::EngineConfig;
use crate::models::{ShiftKind, TimeOfDay};

use super::time_math::crosses_midnight;

/// The minute split produced by [`split_paid_minutes`].
///
/// Invariant: the three buckets always sum to the paid minutes passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourSplit {
    /// Paid minutes up to the regular limit.
    pub regular_minutes: i64,
    /// Overtime minutes billed at the base rate.
    pub overtime_minutes: i64,
    /// Overtime minutes billed at the night rate.
    pub night_overtime_minutes: i64,
}

impl HourSplit {
    /// Whether any overtime at all was accrued.
    pub fn has_overtime(&self) -> bool {
        self.overtime_minutes > 0 || self.night_overtime_minutes > 0
    }
}

/// Splits `paid_minutes` into the three pay buckets.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::split_paid_minutes;
/// use salary_engine::config::EngineConfig;
/// use salary_engine::models::{ShiftKind, TimeOfDay};
///
/// let config = EngineConfig::default();
/// let start = TimeOfDay::parse("08:30").unwrap();
/// let end = TimeOfDay::parse("17:30").unwrap();
///
/// let split = split_paid_minutes(start, end, ShiftKind::Day, 445, &config);
/// assert_eq!(split.regular_minutes, 445);
/// assert!(!split.has_overtime());
/// ```
pub fn split_paid_minutes(
    start: TimeOfDay,
    end: TimeOfDay,
    shift: ShiftKind,
    paid_minutes: i64,
    config: &EngineConfig,
) -> HourSplit {
    let limit = config.regular_limit_minutes;
    let regular_minutes = paid_minutes.min(limit);
    let total_overtime = (paid_minutes - limit).max(0);

    let night_overtime_minutes = if shift == ShiftKind::Night || crosses_midnight(start, end) {
        // Night work escalates every overtime minute to the night rate.
        total_overtime
    } else {
        let night_start = i64::from(config.night_start_hour) * 60;
        let night_window = (end.minutes_from_midnight()
            - start.minutes_from_midnight().max(night_start))
        .max(0);
        night_window.min(total_overtime)
    };

    HourSplit {
        regular_minutes,
        overtime_minutes: total_overtime - night_overtime_minutes,
        night_overtime_minutes,
    }
}
