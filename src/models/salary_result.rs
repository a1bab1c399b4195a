//! Salary calculation result models.
//!
//! This module contains the [`SalaryResult`] produced by one calculation and
//! the flattened [`CalculationRecord`] that the JSON store persists.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::shift::ShiftKind;
use super::time_of_day::TimeOfDay;

/// One break window's overlap with the work interval.
///
/// Only non-zero overlaps are recorded; `minutes` may be less than the
/// scheduled break length when the work interval covers the break partially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakOverlap {
    /// The scheduled start of the break.
    pub start: TimeOfDay,
    /// The scheduled end of the break.
    pub end: TimeOfDay,
    /// Minutes of the break that fell inside the work interval.
    pub minutes: i64,
}

/// The complete result of one salary calculation.
///
/// Produced by [`crate::calculation::SalaryEngine::compute`] and never
/// mutated afterwards. Identical inputs produce identical results; nothing
/// here depends on the wall clock.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::SalaryEngine;
/// use salary_engine::config::EngineConfig;
///
/// let engine = SalaryEngine::new(EngineConfig::default());
/// let result = engine.compute("08:30", "17:30").unwrap();
/// assert_eq!(result.total_minutes, 540);
/// assert_eq!(
///     result.regular_minutes + result.overtime_minutes + result.night_overtime_minutes,
///     result.paid_minutes,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    /// The shift the interval was matched to.
    pub shift: ShiftKind,
    /// The resolved clock-in time.
    pub start: TimeOfDay,
    /// The resolved clock-out time.
    pub end: TimeOfDay,
    /// Whether the clock-out falls on the day after the clock-in.
    pub crosses_midnight: bool,
    /// Total elapsed minutes between clock-in and clock-out.
    pub total_minutes: i64,
    /// Minutes deducted for breaks overlapping the work interval.
    pub break_minutes: i64,
    /// The non-zero break overlaps, in schedule order.
    pub break_overlaps: Vec<BreakOverlap>,
    /// `total_minutes - break_minutes`.
    pub paid_minutes: i64,
    /// Paid minutes up to the regular daily limit.
    pub regular_minutes: i64,
    /// Overtime minutes billed at the base rate.
    pub overtime_minutes: i64,
    /// Overtime minutes billed at the night overtime rate.
    pub night_overtime_minutes: i64,
    /// Pay for the regular minutes.
    pub regular_salary: Decimal,
    /// Pay for the base-rate overtime minutes.
    pub overtime_salary: Decimal,
    /// Pay for the night overtime minutes.
    pub night_overtime_salary: Decimal,
    /// Sum of the three salary components.
    pub total_salary: Decimal,
}

/// A [`SalaryResult`] flattened for persistence, plus the moment it was
/// recorded.
///
/// Stored under a per-user, per-date bucket in the JSON store; read back by
/// the analytics, export and goal modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// When the calculation was recorded.
    pub timestamp: DateTime<Utc>,
    /// The clock-in time.
    pub start_time: TimeOfDay,
    /// The clock-out time.
    pub end_time: TimeOfDay,
    /// The matched shift.
    pub shift: ShiftKind,
    /// Total elapsed minutes.
    pub total_minutes: i64,
    /// Break minutes deducted.
    pub break_minutes: i64,
    /// Paid minutes.
    pub paid_minutes: i64,
    /// Regular minutes.
    pub regular_minutes: i64,
    /// Base-rate overtime minutes.
    pub overtime_minutes: i64,
    /// Night overtime minutes.
    pub night_overtime_minutes: i64,
    /// Pay for regular minutes.
    pub regular_salary: Decimal,
    /// Pay for base-rate overtime minutes.
    pub overtime_salary: Decimal,
    /// Pay for night overtime minutes.
    pub night_overtime_salary: Decimal,
    /// Total pay.
    pub total_salary: Decimal,
}

impl CalculationRecord {
    /// Flattens a [`SalaryResult`] into a persistable record.
    pub fn from_result(result: &SalaryResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            start_time: result.start,
            end_time: result.end,
            shift: result.shift,
            total_minutes: result.total_minutes,
            break_minutes: result.break_minutes,
            paid_minutes: result.paid_minutes,
            regular_minutes: result.regular_minutes,
            overtime_minutes: result.overtime_minutes,
            night_overtime_minutes: result.night_overtime_minutes,
            regular_salary: result.regular_salary,
            overtime_salary: result.overtime_salary,
            night_overtime_salary: result.night_overtime_salary,
            total_salary: result.total_salary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    fn sample_result() -> SalaryResult {
        SalaryResult {
            shift: ShiftKind::Day,
            start: t("08:30"),
            end: t("17:30"),
            crosses_midnight: false,
            total_minutes: 540,
            break_minutes: 95,
            break_overlaps: vec![BreakOverlap {
                start: t("10:40"),
                end: t("11:25"),
                minutes: 45,
            }],
            paid_minutes: 445,
            regular_minutes: 445,
            overtime_minutes: 0,
            night_overtime_minutes: 0,
            regular_salary: dec("15575.00"),
            overtime_salary: dec("0.00"),
            night_overtime_salary: dec("0.00"),
            total_salary: dec("15575.00"),
        }
    }

    #[test]
    fn test_salary_result_serialization_round_trip() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"shift\":\"day\""));
        assert!(json.contains("\"start\":\"08:30\""));

        let parsed: SalaryResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_record_flattens_result_fields() {
        let result = sample_result();
        let timestamp = DateTime::parse_from_rfc3339("2026-01-15T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let record = CalculationRecord::from_result(&result, timestamp);

        assert_eq!(record.timestamp, timestamp);
        assert_eq!(record.start_time, result.start);
        assert_eq!(record.end_time, result.end);
        assert_eq!(record.shift, result.shift);
        assert_eq!(record.paid_minutes, 445);
        assert_eq!(record.total_salary, dec("15575.00"));
    }

    #[test]
    fn test_record_deserialization() {
        let json = r#"{
            "timestamp": "2026-01-15T09:00:00Z",
            "start_time": "16:45",
            "end_time": "01:25",
            "shift": "night",
            "total_minutes": 520,
            "break_minutes": 65,
            "paid_minutes": 455,
            "regular_minutes": 455,
            "overtime_minutes": 0,
            "night_overtime_minutes": 0,
            "regular_salary": "15925.00",
            "overtime_salary": "0.00",
            "night_overtime_salary": "0.00",
            "total_salary": "15925.00"
        }"#;

        let record: CalculationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.shift, ShiftKind::Night);
        assert_eq!(record.start_time, t("16:45"));
        assert_eq!(record.total_salary, dec("15925.00"));
    }

    #[test]
    fn test_break_overlap_serialization() {
        let overlap = BreakOverlap {
            start: t("17:20"),
            end: t("17:35"),
            minutes: 10,
        };

        let json = serde_json::to_string(&overlap).unwrap();
        assert_eq!(json, "{\"start\":\"17:20\",\"end\":\"17:35\",\"minutes\":10}");
    }
}
