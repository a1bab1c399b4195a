//! Data export: CSV, JSON and monthly reports.
//!
//! Exports read straight from the persisted records. Every field written
//! here is a date, a time, a roster code or a number, so the CSV writer is
//! a plain line formatter.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::ShiftKind;
use crate::storage::UserHistory;

const CSV_HEADER: &str = "Date,Start Time,End Time,Shift,Total Hours,Regular Hours,OT Hours,\
Night OT Hours,Total Salary,Regular Salary,OT Salary,Night OT Salary,Break Minutes,Paid Minutes";

fn hours(minutes: i64) -> Decimal {
    let mut h = (Decimal::from(minutes) / Decimal::from(60)).round_dp(2);
    h.rescale(2);
    h
}

/// Renders a user's history window as CSV, one row per record.
///
/// Fails with [`EngineError::NoData`] when the window holds no records.
pub fn export_csv(history: &UserHistory) -> EngineResult<String> {
    if history.is_empty() {
        return Err(EngineError::NoData);
    }

    let mut lines = vec![CSV_HEADER.to_string()];
    for (date, records) in history {
        for record in records {
            lines.push(format!(
                "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
                date,
                record.start_time,
                record.end_time,
                record.shift.code(),
                hours(record.total_minutes),
                hours(record.regular_minutes),
                hours(record.overtime_minutes),
                hours(record.night_overtime_minutes),
                record.total_salary,
                record.regular_salary,
                record.overtime_salary,
                record.night_overtime_salary,
                record.break_minutes,
                record.paid_minutes,
            ));
        }
    }

    Ok(lines.join("\n"))
}

/// The JSON export envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonExport {
    /// When the export was produced.
    pub exported_at: DateTime<Utc>,
    /// The user the export belongs to.
    pub user_id: String,
    /// The window length the export was requested for.
    pub period_days: u32,
    /// The exported records, bucketed by date.
    pub calculations: UserHistory,
}

/// Renders a user's history window as a pretty-printed JSON document.
///
/// Fails with [`EngineError::NoData`] when the window holds no records.
pub fn export_json(
    user_id: &str,
    period_days: u32,
    history: &UserHistory,
    exported_at: DateTime<Utc>,
) -> EngineResult<String> {
    if history.is_empty() {
        return Err(EngineError::NoData);
    }

    let export = JsonExport {
        exported_at,
        user_id: user_id.to_string(),
        period_days,
        calculations: history.clone(),
    };

    serde_json::to_string_pretty(&export).map_err(|e| EngineError::Storage {
        path: "<json export>".to_string(),
        message: e.to_string(),
    })
}

/// Aggregated totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// The report year.
    pub year: i32,
    /// The report month (1–12).
    pub month: u32,
    /// Days with at least one record.
    pub days_worked: u32,
    /// Total paid hours.
    pub total_hours: Decimal,
    /// Total regular hours.
    pub regular_hours: Decimal,
    /// Total overtime hours (base-rate and night combined).
    pub overtime_hours: Decimal,
    /// Total salary for the month.
    pub total_salary: Decimal,
    /// Number of day-shift records.
    pub day_shift_count: u32,
    /// Number of night-shift records.
    pub night_shift_count: u32,
}

/// Builds the monthly report for `(year, month)` from a user's full
/// history.
///
/// Fails with [`EngineError::NoData`] when the month holds no records.
pub fn monthly_report(history: &UserHistory, year: i32, month: u32) -> EngineResult<MonthlyReport> {
    let in_month = |date: &NaiveDate| date.year() == year && date.month() == month;

    let mut days_worked = 0u32;
    let mut paid_minutes = 0i64;
    let mut regular_minutes = 0i64;
    let mut overtime_minutes = 0i64;
    let mut total_salary = Decimal::ZERO;
    let mut day_shift_count = 0u32;
    let mut night_shift_count = 0u32;

    for (date, records) in history {
        if !in_month(date) || records.is_empty() {
            continue;
        }
        days_worked += 1;
        for record in records {
            paid_minutes += record.paid_minutes;
            regular_minutes += record.regular_minutes;
            overtime_minutes += record.overtime_minutes + record.night_overtime_minutes;
            total_salary += record.total_salary;
            match record.shift {
                ShiftKind::Day => day_shift_count += 1,
                ShiftKind::Night => night_shift_count += 1,
            }
        }
    }

    if days_worked == 0 {
        return Err(EngineError::NoData);
    }

    Ok(MonthlyReport {
        year,
        month,
        days_worked,
        total_hours: hours(paid_minutes),
        regular_hours: hours(regular_minutes),
        overtime_hours: hours(overtime_minutes),
        total_salary,
        day_shift_count,
        night_shift_count,
    })
}
