//! Analytics over the calculation history.
//!
//! Thin aggregation over [`UserHistory`](crate::storage::UserHistory):
//! period summaries, per-day totals for charting and a recent-history
//! rollup. All values are computed from the persisted records; nothing
//! here recalculates salaries.

use chrono::{Days, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::storage::UserHistory;

const CHART_WIDTH: usize = 15;

fn minutes_to_hours(minutes: i64) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(2)
}

/// Summary statistics for a user's recent history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of distinct days with at least one record.
    pub total_days: u32,
    /// Total paid hours.
    pub total_work_hours: Decimal,
    /// Total regular hours.
    pub total_regular_hours: Decimal,
    /// Total overtime hours (base-rate and night combined).
    pub total_overtime_hours: Decimal,
    /// Total salary.
    pub total_salary: Decimal,
    /// Average paid hours per recorded day.
    pub avg_daily_hours: Decimal,
    /// Average salary per recorded day.
    pub avg_daily_salary: Decimal,
    /// The window length the summary was requested for.
    pub period_days: u32,
}

/// Aggregates summary statistics over a history window.
///
/// Fails with [`EngineError::NoData`] when the window holds no records.
pub fn summary_stats(history: &UserHistory, period_days: u32) -> EngineResult<SummaryStats> {
    if history.is_empty() {
        return Err(EngineError::NoData);
    }

    let mut paid_minutes = 0i64;
    let mut regular_minutes = 0i64;
    let mut overtime_minutes = 0i64;
    let mut total_salary = Decimal::ZERO;

    for records in history.values() {
        for record in records {
            paid_minutes += record.paid_minutes;
            regular_minutes += record.regular_minutes;
            overtime_minutes += record.overtime_minutes + record.night_overtime_minutes;
            total_salary += record.total_salary;
        }
    }

    let total_days = history.len() as u32;
    let days = Decimal::from(total_days);

    Ok(SummaryStats {
        total_days,
        total_work_hours: minutes_to_hours(paid_minutes),
        total_regular_hours: minutes_to_hours(regular_minutes),
        total_overtime_hours: minutes_to_hours(overtime_minutes),
        total_salary,
        avg_daily_hours: (minutes_to_hours(paid_minutes) / days).round_dp(2),
        avg_daily_salary: (total_salary / days).round_dp(0),
        period_days,
    })
}

/// One day's totals for charting. Days without records carry zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// The calendar date.
    pub date: NaiveDate,
    /// Paid hours that day, 1 dp.
    pub hours: Decimal,
    /// Salary that day.
    pub salary: Decimal,
}

/// Builds chronological per-day totals for the `days`-day window ending at
/// `until`, inserting zero rows for days without records.
pub fn daily_totals(history: &UserHistory, days: u32, until: NaiveDate) -> Vec<DailyTotal> {
    let mut totals = Vec::with_capacity(days as usize);

    for offset in (0..days).rev() {
        let date = until
            .checked_sub_days(Days::new(u64::from(offset)))
            .unwrap_or(NaiveDate::MIN);

        let mut paid_minutes = 0i64;
        let mut salary = Decimal::ZERO;
        if let Some(records) = history.get(&date) {
            for record in records {
                paid_minutes += record.paid_minutes;
                salary += record.total_salary;
            }
        }

        totals.push(DailyTotal {
            date,
            hours: (Decimal::from(paid_minutes) / Decimal::from(60)).round_dp(1),
            salary: salary.round_dp(0),
        });
    }

    totals
}

/// Which value a text bar chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMetric {
    /// Plot paid hours per day.
    Hours,
    /// Plot salary per day.
    Salary,
}

/// Renders a text bar chart over daily totals.
///
/// Bars are scaled to the maximum value in the window; each row shows the
/// date, a fixed-width bar and the value.
pub fn render_bar_chart(totals: &[DailyTotal], metric: ChartMetric) -> String {
    if totals.is_empty() {
        return "no data".to_string();
    }

    let title = match metric {
        ChartMetric::Hours => "Daily work hours",
        ChartMetric::Salary => "Daily salary",
    };

    let values: Vec<Decimal> = totals
        .iter()
        .map(|t| match metric {
            ChartMetric::Hours => t.hours,
            ChartMetric::Salary => t.salary,
        })
        .collect();
    let max_value = values.iter().copied().max().unwrap_or(Decimal::ZERO);

    let mut lines = vec![title.to_string(), String::new()];
    for (total, value) in totals.iter().zip(&values) {
        let filled = if max_value > Decimal::ZERO {
            (*value / max_value * Decimal::from(CHART_WIDTH as u32))
                .floor()
                .to_usize()
                .unwrap_or(0)
                .min(CHART_WIDTH)
        } else {
            0
        };

        let bar: String = "█".repeat(filled) + &"░".repeat(CHART_WIDTH - filled);
        let value_text = match metric {
            ChartMetric::Hours => format!("{}h", value.round_dp(1)),
            ChartMetric::Salary => value.round_dp(0).to_string(),
        };
        lines.push(format!("{} {} {}", total.date.format("%m/%d"), bar, value_text));
    }

    lines.join("\n")
}

/// One day's rollup in the recent-history view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryDay {
    /// The calendar date.
    pub date: NaiveDate,
    /// Paid hours that day, 1 dp.
    pub hours: Decimal,
    /// Overtime hours that day (base-rate and night combined), 1 dp.
    pub overtime_hours: Decimal,
    /// Salary that day.
    pub salary: Decimal,
    /// The recorded intervals, e.g. `"08:30~17:30 (C341)"`.
    pub shifts: Vec<String>,
}

/// Builds the recent-history rollup, newest date first.
pub fn recent_history(history: &UserHistory) -> Vec<HistoryDay> {
    history
        .iter()
        .rev()
        .map(|(date, records)| {
            let mut paid_minutes = 0i64;
            let mut overtime_minutes = 0i64;
            let mut salary = Decimal::ZERO;
            let mut shifts = Vec::with_capacity(records.len());

            for record in records {
                paid_minutes += record.paid_minutes;
                overtime_minutes += record.overtime_minutes + record.night_overtime_minutes;
                salary += record.total_salary;
                shifts.push(format!(
                    "{}~{} ({})",
                    record.start_time,
                    record.end_time,
                    record.shift.code()
                ));
            }

            HistoryDay {
                date: *date,
                hours: (Decimal::from(paid_minutes) / Decimal::from(60)).round_dp(1),
                overtime_hours: (Decimal::from(overtime_minutes) / Decimal::from(60)).round_dp(1),
                salary: salary.round_dp(0),
                shifts,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::SalaryEngine;
    use crate::models::CalculationRecord;
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn record(start: &str, end: &str) -> CalculationRecord {
        let engine = SalaryEngine::default();
        let result = engine.compute(start, end).unwrap();
        let timestamp = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
        CalculationRecord::from_result(&result, timestamp)
    }

    fn two_day_history() -> UserHistory {
        let mut history = UserHistory::new();
        // Day shift: 445 paid minutes, 15575 salary.
        history.insert(date("2026-01-14"), vec![record("08:30", "17:30")]);
        // Long night shift: 550 paid, 95 night overtime, 20081.25 salary.
        history.insert(date("2026-01-15"), vec![record("16:45", "03:00")]);
        history
    }

    // ==========================================================================
    // AN-001: summary totals across two days
    // ==========================================================================
    #[test]
    fn test_an_001_summary_totals() {
        let stats = summary_stats(&two_day_history(), 30).unwrap();

        assert_eq!(stats.total_days, 2);
        // (445 + 550) / 60 = 16.58 hours
        assert_eq!(stats.total_work_hours, dec("16.58"));
        // (445 + 455) / 60 = 15 hours regular
        assert_eq!(stats.total_regular_hours, dec("15.00"));
        // 95 / 60 = 1.58 hours overtime
        assert_eq!(stats.total_overtime_hours, dec("1.58"));
        assert_eq!(stats.total_salary, dec("15575.00") + dec("20081.25"));
        assert_eq!(stats.period_days, 30);
    }

    // ==========================================================================
    // AN-002: empty history is NoData
    // ==========================================================================
    #[test]
    fn test_an_002_empty_history_is_no_data() {
        let err = summary_stats(&UserHistory::new(), 30).unwrap_err();
        assert!(matches!(err, EngineError::NoData));
    }

    #[test]
    fn test_summary_averages() {
        let stats = summary_stats(&two_day_history(), 30).unwrap();
        // 16.58 / 2 = 8.29
        assert_eq!(stats.avg_daily_hours, dec("8.29"));
        // 35656.25 / 2 = 17828.125, rounded to 17828
        assert_eq!(stats.avg_daily_salary, dec("17828"));
    }

    // ==========================================================================
    // AN-003: daily totals are chronological and zero-filled
    // ==========================================================================
    #[test]
    fn test_an_003_daily_totals_window() {
        let totals = daily_totals(&two_day_history(), 3, date("2026-01-15"));

        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].date, date("2026-01-13"));
        assert_eq!(totals[0].hours, dec("0.0"));
        assert_eq!(totals[1].date, date("2026-01-14"));
        // 445 / 60 = 7.4 at 1 dp
        assert_eq!(totals[1].hours, dec("7.4"));
        assert_eq!(totals[2].date, date("2026-01-15"));
        assert_eq!(totals[2].salary, dec("20081"));
    }

    #[test]
    fn test_multiple_records_per_day_are_summed() {
        let mut history = UserHistory::new();
        history.insert(
            date("2026-01-15"),
            vec![record("08:30", "17:30"), record("08:30", "17:30")],
        );

        let totals = daily_totals(&history, 1, date("2026-01-15"));
        assert_eq!(totals[0].hours, dec("14.8"));
        assert_eq!(totals[0].salary, dec("31150"));
    }

    // ==========================================================================
    // AN-004: bar chart rows scale to the window maximum
    // ==========================================================================
    #[test]
    fn test_an_004_bar_chart_rendering() {
        let totals = daily_totals(&two_day_history(), 2, date("2026-01-15"));
        let chart = render_bar_chart(&totals, ChartMetric::Hours);

        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "Daily work hours");
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("01/14"));
        assert!(lines[3].starts_with("01/15"));
        // The larger day fills the whole bar.
        assert!(lines[3].contains(&"█".repeat(15)));
        assert!(lines[3].ends_with("9.2h"));
    }

    #[test]
    fn test_bar_chart_salary_metric() {
        let totals = daily_totals(&two_day_history(), 2, date("2026-01-15"));
        let chart = render_bar_chart(&totals, ChartMetric::Salary);
        assert!(chart.starts_with("Daily salary"));
        assert!(chart.contains("20081"));
    }

    #[test]
    fn test_bar_chart_empty_window() {
        assert_eq!(render_bar_chart(&[], ChartMetric::Hours), "no data");
    }

    #[test]
    fn test_bar_chart_all_zero_days() {
        let totals = daily_totals(&UserHistory::new(), 2, date("2026-01-15"));
        let chart = render_bar_chart(&totals, ChartMetric::Hours);
        assert!(chart.contains(&"░".repeat(15)));
    }

    // ==========================================================================
    // AN-005: recent history is newest first with shift labels
    // ==========================================================================
    #[test]
    fn test_an_005_recent_history() {
        let days = recent_history(&two_day_history());

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date("2026-01-15"));
        assert_eq!(days[1].date, date("2026-01-14"));
        assert_eq!(days[0].shifts, vec!["16:45~03:00 (C342)".to_string()]);
        assert_eq!(days[0].overtime_hours, dec("1.6"));
        assert_eq!(days[1].shifts, vec!["08:30~17:30 (C341)".to_string()]);
        assert_eq!(days[1].overtime_hours, dec("0.0"));
    }
}
