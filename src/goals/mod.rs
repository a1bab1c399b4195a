//! Goal setting and progress tracking.
//!
//! Users set weekly or monthly targets for salary or worked hours. Targets
//! live in their own flat JSON file, keyed by user and period; progress is
//! measured against the calculation history for the current period.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::storage::UserHistory;

/// What a goal measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    /// A salary target.
    Salary,
    /// A worked-hours target.
    Hours,
}

/// The span a goal covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPeriod {
    /// The current ISO week, Monday through Sunday.
    Weekly,
    /// The current calendar month.
    Monthly,
}

/// A stored target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// The target value: currency units for salary goals, hours otherwise.
    pub target: Decimal,
    /// When the goal was set.
    pub set_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserGoals {
    #[serde(default)]
    monthly: BTreeMap<String, BTreeMap<GoalKind, Goal>>,
    #[serde(default)]
    weekly: BTreeMap<String, BTreeMap<GoalKind, Goal>>,
}

type AllGoals = BTreeMap<String, UserGoals>;

/// Progress against one goal for the current period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// The goal's span.
    pub period: GoalPeriod,
    /// What the goal measures.
    pub kind: GoalKind,
    /// The period bucket, e.g. `"2026-01"` or `"2026-W03"`.
    pub period_key: String,
    /// The target value.
    pub target: Decimal,
    /// The achieved value so far.
    pub achieved: Decimal,
    /// Achieved over target as a percentage, 1 dp.
    pub percent: Decimal,
}

/// The month bucket key for a date, e.g. `"2026-01"`.
pub fn monthly_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// The ISO-week bucket key for a date, e.g. `"2026-W03"`.
pub fn weekly_key(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

/// The Monday-through-Sunday range containing `date`.
fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = date
        .checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
        .unwrap_or(date);
    let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
    (monday, sunday)
}

/// The flat-file goal store.
///
/// # Example
///
/// ```no_run
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use salary_engine::goals::{GoalKind, GoalPeriod, GoalStore};
///
/// let store = GoalStore::open("goals.json").unwrap();
/// let today = Utc::now().date_naive();
/// store
///     .set_goal("user_1", GoalPeriod::Monthly, GoalKind::Salary,
///               Decimal::from(300_000), Utc::now(), today)
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct GoalStore {
    path: PathBuf,
}

impl GoalStore {
    /// Opens the store at `path`, creating an empty document if the file
    /// does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        if !store.path.exists() {
            store.write_all(&AllGoals::new())?;
        }
        Ok(store)
    }

    /// Sets (or replaces) a goal for the period containing `today`.
    pub fn set_goal(
        &self,
        user_id: &str,
        period: GoalPeriod,
        kind: GoalKind,
        target: Decimal,
        set_on: DateTime<Utc>,
        today: NaiveDate,
    ) -> EngineResult<()> {
        let mut all = self.read_all()?;
        let user = all.entry(user_id.to_string()).or_default();

        let (bucket, key) = match period {
            GoalPeriod::Monthly => (&mut user.monthly, monthly_key(today)),
            GoalPeriod::Weekly => (&mut user.weekly, weekly_key(today)),
        };
        bucket
            .entry(key)
            .or_default()
            .insert(kind, Goal { target, set_on });

        self.write_all(&all)
    }

    /// Computes progress for every goal set in the periods containing
    /// `today`, measured against the user's history.
    pub fn progress(
        &self,
        user_id: &str,
        history: &UserHistory,
        today: NaiveDate,
    ) -> EngineResult<Vec<GoalProgress>> {
        let all = self.read_all()?;
        let Some(user) = all.get(user_id) else {
            return Ok(Vec::new());
        };

        let mut progress = Vec::new();

        let month_key = monthly_key(today);
        if let Some(goals) = user.monthly.get(&month_key) {
            let in_month = |date: &NaiveDate| monthly_key(*date) == month_key;
            for (kind, goal) in goals {
                progress.push(build_progress(
                    GoalPeriod::Monthly,
                    *kind,
                    &month_key,
                    goal,
                    history,
                    in_month,
                ));
            }
        }

        let week_key = weekly_key(today);
        if let Some(goals) = user.weekly.get(&week_key) {
            let (monday, sunday) = week_bounds(today);
            let in_week = move |date: &NaiveDate| *date >= monday && *date <= sunday;
            for (kind, goal) in goals {
                progress.push(build_progress(
                    GoalPeriod::Weekly,
                    *kind,
                    &week_key,
                    goal,
                    history,
                    in_week,
                ));
            }
        }

        Ok(progress)
    }

    fn read_all(&self) -> EngineResult<AllGoals> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.storage_error(e))?;
        serde_json::from_str(&content).map_err(|e| self.storage_error(e))
    }

    fn write_all(&self, all: &AllGoals) -> EngineResult<()> {
        let content = serde_json::to_string_pretty(all).map_err(|e| self.storage_error(e))?;
        fs::write(&self.path, content).map_err(|e| self.storage_error(e))
    }

    fn storage_error(&self, source: impl std::fmt::Display) -> EngineError {
        EngineError::Storage {
            path: self.path.display().to_string(),
            message: source.to_string(),
        }
    }
}

fn build_progress(
    period: GoalPeriod,
    kind: GoalKind,
    period_key: &str,
    goal: &Goal,
    history: &UserHistory,
    in_period: impl Fn(&NaiveDate) -> bool,
) -> GoalProgress {
    let mut paid_minutes = 0i64;
    let mut salary = Decimal::ZERO;
    for (date, records) in history {
        if !in_period(date) {
            continue;
        }
        for record in records {
            paid_minutes += record.paid_minutes;
            salary += record.total_salary;
        }
    }

    let achieved = match kind {
        GoalKind::Salary => salary,
        GoalKind::Hours => (Decimal::from(paid_minutes) / Decimal::from(60)).round_dp(2),
    };
    let percent = if goal.target > Decimal::ZERO {
        (achieved / goal.target * Decimal::from(100)).round_dp(1)
    } else {
        Decimal::ZERO
    };

    GoalProgress {
        period,
        kind,
        period_key: period_key.to_string(),
        target: goal.target,
        achieved,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::SalaryEngine;
    use crate::models::CalculationRecord;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap()
    }

    fn record(start: &str, end: &str) -> CalculationRecord {
        let engine = SalaryEngine::default();
        let result = engine.compute(start, end).unwrap();
        CalculationRecord::from_result(&result, now())
    }

    fn open_store(dir: &tempfile::TempDir) -> GoalStore {
        GoalStore::open(dir.path().join("goals.json")).unwrap()
    }

    #[test]
    fn test_period_keys() {
        assert_eq!(monthly_key(date("2026-01-15")), "2026-01");
        // 2026-01-15 is a Thursday in ISO week 3.
        assert_eq!(weekly_key(date("2026-01-15")), "2026-W03");
    }

    #[test]
    fn test_week_bounds_monday_through_sunday() {
        let (monday, sunday) = week_bounds(date("2026-01-15"));
        assert_eq!(monday, date("2026-01-12"));
        assert_eq!(sunday, date("2026-01-18"));
    }

    // ==========================================================================
    // GT-001: monthly salary goal progress
    // ==========================================================================
    #[test]
    fn test_gt_001_monthly_salary_progress() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let today = date("2026-01-15");

        store
            .set_goal("user_1", GoalPeriod::Monthly, GoalKind::Salary, dec("100000"), now(), today)
            .unwrap();

        let mut history = UserHistory::new();
        // Two day shifts at 15575 each.
        history.insert(date("2026-01-14"), vec![record("08:30", "17:30")]);
        history.insert(date("2026-01-15"), vec![record("08:30", "17:30")]);

        let progress = store.progress("user_1", &history, today).unwrap();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].kind, GoalKind::Salary);
        assert_eq!(progress[0].period_key, "2026-01");
        assert_eq!(progress[0].achieved, dec("31150.00"));
        // 31150 / 100000 = 31.2%
        assert_eq!(progress[0].percent, dec("31.2"));
    }

    // ==========================================================================
    // GT-002: weekly hours goal only counts the current week
    // ==========================================================================
    #[test]
    fn test_gt_002_weekly_hours_progress() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let today = date("2026-01-15");

        store
            .set_goal("user_1", GoalPeriod::Weekly, GoalKind::Hours, dec("40"), now(), today)
            .unwrap();

        let mut history = UserHistory::new();
        // Inside the week (Mon 2026-01-12 .. Sun 2026-01-18).
        history.insert(date("2026-01-13"), vec![record("08:30", "17:30")]);
        // Outside the week.
        history.insert(date("2026-01-05"), vec![record("08:30", "17:30")]);

        let progress = store.progress("user_1", &history, today).unwrap();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].period, GoalPeriod::Weekly);
        // 445 minutes = 7.42 hours
        assert_eq!(progress[0].achieved, dec("7.42"));
        // 7.42 / 40 = 18.6%
        assert_eq!(progress[0].percent, dec("18.6"));
    }

    // ==========================================================================
    // GT-003: goals in other periods are not reported
    // ==========================================================================
    #[test]
    fn test_gt_003_stale_goals_not_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        store
            .set_goal("user_1", GoalPeriod::Monthly, GoalKind::Salary, dec("100000"), now(), date("2025-12-15"))
            .unwrap();

        let progress = store
            .progress("user_1", &UserHistory::new(), date("2026-01-15"))
            .unwrap();
        assert!(progress.is_empty());
    }

    #[test]
    fn test_setting_goal_twice_replaces_it() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let today = date("2026-01-15");

        store
            .set_goal("user_1", GoalPeriod::Monthly, GoalKind::Salary, dec("100000"), now(), today)
            .unwrap();
        store
            .set_goal("user_1", GoalPeriod::Monthly, GoalKind::Salary, dec("200000"), now(), today)
            .unwrap();

        let progress = store.progress("user_1", &UserHistory::new(), today).unwrap();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].target, dec("200000"));
    }

    #[test]
    fn test_unknown_user_has_no_progress() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let progress = store
            .progress("nobody", &UserHistory::new(), date("2026-01-15"))
            .unwrap();
        assert!(progress.is_empty());
    }

    #[test]
    fn test_salary_and_hours_goals_coexist() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let today = date("2026-01-15");

        store
            .set_goal("user_1", GoalPeriod::Monthly, GoalKind::Salary, dec("100000"), now(), today)
            .unwrap();
        store
            .set_goal("user_1", GoalPeriod::Monthly, GoalKind::Hours, dec("160"), now(), today)
            .unwrap();

        let progress = store.progress("user_1", &UserHistory::new(), today).unwrap();
        assert_eq!(progress.len(), 2);
    }

    #[test]
    fn test_zero_target_yields_zero_percent() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let today = date("2026-01-15");

        store
            .set_goal("user_1", GoalPeriod::Monthly, GoalKind::Salary, Decimal::ZERO, now(), today)
            .unwrap();

        let mut history = UserHistory::new();
        history.insert(today, vec![record("08:30", "17:30")]);

        let progress = store.progress("user_1", &history, today).unwrap();
        assert_eq!(progress[0].percent, Decimal::ZERO);
    }

    #[test]
    fn test_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("goals.json");
        let today = date("2026-01-15");

        {
            let store = GoalStore::open(&path).unwrap();
            store
                .set_goal("user_1", GoalPeriod::Weekly, GoalKind::Hours, dec("40"), now(), today)
                .unwrap();
        }

        let reopened = GoalStore::open(&path).unwrap();
        let progress = reopened.progress("user_1", &UserHistory::new(), today).unwrap();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].target, dec("40"));
    }
}
