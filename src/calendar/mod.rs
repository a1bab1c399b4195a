//! Calendar: payday tracking and user events.
//!
//! The calendar file carries the configured salary payment day plus
//! per-user events. An event may carry a reminder time; the engine only
//! stores it, nothing in this crate delivers reminders.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::TimeOfDay;

const DEFAULT_PAYMENT_DAY: u32 = 25;

/// A user-scheduled calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Store-unique event id.
    pub id: String,
    /// The event date.
    pub date: NaiveDate,
    /// Free-form event category, e.g. `"holiday"` or `"overtime"`.
    pub event_type: String,
    /// Event description.
    pub description: String,
    /// Optional reminder time. Stored only; never delivered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<TimeOfDay>,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
}

fn default_payment_day() -> u32 {
    DEFAULT_PAYMENT_DAY
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CalendarData {
    #[serde(default = "default_payment_day")]
    salary_payment_day: u32,
    #[serde(default)]
    users: BTreeMap<String, Vec<CalendarEvent>>,
}

impl Default for CalendarData {
    fn default() -> Self {
        Self {
            salary_payment_day: DEFAULT_PAYMENT_DAY,
            users: BTreeMap::new(),
        }
    }
}

/// The next salary payment date relative to a reference day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaydayInfo {
    /// The next payment date.
    pub next_payment_date: NaiveDate,
    /// Days from the reference date to the payment date.
    pub days_until: i64,
    /// The configured day of month.
    pub payment_day: u32,
}

/// The flat-file calendar store.
///
/// # Example
///
/// ```no_run
/// use chrono::Utc;
/// use salary_engine::calendar::CalendarStore;
///
/// let store = CalendarStore::open("calendar_data.json").unwrap();
/// let payday = store.next_payday(Utc::now().date_naive()).unwrap();
/// println!("payday in {} days", payday.days_until);
/// ```
#[derive(Debug, Clone)]
pub struct CalendarStore {
    path: PathBuf,
}

impl CalendarStore {
    /// Opens the store at `path`, creating a default document if the file
    /// does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        if !store.path.exists() {
            store.write_all(&CalendarData::default())?;
        }
        Ok(store)
    }

    /// The configured salary payment day of month.
    pub fn payment_day(&self) -> EngineResult<u32> {
        Ok(self.read_all()?.salary_payment_day)
    }

    /// Sets the salary payment day (1–31).
    pub fn set_payment_day(&self, day: u32) -> EngineResult<()> {
        if !(1..=31).contains(&day) {
            return Err(EngineError::InvalidPaymentDay { day });
        }
        let mut data = self.read_all()?;
        data.salary_payment_day = day;
        self.write_all(&data)
    }

    /// Computes the next payment date on or after `today`.
    ///
    /// A payment day beyond a month's length clamps to that month's last
    /// day (the 31st pays on 30 April).
    pub fn next_payday(&self, today: NaiveDate) -> EngineResult<PaydayInfo> {
        let payment_day = self.read_all()?.salary_payment_day;

        let this_month = payment_date(today.year(), today.month(), payment_day);
        let next_payment_date = if today <= this_month {
            this_month
        } else {
            let next_month = this_month
                .checked_add_months(Months::new(1))
                .unwrap_or(this_month);
            payment_date(next_month.year(), next_month.month(), payment_day)
        };

        Ok(PaydayInfo {
            next_payment_date,
            days_until: (next_payment_date - today).num_days(),
            payment_day,
        })
    }

    /// Adds an event for a user and returns it.
    pub fn add_event(
        &self,
        user_id: &str,
        date: NaiveDate,
        event_type: &str,
        description: &str,
        reminder_time: Option<TimeOfDay>,
        created_at: DateTime<Utc>,
    ) -> EngineResult<CalendarEvent> {
        let mut data = self.read_all()?;
        let events = data.users.entry(user_id.to_string()).or_default();

        let event = CalendarEvent {
            id: format!("{user_id}_{date}_{}", events.len()),
            date,
            event_type: event_type.to_string(),
            description: description.to_string(),
            reminder_time,
            created_at,
        };
        events.push(event.clone());
        self.write_all(&data)?;

        Ok(event)
    }

    /// Returns a user's events dated within `days` days of `from`
    /// (inclusive), soonest first.
    pub fn events_for(
        &self,
        user_id: &str,
        days: u32,
        from: NaiveDate,
    ) -> EngineResult<Vec<CalendarEvent>> {
        let data = self.read_all()?;
        let last = from
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);

        let mut events: Vec<CalendarEvent> = data
            .users
            .get(user_id)
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.date >= from && e.date <= last)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        events.sort_by_key(|e| e.date);

        Ok(events)
    }

    fn read_all(&self) -> EngineResult<CalendarData> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.storage_error(e))?;
        serde_json::from_str(&content).map_err(|e| self.storage_error(e))
    }

    fn write_all(&self, data: &CalendarData) -> EngineResult<()> {
        let content = serde_json::to_string_pretty(data).map_err(|e| self.storage_error(e))?;
        fs::write(&self.path, content).map_err(|e| self.storage_error(e))
    }

    fn storage_error(&self, source: impl std::fmt::Display) -> EngineError {
        EngineError::Storage {
            path: self.path.display().to_string(),
            message: source.to_string(),
        }
    }
}

/// The payment date for a month, clamped to the month's last day.
fn payment_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .unwrap_or(NaiveDate::MIN)
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX);
        first.checked_sub_days(Days::new(1)).unwrap_or(first)
    })
}
