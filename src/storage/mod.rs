//! Flat-file JSON persistence for calculation records.
//!
//! The whole store is one JSON document mapping user id to a per-date list
//! of [`CalculationRecord`]s. Every operation reads the file, mutates the
//! in-memory map and writes the file back. There is no locking and no
//! transactional guarantee.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::CalculationRecord;

/// A user's calculation history: records bucketed by calendar date.
pub type UserHistory = BTreeMap<NaiveDate, Vec<CalculationRecord>>;

type AllUsers = BTreeMap<String, UserHistory>;

/// The flat-file calculation store.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use salary_engine::storage::CalculationStore;
///
/// let store = CalculationStore::open("salary_data.json").unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let history = store.date_range("user_1", 30, date).unwrap();
/// println!("{} days on record", history.len());
/// ```
#[derive(Debug, Clone)]
pub struct CalculationStore {
    path: PathBuf,
}

impl CalculationStore {
    /// Opens the store at `path`, creating an empty document if the file
    /// does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        if !store.path.exists() {
            store.write_all(&AllUsers::new())?;
        }
        Ok(store)
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a record under the given user and date.
    pub fn append(
        &self,
        user_id: &str,
        date: NaiveDate,
        record: CalculationRecord,
    ) -> EngineResult<()> {
        let mut all = self.read_all()?;
        all.entry(user_id.to_string())
            .or_default()
            .entry(date)
            .or_default()
            .push(record);
        self.write_all(&all)
    }

    /// Loads the full history for a user. Unknown users yield an empty map.
    pub fn load_user(&self, user_id: &str) -> EngineResult<UserHistory> {
        let all = self.read_all()?;
        Ok(all.get(user_id).cloned().unwrap_or_default())
    }

    /// Loads the user's records for the `days`-day window ending at
    /// `until` (inclusive).
    pub fn date_range(
        &self,
        user_id: &str,
        days: u32,
        until: NaiveDate,
    ) -> EngineResult<UserHistory> {
        let history = self.load_user(user_id)?;
        if days == 0 {
            return Ok(UserHistory::new());
        }
        let first = until
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .unwrap_or(NaiveDate::MIN);

        Ok(history
            .into_iter()
            .filter(|(date, _)| *date >= first && *date <= until)
            .collect())
    }

    /// Deletes a user's entire history. Returns whether anything existed.
    pub fn delete_user(&self, user_id: &str) -> EngineResult<bool> {
        let mut all = self.read_all()?;
        let removed = all.remove(user_id).is_some();
        if removed {
            self.write_all(&all)?;
        }
        Ok(removed)
    }

    /// Deletes a user's date buckets older than `cutoff` (exclusive).
    /// Returns the number of dates removed.
    pub fn delete_older_than(&self, user_id: &str, cutoff: NaiveDate) -> EngineResult<u32> {
        let mut all = self.read_all()?;
        let Some(history) = all.get_mut(user_id) else {
            return Ok(0);
        };
        let before = history.len();
        history.retain(|date, _| *date >= cutoff);
        let removed = (before - history.len()) as u32;
        if removed > 0 {
            self.write_all(&all)?;
        }
        Ok(removed)
    }

    /// Deletes a single date bucket for a user. Returns whether it existed.
    pub fn delete_date(&self, user_id: &str, date: NaiveDate) -> EngineResult<bool> {
        let mut all = self.read_all()?;
        let removed = all
            .get_mut(user_id)
            .map(|history| history.remove(&date).is_some())
            .unwrap_or(false);
        if removed {
            self.write_all(&all)?;
        }
        Ok(removed)
    }

    fn read_all(&self) -> EngineResult<AllUsers> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.storage_error(e))?;
        serde_json::from_str(&content).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Store file is not valid JSON");
            self.storage_error(e)
        })
    }

    fn write_all(&self, all: &AllUsers) -> EngineResult<()> {
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
