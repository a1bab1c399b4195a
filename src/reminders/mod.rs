//! Daily work reminder settings.
//!
//! Each user may store one daily reminder: a clock time and a message.
//! This module only persists the setting; no scheduling or delivery
//! mechanism exists in this crate.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::TimeOfDay;

const DEFAULT_MESSAGE: &str = "Time to record your work hours!";

/// A user's daily work reminder setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkReminder {
    /// The reminder time.
    pub time: TimeOfDay,
    /// The reminder message.
    pub message: String,
    /// Whether the reminder is active.
    pub enabled: bool,
    /// When the reminder was created or last replaced.
    pub created_at: DateTime<Utc>,
}

type AllReminders = BTreeMap<String, WorkReminder>;

/// The flat-file reminder store.
#[derive(Debug, Clone)]
pub struct ReminderStore {
    path: PathBuf,
}

impl ReminderStore {
    /// Opens the store at `path`, creating an empty document if the file
    /// does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        if !store.path.exists() {
            store.write_all(&AllReminders::new())?;
        }
        Ok(store)
    }

    /// Sets (or replaces) a user's daily reminder. A missing message falls
    /// back to the default prompt.
    pub fn set_reminder(
        &self,
        user_id: &str,
        time: TimeOfDay,
        message: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> EngineResult<WorkReminder> {
        let reminder = WorkReminder {
            time,
            message: message.unwrap_or(DEFAULT_MESSAGE).to_string(),
            enabled: true,
            created_at,
        };

        let mut all = self.read_all()?;
        all.insert(user_id.to_string(), reminder.clone());
        self.write_all(&all)?;

        Ok(reminder)
    }

    /// Returns a user's reminder, if one is set.
    pub fn reminder_for(&self, user_id: &str) -> EngineResult<Option<WorkReminder>> {
        Ok(self.read_all()?.get(user_id).cloned())
    }

    /// Disables a user's reminder. Returns whether one was set.
    pub fn disable(&self, user_id: &str) -> EngineResult<bool> {
        let mut all = self.read_all()?;
        match all.get_mut(user_id) {
            Some(reminder) if reminder.enabled => {
                reminder.enabled = false;
                self.write_all(&all)?;
                Ok(true)
            }
            Some(_) => Ok(true),
            None => Ok(false),
        }
    }

    fn read_all(&self) -> EngineResult<AllReminders> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.storage_error(e))?;
        serde_json::from_str(&content).map_err(|e| self.storage_error(e))
    }

    fn write_all(&self, all: &AllReminders) -> EngineResult<()> {
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
