//! Application state for the salary engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::path::Path;
use std::sync::Arc;

use crate::calculation::SalaryEngine;
use crate::calendar::CalendarStore;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::goals::GoalStore;
use crate::reminders::ReminderStore;
use crate::storage::CalculationStore;

/// Shared application state.
///
/// Holds the engine and the four flat-file stores. Everything is behind an
/// `Arc`; the stores serialize nothing in memory, so cloning the state is
/// cheap.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<SalaryEngine>,
    calculations: Arc<CalculationStore>,
    goals: Arc<GoalStore>,
    calendar: Arc<CalendarStore>,
    reminders: Arc<ReminderStore>,
}

impl AppState {
    /// Creates application state from pre-built components.
    pub fn new(
        engine: SalaryEngine,
        calculations: CalculationStore,
        goals: GoalStore,
        calendar: CalendarStore,
        reminders: ReminderStore,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            calculations: Arc::new(calculations),
            goals: Arc::new(goals),
            calendar: Arc::new(calendar),
            reminders: Arc::new(reminders),
        }
    }

    /// Builds state from a configuration, opening the stores under
    /// `data_dir` with their canonical file names.
    pub fn open<P: AsRef<Path>>(config: EngineConfig, data_dir: P) -> EngineResult<Self> {
        let dir = data_dir.as_ref();
        Ok(Self::new(
            SalaryEngine::new(config),
            CalculationStore::open(dir.join("salary_data.json"))?,
            GoalStore::open(dir.join("goals.json"))?,
            CalendarStore::open(dir.join("calendar_data.json"))?,
            ReminderStore::open(dir.join("notifications.json"))?,
        ))
    }

    /// The calculation engine.
    pub fn engine(&self) -> &SalaryEngine {
        &self.engine
    }

    /// The calculation store.
    pub fn calculations(&self) -> &CalculationStore {
        &self.calculations
    }

    /// The goal store.
    pub fn goals(&self) -> &GoalStore {
        &self.goals
    }

    /// The calendar store.
    pub fn calendar(&self) -> &CalendarStore {
        &self.calendar
    }

    /// The reminder store.
    pub fn reminders(&self) -> &ReminderStore {
        &self.reminders
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_open_creates_store_files() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::open(EngineConfig::default(), dir.path()).unwrap();

        assert!(dir.path().join("salary_data.json").exists());
        assert!(dir.path().join("goals.json").exists());
        assert!(dir.path().join("calendar_data.json").exists());
        assert!(dir.path().join("notifications.json").exists());
        assert_eq!(state.engine().config().regular_limit_minutes, 455);
    }
}
