//! Core data models for the salary engine.
//!
//! This module contains all the domain models used throughout the engine.

mod salary_result;
mod shift;
mod time_of_day;

pub use salary_result::{BreakOverlap, CalculationRecord, SalaryResult};
pub use shift::{BreakInterval, ShiftDefinition, ShiftKind};
pub use time_of_day::{TimeOfDay, MINUTES_PER_DAY};
