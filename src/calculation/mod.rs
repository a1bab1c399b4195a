//! Calculation logic for the salary engine.
//!
//! This module contains the calculation pipeline: minute arithmetic over
//! clock-time intervals, shift detection against the fixed catalog,
//! break-overlap deduction, the regular/overtime/night-overtime split and
//! the orchestrating [`SalaryEngine`].

mod break_deduction;
mod hour_split;
mod salary;
mod shift_detection;
mod time_math;

pub use break_deduction::deduct_breaks;
pub use hour_split::{split_paid_minutes, HourSplit};
pub use salary::{minutes_to_pay, SalaryEngine};
pub use shift_detection::{ShiftCatalog, ShiftMatch};
pub use time_math::{crosses_midnight, duration_minutes, overlap_minutes};
