//! The salary calculation engine.
//!
//! [`SalaryEngine`] wires the calculation pipeline together: parse the two
//! time strings, resolve the shift, deduct break overlaps, split the paid
//! minutes and price each bucket. The engine holds no mutable state, so a
//! given input pair always produces the same [`SalaryResult`].

use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{SalaryResult, TimeOfDay};

use super::break_deduction::deduct_breaks;
use super::hour_split::split_paid_minutes;
use super::shift_detection::{ShiftCatalog, ShiftMatch};
use super::time_math::{crosses_midnight, duration_minutes};

/// Converts a minute count at an hourly rate into pay, carried at 2 dp.
///
/// Multiplication before division keeps exactly-divisible amounts exact.
pub fn minutes_to_pay(minutes: i64, hourly_rate: Decimal) -> Decimal {
    let mut pay = (Decimal::from(minutes) * hourly_rate / Decimal::from(60)).round_dp(2);
    pay.rescale(2);
    pay
}

/// The salary calculation engine.
///
/// Construction takes an [`EngineConfig`]; the shift catalog is built with
/// the configured detection tolerance. Both are read-only afterwards.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::SalaryEngine;
/// use salary_engine::config::EngineConfig;
/// use salary_engine::models::ShiftKind;
///
/// let engine = SalaryEngine::new(EngineConfig::default());
/// let result = engine.compute("08:30", "17:30").unwrap();
///
/// assert_eq!(result.shift, ShiftKind::Day);
/// assert_eq!(result.paid_minutes, 445);
/// assert_eq!(result.total_salary.to_string(), "15575.00");
/// ```
#[derive(Debug, Clone)]
pub struct SalaryEngine {
    catalog: ShiftCatalog,
    config: EngineConfig,
}

impl SalaryEngine {
    /// Creates an engine from the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        let catalog = ShiftCatalog::standard(config.detect_tolerance_minutes);
        Self { catalog, config }
    }

    /// The shift catalog the engine detects against.
    pub fn catalog(&self) -> &ShiftCatalog {
        &self.catalog
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes the salary for a clock-in/clock-out pair.
    ///
    /// Accepts `"HH:MM"` strings or a roster code (`C341`/`C342`) standing
    /// in for the shift's nominal start. Fails with
    /// [`EngineError::InvalidTimeFormat`] on unparseable input and
    /// [`EngineError::UnknownShift`] when no shift resolves; no partial
    /// result is produced on failure.
    pub fn compute(&self, start_text: &str, end_text: &str) -> EngineResult<SalaryResult> {
        let start = self.parse_input(start_text)?;
        let end = self.parse_input(end_text)?;

        let shift = match self.catalog.detect(start, end) {
            ShiftMatch::Matched(kind) => kind,
            ShiftMatch::Unmatched => {
                return Err(EngineError::UnknownShift {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        };

        let total_minutes = duration_minutes(start, end);
        let (break_minutes, break_overlaps) =
            deduct_breaks(start, end, self.catalog.breaks_for(shift));
        let paid_minutes = total_minutes - break_minutes;

        let split = split_paid_minutes(start, end, shift, paid_minutes, &self.config);

        let regular_salary = minutes_to_pay(split.regular_minutes, self.config.rates.base);
        let overtime_salary = minutes_to_pay(split.overtime_minutes, self.config.rates.base);
        let night_overtime_salary =
            minutes_to_pay(split.night_overtime_minutes, self.config.rates.night_overtime);
        let total_salary = regular_salary + overtime_salary + night_overtime_salary;

        Ok(SalaryResult {
            shift,
            start,
            end,
            crosses_midnight: crosses_midnight(start, end),
            total_minutes,
            break_minutes,
            break_overlaps,
            paid_minutes,
            regular_minutes: split.regular_minutes,
            overtime_minutes: split.overtime_minutes,
            night_overtime_minutes: split.night_overtime_minutes,
            regular_salary,
            overtime_salary,
            night_overtime_salary,
            total_salary,
        })
    }

    /// Resolves a single time input: roster codes first, then `"HH:MM"`.
    fn parse_input(&self, text: &str) -> EngineResult<TimeOfDay> {
        if let Some(nominal) = self.catalog.nominal_start_for_code(text) {
            return Ok(nominal);
        }
        TimeOfDay::parse(text)
    }
}

impl Default for SalaryEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
