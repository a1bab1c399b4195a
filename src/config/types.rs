//! Configuration types for the salary engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. All rate and
//! threshold constants live here rather than inline in the calculation
//! code, so tests can run the engine against alternate rate tables.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Default base rate in currency units per hour.
pub const DEFAULT_BASE_RATE: Decimal = Decimal::from_parts(2100, 0, 0, false, 0);

/// Default night overtime rate in currency units per hour.
pub const DEFAULT_NIGHT_OVERTIME_RATE: Decimal = Decimal::from_parts(2625, 0, 0, false, 0);

/// Default regular daily limit: 7 hours 35 minutes.
pub const DEFAULT_REGULAR_LIMIT_MINUTES: i64 = 7 * 60 + 35;

/// Default hour after which day-shift overtime counts as night overtime.
pub const DEFAULT_NIGHT_START_HOUR: u8 = 22;

/// Default shift detection tolerance in minutes.
pub const DEFAULT_DETECT_TOLERANCE_MINUTES: i64 = 30;

/// Hourly pay rates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RateTable {
    /// The base hourly rate for regular time and ordinary overtime.
    pub base: Decimal,
    /// The elevated hourly rate for night overtime.
    pub night_overtime: Decimal,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_RATE,
            night_overtime: DEFAULT_NIGHT_OVERTIME_RATE,
        }
    }
}

/// The complete engine configuration.
///
/// # Example
///
/// ```
/// use salary_engine::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.regular_limit_minutes, 455);
/// assert_eq!(config.night_start_hour, 22);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hourly pay rates.
    pub rates: RateTable,
    /// Paid minutes up to this limit are billed as regular time.
    pub regular_limit_minutes: i64,
    /// Day-shift work at or after this hour counts toward night overtime.
    pub night_start_hour: u8,
    /// Maximum distance in minutes between a candidate endpoint and a
    /// shift's nominal endpoint for the shift to match.
    pub detect_tolerance_minutes: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rates: RateTable::default(),
            regular_limit_minutes: DEFAULT_REGULAR_LIMIT_MINUTES,
            night_start_hour: DEFAULT_NIGHT_START_HOUR,
            detect_tolerance_minutes: DEFAULT_DETECT_TOLERANCE_MINUTES,
        }
    }
}
