//! Configuration loading for the salary engine.
//!
//! Rates, thresholds and the shift detection tolerance are configurable
//! through a YAML file; see `config/engine.yaml` for the shipped values.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, RateTable, DEFAULT_BASE_RATE, DEFAULT_DETECT_TOLERANCE_MINUTES,
    DEFAULT_NIGHT_OVERTIME_RATE, DEFAULT_NIGHT_START_HOUR, DEFAULT_REGULAR_LIMIT_MINUTES,
};
