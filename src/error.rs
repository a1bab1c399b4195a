//! Error types for the salary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during salary calculation and
//! the surrounding storage and configuration layers.

use thiserror::Error;

/// The main error type for the salary engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::InvalidTimeFormat {
///     input: "25:00".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time format '25:00': expected HH:MM");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A time string could not be parsed as a 24-hour "HH:MM" value.
    #[error("Invalid time format '{input}': expected HH:MM")]
    InvalidTimeFormat {
        /// The input that failed to parse.
        input: String,
    },

    /// The start/end pair matched no known shift within tolerance and fell
    /// outside both heuristic windows.
    #[error("No shift matches the interval {start} to {end}")]
    UnknownShift {
        /// The candidate start time.
        start: String,
        /// The candidate end time.
        end: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A storage file could not be read or written.
    #[error("Storage error at '{path}': {message}")]
    Storage {
        /// The path of the store file involved.
        path: String,
        /// A description of what went wrong.
        message: String,
    },

    /// A salary payment day outside the 1–31 range was supplied.
    #[error("Invalid payment day {day}: must be between 1 and 31")]
    InvalidPaymentDay {
        /// The rejected day of month.
        day: u32,
    },

    /// No calculation data exists for the requested user and period.
    #[error("No data recorded for the requested period")]
    NoData,
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
