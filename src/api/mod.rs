//! HTTP API module for the salary engine.
//!
//! This module provides the REST endpoints for computing salaries,
//! browsing history and analytics, exporting data and managing goals,
//! calendar entries and reminder settings.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculateRequest, ChartQuery, DaysQuery, EventRequest, GoalRequest, PaydayRequest,
    ReminderRequest,
};
pub use response::{ApiError, CalculateResponse};
pub use state::AppState;
