//! Request types for the salary engine API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::analytics::ChartMetric;
use crate::goals::{GoalKind, GoalPeriod};

/// Body of `POST /calculate`.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateRequest {
    /// The user recording the calculation.
    pub user_id: String,
    /// Clock-in time, `"HH:MM"` or a roster code.
    pub start_time: String,
    /// Clock-out time, `"HH:MM"` or a roster code.
    pub end_time: String,
}

/// Body of `POST /users/{id}/goals`.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalRequest {
    /// The goal's span.
    pub period: GoalPeriod,
    /// What the goal measures.
    pub kind: GoalKind,
    /// The target value.
    pub target: Decimal,
}

/// Body of `POST /users/{id}/events`.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRequest {
    /// The event date.
    pub date: NaiveDate,
    /// Free-form event category.
    pub event_type: String,
    /// Event description.
    pub description: String,
    /// Optional reminder time as `"HH:MM"`. Stored only.
    #[serde(default)]
    pub reminder_time: Option<String>,
}

/// Body of `PUT /users/{id}/reminder`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReminderRequest {
    /// The daily reminder time as `"HH:MM"`.
    pub time: String,
    /// Optional custom message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `PUT /calendar/payday`.
#[derive(Debug, Clone, Deserialize)]
pub struct PaydayRequest {
    /// The payment day of month (1–31).
    pub day: u32,
}

/// Query string carrying an optional window length.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DaysQuery {
    /// Window length in days; each endpoint has its own default.
    #[serde(default)]
    pub days: Option<u32>,
}

/// Query string of `GET /users/{id}/chart`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartQuery {
    /// Window length in days, default 14.
    #[serde(default)]
    pub days: Option<u32>,
    /// Which value to plot, default hours.
    #[serde(default)]
    pub metric: Option<ChartMetric>,
}
