//! HTTP request handlers for the salary engine API.
//!
//! This module contains the handler functions for all API endpoints.
//! Handlers stay thin: they resolve dates, call into the engine or a
//! store and translate [`EngineError`](crate::error::EngineError) values
//! into HTTP responses.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::{daily_totals, recent_history, render_bar_chart, summary_stats, ChartMetric};
use crate::error::EngineResult;
use crate::export::{export_csv, export_json, monthly_report};
use crate::models::{CalculationRecord, TimeOfDay};

use super::request::{
    CalculateRequest, ChartQuery, DaysQuery, EventRequest, GoalRequest, PaydayRequest,
    ReminderRequest,
};
use super::response::{ApiError, ApiErrorResponse, CalculateResponse};
use super::state::AppState;

const DEFAULT_HISTORY_DAYS: u32 = 7;
const DEFAULT_SUMMARY_DAYS: u32 = 30;
const DEFAULT_CHART_DAYS: u32 = 14;
const DEFAULT_EXPORT_DAYS: u32 = 30;
const DEFAULT_EVENT_DAYS: u32 = 30;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route(
            "/users/:user_id/history",
            get(history_handler).delete(prune_history_handler),
        )
        .route("/users/:user_id/summary", get(summary_handler))
        .route("/users/:user_id/chart", get(chart_handler))
        .route("/users/:user_id/export/csv", get(export_csv_handler))
        .route("/users/:user_id/export/json", get(export_json_handler))
        .route("/users/:user_id/report/:year/:month", get(report_handler))
        .route("/users/:user_id", delete(delete_user_handler))
        .route("/users/:user_id/dates/:date", delete(delete_date_handler))
        .route("/users/:user_id/goals", post(set_goal_handler))
        .route("/users/:user_id/goals/progress", get(goal_progress_handler))
        .route("/calendar/payday", get(payday_handler).put(set_payday_handler))
        .route(
            "/users/:user_id/events",
            post(add_event_handler).get(events_handler),
        )
        .route(
            "/users/:user_id/reminder",
            put(set_reminder_handler)
                .get(reminder_handler)
                .delete(disable_reminder_handler),
        )
        .with_state(state)
}

/// Turns an engine result into a JSON response or an error response.
fn respond<T: Serialize>(result: EngineResult<T>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for POST /calculate.
///
/// Computes the salary for the submitted interval and appends the record
/// under today's date for the requesting user.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    let result = match state.engine().compute(&request.start_time, &request.end_time) {
        Ok(result) => result,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                user_id = %request.user_id,
                error = %err,
                "Calculation failed"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let timestamp = Utc::now();
    let date = timestamp.date_naive();
    let record = CalculationRecord::from_result(&result, timestamp);
    if let Err(err) = state.calculations().append(&request.user_id, date, record) {
        warn!(
            correlation_id = %correlation_id,
            user_id = %request.user_id,
            error = %err,
            "Failed to persist calculation"
        );
        return ApiErrorResponse::from(err).into_response();
    }

    info!(
        correlation_id = %correlation_id,
        user_id = %request.user_id,
        shift = %result.shift.code(),
        paid_minutes = result.paid_minutes,
        total_salary = %result.total_salary,
        "Calculation completed"
    );

    (
        StatusCode::OK,
        Json(CalculateResponse {
            timestamp,
            date,
            result,
        }),
    )
        .into_response()
}

/// Handler for GET /users/{id}/history.
async fn history_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<DaysQuery>,
) -> Response {
    let days = query.days.unwrap_or(DEFAULT_HISTORY_DAYS);
    let today = Utc::now().date_naive();

    respond(
        state
            .calculations()
            .date_range(&user_id, days, today)
            .map(|history| recent_history(&history)),
    )
}

/// Handler for DELETE /users/{id}/history.
///
/// Age-based purge: drops date buckets older than the kept window
/// (`?days=N`, default 30, counting back from today inclusive).
async fn prune_history_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<DaysQuery>,
) -> Response {
    let keep_days = query.days.unwrap_or(DEFAULT_SUMMARY_DAYS).max(1);
    let today = Utc::now().date_naive();
    let cutoff = today
        .checked_sub_days(chrono::Days::new(u64::from(keep_days - 1)))
        .unwrap_or(NaiveDate::MIN);

    respond(
        state
            .calculations()
            .delete_older_than(&user_id, cutoff)
            .map(|removed| serde_json::json!({ "deleted_dates": removed })),
    )
}

/// Handler for GET /users/{id}/summary.
async fn summary_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<DaysQuery>,
) -> Response {
    let days = query.days.unwrap_or(DEFAULT_SUMMARY_DAYS);
    let today = Utc::now().date_naive();

    respond(
        state
            .calculations()
            .date_range(&user_id, days, today)
            .and_then(|history| summary_stats(&history, days)),
    )
}

/// Handler for GET /users/{id}/chart.
async fn chart_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Response {
    let days = query.days.unwrap_or(DEFAULT_CHART_DAYS);
    let metric = query.metric.unwrap_or(ChartMetric::Hours);
    let today = Utc::now().date_naive();

    respond(
        state
            .calculations()
            .date_range(&user_id, days, today)
            .map(|history| {
                let data = daily_totals(&history, days, today);
                let chart = render_bar_chart(&data, metric);
                serde_json::json!({
                    "metric": metric,
                    "data": data,
                    "chart": chart,
                })
            }),
    )
}

/// Handler for GET /users/{id}/export/csv.
async fn export_csv_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<DaysQuery>,
) -> Response {
    let days = query.days.unwrap_or(DEFAULT_EXPORT_DAYS);
    let today = Utc::now().date_naive();

    match state
        .calculations()
        .date_range(&user_id, days, today)
        .and_then(|history| export_csv(&history))
    {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv")],
            csv,
        )
            .into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for GET /users/{id}/export/json.
async fn export_json_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<DaysQuery>,
) -> Response {
    let days = query.days.unwrap_or(DEFAULT_EXPORT_DAYS);
    let now = Utc::now();

    match state
        .calculations()
        .date_range(&user_id, days, now.date_naive())
        .and_then(|history| export_json(&user_id, days, &history, now))
    {
        Ok(json) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            json,
        )
            .into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for GET /users/{id}/report/{year}/{month}.
async fn report_handler(
    State(state): State<AppState>,
    Path((user_id, year, month)): Path<(String, i32, u32)>,
) -> Response {
    respond(
        state
            .calculations()
            .load_user(&user_id)
            .and_then(|history| monthly_report(&history, year, month)),
    )
}

/// Handler for DELETE /users/{id}.
async fn delete_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Response {
    let deleted = state.calculations().delete_user(&user_id);
    if let Ok(true) = &deleted {
        info!(user_id = %user_id, "Deleted user history");
    }
    respond(deleted.map(|deleted| serde_json::json!({ "deleted": deleted })))
}

/// Handler for DELETE /users/{id}/dates/{date}.
async fn delete_date_handler(
    State(state): State<AppState>,
    Path((user_id, date)): Path<(String, NaiveDate)>,
) -> Response {
    respond(
        state
            .calculations()
            .delete_date(&user_id, date)
            .map(|deleted| serde_json::json!({ "deleted": deleted })),
    )
}

/// Handler for POST /users/{id}/goals.
async fn set_goal_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<GoalRequest>,
) -> Response {
    let now = Utc::now();
    respond(
        state
            .goals()
            .set_goal(
                &user_id,
                request.period,
                request.kind,
                request.target,
                now,
                now.date_naive(),
            )
            .map(|()| {
                serde_json::json!({
                    "period": request.period,
                    "kind": request.kind,
                    "target": request.target,
                })
            }),
    )
}

/// Handler for GET /users/{id}/goals/progress.
async fn goal_progress_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Response {
    let today = Utc::now().date_naive();
    respond(
        state
            .calculations()
            .load_user(&user_id)
            .and_then(|history| state.goals().progress(&user_id, &history, today)),
    )
}

/// Handler for GET /calendar/payday.
async fn payday_handler(State(state): State<AppState>) -> Response {
    respond(state.calendar().next_payday(Utc::now().date_naive()))
}

/// Handler for PUT /calendar/payday.
async fn set_payday_handler(
    State(state): State<AppState>,
    Json(request): Json<PaydayRequest>,
) -> Response {
    respond(
        state
            .calendar()
            .set_payment_day(request.day)
            .and_then(|()| state.calendar().next_payday(Utc::now().date_naive())),
    )
}

/// Handler for POST /users/{id}/events.
async fn add_event_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<EventRequest>,
) -> Response {
    let reminder_time = match request.reminder_time.as_deref().map(TimeOfDay::parse) {
        Some(Ok(time)) => Some(time),
        Some(Err(err)) => return ApiErrorResponse::from(err).into_response(),
        None => None,
    };

    respond(state.calendar().add_event(
        &user_id,
        request.date,
        &request.event_type,
        &request.description,
        reminder_time,
        Utc::now(),
    ))
}

/// Handler for GET /users/{id}/events.
async fn events_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<DaysQuery>,
) -> Response {
    let days = query.days.unwrap_or(DEFAULT_EVENT_DAYS);
    respond(
        state
            .calendar()
            .events_for(&user_id, days, Utc::now().date_naive()),
    )
}

/// Handler for PUT /users/{id}/reminder.
async fn set_reminder_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<ReminderRequest>,
) -> Response {
    let time = match TimeOfDay::parse(&request.time) {
        Ok(time) => time,
        Err(err) => return ApiErrorResponse::from(err).into_response(),
    };

    respond(
        state
            .reminders()
            .set_reminder(&user_id, time, request.message.as_deref(), Utc::now()),
    )
}

/// Handler for GET /users/{id}/reminder.
async fn reminder_handler(State(state): State<AppState>, Path(user_id): Path<String>) -> Response {
    match state.reminders().reminder_for(&user_id) {
        Ok(Some(reminder)) => (StatusCode::OK, Json(reminder)).into_response(),
        Ok(None) => ApiErrorResponse::from(crate::error::EngineError::NoData).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for DELETE /users/{id}/reminder.
async fn disable_reminder_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Response {
    respond(
        state
            .reminders()
            .disable(&user_id)
            .map(|disabled| serde_json::json!({ "disabled": disabled })),
    )
}
