//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    state::{AppState, Preset, TimerSnapshot},
    timer::StopOutcome,
};
use super::responses::{
    ApiResponse, ConfigureRequest, CustomRequest, HealthResponse, StatusResponse,
};

fn internal_error(context: &str, e: String) -> StatusCode {
    error!("{}: {}", context, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

fn configured(state: &AppState, message: String, timer: TimerSnapshot) -> Json<ApiResponse> {
    info!("{}", message);
    Json(ApiResponse::applied(message, state.display.text(), timer))
}

/// Handle POST /timer/start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let started = state
        .start()
        .map_err(|e| internal_error("Failed to start timer", e))?;
    let timer = state
        .get_timer_state()
        .map_err(|e| internal_error("Failed to read timer state", e))?;

    let response = if started {
        ApiResponse::applied("Timer started".to_string(), state.display.text(), timer)
    } else {
        ApiResponse::ignored(
            format!("Timer not started while {}", timer.phase),
            state.display.text(),
            timer,
        )
    };
    Ok(Json(response))
}

/// Handle POST /timer/stop - Stop the countdown or acknowledge the alarm
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let outcome = state
        .stop()
        .map_err(|e| internal_error("Failed to stop timer", e))?;
    let timer = state
        .get_timer_state()
        .map_err(|e| internal_error("Failed to read timer state", e))?;
    let display = state.display.text();

    let response = match outcome {
        StopOutcome::Ignored => ApiResponse::ignored("Timer already idle".to_string(), display, timer),
        StopOutcome::Stopped => ApiResponse::applied("Timer stopped".to_string(), display, timer),
        StopOutcome::Alarming => ApiResponse::applied("Timer expired, alarm sounding".to_string(), display, timer),
        StopOutcome::Silenced => ApiResponse::applied("Alarm acknowledged".to_string(), display, timer),
    };
    Ok(Json(response))
}

/// Handle POST /timer/configure - Set hours, minutes and seconds
pub async fn configure_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConfigureRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let timer = state
        .configure(request.hours, request.minutes, request.seconds)
        .map_err(|e| internal_error("Failed to configure timer", e))?;

    Ok(configured(
        &state,
        format!("Timer set to {} seconds", timer.duration_seconds),
        timer,
    ))
}

/// Handle POST /timer/custom - Set a custom length in minutes
pub async fn custom_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CustomRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    if request.minutes < 0 {
        warn!("Custom duration of {} minutes is negative", request.minutes);
    }

    let timer = state
        .configure_custom(request.minutes)
        .map_err(|e| internal_error("Failed to configure custom timer", e))?;

    Ok(configured(
        &state,
        format!("Timer set to {} minutes", request.minutes),
        timer,
    ))
}

/// Handle POST /timer/preset/:name - Pomodoro, short break or long break
pub async fn preset_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let Some(preset) = Preset::from_name(&name) else {
        warn!("Unknown preset requested: {}", name);
        return Err(StatusCode::NOT_FOUND);
    };

    let timer = state
        .apply_preset(preset)
        .map_err(|e| internal_error("Failed to apply preset", e))?;

    Ok(configured(
        &state,
        format!("Timer set for {} ({} minutes)", preset.name(), preset.minutes()),
        timer,
    ))
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = state
        .get_timer_state()
        .map_err(|e| internal_error("Failed to get timer state", e))?;

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        display: state.display.text(),
        display_fields: state.display.fields(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
