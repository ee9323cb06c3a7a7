//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json, Redirect, Response,
    },
};
use futures::stream::{self, Stream};
use tracing::{error, info, warn};

use crate::{
    error::AppError,
    state::AppState,
    timer::{TimerConfig, TimerState},
};
use super::responses::{
    ErrorResponse, HealthResponse, ManualSignalRequest, SessionResponse, StatusResponse, TimerResponse,
};

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(action: &str, err: AppError) -> ApiError {
    let status = match &err {
        AppError::Config(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::Recorder(_) => StatusCode::CONFLICT,
        AppError::Lock(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!("Failed to {}: {}", action, err);
    } else {
        warn!("Rejected {}: {}", action, err);
    }
    (status, Json(ErrorResponse::new(err.to_string())))
}

fn timer_response(state: &AppState, message: &str) -> Result<Json<TimerResponse>, ApiError> {
    let (snapshot, card, remaining) = state.display().map_err(|e| api_error("read timer state", e))?;
    Ok(Json(TimerResponse::new(message.to_string(), snapshot, card, remaining)))
}

/// Handle POST /timer/start - Start or resume the timer
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, ApiError> {
    state.start().map_err(|e| api_error("start timer", e))?;
    info!("Start endpoint called");
    timer_response(&state, "Timer started")
}

/// Handle POST /timer/pause - Pause the timer
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, ApiError> {
    state.pause().map_err(|e| api_error("pause timer", e))?;
    info!("Pause endpoint called");
    timer_response(&state, "Timer paused")
}

/// Handle POST /timer/reset - Reset the timer, optionally with a JSON config body
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TimerResponse>, ApiError> {
    let config = if body.iter().all(|b| b.is_ascii_whitespace()) {
        None
    } else {
        let config = TimerConfig::from_slice(&body).map_err(|e| api_error("parse timer config", e.into()))?;
        Some(config)
    };

    state.reset(config).map_err(|e| api_error("reset timer", e))?;
    info!("Reset endpoint called");
    timer_response(&state, "Timer reset")
}

/// Handle POST /timer/signal - Force the displayed signal
pub async fn manual_signal_handler(
    State(state): State<Arc<AppState>>,
    request: Result<Json<ManualSignalRequest>, JsonRejection>,
) -> Result<Json<TimerResponse>, ApiError> {
    let Json(request) = request.map_err(|rejection| {
        warn!("Rejected manual signal request: {}", rejection.body_text());
        (rejection.status(), Json(ErrorResponse::new(rejection.body_text())))
    })?;
    state
        .set_manual_signal(request.signal)
        .map_err(|e| api_error("set manual signal", e))?;
    info!("Manual signal endpoint called with {:?}", request.signal);
    timer_response(&state, "Manual signal set")
}

/// Handle POST /timer/dismiss - Hide the visible card
pub async fn dismiss_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, ApiError> {
    state.dismiss_signal().map_err(|e| api_error("dismiss signal", e))?;
    timer_response(&state, "Signal dismissed")
}

/// Handle POST /timer/stop - End the session now and record it
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<SessionResponse>, ApiError> {
    let record = state.end_session().map_err(|e| api_error("end session", e))?;
    info!("Stop endpoint called - session ended at {}s", record.final_time);
    Ok(Json(SessionResponse::new(record)))
}

/// Handle GET /timer/state - Current snapshot and the card to render
pub async fn state_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, ApiError> {
    timer_response(&state, "Current timer state")
}

/// Handle GET /timer/config - Active timer configuration
pub async fn config_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerConfig>, ApiError> {
    state
        .config()
        .map(Json)
        .map_err(|e| api_error("read timer config", e))
}

/// Handle GET /timer/stream - Server-sent snapshot updates
pub async fn stream_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let snapshot_rx = state.snapshot_tx.subscribe();

    let updates = stream::unfold((snapshot_rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let snapshot: TimerState = rx.borrow_and_update().clone();
        let event = Event::default()
            .event("snapshot")
            .json_data(&snapshot)
            .unwrap_or_else(|e| {
                warn!("Failed to encode snapshot event: {}", e);
                Event::default().event("error")
            });
        Some((Ok(event), (rx, false)))
    });

    Sse::new(updates).keep_alive(KeepAlive::default())
}

/// Handle GET /session-summary - Last record, or back to the timer if none exists yet
pub async fn session_summary_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    match state.record().map_err(|e| api_error("read session record", e))? {
        Some(record) => Ok(Json(SessionResponse::new(record)).into_response()),
        None => Ok(Redirect::to("/timer/state").into_response()),
    }
}

/// Handle GET /status - Return server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, ApiError> {
    let snapshot = state.snapshot().map_err(|e| api_error("read timer state", e))?;
    let has_record = state
        .record()
        .map_err(|e| api_error("read session record", e))?
        .is_some();
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        state: snapshot,
        has_record,
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
