//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    timer::{SessionRecord, SignalCard, SignalType, TimerState},
    utils::format_clock,
};

/// Response for timer control and state endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub state: TimerState,
    /// Card to render now, if any
    pub active_card: Option<SignalCard>,
    pub remaining_seconds: u32,
    /// Elapsed time as `mm:ss`
    pub elapsed: String,
}

impl TimerResponse {
    pub fn new(message: String, state: TimerState, active_card: Option<SignalCard>, remaining_seconds: u32) -> Self {
        let status = if state.is_running { "running" } else { "stopped" };
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            elapsed: format_clock(state.current_time),
            state,
            active_card,
            remaining_seconds,
        }
    }
}

/// Response carrying a finished session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub record: SessionRecord,
    /// Final time as `mm:ss`
    pub duration: String,
}

impl SessionResponse {
    pub fn new(record: SessionRecord) -> Self {
        Self {
            status: "ended".to_string(),
            timestamp: Utc::now(),
            duration: format_clock(record.final_time),
            record,
        }
    }
}

/// Error body returned with a non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Body of `POST /timer/signal`; `null` clears the signal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualSignalRequest {
    pub signal: Option<SignalType>,
}

/// Server status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub state: TimerState,
    pub has_record: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
