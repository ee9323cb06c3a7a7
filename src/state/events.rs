//! Notification payloads sent over the app state channels

use serde::{Deserialize, Serialize};

use crate::timer::{SessionRecord, SignalType};

/// Control transitions consumed by the ticker task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    Started,
    Paused,
    Reset,
    Ended,
}

/// Changes presentation and alerting collaborators can react to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TimerEvent {
    SignalChanged {
        signal: Option<SignalType>,
        at_seconds: u32,
        manual: bool,
    },
    SessionEnded {
        record: SessionRecord,
    },
}

impl TimerEvent {
    pub fn event_name(&self) -> &'static str {
        match self {
            TimerEvent::SignalChanged { .. } => "signal-changed",
            TimerEvent::SessionEnded { .. } => "session-ended",
        }
    }
}
