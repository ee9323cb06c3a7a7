//! Timer state snapshot exposed to presentation clients

use serde::{Deserialize, Serialize};

use super::SignalType;

/// Runtime snapshot of one timer session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Seconds elapsed in this session
    pub current_time: u32,
    pub is_running: bool,
    /// Signal active now; `None` before the first threshold
    pub current_signal: Option<SignalType>,
    /// Whether the active card should be rendered (a dismiss hides it)
    pub show_signal: bool,
    /// Set once a human overrode the automatic signal selection
    pub manual_mode: bool,
}

impl TimerState {
    /// Create a fresh, stopped timer state
    pub fn new() -> Self {
        Self {
            current_time: 0,
            is_running: false,
            current_signal: None,
            show_signal: false,
            manual_mode: false,
        }
    }

    /// Signal to render right now, if any
    pub fn visible_signal(&self) -> Option<SignalType> {
        if self.show_signal {
            self.current_signal
        } else {
            None
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
