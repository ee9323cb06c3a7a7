//! Timer/signal engine module
//!
//! This module contains the signal card definitions, the validated timer
//! configuration, the engine state machine and the session recorder.

pub mod signal;
pub mod timer_config;
pub mod timer_state;
pub mod engine;
pub mod recorder;

// Re-export main types
pub use signal::{SignalCard, SignalType};
pub use timer_config::TimerConfig;
pub use timer_state::TimerState;
pub use engine::{SignalMode, TickOutcome, TimerEngine};
pub use recorder::{SessionEnd, SessionRecord, SessionRecorder};
