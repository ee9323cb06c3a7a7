//! Speech Timer - a practice timer for timed speeches
//!
//! This library provides the timer/signal engine that tracks elapsed speech time
//! against green, yellow and red thresholds, the session recorder that captures
//! the final result, and an HTTP surface for presentation clients.

pub mod config;
pub mod error;
pub mod timer;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ConfigError, RecorderError};
pub use timer::{SessionRecord, SessionRecorder, SignalCard, SignalType, TimerConfig, TimerEngine, TimerState};
pub use state::AppState;
pub use api::create_router;
pub use utils::shutdown_signal;
