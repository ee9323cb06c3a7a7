//! State management module
//!
//! This module contains the shared application state wrapping the timer
//! session and the notification channels around it.

pub mod app_state;
pub mod events;
pub mod session;

// Re-export main types
pub use app_state::AppState;
pub use events::{ControlEvent, TimerEvent};
pub use session::TimerSession;
