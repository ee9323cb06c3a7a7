//! Utility functions module
//!
//! This module contains utility functions used throughout the application.

pub mod clock;
pub mod shutdown;

// Re-export main functions
pub use clock::format_clock;
pub use shutdown::shutdown_signal;
