//! Error types for the timer engine, the session recorder and the app state

use thiserror::Error;

use crate::timer::SignalType;

/// Raised when a timer configuration breaks its threshold invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{lower} threshold ({lower_time}s) must be earlier than {upper} threshold ({upper_time}s)")]
    NotIncreasing {
        lower: SignalType,
        lower_time: u32,
        upper: SignalType,
        upper_time: u32,
    },

    #[error("total time ({total}s) must not be shorter than the red threshold ({red}s)")]
    TotalBeforeRed { total: u32, red: u32 },

    #[error("no card configured for the {0} signal")]
    MissingCard(SignalType),

    #[error("more than one card configured for the {0} signal")]
    DuplicateCard(SignalType),

    #[error("{signal} card shows at {card_time}s but the {signal} threshold is {threshold}s")]
    CardTimeMismatch {
        signal: SignalType,
        card_time: u32,
        threshold: u32,
    },

    #[error("malformed timer configuration: {0}")]
    Malformed(String),

    #[error("failed to read timer configuration: {0}")]
    Io(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Malformed(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

/// Misuse of the session recorder protocol
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecorderError {
    #[error("session already recorded; reset the timer before recording again")]
    AlreadyRecorded,
}

/// Errors surfaced by the shared application state
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Recorder(#[from] RecorderError),

    #[error("Failed to lock timer session: {0}")]
    Lock(String),
}
