//! Signal types and the cards shown when a threshold is crossed

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// Signal colors, ordered by severity (green < yellow < red)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Green,
    Yellow,
    Red,
}

impl SignalType {
    /// All signal types in ascending severity
    pub const ALL: [SignalType; 3] = [SignalType::Green, SignalType::Yellow, SignalType::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Green => "green",
            SignalType::Yellow => "yellow",
            SignalType::Red => "red",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(SignalType::Green),
            "yellow" => Ok(SignalType::Yellow),
            "red" => Ok(SignalType::Red),
            other => Err(format!("unknown signal type: {}", other)),
        }
    }
}

/// Display directive triggered once elapsed time reaches `time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalCard {
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub title: String,
    pub message: String,
    /// Threshold in seconds
    pub time: u32,
    pub background_color: String,
    pub text_color: String,
}

impl SignalCard {
    /// Stock contest card for a signal at its default threshold
    pub fn default_for(signal_type: SignalType) -> Self {
        let (title, message, time, background_color, text_color) = match signal_type {
            SignalType::Green => ("KEEP GOING", "You are doing great!", 60, "#22c55e", "#ffffff"),
            SignalType::Yellow => ("MAKE A CONCLUSION", "Time to wrap up", 90, "#eab308", "#000000"),
            SignalType::Red => ("STOP", "Time is up!", 120, "#ef4444", "#ffffff"),
        };

        Self {
            signal_type,
            title: title.to_string(),
            message: message.to_string(),
            time,
            background_color: background_color.to_string(),
            text_color: text_color.to_string(),
        }
    }

    /// Same card, shown at a different threshold
    pub fn at(mut self, time: u32) -> Self {
        self.time = time;
        self
    }
}
