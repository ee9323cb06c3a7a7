//! Timer configuration: signal thresholds, hard stop and card definitions

use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use super::{SignalCard, SignalType};

/// Immutable configuration for one timer session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    pub green_time: u32,
    pub yellow_time: u32,
    pub red_time: u32,
    /// Hard stop; the session completes once elapsed time reaches it
    pub total_time: u32,
    pub cards: Vec<SignalCard>,
}

impl TimerConfig {
    /// Build a validated config with the stock cards retimed to the given thresholds
    pub fn from_thresholds(green: u32, yellow: u32, red: u32, total: u32) -> Result<Self, ConfigError> {
        let config = Self {
            green_time: green,
            yellow_time: yellow,
            red_time: red,
            total_time: total,
            cards: vec![
                SignalCard::default_for(SignalType::Green).at(green),
                SignalCard::default_for(SignalType::Yellow).at(yellow),
                SignalCard::default_for(SignalType::Red).at(red),
            ],
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config and check its invariants
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::from_slice(json.as_bytes())
    }

    /// Parse raw JSON bytes; invalid UTF-8 is rejected, never replaced
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        let mut config: TimerConfig = serde_json::from_slice(bytes)?;
        config.validate()?;
        config.cards.sort_by_key(|card| card.signal_type);
        Ok(config)
    }

    /// Load a JSON config from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading timer configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Check threshold ordering and that the card set matches the thresholds
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pairs = [
            (SignalType::Green, SignalType::Yellow),
            (SignalType::Yellow, SignalType::Red),
        ];
        for (lower, upper) in pairs {
            let (lower_time, upper_time) = (self.threshold(lower), self.threshold(upper));
            if lower_time >= upper_time {
                return Err(ConfigError::NotIncreasing { lower, lower_time, upper, upper_time });
            }
        }

        if self.total_time < self.red_time {
            return Err(ConfigError::TotalBeforeRed { total: self.total_time, red: self.red_time });
        }

        for signal in SignalType::ALL {
            let mut matching = self.cards.iter().filter(|card| card.signal_type == signal);
            let card = matching.next().ok_or(ConfigError::MissingCard(signal))?;
            if matching.next().is_some() {
                return Err(ConfigError::DuplicateCard(signal));
            }

            let threshold = self.threshold(signal);
            if card.time != threshold {
                return Err(ConfigError::CardTimeMismatch { signal, card_time: card.time, threshold });
            }
        }

        Ok(())
    }

    pub fn threshold(&self, signal: SignalType) -> u32 {
        match signal {
            SignalType::Green => self.green_time,
            SignalType::Yellow => self.yellow_time,
            SignalType::Red => self.red_time,
        }
    }

    pub fn card(&self, signal: SignalType) -> Option<&SignalCard> {
        self.cards.iter().find(|card| card.signal_type == signal)
    }

    /// Highest-severity signal whose card threshold has been reached at `seconds`
    pub fn signal_at(&self, seconds: u32) -> Option<SignalType> {
        SignalType::ALL
            .iter()
            .rev()
            .filter_map(|signal| self.card(*signal))
            .find(|card| card.time <= seconds)
            .map(|card| card.signal_type)
    }
}

impl Default for TimerConfig {
    /// Standard contest frame: green at 1:00, yellow at 1:30, red at 2:00, stop at 2:30
    fn default() -> Self {
        Self {
            green_time: 60,
            yellow_time: 90,
            red_time: 120,
            total_time: 150,
            cards: SignalType::ALL.iter().map(|signal| SignalCard::default_for(*signal)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TimerConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.card(SignalType::Red).map(|c| c.time), Some(120));
        assert_eq!(config.total_time, 150);
    }

    #[test]
    fn test_from_thresholds_retimes_cards() {
        let config = TimerConfig::from_thresholds(300, 360, 420, 450).unwrap();
        assert_eq!(config.card(SignalType::Green).map(|c| c.time), Some(300));
        assert_eq!(config.card(SignalType::Yellow).map(|c| c.time), Some(360));
        assert_eq!(config.card(SignalType::Red).map(|c| c.title.as_str()), Some("STOP"));
    }

    #[test]
    fn test_thresholds_must_strictly_increase() {
        assert_eq!(
            TimerConfig::from_thresholds(60, 60, 120, 150),
            Err(ConfigError::NotIncreasing {
                lower: SignalType::Green,
                lower_time: 60,
                upper: SignalType::Yellow,
                upper_time: 60,
            })
        );
        assert!(matches!(
            TimerConfig::from_thresholds(60, 130, 120, 150),
            Err(ConfigError::NotIncreasing { lower: SignalType::Yellow, .. })
        ));
    }

    #[test]
    fn test_total_may_equal_red_but_not_precede_it() {
        assert!(TimerConfig::from_thresholds(1, 2, 3, 3).is_ok());
        assert_eq!(
            TimerConfig::from_thresholds(1, 2, 3, 2),
            Err(ConfigError::TotalBeforeRed { total: 2, red: 3 })
        );
    }

    #[test]
    fn test_card_set_must_match_thresholds() {
        let mut config = TimerConfig::default();
        config.cards.retain(|card| card.signal_type != SignalType::Yellow);
        assert_eq!(config.validate(), Err(ConfigError::MissingCard(SignalType::Yellow)));

        let mut config = TimerConfig::default();
        config.cards.push(SignalCard::default_for(SignalType::Red));
        assert_eq!(config.validate(), Err(ConfigError::DuplicateCard(SignalType::Red)));

        let mut config = TimerConfig::default();
        config.cards[0].time = 45;
        assert_eq!(
            config.validate(),
            Err(ConfigError::CardTimeMismatch { signal: SignalType::Green, card_time: 45, threshold: 60 })
        );
    }

    #[test]
    fn test_signal_at_picks_most_severe_reached() {
        let config = TimerConfig::default();
        assert_eq!(config.signal_at(0), None);
        assert_eq!(config.signal_at(59), None);
        assert_eq!(config.signal_at(60), Some(SignalType::Green));
        assert_eq!(config.signal_at(89), Some(SignalType::Green));
        assert_eq!(config.signal_at(90), Some(SignalType::Yellow));
        assert_eq!(config.signal_at(500), Some(SignalType::Red));
    }

    #[test]
    fn test_from_json_normalizes_card_order() {
        let mut config = TimerConfig::default();
        config.cards.reverse();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"greenTime\":60"));

        let loaded = TimerConfig::from_json(&json).unwrap();
        let order: Vec<SignalType> = loaded.cards.iter().map(|c| c.signal_type).collect();
        assert_eq!(order, SignalType::ALL.to_vec());
    }

    #[test]
    fn test_from_json_rejects_negative_times() {
        let json = r#"{"greenTime":-1,"yellowTime":90,"redTime":120,"totalTime":150,"cards":[]}"#;
        assert!(matches!(TimerConfig::from_json(json), Err(ConfigError::Malformed(_))));
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let json = serde_json::to_string(&TimerConfig::default()).unwrap();
        let mut bytes = json.replacen("KEEP GOING", "KEEP ~ GOING", 1).into_bytes();
        let at = bytes.iter().position(|b| *b == b'~').unwrap();
        bytes[at] = 0xff;

        assert!(matches!(TimerConfig::from_slice(&bytes), Err(ConfigError::Malformed(_))));
        assert_eq!(TimerConfig::from_slice(json.as_bytes()), Ok(TimerConfig::default()));
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = TimerConfig::from_json_file("/nonexistent/speech-timer.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
