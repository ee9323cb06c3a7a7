//! Session recorder: turns the final timer snapshot into a summary record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::RecorderError;
use super::{SignalType, TimerConfig, TimerState};

/// How a session came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionEnd {
    /// Elapsed time reached the configured total
    Completed,
    /// Stopped early by the speaker or timekeeper
    Stopped,
}

/// Immutable summary of a finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub final_time: u32,
    pub total_time: u32,
    pub highest_signal: Option<SignalType>,
    /// Reached or passed the total time
    pub exceeded_total_time: bool,
    pub manual_mode: bool,
    pub ended_by: SessionEnd,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct SessionRecorder {
    record: Option<SessionRecord>,
}

impl SessionRecorder {
    pub fn new() -> Self {
        Self { record: None }
    }

    /// Capture the final snapshot. Only one record per session.
    ///
    /// `peak_signal` is the most severe signal shown during the session; it
    /// counts even if a later manual override replaced it with a lower one.
    pub fn on_session_end(
        &mut self,
        snapshot: &TimerState,
        config: &TimerConfig,
        peak_signal: Option<SignalType>,
        ended_by: SessionEnd,
    ) -> Result<&SessionRecord, RecorderError> {
        if self.record.is_some() {
            warn!("Session end reported twice without a reset");
            return Err(RecorderError::AlreadyRecorded);
        }

        let reached = config.signal_at(snapshot.current_time);
        let record = SessionRecord {
            final_time: snapshot.current_time,
            total_time: config.total_time,
            highest_signal: reached.max(snapshot.current_signal).max(peak_signal),
            exceeded_total_time: snapshot.current_time >= config.total_time,
            manual_mode: snapshot.manual_mode,
            ended_by,
            completed_at: Utc::now(),
        };
        info!(
            "Session recorded: {}s of {}s, highest signal {:?}, ended by {:?}",
            record.final_time, record.total_time, record.highest_signal, record.ended_by
        );

        Ok(&*self.record.insert(record))
    }

    /// Last captured record, `None` until a session ends
    pub fn record(&self) -> Option<&SessionRecord> {
        self.record.as_ref()
    }

    pub fn has_record(&self) -> bool {
        self.record.is_some()
    }

    /// Forget the record so the next session can be captured
    pub fn reset(&mut self) {
        self.record = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(current_time: u32, current_signal: Option<SignalType>, manual_mode: bool) -> TimerState {
        TimerState {
            current_time,
            is_running: false,
            current_signal,
            show_signal: current_signal.is_some(),
            manual_mode,
        }
    }

    #[test]
    fn test_no_record_before_session_end() {
        let recorder = SessionRecorder::new();
        assert!(recorder.record().is_none());
        assert!(!recorder.has_record());
    }

    #[test]
    fn test_completed_session() {
        let mut recorder = SessionRecorder::new();
        let config = TimerConfig::default();
        let record = recorder
            .on_session_end(&snapshot(150, Some(SignalType::Red), false), &config, None, SessionEnd::Completed)
            .unwrap()
            .clone();

        assert_eq!(record.final_time, 150);
        assert_eq!(record.highest_signal, Some(SignalType::Red));
        assert!(record.exceeded_total_time);
        assert_eq!(record.ended_by, SessionEnd::Completed);
        assert_eq!(recorder.record(), Some(&record));
    }

    #[test]
    fn test_stopped_early_before_any_signal() {
        let mut recorder = SessionRecorder::new();
        let record = recorder
            .on_session_end(&snapshot(45, None, false), &TimerConfig::default(), None, SessionEnd::Stopped)
            .unwrap();

        assert_eq!(record.highest_signal, None);
        assert!(!record.exceeded_total_time);
    }

    #[test]
    fn test_highest_signal_counts_manual_override() {
        let mut recorder = SessionRecorder::new();
        let record = recorder
            .on_session_end(&snapshot(70, Some(SignalType::Red), true), &TimerConfig::default(), None, SessionEnd::Stopped)
            .unwrap();
        assert_eq!(record.highest_signal, Some(SignalType::Red));
        assert!(record.manual_mode);

        recorder.reset();
        let record = recorder
            .on_session_end(&snapshot(100, None, true), &TimerConfig::default(), None, SessionEnd::Stopped)
            .unwrap();
        assert_eq!(record.highest_signal, Some(SignalType::Yellow));
    }

    #[test]
    fn test_highest_signal_keeps_earlier_peak() {
        let mut recorder = SessionRecorder::new();
        let record = recorder
            .on_session_end(
                &snapshot(30, Some(SignalType::Green), true),
                &TimerConfig::default(),
                Some(SignalType::Red),
                SessionEnd::Stopped,
            )
            .unwrap();
        assert_eq!(record.highest_signal, Some(SignalType::Red));
    }

    #[test]
    fn test_second_session_end_is_rejected() {
        let mut recorder = SessionRecorder::new();
        let config = TimerConfig::default();
        let state = snapshot(10, None, false);

        recorder.on_session_end(&state, &config, None, SessionEnd::Stopped).unwrap();
        assert_eq!(
            recorder.on_session_end(&state, &config, None, SessionEnd::Stopped).unwrap_err(),
            RecorderError::AlreadyRecorded
        );

        recorder.reset();
        assert!(recorder.on_session_end(&state, &config, None, SessionEnd::Stopped).is_ok());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let mut recorder = SessionRecorder::new();
        let record = recorder
            .on_session_end(&snapshot(150, Some(SignalType::Red), false), &TimerConfig::default(), None, SessionEnd::Completed)
            .unwrap();
        let json = serde_json::to_value(record).unwrap();

        assert_eq!(json["finalTime"], 150);
        assert_eq!(json["highestSignal"], "red");
        assert_eq!(json["endedBy"], "completed");
        assert_eq!(json["exceededTotalTime"], true);
    }
}
