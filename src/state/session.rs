//! Timer engine and session recorder paired under one owner

use tracing::error;

use crate::{
    error::{ConfigError, RecorderError},
    timer::{SessionEnd, SessionRecord, SessionRecorder, SignalType, TickOutcome, TimerConfig, TimerEngine, TimerState},
};

/// One timer session: the engine plus the recorder observing its end
#[derive(Debug)]
pub struct TimerSession {
    engine: TimerEngine,
    recorder: SessionRecorder,
}

impl TimerSession {
    pub fn new(config: TimerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: TimerEngine::new(config)?,
            recorder: SessionRecorder::new(),
        })
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn recorder(&self) -> &SessionRecorder {
        &self.recorder
    }

    pub fn snapshot(&self) -> TimerState {
        self.engine.state().clone()
    }

    pub fn start(&mut self) -> bool {
        self.engine.start()
    }

    pub fn pause(&mut self) -> bool {
        self.engine.pause()
    }

    /// Reset the engine and drop the previous record
    pub fn reset(&mut self, config: Option<TimerConfig>) -> Result<(), ConfigError> {
        self.engine.reset(config)?;
        self.recorder.reset();
        Ok(())
    }

    /// Advance the engine; returns the record captured if this tick completed the session
    pub fn tick(&mut self) -> (TickOutcome, Option<SessionRecord>) {
        let outcome = self.engine.tick();
        if !outcome.completed {
            return (outcome, None);
        }

        match self.recorder.on_session_end(
            self.engine.state(),
            self.engine.config(),
            self.engine.peak_signal(),
            SessionEnd::Completed,
        ) {
            Ok(record) => (outcome, Some(record.clone())),
            Err(e) => {
                error!("Failed to record completed session: {}", e);
                (outcome, None)
            }
        }
    }

    pub fn set_manual_signal(&mut self, signal: Option<SignalType>) -> bool {
        self.engine.set_manual_signal(signal)
    }

    pub fn dismiss_signal(&mut self) -> bool {
        self.engine.dismiss_signal()
    }

    /// Stop the session now and capture its record
    pub fn end_session(&mut self) -> Result<SessionRecord, RecorderError> {
        if self.recorder.has_record() {
            return Err(RecorderError::AlreadyRecorded);
        }

        self.engine.finish();
        self.recorder
            .on_session_end(
                self.engine.state(),
                self.engine.config(),
                self.engine.peak_signal(),
                SessionEnd::Stopped,
            )
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_session() -> TimerSession {
        TimerSession::new(TimerConfig::from_thresholds(1, 2, 3, 4).unwrap()).unwrap()
    }

    #[test]
    fn test_completion_captures_record_once() {
        let mut session = short_session();
        session.start();

        let mut records = Vec::new();
        for _ in 0..10 {
            if let (_, Some(record)) = session.tick() {
                records.push(record);
            }
        }

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ended_by, SessionEnd::Completed);
        assert_eq!(records[0].final_time, 4);
        assert_eq!(session.recorder().record(), Some(&records[0]));
    }

    #[test]
    fn test_end_session_twice_fails() {
        let mut session = short_session();
        session.start();
        session.tick();

        let record = session.end_session().unwrap();
        assert_eq!(record.ended_by, SessionEnd::Stopped);
        assert_eq!(record.final_time, 1);
        assert!(!session.snapshot().is_running);

        assert_eq!(session.end_session(), Err(RecorderError::AlreadyRecorded));
    }

    #[test]
    fn test_record_keeps_manual_peak_after_lower_override() {
        let mut session = TimerSession::new(TimerConfig::default()).unwrap();
        session.start();
        for _ in 0..10 {
            session.tick();
        }
        session.set_manual_signal(Some(SignalType::Red));
        for _ in 0..10 {
            session.tick();
        }
        session.set_manual_signal(Some(SignalType::Green));
        for _ in 0..10 {
            session.tick();
        }

        let record = session.end_session().unwrap();
        assert_eq!(record.final_time, 30);
        assert_eq!(record.highest_signal, Some(SignalType::Red));
    }

    #[test]
    fn test_end_after_completion_fails() {
        let mut session = short_session();
        session.start();
        for _ in 0..4 {
            session.tick();
        }
        assert_eq!(session.end_session(), Err(RecorderError::AlreadyRecorded));
    }

    #[test]
    fn test_reset_clears_record() {
        let mut session = short_session();
        session.end_session().unwrap();
        session.reset(None).unwrap();

        assert!(session.recorder().record().is_none());
        assert!(session.end_session().is_ok());
    }

    #[test]
    fn test_failed_reset_keeps_record() {
        let mut session = short_session();
        session.end_session().unwrap();

        let mut bad = TimerConfig::default();
        bad.total_time = 10;
        assert!(session.reset(Some(bad)).is_err());
        assert!(session.recorder().has_record());
    }
}
