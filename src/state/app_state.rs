//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::{
    error::AppError,
    timer::{SessionRecord, SignalCard, SignalType, TickOutcome, TimerConfig, TimerState},
};
use super::{ControlEvent, TimerEvent, TimerSession};

/// Main application state shared by the HTTP handlers and the ticker task
#[derive(Debug)]
pub struct AppState {
    /// Engine and recorder; every timer operation goes through this one lock
    pub session: Arc<Mutex<TimerSession>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Control transitions for the ticker
    pub control_tx: broadcast::Sender<ControlEvent>,
    /// Signal changes and session ends
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Latest snapshot, pushed after every tick and control operation
    pub snapshot_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState; an invalid config prevents any session from existing
    pub fn new(port: u16, host: String, config: TimerConfig) -> Result<Self, AppError> {
        let session = TimerSession::new(config)?;
        let (control_tx, _) = broadcast::channel(100);
        let (event_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            control_tx,
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        })
    }

    fn lock_session(&self) -> Result<MutexGuard<'_, TimerSession>, AppError> {
        self.session
            .lock()
            .map_err(|e| AppError::Lock(e.to_string()))
    }

    /// Run a control operation under the session lock, then publish the new snapshot
    fn update_session<T, F>(&self, action: &str, updater: F) -> Result<(T, TimerState), AppError>
    where
        F: FnOnce(&mut TimerSession) -> Result<T, AppError>,
    {
        let mut session = self.lock_session()?;
        let result = updater(&mut *session)?;
        let snapshot = session.snapshot();
        drop(session); // Release the lock early

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.publish_snapshot(&snapshot);
        Ok((result, snapshot))
    }

    fn publish_snapshot(&self, snapshot: &TimerState) {
        if let Err(e) = self.snapshot_tx.send(snapshot.clone()) {
            warn!("Failed to send timer snapshot: {}", e);
        }
    }

    fn notify_control(&self, event: ControlEvent) {
        // No ticker subscribed is fine (tests drive ticks by hand)
        if self.control_tx.send(event).is_err() {
            debug!("No ticker listening for {:?}", event);
        }
    }

    fn notify(&self, event: TimerEvent) {
        debug!("Publishing {} event", event.event_name());
        if self.event_tx.send(event).is_err() {
            debug!("No timer event subscribers");
        }
    }

    fn notify_signal(&self, snapshot: &TimerState) {
        self.notify(TimerEvent::SignalChanged {
            signal: snapshot.current_signal,
            at_seconds: snapshot.current_time,
            manual: snapshot.manual_mode,
        });
    }

    /// Start or resume the timer
    pub fn start(&self) -> Result<TimerState, AppError> {
        let (started, snapshot) = self.update_session("start", |s| Ok(s.start()))?;
        if started {
            self.notify_control(ControlEvent::Started);
        }
        Ok(snapshot)
    }

    /// Pause the timer
    pub fn pause(&self) -> Result<TimerState, AppError> {
        let (paused, snapshot) = self.update_session("pause", |s| Ok(s.pause()))?;
        if paused {
            self.notify_control(ControlEvent::Paused);
        }
        Ok(snapshot)
    }

    /// Reset the timer, optionally with a new configuration
    pub fn reset(&self, config: Option<TimerConfig>) -> Result<TimerState, AppError> {
        info!("Resetting timer (new config: {})", config.is_some());
        let (_, snapshot) = self.update_session("reset", |s| Ok(s.reset(config)?))?;
        self.notify_control(ControlEvent::Reset);
        Ok(snapshot)
    }

    /// Advance the timer by one second
    pub fn tick(&self) -> Result<(TickOutcome, TimerState), AppError> {
        let mut session = self.lock_session()?;
        let (outcome, record) = session.tick();
        let snapshot = session.snapshot();
        drop(session);

        if outcome.advanced {
            self.publish_snapshot(&snapshot);
        }
        if outcome.signal_changed {
            self.notify_signal(&snapshot);
        }
        if let Some(record) = record {
            self.notify(TimerEvent::SessionEnded { record });
        }
        Ok((outcome, snapshot))
    }

    /// Force the displayed signal for the rest of the session
    pub fn set_manual_signal(&self, signal: Option<SignalType>) -> Result<TimerState, AppError> {
        let (changed, snapshot) = self.update_session("manual-signal", |s| Ok(s.set_manual_signal(signal)))?;
        if changed {
            self.notify_signal(&snapshot);
        }
        Ok(snapshot)
    }

    /// Hide the visible card
    pub fn dismiss_signal(&self) -> Result<TimerState, AppError> {
        let (_, snapshot) = self.update_session("dismiss", |s| Ok(s.dismiss_signal()))?;
        Ok(snapshot)
    }

    /// Stop the session now and capture its record
    pub fn end_session(&self) -> Result<SessionRecord, AppError> {
        let (record, _) = self.update_session("stop", |s| Ok(s.end_session()?))?;
        self.notify_control(ControlEvent::Ended);
        self.notify(TimerEvent::SessionEnded { record: record.clone() });
        Ok(record)
    }

    /// Get current timer snapshot
    pub fn snapshot(&self) -> Result<TimerState, AppError> {
        Ok(self.lock_session()?.snapshot())
    }

    /// Snapshot together with the card to render and the remaining seconds
    pub fn display(&self) -> Result<(TimerState, Option<SignalCard>, u32), AppError> {
        let session = self.lock_session()?;
        let engine = session.engine();
        Ok((engine.state().clone(), engine.active_card().cloned(), engine.remaining_seconds()))
    }

    pub fn config(&self) -> Result<TimerConfig, AppError> {
        Ok(self.lock_session()?.engine().config().clone())
    }

    /// Last session record, `None` until a session ends
    pub fn record(&self) -> Result<Option<SessionRecord>, AppError> {
        Ok(self.lock_session()?.recorder().record().cloned())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
