//! Timer engine: clock advancement, threshold evaluation and controls

use tracing::{debug, info};

use crate::error::ConfigError;
use super::{SignalCard, SignalType, TimerConfig, TimerState};

/// Which code path `tick()` takes for signal selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMode {
    Automatic,
    /// Entered via `set_manual_signal`, left only through `reset`
    ManualOverride,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The clock moved forward one second
    pub advanced: bool,
    pub signal_changed: bool,
    /// Set on the one tick that reaches the total time
    pub completed: bool,
}

/// State machine owning one session's `TimerState`
#[derive(Debug)]
pub struct TimerEngine {
    config: TimerConfig,
    state: TimerState,
    mode: SignalMode,
    /// Most severe signal shown this session, automatic or manual
    peak_signal: Option<SignalType>,
    ended: bool,
}

impl TimerEngine {
    pub fn new(config: TimerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: TimerState::new(),
            mode: SignalMode::Automatic,
            peak_signal: None,
            ended: false,
        })
    }

    /// Start or resume the clock. Returns false if nothing changed.
    pub fn start(&mut self) -> bool {
        if self.state.is_running {
            return false;
        }
        if self.ended {
            debug!("Ignoring start, session already ended at {}s", self.state.current_time);
            return false;
        }

        self.state.is_running = true;
        info!("Timer started at {}s", self.state.current_time);
        true
    }

    /// Freeze the clock. Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        if !self.state.is_running {
            return false;
        }

        self.state.is_running = false;
        info!("Timer paused at {}s", self.state.current_time);
        true
    }

    /// Stop and clear the session, optionally swapping in a new config.
    ///
    /// An invalid replacement config leaves the engine untouched.
    pub fn reset(&mut self, config: Option<TimerConfig>) -> Result<(), ConfigError> {
        if let Some(config) = config {
            config.validate()?;
            self.config = config;
        }

        self.state = TimerState::new();
        self.mode = SignalMode::Automatic;
        self.peak_signal = None;
        self.ended = false;
        info!(
            "Timer reset (green={}s, yellow={}s, red={}s, total={}s)",
            self.config.green_time, self.config.yellow_time, self.config.red_time, self.config.total_time
        );
        Ok(())
    }

    /// Advance one second if running
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.state.is_running {
            return outcome;
        }

        self.state.current_time += 1;
        outcome.advanced = true;

        if self.mode == SignalMode::Automatic {
            outcome.signal_changed = self.evaluate_signal();
        }

        if self.state.current_time >= self.config.total_time {
            self.state.is_running = false;
            if !self.ended {
                self.ended = true;
                outcome.completed = true;
                info!("Timer completed at {}s", self.state.current_time);
            }
        }

        debug!(
            "Tick: {}s, signal={:?}, shown={}",
            self.state.current_time, self.state.current_signal, self.state.show_signal
        );
        outcome
    }

    /// Override the automatic selection for the rest of the session
    pub fn set_manual_signal(&mut self, signal: Option<SignalType>) -> bool {
        let changed = self.mode != SignalMode::ManualOverride || self.state.current_signal != signal;

        self.mode = SignalMode::ManualOverride;
        self.state.manual_mode = true;
        self.state.current_signal = signal;
        self.state.show_signal = signal.is_some();
        self.peak_signal = self.peak_signal.max(signal);
        info!("Manual signal set to {:?}", signal);
        changed
    }

    /// Hide the visible card, keeping track of the active signal
    pub fn dismiss_signal(&mut self) -> bool {
        let was_shown = self.state.show_signal;
        self.state.show_signal = false;
        was_shown
    }

    /// End the session early. Returns false if it already ended.
    pub fn finish(&mut self) -> bool {
        self.state.is_running = false;
        if self.ended {
            return false;
        }

        self.ended = true;
        info!("Session ended early at {}s", self.state.current_time);
        true
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn mode(&self) -> SignalMode {
        self.mode
    }

    pub fn peak_signal(&self) -> Option<SignalType> {
        self.peak_signal
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Card the presentation layer should render, if any
    pub fn active_card(&self) -> Option<&SignalCard> {
        self.state.visible_signal().and_then(|signal| self.config.card(signal))
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.config.total_time.saturating_sub(self.state.current_time)
    }

    /// Most severe reached card wins, so a multi-threshold jump never lands on a stale one
    fn evaluate_signal(&mut self) -> bool {
        let reached = self.config.signal_at(self.state.current_time);
        if reached == self.state.current_signal {
            return false;
        }

        self.state.current_signal = reached;
        self.state.show_signal = reached.is_some();
        self.peak_signal = self.peak_signal.max(reached);
        if let Some(signal) = reached {
            info!("{} signal reached at {}s", signal, self.state.current_time);
        }
        true
    }
}
