//! Ticker background task driving the timer engine once per second

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::{AppState, ControlEvent};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Subscribe to control events, then run the ticker on the runtime
pub fn spawn_ticker(state: Arc<AppState>) -> JoinHandle<()> {
    let control_rx = state.control_tx.subscribe();
    tokio::spawn(ticker_task(state, control_rx))
}

/// Background task that ticks the engine while it runs
pub async fn ticker_task(state: Arc<AppState>, mut control_rx: broadcast::Receiver<ControlEvent>) {
    info!("Starting ticker task");

    loop {
        // Wait for the timer to start
        match control_rx.recv().await {
            Ok(ControlEvent::Started) => {
                debug!("Ticker armed");

                // A fresh interval per run; the first tick lands one period after start
                let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            match state.tick() {
                                Ok((outcome, snapshot)) => {
                                    if outcome.completed {
                                        info!("Session completed at {}s", snapshot.current_time);
                                        break;
                                    }
                                    if !outcome.advanced {
                                        debug!("Engine not running, disarming ticker");
                                        break;
                                    }
                                }
                                Err(e) => {
                                    error!("Failed to tick timer: {}", e);
                                    break;
                                }
                            }
                        }

                        control = control_rx.recv() => {
                            match control {
                                Ok(ControlEvent::Started) => {}
                                Ok(event) => {
                                    debug!("Ticker disarmed by {:?}", event);
                                    break;
                                }
                                Err(RecvError::Lagged(skipped)) => {
                                    warn!("Ticker missed {} control events", skipped);
                                }
                                Err(RecvError::Closed) => {
                                    info!("Control channel closed, stopping ticker task");
                                    return;
                                }
                            }
                        }
                    }
                }
            }
            Ok(event) => {
                debug!("Ticker idle, ignoring {:?}", event);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Ticker missed {} control events", skipped);
                // Re-arm if the engine started while we lagged
                if matches!(state.snapshot(), Ok(snapshot) if snapshot.is_running) {
                    if let Err(e) = state.control_tx.send(ControlEvent::Started) {
                        error!("Failed to re-arm ticker: {}", e);
                    }
                }
            }
            Err(RecvError::Closed) => {
                info!("Control channel closed, stopping ticker task");
                return;
            }
        }
    }
}
