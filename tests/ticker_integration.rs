//! Ticker task tests on tokio's paused clock.
//!
//! With `start_paused` the runtime jumps straight to the next timer whenever
//! every task is idle, so sleeping N.5 seconds yields exactly N ticks.

use std::{sync::Arc, time::Duration};

use speech_timer::{
    state::{AppState, TimerEvent},
    tasks::spawn_ticker,
    timer::{SessionEnd, SignalType, TimerConfig},
};
use tokio::time::sleep;

fn spawn_app(config: TimerConfig) -> Arc<AppState> {
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), config).unwrap());
    spawn_ticker(Arc::clone(&state));
    state
}

#[tokio::test(start_paused = true)]
async fn ticks_only_while_running() {
    let state = spawn_app(TimerConfig::default());

    sleep(Duration::from_secs(3)).await;
    assert_eq!(state.snapshot().unwrap().current_time, 0);

    state.start().unwrap();
    sleep(Duration::from_millis(5_500)).await;
    assert_eq!(state.snapshot().unwrap().current_time, 5);

    state.pause().unwrap();
    sleep(Duration::from_secs(30)).await;
    assert_eq!(state.snapshot().unwrap().current_time, 5);

    state.start().unwrap();
    sleep(Duration::from_millis(2_500)).await;
    assert_eq!(state.snapshot().unwrap().current_time, 7);
}

#[tokio::test(start_paused = true)]
async fn repeated_start_does_not_double_tick() {
    let state = spawn_app(TimerConfig::default());

    state.start().unwrap();
    state.start().unwrap();
    sleep(Duration::from_millis(500)).await;
    state.start().unwrap();
    sleep(Duration::from_secs(4)).await;

    assert_eq!(state.snapshot().unwrap().current_time, 4);
}

#[tokio::test(start_paused = true)]
async fn reset_stops_ticking() {
    let state = spawn_app(TimerConfig::default());

    state.start().unwrap();
    sleep(Duration::from_millis(3_500)).await;
    state.reset(None).unwrap();
    sleep(Duration::from_secs(10)).await;

    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.current_time, 0);
    assert!(!snapshot.is_running);
}

#[tokio::test(start_paused = true)]
async fn runs_to_completion_and_records_once() {
    let state = spawn_app(TimerConfig::from_thresholds(1, 2, 3, 4).unwrap());
    let mut events = state.event_tx.subscribe();

    state.start().unwrap();
    sleep(Duration::from_secs(20)).await;

    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.current_time, 4);
    assert!(!snapshot.is_running);
    assert_eq!(snapshot.current_signal, Some(SignalType::Red));

    let record = state.record().unwrap().unwrap();
    assert_eq!(record.ended_by, SessionEnd::Completed);
    assert_eq!(record.final_time, 4);

    let mut ended = 0;
    while let Ok(event) = events.try_recv() {
        if let TimerEvent::SessionEnded { .. } = event {
            ended += 1;
        }
    }
    assert_eq!(ended, 1);

    // an ended session cannot be restarted without a reset
    state.start().unwrap();
    sleep(Duration::from_secs(5)).await;
    assert_eq!(state.snapshot().unwrap().current_time, 4);
}

#[tokio::test(start_paused = true)]
async fn stop_disarms_ticker() {
    let state = spawn_app(TimerConfig::default());

    state.start().unwrap();
    sleep(Duration::from_millis(2_500)).await;
    let record = state.end_session().unwrap();
    sleep(Duration::from_secs(10)).await;

    assert_eq!(record.final_time, 2);
    assert_eq!(state.snapshot().unwrap().current_time, 2);
}
