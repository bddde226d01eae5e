use crate::application::commands::{advance_clock_impl, AppState, ClockAdvance};
use std::time::Duration;
use tauri::{AppHandle, Emitter, Manager};
use tokio::time::{interval, MissedTickBehavior};

/// Emitted on every successful one-second decrement.
pub const CLOCK_TICK_EVENT: &str = "clock:tick";
/// Emitted when a countdown reaches 0:00, carrying the auto-started phase.
pub const CLOCK_FINISH_EVENT: &str = "clock:finish";
/// Emitted whenever phase, durations or running state change.
pub const SESSION_STATE_EVENT: &str = "session:state";

/// Spawns the owned ticker task, replacing (and aborting) any previous one.
/// The task applies one tick per wall-clock second and exits on its own as
/// soon as the clock is no longer running; `pause_clock` additionally aborts
/// it so no tick can land after the command returns.
pub fn spawn_ticker(app: AppHandle, state: &AppState) {
    state.abort_ticker();

    let handle = tauri::async_runtime::spawn(async move {
        let mut ticks = interval(Duration::from_secs(1));
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick completes immediately; skip it so the
        // first decrement lands a full second after start.
        ticks.tick().await;

        loop {
            ticks.tick().await;
            let state = app.state::<AppState>();
            match advance_clock_impl(state.inner()) {
                Ok(ClockAdvance::Tick(payload)) => {
                    let _ = app.emit(CLOCK_TICK_EVENT, &payload);
                }
                Ok(ClockAdvance::PhaseChanged(session)) => {
                    let _ = app.emit(CLOCK_FINISH_EVENT, &session);
                    let _ = app.emit(SESSION_STATE_EVENT, &session);
                }
                Ok(ClockAdvance::Idle) => break,
                Err(error) => {
                    state.log_error("advance_clock", &error.to_string());
                    break;
                }
            }
        }
    });

    state.store_ticker(handle);
}
