use crate::application::bootstrap::bootstrap_workspace;
use crate::domain::clock::{Countdown, TickOutcome};
use crate::domain::models::{format_time, sanitize_duration, DurationConfig, Phase, Task};
use crate::domain::session::{next_phase, sessions_until_long_break};
use crate::domain::tasks::TaskBoard;
use crate::infrastructure::config::load_duration_defaults;
use crate::infrastructure::error::InfraError;
use chrono::Utc;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub struct AppState {
    config_dir: PathBuf,
    logs_dir: PathBuf,
    runtime: Mutex<RuntimeState>,
    ticker: Mutex<Option<tauri::async_runtime::JoinHandle<()>>>,
    log_guard: Mutex<()>,
}

impl AppState {
    pub fn new(workspace_root: PathBuf) -> Result<Self, InfraError> {
        let _ = bootstrap_workspace(&workspace_root)?;
        let config_dir = workspace_root.join("config");
        let logs_dir = workspace_root.join("logs");
        let durations = load_duration_defaults(&config_dir);

        Ok(Self {
            config_dir,
            logs_dir,
            runtime: Mutex::new(RuntimeState::new(durations)),
            ticker: Mutex::new(None),
            log_guard: Mutex::new(()),
        })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn command_error(&self, command: &str, error: &InfraError) -> String {
        self.log_error(command, &error.to_string());
        error.to_string()
    }

    pub fn log_info(&self, command: &str, message: &str) {
        self.append_log("info", command, message);
    }

    pub fn log_error(&self, command: &str, message: &str) {
        self.append_log("error", command, message);
    }

    fn append_log(&self, level: &str, command: &str, message: &str) {
        let Ok(_guard) = self.log_guard.lock() else {
            return;
        };
        let path = self.logs_dir.join("commands.log");
        let payload = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "level": level,
            "command": command,
            "message": message,
        });

        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = writeln!(file, "{}", payload);
        }
    }

    pub(crate) fn store_ticker(&self, handle: tauri::async_runtime::JoinHandle<()>) {
        if let Ok(mut slot) = self.ticker.lock() {
            if let Some(previous) = slot.replace(handle) {
                previous.abort();
            }
        }
    }

    pub(crate) fn abort_ticker(&self) {
        if let Ok(mut slot) = self.ticker.lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}

#[derive(Debug)]
struct RuntimeState {
    phase: Phase,
    durations: DurationConfig,
    completed_focus_sessions: u32,
    running: bool,
    clock: Countdown,
    tasks: TaskBoard,
}

impl RuntimeState {
    fn new(durations: DurationConfig) -> Self {
        Self {
            phase: Phase::Focus,
            durations,
            completed_focus_sessions: 0,
            running: false,
            clock: Countdown::new(durations.focus, 0),
            tasks: TaskBoard::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClockTickPayload {
    pub minutes: u32,
    pub seconds: u32,
    pub total_seconds_remaining: u32,
    pub display_time: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionStateResponse {
    pub phase: String,
    pub phase_label: String,
    pub running: bool,
    pub minutes: u32,
    pub seconds: u32,
    pub total_seconds_remaining: u32,
    pub display_time: String,
    pub durations: DurationConfig,
    pub completed_focus_sessions: u32,
    pub sessions_until_long_break: u32,
}

/// Result of applying one clock tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockAdvance {
    /// Clock was not running; nothing happened.
    Idle,
    /// One second elapsed.
    Tick(ClockTickPayload),
    /// The countdown finished and the session moved to the next phase,
    /// already reconfigured and auto-started.
    PhaseChanged(SessionStateResponse),
}

pub fn get_session_state_impl(state: &AppState) -> Result<SessionStateResponse, InfraError> {
    let runtime = lock_runtime(state)?;
    Ok(to_session_state_response(&runtime))
}

/// Marks the clock running. The boolean reports whether a ticker needs to be
/// spawned; a second start while running is a no-op.
pub fn start_clock_impl(state: &AppState) -> Result<(SessionStateResponse, bool), InfraError> {
    let mut runtime = lock_runtime(state)?;
    if runtime.running {
        return Ok((to_session_state_response(&runtime), false));
    }
    runtime.running = true;
    let response = to_session_state_response(&runtime);
    drop(runtime);

    state.log_info("start_clock", "clock started");
    Ok((response, true))
}

pub fn pause_clock_impl(state: &AppState) -> Result<SessionStateResponse, InfraError> {
    let mut runtime = lock_runtime(state)?;
    runtime.running = false;
    let response = to_session_state_response(&runtime);
    drop(runtime);

    state.abort_ticker();
    state.log_info("pause_clock", "clock paused");
    Ok(response)
}

/// Stops the clock and sets the remaining time. Omitted values fall back to
/// the current phase's configured duration with zero seconds.
pub fn reset_clock_impl(
    state: &AppState,
    minutes: Option<u32>,
    seconds: Option<u32>,
) -> Result<SessionStateResponse, InfraError> {
    let mut runtime = lock_runtime(state)?;
    let minutes = minutes.unwrap_or_else(|| runtime.durations.minutes_for(runtime.phase));
    let seconds = seconds.unwrap_or(0);
    runtime.running = false;
    runtime.clock.reset(minutes, seconds);
    let response = to_session_state_response(&runtime);
    drop(runtime);

    state.abort_ticker();
    state.log_info(
        "reset_clock",
        &format!("clock reset to {}", format_time(minutes, seconds.min(59))),
    );
    Ok(response)
}

/// Manual phase switch. Stops the clock and loads the selected phase's
/// duration; the completed-focus counter is left untouched.
pub fn select_phase_impl(state: &AppState, phase: String) -> Result<SessionStateResponse, InfraError> {
    let phase = parse_phase(&phase)?;

    let mut runtime = lock_runtime(state)?;
    runtime.phase = phase;
    runtime.running = false;
    let minutes = runtime.durations.minutes_for(phase);
    runtime.clock.reset(minutes, 0);
    let response = to_session_state_response(&runtime);
    drop(runtime);

    state.abort_ticker();
    state.log_info("select_phase", &format!("switched to phase={}", phase.as_str()));
    Ok(response)
}

/// Applies a duration edit. Raw input is sanitized to [1, 60]; editing the
/// displayed phase while the clock is idle resets the countdown immediately,
/// any other edit takes effect the next time the phase is entered.
pub fn set_duration_impl(
    state: &AppState,
    phase: String,
    value: String,
) -> Result<SessionStateResponse, InfraError> {
    let phase = parse_phase(&phase)?;
    let minutes = sanitize_duration(&value);

    let mut runtime = lock_runtime(state)?;
    runtime.durations.set_minutes(phase, minutes);
    debug_assert!(runtime.durations.validate().is_ok());
    if phase == runtime.phase && !runtime.running {
        runtime.clock.reset(minutes, 0);
    }
    let response = to_session_state_response(&runtime);
    drop(runtime);

    state.log_info(
        "set_duration",
        &format!("phase={} minutes={}", phase.as_str(), minutes),
    );
    Ok(response)
}

/// Applies one tick. Invoked once per second by the ticker task; tests drive
/// it directly. A finishing countdown runs the phase transition and
/// auto-starts the next phase in the same step.
pub fn advance_clock_impl(state: &AppState) -> Result<ClockAdvance, InfraError> {
    let mut runtime = lock_runtime(state)?;
    if !runtime.running {
        return Ok(ClockAdvance::Idle);
    }

    match runtime.clock.tick() {
        TickOutcome::Decremented { minutes, seconds } => Ok(ClockAdvance::Tick(ClockTickPayload {
            minutes,
            seconds,
            total_seconds_remaining: minutes * 60 + seconds,
            display_time: format_time(minutes, seconds),
        })),
        TickOutcome::Finished => {
            let (phase, completed) = next_phase(runtime.phase, runtime.completed_focus_sessions);
            runtime.phase = phase;
            runtime.completed_focus_sessions = completed;
            let minutes = runtime.durations.minutes_for(phase);
            runtime.clock.reset(minutes, 0);
            runtime.running = true;
            let response = to_session_state_response(&runtime);
            drop(runtime);

            state.log_info(
                "advance_clock",
                &format!(
                    "phase finished; next={} completed_focus_sessions={}",
                    phase.as_str(),
                    completed
                ),
            );
            Ok(ClockAdvance::PhaseChanged(response))
        }
    }
}

pub fn list_tasks_impl(state: &AppState) -> Result<Vec<Task>, InfraError> {
    let runtime = lock_runtime(state)?;
    Ok(runtime.tasks.tasks().to_vec())
}

/// Adds a task. Text that is blank after trimming is silently dropped and
/// reported as `None` rather than an error.
pub fn add_task_impl(state: &AppState, text: String) -> Result<Option<Task>, InfraError> {
    let mut runtime = lock_runtime(state)?;
    let created = runtime.tasks.add(&text).cloned();
    drop(runtime);

    if let Some(task) = &created {
        debug_assert!(task.validate().is_ok());
        state.log_info("add_task", &format!("created task_id={}", task.id));
    }
    Ok(created)
}

pub fn toggle_task_impl(state: &AppState, id: u64) -> Result<Option<Task>, InfraError> {
    let mut runtime = lock_runtime(state)?;
    let toggled = runtime.tasks.toggle(id).cloned();
    drop(runtime);

    if let Some(task) = &toggled {
        state.log_info(
            "toggle_task",
            &format!("task_id={} completed={}", task.id, task.completed),
        );
    }
    Ok(toggled)
}

pub fn delete_task_impl(state: &AppState, id: u64) -> Result<bool, InfraError> {
    let mut runtime = lock_runtime(state)?;
    let removed = runtime.tasks.remove(id);
    drop(runtime);

    if removed {
        state.log_info("delete_task", &format!("deleted task_id={id}"));
    }
    Ok(removed)
}

fn lock_runtime(state: &AppState) -> Result<MutexGuard<'_, RuntimeState>, InfraError> {
    state
        .runtime
        .lock()
        .map_err(|error| InfraError::Runtime(format!("runtime lock poisoned: {error}")))
}

fn to_session_state_response(runtime: &RuntimeState) -> SessionStateResponse {
    let minutes = runtime.clock.minutes();
    let seconds = runtime.clock.seconds();
    SessionStateResponse {
        phase: runtime.phase.as_str().to_string(),
        phase_label: runtime.phase.label().to_string(),
        running: runtime.running,
        minutes,
        seconds,
        total_seconds_remaining: runtime.clock.total_seconds(),
        display_time: format_time(minutes, seconds),
        durations: runtime.durations,
        completed_focus_sessions: runtime.completed_focus_sessions,
        sessions_until_long_break: sessions_until_long_break(runtime.completed_focus_sessions),
    }
}

fn parse_phase(value: &str) -> Result<Phase, InfraError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "focus" => Ok(Phase::Focus),
        "short_break" | "short-break" => Ok(Phase::ShortBreak),
        "long_break" | "long-break" => Ok(Phase::LongBreak),
        other => Err(InfraError::InvalidInput(format!(
            "unsupported phase: {}",
            other
        ))),
    }
}
