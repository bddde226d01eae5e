mod application;
mod domain;
mod infrastructure;

use application::bootstrap::bootstrap_workspace;
use application::commands::{
    add_task_impl, delete_task_impl, get_session_state_impl, list_tasks_impl, pause_clock_impl,
    reset_clock_impl, select_phase_impl, set_duration_impl, start_clock_impl, toggle_task_impl,
    AppState, SessionStateResponse,
};
use application::ticker::{spawn_ticker, SESSION_STATE_EVENT};
use domain::models::Task;
use serde::Serialize;
use std::path::PathBuf;
use tauri::{AppHandle, Emitter, Manager, WindowEvent};

#[derive(Debug, Serialize)]
struct BootstrapResponse {
    workspace_root: String,
    settings_path: String,
}

#[tauri::command]
fn bootstrap(root: Option<String>) -> Result<BootstrapResponse, String> {
    let workspace_root = match root {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().map_err(|error| error.to_string())?,
    };

    let result = bootstrap_workspace(&workspace_root).map_err(|error| error.to_string())?;
    Ok(BootstrapResponse {
        workspace_root: result.workspace_root.display().to_string(),
        settings_path: result.settings_path.display().to_string(),
    })
}

#[tauri::command]
fn ping() -> &'static str {
    "pong"
}

#[tauri::command]
fn get_session_state(state: tauri::State<'_, AppState>) -> Result<SessionStateResponse, String> {
    get_session_state_impl(state.inner())
        .map_err(|error| state.command_error("get_session_state", &error))
}

#[tauri::command]
fn start_clock(
    app: AppHandle,
    state: tauri::State<'_, AppState>,
) -> Result<SessionStateResponse, String> {
    let (session, started) =
        start_clock_impl(state.inner()).map_err(|error| state.command_error("start_clock", &error))?;
    if started {
        spawn_ticker(app, state.inner());
    }
    Ok(session)
}

#[tauri::command]
fn pause_clock(state: tauri::State<'_, AppState>) -> Result<SessionStateResponse, String> {
    pause_clock_impl(state.inner()).map_err(|error| state.command_error("pause_clock", &error))
}

#[tauri::command]
fn reset_clock(
    app: AppHandle,
    state: tauri::State<'_, AppState>,
    minutes: Option<u32>,
    seconds: Option<u32>,
) -> Result<SessionStateResponse, String> {
    let session = reset_clock_impl(state.inner(), minutes, seconds)
        .map_err(|error| state.command_error("reset_clock", &error))?;
    let _ = app.emit(SESSION_STATE_EVENT, &session);
    Ok(session)
}

#[tauri::command]
fn select_phase(
    app: AppHandle,
    state: tauri::State<'_, AppState>,
    phase: String,
) -> Result<SessionStateResponse, String> {
    let session = select_phase_impl(state.inner(), phase)
        .map_err(|error| state.command_error("select_phase", &error))?;
    let _ = app.emit(SESSION_STATE_EVENT, &session);
    Ok(session)
}

#[tauri::command]
fn set_duration(
    app: AppHandle,
    state: tauri::State<'_, AppState>,
    phase: String,
    value: String,
) -> Result<SessionStateResponse, String> {
    let session = set_duration_impl(state.inner(), phase, value)
        .map_err(|error| state.command_error("set_duration", &error))?;
    let _ = app.emit(SESSION_STATE_EVENT, &session);
    Ok(session)
}

#[tauri::command]
fn list_tasks(state: tauri::State<'_, AppState>) -> Result<Vec<Task>, String> {
    list_tasks_impl(state.inner()).map_err(|error| state.command_error("list_tasks", &error))
}

#[tauri::command]
fn add_task(state: tauri::State<'_, AppState>, text: String) -> Result<Option<Task>, String> {
    add_task_impl(state.inner(), text).map_err(|error| state.command_error("add_task", &error))
}

#[tauri::command]
fn toggle_task(state: tauri::State<'_, AppState>, id: u64) -> Result<Option<Task>, String> {
    toggle_task_impl(state.inner(), id).map_err(|error| state.command_error("toggle_task", &error))
}

#[tauri::command]
fn delete_task(state: tauri::State<'_, AppState>, id: u64) -> Result<bool, String> {
    delete_task_impl(state.inner(), id).map_err(|error| state.command_error("delete_task", &error))
}

pub fn run() {
    let workspace_root = std::env::current_dir().expect("failed to resolve current directory");
    let app_state = AppState::new(workspace_root).expect("failed to initialize app state");

    tauri::Builder::default()
        .manage(app_state)
        .on_window_event(|window, event| {
            // The ticker must not outlive the window.
            if let WindowEvent::Destroyed = event {
                let state = window.state::<AppState>();
                let _ = pause_clock_impl(state.inner());
            }
        })
        .invoke_handler(tauri::generate_handler![
            ping,
            bootstrap,
            get_session_state,
            start_clock,
            pause_clock,
            reset_clock,
            select_phase,
            set_duration,
            list_tasks,
            add_task,
            toggle_task,
            delete_task
        ])
        .run(tauri::generate_context!())
        .expect("failed to run tauri app");
}
