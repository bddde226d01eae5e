#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    focusloop_tauri_lib::run()
}
