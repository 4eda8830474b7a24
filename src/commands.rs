use std::sync::Arc;

use tauri::State;
use window_lifecycle::{Action, ApplicationState, StateStore, WindowName};

use crate::app::AppCoordinator;

type Coordinator<'a> = State<'a, Arc<AppCoordinator>>;

// commands stay synchronous so they run on the main thread like every other window operation

fn parse_window(window: &str) -> Result<WindowName, String> {
    window.parse::<WindowName>().map_err(|e| e.to_string())
}

#[cfg_attr(test, specta::specta)]
#[tauri::command]
pub fn show_window(window: String, coordinator: Coordinator<'_>) -> Result<(), String> {
    coordinator.show(parse_window(&window)?);
    Ok(())
}

#[cfg_attr(test, specta::specta)]
#[tauri::command]
pub fn minimize_window(window: String, coordinator: Coordinator<'_>) -> Result<(), String> {
    coordinator.minimize(parse_window(&window)?);
    Ok(())
}

#[cfg_attr(test, specta::specta)]
#[tauri::command]
pub fn maximize_window(window: String, coordinator: Coordinator<'_>) -> Result<(), String> {
    coordinator.toggle_maximize(parse_window(&window)?);
    Ok(())
}

#[cfg_attr(test, specta::specta)]
#[tauri::command]
pub fn close_window(window: String, coordinator: Coordinator<'_>) -> Result<(), String> {
    coordinator.close(parse_window(&window)?);
    Ok(())
}

#[cfg_attr(test, specta::specta)]
#[tauri::command]
pub fn show_profile(player_id: String, coordinator: Coordinator<'_>) {
    coordinator.show_profile(&player_id);
}

#[cfg_attr(test, specta::specta)]
#[tauri::command]
pub fn reload_all_windows(coordinator: Coordinator<'_>) {
    coordinator.reload_all_windows();
}

#[cfg_attr(test, specta::specta)]
#[tauri::command]
pub fn get_state(coordinator: Coordinator<'_>) -> ApplicationState {
    coordinator.store().get_state()
}

#[cfg_attr(test, specta::specta)]
#[tauri::command]
pub fn dispatch(action: Action, coordinator: Coordinator<'_>) {
    coordinator.store().dispatch(action);
}
