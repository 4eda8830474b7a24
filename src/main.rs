#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

mod app;
mod commands;
mod constants;
#[cfg(test)]
mod generate_bindings;

use app::AppManager;
use constants::exit;
use window_lifecycle::WindowName;

fn main() {
    let app = tauri::Builder::default()
        // has to be the first plugin
        .plugin(tauri_plugin_single_instance::init(|app_handle, _args, _cwd| {
            if let Some(coordinator) = app_handle.coordinator() {
                coordinator.show(WindowName::Main);
            }
        }))
        .plugin(app::log_plugin())
        .plugin(tauri_plugin_opener::init())
        .on_menu_event(app::process_menu_event)
        .invoke_handler(tauri::generate_handler![
            commands::show_window,
            commands::minimize_window,
            commands::maximize_window,
            commands::close_window,
            commands::show_profile,
            commands::reload_all_windows,
            commands::get_state,
            commands::dispatch
        ])
        .setup(|app| Ok(app.handle().setup()?))
        .build(tauri::generate_context!());

    match app {
        Ok(app) => app.run(app::process_app_event),
        Err(e) => {
            eprintln!("error while building tauri application: {e}");
            std::process::exit(exit::ERROR);
        }
    }
}
