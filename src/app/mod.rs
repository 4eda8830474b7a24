mod event;
mod host;
mod manager;
mod system_tray;
mod window;

pub use event::{AppEvent, EventManager};
pub use host::AppHost;
pub use manager::{log_plugin, AppManager};
pub use system_tray::process_menu_event;

use window_lifecycle::{ApplicationStore, WindowCoordinator};

pub type AppCoordinator = WindowCoordinator<AppHost, ApplicationStore>;

pub fn process_app_event(app_handle: &tauri::AppHandle, event: tauri::RunEvent) {
    use tauri::{RunEvent, WindowEvent};
    use window_lifecycle::WindowName;

    let Some(coordinator) = app_handle.coordinator() else {
        return;
    };

    match event {
        RunEvent::WindowEvent { label, event, .. } => {
            let window = match label.parse::<WindowName>() {
                Ok(window) => window,
                Err(e) => {
                    log::warn!("event for unmanaged window: {e}");
                    return;
                }
            };

            match event {
                // triggered on window close (X Button)
                WindowEvent::CloseRequested { api, .. } => {
                    coordinator.handle_close_requested(window, || api.prevent_close());
                }
                WindowEvent::Destroyed => coordinator.handle_destroyed(window),
                _ => {}
            }
        }
        RunEvent::ExitRequested { api, .. } => {
            // triggered when no windows remain
            // prevent complete shutdown of program so that just the tray icon stays
            if coordinator.should_prevent_exit() {
                api.prevent_exit();
            }
        }
        RunEvent::Exit => coordinator.detach(),
        _ => {}
    }
}
