use std::sync::Arc;

use anyhow::{Context, Result};
use log::LevelFilter;
use tauri::plugin::TauriPlugin;
use tauri::{AppHandle, Manager, Wry};
use tauri_plugin_log::{Target, TargetKind};
use window_lifecycle::{ApplicationStore, StateStore, WindowConfig, WindowCoordinator};

use super::{AppCoordinator, AppEvent, AppHost, EventManager};
use crate::constants::{APP_NAME, CURRENT_VERSION, STATE_FILE};

pub trait AppManager {
    fn setup(&self) -> Result<()>;

    fn initialize_store(&self) -> Result<Arc<ApplicationStore>>;

    /// `None` until setup has finished.
    fn coordinator(&self) -> Option<Arc<AppCoordinator>>;
}

impl AppManager for AppHandle {
    fn setup(&self) -> Result<()> {
        let store = self.initialize_store()?;

        log::info!("{APP_NAME} v{CURRENT_VERSION}");
        log::info!("{}", chrono::Local::now().format("%d-%m-%Y %H:%M"));
        log::info!("debug_log: {}", if debug_log() { "enabled" } else { "disabled" });
        if let Some(state_file) = store.file() {
            log::info!("state file: {}", state_file.display());
        }
        log::info!("Settings: {:?}", store.get_state().settings);

        // keep every window's copy of the state in sync
        store.subscribe(Box::new({
            let app_handle = self.clone();
            move |state| {
                let event = AppEvent::StateChanged { payload: state.clone() };
                if let Err(e) = app_handle.send_event(event) {
                    log::error!("failed to emit 'state_changed' event: {e}");
                }
            }
        }));

        let coordinator = WindowCoordinator::new(
            AppHost::new(self.clone()),
            store,
            WindowConfig::defaults(APP_NAME),
            cfg!(debug_assertions),
        );
        self.manage(Arc::clone(&coordinator));
        coordinator.start();

        Ok(())
    }

    fn initialize_store(&self) -> Result<Arc<ApplicationStore>> {
        let config_folder = self.path().app_config_dir().context("Error getting app directory")?;
        Ok(Arc::new(ApplicationStore::load(config_folder.join(STATE_FILE))))
    }

    fn coordinator(&self) -> Option<Arc<AppCoordinator>> {
        self.try_state::<Arc<AppCoordinator>>()
            .map(|coordinator| Arc::clone(&coordinator))
    }
}

fn debug_log() -> bool {
    std::env::args().any(|e| e == "-d" || e == "--debug")
}

pub fn log_plugin() -> TauriPlugin<Wry> {
    tauri_plugin_log::Builder::new()
        .targets([
            Target::new(TargetKind::Stdout),
            Target::new(TargetKind::LogDir {
                file_name: Some(format!("{}", chrono::Local::now().format("%Y-%m-%d_%H-%M"))),
            }),
        ])
        .level(if debug_log() { LevelFilter::Debug } else { LevelFilter::Info })
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{}]: {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                msg
            ))
        })
        .build()
}
