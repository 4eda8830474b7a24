use anyhow::{bail, Result};
use tauri::tray::TrayIconId;
use tauri::AppHandle;
use tauri_plugin_opener::OpenerExt;
use window_lifecycle::{MenuItem, WindowHost, WindowName, WindowOptions};

use super::system_tray;
use super::window::{self, AppWindow};

/// Gives the coordinator access to tauri's windows and tray.
pub struct AppHost(AppHandle);

impl AppHost {
    pub fn new(app_handle: AppHandle) -> Self {
        Self(app_handle)
    }
}

impl WindowHost for AppHost {
    type Window = AppWindow;
    type Tray = TrayIconId;

    fn build_window(&self, name: WindowName, options: &WindowOptions) -> Result<AppWindow> {
        window::build_window(&self.0, name, options)
    }

    fn create_tray(&self, menu: &'static [MenuItem]) -> Result<TrayIconId> {
        Ok(system_tray::create_tray(&self.0, menu)?)
    }

    fn destroy_tray(&self, tray: TrayIconId) -> Result<()> {
        if !system_tray::remove_tray(&self.0, &tray) {
            bail!("no tray icon with id {tray:?}");
        }
        Ok(())
    }

    fn open_external(&self, url: &str) -> Result<()> {
        Ok(self.0.opener().open_url(url, None::<&str>)?)
    }

    fn exit(&self, code: i32) {
        self.0.exit(code);
    }
}
