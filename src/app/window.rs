use anyhow::Result;
use tauri::menu::{Menu, MenuBuilder};
use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder, Wry};
use window_lifecycle::{Bounds, HostWindow, MenuItem, WindowName, WindowOptions, WindowUrl};

/// A live webview window handed to the coordinator.
#[derive(Clone)]
pub struct AppWindow(WebviewWindow);

pub fn build_window(app_handle: &AppHandle, name: WindowName, options: &WindowOptions) -> Result<AppWindow> {
    let label = name.label();
    log::info!("building window: {label}");

    let url = match &options.url {
        WindowUrl::App(page) => WebviewUrl::App(page.into()),
        WindowUrl::External(url) => WebviewUrl::External(url.parse()?),
    };

    // tauri has no per-window fullscreen lock, so `fullscreenable` only keeps these windows windowed
    let window_builder = WebviewWindowBuilder::new(app_handle, label, url)
        .title(options.title)
        .visible(false)
        .inner_size(options.size.0.into(), options.size.1.into())
        .resizable(options.resizable)
        .maximizable(options.maximizable)
        .fullscreen(false);

    // macOS only has an app-wide menu, the main window provides it
    #[cfg(not(target_os = "macos"))]
    let window_builder = window_builder.menu(build_window_menu(app_handle, options.menu)?);
    #[cfg(target_os = "macos")]
    if !options.menu.is_empty() {
        app_handle.set_menu(build_window_menu(app_handle, options.menu)?)?;
    }

    let window_builder = match options.min_size {
        Some((width, height)) => window_builder.min_inner_size(width.into(), height.into()),
        None => window_builder,
    };

    let window_builder = if let Some((x, y)) = options.position {
        window_builder.position(x.into(), y.into())
    } else {
        window_builder.center()
    };

    let window = window_builder.build()?;

    #[cfg(debug_assertions)]
    if options.dev_tools {
        window.open_devtools();
    }

    Ok(AppWindow(window))
}

fn build_window_menu(app_handle: &AppHandle, items: &[MenuItem]) -> tauri::Result<Menu<Wry>> {
    items
        .iter()
        .fold(MenuBuilder::new(app_handle), |menu, item| {
            menu.text(item.id(), format!("&{}", item.label()))
        })
        .build()
}

impl HostWindow for AppWindow {
    fn focus(&self) -> Result<()> {
        self.0.unminimize()?;
        self.0.show()?;
        self.0.set_focus()?;
        Ok(())
    }

    fn minimize(&self) -> Result<()> {
        Ok(self.0.minimize()?)
    }

    fn maximize(&self) -> Result<()> {
        Ok(self.0.maximize()?)
    }

    fn unmaximize(&self) -> Result<()> {
        Ok(self.0.unmaximize()?)
    }

    fn is_maximized(&self) -> Result<bool> {
        Ok(self.0.is_maximized()?)
    }

    fn bounds(&self) -> Result<Bounds> {
        let scale_factor = self.0.scale_factor()?;
        let position = self.0.outer_position()?.to_logical::<i32>(scale_factor);
        let size = self.0.inner_size()?.to_logical::<u32>(scale_factor);

        Ok(Bounds {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        })
    }

    fn navigate(&self, url: &str) -> Result<()> {
        Ok(self.0.navigate(url.parse()?)?)
    }

    fn reload(&self) -> Result<()> {
        Ok(self.0.eval("window.location.reload()")?)
    }

    fn set_menu(&self, items: &'static [MenuItem]) -> Result<()> {
        let menu = build_window_menu(self.0.app_handle(), items)?;
        #[cfg(not(target_os = "macos"))]
        self.0.set_menu(menu)?;
        #[cfg(target_os = "macos")]
        self.0.app_handle().set_menu(menu)?;
        Ok(())
    }

    fn destroy(&self) -> Result<()> {
        Ok(self.0.destroy()?)
    }
}
