//! A recording [`WindowHost`] for tests.

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use crate::host::{HostWindow, MenuItem, WindowHost, WindowOptions, WindowUrl};
use crate::state::Bounds;
use crate::window::WindowName;

#[derive(Debug)]
struct WindowRecord {
    name: WindowName,
    url: String,
    bounds: Bounds,
    maximized: bool,
    minimized: bool,
    destroyed: bool,
    focus_count: usize,
    bounds_reads: usize,
    reloads: usize,
    menu: Vec<MenuItem>,
}

#[derive(Debug, Default)]
struct HostLog {
    windows: Vec<WindowRecord>,
    next_tray: u64,
    tray: Option<u64>,
    trays_created: usize,
    opened_urls: Vec<String>,
    exit_calls: usize,
    exit_code: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct MockHost(Arc<Mutex<HostLog>>);

impl MockHost {
    fn log(&self) -> std::sync::MutexGuard<'_, HostLog> {
        self.0.lock().unwrap()
    }

    pub fn built(&self, name: WindowName) -> usize {
        self.log().windows.iter().filter(|window| window.name == name).count()
    }

    pub fn has_tray(&self) -> bool {
        self.log().tray.is_some()
    }

    pub fn trays_created(&self) -> usize {
        self.log().trays_created
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.log().opened_urls.clone()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.log().exit_code
    }

    pub fn exit_calls(&self) -> usize {
        self.log().exit_calls
    }
}

#[derive(Debug, Clone)]
pub struct MockWindow {
    id: usize,
    host: MockHost,
}

impl MockWindow {
    fn with<T>(&self, f: impl FnOnce(&mut WindowRecord) -> T) -> T {
        f(&mut self.host.log().windows[self.id])
    }

    fn alive<T>(&self, f: impl FnOnce(&mut WindowRecord) -> T) -> Result<T> {
        self.with(|window| {
            if window.destroyed {
                bail!("window {} is destroyed", window.name);
            }
            Ok(f(window))
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn set_bounds(&self, bounds: Bounds) {
        self.with(|window| window.bounds = bounds);
    }

    pub fn set_maximized(&self, maximized: bool) {
        self.with(|window| window.maximized = maximized);
    }

    pub fn is_destroyed(&self) -> bool {
        self.with(|window| window.destroyed)
    }

    pub fn maximized(&self) -> bool {
        self.with(|window| window.maximized)
    }

    pub fn minimized(&self) -> bool {
        self.with(|window| window.minimized)
    }

    pub fn focus_count(&self) -> usize {
        self.with(|window| window.focus_count)
    }

    pub fn bounds_reads(&self) -> usize {
        self.with(|window| window.bounds_reads)
    }

    pub fn reloads(&self) -> usize {
        self.with(|window| window.reloads)
    }

    pub fn url(&self) -> String {
        self.with(|window| window.url.clone())
    }

    pub fn menu(&self) -> Vec<MenuItem> {
        self.with(|window| window.menu.clone())
    }
}

impl HostWindow for MockWindow {
    fn focus(&self) -> Result<()> {
        self.alive(|window| {
            window.minimized = false;
            window.focus_count += 1;
        })
    }

    fn minimize(&self) -> Result<()> {
        self.alive(|window| window.minimized = true)
    }

    fn maximize(&self) -> Result<()> {
        self.alive(|window| window.maximized = true)
    }

    fn unmaximize(&self) -> Result<()> {
        self.alive(|window| window.maximized = false)
    }

    fn is_maximized(&self) -> Result<bool> {
        self.alive(|window| window.maximized)
    }

    fn bounds(&self) -> Result<Bounds> {
        self.alive(|window| {
            window.bounds_reads += 1;
            window.bounds
        })
    }

    fn navigate(&self, url: &str) -> Result<()> {
        self.alive(|window| window.url = url.to_owned())
    }

    fn reload(&self) -> Result<()> {
        self.alive(|window| window.reloads += 1)
    }

    fn set_menu(&self, items: &'static [MenuItem]) -> Result<()> {
        self.alive(|window| window.menu = items.to_vec())
    }

    fn destroy(&self) -> Result<()> {
        self.alive(|window| window.destroyed = true)
    }
}

impl WindowHost for MockHost {
    type Window = MockWindow;
    type Tray = u64;

    fn build_window(&self, name: WindowName, options: &WindowOptions) -> Result<MockWindow> {
        let mut log = self.log();
        if log.windows.iter().any(|window| window.name == name && !window.destroyed) {
            bail!("a {name} window already exists");
        }

        let (x, y) = options.position.unwrap_or_default();
        let url = match &options.url {
            WindowUrl::App(page) => page.clone(),
            WindowUrl::External(url) => url.clone(),
        };
        log.windows.push(WindowRecord {
            name,
            url,
            bounds: Bounds {
                x,
                y,
                width: options.size.0,
                height: options.size.1,
            },
            maximized: false,
            minimized: false,
            destroyed: false,
            focus_count: 0,
            bounds_reads: 0,
            reloads: 0,
            menu: options.menu.to_vec(),
        });

        Ok(MockWindow {
            id: log.windows.len() - 1,
            host: self.clone(),
        })
    }

    fn create_tray(&self, menu: &'static [MenuItem]) -> Result<u64> {
        assert_eq!(menu, &MenuItem::TRAY);
        let mut log = self.log();
        if log.tray.is_some() {
            bail!("tray already exists");
        }
        log.next_tray += 1;
        log.trays_created += 1;
        log.tray = Some(log.next_tray);
        Ok(log.next_tray)
    }

    fn destroy_tray(&self, tray: u64) -> Result<()> {
        let mut log = self.log();
        if log.tray != Some(tray) {
            bail!("unknown tray {tray}");
        }
        log.tray = None;
        Ok(())
    }

    fn open_external(&self, url: &str) -> Result<()> {
        self.log().opened_urls.push(url.to_owned());
        Ok(())
    }

    fn exit(&self, code: i32) {
        let mut log = self.log();
        log.exit_calls += 1;
        log.exit_code = Some(code);
    }
}
