//! The seam between the coordinator and the GUI toolkit that owns the real windows.

use anyhow::Result;

use crate::state::{Bounds, WindowState};
use crate::window::{MenuKind, WindowConfig, WindowEntry, WindowName};

/// Entries of the main window menu and of the tray menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum MenuItem {
    Settings,
    About,
    Exit,
}

impl MenuItem {
    pub const TRAY: [MenuItem; 3] = [MenuItem::Settings, MenuItem::About, MenuItem::Exit];
    const MAIN: [MenuItem; 2] = [MenuItem::Settings, MenuItem::About];

    pub fn id(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Settings => "Settings",
            MenuItem::About => "About",
            MenuItem::Exit => "Exit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        MenuItem::TRAY.into_iter().find(|item| item.id() == id)
    }

    /// Exit is only offered while closing the main window keeps the application in the tray.
    pub fn window_menu(kind: MenuKind, run_in_tray: bool) -> &'static [MenuItem] {
        match kind {
            MenuKind::Main if run_in_tray => &MenuItem::TRAY,
            MenuKind::Main => &MenuItem::MAIN,
            MenuKind::Empty => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowUrl {
    App(String),
    External(String),
}

/// Everything the host needs to build a window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOptions {
    pub title: &'static str,
    pub url: WindowUrl,
    pub size: (u32, u32),
    /// `None` for windows that can't be resized
    pub min_size: Option<(u32, u32)>,
    /// `None` centers the window
    pub position: Option<(i32, i32)>,
    pub resizable: bool,
    pub maximizable: bool,
    pub fullscreenable: bool,
    pub maximized: bool,
    pub menu: &'static [MenuItem],
    pub dev_tools: bool,
}

impl WindowOptions {
    pub fn resolve(
        config: &WindowConfig,
        state: &WindowState,
        url: Option<String>,
        menu: &'static [MenuItem],
        dev_tools: bool,
    ) -> Self {
        let size = if config.resizable {
            (state.width.max(config.min_size.0), state.height.max(config.min_size.1))
        } else {
            config.default_size
        };

        let url = match (url, &config.entry) {
            (Some(url), _) => WindowUrl::External(url),
            (None, WindowEntry::App(page)) => WindowUrl::App((*page).to_owned()),
            (None, WindowEntry::External(url)) => WindowUrl::External((*url).to_owned()),
        };

        Self {
            title: config.title,
            url,
            size,
            min_size: config.resizable.then_some(config.min_size),
            position: state.x.zip(state.y),
            resizable: config.resizable,
            maximizable: config.maximizable,
            fullscreenable: config.fullscreenable,
            maximized: config.maximizable && state.maximized,
            menu,
            dev_tools,
        }
    }
}

pub trait HostWindow: Clone + Send + Sync + 'static {
    /// Unminimize, show and focus.
    fn focus(&self) -> Result<()>;
    fn minimize(&self) -> Result<()>;
    fn maximize(&self) -> Result<()>;
    fn unmaximize(&self) -> Result<()>;
    fn is_maximized(&self) -> Result<bool>;
    /// Current position and size in logical pixels.
    fn bounds(&self) -> Result<Bounds>;
    fn navigate(&self, url: &str) -> Result<()>;
    fn reload(&self) -> Result<()>;
    fn set_menu(&self, items: &'static [MenuItem]) -> Result<()>;
    /// Close without emitting a close request.
    fn destroy(&self) -> Result<()>;
}

pub trait WindowHost: Send + Sync + 'static {
    type Window: HostWindow;
    type Tray: Send + 'static;

    fn build_window(&self, name: WindowName, options: &WindowOptions) -> Result<Self::Window>;

    /// The tray icon shows `menu` as context menu and reports clicks on the icon itself.
    fn create_tray(&self, menu: &'static [MenuItem]) -> Result<Self::Tray>;
    fn destroy_tray(&self, tray: Self::Tray) -> Result<()>;

    fn open_external(&self, url: &str) -> Result<()>;

    fn exit(&self, code: i32);
}
