use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::host::{HostWindow, MenuItem, WindowHost, WindowOptions};
use crate::policy::CloseDecision;
use crate::registry::WindowRegistry;
use crate::shutdown::Shutdown;
use crate::state::{ApplicationState, WindowState};
use crate::store::{Action, StateStore, SubscriptionId};
use crate::tray::{TrayMode, TrayTransition};
use crate::window::{MenuKind, WindowConfig, WindowName};

pub const PROFILE_URL: &str = "https://coh2stats.com/players/";
pub const EXIT_SUCCESS: i32 = 0;

/// Owns the application's windows and its tray icon.
///
/// Windows are created on demand, their geometry is written to the store when they close and
/// close requests are routed through each window's [`ClosePolicy`](crate::ClosePolicy).
/// The tray follows the `runInTray` setting through a store subscription.
///
/// All methods are expected to run on the host's event loop. Internal locks are never held
/// while the host is called, since the host may report events back synchronously.
pub struct WindowCoordinator<H: WindowHost, S: StateStore> {
    host: H,
    store: Arc<S>,
    registry: WindowRegistry<H::Window>,
    tray: Mutex<TrayMode<H::Tray>>,
    shutdown: Shutdown,
    subscription: SubscriptionId,
    dev_tools: bool,
}

impl<H: WindowHost, S: StateStore> WindowCoordinator<H, S> {
    pub fn new(host: H, store: Arc<S>, configs: [WindowConfig; 4], dev_tools: bool) -> Arc<Self> {
        Arc::new_cyclic(|coordinator: &Weak<Self>| {
            let coordinator = coordinator.clone();
            let subscription = store.subscribe(Box::new(move |state| {
                if let Some(coordinator) = coordinator.upgrade() {
                    coordinator.on_state_changed(state);
                }
            }));

            Self {
                host,
                store,
                registry: WindowRegistry::new(configs),
                tray: Mutex::new(TrayMode::NoTray),
                shutdown: Shutdown::default(),
                subscription,
                dev_tools,
            }
        })
    }

    /// Creates the tray if configured and opens the startup windows.
    pub fn start(&self) {
        let settings = self.store.get_state().settings;
        if settings.run_in_tray {
            self.enter_tray_mode();
        }

        self.show(WindowName::Main);
        // nothing useful can be shown before the game's log file is configured
        if !settings.log_file_found {
            self.show(WindowName::Settings);
        }
    }

    /// Stops following the store.
    pub fn detach(&self) {
        self.store.unsubscribe(self.subscription);
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn is_open(&self, name: WindowName) -> bool {
        self.registry.is_open(name)
    }

    pub fn window(&self, name: WindowName) -> Option<H::Window> {
        self.registry.get(name)
    }

    pub fn in_tray_mode(&self) -> bool {
        self.tray.lock().unwrap_or_else(PoisonError::into_inner).in_tray_mode()
    }

    pub fn is_quitting(&self) -> bool {
        self.shutdown.get()
    }

    /// Creates the window if it isn't open, then brings it to the foreground.
    pub fn show(&self, name: WindowName) {
        self.open(name, None);
    }

    fn open(&self, name: WindowName, url: Option<String>) {
        if let Some(window) = self.registry.get(name) {
            if let Some(url) = url {
                if let Err(e) = window.navigate(&url) {
                    log::error!("failed to navigate {name} window to {url}: {e}");
                }
            }
            log::info!("focusing window: {name}");
            if let Err(e) = window.focus() {
                log::error!("failed to focus {name} window: {e}");
            }
            return;
        }

        let state = self.store.get_state();
        let config = self.registry.config(name);
        let menu = MenuItem::window_menu(config.menu, state.settings.run_in_tray);
        let options = WindowOptions::resolve(config, state.window_states.get(name), url, menu, self.dev_tools);

        let window = match self.host.build_window(name, &options) {
            Ok(window) => window,
            Err(e) => {
                log::error!("error creating window {name}: {e}");
                return;
            }
        };
        if self.registry.insert(name, window.clone()).is_some() {
            log::warn!("replaced a live {name} window");
        }

        if options.maximized {
            if let Err(e) = window.maximize() {
                log::error!("failed to maximize {name} window: {e}");
            }
        }
        if let Err(e) = window.focus() {
            log::error!("failed to focus {name} window: {e}");
        }
        log::info!("created window: {name}");
    }

    fn live(&self, name: WindowName) -> Option<H::Window> {
        let window = self.registry.get(name);
        if window.is_none() {
            log::debug!("no live {name} window");
        }
        window
    }

    pub fn minimize(&self, name: WindowName) {
        let Some(window) = self.live(name) else {
            return;
        };
        if let Err(e) = window.minimize() {
            log::error!("failed to minimize {name} window: {e}");
        }
    }

    /// Maximizes or restores the window and records the new flag.
    pub fn toggle_maximize(&self, name: WindowName) {
        let Some(window) = self.live(name) else {
            return;
        };
        if !self.registry.config(name).maximizable {
            log::debug!("{name} window can't be maximized");
            return;
        }

        let previous = self.store.get_state().window_states.get(name).clone();
        let maximized = window.is_maximized().unwrap_or_else(|e| {
            log::warn!("failed to get maximized state of {name} window: {e}");
            false
        });

        if maximized {
            if let Err(e) = window.unmaximize() {
                log::error!("failed to restore {name} window: {e}");
                return;
            }
            self.store.dispatch(Action::SetWindowState {
                window: name,
                state: WindowState {
                    maximized: false,
                    ..previous
                },
            });
        } else {
            // the restored bounds are only readable before maximizing
            let restored = WindowState::capture(&previous, false, || window.bounds());
            if let Err(e) = window.maximize() {
                log::error!("failed to maximize {name} window: {e}");
                return;
            }
            match restored {
                Ok(state) => self.store.dispatch(Action::SetWindowState {
                    window: name,
                    state: WindowState {
                        maximized: true,
                        ..state
                    },
                }),
                Err(e) => log::error!("failed to read bounds of {name} window: {e}"),
            }
        }
    }

    /// Closes the window as if the user had requested it.
    pub fn close(&self, name: WindowName) {
        let Some((window, decision)) = self.close_window(name, || {}) else {
            return;
        };

        // nobody else is going to close this window
        if !decision.destroy {
            if let Err(e) = window.destroy() {
                log::error!("failed to destroy {name} window: {e}");
            }
        }
        if decision.quit {
            self.quit();
        }
    }

    /// Handles a close request coming from the host (e.g. the window's X button).
    ///
    /// `prevent_close` is called before anything else happens if the host must not close the window.
    pub fn handle_close_requested(&self, name: WindowName, prevent_close: impl FnOnce()) -> CloseDecision {
        let Some((_, decision)) = self.close_window(name, prevent_close) else {
            return CloseDecision::IGNORE;
        };

        if decision.quit {
            self.quit();
        }
        decision
    }

    fn close_window(&self, name: WindowName, prevent_close: impl FnOnce()) -> Option<(H::Window, CloseDecision)> {
        let window = self.live(name)?;

        let state = self.store.get_state();
        let decision = self
            .registry
            .config(name)
            .close_policy
            .decide(state.settings.run_in_tray, self.shutdown.get());
        log::info!("closing window {name}: {decision:?}");

        if decision.suppress {
            prevent_close();
        }
        if decision.persist {
            self.save_window_state(name, &window, state.window_states.get(name));
        }

        // the slot is cleared before the handle goes away
        self.registry.take(name);
        if decision.destroy {
            if let Err(e) = window.destroy() {
                log::error!("failed to destroy {name} window: {e}");
            }
        }

        Some((window, decision))
    }

    /// Forgets a window the host destroyed. Windows closed through the coordinator are already gone.
    pub fn handle_destroyed(&self, name: WindowName) {
        if self.registry.take(name).is_some() {
            log::info!("window {name} was destroyed by the host");
        }
    }

    fn save_window_state(&self, name: WindowName, window: &H::Window, previous: &WindowState) {
        let maximized = window.is_maximized().unwrap_or_else(|e| {
            log::warn!("failed to get maximized state of {name} window: {e}");
            false
        });

        match WindowState::capture(previous, maximized, || window.bounds()) {
            Ok(state) => {
                log::info!("saving {name} window state: {state:?}");
                self.store.dispatch(Action::SetWindowState { window: name, state });
            }
            Err(e) => log::error!("failed to read bounds of {name} window: {e}"),
        }
    }

    /// Marks the application as quitting, saves the open windows and exits.
    pub fn quit(&self) {
        // must be set before any window is closed so that no close gets suppressed
        if self.shutdown.set() {
            return;
        }
        log::info!("quitting");

        let window_states = self.store.get_state().window_states;
        for (name, window) in self.registry.live() {
            self.save_window_state(name, &window, window_states.get(name));
        }

        self.host.exit(EXIT_SUCCESS);
    }

    /// Whether an exit requested by the host (e.g. after the last window closed) should be vetoed.
    pub fn should_prevent_exit(&self) -> bool {
        !self.is_quitting() && self.in_tray_mode()
    }

    pub fn handle_menu_item(&self, item: MenuItem) {
        match item {
            MenuItem::Settings => self.show(WindowName::Settings),
            MenuItem::About => self.show(WindowName::About),
            MenuItem::Exit => self.quit(),
        }
    }

    pub fn handle_tray_click(&self) {
        self.show(WindowName::Main);
    }

    /// Opens a player's profile page in the web window or in the system browser.
    pub fn show_profile(&self, player_id: &str) {
        let player_id = player_id.trim();
        if player_id.is_empty() {
            log::warn!("refusing to open the profile of an empty player id");
            return;
        }

        let url = format!("{PROFILE_URL}{player_id}");
        if self.store.get_state().settings.open_links_in_browser {
            if let Err(e) = self.host.open_external(&url) {
                log::error!("failed to open {url}: {e}");
            }
        } else {
            self.open(WindowName::Web, Some(url));
        }
    }

    pub fn reload_all_windows(&self) {
        for (name, window) in self.registry.live() {
            if let Err(e) = window.reload() {
                log::error!("failed to reload {name} window: {e}");
            }
        }
    }

    fn on_state_changed(&self, state: &ApplicationState) {
        match TrayTransition::between(self.in_tray_mode(), state.settings.run_in_tray) {
            TrayTransition::Unchanged => {}
            TrayTransition::Enter => self.enter_tray_mode(),
            TrayTransition::Leave => self.leave_tray_mode(),
        }
    }

    fn enter_tray_mode(&self) {
        if self.in_tray_mode() {
            return;
        }

        let tray = match self.host.create_tray(&MenuItem::TRAY) {
            Ok(tray) => tray,
            Err(e) => {
                log::error!("failed to create tray icon: {e}");
                return;
            }
        };
        let replaced = std::mem::replace(
            &mut *self.tray.lock().unwrap_or_else(PoisonError::into_inner),
            TrayMode::HasTray(tray),
        )
        .take();
        if let Some(replaced) = replaced {
            log::warn!("tray icon was created twice");
            self.destroy_tray(replaced);
        }
        log::info!("entered tray mode");

        self.refresh_window_menus(true);
    }

    fn leave_tray_mode(&self) {
        // the tray may be the only way back into the application
        self.show(WindowName::Main);

        let tray = self.tray.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(tray) = tray {
            self.destroy_tray(tray);
        }
        log::info!("left tray mode");

        self.refresh_window_menus(false);
    }

    fn destroy_tray(&self, tray: H::Tray) {
        if let Err(e) = self.host.destroy_tray(tray) {
            log::error!("failed to remove tray icon: {e}");
        }
    }

    fn refresh_window_menus(&self, run_in_tray: bool) {
        for (name, window) in self.registry.live() {
            let kind = self.registry.config(name).menu;
            if kind == MenuKind::Main {
                if let Err(e) = window.set_menu(MenuItem::window_menu(kind, run_in_tray)) {
                    log::error!("failed to update menu of {name} window: {e}");
                }
            }
        }
    }
}
