use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::state::{ApplicationState, OverlayPosition, WindowState};
use crate::window::WindowName;

/// Every mutation the application state supports.
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    SetLogFileFound(bool),
    SetLogFilePath(String),
    SetUpdateInterval(u32),
    SetRunInTray(bool),
    SetOpenLinksInBrowser(bool),
    SetGameNotification(bool),
    SetStreamOverlay(bool),
    SetStreamOverlayPort(i64),
    SetStreamOverlayPortFree(bool),
    SetStreamOverlayPosition(OverlayPosition),
    SetWindowState { window: WindowName, state: WindowState },
}

pub fn reduce(state: &mut ApplicationState, action: Action) {
    let settings = &mut state.settings;
    match action {
        Action::SetLogFileFound(found) => settings.log_file_found = found,
        Action::SetLogFilePath(path) => settings.log_file_location = path,
        Action::SetUpdateInterval(seconds) => settings.update_interval = seconds,
        Action::SetRunInTray(run_in_tray) => settings.run_in_tray = run_in_tray,
        Action::SetOpenLinksInBrowser(open) => settings.open_links_in_browser = open,
        Action::SetGameNotification(notify) => settings.game_notification = notify,
        Action::SetStreamOverlay(enabled) => settings.stream_overlay = enabled,
        Action::SetStreamOverlayPort(port) => match u16::try_from(port) {
            Ok(port) => settings.stream_overlay_port = port,
            Err(_) => log::warn!("ignoring invalid stream overlay port: {port}"),
        },
        Action::SetStreamOverlayPortFree(free) => settings.stream_overlay_port_free = free,
        Action::SetStreamOverlayPosition(position) => settings.stream_overlay_position = position,
        Action::SetWindowState { window, state: window_state } => state.window_states.set(window, window_state),
    }
}

pub type Listener = Box<dyn Fn(&ApplicationState) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Read, mutate and observe the application state.
pub trait StateStore: Send + Sync + 'static {
    fn get_state(&self) -> ApplicationState;

    fn dispatch(&self, action: Action);

    /// `listener` is called with the new state after every dispatch.
    fn subscribe(&self, listener: Listener) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

type SharedListener = Arc<dyn Fn(&ApplicationState) + Send + Sync>;

pub struct ApplicationStore {
    state: RwLock<ApplicationState>,
    listeners: Mutex<Vec<(SubscriptionId, SharedListener)>>,
    next_subscription: AtomicU64,
    file: Option<PathBuf>,
}

impl fmt::Debug for ApplicationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationStore")
            .field("state", &self.get_state())
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

impl ApplicationStore {
    /// A store that lives only in memory.
    pub fn new(state: ApplicationState) -> Self {
        Self {
            state: RwLock::new(state),
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            file: None,
        }
    }

    /// Loads the state from `file`, falling back to defaults if it is missing or unreadable.
    /// The parsed state is written back so the file and the in-memory state stay in sync.
    pub fn load(file: PathBuf) -> Self {
        let state = match fs::read_to_string(&file) {
            Ok(json) => serde_json::from_str::<ApplicationState>(&json).unwrap_or_else(|e| {
                log::warn!("failed to parse {}, using defaults: {e}", file.display());
                ApplicationState::default()
            }),
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    log::warn!("failed to read {}, using defaults: {e}", file.display());
                }
                ApplicationState::default()
            }
        };

        let store = Self {
            file: Some(file),
            ..Self::new(state)
        };
        store.persist(&store.get_state());
        store
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    fn persist(&self, state: &ApplicationState) {
        let Some(file) = self.file.as_deref() else {
            return;
        };
        if let Err(e) = write_state(file, state) {
            log::error!("failed to write {}: {e}", file.display());
        }
    }
}

fn write_state(file: &Path, state: &ApplicationState) -> crate::Result<()> {
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file, serde_json::to_string_pretty(state)?)?;
    Ok(())
}

impl StateStore for ApplicationStore {
    fn get_state(&self) -> ApplicationState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn dispatch(&self, action: Action) {
        log::debug!("dispatch: {action:?}");

        let (changed, snapshot) = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let before = state.clone();
            reduce(&mut state, action);
            (*state != before, state.clone())
        };

        if changed {
            self.persist(&snapshot);
        }

        // listeners may call back into the store
        let listeners: Vec<SharedListener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::from(listener)));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(subscription, _)| *subscription != id);
    }
}
