//! Window and tray lifecycle of the desktop application, independent of the GUI toolkit.
//!
//! The [`WindowCoordinator`] drives a [`WindowHost`] implementation. It reads and writes the
//! persisted [`ApplicationState`] through a [`StateStore`].

mod coordinator;
mod error;
mod host;
mod policy;
mod registry;
mod shutdown;
mod state;
mod store;
mod tray;
mod window;

#[cfg(test)]
mod testing;

pub use coordinator::{WindowCoordinator, EXIT_SUCCESS, PROFILE_URL};
pub use error::{Error, Result};
pub use host::{HostWindow, MenuItem, WindowHost, WindowOptions, WindowUrl};
pub use policy::{CloseDecision, ClosePolicy};
pub use registry::WindowRegistry;
pub use shutdown::Shutdown;
pub use state::{ApplicationSettings, ApplicationState, Bounds, OverlayPosition, WindowState, WindowStates};
pub use store::{reduce, Action, ApplicationStore, Listener, StateStore, SubscriptionId};
pub use tray::{TrayMode, TrayTransition};
pub use window::{MenuKind, WindowConfig, WindowEntry, WindowName};
