use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::policy::ClosePolicy;
use crate::Error;

/// The fixed set of windows the application knows about.
/// The string form doubles as the host's window label.
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WindowName {
    Main,
    Settings,
    About,
    Web,
}

impl WindowName {
    pub const ALL: [WindowName; 4] = [WindowName::Main, WindowName::Settings, WindowName::About, WindowName::Web];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        self.into()
    }
}

impl Display for WindowName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WindowName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindowName::ALL
            .into_iter()
            .find(|name| name.label() == s)
            .ok_or_else(|| Error::InvalidWindowName(s.to_owned()))
    }
}

/// Where a window loads its content from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEntry {
    /// a page bundled with the application
    App(&'static str),
    /// a remote page, shown without access to the application's IPC
    External(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Settings / About, plus Exit while the application lives in the tray
    Main,
    Empty,
}

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: &'static str,
    pub entry: WindowEntry,
    pub default_size: (u32, u32),
    pub min_size: (u32, u32),
    pub resizable: bool,
    pub maximizable: bool,
    pub fullscreenable: bool,
    pub menu: MenuKind,
    pub close_policy: ClosePolicy,
}

impl WindowConfig {
    pub fn external_content(&self) -> bool {
        matches!(self.entry, WindowEntry::External(_))
    }

    /// The configuration every window starts with.
    pub fn defaults(app_name: &'static str) -> [WindowConfig; 4] {
        [
            WindowConfig {
                title: app_name,
                entry: WindowEntry::App("index.html"),
                default_size: (1100, 700),
                min_size: (800, 450),
                resizable: true,
                maximizable: true,
                fullscreenable: true,
                menu: MenuKind::Main,
                close_policy: ClosePolicy::Main,
            },
            WindowConfig {
                title: "Settings",
                entry: WindowEntry::App("settings.html"),
                default_size: (650, 700),
                min_size: (450, 400),
                resizable: true,
                maximizable: false,
                fullscreenable: false,
                menu: MenuKind::Empty,
                close_policy: ClosePolicy::Side,
            },
            WindowConfig {
                title: "",
                entry: WindowEntry::App("about.html"),
                default_size: (650, 250),
                min_size: (650, 250),
                resizable: false,
                maximizable: false,
                fullscreenable: false,
                menu: MenuKind::Empty,
                close_policy: ClosePolicy::Side,
            },
            WindowConfig {
                title: app_name,
                entry: WindowEntry::External("https://coh2stats.com/"),
                default_size: (1200, 800),
                min_size: (600, 400),
                resizable: true,
                maximizable: true,
                fullscreenable: true,
                menu: MenuKind::Empty,
                close_policy: ClosePolicy::Side,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for name in WindowName::ALL {
            assert_eq!(name.label().parse::<WindowName>().unwrap(), name);
        }
        assert_eq!(WindowName::Settings.label(), "settings");
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "overlay".parse::<WindowName>().unwrap_err();
        assert!(matches!(err, Error::InvalidWindowName(label) if label == "overlay"));
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, name) in WindowName::ALL.into_iter().enumerate() {
            assert_eq!(name.index(), i);
        }
    }

    #[test]
    fn only_the_web_window_shows_external_content() {
        let configs = WindowConfig::defaults("test");
        let external: Vec<_> = WindowName::ALL
            .into_iter()
            .filter(|name| configs[name.index()].external_content())
            .collect();
        assert_eq!(external, vec![WindowName::Web]);
        assert_eq!(configs[WindowName::Main.index()].close_policy, ClosePolicy::Main);
    }
}
