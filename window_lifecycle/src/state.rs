use std::fmt;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::window::{WindowConfig, WindowName};

/// Logical position and size of a window as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Last known geometry of one window.
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: u32,
    pub height: u32,
    pub maximized: bool,
}

impl WindowState {
    pub fn with_size((width, height): (u32, u32)) -> Self {
        Self {
            x: None,
            y: None,
            width,
            height,
            maximized: false,
        }
    }

    /// The state to remember for a window that is about to go away.
    ///
    /// The bounds of a maximized window only describe the screen it is maximized on,
    /// so in that case the previous (restored) geometry is kept and `bounds` is never called.
    pub fn capture<E>(
        previous: &WindowState,
        maximized: bool,
        bounds: impl FnOnce() -> Result<Bounds, E>,
    ) -> Result<WindowState, E> {
        if maximized {
            return Ok(WindowState {
                maximized: true,
                ..previous.clone()
            });
        }

        let bounds = bounds()?;
        Ok(WindowState {
            x: Some(bounds.x),
            y: Some(bounds.y),
            width: bounds.width,
            height: bounds.height,
            maximized: false,
        })
    }
}

#[cfg_attr(feature = "specta", derive(specta::Type))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowStates {
    main: WindowState,
    settings: WindowState,
    about: WindowState,
    web: WindowState,
}

impl WindowStates {
    pub fn from_configs(configs: &[WindowConfig; 4]) -> Self {
        let state = |name: WindowName| WindowState::with_size(configs[name.index()].default_size);
        Self {
            main: state(WindowName::Main),
            settings: state(WindowName::Settings),
            about: state(WindowName::About),
            web: state(WindowName::Web),
        }
    }

    pub fn get(&self, window: WindowName) -> &WindowState {
        match window {
            WindowName::Main => &self.main,
            WindowName::Settings => &self.settings,
            WindowName::About => &self.about,
            WindowName::Web => &self.web,
        }
    }

    pub fn set(&mut self, window: WindowName, state: WindowState) {
        let slot = match window {
            WindowName::Main => &mut self.main,
            WindowName::Settings => &mut self.settings,
            WindowName::About => &mut self.about,
            WindowName::Web => &mut self.web,
        };
        *slot = state;
    }
}

impl Default for WindowStates {
    fn default() -> Self {
        Self::from_configs(&WindowConfig::defaults(""))
    }
}

// a broken entry only resets the geometry of its own window
impl<'de> Deserialize<'de> for WindowStates {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct WindowStatesVisitor;
        impl<'de> Visitor<'de> for WindowStatesVisitor {
            type Value = WindowStates;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("struct WindowStates")
            }

            fn visit_map<V>(self, mut map: V) -> Result<WindowStates, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut window_states = WindowStates::default();

                while let Some(key) = map.next_key::<String>()? {
                    let value = map.next_value::<serde_json::Value>()?;
                    if let Ok(window) = key.parse::<WindowName>() {
                        let default = window_states.get(window).clone();
                        window_states.set(window, value_or(value, default));
                    }
                }

                Ok(window_states)
            }
        }

        deserializer.deserialize_map(WindowStatesVisitor)
    }
}

#[cfg_attr(feature = "specta", derive(specta::Type))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayPosition {
    #[default]
    Top,
    Left,
}

#[cfg_attr(feature = "specta", derive(specta::Type))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSettings {
    #[serde(rename = "coh2LogFileFound")]
    pub log_file_found: bool,
    #[serde(rename = "coh2LogFileLocation")]
    pub log_file_location: String,
    pub update_interval: u32,
    pub run_in_tray: bool,
    pub open_links_in_browser: bool,
    pub game_notification: bool,
    pub stream_overlay: bool,
    pub stream_overlay_port: u16,
    pub stream_overlay_port_free: bool,
    pub stream_overlay_position: OverlayPosition,
}

const DEFAULT_UPDATE_INTERVAL: u32 = 2;
const DEFAULT_RUN_IN_TRAY: bool = true;
const DEFAULT_OPEN_LINKS_IN_BROWSER: bool = false;
const DEFAULT_GAME_NOTIFICATION: bool = true;
const DEFAULT_STREAM_OVERLAY: bool = false;
const DEFAULT_STREAM_OVERLAY_PORT: u16 = 47824;
const DEFAULT_STREAM_OVERLAY_PORT_FREE: bool = true;

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            log_file_found: false,
            log_file_location: String::new(),
            update_interval: DEFAULT_UPDATE_INTERVAL,
            run_in_tray: DEFAULT_RUN_IN_TRAY,
            open_links_in_browser: DEFAULT_OPEN_LINKS_IN_BROWSER,
            game_notification: DEFAULT_GAME_NOTIFICATION,
            stream_overlay: DEFAULT_STREAM_OVERLAY,
            stream_overlay_port: DEFAULT_STREAM_OVERLAY_PORT,
            stream_overlay_port_free: DEFAULT_STREAM_OVERLAY_PORT_FREE,
            stream_overlay_position: OverlayPosition::default(),
        }
    }
}

// buffer every value so that a field with the wrong type only resets that field
fn value_or<T: DeserializeOwned>(value: serde_json::Value, default: T) -> T {
    serde_json::from_value(value).unwrap_or(default)
}

// custom deserializer that uses default values on deserialization errors instead of failing
impl<'de> Deserialize<'de> for ApplicationSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SettingsVisitor;
        impl<'de> Visitor<'de> for SettingsVisitor {
            type Value = ApplicationSettings;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("struct ApplicationSettings")
            }

            fn visit_map<V>(self, mut map: V) -> Result<ApplicationSettings, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut settings = ApplicationSettings::default();

                while let Some(key) = map.next_key::<String>()? {
                    let value = map.next_value::<serde_json::Value>()?;
                    match key.as_str() {
                        "coh2LogFileFound" => settings.log_file_found = value_or(value, false),
                        "coh2LogFileLocation" => settings.log_file_location = value_or(value, String::new()),
                        "updateInterval" => settings.update_interval = value_or(value, DEFAULT_UPDATE_INTERVAL),
                        "runInTray" => settings.run_in_tray = value_or(value, DEFAULT_RUN_IN_TRAY),
                        "openLinksInBrowser" => {
                            settings.open_links_in_browser = value_or(value, DEFAULT_OPEN_LINKS_IN_BROWSER);
                        }
                        "gameNotification" => {
                            settings.game_notification = value_or(value, DEFAULT_GAME_NOTIFICATION);
                        }
                        "streamOverlay" => settings.stream_overlay = value_or(value, DEFAULT_STREAM_OVERLAY),
                        "streamOverlayPort" => {
                            settings.stream_overlay_port = value_or(value, DEFAULT_STREAM_OVERLAY_PORT);
                        }
                        "streamOverlayPortFree" => {
                            settings.stream_overlay_port_free = value_or(value, DEFAULT_STREAM_OVERLAY_PORT_FREE);
                        }
                        "streamOverlayPosition" => {
                            settings.stream_overlay_position = value_or(value, OverlayPosition::default());
                        }
                        _ => { /* ignored */ }
                    }
                }

                Ok(settings)
            }
        }

        deserializer.deserialize_map(SettingsVisitor)
    }
}

/// Everything the application persists between runs.
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    pub settings: ApplicationSettings,
    pub window_states: WindowStates,
}

impl<'de> Deserialize<'de> for ApplicationState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct StateVisitor;
        impl<'de> Visitor<'de> for StateVisitor {
            type Value = ApplicationState;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("struct ApplicationState")
            }

            fn visit_map<V>(self, mut map: V) -> Result<ApplicationState, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut state = ApplicationState::default();

                while let Some(key) = map.next_key::<String>()? {
                    let value = map.next_value::<serde_json::Value>()?;
                    match key.as_str() {
                        "settings" => state.settings = value_or(value, ApplicationSettings::default()),
                        "windowStates" => state.window_states = value_or(value, WindowStates::default()),
                        _ => { /* ignored */ }
                    }
                }

                Ok(state)
            }
        }

        deserializer.deserialize_map(StateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn previous() -> WindowState {
        WindowState {
            x: Some(10),
            y: Some(20),
            width: 800,
            height: 600,
            maximized: false,
        }
    }

    #[test]
    fn maximized_capture_keeps_previous_bounds() {
        let state = WindowState::capture(&previous(), true, || -> Result<Bounds, ()> {
            panic!("bounds of a maximized window must not be read")
        })
        .unwrap();

        assert_eq!(
            state,
            WindowState {
                maximized: true,
                ..previous()
            }
        );
    }

    #[test]
    fn restored_capture_uses_live_bounds() {
        let bounds = Bounds {
            x: -5,
            y: 40,
            width: 1024,
            height: 768,
        };
        let state = WindowState::capture(&previous(), false, || Ok::<_, ()>(bounds)).unwrap();

        assert_eq!(
            state,
            WindowState {
                x: Some(-5),
                y: Some(40),
                width: 1024,
                height: 768,
                maximized: false,
            }
        );
    }

    #[test]
    fn failed_bounds_read_is_reported() {
        let result = WindowState::capture(&previous(), false, || Err("gone"));
        assert_eq!(result, Err("gone"));
    }

    #[test]
    fn window_states_default_from_config_sizes() {
        let states = WindowStates::default();
        let about = states.get(WindowName::About);
        assert_eq!((about.width, about.height), (650, 250));
        assert_eq!(about.x, None);
    }

    #[test]
    fn settings_fall_back_per_field() {
        let json = r#"{ "runInTray": "yes", "openLinksInBrowser": true, "streamOverlayPort": 70000, "unknown": 1 }"#;
        let settings: ApplicationSettings = serde_json::from_str(json).unwrap();

        assert!(settings.run_in_tray);
        assert!(settings.open_links_in_browser);
        assert_eq!(settings.stream_overlay_port, 47824);
    }

    #[test]
    fn state_survives_broken_sections() {
        let json = r#"{
            "settings": { "runInTray": false },
            "windowStates": { "main": { "x": 1, "y": 2, "width": 900, "height": 500, "maximized": true }, "web": 3 }
        }"#;
        let state: ApplicationState = serde_json::from_str(json).unwrap();

        assert!(!state.settings.run_in_tray);
        assert!(state.window_states.get(WindowName::Main).maximized);
        assert_eq!(state.window_states.get(WindowName::Web), WindowStates::default().get(WindowName::Web));

        let state: ApplicationState = serde_json::from_str(r#"{ "windowStates": { "main": { "x": 1, "y": 2, "width": 900, "height": 500, "maximized": true } } }"#).unwrap();
        assert!(state.window_states.get(WindowName::Main).maximized);
        assert_eq!(state.window_states.get(WindowName::Web), WindowStates::default().get(WindowName::Web));
    }

    #[test]
    fn broken_window_entry_keeps_the_others() {
        let json = r#"{
            "main": { "x": 1, "y": 2, "width": 900, "height": 500, "maximized": false },
            "settings": { "x": 7, "y": 8, "width": 500, "height": 450, "maximized": false },
            "web": { "x": 0, "y": 0, "width": -5, "height": 400, "maximized": false },
            "overlay": { "x": 3 }
        }"#;
        let states: WindowStates = serde_json::from_str(json).unwrap();

        assert_eq!(states.get(WindowName::Main).x, Some(1));
        assert_eq!(states.get(WindowName::Settings).x, Some(7));
        assert_eq!(states.get(WindowName::Settings).width, 500);
        assert_eq!(states.get(WindowName::Web), WindowStates::default().get(WindowName::Web));
        assert_eq!(states.get(WindowName::About), WindowStates::default().get(WindowName::About));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(ApplicationState::default()).unwrap();
        assert_eq!(value["settings"]["coh2LogFileFound"], false);
        assert_eq!(value["settings"]["streamOverlayPosition"], "top");
        assert_eq!(value["windowStates"]["main"]["width"], 1100);
    }
}
