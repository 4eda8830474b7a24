use serde::{Deserialize, Serialize};
use window_lifecycle::ApplicationState;

#[cfg_attr(test, derive(specta::Type, tauri_specta::Event))]
#[derive(Debug, Clone, strum_macros::IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(tag = "type")]
pub enum AppEvent {
    StateChanged { payload: ApplicationState },
}

pub trait EventManager {
    fn send_event(&self, event: AppEvent) -> anyhow::Result<()>;
}

impl EventManager for tauri::AppHandle {
    fn send_event(&self, event: AppEvent) -> anyhow::Result<()> {
        use tauri::Emitter;
        use AppEvent::*;

        // every window renders from the same state
        match &event {
            StateChanged { payload } => self.emit((&event).into(), payload)?,
        };

        Ok(())
    }
}
