pub const APP_NAME: &str = "Coh2 Game Stats";
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const TRAY_ID: &str = "main";
pub const STATE_FILE: &str = "state.json";

pub mod exit {
    pub const ERROR: i32 = 1;
}
