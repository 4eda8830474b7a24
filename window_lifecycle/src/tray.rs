/// What to do with the tray after the `runInTray` setting was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayTransition {
    Unchanged,
    /// create the tray icon
    Enter,
    /// show the main window, then remove the tray icon
    Leave,
}

impl TrayTransition {
    pub fn between(in_tray_mode: bool, run_in_tray: bool) -> Self {
        match (in_tray_mode, run_in_tray) {
            (false, true) => TrayTransition::Enter,
            (true, false) => TrayTransition::Leave,
            _ => TrayTransition::Unchanged,
        }
    }
}

/// The application is in tray mode exactly while it holds a tray handle.
#[derive(Debug)]
pub enum TrayMode<T> {
    NoTray,
    HasTray(T),
}

impl<T> Default for TrayMode<T> {
    fn default() -> Self {
        TrayMode::NoTray
    }
}

impl<T> TrayMode<T> {
    pub fn in_tray_mode(&self) -> bool {
        matches!(self, TrayMode::HasTray(_))
    }

    pub fn take(&mut self) -> Option<T> {
        match std::mem::replace(self, TrayMode::NoTray) {
            TrayMode::HasTray(tray) => Some(tray),
            TrayMode::NoTray => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions() {
        assert_eq!(TrayTransition::between(false, true), TrayTransition::Enter);
        assert_eq!(TrayTransition::between(true, false), TrayTransition::Leave);
        assert_eq!(TrayTransition::between(true, true), TrayTransition::Unchanged);
        assert_eq!(TrayTransition::between(false, false), TrayTransition::Unchanged);
    }

    #[test]
    fn take_leaves_no_tray() {
        let mut mode = TrayMode::HasTray(7);
        assert!(mode.in_tray_mode());
        assert_eq!(mode.take(), Some(7));
        assert!(!mode.in_tray_mode());
        assert_eq!(mode.take(), None);
    }
}
