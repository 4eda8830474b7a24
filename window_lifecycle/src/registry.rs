use std::sync::{Mutex, PoisonError};

use crate::window::{WindowConfig, WindowName};

/// One slot per [`WindowName`]: the window's static config and its live handle, if any.
///
/// Handles are cloned out of the registry so that the lock is never held while the host runs.
#[derive(Debug)]
pub struct WindowRegistry<W> {
    configs: [WindowConfig; 4],
    slots: Mutex<[Option<W>; 4]>,
}

impl<W: Clone> WindowRegistry<W> {
    pub fn new(configs: [WindowConfig; 4]) -> Self {
        Self {
            configs,
            slots: Mutex::new(std::array::from_fn(|_| None)),
        }
    }

    pub fn config(&self, name: WindowName) -> &WindowConfig {
        &self.configs[name.index()]
    }

    pub fn get(&self, name: WindowName) -> Option<W> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)[name.index()].clone()
    }

    pub fn is_open(&self, name: WindowName) -> bool {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)[name.index()].is_some()
    }

    /// Returns the handle that was replaced, which should never exist.
    pub fn insert(&self, name: WindowName, window: W) -> Option<W> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)[name.index()].replace(window)
    }

    pub fn take(&self, name: WindowName) -> Option<W> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)[name.index()].take()
    }

    pub fn live(&self) -> Vec<(WindowName, W)> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        WindowName::ALL
            .into_iter()
            .filter_map(|name| slots[name.index()].clone().map(|window| (name, window)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_independent() {
        let registry = WindowRegistry::new(WindowConfig::defaults("test"));
        assert!(registry.insert(WindowName::About, 1).is_none());
        assert!(registry.insert(WindowName::Web, 2).is_none());

        assert_eq!(registry.get(WindowName::About), Some(1));
        assert!(!registry.is_open(WindowName::Main));
        assert_eq!(registry.live(), vec![(WindowName::About, 1), (WindowName::Web, 2)]);

        assert_eq!(registry.take(WindowName::About), Some(1));
        assert_eq!(registry.take(WindowName::About), None);
        assert_eq!(registry.live(), vec![(WindowName::Web, 2)]);
    }

    #[test]
    fn insert_reports_replaced_handle() {
        let registry = WindowRegistry::new(WindowConfig::defaults("test"));
        registry.insert(WindowName::Main, "a");
        assert_eq!(registry.insert(WindowName::Main, "b"), Some("a"));
        assert_eq!(registry.config(WindowName::Main).title, "test");
    }
}
