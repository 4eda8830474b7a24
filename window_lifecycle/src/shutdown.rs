use std::sync::atomic::{AtomicBool, Ordering};

/// Set once the application has started quitting. Windows may close for real from then on.
#[derive(Debug, Default)]
pub struct Shutdown(AtomicBool);

impl Shutdown {
    /// Returns whether shutdown had already been requested.
    pub fn set(&self) -> bool {
        self.0.swap(true, Ordering::AcqRel)
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
