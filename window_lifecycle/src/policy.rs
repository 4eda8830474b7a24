/// How a window reacts to a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosePolicy {
    /// Hides into the tray when `runInTray` is set, quits the application otherwise.
    Main,
    /// Destroyed on close and recreated on the next show.
    Side,
}

/// What to do with a close request, in the order the fields are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseDecision {
    /// prevent the host from closing the window itself
    pub suppress: bool,
    pub persist: bool,
    pub destroy: bool,
    pub quit: bool,
}

impl CloseDecision {
    /// Leave the request to the host; used for windows the coordinator doesn't own.
    pub const IGNORE: Self = Self {
        suppress: false,
        persist: false,
        destroy: false,
        quit: false,
    };

    const LET_CLOSE: Self = Self {
        suppress: false,
        persist: true,
        destroy: false,
        quit: false,
    };

    const DESTROY: Self = Self {
        suppress: true,
        persist: true,
        destroy: true,
        quit: false,
    };

    const QUIT: Self = Self {
        suppress: false,
        persist: true,
        destroy: false,
        quit: true,
    };
}

impl ClosePolicy {
    /// Once the application is quitting, windows are allowed to close normally.
    pub fn decide(self, run_in_tray: bool, quitting: bool) -> CloseDecision {
        if quitting {
            return CloseDecision::LET_CLOSE;
        }

        match self {
            ClosePolicy::Main if !run_in_tray => CloseDecision::QUIT,
            ClosePolicy::Main | ClosePolicy::Side => CloseDecision::DESTROY,
        }
    }
}
