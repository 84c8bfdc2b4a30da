//! Delayed launch steps bound to the lifetime of the page.
//!
//! The avatar click schedules two timers. Both consult a shared
//! `CancellationToken`; once it is cancelled neither step does anything, and
//! each step runs at most once even if its timer somehow fires twice.

use std::cell::Cell;
use std::rc::Rc;

/// Single-threaded cancellation flag shared between a scheduler and the
/// callbacks it arms. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaunchStep {
    /// Fade the page to white.
    Fade,
    /// Tear the page down and start the scene.
    Start,
}

#[derive(Debug, Default)]
pub struct LaunchSequence {
    token: CancellationToken,
    faded: Cell<bool>,
    started: Cell<bool>,
}

impl LaunchSequence {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            faded: Cell::new(false),
            started: Cell::new(false),
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Claim `step`. Returns true exactly once per step, and never after
    /// cancellation.
    pub fn fire(&self, step: LaunchStep) -> bool {
        if self.token.is_cancelled() {
            log::debug!("[launch] {:?} skipped, cancelled", step);
            return false;
        }
        let flag = match step {
            LaunchStep::Fade => &self.faded,
            LaunchStep::Start => &self.started,
        };
        !flag.replace(true)
    }
}
