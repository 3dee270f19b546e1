use std::time::Duration;

use tracing::{debug, info};

use super::timer::{TimerDriver, TimerId};
use crate::session::{Clock, KeyValueStore, SessionManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// No timer pending: before the first arm, after firing, or after logout
    Idle,
    /// Exactly one timer pending; only this id may expire the session
    Armed(TimerId),
}

/// Shown to the user when the idle timer expires their session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleNotice;

impl IdleNotice {
    pub const MESSAGE: &'static str =
        "Your session will expire due to inactivity. Please refresh to continue.";

    pub fn message(&self) -> &'static str {
        Self::MESSAGE
    }
}

/// Debounced idle timer for one session
pub struct IdleMonitor<T> {
    timers: T,
    timeout: Duration,
    state: MonitorState,
    expirations: u64,
}

impl<T: TimerDriver> IdleMonitor<T> {
    pub fn new(timers: T, timeout: Duration) -> Self {
        Self {
            timers,
            timeout,
            state: MonitorState::Idle,
            expirations: 0,
        }
    }

    /// Schedule a fresh timer, cancelling any pending one
    pub fn arm(&mut self) -> TimerId {
        if let MonitorState::Armed(previous) = self.state {
            self.timers.cancel(previous);
        }
        let id = self.timers.arm(self.timeout);
        self.state = MonitorState::Armed(id);
        id
    }

    /// Record an activity signal: refresh the session and rearm.
    ///
    /// Ignored while idle. If the session can no longer be refreshed the
    /// pending timer is left to fire.
    pub fn activity<S: KeyValueStore, C: Clock>(
        &mut self,
        session: &mut SessionManager<S, C>,
    ) -> bool {
        if self.state == MonitorState::Idle {
            return false;
        }
        if !session.refresh() {
            debug!("Activity after expiry, leaving timer in place");
            return false;
        }
        self.arm();
        true
    }

    /// Handle a fired timer. Ids other than the armed one are stale and ignored.
    pub fn fire<S: KeyValueStore, C: Clock>(
        &mut self,
        id: TimerId,
        session: &mut SessionManager<S, C>,
    ) -> Option<IdleNotice> {
        if self.state != MonitorState::Armed(id) {
            debug!(%id, "Ignoring stale timer");
            return None;
        }
        session.invalidate();
        self.state = MonitorState::Idle;
        self.expirations += 1;
        info!("Session expired after {} minutes idle", self.timeout.as_secs() / 60);
        Some(IdleNotice)
    }

    /// Cancel any pending timer (logout)
    pub fn stop(&mut self) {
        if let MonitorState::Armed(id) = self.state {
            self.timers.cancel(id);
        }
        self.state = MonitorState::Idle;
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, MonitorState::Armed(_))
    }

    /// Number of times this monitor has expired a session
    pub fn expirations(&self) -> u64 {
        self.expirations
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }
}
