//! Login flow wiring.
//!
//! `Portal` owns the authenticator, the session manager and the idle monitor,
//! and is the only thing a front end needs to talk to.

use tracing::info;

use crate::auth::{AuthError, Authenticator};
use crate::monitor::{IdleMonitor, IdleNotice, TimerDriver, TimerId};
use crate::session::{Clock, KeyValueStore, SessionError, SessionManager, SessionUser};

pub struct Portal<S, C, T> {
    authenticator: Authenticator,
    session: SessionManager<S, C>,
    monitor: IdleMonitor<T>,
}

impl<S: KeyValueStore, C: Clock, T: TimerDriver> Portal<S, C, T> {
    /// The monitor uses the session manager's idle timeout
    pub fn new(authenticator: Authenticator, session: SessionManager<S, C>, timers: T) -> Self {
        let monitor = IdleMonitor::new(timers, session.idle_timeout());
        Self {
            authenticator,
            session,
            monitor,
        }
    }

    /// Authenticate, start a session and arm the idle timer
    pub fn login(&mut self, identifier: &str, secret: &str) -> Result<SessionUser, AuthError> {
        let record = self.authenticator.authenticate(identifier, secret)?;
        let session = self.session.create(&record);
        self.monitor.arm();
        Ok(session.user)
    }

    pub fn logout(&mut self) {
        self.monitor.stop();
        self.session.invalidate();
        info!("Logged out");
    }

    /// Forward an opaque activity signal
    pub fn activity(&mut self) -> bool {
        self.monitor.activity(&mut self.session)
    }

    pub fn timer_fired(&mut self, id: TimerId) -> Option<IdleNotice> {
        self.monitor.fire(id, &mut self.session)
    }

    /// Protected-screen entry check. On failure the monitor is stopped too.
    pub fn check(&mut self) -> Result<SessionUser, SessionError> {
        let result = self.session.check();
        if result.is_err() {
            self.monitor.stop();
        }
        result
    }

    /// Pick up a session already in storage, arming the monitor if it is
    /// still valid
    pub fn resume(&mut self) -> Option<SessionUser> {
        match self.check() {
            Ok(user) => {
                self.monitor.arm();
                info!(user = %user.id, "Resumed existing session");
                Some(user)
            }
            Err(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.session.is_valid()
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.session.current_user()
    }

    pub fn session(&self) -> &SessionManager<S, C> {
        &self.session
    }

    pub fn monitor(&self) -> &IdleMonitor<T> {
        &self.monitor
    }

    pub fn monitor_mut(&mut self) -> &mut IdleMonitor<T> {
        &mut self.monitor
    }
}
