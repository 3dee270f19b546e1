//! Core library for the portalgate staff dashboard.
//!
//! Provides the pieces behind the login screen and the idle logout:
//! - `auth`: the fixed credential table and the authenticator
//! - `session`: tab-scoped session state with a sliding idle window
//! - `monitor`: the debounced idle-timeout timer
//! - `portal`: a facade that wires the three together
//! - `dashboard`: canned module content shown after login

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod monitor;
pub mod portal;
pub mod session;
pub mod utils;

pub use auth::{AuthError, Authenticator, CredentialStore, Role, UserRecord};
pub use config::Config;
pub use monitor::{
    IdleMonitor, IdleNotice, MonitorState, TimerDriver, TimerEvents, TimerId, TokioTimers,
    VirtualTimers,
};
pub use portal::Portal;
pub use session::{
    Clock, KeyValueStore, ManualClock, MemoryStore, Session, SessionError, SessionManager,
    SessionUser, TokioClock, IDLE_TIMEOUT,
};
