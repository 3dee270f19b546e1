//! Session management for the dashboard.
//!
//! This module provides:
//! - `SessionManager`: create/read/refresh/invalidate over a key-value store
//! - `KeyValueStore`: the storage capability (`MemoryStore` is tab-scoped)
//! - `Clock`: the time source (`TokioClock`, or `ManualClock` for virtual time)
//!
//! Sessions slide: they stay valid while activity keeps arriving within
//! 30 minutes of the last one.

pub mod clock;
pub mod error;
pub mod manager;
pub mod storage;

pub use clock::{Clock, ManualClock, TokioClock};
pub use error::SessionError;
pub use manager::{Session, SessionManager, SessionUser, IDLE_TIMEOUT};
pub use storage::{KeyValueStore, MemoryStore};
