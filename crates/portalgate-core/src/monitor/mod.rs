//! Idle-timeout monitoring.
//!
//! A single pending timer is kept per session. Every activity signal cancels
//! it and schedules a fresh one; if it ever fires, the session is invalidated.
//! The timer only notifies: session validity is still decided by the stored
//! last-activity timestamp.

pub mod idle;
pub mod timer;

pub use idle::{IdleMonitor, IdleNotice, MonitorState};
pub use timer::{TimerDriver, TimerEvents, TimerId, TokioTimers, VirtualTimers};
