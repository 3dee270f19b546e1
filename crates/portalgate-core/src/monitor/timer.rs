use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::session::{Clock, ManualClock};

/// Buffer size for fired timer ids.
/// The monitor keeps at most one timer live, so a small buffer is plenty.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Handle for a scheduled one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Scheduling capability for one-shot timers.
///
/// Fired ids are delivered by the driver's own mechanism and handed back to
/// the monitor, which ignores ids it no longer cares about.
pub trait TimerDriver {
    fn arm(&mut self, delay: Duration) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}

// ============================================================================
// Virtual timers
// ============================================================================

/// Timers driven by a `ManualClock`. Nothing fires until `advance` is called.
#[derive(Debug)]
pub struct VirtualTimers {
    clock: ManualClock,
    next_id: u64,
    pending: Vec<(i64, TimerId)>,
}

impl VirtualTimers {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Move the clock forward and return every timer that came due, in
    /// deadline order. Returned timers are no longer pending.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.clock.advance(by);
        let now = self.clock.now_millis();

        let mut due: Vec<(i64, TimerId)> = Vec::new();
        self.pending.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }
}

impl TimerDriver for VirtualTimers {
    fn arm(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let delay = i64::try_from(delay.as_millis()).unwrap_or(i64::MAX);
        let deadline = self.clock.now_millis().saturating_add(delay);
        self.pending.push((deadline, id));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|(_, pending)| *pending != id);
    }
}

// ============================================================================
// Tokio timers
// ============================================================================

/// Receiving end for `TokioTimers`. Kept apart from the driver so an event
/// loop can wait on it while the driver is owned elsewhere.
pub struct TimerEvents {
    rx: mpsc::Receiver<TimerId>,
}

impl TimerEvents {
    /// Wait for the next fired timer
    pub async fn recv(&mut self) -> Option<TimerId> {
        self.rx.recv().await
    }

    /// Next fired timer if one is already queued
    pub fn try_recv(&mut self) -> Option<TimerId> {
        self.rx.try_recv().ok()
    }
}

/// Timers backed by `tokio::time::sleep` tasks. Must be armed from within a
/// tokio runtime.
pub struct TokioTimers {
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
    tx: mpsc::Sender<TimerId>,
}

impl TokioTimers {
    pub fn new() -> (Self, TimerEvents) {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let timers = Self {
            next_id: 0,
            tasks: HashMap::new(),
            tx,
        };
        (timers, TimerEvents { rx })
    }
}

impl TimerDriver for TokioTimers {
    fn arm(&mut self, delay: Duration) -> TimerId {
        self.tasks.retain(|_, task| !task.is_finished());

        self.next_id += 1;
        let id = TimerId(self.next_id);
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the front end is shutting down
            let _ = tx.send(id).await;
        });
        self.tasks.insert(id, task);
        debug!(%id, delay_ms = delay.as_millis() as u64, "Timer armed");
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
            debug!(%id, "Timer cancelled");
        }
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}
