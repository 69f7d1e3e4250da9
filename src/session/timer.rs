//! Cancellable scheduled callbacks.
//!
//! The session never sleeps or spawns. It records *when* something should
//! happen; the host wakes it up (via `tick` or by firing a handle) and the
//! slot decides whether the wake-up is still current.
//!
//! ## Usage
//!
//! ```
//! use emoji_pair::core::Timestamp;
//! use emoji_pair::session::TimerSlot;
//!
//! let mut slot = TimerSlot::new();
//! let stale = slot.schedule(Timestamp::from_millis(100), "first");
//! let fresh = slot.schedule(Timestamp::from_millis(200), "second");
//!
//! // Scheduling again cancelled the first callback
//! assert_eq!(slot.fire(stale), None);
//! assert_eq!(slot.fire(fresh), Some("second"));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::Timestamp;

/// Identifies one scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

#[derive(Clone, Debug)]
struct Scheduled<T> {
    handle: TimerHandle,
    due: Timestamp,
    payload: T,
}

/// Holds at most one outstanding callback.
#[derive(Clone, Debug)]
pub struct TimerSlot<T> {
    scheduled: Option<Scheduled<T>>,
    next_handle: u64,
}

impl<T> Default for TimerSlot<T> {
    fn default() -> Self {
        Self {
            scheduled: None,
            next_handle: 0,
        }
    }
}

impl<T> TimerSlot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` for `due`, cancelling anything outstanding.
    pub fn schedule(&mut self, due: Timestamp, payload: T) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.scheduled = Some(Scheduled {
            handle,
            due,
            payload,
        });
        handle
    }

    /// Cancel the outstanding callback, returning its handle.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.scheduled.take().map(|s| s.handle)
    }

    /// Is anything scheduled?
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.scheduled.is_some()
    }

    /// Handle and due time of the outstanding callback.
    #[must_use]
    pub fn pending(&self) -> Option<(TimerHandle, Timestamp)> {
        self.scheduled.as_ref().map(|s| (s.handle, s.due))
    }

    /// Due time of the outstanding callback.
    #[must_use]
    pub fn due(&self) -> Option<Timestamp> {
        self.scheduled.as_ref().map(|s| s.due)
    }

    /// Fire by handle. Returns the payload only if `handle` is still current.
    pub fn fire(&mut self, handle: TimerHandle) -> Option<T> {
        if self.scheduled.as_ref().is_some_and(|s| s.handle == handle) {
            self.scheduled.take().map(|s| s.payload)
        } else {
            None
        }
    }

    /// Fire by time. Returns the payload if it is due at `now`.
    pub fn take_due(&mut self, now: Timestamp) -> Option<T> {
        if self.scheduled.as_ref().is_some_and(|s| s.due <= now) {
            self.scheduled.take().map(|s| s.payload)
        } else {
            None
        }
    }
}

/// Periodic display refresh.
///
/// Only runs between `start` and `stop`; a poll after `stop` never fires.
#[derive(Clone, Debug)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Timestamp>,
}

impl Ticker {
    /// A stopped ticker with the given period.
    ///
    /// A zero period is treated as one millisecond.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    /// Start (or restart) ticking from `now`.
    pub fn start(&mut self, now: Timestamp) {
        self.next_due = Some(now.after(self.period));
    }

    /// Stop ticking.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// When the next refresh is due.
    #[must_use]
    pub fn next_due(&self) -> Option<Timestamp> {
        self.next_due
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Fire if due. Missed periods collapse into one refresh.
    pub fn poll(&mut self, now: Timestamp) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(now.after(self.period));
                true
            }
            _ => false,
        }
    }
}
