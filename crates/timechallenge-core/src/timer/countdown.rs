//! Single-shot countdown timers.
//!
//! `ChallengeTimer` is a wall-clock-driven registry of pending delays. It
//! does not use internal threads - the caller is responsible for calling
//! `tick()` periodically, which invokes every callback whose deadline has
//! been reached.
//!
//! ## Guarantees
//!
//! - A callback runs at most once per `arm`, and never after `cancel`.
//! - A callback never runs before its full duration has elapsed on the clock.
//! - `cancel` is synchronous and idempotent: once it returns, the callback
//!   can no longer run, and cancelling a fired or unknown handle is a no-op.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = ChallengeTimer::new(SystemClock::new());
//! let handle = timer.arm(Duration::from_secs(5), || println!("lost"))?;
//! // In a loop:
//! timer.tick();
//! // Or, before it fires:
//! timer.cancel(handle);
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::clock::Clock;
use crate::error::ChallengeError;

/// Opaque cancellation token returned by [`ChallengeTimer::arm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

struct PendingTimer {
    handle: TimerHandle,
    deadline: Duration,
    on_fire: Box<dyn FnOnce() + Send>,
}

/// Registry of armed single-shot delays driven by a [`Clock`].
pub struct ChallengeTimer<C: Clock> {
    clock: C,
    next_id: u64,
    /// Kept sorted by (deadline, handle) so `tick` fires in order.
    pending: Vec<PendingTimer>,
}

impl<C: Clock> ChallengeTimer<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Schedule `on_fire` to run once `duration` has elapsed.
    ///
    /// # Errors
    ///
    /// Returns [`ChallengeError::InvalidDuration`] for a zero duration.
    pub fn arm<F>(&mut self, duration: Duration, on_fire: F) -> Result<TimerHandle, ChallengeError>
    where
        F: FnOnce() + Send + 'static,
    {
        if duration.is_zero() {
            return Err(ChallengeError::InvalidDuration { secs: 0.0 });
        }

        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        let deadline = self.clock.now().saturating_add(duration);

        let pos = self
            .pending
            .partition_point(|p| (p.deadline, p.handle.0) < (deadline, handle.0));
        self.pending.insert(
            pos,
            PendingTimer {
                handle,
                deadline,
                on_fire: Box::new(on_fire),
            },
        );

        tracing::debug!(%handle, duration_ms = duration.as_millis() as u64, "timer armed");
        Ok(handle)
    }

    /// Release a pending timer so its callback never runs.
    ///
    /// Returns `true` if a pending registration was released, `false` if the
    /// handle had already fired or been cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.pending.iter().position(|p| p.handle == handle) {
            Some(idx) => {
                self.pending.remove(idx);
                tracing::debug!(%handle, "timer cancelled");
                true
            }
            None => {
                tracing::trace!(%handle, "cancel ignored, timer not pending");
                false
            }
        }
    }

    /// Call periodically. Runs every callback whose deadline has passed and
    /// returns how many fired.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now();
        let due = self.pending.partition_point(|p| p.deadline <= now);
        let fired: Vec<PendingTimer> = self.pending.drain(..due).collect();
        let count = fired.len();
        for timer in fired {
            tracing::debug!(handle = %timer.handle, "timer fired");
            (timer.on_fire)();
        }
        count
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Time left before `handle` fires, if it is still pending.
    pub fn remaining(&self, handle: TimerHandle) -> Option<Duration> {
        let now = self.clock.now();
        self.pending
            .iter()
            .find(|p| p.handle == handle)
            .map(|p| p.deadline.saturating_sub(now))
    }
}

impl<C: Clock + fmt::Debug> fmt::Debug for ChallengeTimer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChallengeTimer")
            .field("clock", &self.clock)
            .field("next_id", &self.next_id)
            .field(
                "pending",
                &self
                    .pending
                    .iter()
                    .map(|p| (p.handle, p.deadline))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
