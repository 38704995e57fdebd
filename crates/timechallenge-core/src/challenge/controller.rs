//! Challenge controller implementation.
//!
//! The controller owns one [`ChallengeTimer`] and at most one
//! [`ChallengeRun`]. Like the timer it has no internal thread: the host calls
//! `tick()` periodically and the controller turns timer fires into state
//! transitions.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Resolved(Won | Lost) -> Running -> ...
//! ```
//!
//! `start()` while Running and `stop()` outside Running are rejected with
//! [`ChallengeError::InvalidStateTransition`]; nothing is auto-restarted.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use chrono::Utc;

use super::dialog::ResultDialog;
use super::model::{Challenge, ChallengeRun, Outcome, RunState};
use crate::error::{ChallengeError, Operation};
use crate::events::Event;
use crate::timer::{ChallengeTimer, Clock, SystemClock};

/// Receives every event a controller produces, synchronously, in order.
pub trait ChallengeObserver {
    fn on_event(&mut self, event: &Event);
}

impl<F: FnMut(&Event)> ChallengeObserver for F {
    fn on_event(&mut self, event: &Event) {
        self(event)
    }
}

/// Observer that records events. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<Event>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Outcomes in the order they were reported.
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.events.borrow().iter().filter_map(Event::outcome).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl ChallengeObserver for EventLog {
    fn on_event(&mut self, event: &Event) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Presentation-facing state holder for one [`Challenge`].
pub struct ChallengeController<C: Clock = SystemClock> {
    challenge: Challenge,
    timer: ChallengeTimer<C>,
    run: Option<ChallengeRun>,
    runs_started: u32,
    /// Timer callbacks report the run number they were armed for.
    fired_tx: Sender<u32>,
    fired_rx: Receiver<u32>,
    observers: Vec<Box<dyn ChallengeObserver>>,
}

impl<C: Clock> ChallengeController<C> {
    pub fn new(challenge: Challenge, clock: C) -> Self {
        let (fired_tx, fired_rx) = mpsc::channel();
        Self {
            challenge,
            timer: ChallengeTimer::new(clock),
            run: None,
            runs_started: 0,
            fired_tx,
            fired_rx,
            observers: Vec::new(),
        }
    }

    /// Register an observer for every subsequent event.
    pub fn subscribe(&mut self, observer: impl ChallengeObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    pub fn state(&self) -> RunState {
        self.run.as_ref().map(|r| r.state()).unwrap_or(RunState::Idle)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state().outcome()
    }

    /// The current run, or the last resolved one.
    pub fn run(&self) -> Option<&ChallengeRun> {
        self.run.as_ref()
    }

    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }

    /// Number of armed timers; never more than one.
    pub fn pending_timers(&self) -> usize {
        self.timer.pending_count()
    }

    /// Time spent in the current run, frozen once it resolves.
    pub fn elapsed(&self) -> Duration {
        match &self.run {
            Some(run) => match run.resolved_elapsed() {
                Some(elapsed) => elapsed,
                None => self.timer.clock().now().saturating_sub(run.started_at()),
            },
            None => Duration::ZERO,
        }
    }

    /// Countdown until the timer fires.
    pub fn remaining(&self) -> Duration {
        self.challenge.target().saturating_sub(self.elapsed())
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let state = self.state();
        Event::StateSnapshot {
            title: self.challenge.title().to_string(),
            target_ms: self.challenge.target_ms(),
            state,
            status: state.status_label().to_string(),
            run: self.run.as_ref().map(|r| r.number()),
            elapsed_ms: self.elapsed().as_millis() as u64,
            remaining_ms: self.remaining().as_millis() as u64,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a new run from Idle or Resolved.
    ///
    /// # Errors
    ///
    /// [`ChallengeError::InvalidStateTransition`] while a run is in flight;
    /// the in-flight timer is left untouched.
    pub fn start(&mut self) -> Result<Event, ChallengeError> {
        let state = self.state();
        if state.is_running() {
            return Err(self.reject(Operation::Start, state));
        }

        let number = self.runs_started + 1;
        let started_at = self.timer.clock().now();
        let tx = self.fired_tx.clone();
        let handle = self.timer.arm(self.challenge.target(), move || {
            // The receiver lives as long as the controller.
            let _ = tx.send(number);
        })?;
        self.runs_started = number;
        self.run = Some(ChallengeRun::new(number, started_at, handle));

        tracing::info!(
            title = self.challenge.title(),
            run = number,
            target_ms = self.challenge.target_ms(),
            "challenge started"
        );
        let event = Event::ChallengeStarted {
            title: self.challenge.title().to_string(),
            run: number,
            target_ms: self.challenge.target_ms(),
            at: Utc::now(),
        };
        self.notify(&event);
        Ok(event)
    }

    /// Stop the running countdown in time and win.
    ///
    /// Timers that are already due fire first, so a stop that arrives after
    /// the deadline finds the run lost.
    ///
    /// # Errors
    ///
    /// [`ChallengeError::InvalidStateTransition`] unless a run is in flight.
    pub fn stop(&mut self) -> Result<Event, ChallengeError> {
        self.tick();

        let state = self.state();
        let now = self.timer.clock().now();
        let resolved = match self.run.as_mut() {
            Some(run) if run.state().is_running() => {
                let handle = run.resolve(Outcome::Won, now);
                Some((run.number(), run.resolved_elapsed().unwrap_or_default(), handle))
            }
            _ => None,
        };
        let Some((number, elapsed, handle)) = resolved else {
            return Err(self.reject(Operation::Stop, state));
        };
        if let Some(handle) = handle {
            self.timer.cancel(handle);
        }

        Ok(self.announce(Outcome::Won, number, elapsed))
    }

    /// The single start/stop button.
    pub fn toggle(&mut self) -> Result<Event, ChallengeError> {
        if self.state().is_running() {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Call periodically. Returns `Some(Event::ChallengeLost)` when the
    /// countdown runs out.
    pub fn tick(&mut self) -> Option<Event> {
        self.timer.tick();
        let mut lost = None;
        while let Ok(number) = self.fired_rx.try_recv() {
            if let Some(event) = self.on_timer_fired(number) {
                lost = Some(event);
            }
        }
        lost
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn on_timer_fired(&mut self, number: u32) -> Option<Event> {
        let now = self.timer.clock().now();
        let run = match self.run.as_mut() {
            Some(run) if run.number() == number && run.state().is_running() => run,
            _ => {
                tracing::debug!(run = number, "ignoring fire for inactive run");
                return None;
            }
        };
        run.resolve(Outcome::Lost, now);
        let elapsed = run.resolved_elapsed().unwrap_or_default();
        Some(self.announce(Outcome::Lost, number, elapsed))
    }

    /// Notify observers of a resolution and request the result dialog.
    fn announce(&mut self, outcome: Outcome, number: u32, elapsed: Duration) -> Event {
        let title = self.challenge.title().to_string();
        let elapsed_ms = elapsed.as_millis() as u64;
        tracing::info!(title = %title, run = number, %outcome, elapsed_ms, "challenge resolved");

        let event = match outcome {
            Outcome::Won => Event::ChallengeWon {
                title: title.clone(),
                run: number,
                elapsed_ms,
                remaining_ms: self.challenge.target().saturating_sub(elapsed).as_millis() as u64,
                at: Utc::now(),
            },
            Outcome::Lost => Event::ChallengeLost {
                title: title.clone(),
                run: number,
                target_ms: self.challenge.target_ms(),
                at: Utc::now(),
            },
        };
        self.notify(&event);

        let dialog = Event::ResultDialogRequested {
            title,
            run: number,
            dialog: ResultDialog::new(&self.challenge, outcome, elapsed),
            at: Utc::now(),
        };
        self.notify(&dialog);
        event
    }

    fn notify(&mut self, event: &Event) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }

    fn reject(&self, operation: Operation, state: RunState) -> ChallengeError {
        tracing::warn!(
            title = self.challenge.title(),
            %operation,
            %state,
            "rejected challenge transition"
        );
        ChallengeError::InvalidStateTransition { operation, state }
    }
}

impl<C: Clock + fmt::Debug> fmt::Debug for ChallengeController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChallengeController")
            .field("challenge", &self.challenge)
            .field("timer", &self.timer)
            .field("run", &self.run)
            .field("runs_started", &self.runs_started)
            .field("observers", &self.observers.len())
            .finish()
    }
}
