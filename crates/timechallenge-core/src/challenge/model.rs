use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ChallengeError;
use crate::timer::TimerHandle;

/// A configured countdown with a display title.
///
/// Immutable once constructed; the target time is validated up front so a
/// controller can never arm a zero or negative delay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Challenge {
    title: String,
    target_time_secs: f64,
}

impl Challenge {
    /// # Errors
    ///
    /// Returns [`ChallengeError::InvalidDuration`] unless `target_time_secs`
    /// is finite and greater than zero.
    pub fn new(title: impl Into<String>, target_time_secs: f64) -> Result<Self, ChallengeError> {
        let invalid = ChallengeError::InvalidDuration {
            secs: target_time_secs,
        };
        if !target_time_secs.is_finite() || target_time_secs <= 0.0 {
            return Err(invalid);
        }
        // Too large for a Duration, or rounds down to nothing.
        match Duration::try_from_secs_f64(target_time_secs) {
            Ok(target) if !target.is_zero() => Ok(Self {
                title: title.into(),
                target_time_secs,
            }),
            _ => Err(invalid),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn target_time_secs(&self) -> f64 {
        self.target_time_secs
    }

    pub fn target(&self) -> Duration {
        Duration::from_secs_f64(self.target_time_secs)
    }

    pub fn target_ms(&self) -> u64 {
        self.target().as_millis() as u64
    }

    /// "1 second", "5 seconds".
    pub fn target_label(&self) -> String {
        seconds_label(self.target_time_secs)
    }

    /// The Easy / Medium / Hard / Extreme ladder.
    pub fn default_ladder() -> Vec<Challenge> {
        [("Easy", 1.0), ("Medium", 5.0), ("Hard", 10.0), ("Extreme", 20.0)]
            .into_iter()
            .map(|(title, secs)| Challenge {
                title: title.to_string(),
                target_time_secs: secs,
            })
            .collect()
    }
}

pub(crate) fn seconds_label(secs: f64) -> String {
    format!("{secs} second{}", if secs > 1.0 { "s" } else { "" })
}

/// Terminal result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Stopped before the timer fired.
    Won,
    /// The timer expired.
    Lost,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Won => f.write_str("won"),
            Outcome::Lost => f.write_str("lost"),
        }
    }
}

/// Observable state of a challenge controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "outcome", rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Resolved(Outcome),
}

impl RunState {
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            RunState::Resolved(outcome) => Some(*outcome),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// Text shown under the challenge toggle.
    pub fn status_label(&self) -> &'static str {
        match self {
            RunState::Idle => "Time inactive",
            RunState::Running => "Time is running",
            RunState::Resolved(Outcome::Won) => "You won!",
            RunState::Resolved(Outcome::Lost) => "You lost!",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => f.write_str("idle"),
            RunState::Running => f.write_str("running"),
            RunState::Resolved(outcome) => write!(f, "resolved ({outcome})"),
        }
    }
}

/// One execution attempt, from `start()` to resolution.
#[derive(Debug, Clone)]
pub struct ChallengeRun {
    number: u32,
    started_at: Duration,
    state: RunState,
    pending_timer: Option<TimerHandle>,
    /// Frozen at resolution.
    elapsed: Option<Duration>,
}

impl ChallengeRun {
    pub(crate) fn new(number: u32, started_at: Duration, timer: TimerHandle) -> Self {
        Self {
            number,
            started_at,
            state: RunState::Running,
            pending_timer: Some(timer),
            elapsed: None,
        }
    }

    /// 1-based sequence number within its controller.
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending_timer
    }

    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    /// Elapsed time at resolution, `None` while running.
    pub fn resolved_elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Moves a running run into its terminal state and hands back the timer
    /// handle it owned. Resolved runs are left untouched.
    pub(crate) fn resolve(&mut self, outcome: Outcome, now: Duration) -> Option<TimerHandle> {
        if !self.state.is_running() {
            return None;
        }
        self.state = RunState::Resolved(outcome);
        self.elapsed = Some(now.saturating_sub(self.started_at));
        self.pending_timer.take()
    }
}
