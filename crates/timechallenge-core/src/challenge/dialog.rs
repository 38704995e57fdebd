//! Result dialog shown once a run resolves.
//!
//! The controller only requests the dialog; rendering and dismissal belong to
//! whatever presentation layer observes the `ResultDialogRequested` event.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::model::{seconds_label, Challenge, Outcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDialog {
    pub outcome: Outcome,
    pub target_time_secs: f64,
    pub elapsed_ms: u64,
}

impl ResultDialog {
    pub fn new(challenge: &Challenge, outcome: Outcome, elapsed: Duration) -> Self {
        Self {
            outcome,
            target_time_secs: challenge.target_time_secs(),
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    /// "You won" / "You lost".
    pub fn heading(&self) -> String {
        format!("You {}", self.outcome)
    }

    pub fn message(&self) -> String {
        let target = seconds_label(self.target_time_secs);
        let verb = match self.outcome {
            Outcome::Won => "stopped the timer",
            Outcome::Lost => "did not stop the timer",
        };
        format!("The target time was {target} and you {verb} within the {target}.")
    }

    /// Only meaningful for a win: how far short of the target the player stopped.
    pub fn time_left_ms(&self) -> u64 {
        let target_ms = (self.target_time_secs * 1000.0) as u64;
        target_ms.saturating_sub(self.elapsed_ms)
    }

    pub fn render(&self) -> String {
        let mut out = format!("{}\n{}\n", self.heading(), self.message());
        if self.outcome == Outcome::Won {
            out.push_str(&format!(
                "You stopped the timer with {:.2} seconds left.\n",
                self.time_left_ms() as f64 / 1000.0
            ));
        }
        out
    }
}
