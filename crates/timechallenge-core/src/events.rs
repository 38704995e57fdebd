use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::challenge::{Outcome, ResultDialog, RunState};

/// Every state change of a challenge produces an Event.
/// Presentation layers subscribe to them through `ChallengeObserver`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ChallengeStarted {
        title: String,
        run: u32,
        target_ms: u64,
        at: DateTime<Utc>,
    },
    /// Stopped before the timer fired.
    ChallengeWon {
        title: String,
        run: u32,
        elapsed_ms: u64,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// The timer fired before anyone stopped it.
    ChallengeLost {
        title: String,
        run: u32,
        target_ms: u64,
        at: DateTime<Utc>,
    },
    /// The controller asks the presentation layer to open its result dialog.
    ResultDialogRequested {
        title: String,
        run: u32,
        dialog: ResultDialog,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        title: String,
        target_ms: u64,
        state: RunState,
        status: String,
        run: Option<u32>,
        elapsed_ms: u64,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Outcome of a `ChallengeWon` / `ChallengeLost` event.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Event::ChallengeWon { .. } => Some(Outcome::Won),
            Event::ChallengeLost { .. } => Some(Outcome::Lost),
            _ => None,
        }
    }
}
