mod board;
mod controller;
mod dialog;
mod model;
mod player;

pub use board::ChallengeBoard;
pub use controller::{ChallengeController, ChallengeObserver, EventLog};
pub use dialog::ResultDialog;
pub use model::{Challenge, ChallengeRun, Outcome, RunState};
pub use player::Player;
