//! # Time Challenge Core Library
//!
//! This library provides the core logic of the Time Challenge reaction game:
//! a countdown starts, and the player wins by stopping it before it runs out.
//! All operations are available through the standalone CLI binary, which is a
//! thin host over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: A clock-driven registry of single-shot, cancellable delays.
//!   No internal threads - the caller periodically invokes `tick()`
//! - **Challenge**: The per-challenge state machine
//!   (`Idle -> Running -> Resolved(Won | Lost)`) and its observers
//! - **Storage**: TOML-based configuration of the player and challenge ladder
//!
//! ## Key Components
//!
//! - [`ChallengeTimer`]: Arm / cancel / fire countdowns
//! - [`ChallengeController`]: Start / stop state machine for one challenge
//! - [`ResultDialog`]: Outcome summary requested on resolution
//! - [`Config`]: Application configuration management

pub mod challenge;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use challenge::{
    Challenge, ChallengeBoard, ChallengeController, ChallengeObserver, ChallengeRun, EventLog,
    Outcome, Player, ResultDialog, RunState,
};
pub use error::{ChallengeError, ConfigError, CoreError, Operation};
pub use events::Event;
pub use storage::{ChallengeConfig, Config, RuntimeConfig};
pub use timer::{ChallengeTimer, Clock, ManualClock, SystemClock, TimerHandle};
