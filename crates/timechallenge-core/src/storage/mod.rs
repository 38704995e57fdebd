mod config;

pub use config::{ChallengeConfig, Config, RuntimeConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/timechallenge[-dev]/` based on TIMECHALLENGE_ENV.
///
/// Set TIMECHALLENGE_ENV=dev to use the development data directory, or
/// TIMECHALLENGE_HOME to point at an explicit directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("TIMECHALLENGE_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("TIMECHALLENGE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("timechallenge-dev")
            } else {
                base_dir.join("timechallenge")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
