pub mod challenge;
pub mod config;
pub mod play;
pub mod player;
pub mod simulate;
