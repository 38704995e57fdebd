//! A set of independent challenges shown side by side.

use super::controller::ChallengeController;
use super::model::Challenge;
use crate::events::Event;
use crate::timer::Clock;

/// Owns one controller per challenge. Each controller keeps its own timer,
/// so runs on different challenges never interfere.
#[derive(Debug)]
pub struct ChallengeBoard<C: Clock + Clone> {
    controllers: Vec<ChallengeController<C>>,
}

impl<C: Clock + Clone> ChallengeBoard<C> {
    pub fn new(challenges: impl IntoIterator<Item = Challenge>, clock: C) -> Self {
        let controllers = challenges
            .into_iter()
            .map(|challenge| ChallengeController::new(challenge, clock.clone()))
            .collect();
        Self { controllers }
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChallengeController<C>> {
        self.controllers.iter()
    }

    /// Position of a challenge by 1-based index or case-insensitive title.
    pub fn position(&self, key: &str) -> Option<usize> {
        let key = key.trim();
        if let Ok(index) = key.parse::<usize>() {
            return (1..=self.controllers.len())
                .contains(&index)
                .then(|| index - 1);
        }
        self.controllers
            .iter()
            .position(|c| c.challenge().title().eq_ignore_ascii_case(key))
    }

    pub fn get(&self, key: &str) -> Option<&ChallengeController<C>> {
        self.position(key).map(|idx| &self.controllers[idx])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ChallengeController<C>> {
        self.position(key).map(move |idx| &mut self.controllers[idx])
    }

    /// Tick every controller; returns the loss events, in board order.
    pub fn tick(&mut self) -> Vec<Event> {
        self.controllers
            .iter_mut()
            .filter_map(|c| c.tick())
            .collect()
    }

    /// Armed timers across the whole board.
    pub fn pending_timers(&self) -> usize {
        self.controllers.iter().map(|c| c.pending_timers()).sum()
    }
}
