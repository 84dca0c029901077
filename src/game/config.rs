//! Configuration options for a game session.

use crate::game::GameError;

/// Configuration for a [`GameSession`](crate::game::GameSession).
///
/// # Example
/// ```
/// use sushigo_rl::game::SessionConfig;
///
/// let config = SessionConfig::default().with_num_cards(8).with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Hand size dealt to each player per round. Must be at least 1 and
    /// consistent with deck capacity for the player count.
    pub num_cards: usize,

    /// Print a per-player scoring breakdown when a round is scored. An
    /// observability side channel only; never affects results.
    pub print_info: bool,

    /// Record (state, action) pairs during drafting and apply reward updates
    /// to learning players when the round is scored. Disable for evaluation
    /// games so they leave the learned table untouched.
    pub record_updates: bool,

    /// Random seed for the session's deck shuffles, seating shuffles and
    /// policy randomness. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            num_cards: 5,
            print_info: false,
            record_updates: true,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the hand size.
    pub fn with_num_cards(mut self, num_cards: usize) -> Self {
        self.num_cards = num_cards;
        self
    }

    /// Builder method: enable or disable the scoring breakdown printout.
    pub fn with_print_info(mut self, enable: bool) -> Self {
        self.print_info = enable;
        self
    }

    /// Builder method: enable or disable learning updates.
    pub fn with_record_updates(mut self, enable: bool) -> Self {
        self.record_updates = enable;
        self
    }

    /// Builder method: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.num_cards == 0 {
            return Err(GameError::InvalidHandSize(self.num_cards));
        }
        Ok(())
    }
}
