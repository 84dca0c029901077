//! A seated player: identity, hand, played set and card-selection strategy.

use rand::Rng;

use crate::agent::policy::{position_by_priority, HandPrompt, Strategy};
use crate::agent::qlearner::QLearner;
use crate::game::card::{Card, NUM_CARD_TYPES};
use crate::game::encoding::EncodedState;
use crate::game::GameError;

/// One player in a game session.
///
/// The session owns the player and drives all hand/played mutation through
/// [`Player::choose_card`]; a learning player additionally owns its table and
/// trajectory inside its strategy.
#[derive(Debug)]
pub struct Player {
    /// Display name, also used by orchestrators to tally wins.
    pub name: String,
    /// Cards currently in hand. Sorted at deal time for display only; no
    /// game logic depends on the order.
    pub hand: Vec<Card>,
    /// Cards drafted so far this round.
    pub played: Vec<Card>,
    /// The card-selection policy.
    pub strategy: Strategy,
}

impl Player {
    /// Create a player with the given strategy.
    pub fn new(name: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            hand: Vec::new(),
            played: Vec::new(),
            strategy,
        }
    }

    /// Convenience: a Q-learning player with an empty table.
    pub fn learning(name: impl Into<String>, epsilon: f64, alpha: f64, gamma: f64) -> Self {
        Self::new(name, Strategy::Learning(QLearner::new(epsilon, alpha, gamma)))
    }

    /// Convenience: a uniformly random player.
    pub fn random(name: impl Into<String>) -> Self {
        Self::new(name, Strategy::Random)
    }

    /// Convenience: a human player answering through `prompt`.
    pub fn human(name: impl Into<String>, prompt: Box<dyn HandPrompt>) -> Self {
        Self::new(name, Strategy::Human(prompt))
    }

    /// The learner, if this player is the learning variant.
    pub fn learner(&self) -> Option<&QLearner> {
        match &self.strategy {
            Strategy::Learning(learner) => Some(learner),
            _ => None,
        }
    }

    /// Mutable access to the learner, if any.
    pub fn learner_mut(&mut self) -> Option<&mut QLearner> {
        match &mut self.strategy {
            Strategy::Learning(learner) => Some(learner),
            _ => None,
        }
    }

    /// Draft one card: remove it from the hand and append it to the played
    /// set, according to this player's strategy.
    ///
    /// # Arguments
    /// * `state` - The player's encoded (hand, played) snapshot
    /// * `record` - Whether a learning player should log the (state, action)
    ///   pair for the round's reward update
    /// * `rng` - Random source for stochastic strategies
    ///
    /// # Returns
    /// The card played, or [`GameError::InvalidHumanInput`] when a human
    /// prompt produced an out-of-range index.
    pub fn choose_card<R: Rng>(
        &mut self,
        state: EncodedState,
        record: bool,
        rng: &mut R,
    ) -> Result<Card, GameError> {
        debug_assert!(!self.hand.is_empty(), "drafting from an empty hand");

        let position = match &mut self.strategy {
            Strategy::Learning(learner) => {
                // Candidate actions: distinct card types present in the hand,
                // one representative per type, ascending index order.
                let mut present = [false; NUM_CARD_TYPES];
                for card in &self.hand {
                    present[card.index()] = true;
                }
                let candidates: Vec<usize> =
                    (0..NUM_CARD_TYPES).filter(|&i| present[i]).collect();

                let action = learner.select_action(state, &candidates, rng);
                if record {
                    learner.record(state, action);
                }

                self.hand
                    .iter()
                    .position(|card| card.index() == action)
                    .expect("selected card type missing from hand")
            }
            Strategy::Random => rng.gen_range(0..self.hand.len()),
            Strategy::RulesPriority(priority) | Strategy::WorstFirst(priority) => {
                position_by_priority(&self.hand, priority)
            }
            Strategy::Human(prompt) => {
                let index = prompt.choose_index(&self.hand)?;
                if index >= self.hand.len() {
                    return Err(GameError::InvalidHumanInput {
                        index,
                        hand_size: self.hand.len(),
                    });
                }
                index
            }
        };

        let card = self.hand.remove(position);
        self.played.push(card);
        Ok(card)
    }
}
