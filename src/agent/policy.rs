//! Card-selection policies.
//!
//! Every player carries one `Strategy` variant. The learning variant wraps a
//! [`QLearner`]; the rest are stateless baselines used as opponents and
//! benchmarks. Priority policies hold a full ordering of the ten card types
//! and always play the highest-priority type present in the hand.

use std::fmt;

use crate::agent::qlearner::QLearner;
use crate::game::card::{Card, NUM_CARD_TYPES};
use crate::game::GameError;

/// A full ordering of the ten card types, best first.
pub type PriorityList = [Card; NUM_CARD_TYPES];

/// Balanced hand-tuned ordering: chases the high-value combos first.
pub const RULES_PRIORITY: PriorityList = [
    Card::SquidNigiri,
    Card::Sashimi,
    Card::Wasabi,
    Card::Tempura,
    Card::SalmonNigiri,
    Card::Maki3,
    Card::Dumpling,
    Card::Maki2,
    Card::EggNigiri,
    Card::Maki1,
];

/// Greedy ordering: immediate points over combo potential.
pub const GREEDY_PRIORITY: PriorityList = [
    Card::Dumpling,
    Card::SquidNigiri,
    Card::Tempura,
    Card::SalmonNigiri,
    Card::Sashimi,
    Card::Maki3,
    Card::Maki2,
    Card::EggNigiri,
    Card::Wasabi,
    Card::Maki1,
];

/// Deliberately bad ordering, used as a lower-bound benchmark.
pub const WORST_PRIORITY: PriorityList = [
    Card::Wasabi,
    Card::Maki1,
    Card::EggNigiri,
    Card::Maki2,
    Card::Maki3,
    Card::Sashimi,
    Card::SalmonNigiri,
    Card::Dumpling,
    Card::Tempura,
    Card::SquidNigiri,
];

/// External prompt capability for the human policy.
///
/// Implementations ask whoever is on the other side (stdin, a UI, a test
/// double) for a 0-based index into the displayed hand. The game core
/// re-validates the returned index against the hand length, so an
/// implementation may be as trusting as it likes; returning an error aborts
/// the draft turn.
pub trait HandPrompt: Send {
    /// Ask for the index of the card to play from `hand`.
    fn choose_index(&mut self, hand: &[Card]) -> Result<usize, GameError>;
}

/// How a player picks the card to draft each turn.
pub enum Strategy {
    /// Epsilon-greedy tabular Q-learning.
    Learning(QLearner),
    /// Uniformly random card from the hand.
    Random,
    /// Highest-priority card type present in the hand.
    RulesPriority(PriorityList),
    /// Same mechanism with an ordering chosen to play badly; a lower-bound
    /// opponent for evaluations.
    WorstFirst(PriorityList),
    /// Index supplied by an external prompt.
    Human(Box<dyn HandPrompt>),
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Learning(learner) => f.debug_tuple("Learning").field(learner).finish(),
            Strategy::Random => write!(f, "Random"),
            Strategy::RulesPriority(list) => f.debug_tuple("RulesPriority").field(list).finish(),
            Strategy::WorstFirst(list) => f.debug_tuple("WorstFirst").field(list).finish(),
            Strategy::Human(_) => write!(f, "Human"),
        }
    }
}

/// Position in `hand` of the first card matching the highest-priority type
/// present. Falls back to the first card if the ordering covers none of the
/// hand (only possible for partial orderings).
pub(crate) fn position_by_priority(hand: &[Card], priority: &PriorityList) -> usize {
    for want in priority {
        if let Some(position) = hand.iter().position(|card| card == want) {
            return position;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_lists_are_permutations() {
        for list in [RULES_PRIORITY, GREEDY_PRIORITY, WORST_PRIORITY] {
            let mut seen = [false; NUM_CARD_TYPES];
            for card in list {
                seen[card.index()] = true;
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn test_position_by_priority_picks_best_type() {
        let hand = vec![Card::Maki1, Card::Tempura, Card::Sashimi, Card::Tempura];
        // RULES_PRIORITY ranks Sashimi above Tempura and Maki1.
        assert_eq!(2, position_by_priority(&hand, &RULES_PRIORITY));
        // WORST_PRIORITY ranks Maki1 highest of those three.
        assert_eq!(0, position_by_priority(&hand, &WORST_PRIORITY));
    }

    #[test]
    fn test_position_by_priority_takes_first_duplicate() {
        let hand = vec![Card::Dumpling, Card::Tempura, Card::Dumpling];
        assert_eq!(0, position_by_priority(&hand, &GREEDY_PRIORITY));
    }
}
