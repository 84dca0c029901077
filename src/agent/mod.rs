//! Players and card-selection policies.
//!
//! The [`Strategy`] enum is the closed set of policies a player can carry:
//! the tabular [`QLearner`], the random and priority-list baselines, and the
//! prompt-driven human variant. Each learning player exclusively owns its
//! [`QTable`] and per-round trajectory; the game session only ever talks to
//! players through [`Player::choose_card`] and the learner's reward hook.

pub mod player;
pub mod policy;
pub mod qlearner;
pub mod table;

pub use player::Player;
pub use policy::{
    HandPrompt, PriorityList, Strategy, GREEDY_PRIORITY, RULES_PRIORITY, WORST_PRIORITY,
};
pub use qlearner::QLearner;
pub use table::{QTable, TableExport, NUM_ACTIONS};
