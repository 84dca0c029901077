//! # sushigo-rl
//!
//! A Sushi Go card-drafting engine and a tabular Q-learning agent that learns
//! to play it.
//!
//! ## Features
//!
//! - **Complete round engine**: deck building, dealing, simultaneous drafting
//!   with the hand-passing mechanic, and full scoring including the
//!   cross-player maki majority bonuses
//! - **Tabular Q-learning**: epsilon-greedy action selection over the card
//!   types in hand, with batched temporal-difference updates once the round's
//!   reward is known
//! - **Baseline policies**: random, priority-list and worst-first opponents,
//!   plus a prompt-driven human player
//! - **Reproducibility**: every source of randomness flows from one seedable
//!   generator owned by the session
//! - **Checkpointing**: the learned table saves and loads as JSON, falling
//!   back to an empty table on missing or damaged files
//!
//! ## Quick Start
//!
//! ```ignore
//! use sushigo_rl::agent::Player;
//! use sushigo_rl::game::{GameSession, SessionConfig};
//!
//! // 1. Seat a learning agent against two random opponents
//! let players = vec![
//!     Player::learning("AI1", 0.9, 0.05, 0.9),
//!     Player::random("Random1"),
//!     Player::random("Random2"),
//! ];
//!
//! // 2. Create a session
//! let config = SessionConfig::default().with_num_cards(5).with_seed(42);
//! let mut session = GameSession::new(players, config)?;
//!
//! // 3. Play training games
//! for _ in 0..10_000 {
//!     session.reset();
//!     session.shuffle_seating();
//!     session.deal_cards()?;
//!     session.play_round()?;
//!     session.score_round();
//! }
//!
//! // 4. Save what was learned
//! session.player(0).learner().unwrap().table().save_json("q_table.json")?;
//! ```
//!
//! ## Modules
//!
//! - [`game`]: cards, scoring, state encoding and the round-driving session
//! - [`agent`]: players, policies and the Q-learning machinery
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                     GameSession                       │
//! │  - deck / dealing        - hand rotation              │
//! │  - scoring + maki bonus  - reward deltas to learners  │
//! └───────────────────────────────────────────────────────┘
//!                │ choose_card(state, ...)
//!                ▼
//!   ┌──────────┬──────────┬───────────────┬───────────┐
//!   │ Learning │  Random  │ RulesPriority │   Human   │
//!   │ (QTable) │          │ / WorstFirst  │ (prompt)  │
//!   └──────────┴──────────┴───────────────┴───────────┘
//! ```

#![warn(missing_docs)]

pub mod agent;
pub mod game;

// Re-export commonly used types at crate root for convenience
pub use agent::{Player, QLearner, QTable, Strategy};
pub use game::{Card, EncodedState, GameError, GameSession, SessionConfig};
