//! Tabular Q-learning.
//!
//! The learner owns its action-value table and a per-round trajectory of
//! (state, action) pairs. Action selection is epsilon-greedy over the card
//! types actually present in the hand; once the round's reward is known,
//! `apply_reward` runs one temporal-difference update per recorded pair, in
//! insertion order, against the live table.

use rand::Rng;

use crate::agent::table::{QTable, NUM_ACTIONS};
use crate::game::encoding::EncodedState;

/// A tabular Q-learning agent.
///
/// The hyperparameters are public so an orchestrator can anneal them between
/// rounds (epsilon decay schedules, for example). All are conventionally in
/// `[0, 1]`; convergence of the update toward `reward / (1 - gamma)` assumes
/// `gamma < 1`.
#[derive(Debug, Clone)]
pub struct QLearner {
    /// Exploration rate: probability of picking a uniformly random candidate
    /// instead of the argmax.
    pub epsilon: f64,
    /// Learning rate applied to each temporal-difference step.
    pub alpha: f64,
    /// Discount factor on the bootstrapped future value.
    pub gamma: f64,

    table: QTable,
    trajectory: Vec<(EncodedState, usize)>,
    update_deltas: Vec<f64>,
}

impl QLearner {
    /// Create a learner with an empty table.
    pub fn new(epsilon: f64, alpha: f64, gamma: f64) -> Self {
        Self::with_table(QTable::new(), epsilon, alpha, gamma)
    }

    /// Create a learner around an existing table (e.g. a loaded checkpoint,
    /// or a frozen copy for greedy evaluation).
    pub fn with_table(table: QTable, epsilon: f64, alpha: f64, gamma: f64) -> Self {
        Self {
            epsilon,
            alpha,
            gamma,
            table,
            trajectory: Vec::new(),
            update_deltas: Vec::new(),
        }
    }

    /// Choose an action index among the candidate card-type indices.
    ///
    /// Looks up the state's value vector, lazily inserting a zero vector for
    /// first-time states. With probability `epsilon` a uniformly random
    /// candidate is returned; otherwise the candidate with the maximum value,
    /// ties broken by the first maximum encountered in candidate order.
    ///
    /// # Arguments
    /// * `state` - The encoded decision state
    /// * `candidates` - Distinct card-type indices present in the hand, in
    ///   ascending order
    /// * `rng` - Random source for the exploration branch
    pub fn select_action<R: Rng>(
        &mut self,
        state: EncodedState,
        candidates: &[usize],
        rng: &mut R,
    ) -> usize {
        debug_assert!(!candidates.is_empty(), "no candidate actions");
        debug_assert!(candidates.iter().all(|&i| i < NUM_ACTIONS));

        let values = self.table.get_or_insert_default(state);

        if rng.gen::<f64>() < self.epsilon {
            candidates[rng.gen_range(0..candidates.len())]
        } else {
            let mut best = candidates[0];
            for &candidate in &candidates[1..] {
                if values[candidate] > values[best] {
                    best = candidate;
                }
            }
            best
        }
    }

    /// Record a (state, action) pair for the pending round update.
    pub fn record(&mut self, state: EncodedState, action: usize) {
        self.trajectory.push((state, action));
    }

    /// Apply the round's reward to every recorded (state, action) pair.
    ///
    /// Pairs are processed in insertion order and each one reads the table as
    /// it is at that moment: when a state repeats within the batch, the later
    /// pair's current value and bootstrapped maximum see the earlier pair's
    /// write. The trajectory is cleared unconditionally.
    pub fn apply_reward(&mut self, reward: f64) {
        let trajectory = std::mem::take(&mut self.trajectory);
        for (state, action) in trajectory {
            let values = self.table.get_or_insert_default(state);
            let current = values[action];
            let max_future = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let updated = current + self.alpha * (reward + self.gamma * max_future - current);
            values[action] = updated;
            self.update_deltas.push((updated - current).abs());
        }
    }

    /// The learned table.
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Number of (state, action) pairs awaiting the round update.
    pub fn pending_updates(&self) -> usize {
        self.trajectory.len()
    }

    /// Drain the recorded per-update magnitudes `|ΔQ|`.
    ///
    /// Orchestrators report the mean of these between checkpoints as a cheap
    /// convergence signal.
    pub fn take_update_deltas(&mut self) -> Vec<f64> {
        std::mem::take(&mut self.update_deltas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Card;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state_for(hand: &[Card]) -> EncodedState {
        EncodedState::encode(hand, &[])
    }

    #[test]
    fn test_greedy_selection_takes_strict_maximum() {
        let mut learner = QLearner::new(0.0, 0.3, 0.8);
        let state = state_for(&[Card::Dumpling, Card::Maki1, Card::Tempura]);

        let values = learner.table.get_or_insert_default(state);
        values[0] = 0.2;
        values[2] = 0.9;
        values[8] = 0.5;

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(2, learner.select_action(state, &[0, 2, 8], &mut rng));
    }

    #[test]
    fn test_greedy_tie_break_is_first_candidate() {
        let mut learner = QLearner::new(0.0, 0.3, 0.8);
        let state = state_for(&[Card::EggNigiri, Card::Sashimi, Card::Wasabi]);

        let values = learner.table.get_or_insert_default(state);
        values[1] = 0.4;
        values[6] = 0.7;
        values[9] = 0.7;

        // 6 and 9 tie; candidate order is ascending, so 6 wins.
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(6, learner.select_action(state, &[1, 6, 9], &mut rng));
    }

    #[test]
    fn test_unseen_state_is_initialized_even_when_exploring() {
        let mut learner = QLearner::new(1.0, 0.3, 0.8);
        let state = state_for(&[Card::Maki2]);

        let mut rng = StdRng::seed_from_u64(3);
        let action = learner.select_action(state, &[3], &mut rng);
        assert_eq!(3, action);
        assert_eq!(1, learner.table().len());
        assert_eq!(&[0.0; NUM_ACTIONS], learner.table().get(&state).unwrap());
    }

    #[test]
    fn test_exploration_only_picks_candidates() {
        let mut learner = QLearner::new(1.0, 0.3, 0.8);
        let state = state_for(&[Card::Dumpling, Card::Wasabi]);
        let candidates = [0, 9];

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let action = learner.select_action(state, &candidates, &mut rng);
            assert!(candidates.contains(&action));
        }
    }

    #[test]
    fn test_batched_update_sees_earlier_writes_to_same_state() {
        let mut learner = QLearner::new(0.0, 0.5, 0.5);
        let state = state_for(&[Card::Tempura, Card::Sashimi]);

        learner.record(state, 8);
        learner.record(state, 6);
        learner.apply_reward(4.0);

        // First pair: q[8] = 0 + 0.5 * (4 + 0.5 * 0 - 0) = 2.
        // Second pair reads the live table: max is now 2, so
        // q[6] = 0 + 0.5 * (4 + 0.5 * 2 - 0) = 2.5.
        let values = learner.table().get(&state).unwrap();
        assert_eq!(2.0, values[8]);
        assert_eq!(2.5, values[6]);
        assert_eq!(0, learner.pending_updates());
    }

    #[test]
    fn test_trajectory_cleared_even_with_zero_reward() {
        let mut learner = QLearner::new(0.0, 0.3, 0.8);
        let state = state_for(&[Card::Maki3]);
        learner.record(state, 4);
        learner.apply_reward(0.0);
        assert_eq!(0, learner.pending_updates());
    }

    #[test]
    fn test_repeated_updates_converge_to_discounted_reward() {
        let mut learner = QLearner::new(0.0, 0.3, 0.8);
        let state = state_for(&[Card::SquidNigiri]);

        // Fixed point of q = r + gamma * q is r / (1 - gamma) = 50.
        for _ in 0..1_000 {
            learner.record(state, 7);
            learner.apply_reward(10.0);
        }

        let q = learner.table().get(&state).unwrap()[7];
        assert!((q - 50.0).abs() < 1e-6, "q = {}", q);
    }

    #[test]
    fn test_update_deltas_are_drained() {
        let mut learner = QLearner::new(0.0, 0.5, 0.0);
        let state = state_for(&[Card::Dumpling]);

        learner.record(state, 0);
        learner.apply_reward(2.0);

        let deltas = learner.take_update_deltas();
        assert_eq!(vec![1.0], deltas);
        assert!(learner.take_update_deltas().is_empty());
    }
}
