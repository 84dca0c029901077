//! State encoding for the learned table.
//!
//! A player's decision state is summarized as per-type card counts for its
//! own hand and played set, concatenated into a fixed-length vector. Only
//! counts matter, so two snapshots holding the same multisets encode
//! identically regardless of insertion order - a requirement for using the
//! encoding as a hash-table key.

use crate::game::card::{Card, NUM_CARD_TYPES};

/// Length of an encoded state: hand counts followed by played counts.
pub const STATE_LEN: usize = 2 * NUM_CARD_TYPES;

/// Tally cards by catalog index.
pub fn count_cards(cards: &[Card]) -> [u8; NUM_CARD_TYPES] {
    let mut counts = [0u8; NUM_CARD_TYPES];
    for card in cards {
        counts[card.index()] += 1;
    }
    counts
}

/// A player's encoded (hand, played) snapshot.
///
/// Immutable and hashable; used verbatim as the key into the action-value
/// table. The first ten entries count the hand, the last ten the played set,
/// both in catalog-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedState([u8; STATE_LEN]);

impl EncodedState {
    /// Encode a hand and played set.
    pub fn encode(hand: &[Card], played: &[Card]) -> Self {
        let mut vector = [0u8; STATE_LEN];
        vector[..NUM_CARD_TYPES].copy_from_slice(&count_cards(hand));
        vector[NUM_CARD_TYPES..].copy_from_slice(&count_cards(played));
        EncodedState(vector)
    }

    /// The hand half of the vector (counts by catalog index).
    pub fn hand_counts(&self) -> &[u8] {
        &self.0[..NUM_CARD_TYPES]
    }

    /// The played half of the vector (counts by catalog index).
    pub fn played_counts(&self) -> &[u8] {
        &self.0[NUM_CARD_TYPES..]
    }

    /// The full 20-element count vector.
    pub fn as_array(&self) -> &[u8; STATE_LEN] {
        &self.0
    }

    /// Render the state as a stable string key for the checkpoint format.
    ///
    /// Format: hand counts joined by `.`, a `:`, then played counts joined
    /// by `.`. Example: `1.0.0.0.0.1.0.0.0.0:0.0.0.0.0.0.0.0.2.0`.
    pub fn key(&self) -> String {
        let join = |counts: &[u8]| {
            counts
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(".")
        };
        format!("{}:{}", join(self.hand_counts()), join(self.played_counts()))
    }

    /// Parse a key produced by [`EncodedState::key`].
    ///
    /// Returns `None` for malformed keys so checkpoint loading can skip bad
    /// entries instead of failing the whole load.
    pub fn from_key(key: &str) -> Option<Self> {
        let (hand, played) = key.split_once(':')?;

        let mut vector = [0u8; STATE_LEN];
        for (half, text) in [(0, hand), (NUM_CARD_TYPES, played)] {
            let mut filled = 0;
            for part in text.split('.') {
                if filled == NUM_CARD_TYPES {
                    return None;
                }
                vector[half + filled] = part.parse().ok()?;
                filled += 1;
            }
            if filled != NUM_CARD_TYPES {
                return None;
            }
        }
        Some(EncodedState(vector))
    }
}
