//! Card catalog and deck construction.
//!
//! This module provides the fundamental card types used throughout the crate:
//! - `Card`: one of the ten Sushi Go card types, with a stable index 0-9
//! - the per-type deck counts (94 cards in a full deck)
//! - `build_deck`: the full catalog multiset, uniformly shuffled

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Number of distinct card types. Also the length of a value vector in the
/// learned table, since actions are identified by card-type index.
pub const NUM_CARD_TYPES: usize = 10;

/// Total cards in a full deck (sum of all per-type counts).
pub const DECK_SIZE: usize = 94;

/// A Sushi Go card type.
///
/// Declaration order is the catalog order: `Card::index` returns the
/// discriminant, and the derived `Ord` sorts hands for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Card {
    /// Scores by a fixed lookup table on the count played.
    Dumpling,
    /// Nigiri worth 1 point (3 when wasabi-boosted).
    EggNigiri,
    /// One maki roll.
    Maki1,
    /// Two maki rolls.
    Maki2,
    /// Three maki rolls.
    Maki3,
    /// Nigiri worth 2 points (6 when wasabi-boosted).
    SalmonNigiri,
    /// Scores 10 points per complete triple.
    Sashimi,
    /// Nigiri worth 3 points (9 when wasabi-boosted).
    SquidNigiri,
    /// Scores 5 points per complete pair.
    Tempura,
    /// Triples the next nigiri played by the same player.
    Wasabi,
}

impl Card {
    /// All card types in catalog-index order.
    pub const ALL: [Card; NUM_CARD_TYPES] = [
        Card::Dumpling,
        Card::EggNigiri,
        Card::Maki1,
        Card::Maki2,
        Card::Maki3,
        Card::SalmonNigiri,
        Card::Sashimi,
        Card::SquidNigiri,
        Card::Tempura,
        Card::Wasabi,
    ];

    /// The card's catalog index (0-9).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a card type by catalog index.
    pub fn from_index(index: usize) -> Option<Card> {
        Card::ALL.get(index).copied()
    }

    /// How many copies of this card type a full deck contains.
    pub fn deck_count(self) -> usize {
        match self {
            Card::Dumpling => 14,
            Card::EggNigiri => 5,
            Card::Maki1 => 6,
            Card::Maki2 => 12,
            Card::Maki3 => 8,
            Card::SalmonNigiri => 10,
            Card::Sashimi => 14,
            Card::SquidNigiri => 5,
            Card::Tempura => 14,
            Card::Wasabi => 6,
        }
    }

    /// Display name of the card type.
    pub fn name(self) -> &'static str {
        match self {
            Card::Dumpling => "Dumpling",
            Card::EggNigiri => "EggNigiri",
            Card::Maki1 => "Maki1",
            Card::Maki2 => "Maki2",
            Card::Maki3 => "Maki3",
            Card::SalmonNigiri => "SalmonNigiri",
            Card::Sashimi => "Sashimi",
            Card::SquidNigiri => "SquidNigiri",
            Card::Tempura => "Tempura",
            Card::Wasabi => "Wasabi",
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build a full deck (the catalog multiset) and shuffle it uniformly.
///
/// Dealing pops cards from the end of the returned vector; since the shuffle
/// is uniform the pop order carries no bias.
pub fn build_deck<R: Rng>(rng: &mut R) -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for card in Card::ALL {
        for _ in 0..card.deck_count() {
            deck.push(card);
        }
    }
    debug_assert_eq!(deck.len(), DECK_SIZE);

    deck.shuffle(rng);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_catalog_indices_round_trip() {
        for (i, card) in Card::ALL.iter().enumerate() {
            assert_eq!(i, card.index());
            assert_eq!(Some(*card), Card::from_index(i));
        }
        assert_eq!(None, Card::from_index(NUM_CARD_TYPES));
    }

    #[test]
    fn test_deck_is_catalog_multiset() {
        // The multiset of cards must match the catalog counts for any shuffle.
        for seed in [0u64, 1, 42, 1234] {
            let mut rng = StdRng::seed_from_u64(seed);
            let deck = build_deck(&mut rng);
            assert_eq!(DECK_SIZE, deck.len());

            for card in Card::ALL {
                let count = deck.iter().filter(|&&c| c == card).count();
                assert_eq!(card.deck_count(), count, "wrong count for {}", card);
            }
        }
    }

    #[test]
    fn test_shuffle_is_reproducible() {
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);
        let mut rng3 = StdRng::seed_from_u64(8);

        let deck1 = build_deck(&mut rng1);
        let deck2 = build_deck(&mut rng2);
        let deck3 = build_deck(&mut rng3);

        assert_eq!(deck1, deck2);
        assert_ne!(deck1, deck3);
    }
}
