//! Scoring rules for a round of play.
//!
//! `score_played` is a pure function of one player's played multiset; card
//! order never affects the result. Maki rolls are weighted and returned
//! separately because the maki bonus is a cross-player majority award,
//! computed once per round by `maki_bonuses`.

use crate::game::card::{Card, NUM_CARD_TYPES};
use crate::game::encoding::count_cards;

/// Dumpling points by count played; counts past the end clamp to the last
/// entry.
pub const DUMPLING_POINTS: [i32; 12] = [0, 1, 3, 6, 10, 15, 15, 15, 15, 15, 15, 15];

/// Points awarded to the group with the most maki rolls, split by integer
/// division among ties.
const MAKI_FIRST_BONUS: i32 = 6;

/// Points for the next-highest distinct maki count, split the same way.
const MAKI_SECOND_BONUS: i32 = 3;

/// Result of scoring one player's played set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundScore {
    /// Points from tempura, sashimi, nigiri (with wasabi boosts) and
    /// dumplings. Excludes the maki majority bonus.
    pub points: i32,
    /// Weighted maki-roll count (Maki1 = 1, Maki2 = 2, Maki3 = 3), used for
    /// the cross-player majority award.
    pub maki_weight: u32,
}

/// Score a played multiset.
///
/// Wasabi credits triple a nigiri's unit value. Credits are assigned to the
/// highest-base-value nigiri present first (squid, then salmon, then egg),
/// which keeps the result identical for every permutation of the same
/// multiset. An unused wasabi scores 0.
///
/// # Arguments
/// * `played` - The cards one player drafted this round, in any order
///
/// # Returns
/// The player's points and weighted maki count.
pub fn score_played(played: &[Card]) -> RoundScore {
    let counts = count_cards(played);
    let count = |card: Card| counts[card.index()] as i32;

    // Nigiri units: each wasabi boost turns one card into three units.
    let mut credits = count(Card::Wasabi);
    let mut units = [0i32; NUM_CARD_TYPES];
    for nigiri in [Card::SquidNigiri, Card::SalmonNigiri, Card::EggNigiri] {
        let plain = count(nigiri);
        let boosted = plain.min(credits);
        credits -= boosted;
        units[nigiri.index()] = plain + 2 * boosted;
    }

    let mut points = 0;
    points += (count(Card::Tempura) / 2) * 5;
    points += (count(Card::Sashimi) / 3) * 10;
    points += units[Card::EggNigiri.index()];
    points += 2 * units[Card::SalmonNigiri.index()];
    points += 3 * units[Card::SquidNigiri.index()];

    let dumplings = (count(Card::Dumpling) as usize).min(DUMPLING_POINTS.len() - 1);
    points += DUMPLING_POINTS[dumplings];

    let maki_weight =
        (count(Card::Maki1) + 2 * count(Card::Maki2) + 3 * count(Card::Maki3)) as u32;

    RoundScore { points, maki_weight }
}

/// Compute each player's maki majority bonus from all players' weighted maki
/// counts.
///
/// The group tied for the highest count splits 6 points by integer division
/// (remainder discarded). If any players fall outside that group, the group
/// with the next-highest distinct count splits 3 points the same way. A tie
/// spanning all players awards only the first-place split.
pub fn maki_bonuses(maki_weights: &[u32]) -> Vec<i32> {
    let mut bonuses = vec![0i32; maki_weights.len()];

    let top = match maki_weights.iter().max() {
        Some(&top) => top,
        None => return bonuses,
    };

    let first_place: Vec<usize> = (0..maki_weights.len())
        .filter(|&i| maki_weights[i] == top)
        .collect();
    let per_first = MAKI_FIRST_BONUS / first_place.len() as i32;
    for &i in &first_place {
        bonuses[i] += per_first;
    }

    let runner_up = maki_weights.iter().filter(|&&w| w < top).max();
    if let Some(&second) = runner_up {
        let second_place: Vec<usize> = (0..maki_weights.len())
            .filter(|&i| maki_weights[i] == second)
            .collect();
        let per_second = MAKI_SECOND_BONUS / second_place.len() as i32;
        for &i in &second_place {
            bonuses[i] += per_second;
        }
    }

    bonuses
}
