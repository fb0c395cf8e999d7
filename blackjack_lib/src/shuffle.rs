//! Sources of randomness for shuffling the shoe.

use crate::card::{Card, Rank};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::VecDeque;

/// Trait for anything that can reorder the shoe before a deal.
pub trait Shuffler {
    fn shuffle(&mut self, cards: &mut [Card]);
}

/// Uniform random permutation of the whole shoe.
#[derive(Debug, Clone)]
pub struct RandomShuffler {
    rng: StdRng,
}

impl RandomShuffler {
    /// Associated function returning a shuffler seeded from the operating system.
    pub fn from_entropy() -> RandomShuffler {
        RandomShuffler {
            rng: StdRng::from_entropy(),
        }
    }

    /// Associated function returning a shuffler that produces the same sequence of shoes for the same `seed`.
    pub fn seeded(seed: u64) -> RandomShuffler {
        RandomShuffler {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomShuffler {
    fn default() -> Self {
        RandomShuffler::from_entropy()
    }
}

impl Shuffler for RandomShuffler {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.rng);
    }
}

/// Deterministic shuffler that arranges the shoe so that a chosen sequence of ranks is drawn next.
/// Each call to `shuffle` consumes one queued sequence; once the queue is empty the shoe is left as it is.
/// Cards are only swapped, never created, so the shoe keeps its composition.
#[derive(Debug, Clone, Default)]
pub struct StackedShuffler {
    rounds: VecDeque<Vec<Rank>>,
}

impl StackedShuffler {
    pub fn new() -> StackedShuffler {
        StackedShuffler {
            rounds: VecDeque::new(),
        }
    }

    /// Queues the ranks to be drawn, in draw order, after the next unclaimed shuffle.
    /// A deal draws player, dealer, player, dealer before any hit.
    pub fn round<I: IntoIterator<Item = Rank>>(mut self, draws: I) -> StackedShuffler {
        self.rounds.push_back(draws.into_iter().collect());
        self
    }

    pub fn remaining_rounds(&self) -> usize {
        self.rounds.len()
    }
}

impl Shuffler for StackedShuffler {
    fn shuffle(&mut self, cards: &mut [Card]) {
        let Some(draws) = self.rounds.pop_front() else {
            return;
        };
        // The shoe is drawn from the back, so the i-th draw sits at len - 1 - i.
        for (i, rank) in draws.iter().enumerate() {
            if i >= cards.len() {
                break;
            }
            let target = cards.len() - 1 - i;
            if let Some(pos) = cards[..=target]
                .iter()
                .position(|card| card.rank == Some(*rank))
            {
                cards.swap(pos, target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shoe::Shoe;

    #[test]
    fn seeded_shuffles_are_reproducible() {
        let mut first = Shoe::new(1);
        let mut second = Shoe::new(1);
        first.shuffle(&mut RandomShuffler::seeded(42));
        second.shuffle(&mut RandomShuffler::seeded(42));
        assert_eq!(first.cards(), second.cards());
        assert_ne!(first.cards(), Shoe::new(1).cards());
    }

    #[test]
    fn stacked_shuffler_puts_ranks_on_top() {
        let mut shoe = Shoe::new(1);
        let mut shuffler = StackedShuffler::new().round([Rank::Ace, Rank::Two, Rank::Ace]);
        shoe.shuffle(&mut shuffler);
        let drawn: Vec<_> = (0..3).map(|_| shoe.draw().unwrap().rank.unwrap()).collect();
        assert_eq!(drawn, vec![Rank::Ace, Rank::Two, Rank::Ace]);
        assert_eq!(shoe.len(), 49);
        assert_eq!(shuffler.remaining_rounds(), 0);
    }

    #[test]
    fn stacked_shuffler_without_rounds_keeps_order() {
        let mut shoe = Shoe::new(1);
        shoe.shuffle(&mut StackedShuffler::new());
        assert_eq!(shoe.cards(), Shoe::new(1).cards());
    }
}
