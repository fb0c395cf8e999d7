use crate::card::Card;
use serde::{Deserialize, Serialize};

/// Total of a natural blackjack, and the highest total that does not bust.
pub const BLACKJACK: u8 = 21;

/// Computes the value of `cards`.
///
/// Non-ace cards are summed first. When that sum is exactly 10 and there are two or more aces,
/// every ace counts as 1. Otherwise each ace counts as 11 unless that would take the running
/// total past 21, in which case it counts as 1. Face-down cards contribute nothing.
///
/// This is a greedy valuation rather than an exhaustive one: a hand such as 9, A, A, A is
/// scored 22 even though 12 is reachable.
pub fn hand_value(cards: &[Card]) -> u8 {
    let mut total: u8 = 0;
    let mut aces: u8 = 0;

    for rank in cards.iter().filter_map(|card| card.rank) {
        if rank.is_ace() {
            aces += 1;
        } else {
            total += rank.points();
        }
    }

    if total == 10 && aces > 1 {
        return total + aces;
    }

    for _ in 0..aces {
        if total + 11 > BLACKJACK {
            total += 1;
        } else {
            total += 11;
        }
    }

    total
}

/// Cards dealt face up to one party during the current round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand { cards: Vec::new() }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Empties the hand, handing its cards back to the caller in dealt order.
    pub fn take_cards(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u8 {
        hand_value(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// True for a two card hand totalling 21.
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.value() == BLACKJACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks
            .iter()
            .enumerate()
            .map(|(i, rank)| Card::new(i, Suit::Spades, *rank))
            .collect()
    }

    #[test]
    fn test_hand_value_simple() {
        assert_eq!(hand_value(&cards(&[Rank::Two, Rank::Three])), 5);
        assert_eq!(hand_value(&cards(&[Rank::King, Rank::Queen])), 20);
    }

    #[test]
    fn test_hand_value_ace_king() {
        assert_eq!(hand_value(&cards(&[Rank::Ace, Rank::King])), 21);
    }

    #[test]
    fn test_hand_value_two_aces() {
        assert_eq!(hand_value(&cards(&[Rank::Ace, Rank::Ace])), 12);
    }

    #[test]
    fn test_hand_value_two_aces_and_nine() {
        assert_eq!(hand_value(&cards(&[Rank::Ace, Rank::Ace, Rank::Nine])), 21);
    }

    #[test]
    fn test_hand_value_three_aces_and_eight() {
        assert_eq!(
            hand_value(&cards(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Eight])),
            21
        );
    }

    #[test]
    fn test_hand_value_ten_with_two_aces_counts_aces_low() {
        assert_eq!(hand_value(&cards(&[Rank::Ace, Rank::Ten, Rank::Ace])), 12);
        assert_eq!(hand_value(&cards(&[Rank::Four, Rank::Ace, Rank::Six, Rank::Ace])), 12);
    }

    #[test]
    fn test_hand_value_hard_ace() {
        assert_eq!(hand_value(&cards(&[Rank::Ace, Rank::Six])), 17);
        assert_eq!(hand_value(&cards(&[Rank::Six, Rank::Nine, Rank::Ace])), 16);
    }

    #[test]
    fn test_hand_value_is_greedy_for_many_aces() {
        assert_eq!(
            hand_value(&cards(&[Rank::Nine, Rank::Ace, Rank::Ace, Rank::Ace])),
            22
        );
    }

    #[test]
    fn test_hand_value_ignores_face_down_card() {
        let mut hand = cards(&[Rank::Seven]);
        hand.push(Card::face_down());
        assert_eq!(hand_value(&hand), 7);
    }

    #[test]
    fn test_hand_natural_and_bust() {
        let mut hand = Hand::new();
        for card in cards(&[Rank::Ace, Rank::Jack]) {
            hand.push(card);
        }
        assert!(hand.is_natural());
        assert!(!hand.is_bust());

        let mut hand = Hand::new();
        for card in cards(&[Rank::Seven, Rank::Four, Rank::King]) {
            hand.push(card);
        }
        assert_eq!(hand.value(), 21);
        assert!(!hand.is_natural());

        hand.push(Card::new(9, Suit::Hearts, Rank::Two));
        assert!(hand.is_bust());
    }

    #[test]
    fn test_take_cards_empties_hand() {
        let mut hand = Hand::new();
        for card in cards(&[Rank::Five, Rank::Six]) {
            hand.push(card);
        }
        let taken = hand.take_cards();
        assert_eq!(taken.len(), 2);
        assert!(hand.is_empty());
        assert_eq!(hand.value(), 0);
    }
}
