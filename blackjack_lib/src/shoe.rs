use crate::card::{Card, Rank, Suit};
use crate::error::EngineError;
use crate::shuffle::Shuffler;
use std::collections::VecDeque;

/// Number of cards in a single standard deck.
pub const DECK_SIZE: usize = 52;

/// The multi-deck pool of cards available to be drawn. Cards are drawn from the back and
/// returned to the front.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: VecDeque<Card>,
}

impl Shoe {
    /// Associated function to build a fresh, unshuffled shoe of `num_decks` standard decks.
    pub fn new(num_decks: usize) -> Shoe {
        let mut cards = VecDeque::with_capacity(num_decks * DECK_SIZE);
        for deck in 0..num_decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push_back(Card::new(deck, suit, rank));
                }
            }
        }
        Shoe { cards }
    }

    /// Removes the next card from the shoe.
    pub fn draw(&mut self) -> Result<Card, EngineError> {
        self.cards.pop_back().ok_or(EngineError::ShoeExhausted)
    }

    /// Puts previously dealt cards back at the front of the shoe.
    pub fn return_cards<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        for card in cards {
            self.cards.push_front(card);
        }
    }

    /// Reorders the entire shoe using `shuffler`.
    pub fn shuffle<S: Shuffler>(&mut self, shuffler: &mut S) {
        shuffler.shuffle(self.cards.make_contiguous());
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in draw order reversed, i.e. the last element is drawn next.
    pub fn cards(&self) -> Vec<&Card> {
        self.cards.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn six_deck_shoe_has_unique_cards() {
        let shoe = Shoe::new(6);
        assert_eq!(shoe.len(), 312);
        let ids: HashSet<_> = shoe.cards().into_iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), 312);
    }

    #[test]
    fn draw_takes_from_the_back_and_return_goes_to_the_front() {
        let mut shoe = Shoe::new(1);
        let card = shoe.draw().unwrap();
        assert_eq!(card.id, "0_diamonds_ace");
        assert_eq!(shoe.len(), 51);

        shoe.return_cards(vec![card.clone()]);
        assert_eq!(shoe.len(), 52);
        assert_eq!(shoe.cards()[0], &card);
    }

    #[test]
    fn drawing_from_an_empty_shoe_is_an_error() {
        let mut shoe = Shoe::new(0);
        assert!(shoe.is_empty());
        assert!(matches!(shoe.draw(), Err(EngineError::ShoeExhausted)));
    }
}
