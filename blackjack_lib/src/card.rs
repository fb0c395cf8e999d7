//! Cards, suits and ranks, plus the static table that maps every face to its display asset.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

/// Identifier used for both the id and the asset of the face-down card.
pub const FACE_DOWN_ID: &str = "back";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Clubs,
    Hearts,
    Spades,
    Diamonds,
}

impl Suit {
    /// All suits in the order a fresh deck is built.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Hearts, Suit::Spades, Suit::Diamonds];

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Clubs => "clubs",
            Suit::Hearts => "hearts",
            Suit::Spades => "spades",
            Suit::Diamonds => "diamonds",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "jack")]
    Jack,
    #[serde(rename = "queen")]
    Queen,
    #[serde(rename = "king")]
    King,
    #[serde(rename = "ace")]
    Ace,
}

impl Rank {
    /// All ranks in the order a fresh deck is built.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "jack",
            Rank::Queen => "queen",
            Rank::King => "king",
            Rank::Ace => "ace",
        }
    }

    /// Point value of a non-ace rank. Aces return 0, the scorer decides between 1 and 11.
    pub fn points(&self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 0,
        }
    }

    pub fn is_ace(&self) -> bool {
        matches!(self, Rank::Ace)
    }
}

lazy_static! {
    /// Display asset for each of the 52 faces, e.g. `hearts_queen`.
    static ref FACE_ASSETS: HashMap<(Suit, Rank), String> = {
        let mut assets = HashMap::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                assets.insert((suit, rank), format!("{}_{}", suit.name(), rank.name()));
            }
        }
        assets
    };
}

/// Returns the display asset identifier for the face `suit`/`rank`.
pub fn asset_for(suit: Suit, rank: Rank) -> &'static str {
    FACE_ASSETS[&(suit, rank)].as_str()
}

/// A single card of the shoe. `id` is unique within the shoe, `image` is the display asset
/// the presentation layer resolves; the engine never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub suit: Option<Suit>,
    pub rank: Option<Rank>,
    pub image: String,
}

impl Card {
    /// Creates the card `rank` of `suit` belonging to deck number `deck` of the shoe.
    pub fn new(deck: usize, suit: Suit, rank: Rank) -> Card {
        let image = asset_for(suit, rank).to_string();
        Card {
            id: format!("{}_{}", deck, image),
            suit: Some(suit),
            rank: Some(rank),
            image,
        }
    }

    /// The placeholder reported in place of the dealer's hidden cards.
    pub fn face_down() -> Card {
        Card {
            id: FACE_DOWN_ID.to_string(),
            suit: None,
            rank: None,
            image: FACE_DOWN_ID.to_string(),
        }
    }

    pub fn is_face_down(&self) -> bool {
        self.rank.is_none()
    }

    pub fn is_ace(&self) -> bool {
        self.rank.map_or(false, |r| r.is_ace())
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.rank, self.suit) {
            (Some(rank), Some(suit)) => write!(f, "{} of {}", rank.name(), suit.name()),
            _ => write!(f, "[face down]"),
        }
    }
}
