//! Rules engine for single player blackjack against an automated dealer.
//!
//! A `GameEngine` owns a multi-deck shoe, the player's and the dealer's hands, the credit balance
//! and the bet of the current round. The presentation layer calls `deal`, `hit`, `double` and
//! `stand` and renders the `RoundSnapshot` each of them returns.

pub mod card;
pub mod config;
pub mod error;
pub mod game;
pub mod hand;
pub mod shoe;
pub mod shuffle;

pub mod prelude {
    pub use super::card::{asset_for, Card, Rank, Suit};
    pub use super::config::{
        blackjack_payout, GameConfig, GameConfigBuilder, DEALER_DRAW_THRESHOLD,
        SUGGESTED_BET_FACTOR,
    };
    pub use super::error::EngineError;
    pub use super::game::{Action, GameEngine, GameStatus, RoundSnapshot};
    pub use super::hand::{hand_value, Hand, BLACKJACK};
    pub use super::shoe::{Shoe, DECK_SIZE};
    pub use super::shuffle::{RandomShuffler, Shuffler, StackedShuffler};
}

pub use prelude::*;
