//! Table configuration and the fixed rules of the game.

use serde::{Deserialize, Serialize};

/// Credits returned for a natural on `bet`: the stake plus 3 to 2, rounded down to whole credits.
pub fn blackjack_payout(bet: u64) -> u64 {
    bet + bet + bet / 2
}

/// The dealer keeps drawing while its total is below this value.
pub const DEALER_DRAW_THRESHOLD: u8 = 17;

/// Share of the balance suggested as the next bet.
pub const SUGGESTED_BET_FACTOR: f64 = 0.1;

/// Struct for configuring a `GameEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub starting_balance: u64,
    pub num_decks: usize,
    pub min_bet: u64,
}

impl GameConfig {
    /// Associated method returning a new `GameConfigBuilder`, unset values fall back to the standard table.
    pub fn new() -> GameConfigBuilder {
        GameConfigBuilder {
            starting_balance: None,
            num_decks: None,
            min_bet: None,
        }
    }
}

impl Default for GameConfig {
    /// 2000 credits, a six deck shoe and a minimum bet of one credit.
    fn default() -> Self {
        GameConfig::new().build()
    }
}

/// Struct to implement the builder pattern for `GameConfig`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameConfigBuilder {
    starting_balance: Option<u64>,
    num_decks: Option<usize>,
    min_bet: Option<u64>,
}

impl GameConfigBuilder {
    /// Method for changing the credits the player starts with.
    pub fn starting_balance(&mut self, balance: u64) -> &mut Self {
        self.starting_balance = Some(balance);
        self
    }

    /// Method for choosing the number of decks in the shoe. At least one deck is always used.
    pub fn num_decks(&mut self, decks: usize) -> &mut Self {
        self.num_decks = Some(decks);
        self
    }

    /// Method for setting the minimum bet accepted by `deal`. At least one credit.
    pub fn min_bet(&mut self, bet: u64) -> &mut Self {
        self.min_bet = Some(bet);
        self
    }

    pub fn build(&mut self) -> GameConfig {
        GameConfig {
            starting_balance: self.starting_balance.unwrap_or(2000),
            num_decks: self.num_decks.unwrap_or(6).max(1),
            min_bet: self.min_bet.unwrap_or(1).max(1),
        }
    }
}
