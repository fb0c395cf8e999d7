//! The game engine: one shoe, the player's and the dealer's hands, the credit balance and the
//! round state machine that drives them.

use crate::card::Card;
use crate::config::{blackjack_payout, GameConfig, DEALER_DRAW_THRESHOLD, SUGGESTED_BET_FACTOR};
use crate::error::EngineError;
use crate::hand::{hand_value, Hand, BLACKJACK};
use crate::shoe::Shoe;
use crate::shuffle::{RandomShuffler, Shuffler};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Status of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// No round has been dealt yet.
    DealToBegin,
    /// Cards are dealt and the player has not acted.
    Deal,
    /// The player has drawn at least one extra card and may keep acting.
    Hit,
    Blackjack,
    Win,
    Bust,
    Lose,
    Push,
}

impl GameStatus {
    /// True while the player still has decisions to make.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, GameStatus::Deal | GameStatus::Hit)
    }

    /// True once the round has been settled.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameStatus::Blackjack
                | GameStatus::Win
                | GameStatus::Bust
                | GameStatus::Lose
                | GameStatus::Push
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameStatus::DealToBegin => "DEAL_TO_BEGIN",
            GameStatus::Deal => "DEAL",
            GameStatus::Hit => "HIT",
            GameStatus::Blackjack => "BLACKJACK",
            GameStatus::Win => "WIN",
            GameStatus::Bust => "BUST",
            GameStatus::Lose => "LOSE",
            GameStatus::Push => "PUSH",
        }
    }
}

impl Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A decision the player can make once the cards are dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Hit,
    Double,
    Stand,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Hit => write!(f, "hit"),
            Action::Double => write!(f, "double"),
            Action::Stand => write!(f, "stand"),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hit" => Ok(Action::Hit),
            "double" | "double down" => Ok(Action::Double),
            "stand" => Ok(Action::Stand),
            other => Err(format!("option `{other}` not available")),
        }
    }
}

/// Everything the presentation layer needs to render the table after an operation.
/// While the round is in progress only the dealer's first card is shown, the rest are
/// replaced with `Card::face_down()` and `dealer_points` counts the first card alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub player_points: u8,
    pub dealer_points: u8,
    pub balance: u64,
    pub bet: u64,
    pub status: GameStatus,
}

/// Stateful rules object for a single player against the dealer.
/// Owns the shoe, both hands, the balance and the bet of the current round.
pub struct GameEngine<S: Shuffler = RandomShuffler> {
    config: GameConfig,
    shoe: Shoe,
    player: Hand,
    dealer: Hand,
    balance: u64,
    bet: u64,
    status: GameStatus,
    shuffler: S,
}

impl GameEngine<RandomShuffler> {
    /// Associated function for building a new engine shuffled from system entropy.
    pub fn new(config: GameConfig) -> GameEngine<RandomShuffler> {
        GameEngine::with_shuffler(config, RandomShuffler::from_entropy())
    }
}

impl Default for GameEngine<RandomShuffler> {
    fn default() -> Self {
        GameEngine::new(GameConfig::default())
    }
}

impl<S: Shuffler> GameEngine<S> {
    /// Associated function for building a new engine that shuffles with `shuffler`.
    pub fn with_shuffler(config: GameConfig, shuffler: S) -> GameEngine<S> {
        GameEngine {
            shoe: Shoe::new(config.num_decks),
            player: Hand::new(),
            dealer: Hand::new(),
            balance: config.starting_balance,
            bet: 0,
            status: GameStatus::DealToBegin,
            shuffler,
            config,
        }
    }

    /// Starts a new round: returns the previous round's cards to the shoe, reshuffles,
    /// deals two cards each (player first) and takes `bet` from the balance.
    /// A natural is paid immediately and ends the round.
    pub fn deal(&mut self, bet: u64) -> Result<RoundSnapshot, EngineError> {
        if self.status.is_in_progress() {
            return Err(EngineError::RoundInProgress);
        }
        if bet < self.config.min_bet {
            return Err(EngineError::InvalidBet {
                bet,
                min_bet: self.config.min_bet,
            });
        }
        if bet > self.balance {
            return Err(EngineError::InsufficientBalance {
                needed: bet,
                available: self.balance,
            });
        }
        // The best outcome of a round, a won double, leaves the balance `2 * bet` higher.
        let max_bet = (u64::MAX - self.balance) / 2;
        if bet > max_bet {
            return Err(EngineError::BetTooLarge { bet, max_bet });
        }

        let previous = self
            .player
            .take_cards()
            .into_iter()
            .chain(self.dealer.take_cards());
        self.shoe.return_cards(previous);
        self.shoe.shuffle(&mut self.shuffler);

        for _ in 0..2 {
            self.player.push(self.shoe.draw()?);
            self.dealer.push(self.shoe.draw()?);
        }

        self.balance -= bet;
        self.bet = bet;
        debug!("dealt a round with a bet of {bet}, balance now {}", self.balance);

        if self.player.is_natural() {
            let payout = blackjack_payout(bet);
            self.balance += payout;
            self.status = GameStatus::Blackjack;
            info!("natural blackjack, paid {payout}");
        } else {
            self.status = GameStatus::Deal;
        }

        Ok(self.snapshot())
    }

    /// Draws one card for the player. A bust ends the round, reaching 21 stands automatically.
    pub fn hit(&mut self) -> Result<RoundSnapshot, EngineError> {
        self.ensure_legal(Action::Hit)?;

        self.player.push(self.shoe.draw()?);
        let points = self.player.value();
        debug!("player hits, total {points}");

        if self.player.is_bust() {
            self.status = GameStatus::Bust;
            info!("player busts with {points}, lost {}", self.bet);
            Ok(self.snapshot())
        } else if points == BLACKJACK {
            self.settle()
        } else {
            self.status = GameStatus::Hit;
            Ok(self.snapshot())
        }
    }

    /// Doubles the bet, draws exactly one card for the player and ends the player's turn.
    /// Only allowed as the first decision of a round.
    pub fn double(&mut self) -> Result<RoundSnapshot, EngineError> {
        self.ensure_legal(Action::Double)?;
        if self.bet > self.balance {
            return Err(EngineError::InsufficientBalance {
                needed: self.bet,
                available: self.balance,
            });
        }

        self.player.push(self.shoe.draw()?);
        self.balance -= self.bet;
        self.bet *= 2;
        let points = self.player.value();
        debug!("player doubles to {}, total {points}", self.bet);

        if self.player.is_bust() {
            self.status = GameStatus::Bust;
            info!("player busts with {points} after doubling, lost {}", self.bet);
            Ok(self.snapshot())
        } else {
            self.settle()
        }
    }

    /// Ends the player's turn; the dealer plays out its hand and the round is settled.
    pub fn stand(&mut self) -> Result<RoundSnapshot, EngineError> {
        self.ensure_legal(Action::Stand)?;
        self.settle()
    }

    /// Dispatches `action` to the matching operation.
    pub fn play_option(&mut self, action: Action) -> Result<RoundSnapshot, EngineError> {
        match action {
            Action::Hit => self.hit(),
            Action::Double => self.double(),
            Action::Stand => self.stand(),
        }
    }

    /// The decisions currently open to the player.
    pub fn available_actions(&self) -> Vec<Action> {
        match self.status {
            GameStatus::Deal => vec![Action::Hit, Action::Double, Action::Stand],
            GameStatus::Hit => vec![Action::Hit, Action::Stand],
            GameStatus::DealToBegin
            | GameStatus::Blackjack
            | GameStatus::Win
            | GameStatus::Bust
            | GameStatus::Lose
            | GameStatus::Push => vec![],
        }
    }

    /// True when a new round may be dealt.
    pub fn can_deal(&self) -> bool {
        !self.status.is_in_progress()
    }

    /// Default bet for the next round, a tenth of the balance but never below the table minimum.
    pub fn suggested_bet(&self) -> u64 {
        u64::max(
            (self.balance as f64 * SUGGESTED_BET_FACTOR) as u64,
            self.config.min_bet,
        )
    }

    /// Current state of the table as the player may see it.
    pub fn snapshot(&self) -> RoundSnapshot {
        let (dealer_cards, dealer_points) = if self.status.is_in_progress() {
            let visible = &self.dealer.cards()[..1.min(self.dealer.len())];
            let cards = visible
                .iter()
                .cloned()
                .chain(
                    std::iter::repeat_with(Card::face_down)
                        .take(self.dealer.len() - visible.len()),
                )
                .collect::<Vec<Card>>();
            (cards, hand_value(visible))
        } else {
            (self.dealer.cards().to_vec(), self.dealer.value())
        };

        RoundSnapshot {
            player_cards: self.player.cards().to_vec(),
            dealer_cards,
            player_points: self.player.value(),
            dealer_points,
            balance: self.balance,
            bet: self.bet,
            status: self.status,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Credits committed to the current (or last) round.
    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn shoe_len(&self) -> usize {
        self.shoe.len()
    }

    /// Cards in the shoe plus both hands, constant for the life of the engine.
    pub fn card_count(&self) -> usize {
        self.shoe.len() + self.player.len() + self.dealer.len()
    }

    fn ensure_legal(&self, action: Action) -> Result<(), EngineError> {
        if self.available_actions().contains(&action) {
            Ok(())
        } else {
            Err(EngineError::IllegalAction {
                action,
                status: self.status,
            })
        }
    }

    /// Dealer draws to the threshold, then the player's total is compared and paid.
    fn settle(&mut self) -> Result<RoundSnapshot, EngineError> {
        while self.dealer.value() < DEALER_DRAW_THRESHOLD {
            self.dealer.push(self.shoe.draw()?);
        }

        let player_points = self.player.value();
        let dealer_points = self.dealer.value();

        self.status = if dealer_points > BLACKJACK || dealer_points < player_points {
            self.balance += self.bet * 2;
            GameStatus::Win
        } else if dealer_points == player_points {
            self.balance += self.bet;
            GameStatus::Push
        } else {
            GameStatus::Lose
        };
        info!(
            "round settled {}: player {player_points}, dealer {dealer_points}, balance {}",
            self.status, self.balance
        );

        Ok(self.snapshot())
    }
}
