use crate::game::{Action, GameStatus};
use thiserror::Error;

/// Errors produced by the `GameEngine`. Apart from `ShoeExhausted`, every error is returned
/// before any state is changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("cannot {action} while the round status is {status}")]
    IllegalAction { action: Action, status: GameStatus },

    #[error("a round is already in progress, finish it before dealing again")]
    RoundInProgress,

    #[error("bet of {bet} is below the table minimum of {min_bet}")]
    InvalidBet { bet: u64, min_bet: u64 },

    #[error("insufficient balance: {needed} credits needed, {available} available")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("a bet of {bet} could win more than the balance can hold, the largest accepted bet is {max_bet}")]
    BetTooLarge { bet: u64, max_bet: u64 },

    /// Unreachable while every round returns its cards to the shoe. Raised mid-operation, so the
    /// hands may already hold the cards drawn before it.
    #[error("the shoe ran out of cards")]
    ShoeExhausted,
}
