//! Plays rounds against a `GameEngine` with a fixed policy, the way a scripted player at the
//! table would, and records the results in a `SessionSummary`.

use crate::stats::SessionSummary;
use blackjack_lib::{Action, EngineError, GameEngine, RoundSnapshot, Shuffler};
use log::{debug, info};

/// A fixed playing policy: double on the first decision when the total is one of `double_on`,
/// hit while below `stand_on`, stand otherwise.
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    pub stand_on: u8,
    pub double_on: Vec<u8>,
}

impl Default for AutoPlayer {
    fn default() -> Self {
        AutoPlayer {
            stand_on: 17,
            double_on: vec![10, 11],
        }
    }
}

impl AutoPlayer {
    pub fn new(stand_on: u8, double_on: Vec<u8>) -> Self {
        AutoPlayer {
            stand_on,
            double_on,
        }
    }

    /// Picks an action for `snapshot` among `available`, the actions the engine currently allows.
    /// A double is only chosen when the balance covers a second stake.
    pub fn decide(&self, snapshot: &RoundSnapshot, available: &[Action]) -> Action {
        let points = snapshot.player_points;
        if available.contains(&Action::Double)
            && self.double_on.contains(&points)
            && snapshot.balance >= snapshot.bet
        {
            Action::Double
        } else if points < self.stand_on && available.contains(&Action::Hit) {
            Action::Hit
        } else {
            Action::Stand
        }
    }

    /// Plays one round with `bet`, returning the final snapshot and whether the player doubled.
    pub fn play_round<S: Shuffler>(
        &self,
        engine: &mut GameEngine<S>,
        bet: u64,
    ) -> Result<(RoundSnapshot, bool), EngineError> {
        let mut snapshot = engine.deal(bet)?;
        let mut doubled = false;
        while snapshot.status.is_in_progress() {
            let action = self.decide(&snapshot, &engine.available_actions());
            debug!("player at {} chooses {action}", snapshot.player_points);
            doubled |= action == Action::Double;
            snapshot = engine.play_option(action)?;
        }
        Ok((snapshot, doubled))
    }
}

/// Plays up to `rounds` rounds of `bet` credits each with `player`'s policy.
/// Ends early, marking the summary, once the balance cannot cover the bet.
pub fn run_rounds<S: Shuffler>(
    engine: &mut GameEngine<S>,
    rounds: u32,
    bet: u64,
    player: &AutoPlayer,
) -> Result<SessionSummary, EngineError> {
    let mut summary = SessionSummary::new(engine.balance());
    for _ in 0..rounds {
        if engine.balance() < bet {
            info!("balance of {} cannot cover a bet of {bet}, stopping", engine.balance());
            summary.ended_early = true;
            break;
        }
        let balance_before = engine.balance();
        let (snapshot, doubled) = player.play_round(engine, bet)?;
        summary.record(balance_before, &snapshot, doubled);
    }
    Ok(summary)
}
