use blackjack_lib::{GameStatus, RoundSnapshot};
use serde::Serialize;
use std::fmt::Display;
use std::io::Write;

/// Simple struct for recording the interesting data points accumulated over a session of rounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    pub rounds: u32,
    pub wins: u32,
    pub pushes: u32,
    pub losses: u32,
    pub busts: u32,
    pub blackjacks: u32,
    pub doubles: u32,
    pub winnings: i64,
    pub final_balance: u64,
    pub ended_early: bool,
}

impl SessionSummary {
    pub fn new(starting_balance: u64) -> Self {
        SessionSummary {
            final_balance: starting_balance,
            ..Default::default()
        }
    }

    /// Records a finished round. `balance_before` is the balance prior to the deal,
    /// `snapshot` the state returned by the operation that ended the round.
    pub fn record(&mut self, balance_before: u64, snapshot: &RoundSnapshot, doubled: bool) {
        self.rounds += 1;
        match snapshot.status {
            GameStatus::Blackjack => {
                self.wins += 1;
                self.blackjacks += 1;
            }
            GameStatus::Win => self.wins += 1,
            GameStatus::Push => self.pushes += 1,
            GameStatus::Lose => self.losses += 1,
            GameStatus::Bust => {
                self.losses += 1;
                self.busts += 1;
            }
            GameStatus::DealToBegin | GameStatus::Deal | GameStatus::Hit => {
                log::warn!("recorded a round that has not finished: {}", snapshot.status);
            }
        }
        if doubled {
            self.doubles += 1;
        }
        self.winnings += snapshot.balance as i64 - balance_before as i64;
        self.final_balance = snapshot.balance;
    }

    fn ratio(&self, count: u32) -> f32 {
        if self.rounds == 0 {
            0.0
        } else {
            count as f32 / self.rounds as f32
        }
    }
}

impl Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 80;
        const TEXT_WIDTH: usize = "number of player blackjacks".len() + 20;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        let avg_winnings = if self.rounds == 0 {
            0.0
        } else {
            self.winnings as f32 / self.rounds as f32
        };
        writeln!(f, "{:-^WIDTH$}", "session")?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "rounds played", self.rounds)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands won", self.wins)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands pushed", self.pushes)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands lost", self.losses)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "player busts", self.busts)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "number of player blackjacks", self.blackjacks
        )?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "doubles", self.doubles)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "winnings", self.winnings)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "win percentage",
            self.ratio(self.wins)
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "average winnings per round", avg_winnings
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "final balance", self.final_balance
        )?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "ended early", self.ended_early)?;
        write!(f, "{}", "-".repeat(WIDTH))
    }
}

/// How `write_summary` renders a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Writes `summary` to `writer` in the chosen format, followed by a newline.
pub fn write_summary(
    summary: &SessionSummary,
    format: OutputFormat,
    mut writer: impl Write,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(writer, "{}", summary),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, summary)?;
            writeln!(writer)
        }
    }
}
