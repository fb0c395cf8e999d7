use blackjack_app::prelude::*;
use clap::Parser;

/// Plays a number of rounds with a fixed policy and prints a summary of the session.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of rounds to play
    rounds: u32,

    /// Credits bet on every round
    #[arg(short, long, default_value_t = 10)]
    bet: u64,

    /// Credits the player starts with
    #[arg(long, default_value_t = 2000)]
    starting_balance: u64,

    /// Number of decks in the shoe
    #[arg(long, default_value_t = 6)]
    decks: usize,

    /// Seed for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Hit while the player's total is below this value
    #[arg(long, default_value_t = 17)]
    stand_on: u8,

    /// Write the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = GameConfig::new()
        .starting_balance(args.starting_balance)
        .num_decks(args.decks)
        .build();
    let shuffler = match args.seed {
        Some(seed) => RandomShuffler::seeded(seed),
        None => RandomShuffler::from_entropy(),
    };
    let mut engine = GameEngine::with_shuffler(config, shuffler);
    let player = AutoPlayer::new(args.stand_on, vec![10, 11]);

    let summary = match run_rounds(&mut engine, args.rounds, args.bet, &player) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    if let Err(e) = write_summary(&summary, format, std::io::stdout().lock()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
