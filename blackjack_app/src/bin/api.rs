use actix_web::{web, App, HttpServer};
use blackjack_app::prelude::*;
use clap::Parser;
use std::sync::Mutex;

/// Serves a single blackjack table over HTTP.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    address: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Credits the player starts with
    #[arg(long)]
    starting_balance: Option<u64>,

    /// Number of decks in the shoe
    #[arg(long)]
    decks: Option<usize>,

    /// Seed for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let params = NewGameParams {
        starting_balance: args.starting_balance,
        num_decks: args.decks,
        min_bet: None,
        seed: args.seed,
    };
    let app_game: GameData = web::Data::new(Mutex::new(params.engine()));

    log::info!("Listening at {}:{}...", args.address, args.port);

    HttpServer::new(move || App::new().app_data(app_game.clone()).configure(configure))
        .bind((args.address.as_str(), args.port))?
        .run()
        .await
}
