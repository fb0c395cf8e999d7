//! JSON HTTP interface to a single `GameEngine`. Every handler takes the engine's mutex for the
//! whole operation, so concurrent requests are applied one at a time.

use actix_web::{
    body::BoxBody,
    error, get,
    http::{header::ContentType, StatusCode},
    post, web, HttpResponse,
};
use blackjack_lib::{Action, EngineError, GameConfig, GameEngine, RandomShuffler, RoundSnapshot};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Mutex, MutexGuard};

/// Shared application state: the one engine every request acts on.
pub type GameData = web::Data<Mutex<GameEngine>>;

/// Parameters for starting a new game, deserialized from JSON. Missing values use the standard table.
#[derive(Debug, Default, Deserialize)]
pub struct NewGameParams {
    pub starting_balance: Option<u64>,
    pub num_decks: Option<usize>,
    pub min_bet: Option<u64>,
    pub seed: Option<u64>,
}

impl From<&NewGameParams> for GameConfig {
    fn from(value: &NewGameParams) -> Self {
        let mut builder = GameConfig::new();
        if let Some(starting_balance) = value.starting_balance {
            builder.starting_balance(starting_balance);
        }
        if let Some(decks) = value.num_decks {
            builder.num_decks(decks);
        }
        if let Some(bet) = value.min_bet {
            builder.min_bet(bet);
        }
        builder.build()
    }
}

impl NewGameParams {
    /// Builds the engine described by these parameters.
    pub fn engine(&self) -> GameEngine {
        let config = GameConfig::from(self);
        match self.seed {
            Some(seed) => GameEngine::with_shuffler(config, RandomShuffler::seeded(seed)),
            None => GameEngine::new(config),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DealParams {
    pub bet: u64,
}

/// The current snapshot along with what the player may do next.
#[derive(Debug, Serialize)]
pub struct TableView {
    #[serde(flatten)]
    pub snapshot: RoundSnapshot,
    pub available_actions: Vec<Action>,
    pub can_deal: bool,
    pub suggested_bet: u64,
}

/// An enum that will handle user facing errors
#[derive(Debug)]
pub enum UserError {
    InternalError,
    BadInput(String),
    Conflict(String),
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserError::InternalError => write!(f, "an internal error occured"),
            UserError::BadInput(s) | UserError::Conflict(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for UserError {}

impl error::ResponseError for UserError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            UserError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            UserError::BadInput(_) => StatusCode::BAD_REQUEST,
            UserError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl From<EngineError> for UserError {
    fn from(value: EngineError) -> Self {
        match value {
            EngineError::IllegalAction { .. } | EngineError::RoundInProgress => {
                UserError::Conflict(value.to_string())
            }
            EngineError::InvalidBet { .. }
            | EngineError::InsufficientBalance { .. }
            | EngineError::BetTooLarge { .. } => UserError::BadInput(value.to_string()),
            EngineError::ShoeExhausted => UserError::InternalError,
        }
    }
}

fn lock_game(app_game: &GameData) -> Result<MutexGuard<'_, GameEngine>, UserError> {
    app_game.lock().map_err(|_| UserError::InternalError)
}

fn reject(e: EngineError) -> UserError {
    warn!("request rejected: {e}");
    UserError::from(e)
}

/// A handler that replaces the current game with a freshly configured one.
#[post("/new-game")]
async fn new_game(
    params: Option<web::Json<NewGameParams>>,
    app_game: GameData,
) -> Result<HttpResponse, UserError> {
    let params = params.map(|p| p.into_inner()).unwrap_or_default();
    let mut game = lock_game(&app_game)?;
    *game = params.engine();
    info!("new game created: {:?}", game.config());
    Ok(HttpResponse::Ok().json(game.snapshot()))
}

/// A handler that deals a new round with the bet in the body of the request.
#[post("/deal")]
async fn deal(
    params: web::Json<DealParams>,
    app_game: GameData,
) -> Result<HttpResponse, UserError> {
    let mut game = lock_game(&app_game)?;
    let snapshot = game.deal(params.bet).map_err(reject)?;
    Ok(HttpResponse::Ok().json(snapshot))
}

fn play(app_game: &GameData, action: Action) -> Result<HttpResponse, UserError> {
    let mut game = lock_game(app_game)?;
    let snapshot = game.play_option(action).map_err(reject)?;
    Ok(HttpResponse::Ok().json(snapshot))
}

#[post("/hit")]
async fn hit(app_game: GameData) -> Result<HttpResponse, UserError> {
    play(&app_game, Action::Hit)
}

#[post("/double")]
async fn double(app_game: GameData) -> Result<HttpResponse, UserError> {
    play(&app_game, Action::Double)
}

#[post("/stand")]
async fn stand(app_game: GameData) -> Result<HttpResponse, UserError> {
    play(&app_game, Action::Stand)
}

/// A handler returning the table as the player currently sees it.
#[get("/state")]
async fn state(app_game: GameData) -> Result<HttpResponse, UserError> {
    let game = lock_game(&app_game)?;
    Ok(HttpResponse::Ok().json(TableView {
        snapshot: game.snapshot(),
        available_actions: game.available_actions(),
        can_deal: game.can_deal(),
        suggested_bet: game.suggested_bet(),
    }))
}

#[get("/balance")]
async fn balance(app_game: GameData) -> Result<HttpResponse, UserError> {
    let game = lock_game(&app_game)?;
    Ok(HttpResponse::Ok().json(json!({ "balance": game.balance() })))
}

/// Registers every handler of the game API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(new_game)
        .service(deal)
        .service(hit)
        .service(double)
        .service(stand)
        .service(state)
        .service(balance);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use blackjack_lib::GameStatus;

    fn seeded_game(seed: u64) -> GameData {
        let params = NewGameParams {
            seed: Some(seed),
            ..Default::default()
        };
        web::Data::new(Mutex::new(params.engine()))
    }

    #[actix_web::test]
    async fn deal_returns_a_snapshot() {
        let game = seeded_game(1);
        let app = test::init_service(App::new().app_data(game.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/deal")
            .set_json(json!({ "bet": 100 }))
            .to_request();
        let snapshot: RoundSnapshot = test::call_and_read_body_json(&app, req).await;

        assert_eq!(snapshot.player_cards.len(), 2);
        assert_eq!(snapshot.dealer_cards.len(), 2);
        assert_eq!(snapshot.bet, 100);
        match snapshot.status {
            GameStatus::Deal => {
                assert_eq!(snapshot.balance, 1900);
                assert!(snapshot.dealer_cards[1].is_face_down());
            }
            GameStatus::Blackjack => assert_eq!(snapshot.balance, 2150),
            other => panic!("unexpected status after a deal: {other}"),
        }
        assert_eq!(game.lock().unwrap().card_count(), 312);
    }

    #[actix_web::test]
    async fn actions_before_a_deal_conflict() {
        let game = seeded_game(2);
        let app = test::init_service(App::new().app_data(game.clone()).configure(configure)).await;

        for uri in ["/hit", "/double", "/stand"] {
            let req = test::TestRequest::post().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CONFLICT);
        }
    }

    #[actix_web::test]
    async fn bad_bets_are_rejected() {
        let game = seeded_game(3);
        let app = test::init_service(App::new().app_data(game.clone()).configure(configure)).await;

        for bet in [0, 5000] {
            let req = test::TestRequest::post()
                .uri("/deal")
                .set_json(json!({ "bet": bet }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
        assert_eq!(game.lock().unwrap().balance(), 2000);
    }

    #[actix_web::test]
    async fn a_round_can_be_played_to_the_end() {
        let game = seeded_game(4);
        let app = test::init_service(App::new().app_data(game.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/deal")
            .set_json(json!({ "bet": 50 }))
            .to_request();
        let mut snapshot: RoundSnapshot = test::call_and_read_body_json(&app, req).await;
        if snapshot.status == GameStatus::Deal {
            let req = test::TestRequest::post()
                .uri("/deal")
                .set_json(json!({ "bet": 50 }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CONFLICT);

            let req = test::TestRequest::post().uri("/stand").to_request();
            snapshot = test::call_and_read_body_json(&app, req).await;
        }
        assert!(snapshot.status.is_terminal());
        assert!(snapshot.dealer_cards.iter().all(|c| !c.is_face_down()));

        let req = test::TestRequest::get().uri("/balance").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["balance"], snapshot.balance);
    }

    #[actix_web::test]
    async fn state_reports_available_actions() {
        let game = seeded_game(5);
        let app = test::init_service(App::new().app_data(game.clone()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/state").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "DEAL_TO_BEGIN");
        assert_eq!(body["can_deal"], true);
        assert_eq!(body["suggested_bet"], 200);
        assert_eq!(body["available_actions"], json!([]));
    }

    #[actix_web::test]
    async fn new_game_applies_parameters() {
        let game = seeded_game(6);
        let app = test::init_service(App::new().app_data(game.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/new-game")
            .set_json(json!({ "starting_balance": 300, "num_decks": 1, "seed": 9 }))
            .to_request();
        let snapshot: RoundSnapshot = test::call_and_read_body_json(&app, req).await;

        assert_eq!(snapshot.balance, 300);
        assert_eq!(snapshot.status, GameStatus::DealToBegin);
        assert_eq!(game.lock().unwrap().card_count(), 52);
    }

    #[actix_web::test]
    async fn oversized_bets_leave_the_game_usable() {
        let game = seeded_game(7);
        let app = test::init_service(App::new().app_data(game.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/new-game")
            .set_json(json!({ "starting_balance": u64::MAX - 50, "seed": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/deal")
            .set_json(json!({ "bet": 100 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/deal")
            .set_json(json!({ "bet": 25 }))
            .to_request();
        let mut snapshot: RoundSnapshot = test::call_and_read_body_json(&app, req).await;
        if snapshot.status.is_in_progress() {
            let req = test::TestRequest::post().uri("/stand").to_request();
            snapshot = test::call_and_read_body_json(&app, req).await;
        }
        assert!(snapshot.status.is_terminal());

        let req = test::TestRequest::post().uri("/new-game").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(game.lock().unwrap().balance(), 2000);
    }
}
