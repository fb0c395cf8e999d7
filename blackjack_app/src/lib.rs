pub mod api;
pub mod autoplay;
pub mod stats;

pub mod prelude {
    pub use super::{
        api::{configure, GameData, NewGameParams, UserError},
        autoplay::{run_rounds, AutoPlayer},
        stats::{write_summary, OutputFormat, SessionSummary},
    };
    pub use blackjack_lib::prelude::*;
}
