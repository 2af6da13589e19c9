//! Competition logic: scheduling, standings, bracket progression, setup.

mod bracket;
mod scheduler;
mod score;
mod setup;
mod standings;

pub use bracket::{advance_winner, submit_result};
pub use scheduler::{
    generate_knockout_bracket, generate_round_robin_fixtures, initialize_standings,
};
pub use score::{parse_score, validate_score};
pub use setup::{
    can_create_league, can_create_tournament, create_league, create_tournament, TeamList,
    BRACKET_SIZES,
};
pub use standings::{
    apply_result, retract_result, sorted_standings, standings_csv, submit_fixture_result,
};
