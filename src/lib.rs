//! Competition manager: library with models and business logic for knockout
//! tournaments and round-robin leagues.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    advance_winner, apply_result, can_create_league, can_create_tournament, create_league,
    create_tournament, generate_knockout_bracket, generate_round_robin_fixtures,
    initialize_standings, parse_score, retract_result, sorted_standings, standings_csv,
    submit_fixture_result, submit_result, validate_score, TeamList, BRACKET_SIZES,
};
pub use models::{
    CompetitionError, Fixture, FixtureFilter, KnockoutMatch, League, MatchId, RoundLabel, Score,
    StandingRow, TeamName, Tournament,
};
pub use store::{CompetitionStore, FileStore, MemoryStore, Stats};
