//! Data structures for competitions: knockout brackets, leagues, errors.

mod error;
mod knockout;
mod league;

pub use error::CompetitionError;
pub use knockout::{KnockoutMatch, RoundLabel, Tournament};
pub use league::{Fixture, FixtureFilter, League, StandingRow};

/// Teams are identified by their (unique) name.
pub type TeamName = String;

/// Goals scored in one match by one side.
pub type Score = u32;

/// Unique identifier for a knockout match or league fixture.
pub type MatchId = uuid::Uuid;
