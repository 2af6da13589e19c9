//! Errors shared by the scheduler, standings ledger, bracket and store.

use crate::models::{MatchId, TeamName};

/// Errors that can occur during competition operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CompetitionError {
    /// Score is not a non-negative integer (raw input kept for the message).
    InvalidScore(String),
    /// Knockout matches need a winner.
    DrawNotAllowed,
    /// Fixture has no stored score to apply or retract.
    MissingScore,
    /// No match or fixture with this id in the record.
    MatchNotFound(MatchId),
    /// Knockout match is still waiting for a team to advance into it.
    MatchNotReady,
    /// Team has no standings row (fixtures and standings diverged).
    TeamNotFound(TeamName),
    /// Retracting would take a standings row below zero.
    ResultNotRecorded(TeamName),
    /// Applying a result would overflow a team's totals.
    TotalsOverflow(TeamName),
    /// Team name is empty after trimming.
    EmptyTeamName,
    /// A team with this name is already staged.
    DuplicateTeam(TeamName),
    /// No staged team at this position.
    TeamIndexOutOfRange(usize),
    /// Bracket needs 2, 4, 8 or 16 teams.
    InvalidTeamCount(usize),
    /// League needs at least 2 teams.
    NotEnoughTeams,
    /// The key-value store failed to read or write.
    Storage(String),
}

impl CompetitionError {
    /// True for a missing match or fixture id.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CompetitionError::MatchNotFound(_))
    }

    /// True for rejected user input; false for invariant violations and storage failures.
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            CompetitionError::TeamNotFound(_)
                | CompetitionError::ResultNotRecorded(_)
                | CompetitionError::Storage(_)
        )
    }
}

impl std::fmt::Display for CompetitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompetitionError::InvalidScore(s) => {
                write!(f, "Scores must be non-negative whole numbers (got '{}')", s)
            }
            CompetitionError::DrawNotAllowed => {
                write!(f, "Knockout matches cannot end in a draw")
            }
            CompetitionError::MissingScore => write!(f, "Fixture has no recorded score"),
            CompetitionError::MatchNotFound(_) => write!(f, "Match not found"),
            CompetitionError::MatchNotReady => write!(f, "Both teams must be known before scoring"),
            CompetitionError::TeamNotFound(team) => write!(f, "Team '{}' missing from standings", team),
            CompetitionError::ResultNotRecorded(team) => {
                write!(f, "No recorded result to retract for '{}'", team)
            }
            CompetitionError::TotalsOverflow(team) => {
                write!(f, "Score too large for '{}' totals", team)
            }
            CompetitionError::EmptyTeamName => write!(f, "Please enter a team name"),
            CompetitionError::DuplicateTeam(team) => write!(f, "Team '{}' already exists", team),
            CompetitionError::TeamIndexOutOfRange(i) => write!(f, "No team at position {}", i),
            CompetitionError::InvalidTeamCount(n) => {
                write!(f, "Tournament requires 2, 4, 8, or 16 teams (currently {})", n)
            }
            CompetitionError::NotEnoughTeams => write!(f, "League requires at least 2 teams"),
            CompetitionError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for CompetitionError {}

impl From<serde_json::Error> for CompetitionError {
    fn from(e: serde_json::Error) -> Self {
        CompetitionError::Storage(e.to_string())
    }
}

impl From<std::io::Error> for CompetitionError {
    fn from(e: std::io::Error) -> Self {
        CompetitionError::Storage(e.to_string())
    }
}
