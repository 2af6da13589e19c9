//! Score input validation.

use crate::models::{CompetitionError, Score};

/// Accept a raw score only if it is a non-negative integer that fits a `Score`.
pub fn validate_score(raw: i64) -> Result<Score, CompetitionError> {
    Score::try_from(raw).map_err(|_| CompetitionError::InvalidScore(raw.to_string()))
}

/// Parse a score typed by a user (surrounding whitespace allowed).
pub fn parse_score(input: &str) -> Result<Score, CompetitionError> {
    let trimmed = input.trim();
    let raw: i64 = trimmed
        .parse()
        .map_err(|_| CompetitionError::InvalidScore(trimmed.to_string()))?;
    validate_score(raw)
}
