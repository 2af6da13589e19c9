//! Setup phase: stage team names, then create a tournament or league from them.

use crate::logic::scheduler::{
    generate_knockout_bracket, generate_round_robin_fixtures, initialize_standings,
};
use crate::models::{CompetitionError, League, TeamName, Tournament};
use chrono::{DateTime, Utc};
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Bracket sizes with a named first round.
pub const BRACKET_SIZES: [usize; 4] = [2, 4, 8, 16];

/// Team names collected before a competition is created.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamList {
    teams: Vec<TeamName>,
}

impl TeamList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names(teams: Vec<TeamName>) -> Self {
        Self { teams }
    }

    pub fn names(&self) -> &[TeamName] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Add a team. Names are trimmed and must be non-empty and not already staged.
    pub fn add(&mut self, name: &str) -> Result<(), CompetitionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CompetitionError::EmptyTeamName);
        }
        if self.teams.iter().any(|t| t == name) {
            return Err(CompetitionError::DuplicateTeam(name.to_string()));
        }
        self.teams.push(name.to_string());
        Ok(())
    }

    /// Remove the team at `index`, returning its name.
    pub fn remove(&mut self, index: usize) -> Result<TeamName, CompetitionError> {
        if index >= self.teams.len() {
            return Err(CompetitionError::TeamIndexOutOfRange(index));
        }
        Ok(self.teams.remove(index))
    }

    pub fn clear(&mut self) {
        self.teams.clear();
    }
}

pub fn can_create_tournament(team_count: usize) -> bool {
    BRACKET_SIZES.contains(&team_count)
}

pub fn can_create_league(team_count: usize) -> bool {
    team_count >= 2
}

fn name_or_default(name: Option<&str>, kind: &str, now: DateTime<Utc>) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => format!("{} {}", kind, now.format("%Y-%m-%d")),
    }
}

/// Create a knockout tournament with a randomly drawn first round.
pub fn create_tournament<R: Rng + ?Sized>(
    teams: &[TeamName],
    name: Option<&str>,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<Tournament, CompetitionError> {
    if !can_create_tournament(teams.len()) {
        return Err(CompetitionError::InvalidTeamCount(teams.len()));
    }
    let name = name_or_default(name, "Tournament", now);
    let matches = generate_knockout_bracket(teams, rng);
    info!(
        "Created tournament '{}' with {} teams ({} first-round matches)",
        name,
        teams.len(),
        matches.len()
    );
    Ok(Tournament::new(name, teams.to_vec(), now, matches))
}

/// Create a double round-robin league with zeroed standings.
pub fn create_league(
    teams: &[TeamName],
    name: Option<&str>,
    now: DateTime<Utc>,
) -> Result<League, CompetitionError> {
    if !can_create_league(teams.len()) {
        return Err(CompetitionError::NotEnoughTeams);
    }
    let name = name_or_default(name, "League", now);
    let fixtures = generate_round_robin_fixtures(teams);
    let standings = initialize_standings(teams);
    info!(
        "Created league '{}' with {} teams ({} fixtures)",
        name,
        teams.len(),
        fixtures.len()
    );
    Ok(League::new(name, teams.to_vec(), now, fixtures, standings))
}
