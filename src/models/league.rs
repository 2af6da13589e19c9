//! Round-robin league: Fixture, StandingRow and League.

use crate::models::{MatchId, Score, TeamName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One scheduled league match. Draws are allowed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub id: MatchId,
    /// Matchweek, starting at 1.
    pub round: u32,
    /// 1-based, unique within the matchweek.
    pub match_number: u32,
    pub home_team: TeamName,
    pub away_team: TeamName,
    pub home_score: Option<Score>,
    pub away_score: Option<Score>,
    pub played: bool,
}

impl Fixture {
    pub fn new(round: u32, match_number: u32, home_team: TeamName, away_team: TeamName) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            home_team,
            away_team,
            home_score: None,
            away_score: None,
            played: false,
        }
    }

    /// Stored (home, away) score, if both are set.
    pub fn score(&self) -> Option<(Score, Score)> {
        self.home_score.zip(self.away_score)
    }
}

/// Aggregate league statistics for one team.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub team: TeamName,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Always `goals_for - goals_against`; recomputed after every change.
    pub goal_difference: i64,
    pub points: u32,
}

impl StandingRow {
    pub fn new(team: impl Into<TeamName>) -> Self {
        Self {
            team: team.into(),
            ..Self::default()
        }
    }

    pub fn recompute_goal_difference(&mut self) {
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
    }
}

/// Which fixtures to list.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureFilter {
    #[default]
    All,
    Upcoming,
    Played,
}

impl FixtureFilter {
    pub fn accepts(self, fixture: &Fixture) -> bool {
        match self {
            FixtureFilter::All => true,
            FixtureFilter::Upcoming => !fixture.played,
            FixtureFilter::Played => fixture.played,
        }
    }
}

/// A double round-robin league record.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub name: String,
    pub teams: Vec<TeamName>,
    pub created_at: DateTime<Utc>,
    pub fixtures: Vec<Fixture>,
    /// One row per team, in team-list order. Display order is derived.
    pub standings: Vec<StandingRow>,
}

impl League {
    pub fn new(
        name: impl Into<String>,
        teams: Vec<TeamName>,
        created_at: DateTime<Utc>,
        fixtures: Vec<Fixture>,
        standings: Vec<StandingRow>,
    ) -> Self {
        Self {
            name: name.into(),
            teams,
            created_at,
            fixtures,
            standings,
        }
    }

    pub fn get_fixture(&self, id: MatchId) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.id == id)
    }

    /// Fixtures accepted by `filter`, grouped by matchweek.
    pub fn fixtures_by_round(&self, filter: FixtureFilter) -> BTreeMap<u32, Vec<&Fixture>> {
        let mut rounds: BTreeMap<u32, Vec<&Fixture>> = BTreeMap::new();
        for fixture in self.fixtures.iter().filter(|f| filter.accepts(f)) {
            rounds.entry(fixture.round).or_default().push(fixture);
        }
        rounds
    }

    pub fn is_complete(&self) -> bool {
        !self.fixtures.is_empty() && self.fixtures.iter().all(|f| f.played)
    }

    /// Top of the table once every fixture has been played.
    pub fn champion(&self) -> Option<&StandingRow> {
        if !self.is_complete() {
            return None;
        }
        crate::logic::sorted_standings(&self.standings).into_iter().next()
    }
}
