//! Knockout bracket: RoundLabel, KnockoutMatch and Tournament.

use crate::models::{MatchId, Score, TeamName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of a knockout round. Ordered by proximity to the Final.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum RoundLabel {
    /// Fallback for bracket sizes outside the table; never advances.
    #[serde(rename = "Round 1")]
    RoundOne,
    #[serde(rename = "Round of 16")]
    RoundOf16,
    #[serde(rename = "Quarter-Final")]
    QuarterFinal,
    #[serde(rename = "Semi-Final")]
    SemiFinal,
    #[serde(rename = "Final")]
    Final,
}

impl RoundLabel {
    /// Bracket rounds in elimination order (fallback first).
    pub const ALL: [RoundLabel; 5] = [
        RoundLabel::RoundOne,
        RoundLabel::RoundOf16,
        RoundLabel::QuarterFinal,
        RoundLabel::SemiFinal,
        RoundLabel::Final,
    ];

    /// Label of the first round for a bracket of `team_count` teams.
    pub fn for_team_count(team_count: usize) -> Self {
        match team_count {
            2 => RoundLabel::Final,
            4 => RoundLabel::SemiFinal,
            8 => RoundLabel::QuarterFinal,
            16 => RoundLabel::RoundOf16,
            _ => RoundLabel::RoundOne,
        }
    }

    /// Round that winners of this round advance into. None for the Final and the fallback.
    pub fn next(self) -> Option<Self> {
        match self {
            RoundLabel::RoundOf16 => Some(RoundLabel::QuarterFinal),
            RoundLabel::QuarterFinal => Some(RoundLabel::SemiFinal),
            RoundLabel::SemiFinal => Some(RoundLabel::Final),
            RoundLabel::Final | RoundLabel::RoundOne => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoundLabel::RoundOne => "Round 1",
            RoundLabel::RoundOf16 => "Round of 16",
            RoundLabel::QuarterFinal => "Quarter-Final",
            RoundLabel::SemiFinal => "Semi-Final",
            RoundLabel::Final => "Final",
        }
    }
}

impl std::fmt::Display for RoundLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single knockout match. Teams are None until a prior winner advances in.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnockoutMatch {
    pub id: MatchId,
    pub round: RoundLabel,
    /// 1-based, unique within the round.
    pub match_number: u32,
    pub team_1: Option<TeamName>,
    pub team_2: Option<TeamName>,
    pub score_1: Option<Score>,
    pub score_2: Option<Score>,
    pub winner: Option<TeamName>,
    pub played: bool,
}

impl KnockoutMatch {
    pub fn new(
        round: RoundLabel,
        match_number: u32,
        team_1: Option<TeamName>,
        team_2: Option<TeamName>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            team_1,
            team_2,
            score_1: None,
            score_2: None,
            winner: None,
            played: false,
        }
    }

    /// Clear scores and winner, keeping the teams.
    pub fn reset(&mut self) {
        self.score_1 = None;
        self.score_2 = None;
        self.winner = None;
        self.played = false;
    }
}

/// A single-elimination tournament record.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub name: String,
    /// Snapshot of the team list at creation.
    pub teams: Vec<TeamName>,
    pub created_at: DateTime<Utc>,
    /// All matches of every round created so far, in creation order.
    pub matches: Vec<KnockoutMatch>,
}

impl Tournament {
    pub fn new(
        name: impl Into<String>,
        teams: Vec<TeamName>,
        created_at: DateTime<Utc>,
        matches: Vec<KnockoutMatch>,
    ) -> Self {
        Self {
            name: name.into(),
            teams,
            created_at,
            matches,
        }
    }

    pub fn get_match(&self, id: MatchId) -> Option<&KnockoutMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut KnockoutMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Matches of one round, in match-number order.
    pub fn round_matches(&self, round: RoundLabel) -> Vec<&KnockoutMatch> {
        let mut matches: Vec<_> = self.matches.iter().filter(|m| m.round == round).collect();
        matches.sort_by_key(|m| m.match_number);
        matches
    }

    /// Rounds that have matches, in elimination order.
    pub fn rounds(&self) -> Vec<(RoundLabel, Vec<&KnockoutMatch>)> {
        RoundLabel::ALL
            .iter()
            .map(|&r| (r, self.round_matches(r)))
            .filter(|(_, m)| !m.is_empty())
            .collect()
    }

    /// Winner of the Final, once it has been played.
    pub fn champion(&self) -> Option<&TeamName> {
        self.matches
            .iter()
            .find(|m| m.round == RoundLabel::Final && m.played)
            .and_then(|m| m.winner.as_ref())
    }

    pub fn is_complete(&self) -> bool {
        self.champion().is_some()
    }
}
