//! League standings: apply / retract fixture results, correct scores, table order.

use crate::logic::score::validate_score;
use crate::models::{CompetitionError, Fixture, League, MatchId, Score, StandingRow};
use log::debug;

/// What one fixture contributes to one team's row (besides `played += 1`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct Tally {
    won: u32,
    drawn: u32,
    lost: u32,
    goals_for: u32,
    goals_against: u32,
    points: u32,
}

impl Tally {
    /// Contributions for the home and away rows of a `home`-`away` result.
    fn for_result(home: Score, away: Score) -> (Tally, Tally) {
        let mut h = Tally {
            goals_for: home,
            goals_against: away,
            ..Tally::default()
        };
        let mut a = Tally {
            goals_for: away,
            goals_against: home,
            ..Tally::default()
        };
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => {
                h.won = 1;
                h.points = 3;
                a.lost = 1;
            }
            std::cmp::Ordering::Less => {
                a.won = 1;
                a.points = 3;
                h.lost = 1;
            }
            std::cmp::Ordering::Equal => {
                h.drawn = 1;
                h.points = 1;
                a.drawn = 1;
                a.points = 1;
            }
        }
        (h, a)
    }

    /// `row` with this contribution added, or `None` if any counter would overflow.
    fn added_to(self, row: &StandingRow) -> Option<StandingRow> {
        let mut updated = StandingRow {
            team: row.team.clone(),
            played: row.played.checked_add(1)?,
            won: row.won.checked_add(self.won)?,
            drawn: row.drawn.checked_add(self.drawn)?,
            lost: row.lost.checked_add(self.lost)?,
            goals_for: row.goals_for.checked_add(self.goals_for)?,
            goals_against: row.goals_against.checked_add(self.goals_against)?,
            goal_difference: 0,
            points: row.points.checked_add(self.points)?,
        };
        updated.recompute_goal_difference();
        Some(updated)
    }

    fn fits_in(self, row: &StandingRow) -> bool {
        row.played >= 1
            && row.won >= self.won
            && row.drawn >= self.drawn
            && row.lost >= self.lost
            && row.goals_for >= self.goals_for
            && row.goals_against >= self.goals_against
            && row.points >= self.points
    }

    /// Caller checks `fits_in` first.
    fn remove_from(self, row: &mut StandingRow) {
        row.played -= 1;
        row.won -= self.won;
        row.drawn -= self.drawn;
        row.lost -= self.lost;
        row.goals_for -= self.goals_for;
        row.goals_against -= self.goals_against;
        row.points -= self.points;
        row.recompute_goal_difference();
    }
}

/// Indices of the home and away rows.
fn locate_rows(standings: &[StandingRow], fixture: &Fixture) -> Result<(usize, usize), CompetitionError> {
    let find = |team: &str| {
        standings
            .iter()
            .position(|r| r.team == team)
            .ok_or_else(|| CompetitionError::TeamNotFound(team.to_string()))
    };
    Ok((find(fixture.home_team.as_str())?, find(fixture.away_team.as_str())?))
}

/// Add a fixture's stored result to both teams' rows.
///
/// Nothing is changed if either row's totals would overflow.
pub fn apply_result(standings: &mut [StandingRow], fixture: &Fixture) -> Result<(), CompetitionError> {
    let (home, away) = fixture.score().ok_or(CompetitionError::MissingScore)?;
    let (h, a) = locate_rows(standings, fixture)?;
    let (home_tally, away_tally) = Tally::for_result(home, away);

    let home_row = home_tally
        .added_to(&standings[h])
        .ok_or_else(|| CompetitionError::TotalsOverflow(fixture.home_team.clone()))?;
    let away_row = away_tally
        .added_to(&standings[a])
        .ok_or_else(|| CompetitionError::TotalsOverflow(fixture.away_team.clone()))?;
    standings[h] = home_row;
    standings[a] = away_row;
    debug!(
        "Applied {} {}-{} {}",
        fixture.home_team, home, away, fixture.away_team
    );
    Ok(())
}

/// Exact inverse of [`apply_result`], using the fixture's currently stored scores.
///
/// Nothing is changed unless both rows can give back the whole contribution.
pub fn retract_result(standings: &mut [StandingRow], fixture: &Fixture) -> Result<(), CompetitionError> {
    let (home, away) = fixture.score().ok_or(CompetitionError::MissingScore)?;
    let (h, a) = locate_rows(standings, fixture)?;
    let (home_tally, away_tally) = Tally::for_result(home, away);

    if !home_tally.fits_in(&standings[h]) {
        return Err(CompetitionError::ResultNotRecorded(fixture.home_team.clone()));
    }
    if !away_tally.fits_in(&standings[a]) {
        return Err(CompetitionError::ResultNotRecorded(fixture.away_team.clone()));
    }

    home_tally.remove_from(&mut standings[h]);
    away_tally.remove_from(&mut standings[a]);
    debug!(
        "Retracted {} {}-{} {}",
        fixture.home_team, home, away, fixture.away_team
    );
    Ok(())
}

/// Record (or correct) the score of one league fixture.
///
/// A fixture that was already played has its old result retracted before the
/// new scores are stored and applied. Any rejection leaves the league untouched.
pub fn submit_fixture_result(
    league: &mut League,
    fixture_id: MatchId,
    home_score: i64,
    away_score: i64,
) -> Result<(), CompetitionError> {
    let home = validate_score(home_score)?;
    let away = validate_score(away_score)?;
    let idx = league
        .fixtures
        .iter()
        .position(|f| f.id == fixture_id)
        .ok_or(CompetitionError::MatchNotFound(fixture_id))?;

    let mut fixture = league.fixtures[idx].clone();
    let mut standings = league.standings.clone();

    if fixture.played {
        retract_result(&mut standings, &fixture)?;
    }

    fixture.home_score = Some(home);
    fixture.away_score = Some(away);
    fixture.played = true;
    apply_result(&mut standings, &fixture)?;
    league.fixtures[idx] = fixture;
    league.standings = standings;
    Ok(())
}

/// Table order: points, then goal difference, then goals scored, all descending.
/// Remaining ties keep team-list order.
pub fn sorted_standings(standings: &[StandingRow]) -> Vec<&StandingRow> {
    let mut rows: Vec<&StandingRow> = standings.iter().collect();
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });
    rows
}

/// The sorted table as CSV, with a position column.
pub fn standings_csv(standings: &[StandingRow]) -> Result<String, CompetitionError> {
    let export_err = |e: csv::Error| CompetitionError::Storage(e.to_string());
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Pos", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"])
        .map_err(export_err)?;

    for (pos, row) in sorted_standings(standings).into_iter().enumerate() {
        writer
            .write_record([
                (pos + 1).to_string(),
                row.team.clone(),
                row.played.to_string(),
                row.won.to_string(),
                row.drawn.to_string(),
                row.lost.to_string(),
                row.goals_for.to_string(),
                row.goals_against.to_string(),
                row.goal_difference.to_string(),
                row.points.to_string(),
            ])
            .map_err(export_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CompetitionError::Storage(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CompetitionError::Storage(e.to_string()))
}
