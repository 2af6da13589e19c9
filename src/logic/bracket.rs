//! Knockout progression: score a match, move its winner into the next round.

use crate::logic::score::validate_score;
use crate::models::{CompetitionError, KnockoutMatch, MatchId, RoundLabel, TeamName, Tournament};
use log::{debug, info, warn};

/// Record (or correct) the score of a knockout match and advance its winner.
///
/// Rejected without any change when a score is negative, the scores are level,
/// the match does not exist or one of its teams is still unknown.
pub fn submit_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_1: i64,
    score_2: i64,
) -> Result<(), CompetitionError> {
    let s1 = validate_score(score_1)?;
    let s2 = validate_score(score_2)?;
    if s1 == s2 {
        return Err(CompetitionError::DrawNotAllowed);
    }

    let m = tournament
        .get_match_mut(match_id)
        .ok_or(CompetitionError::MatchNotFound(match_id))?;
    let (team_1, team_2) = match (&m.team_1, &m.team_2) {
        (Some(t1), Some(t2)) => (t1.clone(), t2.clone()),
        _ => return Err(CompetitionError::MatchNotReady),
    };

    m.score_1 = Some(s1);
    m.score_2 = Some(s2);
    m.winner = Some(if s1 > s2 { team_1 } else { team_2 });
    m.played = true;
    debug!("{} match {} scored {}-{}", m.round, m.match_number, s1, s2);

    advance_winner(tournament, match_id)
}

/// Move a played match's winner towards the Final.
///
/// The next round is created once, when the last match of this round is
/// played. After that, each winner is written into its fixed seat: match `k`
/// feeds successor `(k-1)/2`, as team 1 when `k` is odd and team 2 when even.
/// Replacing the team in an already played match clears that result and empties
/// the seats it fed in later rounds.
pub fn advance_winner(tournament: &mut Tournament, match_id: MatchId) -> Result<(), CompetitionError> {
    let m = tournament
        .get_match(match_id)
        .ok_or(CompetitionError::MatchNotFound(match_id))?;
    let winner = match &m.winner {
        Some(w) => w.clone(),
        None => return Ok(()),
    };
    let next = match m.round.next() {
        Some(r) => r,
        None => return Ok(()),
    };
    let round = m.round;
    let number = m.match_number;

    let successors: Vec<MatchId> = tournament.round_matches(next).iter().map(|s| s.id).collect();

    if successors.is_empty() {
        let current = tournament.round_matches(round);
        if !current.iter().all(|c| c.played) {
            debug!("{} not finished; waiting before creating {}", round, next);
            return Ok(());
        }
        let winners: Vec<Option<TeamName>> = current.iter().map(|c| c.winner.clone()).collect();
        let new_matches: Vec<KnockoutMatch> = winners
            .chunks(2)
            .zip(1..)
            .map(|(pair, match_number)| {
                KnockoutMatch::new(
                    next,
                    match_number,
                    pair[0].clone(),
                    pair.get(1).cloned().flatten(),
                )
            })
            .collect();
        info!("{} complete; created {} {} match(es)", round, new_matches.len(), next);
        tournament.matches.extend(new_matches);
        return Ok(());
    }

    fill_seat(tournament, round, number, Some(winner))
}

/// Write `occupant` into the seat that match `number` of `round` feeds.
///
/// A played match whose occupant changes is cleared, and the seat it fed in
/// the following round is emptied the same way, up to the Final.
fn fill_seat(
    tournament: &mut Tournament,
    mut round: RoundLabel,
    mut number: u32,
    mut occupant: Option<TeamName>,
) -> Result<(), CompetitionError> {
    while let Some(next) = round.next() {
        let target_id = match tournament.round_matches(next).get(((number - 1) / 2) as usize) {
            Some(m) => m.id,
            None => return Ok(()),
        };
        let target = tournament
            .get_match_mut(target_id)
            .ok_or(CompetitionError::MatchNotFound(target_id))?;
        let target_number = target.match_number;
        let seat = if (number - 1) % 2 == 0 {
            &mut target.team_1
        } else {
            &mut target.team_2
        };
        if *seat == occupant {
            return Ok(());
        }

        debug!(
            "{} match {} seat now {}",
            next,
            target_number,
            occupant.as_deref().unwrap_or("empty")
        );
        *seat = occupant;
        if !target.played {
            return Ok(());
        }
        warn!(
            "{} match {} had a result with a different team; clearing it",
            next, target_number
        );
        target.reset();

        round = next;
        number = target_number;
        occupant = None;
    }
    Ok(())
}
