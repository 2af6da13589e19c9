//! Fixture generation: knockout first round, double round-robin schedule, empty standings.

use crate::models::{Fixture, KnockoutMatch, RoundLabel, StandingRow, TeamName};
use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle the teams and pair them off into the first knockout round.
///
/// The caller guarantees 2, 4, 8 or 16 teams. Match `i` (1-based) gets the teams
/// at shuffled positions `2(i-1)` and `2(i-1)+1`.
pub fn generate_knockout_bracket<R: Rng + ?Sized>(
    teams: &[TeamName],
    rng: &mut R,
) -> Vec<KnockoutMatch> {
    let mut shuffled = teams.to_vec();
    shuffled.shuffle(rng);
    let round = RoundLabel::for_team_count(shuffled.len());

    shuffled
        .chunks_exact(2)
        .zip(1..)
        .map(|(pair, match_number)| {
            KnockoutMatch::new(
                round,
                match_number,
                Some(pair[0].clone()),
                Some(pair[1].clone()),
            )
        })
        .collect()
}

/// Double round-robin schedule using the circle method.
///
/// One team stays fixed while the others rotate. An odd team count is padded
/// with a bye slot; fixtures against the bye are not emitted. The second
/// `n-1` rounds repeat the first leg with home and away swapped.
pub fn generate_round_robin_fixtures(teams: &[TeamName]) -> Vec<Fixture> {
    let mut slots: Vec<Option<&TeamName>> = teams.iter().map(Some).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }

    let total = slots.len();
    if total < 2 {
        return Vec::new();
    }
    let rotating = total - 1;
    let rounds = rotating * 2;
    let mut fixtures = Vec::new();

    for round in 0..rounds {
        let mut match_number = 0;
        for slot in 0..total / 2 {
            let mut home = (round + slot) % rotating;
            let mut away = if slot == 0 {
                total - 1
            } else {
                (rotating - slot + round) % rotating
            };

            if round >= rotating {
                std::mem::swap(&mut home, &mut away);
            }

            if let (Some(home_team), Some(away_team)) = (slots[home], slots[away]) {
                match_number += 1;
                fixtures.push(Fixture::new(
                    round as u32 + 1,
                    match_number,
                    home_team.clone(),
                    away_team.clone(),
                ));
            }
        }
    }

    fixtures
}

/// One zeroed standings row per team, in team-list order.
pub fn initialize_standings(teams: &[TeamName]) -> Vec<StandingRow> {
    teams.iter().map(|t| StandingRow::new(t.clone())).collect()
}
