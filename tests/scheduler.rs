//! Integration tests for fixture generation: knockout draw and round-robin schedule.

use fixture_manager_web::{
    generate_knockout_bracket, generate_round_robin_fixtures, initialize_standings, Fixture,
    RoundLabel, StandingRow, TeamName,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};

fn teams(n: usize) -> Vec<TeamName> {
    (0..n).map(|i| format!("T{i}")).collect()
}

#[test]
fn knockout_pairs_every_team_once_with_round_label() {
    for (n, label) in [
        (2, RoundLabel::Final),
        (4, RoundLabel::SemiFinal),
        (8, RoundLabel::QuarterFinal),
        (16, RoundLabel::RoundOf16),
    ] {
        let mut rng = StdRng::seed_from_u64(n as u64);
        let matches = generate_knockout_bracket(&teams(n), &mut rng);
        assert_eq!(matches.len(), n / 2);

        let mut seen = HashSet::new();
        for (i, m) in matches.iter().enumerate() {
            assert_eq!(m.round, label);
            assert_eq!(m.match_number, i as u32 + 1);
            assert!(!m.played);
            assert!(m.score_1.is_none() && m.score_2.is_none() && m.winner.is_none());
            assert!(seen.insert(m.team_1.clone().unwrap()));
            assert!(seen.insert(m.team_2.clone().unwrap()));
        }
        assert_eq!(seen.len(), n);
    }
}

#[test]
fn knockout_draw_is_reproducible_with_same_seed() {
    let t = teams(8);
    let a = generate_knockout_bracket(&t, &mut StdRng::seed_from_u64(42));
    let b = generate_knockout_bracket(&t, &mut StdRng::seed_from_u64(42));
    let pairs = |ms: &[fixture_manager_web::KnockoutMatch]| {
        ms.iter()
            .map(|m| (m.team_1.clone(), m.team_2.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(pairs(&a), pairs(&b));
}

#[test]
fn unusual_bracket_size_falls_back_to_round_one() {
    let matches = generate_knockout_bracket(&teams(6), &mut StdRng::seed_from_u64(1));
    assert_eq!(matches.len(), 3);
    assert!(matches.iter().all(|m| m.round == RoundLabel::RoundOne));
    assert_eq!(RoundLabel::RoundOne.next(), None);
}

/// (home, away) -> number of fixtures.
fn ordered_pair_counts(fixtures: &[Fixture]) -> HashMap<(String, String), usize> {
    let mut counts = HashMap::new();
    for f in fixtures {
        *counts
            .entry((f.home_team.clone(), f.away_team.clone()))
            .or_insert(0) += 1;
    }
    counts
}

#[test]
fn every_pair_meets_once_home_and_once_away() {
    for n in 2..=9 {
        let t = teams(n);
        let fixtures = generate_round_robin_fixtures(&t);
        assert_eq!(fixtures.len(), n * (n - 1), "n = {n}");

        let counts = ordered_pair_counts(&fixtures);
        for a in &t {
            for b in &t {
                if a == b {
                    continue;
                }
                assert_eq!(counts.get(&(a.clone(), b.clone())), Some(&1), "{a} v {b}, n = {n}");
            }
        }
        assert!(fixtures.iter().all(|f| f.home_team != f.away_team));
    }
}

#[test]
fn even_league_plays_everyone_every_matchweek() {
    let t = teams(6);
    let fixtures = generate_round_robin_fixtures(&t);
    let rounds: HashSet<u32> = fixtures.iter().map(|f| f.round).collect();
    assert_eq!(rounds.len(), 10);

    for round in rounds {
        let mut playing = HashSet::new();
        for f in fixtures.iter().filter(|f| f.round == round) {
            assert!(playing.insert(f.home_team.clone()));
            assert!(playing.insert(f.away_team.clone()));
        }
        assert_eq!(playing.len(), 6);
    }
}

#[test]
fn odd_league_gives_each_team_one_bye_per_leg() {
    for n in [3usize, 5, 7] {
        let t = teams(n);
        let fixtures = generate_round_robin_fixtures(&t);
        // Padded to n + 1 slots, so each leg has n matchweeks.
        let leg = n as u32;
        for team in &t {
            let plays_in = |round: u32| {
                fixtures
                    .iter()
                    .any(|f| f.round == round && (&f.home_team == team || &f.away_team == team))
            };
            let first_leg_byes = (1..=leg).filter(|&r| !plays_in(r)).count();
            let second_leg_byes = (leg + 1..=2 * leg).filter(|&r| !plays_in(r)).count();
            assert_eq!(first_leg_byes, 1, "{team}, n = {n}");
            assert_eq!(second_leg_byes, 1, "{team}, n = {n}");
        }
    }
}

#[test]
fn second_leg_reverses_first_leg() {
    let t = teams(4);
    let fixtures = generate_round_robin_fixtures(&t);
    for first in fixtures.iter().filter(|f| f.round <= 3) {
        let mirror = fixtures
            .iter()
            .find(|f| f.round == first.round + 3 && f.match_number == first.match_number)
            .unwrap();
        assert_eq!(mirror.home_team, first.away_team);
        assert_eq!(mirror.away_team, first.home_team);
    }
}

#[test]
fn match_numbers_restart_each_matchweek() {
    let fixtures = generate_round_robin_fixtures(&teams(5));
    let mut by_round: HashMap<u32, Vec<u32>> = HashMap::new();
    for f in &fixtures {
        by_round.entry(f.round).or_default().push(f.match_number);
        assert!(!f.played);
        assert!(f.home_score.is_none() && f.away_score.is_none());
    }
    for numbers in by_round.values() {
        let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
        assert_eq!(numbers, &expected);
    }
}

#[test]
fn fixture_ids_are_unique() {
    let fixtures = generate_round_robin_fixtures(&teams(8));
    let ids: HashSet<_> = fixtures.iter().map(|f| f.id).collect();
    assert_eq!(ids.len(), fixtures.len());
}

#[test]
fn standings_start_at_zero_in_team_order() {
    let t = teams(3);
    let rows = initialize_standings(&t);
    assert_eq!(rows.len(), 3);
    for (row, team) in rows.iter().zip(&t) {
        assert_eq!(row, &StandingRow::new(team.clone()));
        assert_eq!(row.points, 0);
        assert_eq!(row.goal_difference, 0);
    }
}
