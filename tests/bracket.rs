//! Integration tests for knockout progression: scoring, winner advancement, corrections.

use chrono::Utc;
use fixture_manager_web::{
    advance_winner, create_tournament, submit_result, CompetitionError, KnockoutMatch, MatchId,
    RoundLabel, Tournament,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn team(name: &str) -> Option<String> {
    Some(name.to_string())
}

/// Semi-finals M1 = A v B, M2 = C v D.
fn four_team_bracket() -> Tournament {
    let matches = vec![
        KnockoutMatch::new(RoundLabel::SemiFinal, 1, team("A"), team("B")),
        KnockoutMatch::new(RoundLabel::SemiFinal, 2, team("C"), team("D")),
    ];
    let teams = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
    Tournament::new("Cup", teams, Utc::now(), matches)
}

/// Quarter-finals M1 = A v B, M2 = C v D, M3 = E v F, M4 = G v H.
fn eight_team_bracket() -> Tournament {
    let names = ["A", "B", "C", "D", "E", "F", "G", "H"];
    let matches = names
        .chunks(2)
        .zip(1..)
        .map(|(p, n)| KnockoutMatch::new(RoundLabel::QuarterFinal, n, team(p[0]), team(p[1])))
        .collect();
    Tournament::new("Cup", names.iter().map(|s| s.to_string()).collect(), Utc::now(), matches)
}

fn id_of(t: &Tournament, round: RoundLabel, number: u32) -> MatchId {
    t.round_matches(round)
        .iter()
        .find(|m| m.match_number == number)
        .unwrap()
        .id
}

#[test]
fn semi_final_winners_meet_in_final_in_match_order() {
    let mut t = four_team_bracket();
    let m1 = id_of(&t, RoundLabel::SemiFinal, 1);
    let m2 = id_of(&t, RoundLabel::SemiFinal, 2);

    submit_result(&mut t, m1, 3, 1).unwrap();
    assert_eq!(t.get_match(m1).unwrap().winner.as_deref(), Some("A"));
    assert!(t.round_matches(RoundLabel::Final).is_empty());

    submit_result(&mut t, m2, 0, 2).unwrap();
    assert_eq!(t.get_match(m2).unwrap().winner.as_deref(), Some("D"));

    let finals = t.round_matches(RoundLabel::Final);
    assert_eq!(finals.len(), 1);
    let f = finals[0];
    assert_eq!(f.match_number, 1);
    assert_eq!(f.team_1.as_deref(), Some("A"));
    assert_eq!(f.team_2.as_deref(), Some("D"));
    assert!(!f.played);
    assert!(f.score_1.is_none() && f.winner.is_none());
}

#[test]
fn final_result_crowns_champion_and_stops_advancement() {
    let mut t = four_team_bracket();
    let id = id_of(&t, RoundLabel::SemiFinal, 1);
    submit_result(&mut t, id, 1, 0).unwrap();
    let id = id_of(&t, RoundLabel::SemiFinal, 2);
    submit_result(&mut t, id, 5, 4).unwrap();
    let final_id = id_of(&t, RoundLabel::Final, 1);

    submit_result(&mut t, final_id, 2, 3).unwrap();
    assert_eq!(t.champion().map(String::as_str), Some("C"));
    assert!(t.is_complete());
    assert_eq!(t.matches.len(), 3);

    advance_winner(&mut t, final_id).unwrap();
    assert_eq!(t.matches.len(), 3);
}

#[test]
fn draws_and_negative_scores_are_rejected_without_changes() {
    let mut t = four_team_bracket();
    let m1 = id_of(&t, RoundLabel::SemiFinal, 1);
    let before = t.matches.clone();

    assert_eq!(submit_result(&mut t, m1, 2, 2), Err(CompetitionError::DrawNotAllowed));
    assert_eq!(
        submit_result(&mut t, m1, 1, -3),
        Err(CompetitionError::InvalidScore("-3".to_string()))
    );
    assert_eq!(t.matches, before);
}

#[test]
fn unknown_or_unready_matches_are_rejected() {
    let mut t = four_team_bracket();
    let missing = uuid::Uuid::new_v4();
    assert_eq!(
        submit_result(&mut t, missing, 1, 0),
        Err(CompetitionError::MatchNotFound(missing))
    );

    let waiting = KnockoutMatch::new(RoundLabel::Final, 1, team("A"), None);
    let waiting_id = waiting.id;
    t.matches.push(waiting);
    assert_eq!(
        submit_result(&mut t, waiting_id, 1, 0),
        Err(CompetitionError::MatchNotReady)
    );
    assert!(!t.get_match(waiting_id).unwrap().played);
}

#[test]
fn next_round_is_created_only_after_the_last_match() {
    let mut t = eight_team_bracket();
    for n in 1..=3 {
        let id = id_of(&t, RoundLabel::QuarterFinal, n);
        submit_result(&mut t, id, 1, 0).unwrap();
        assert!(t.round_matches(RoundLabel::SemiFinal).is_empty());
    }
    let id = id_of(&t, RoundLabel::QuarterFinal, 4);
    submit_result(&mut t, id, 0, 1).unwrap();

    let semis = t.round_matches(RoundLabel::SemiFinal);
    assert_eq!(semis.len(), 2);
    assert_eq!(semis[0].team_1.as_deref(), Some("A"));
    assert_eq!(semis[0].team_2.as_deref(), Some("C"));
    assert_eq!(semis[1].team_1.as_deref(), Some("E"));
    assert_eq!(semis[1].team_2.as_deref(), Some("H"));
}

#[test]
fn correcting_an_earlier_match_overwrites_the_right_seat() {
    let mut t = eight_team_bracket();
    for n in 1..=4 {
        let id = id_of(&t, RoundLabel::QuarterFinal, n);
        submit_result(&mut t, id, 2, 1).unwrap();
    }
    let total = t.matches.len();

    // QF3 flips from E to F: SF2 team 1.
    let id = id_of(&t, RoundLabel::QuarterFinal, 3);
    submit_result(&mut t, id, 0, 1).unwrap();
    // QF2 flips from C to D: SF1 team 2.
    let id = id_of(&t, RoundLabel::QuarterFinal, 2);
    submit_result(&mut t, id, 0, 4).unwrap();

    assert_eq!(t.matches.len(), total);
    let semis = t.round_matches(RoundLabel::SemiFinal);
    assert_eq!(semis.len(), 2);
    assert_eq!(semis[0].team_1.as_deref(), Some("A"));
    assert_eq!(semis[0].team_2.as_deref(), Some("D"));
    assert_eq!(semis[1].team_1.as_deref(), Some("F"));
    assert_eq!(semis[1].team_2.as_deref(), Some("G"));
    assert!(semis.iter().all(|s| !s.played));
}

#[test]
fn resubmitting_the_same_score_changes_nothing() {
    let mut t = four_team_bracket();
    let m1 = id_of(&t, RoundLabel::SemiFinal, 1);
    submit_result(&mut t, m1, 3, 1).unwrap();
    let id = id_of(&t, RoundLabel::SemiFinal, 2);
    submit_result(&mut t, id, 2, 0).unwrap();
    let snapshot = t.matches.clone();

    submit_result(&mut t, m1, 3, 1).unwrap();
    assert_eq!(t.matches, snapshot);
}

#[test]
fn changing_a_finalist_clears_the_played_final() {
    let mut t = four_team_bracket();
    let m1 = id_of(&t, RoundLabel::SemiFinal, 1);
    submit_result(&mut t, m1, 3, 1).unwrap();
    let id = id_of(&t, RoundLabel::SemiFinal, 2);
    submit_result(&mut t, id, 2, 0).unwrap();
    let final_id = id_of(&t, RoundLabel::Final, 1);
    submit_result(&mut t, final_id, 1, 0).unwrap();
    assert_eq!(t.champion().map(String::as_str), Some("A"));

    submit_result(&mut t, m1, 0, 1).unwrap();
    let f = t.get_match(final_id).unwrap();
    assert_eq!(f.team_1.as_deref(), Some("B"));
    assert!(!f.played);
    assert!(f.winner.is_none());
    assert!(t.champion().is_none());
}

#[test]
fn sixteen_team_bracket_runs_to_a_single_champion() {
    let teams: Vec<String> = (0..16).map(|i| format!("T{i}")).collect();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut t = create_tournament(&teams, Some("Big Cup"), &mut rng, Utc::now()).unwrap();

    for round in [
        RoundLabel::RoundOf16,
        RoundLabel::QuarterFinal,
        RoundLabel::SemiFinal,
        RoundLabel::Final,
    ] {
        let ids: Vec<MatchId> = t.round_matches(round).iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 16 >> (RoundLabel::ALL.iter().position(|r| *r == round).unwrap()));
        for id in ids {
            submit_result(&mut t, id, 1, 0).unwrap();
        }
    }

    assert_eq!(t.matches.len(), 15);
    let rounds: Vec<RoundLabel> = t.rounds().into_iter().map(|(r, _)| r).collect();
    assert_eq!(
        rounds,
        vec![
            RoundLabel::RoundOf16,
            RoundLabel::QuarterFinal,
            RoundLabel::SemiFinal,
            RoundLabel::Final
        ]
    );
    let first = t.round_matches(RoundLabel::RoundOf16)[0].team_1.clone();
    assert_eq!(t.champion().cloned(), first);
}

#[test]
fn correcting_a_quarter_final_clears_every_result_it_fed() {
    let mut t = eight_team_bracket();
    for round in [RoundLabel::QuarterFinal, RoundLabel::SemiFinal, RoundLabel::Final] {
        let ids: Vec<MatchId> = t.round_matches(round).iter().map(|m| m.id).collect();
        for id in ids {
            submit_result(&mut t, id, 1, 0).unwrap();
        }
    }
    assert_eq!(t.champion().map(String::as_str), Some("A"));
    let sf2_before = t.round_matches(RoundLabel::SemiFinal)[1].clone();

    // QF1 flips from A to B.
    let id = id_of(&t, RoundLabel::QuarterFinal, 1);
    submit_result(&mut t, id, 0, 1).unwrap();

    let sf1 = t.round_matches(RoundLabel::SemiFinal)[0].clone();
    assert_eq!(sf1.team_1.as_deref(), Some("B"));
    assert_eq!(sf1.team_2.as_deref(), Some("C"));
    assert!(!sf1.played && sf1.winner.is_none());

    let f = t.round_matches(RoundLabel::Final)[0].clone();
    assert_eq!(f.team_1, None);
    assert_eq!(f.team_2.as_deref(), Some("E"));
    assert!(!f.played && f.winner.is_none());
    assert!(t.champion().is_none());
    assert_eq!(t.round_matches(RoundLabel::SemiFinal)[1], &sf2_before);
    assert_eq!(
        submit_result(&mut t, f.id, 1, 0),
        Err(CompetitionError::MatchNotReady)
    );

    submit_result(&mut t, sf1.id, 0, 3).unwrap();
    submit_result(&mut t, f.id, 1, 2).unwrap();
    assert_eq!(t.champion().map(String::as_str), Some("E"));
    assert_eq!(t.matches.len(), 7);
}
