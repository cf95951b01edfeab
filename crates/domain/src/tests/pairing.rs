// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::pairing::balance_within;
use crate::tests::helpers::create_test_teams;
use crate::{
    DomainError, Fixture, Round, Team, TeamTally, balance_home_away, generate_rounds,
    tally_teams, validate_pairings,
};
use std::collections::{BTreeMap, BTreeSet};

#[test]
fn test_four_teams_single_leg() {
    let teams: Vec<Team> = create_test_teams(4);
    let rounds: Vec<Round> = generate_rounds(&teams, 1, true).unwrap();

    assert_eq!(rounds.len(), 3);
    for round in &rounds {
        assert_eq!(round.game_count(), 2);
        assert_eq!(round.bye_team(), None);
    }
    let games: usize = rounds.iter().map(Round::game_count).sum();
    assert_eq!(games, 6);
    assert!(validate_pairings(&rounds, &teams, 1).is_empty());
}

#[test]
fn test_five_teams_rotate_byes() {
    let teams: Vec<Team> = create_test_teams(5);
    let rounds: Vec<Round> = generate_rounds(&teams, 1, true).unwrap();

    assert_eq!(rounds.len(), 5);
    let games: usize = rounds.iter().map(Round::game_count).sum();
    assert_eq!(games, 10);

    let resting: BTreeSet<i64> = rounds.iter().filter_map(Round::bye_team).collect();
    assert_eq!(resting, (1..=5).collect::<BTreeSet<i64>>());
    assert!(validate_pairings(&rounds, &teams, 1).is_empty());
}

#[test]
fn test_eight_teams_two_legs_mirror_each_other() {
    let teams: Vec<Team> = create_test_teams(8);
    let rounds: Vec<Round> = generate_rounds(&teams, 2, true).unwrap();

    assert_eq!(rounds.len(), 14);
    for (first, second) in rounds[..7].iter().zip(&rounds[7..]) {
        assert_eq!(first.leg, 1);
        assert_eq!(second.leg, 2);
        assert_eq!(second.number, first.number + 7);
        for (a, b) in first.fixtures.iter().zip(&second.fixtures) {
            assert_eq!(Some(a.home_team_id), b.away_team_id);
            assert_eq!(a.away_team_id, Some(b.home_team_id));
        }
    }

    let tallies: BTreeMap<i64, TeamTally> = tally_teams(&rounds);
    for tally in tallies.values() {
        assert_eq!(tally.fixtures, 14);
        assert_eq!(tally.home_away_difference(), 0);
    }
    assert!(validate_pairings(&rounds, &teams, 2).is_empty());
}

#[test]
fn test_rounds_are_numbered_continuously() {
    let teams: Vec<Team> = create_test_teams(6);
    let rounds: Vec<Round> = generate_rounds(&teams, 3, false).unwrap();
    let numbers: Vec<u32> = rounds.iter().map(|round| round.number).collect();
    assert_eq!(numbers, (1..=15).collect::<Vec<u32>>());
    for round in &rounds {
        assert!(round.fixtures.iter().all(|f| f.round == round.number));
        assert!(round.fixtures.iter().all(|f| f.leg == round.leg));
    }
}

#[test]
fn test_inactive_teams_are_ignored() {
    let mut teams: Vec<Team> = create_test_teams(5);
    teams[4].active = false;
    let rounds: Vec<Round> = generate_rounds(&teams, 1, true).unwrap();

    assert_eq!(rounds.len(), 3);
    assert!(
        rounds
            .iter()
            .flat_map(|round| &round.fixtures)
            .all(|fixture| !fixture.involves(5))
    );
    assert!(validate_pairings(&rounds, &teams, 1).is_empty());
}

#[test]
fn test_two_teams_single_round() {
    let teams: Vec<Team> = create_test_teams(2);
    let rounds: Vec<Round> = generate_rounds(&teams, 1, true).unwrap();
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].game_count(), 1);
}

#[test]
fn test_generate_rounds_rejects_single_team() {
    let teams: Vec<Team> = create_test_teams(1);
    let result: Result<Vec<Round>, DomainError> = generate_rounds(&teams, 1, true);
    assert_eq!(result, Err(DomainError::NotEnoughTeams { active: 1 }));
}

#[test]
fn test_generate_rounds_rejects_zero_legs() {
    let teams: Vec<Team> = create_test_teams(4);
    let result: Result<Vec<Round>, DomainError> = generate_rounds(&teams, 0, true);
    assert_eq!(result, Err(DomainError::InvalidLegCount(0)));
}

#[test]
fn test_generation_is_deterministic() {
    let teams: Vec<Team> = create_test_teams(7);
    let first: Vec<Round> = generate_rounds(&teams, 2, true).unwrap();
    let second: Vec<Round> = generate_rounds(&teams, 2, true).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_structural_invariants_hold_across_sizes() {
    for count in 2..=16 {
        let teams: Vec<Team> = create_test_teams(count);
        for legs in 1..=3 {
            for alternate in [true, false] {
                let rounds: Vec<Round> = generate_rounds(&teams, legs, alternate).unwrap();
                let violations: Vec<String> = validate_pairings(&rounds, &teams, legs);
                assert!(
                    violations.is_empty(),
                    "{count} teams, {legs} legs, alternate={alternate}: {violations:?}"
                );
            }
        }
    }
}

#[test]
fn test_balance_fixes_a_lopsided_schedule() {
    // Team 1 hosts every game
    let mut rounds: Vec<Round> = vec![
        Round {
            number: 1,
            leg: 1,
            fixtures: vec![Fixture::game(1, 2, 1, 1), Fixture::game(3, 4, 1, 1)],
        },
        Round {
            number: 2,
            leg: 1,
            fixtures: vec![Fixture::game(1, 3, 1, 2), Fixture::game(2, 4, 1, 2)],
        },
        Round {
            number: 3,
            leg: 1,
            fixtures: vec![Fixture::game(1, 4, 1, 3), Fixture::game(2, 3, 1, 3)],
        },
    ];
    balance_home_away(&mut rounds);

    let tallies: BTreeMap<i64, TeamTally> = tally_teams(&rounds);
    for tally in tallies.values() {
        assert!(tally.home_away_difference().abs() <= 1);
    }
    let teams: Vec<Team> = create_test_teams(4);
    assert!(validate_pairings(&rounds, &teams, 1).is_empty());
}

/// Team 1 leads by two and team 5 trails by two, but no single game can be
/// swapped to help without a chain reversal.
fn create_chain_only_imbalance() -> Vec<Round> {
    vec![Round {
        number: 1,
        leg: 1,
        fixtures: vec![
            Fixture::game(1, 2, 1, 1),
            Fixture::game(1, 3, 1, 1),
            Fixture::game(1, 4, 1, 1),
            Fixture::game(5, 1, 1, 1),
            Fixture::game(2, 5, 1, 1),
            Fixture::game(3, 5, 1, 1),
            Fixture::game(4, 5, 1, 1),
            Fixture::game(2, 3, 1, 1),
            Fixture::game(3, 4, 1, 1),
            Fixture::game(4, 2, 1, 1),
        ],
    }]
}

#[test]
fn test_balance_reverses_a_chain_when_no_single_swap_helps() {
    let mut rounds: Vec<Round> = create_chain_only_imbalance();
    balance_home_away(&mut rounds);

    let tallies: BTreeMap<i64, TeamTally> = tally_teams(&rounds);
    assert_eq!(tallies.len(), 5);
    for tally in tallies.values() {
        assert_eq!(tally.home_away_difference(), 0);
    }
}

#[test]
fn test_balance_reports_imbalance_left_at_step_limit() {
    let mut rounds: Vec<Round> = create_chain_only_imbalance();
    assert_eq!(balance_within(&mut rounds, 0), 2);
    assert_eq!(balance_within(&mut rounds, 1), 0);
}

#[test]
fn test_validate_pairings_reports_duplicates_and_missing_pairs() {
    let teams: Vec<Team> = create_test_teams(4);
    let rounds: Vec<Round> = vec![
        Round {
            number: 1,
            leg: 1,
            fixtures: vec![Fixture::game(1, 2, 1, 1), Fixture::game(3, 4, 1, 1)],
        },
        Round {
            number: 2,
            leg: 1,
            fixtures: vec![Fixture::game(2, 1, 1, 2), Fixture::game(4, 3, 1, 2)],
        },
    ];
    let violations: Vec<String> = validate_pairings(&rounds, &teams, 1);
    assert!(violations.contains(&String::from("Teams 1 and 2 meet 2 times in leg 1")));
    assert!(violations.contains(&String::from("Teams 1 and 3 meet 0 times, expected 1")));
}

#[test]
fn test_validate_pairings_reports_round_integrity() {
    let teams: Vec<Team> = create_test_teams(4);
    let rounds: Vec<Round> = vec![Round {
        number: 1,
        leg: 1,
        fixtures: vec![Fixture::game(1, 2, 1, 1), Fixture::game(1, 3, 1, 1)],
    }];
    let violations: Vec<String> = validate_pairings(&rounds, &teams, 1);
    assert!(violations.contains(&String::from("Round 1: team 1 appears 2 times")));
    assert!(violations.contains(&String::from("Round 1: team 4 appears 0 times")));
}

#[test]
fn test_validate_pairings_is_idempotent() {
    let teams: Vec<Team> = create_test_teams(5);
    let mut rounds: Vec<Round> = generate_rounds(&teams, 1, true).unwrap();
    rounds.pop();
    let first: Vec<String> = validate_pairings(&rounds, &teams, 1);
    let second: Vec<String> = validate_pairings(&rounds, &teams, 1);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}
