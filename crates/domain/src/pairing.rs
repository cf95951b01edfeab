// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Round-robin pairing generation.
//!
//! This module builds the abstract fixture structure of a season:
//! an ordered list of rounds, each pairing every active team exactly once.
//!
//! ## Invariants
//!
//! - Every unordered pair of active teams meets exactly `legs` times
//! - Within a round no team appears twice
//! - With an odd team count exactly one team rests per round, and every
//!   team rests exactly once per leg
//! - After balancing, `|home - away| <= 1` for every team
//!
//! ## Algorithm
//!
//! The circle method: the first team stays fixed, position `i` meets
//! position `len - 1 - i`, then every team except the first rotates one
//! place (the last is reinserted at index 1). An odd team count adds a
//! synthetic bye slot. Each leg replays the same rotation; with
//! alternation enabled, even legs swap home and away.

use crate::error::DomainError;
use crate::types::{Fixture, Round, Team};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use tracing::{debug, warn};

/// Upper bound on path reversals performed while balancing.
const MAX_BALANCING_STEPS: usize = 10_000;

/// Per-team appearance counts derived from a set of rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamTally {
    /// Games played (byes excluded).
    pub fixtures: usize,
    /// Games played at home.
    pub home: usize,
    /// Games played away.
    pub away: usize,
    /// Rounds spent resting.
    pub byes: usize,
}

impl TeamTally {
    /// Home games minus away games.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn home_away_difference(&self) -> i64 {
        self.home as i64 - self.away as i64
    }
}

/// Generates the round-robin rounds for a season.
///
/// Inactive teams are ignored. Rounds are numbered continuously across
/// legs starting at 1.
///
/// # Arguments
///
/// * `teams` - The teams of the season, in the order they should be seeded
/// * `legs` - Number of complete round-robin passes
/// * `alternate_home_away_on_even_legs` - Swap home and away on legs 2, 4, ...
///
/// # Errors
///
/// Returns an error if:
/// - Fewer than two teams are active
/// - `legs` is zero
pub fn generate_rounds(
    teams: &[Team],
    legs: u8,
    alternate_home_away_on_even_legs: bool,
) -> Result<Vec<Round>, DomainError> {
    crate::validation::validate_leg_count(legs)?;
    crate::validation::validate_team_count(teams)?;

    let mut slots: Vec<Option<i64>> = teams
        .iter()
        .filter(|team| team.active)
        .map(|team| Some(team.team_id))
        .collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }

    let rounds_per_leg: usize = slots.len() - 1;
    let mut rounds: Vec<Round> = Vec::with_capacity(rounds_per_leg * usize::from(legs));
    let mut round_number: u32 = 0;

    for leg in 1..=legs {
        let swap: bool = alternate_home_away_on_even_legs && leg % 2 == 0;
        let mut rotation: Vec<Option<i64>> = slots.clone();

        for _ in 0..rounds_per_leg {
            round_number += 1;
            let mut fixtures: Vec<Fixture> = circle_round(&rotation, leg, round_number);
            if swap {
                fixtures.iter_mut().for_each(Fixture::swap_home_away);
            }
            rounds.push(Round {
                number: round_number,
                leg,
                fixtures,
            });
            rotate(&mut rotation);
        }
    }

    balance_home_away(&mut rounds);

    debug!(
        teams = slots.iter().flatten().count(),
        legs,
        rounds = rounds.len(),
        "Generated round-robin pairings"
    );

    Ok(rounds)
}

/// Pairs position `i` with position `len - 1 - i`.
fn circle_round(rotation: &[Option<i64>], leg: u8, round: u32) -> Vec<Fixture> {
    let len: usize = rotation.len();
    (0..len / 2)
        .filter_map(|i| match (rotation[i], rotation[len - 1 - i]) {
            (Some(home), Some(away)) => Some(Fixture::game(home, away, leg, round)),
            (Some(team), None) | (None, Some(team)) => Some(Fixture::bye(team, leg, round)),
            (None, None) => None,
        })
        .collect()
}

/// Rotates every slot except the first by one position.
fn rotate(rotation: &mut Vec<Option<i64>>) {
    if rotation.len() > 2
        && let Some(last) = rotation.pop()
    {
        rotation.insert(1, last);
    }
}

/// Balances home and away assignments in place.
///
/// A greedy sweep first swaps every game whose home side leads its
/// opponent by three or more in `home - away` difference; each such
/// swap strictly reduces the overall imbalance. Teams the sweep cannot
/// fix are then resolved by reversing a chain of games leading from a
/// team with a surplus to a team with a deficit, which leaves every team
/// on the chain except its two ends unchanged.
///
/// Pairings are never altered, only their orientation.
pub fn balance_home_away(rounds: &mut [Round]) {
    balance_within(rounds, MAX_BALANCING_STEPS);
}

/// Runs the balancing passes with at most `max_reversals` chain reversals
/// and returns the worst remaining `|home - away|`.
pub(crate) fn balance_within(rounds: &mut [Round], max_reversals: usize) -> u64 {
    let mut differences: HashMap<i64, i64> = home_away_differences(rounds);

    let mut swapped: usize = 0;
    for round in rounds.iter_mut() {
        for fixture in &mut round.fixtures {
            let Some(away) = fixture.away_team_id else {
                continue;
            };
            let home_diff: i64 = differences.get(&fixture.home_team_id).copied().unwrap_or(0);
            let away_diff: i64 = differences.get(&away).copied().unwrap_or(0);
            if home_diff - away_diff >= 3 {
                *differences.entry(fixture.home_team_id).or_insert(0) -= 2;
                *differences.entry(away).or_insert(0) += 2;
                fixture.swap_home_away();
                swapped += 1;
            }
        }
    }

    let mut reversals: usize = 0;
    while reversals < max_reversals {
        let Some(path) = find_rebalancing_path(rounds, &differences) else {
            break;
        };
        for (round_index, fixture_index) in path {
            let fixture: &mut Fixture = &mut rounds[round_index].fixtures[fixture_index];
            if let Some(away) = fixture.away_team_id {
                *differences.entry(fixture.home_team_id).or_insert(0) -= 2;
                *differences.entry(away).or_insert(0) += 2;
                fixture.swap_home_away();
            }
        }
        reversals += 1;
    }

    let worst: u64 = differences
        .values()
        .map(|diff| diff.unsigned_abs())
        .max()
        .unwrap_or(0);
    if reversals >= max_reversals && worst > 1 {
        warn!(
            reversals,
            worst_imbalance = worst,
            "Home/away balancing stopped at its step limit"
        );
    }

    debug!(swapped, reversals, "Balanced home and away assignments");
    worst
}

/// Computes `home - away` for every team appearing in a game.
fn home_away_differences(rounds: &[Round]) -> HashMap<i64, i64> {
    let mut differences: HashMap<i64, i64> = HashMap::new();
    for fixture in rounds.iter().flat_map(|round| round.fixtures.iter()) {
        if let Some(away) = fixture.away_team_id {
            *differences.entry(fixture.home_team_id).or_insert(0) += 1;
            *differences.entry(away).or_insert(0) -= 1;
        }
    }
    differences
}

/// Finds a chain of games whose reversal reduces the worst imbalance.
///
/// For a team with a surplus of at least two, the chain follows
/// home → away edges until it reaches a team with a deficit. For a team
/// with a deficit of at least two, it follows away → home edges until it
/// reaches a team with a surplus. Such a team always exists in a
/// round-robin, since every pair of teams is connected by a game.
fn find_rebalancing_path(
    rounds: &[Round],
    differences: &HashMap<i64, i64>,
) -> Option<Vec<(usize, usize)>> {
    let mut ordered: Vec<(i64, i64)> = differences.iter().map(|(t, d)| (*t, *d)).collect();
    ordered.sort_unstable();

    if let Some((start, _)) = ordered.iter().find(|(_, diff)| *diff >= 2) {
        return search_path(rounds, differences, *start, true);
    }
    if let Some((start, _)) = ordered.iter().find(|(_, diff)| *diff <= -2) {
        return search_path(rounds, differences, *start, false);
    }
    None
}

/// Breadth-first search over games starting at `start`.
///
/// With `from_surplus`, edges are followed from the home team to the away
/// team and the search stops at a team with a negative difference;
/// otherwise edges are followed backwards and the search stops at a team
/// with a positive difference.
fn search_path(
    rounds: &[Round],
    differences: &HashMap<i64, i64>,
    start: i64,
    from_surplus: bool,
) -> Option<Vec<(usize, usize)>> {
    let mut edges: BTreeMap<i64, Vec<(i64, (usize, usize))>> = BTreeMap::new();
    for (round_index, round) in rounds.iter().enumerate() {
        for (fixture_index, fixture) in round.fixtures.iter().enumerate() {
            if let Some(away) = fixture.away_team_id {
                let (from, to): (i64, i64) = if from_surplus {
                    (fixture.home_team_id, away)
                } else {
                    (away, fixture.home_team_id)
                };
                edges
                    .entry(from)
                    .or_default()
                    .push((to, (round_index, fixture_index)));
            }
        }
    }

    let mut parents: HashMap<i64, (i64, (usize, usize))> = HashMap::new();
    let mut visited: BTreeSet<i64> = BTreeSet::from([start]);
    let mut queue: VecDeque<i64> = VecDeque::from([start]);

    while let Some(team) = queue.pop_front() {
        let diff: i64 = differences.get(&team).copied().unwrap_or(0);
        let reached: bool = if from_surplus { diff < 0 } else { diff > 0 };
        if team != start && reached {
            let mut path: Vec<(usize, usize)> = Vec::new();
            let mut cursor: i64 = team;
            while let Some((parent, location)) = parents.get(&cursor) {
                path.push(*location);
                cursor = *parent;
            }
            return Some(path);
        }
        for (next, location) in edges.get(&team).into_iter().flatten() {
            if visited.insert(*next) {
                parents.insert(*next, (team, *location));
                queue.push_back(*next);
            }
        }
    }
    None
}

/// Derives per-team appearance counts from rounds.
#[must_use]
pub fn tally_teams(rounds: &[Round]) -> BTreeMap<i64, TeamTally> {
    let mut tallies: BTreeMap<i64, TeamTally> = BTreeMap::new();
    for fixture in rounds.iter().flat_map(|round| round.fixtures.iter()) {
        match fixture.away_team_id {
            Some(away) => {
                let home: &mut TeamTally = tallies.entry(fixture.home_team_id).or_default();
                home.fixtures += 1;
                home.home += 1;
                let away: &mut TeamTally = tallies.entry(away).or_default();
                away.fixtures += 1;
                away.away += 1;
            }
            None => {
                tallies.entry(fixture.home_team_id).or_default().byes += 1;
            }
        }
    }
    tallies
}

/// Re-derives the structural invariants of generated rounds.
///
/// This function is pure: calling it twice on the same input yields the
/// same list.
///
/// # Arguments
///
/// * `rounds` - The generated rounds
/// * `teams` - The teams the rounds were generated from
/// * `legs` - The number of legs requested
///
/// # Returns
///
/// Human-readable violations, empty when the rounds are sound.
#[must_use]
pub fn validate_pairings(rounds: &[Round], teams: &[Team], legs: u8) -> Vec<String> {
    let mut violations: Vec<String> = Vec::new();
    let active: BTreeSet<i64> = teams
        .iter()
        .filter(|team| team.active)
        .map(|team| team.team_id)
        .collect();
    let odd: bool = active.len() % 2 != 0;

    // Round integrity
    for round in rounds {
        let mut appearances: BTreeMap<i64, usize> = BTreeMap::new();
        for fixture in &round.fixtures {
            *appearances.entry(fixture.home_team_id).or_insert(0) += 1;
            if let Some(away) = fixture.away_team_id {
                *appearances.entry(away).or_insert(0) += 1;
            }
        }
        for team_id in &active {
            let count: usize = appearances.get(team_id).copied().unwrap_or(0);
            if count != 1 {
                violations.push(format!(
                    "Round {}: team {team_id} appears {count} times",
                    round.number
                ));
            }
        }
        for team_id in appearances.keys().filter(|id| !active.contains(*id)) {
            violations.push(format!(
                "Round {}: team {team_id} is not an active team",
                round.number
            ));
        }
        let byes: usize = round.fixtures.iter().filter(|f| f.is_bye()).count();
        let expected_byes: usize = usize::from(odd);
        if byes != expected_byes {
            violations.push(format!(
                "Round {}: {byes} bye(s), expected {expected_byes}",
                round.number
            ));
        }
    }

    // Duplicates within a leg and completeness across legs
    let mut pair_legs: BTreeMap<(i64, i64, u8), usize> = BTreeMap::new();
    let mut pair_totals: BTreeMap<(i64, i64), usize> = BTreeMap::new();
    for fixture in rounds.iter().flat_map(|round| round.fixtures.iter()) {
        if let Some(key) = fixture.pair_key() {
            *pair_legs.entry(key).or_insert(0) += 1;
            *pair_totals.entry((key.0, key.1)).or_insert(0) += 1;
        }
    }
    for ((a, b, leg), count) in &pair_legs {
        if *count > 1 {
            violations.push(format!(
                "Teams {a} and {b} meet {count} times in leg {leg}"
            ));
        }
    }
    let ids: Vec<i64> = active.iter().copied().collect();
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            let count: usize = pair_totals.get(&(*a, *b)).copied().unwrap_or(0);
            if count != usize::from(legs) {
                violations.push(format!(
                    "Teams {a} and {b} meet {count} times, expected {legs}"
                ));
            }
        }
    }

    // Per-team counts and balance
    let tallies: BTreeMap<i64, TeamTally> = tally_teams(rounds);
    let expected_fixtures: usize = active.len().saturating_sub(1) * usize::from(legs);
    for team_id in &active {
        let tally: TeamTally = tallies.get(team_id).copied().unwrap_or_default();
        if tally.fixtures != expected_fixtures {
            violations.push(format!(
                "Team {team_id} plays {} games, expected {expected_fixtures}",
                tally.fixtures
            ));
        }
        if tally.home_away_difference().abs() > 1 {
            violations.push(format!(
                "Team {team_id} is unbalanced: {} home, {} away",
                tally.home, tally.away
            ));
        }
        let expected_byes: usize = if odd { usize::from(legs) } else { 0 };
        if tally.byes != expected_byes {
            violations.push(format!(
                "Team {team_id} rests {} times, expected {expected_byes}",
                tally.byes
            ));
        }
    }

    violations
}
