// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Match-day scheduling.
//!
//! This module maps abstract round-robin rounds onto concrete calendar
//! dates and assigns a field and timeslot to every game.
//!
//! ## Invariants
//!
//! - No date holds more games than its capacity
//! - A team plays at most once per date, always later than its previous game
//! - No team plays more than `rest_threshold` consecutive games without
//!   resting (a bye or a deferral)
//! - Games are never dropped: deferred games are replayed at the end of
//!   their leg, and the calendar is extended when dates run out
//! - Every leg starts on a date no earlier leg used
//!
//! ## Rest rule
//!
//! Before a round is placed, every game involving a team that has reached
//! the rest threshold is deferred. Both teams of a deferred game sit the
//! round out, so both counters reset to zero. A bye resets the resting
//! team's counter. Placed games increment both counters.

use crate::calendar::{CandidateDate, candidate_dates, extension_date};
use crate::config::{FlexDatePolicy, ScheduleConfig};
use crate::error::DomainError;
use crate::types::{Field, Fixture, MatchDay, MatchDayType, Round, ScheduledFixture, Timeslot};
use crate::validation::validate_schedule_config;
use std::collections::{BTreeMap, HashMap, HashSet};
use time::{Date, Time};
use tracing::{debug, info};

/// Why a team did not play in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestReason {
    /// The team had no opponent.
    Bye,
    /// The team's game was deferred by the rest rule.
    Deferred,
}

/// One step of the scheduling trace, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// A team's game was placed.
    Played {
        /// The team.
        team_id: i64,
        /// The round the game belongs to.
        round: u32,
        /// The date the game was placed on.
        date: Date,
    },
    /// A team rested.
    Rested {
        /// The team.
        team_id: i64,
        /// The round the team sat out.
        round: u32,
        /// Bye or deferral.
        reason: RestReason,
    },
}

/// A game held back by the rest rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferral {
    /// The deferred game.
    pub fixture: Fixture,
    /// Teams that had reached the rest threshold.
    pub resting_team_ids: Vec<i64>,
}

/// The output of the match-day scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulePlan {
    /// Match-days in chronological order.
    pub match_days: Vec<MatchDay>,
    /// Every deferral, in the order it happened.
    pub deferrals: Vec<Deferral>,
    /// Rounds whose games were all deferred.
    pub skipped_rounds: Vec<u32>,
    /// Recurring dates appended past the season end.
    pub extension_dates_used: usize,
    /// Placement and rest events in processing order.
    pub trace: Vec<TraceEvent>,
}

impl SchedulePlan {
    /// Total number of scheduled games.
    #[must_use]
    pub fn fixture_count(&self) -> usize {
        self.match_days.iter().map(|day| day.fixtures.len()).sum()
    }
}

/// The field and timeslot assigned to one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceAssignment {
    /// The assigned field.
    pub field_id: i64,
    /// The assigned timeslot.
    pub timeslot_id: i64,
    /// The timeslot's start time.
    pub scheduled_time: Time,
    /// Whether the game sits beyond the regular grid.
    pub overflow: bool,
}

/// Consecutive-games counters, owned by a single scheduling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RestCounters {
    threshold: u32,
    counts: HashMap<i64, u32>,
}

impl RestCounters {
    pub(crate) fn new(threshold: u32) -> Self {
        Self {
            threshold,
            counts: HashMap::new(),
        }
    }

    pub(crate) fn count(&self, team_id: i64) -> u32 {
        self.counts.get(&team_id).copied().unwrap_or(0)
    }

    pub(crate) fn needs_rest(&self, team_id: i64) -> bool {
        self.count(team_id) >= self.threshold
    }

    pub(crate) fn record_game(&mut self, team_id: i64) {
        *self.counts.entry(team_id).or_insert(0) += 1;
    }

    pub(crate) fn rest(&mut self, team_id: i64) {
        self.counts.insert(team_id, 0);
    }
}

/// A game waiting on a date.
#[derive(Debug, Clone, Copy)]
struct PlacedGame {
    home_team_id: i64,
    away_team_id: i64,
    round: u32,
}

/// Working state of one candidate date.
#[derive(Debug, Clone)]
struct DateSlot {
    candidate: CandidateDate,
    leg: Option<u8>,
    games: Vec<PlacedGame>,
}

impl DateSlot {
    const fn new(candidate: CandidateDate) -> Self {
        Self {
            candidate,
            leg: None,
            games: Vec::new(),
        }
    }

    fn accepts(&self, leg: u8) -> bool {
        self.games.len() < self.candidate.capacity && self.leg.is_none_or(|l| l == leg)
    }
}

/// Places rounds onto candidate dates.
struct Scheduler<'a> {
    config: &'a ScheduleConfig,
    slots: Vec<DateSlot>,
    last_played: HashMap<i64, usize>,
    floor: usize,
    counters: RestCounters,
    deferrals: Vec<Deferral>,
    skipped_rounds: Vec<u32>,
    extension_dates_used: usize,
    extension_limit: usize,
    trace: Vec<TraceEvent>,
}

/// Schedules rounds onto concrete match-days.
///
/// # Arguments
///
/// * `rounds` - Rounds from the pairing generator, in order
/// * `config` - Calendar constraints
///
/// # Returns
///
/// The match-days with assigned resources, plus the deferrals, skipped
/// rounds, calendar extension count and trace of the run.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration has no active field or timeslot, or start >= end
/// - The calendar extension outgrows the number of games, which means a
///   placement never found a usable date
pub fn generate_match_days(
    rounds: &[Round],
    config: &ScheduleConfig,
) -> Result<SchedulePlan, DomainError> {
    validate_schedule_config(config)?;

    let dates: Vec<CandidateDate> = candidate_dates(config)?;
    debug!(
        candidate_dates = dates.len(),
        capacity = config.date_capacity(),
        "Enumerated candidate dates"
    );

    // A placement appends at most one date past the end of the calendar.
    let game_count: usize = rounds
        .iter()
        .flat_map(|round| &round.fixtures)
        .filter(|fixture| !fixture.is_bye())
        .count();

    let mut legs: BTreeMap<u8, Vec<&Round>> = BTreeMap::new();
    for round in rounds {
        legs.entry(round.leg).or_default().push(round);
    }

    let mut scheduler: Scheduler<'_> = Scheduler {
        config,
        slots: dates.into_iter().map(DateSlot::new).collect(),
        last_played: HashMap::new(),
        floor: 0,
        counters: RestCounters::new(config.rest_threshold),
        deferrals: Vec::new(),
        skipped_rounds: Vec::new(),
        extension_dates_used: 0,
        extension_limit: game_count,
        trace: Vec::new(),
    };

    for (leg, leg_rounds) in &legs {
        scheduler.schedule_leg(*leg, leg_rounds)?;
    }

    scheduler.finish()
}

impl Scheduler<'_> {
    fn schedule_leg(&mut self, leg: u8, rounds: &[&Round]) -> Result<(), DomainError> {
        let mut backlog: Vec<Fixture> = Vec::new();
        for round in rounds {
            self.schedule_batch(round.number, leg, &round.fixtures, &mut backlog)?;
        }

        while !backlog.is_empty() {
            let pending: Vec<Fixture> = std::mem::take(&mut backlog);
            debug!(leg, pending = pending.len(), "Replaying deferred games");
            for batch in conflict_free_batches(&pending) {
                let round: u32 = batch.first().map_or(0, |fixture| fixture.round);
                self.schedule_batch(round, leg, &batch, &mut backlog)?;
            }
        }

        if let Some(last) = self.slots.iter().rposition(|slot| slot.leg == Some(leg)) {
            self.floor = self.floor.max(last + 1);
        }
        Ok(())
    }

    /// Applies the rest rule to a conflict-free group of fixtures and
    /// places the games that remain.
    fn schedule_batch(
        &mut self,
        round: u32,
        leg: u8,
        fixtures: &[Fixture],
        backlog: &mut Vec<Fixture>,
    ) -> Result<(), DomainError> {
        let mut ready: Vec<PlacedGame> = Vec::new();

        for fixture in fixtures {
            let Some(away_team_id) = fixture.away_team_id else {
                self.rest(fixture.home_team_id, round, RestReason::Bye);
                continue;
            };
            let resting_team_ids: Vec<i64> = [fixture.home_team_id, away_team_id]
                .into_iter()
                .filter(|team_id| self.counters.needs_rest(*team_id))
                .collect();
            if resting_team_ids.is_empty() {
                ready.push(PlacedGame {
                    home_team_id: fixture.home_team_id,
                    away_team_id,
                    round: fixture.round,
                });
                continue;
            }

            debug!(
                round,
                home_team_id = fixture.home_team_id,
                away_team_id,
                ?resting_team_ids,
                "Deferred game for mandatory rest"
            );
            self.rest(fixture.home_team_id, round, RestReason::Deferred);
            self.rest(away_team_id, round, RestReason::Deferred);
            self.deferrals.push(Deferral {
                fixture: *fixture,
                resting_team_ids,
            });
            backlog.push(*fixture);
        }

        if ready.is_empty() {
            if fixtures.iter().any(|fixture| !fixture.is_bye()) {
                info!(round, leg, "Every game of the round was deferred; round skipped");
                self.skipped_rounds.push(round);
            }
            return Ok(());
        }

        let mut first_used: Option<usize> = None;
        let mut placements: Vec<(PlacedGame, usize)> = Vec::with_capacity(ready.len());
        for (placed, game) in ready.iter().enumerate() {
            let index: usize = self.place(*game, leg, ready.len() - placed)?;
            first_used = Some(first_used.map_or(index, |first| first.min(index)));
            placements.push((*game, index));
        }

        for (game, index) in placements {
            let date: Date = self.slots[index].candidate.date;
            for team_id in [game.home_team_id, game.away_team_id] {
                self.counters.record_game(team_id);
                self.trace.push(TraceEvent::Played {
                    team_id,
                    round: game.round,
                    date,
                });
            }
        }

        if let Some(first) = first_used {
            self.floor = self.floor.max(first);
        }
        Ok(())
    }

    fn rest(&mut self, team_id: i64, round: u32, reason: RestReason) {
        self.counters.rest(team_id);
        self.trace.push(TraceEvent::Rested {
            team_id,
            round,
            reason,
        });
    }

    /// Places one game on the earliest eligible date and returns its index.
    fn place(&mut self, game: PlacedGame, leg: u8, unplaced: usize) -> Result<usize, DomainError> {
        let earliest = |team_id: i64| self.last_played.get(&team_id).map_or(0, |last| last + 1);
        let mut index: usize = self
            .floor
            .max(earliest(game.home_team_id))
            .max(earliest(game.away_team_id));

        loop {
            while index >= self.slots.len() {
                self.extend(unplaced)?;
            }
            if self.slots[index].accepts(leg) {
                break;
            }
            index += 1;
        }

        if self.config.flex_policy == FlexDatePolicy::PreferRegularOverFlex
            && self.slots[index].candidate.day_type == MatchDayType::Flex
            && self.slots.get(index + 1).is_some_and(|next| {
                next.candidate.day_type == MatchDayType::Regular && next.accepts(leg)
            })
        {
            index += 1;
        }

        let slot: &mut DateSlot = &mut self.slots[index];
        slot.games.push(game);
        slot.leg = Some(leg);
        self.last_played.insert(game.home_team_id, index);
        self.last_played.insert(game.away_team_id, index);
        Ok(index)
    }

    /// Appends the next recurring date past the season end.
    fn extend(&mut self, unplaced: usize) -> Result<(), DomainError> {
        let previous: Option<Date> = self.slots.last().map(|slot| slot.candidate.date);
        if self.extension_dates_used >= self.extension_limit {
            return Err(DomainError::CalendarExhausted {
                unplaced,
                last_date: previous.unwrap_or(self.config.end_date),
            });
        }
        let candidate: CandidateDate = extension_date(previous, self.config)?;
        debug!(date = %candidate.date, "Extended calendar past season end");
        self.slots.push(DateSlot::new(candidate));
        self.extension_dates_used += 1;
        Ok(())
    }

    fn finish(self) -> Result<SchedulePlan, DomainError> {
        let fields: Vec<&Field> = self.config.active_fields();
        let timeslots: Vec<&Timeslot> = self.config.active_timeslots();
        let overflow: Option<&Timeslot> = self.config.overflow_timeslot();

        let mut match_days: Vec<MatchDay> = Vec::new();
        let used_slots = self
            .slots
            .iter()
            .filter_map(|slot| slot.leg.map(|leg| (slot, leg)));
        for ((slot, leg), number) in used_slots.zip(1u32..) {
            let assignments: Vec<ResourceAssignment> =
                assign_resources(slot.games.len(), &fields, &timeslots, overflow)?;
            let fixtures: Vec<ScheduledFixture> = slot
                .games
                .iter()
                .zip(assignments)
                .zip(1u32..)
                .map(|((game, assignment), match_number)| ScheduledFixture {
                    home_team_id: game.home_team_id,
                    away_team_id: game.away_team_id,
                    leg,
                    round: game.round,
                    field_id: assignment.field_id,
                    timeslot_id: assignment.timeslot_id,
                    scheduled_time: assignment.scheduled_time,
                    match_number,
                    overflow: assignment.overflow,
                })
                .collect();
            match_days.push(MatchDay {
                number,
                date: slot.candidate.date,
                leg,
                day_type: slot.candidate.day_type,
                capacity: slot.candidate.capacity,
                beyond_season_end: slot.candidate.beyond_season_end,
                fixtures,
            });
        }

        let plan: SchedulePlan = SchedulePlan {
            match_days,
            deferrals: self.deferrals,
            skipped_rounds: self.skipped_rounds,
            extension_dates_used: self.extension_dates_used,
            trace: self.trace,
        };

        info!(
            match_days = plan.match_days.len(),
            fixtures = plan.fixture_count(),
            deferrals = plan.deferrals.len(),
            extension_dates = plan.extension_dates_used,
            "Scheduled match-days"
        );

        Ok(plan)
    }
}

/// Splits fixtures into groups in which no team appears twice.
///
/// Fixtures keep their relative order; each goes into the first group
/// that does not already contain one of its teams.
fn conflict_free_batches(fixtures: &[Fixture]) -> Vec<Vec<Fixture>> {
    let mut batches: Vec<(HashSet<i64>, Vec<Fixture>)> = Vec::new();
    for fixture in fixtures {
        let teams: Vec<i64> = std::iter::once(fixture.home_team_id)
            .chain(fixture.away_team_id)
            .collect();
        let position: Option<usize> = batches
            .iter()
            .position(|(used, _)| teams.iter().all(|team| !used.contains(team)));
        let index: usize = position.unwrap_or_else(|| {
            batches.push((HashSet::new(), Vec::new()));
            batches.len() - 1
        });
        let (used, batch) = &mut batches[index];
        used.extend(teams);
        batch.push(*fixture);
    }
    batches.into_iter().map(|(_, batch)| batch).collect()
}

/// Assigns fields and timeslots to the games of one match-day.
///
/// Game `k` plays on field `k % fields` in timeslot `k / fields`, so every
/// field is used in a timeslot before the next timeslot opens. Games
/// beyond the grid go to the overflow timeslot, or to the first timeslot
/// when no overflow timeslot is configured.
///
/// # Arguments
///
/// * `count` - Number of games on the date
/// * `fields` - Active fields in order
/// * `timeslots` - Regular timeslots in order
/// * `overflow_timeslot` - The designated overflow timeslot, if any
///
/// # Errors
///
/// Returns an error if there is no field or no timeslot to assign.
pub fn assign_resources(
    count: usize,
    fields: &[&Field],
    timeslots: &[&Timeslot],
    overflow_timeslot: Option<&Timeslot>,
) -> Result<Vec<ResourceAssignment>, DomainError> {
    let Some(first_slot) = timeslots.first() else {
        return Err(DomainError::NoActiveTimeslots);
    };
    if fields.is_empty() {
        return Err(DomainError::NoActiveFields);
    }

    Ok((0..count)
        .map(|k| {
            let field: &Field = fields[k % fields.len()];
            let (slot, overflow): (&Timeslot, bool) = match timeslots.get(k / fields.len()) {
                Some(slot) => (slot, false),
                None => (overflow_timeslot.unwrap_or(first_slot), true),
            };
            ResourceAssignment {
                field_id: field.field_id,
                timeslot_id: slot.timeslot_id,
                scheduled_time: slot.start_time,
                overflow,
            }
        })
        .collect())
}
