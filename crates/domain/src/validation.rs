// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::ScheduleConfig;
use crate::error::DomainError;
use crate::types::{Field, Team, Timeslot};
use std::collections::HashSet;
use time::Date;

/// Validates that at least two active teams take part.
///
/// # Arguments
///
/// * `teams` - All supplied teams, active or not
///
/// # Returns
///
/// * `Ok(count)` with the number of active teams
///
/// # Errors
///
/// Returns `DomainError::NotEnoughTeams` if fewer than two teams are active.
pub fn validate_team_count(teams: &[Team]) -> Result<usize, DomainError> {
    let active: usize = teams.iter().filter(|team| team.active).count();
    if active < 2 {
        return Err(DomainError::NotEnoughTeams { active });
    }
    Ok(active)
}

/// Validates that team identifiers are unique.
///
/// # Errors
///
/// Returns `DomainError::DuplicateTeam` for the first repeated identifier.
pub fn validate_unique_teams(teams: &[Team]) -> Result<(), DomainError> {
    let mut seen: HashSet<i64> = HashSet::new();
    for team in teams {
        if !seen.insert(team.team_id) {
            return Err(DomainError::DuplicateTeam(team.team_id));
        }
    }
    Ok(())
}

/// Validates the number of legs.
///
/// # Errors
///
/// Returns an error if `legs` is zero.
pub const fn validate_leg_count(legs: u8) -> Result<(), DomainError> {
    if legs == 0 {
        return Err(DomainError::InvalidLegCount(legs));
    }
    Ok(())
}

/// Validates that the season starts strictly before it ends.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `start_date >= end_date`.
pub fn validate_date_range(start_date: Date, end_date: Date) -> Result<(), DomainError> {
    if start_date >= end_date {
        return Err(DomainError::InvalidDateRange {
            start_date,
            end_date,
        });
    }
    Ok(())
}

/// Validates that at least one field is active.
///
/// # Errors
///
/// Returns `DomainError::NoActiveFields` if every field is inactive.
pub fn validate_fields(fields: &[Field]) -> Result<(), DomainError> {
    if !fields.iter().any(|field| field.active) {
        return Err(DomainError::NoActiveFields);
    }
    Ok(())
}

/// Validates timeslot ranges and the overflow designation.
///
/// # Arguments
///
/// * `timeslots` - All configured timeslots
/// * `overflow_timeslot_id` - The designated overflow timeslot, if any
///
/// # Errors
///
/// Returns an error if:
/// - A timeslot does not start before it ends
/// - The overflow timeslot is not among the configured timeslots
/// - No regular (default-active, non-overflow) timeslot remains
pub fn validate_timeslots(
    timeslots: &[Timeslot],
    overflow_timeslot_id: Option<i64>,
) -> Result<(), DomainError> {
    for slot in timeslots {
        if slot.start_time >= slot.end_time {
            return Err(DomainError::InvalidTimeslotRange {
                timeslot_id: slot.timeslot_id,
                start_time: slot.start_time,
                end_time: slot.end_time,
            });
        }
    }

    if let Some(overflow_id) = overflow_timeslot_id
        && !timeslots.iter().any(|slot| slot.timeslot_id == overflow_id)
    {
        return Err(DomainError::UnknownOverflowTimeslot(overflow_id));
    }

    let has_regular_slot: bool = timeslots
        .iter()
        .any(|slot| slot.default_active && Some(slot.timeslot_id) != overflow_timeslot_id);
    if !has_regular_slot {
        return Err(DomainError::NoActiveTimeslots);
    }
    Ok(())
}

/// Validates the per-date game limit.
///
/// # Errors
///
/// Returns an error if `max_games_per_date` is zero.
pub const fn validate_max_games_per_date(max_games_per_date: usize) -> Result<(), DomainError> {
    if max_games_per_date == 0 {
        return Err(DomainError::InvalidMaxGamesPerDate(max_games_per_date));
    }
    Ok(())
}

/// Validates every calendar constraint the scheduler relies on.
///
/// Stops at the first violation. Callers that want every violation
/// should call the individual rules.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_schedule_config(config: &ScheduleConfig) -> Result<(), DomainError> {
    validate_date_range(config.start_date, config.end_date)?;
    validate_fields(&config.fields)?;
    validate_timeslots(&config.timeslots, config.overflow_timeslot_id)?;
    validate_max_games_per_date(config.max_games_per_date)?;
    Ok(())
}
