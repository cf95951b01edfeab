// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Time};

/// A team taking part in a season.
///
/// Teams are supplied by the league administration and are immutable
/// for the duration of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    /// The canonical team identifier.
    pub team_id: i64,
    /// Display name.
    pub name: String,
    /// Inactive teams are ignored by the generator.
    pub active: bool,
}

impl Team {
    /// Creates a new `Team`.
    ///
    /// # Arguments
    ///
    /// * `team_id` - The canonical identifier
    /// * `name` - The display name
    /// * `active` - Whether the team takes part in the season
    #[must_use]
    pub fn new(team_id: i64, name: &str, active: bool) -> Self {
        Self {
            team_id,
            name: name.to_string(),
            active,
        }
    }
}

/// A playing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// The canonical field identifier.
    pub field_id: i64,
    /// Display name.
    pub name: String,
    /// Inactive fields receive no fixtures.
    pub active: bool,
}

impl Field {
    /// Creates a new `Field`.
    #[must_use]
    pub fn new(field_id: i64, name: &str, active: bool) -> Self {
        Self {
            field_id,
            name: name.to_string(),
            active,
        }
    }
}

/// A named time window in which games are played on every match-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeslot {
    /// The canonical timeslot identifier.
    pub timeslot_id: i64,
    /// Display name (e.g., "Morning").
    pub name: String,
    /// Wall-clock start time.
    pub start_time: Time,
    /// Wall-clock end time.
    pub end_time: Time,
    /// Whether the timeslot is used on a regular match-day.
    pub default_active: bool,
    /// Relative ordering within a match-day (lowest first).
    pub sort_order: u32,
}

impl Timeslot {
    /// Creates a new `Timeslot`.
    ///
    /// # Arguments
    ///
    /// * `timeslot_id` - The canonical identifier
    /// * `name` - The display name
    /// * `start_time` - Wall-clock start time
    /// * `end_time` - Wall-clock end time
    /// * `default_active` - Whether the timeslot is used on regular match-days
    /// * `sort_order` - Relative ordering (lowest first)
    #[must_use]
    pub fn new(
        timeslot_id: i64,
        name: &str,
        start_time: Time,
        end_time: Time,
        default_active: bool,
        sort_order: u32,
    ) -> Self {
        Self {
            timeslot_id,
            name: name.to_string(),
            start_time,
            end_time,
            default_active,
            sort_order,
        }
    }
}

/// The kind of a special calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialDateKind {
    /// No games are played.
    Holiday,
    /// Lower scheduling priority; held back as headroom for reschedules.
    Flex,
    /// Fields are unavailable for maintenance; no games are played.
    Maintenance,
}

impl SpecialDateKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Holiday => "holiday",
            Self::Flex => "flex",
            Self::Maintenance => "maintenance",
        }
    }

    /// Returns whether dates of this kind are removed from the calendar.
    #[must_use]
    pub const fn excludes_date(&self) -> bool {
        matches!(self, Self::Holiday | Self::Maintenance)
    }
}

impl FromStr for SpecialDateKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "holiday" => Ok(Self::Holiday),
            "flex" => Ok(Self::Flex),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(DomainError::InvalidSpecialDateKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for SpecialDateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A calendar date carrying a special tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDate {
    /// The tagged date.
    pub date: Date,
    /// The tag.
    pub kind: SpecialDateKind,
    /// Free-form note (e.g., the holiday's name).
    pub note: Option<String>,
}

impl SpecialDate {
    /// Creates a new `SpecialDate`.
    #[must_use]
    pub const fn new(date: Date, kind: SpecialDateKind, note: Option<String>) -> Self {
        Self { date, kind, note }
    }
}

/// A potential game between two teams, or a bye marker for one team.
///
/// When `away_team_id` is `None` the fixture is a bye: `home_team_id`
/// rests for the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fixture {
    /// The home team (or the resting team for a bye).
    pub home_team_id: i64,
    /// The away team; `None` marks a bye.
    pub away_team_id: Option<i64>,
    /// 1-based leg number.
    pub leg: u8,
    /// 1-based abstract round number, continuous across legs.
    pub round: u32,
}

impl Fixture {
    /// Creates a game between two teams.
    #[must_use]
    pub const fn game(home_team_id: i64, away_team_id: i64, leg: u8, round: u32) -> Self {
        Self {
            home_team_id,
            away_team_id: Some(away_team_id),
            leg,
            round,
        }
    }

    /// Creates a bye marker for a resting team.
    #[must_use]
    pub const fn bye(team_id: i64, leg: u8, round: u32) -> Self {
        Self {
            home_team_id: team_id,
            away_team_id: None,
            leg,
            round,
        }
    }

    /// Returns whether this fixture is a bye marker.
    #[must_use]
    pub const fn is_bye(&self) -> bool {
        self.away_team_id.is_none()
    }

    /// Returns whether the given team takes part in this fixture.
    #[must_use]
    pub fn involves(&self, team_id: i64) -> bool {
        self.home_team_id == team_id || self.away_team_id == Some(team_id)
    }

    /// Swaps home and away. Byes are left untouched.
    pub const fn swap_home_away(&mut self) {
        if let Some(away) = self.away_team_id {
            self.away_team_id = Some(self.home_team_id);
            self.home_team_id = away;
        }
    }

    /// Returns the unordered pairing key `(lower id, higher id, leg)`.
    ///
    /// Byes have no pairing key.
    #[must_use]
    pub fn pair_key(&self) -> Option<(i64, i64, u8)> {
        self.away_team_id.map(|away| {
            (
                self.home_team_id.min(away),
                self.home_team_id.max(away),
                self.leg,
            )
        })
    }
}

/// A group of fixtures in which no team appears twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number, continuous across legs.
    pub number: u32,
    /// 1-based leg number.
    pub leg: u8,
    /// Games and bye markers of this round.
    pub fixtures: Vec<Fixture>,
}

impl Round {
    /// Returns the team resting in this round, if any.
    #[must_use]
    pub fn bye_team(&self) -> Option<i64> {
        self.fixtures
            .iter()
            .find(|fixture| fixture.is_bye())
            .map(|fixture| fixture.home_team_id)
    }

    /// Returns the number of real games (byes excluded).
    #[must_use]
    pub fn game_count(&self) -> usize {
        self.fixtures.iter().filter(|f| !f.is_bye()).count()
    }
}

/// The type of a concrete match-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MatchDayType {
    /// A normal scheduling date.
    #[default]
    Regular,
    /// A flex date used for placement.
    Flex,
    /// Post-season date. Never produced by regular-season generation.
    Playoffs,
}

impl MatchDayType {
    /// Converts this type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Flex => "flex",
            Self::Playoffs => "playoffs",
        }
    }
}

impl FromStr for MatchDayType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(Self::Regular),
            "flex" => Ok(Self::Flex),
            "playoffs" => Ok(Self::Playoffs),
            _ => Err(DomainError::InvalidMatchDayType(s.to_string())),
        }
    }
}

impl std::fmt::Display for MatchDayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A game placed on a match-day with its assigned resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledFixture {
    /// The home team.
    pub home_team_id: i64,
    /// The away team.
    pub away_team_id: i64,
    /// 1-based leg number.
    pub leg: u8,
    /// The abstract round the game came from.
    pub round: u32,
    /// The assigned field.
    pub field_id: i64,
    /// The assigned timeslot.
    pub timeslot_id: i64,
    /// Kick-off time (the timeslot's start time).
    pub scheduled_time: Time,
    /// 1-based game number within the match-day.
    pub match_number: u32,
    /// Whether the game sits beyond the regular field × timeslot grid.
    pub overflow: bool,
}

/// A concrete date with the games placed on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDay {
    /// 1-based chronological match-day number within the season.
    pub number: u32,
    /// The calendar date.
    pub date: Date,
    /// The leg whose games are played on this date.
    pub leg: u8,
    /// Regular or flex.
    pub day_type: MatchDayType,
    /// Maximum number of games this date can hold.
    pub capacity: usize,
    /// Whether the date lies past the configured season end.
    pub beyond_season_end: bool,
    /// Games in match-number order.
    pub fixtures: Vec<ScheduledFixture>,
}

impl MatchDay {
    /// Returns whether any game on this date needed the overflow timeslot.
    #[must_use]
    pub fn uses_overflow(&self) -> bool {
        self.fixtures.iter().any(|fixture| fixture.overflow)
    }
}
