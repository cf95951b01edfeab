// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, Time};

/// Errors that can occur during domain validation and calendar generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Fewer than two active teams were supplied.
    NotEnoughTeams {
        /// The number of active teams found.
        active: usize,
    },
    /// The same team identifier appears more than once.
    DuplicateTeam(i64),
    /// The number of legs must be at least one.
    InvalidLegCount(u8),
    /// The season start date is not strictly before the end date.
    InvalidDateRange {
        /// The configured start date.
        start_date: Date,
        /// The configured end date.
        end_date: Date,
    },
    /// No field is marked active.
    NoActiveFields,
    /// No timeslot is marked default-active.
    NoActiveTimeslots,
    /// A timeslot ends at or before its start time.
    InvalidTimeslotRange {
        /// The offending timeslot.
        timeslot_id: i64,
        /// The configured start time.
        start_time: Time,
        /// The configured end time.
        end_time: Time,
    },
    /// The configured overflow timeslot does not exist.
    UnknownOverflowTimeslot(i64),
    /// The per-date game limit must be positive.
    InvalidMaxGamesPerDate(usize),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// The calendar could not be extended far enough to place every fixture.
    CalendarExhausted {
        /// Fixtures still waiting for a date.
        unplaced: usize,
        /// The last date that was considered.
        last_date: Date,
    },
    /// Unknown special date kind.
    InvalidSpecialDateKind(String),
    /// Unknown match-day type.
    InvalidMatchDayType(String),
}

impl DomainError {
    /// Returns whether this error describes a structurally unusable configuration.
    ///
    /// Configuration errors are reported before any generation work happens.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        !matches!(
            self,
            Self::DateArithmeticOverflow { .. } | Self::CalendarExhausted { .. }
        )
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotEnoughTeams { active } => {
                write!(
                    f,
                    "At least 2 active teams are required to generate a season, found {active}"
                )
            }
            Self::DuplicateTeam(team_id) => {
                write!(f, "Team {team_id} is listed more than once")
            }
            Self::InvalidLegCount(legs) => {
                write!(f, "Invalid number of legs: {legs}. Must be at least 1")
            }
            Self::InvalidDateRange {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Season start date {start_date} must be before end date {end_date}"
                )
            }
            Self::NoActiveFields => write!(f, "At least one active field is required"),
            Self::NoActiveTimeslots => {
                write!(f, "At least one default-active timeslot is required")
            }
            Self::InvalidTimeslotRange {
                timeslot_id,
                start_time,
                end_time,
            } => {
                write!(
                    f,
                    "Timeslot {timeslot_id} must start before it ends ({start_time} - {end_time})"
                )
            }
            Self::UnknownOverflowTimeslot(timeslot_id) => {
                write!(f, "Overflow timeslot {timeslot_id} is not configured")
            }
            Self::InvalidMaxGamesPerDate(max) => {
                write!(
                    f,
                    "Invalid maximum games per date: {max}. Must be greater than 0"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::CalendarExhausted {
                unplaced,
                last_date,
            } => {
                write!(
                    f,
                    "Ran out of calendar dates after {last_date} with {unplaced} fixture(s) unplaced"
                )
            }
            Self::InvalidSpecialDateKind(kind) => {
                write!(f, "Invalid special date kind: {kind}")
            }
            Self::InvalidMatchDayType(kind) => write!(f, "Invalid match-day type: {kind}"),
        }
    }
}

impl std::error::Error for DomainError {}
