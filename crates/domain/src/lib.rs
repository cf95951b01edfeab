// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
mod config;
mod error;
mod pairing;
mod scheduler;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{CandidateDate, candidate_dates, extension_date};
pub use config::{DEFAULT_REST_THRESHOLD, FlexDatePolicy, ScheduleConfig};
pub use pairing::{TeamTally, balance_home_away, generate_rounds, tally_teams, validate_pairings};
pub use scheduler::{
    Deferral, ResourceAssignment, RestReason, SchedulePlan, TraceEvent, assign_resources,
    generate_match_days,
};

// Re-export public types
pub use error::DomainError;
pub use types::{
    Field, Fixture, MatchDay, MatchDayType, Round, ScheduledFixture, SpecialDate, SpecialDateKind,
    Team, Timeslot,
};
pub use validation::{
    validate_date_range, validate_fields, validate_leg_count, validate_max_games_per_date,
    validate_schedule_config, validate_team_count, validate_timeslots, validate_unique_teams,
};
