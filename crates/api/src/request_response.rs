// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates travel as ISO-8601 strings (`YYYY-MM-DD`) and times as `HH:MM`.

use matchday::{GenerationOutcome, ScheduleStatistics};
use serde::{Deserialize, Serialize};

const fn default_legs() -> u8 {
    1
}

const fn default_true() -> bool {
    true
}

/// A playing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInput {
    /// The field identifier.
    pub field_id: i64,
    /// Display name.
    pub name: String,
    /// Inactive fields receive no games.
    #[serde(default = "default_true")]
    pub active: bool,
}

/// A kick-off window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeslotInput {
    /// The timeslot identifier.
    pub timeslot_id: i64,
    /// Display name.
    pub name: String,
    /// Kick-off time (`HH:MM`).
    pub start_time: String,
    /// End time (`HH:MM`).
    pub end_time: String,
    /// Whether the slot is part of the regular grid.
    #[serde(default = "default_true")]
    pub default_active: bool,
    /// Position in the daily order.
    #[serde(default)]
    pub sort_order: u32,
}

/// A holiday, flex or maintenance date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDateInput {
    /// The date (`YYYY-MM-DD`).
    pub date: String,
    /// `holiday`, `flex` or `maintenance`.
    pub kind: String,
    /// Optional free text.
    #[serde(default)]
    pub note: Option<String>,
}

/// A participating team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInput {
    /// The team identifier.
    pub team_id: i64,
    /// Display name.
    pub name: String,
    /// Inactive teams are left out of the pairings.
    #[serde(default = "default_true")]
    pub active: bool,
}

/// API request to generate and store a season schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateScheduleRequest {
    /// The season to generate.
    pub season_id: i64,
    /// The owning organization.
    pub organization_id: i64,
    /// Display name of the season.
    pub name: String,
    /// First day of the season (`YYYY-MM-DD`).
    pub start_date: String,
    /// Last day of the season (`YYYY-MM-DD`).
    pub end_date: String,
    /// Number of complete round-robin passes.
    #[serde(default = "default_legs")]
    pub legs: u8,
    /// Upper bound on games per date.
    pub max_games_per_date: usize,
    /// Swap home and away on even legs.
    #[serde(default = "default_true")]
    pub alternate_home_away: bool,
    /// The recurring match weekday. Defaults to Saturday.
    #[serde(default)]
    pub match_weekday: Option<String>,
    /// Playing fields.
    pub fields: Vec<FieldInput>,
    /// Kick-off windows.
    pub timeslots: Vec<TimeslotInput>,
    /// Holidays, flex and maintenance dates.
    #[serde(default)]
    pub special_dates: Vec<SpecialDateInput>,
    /// Every `n`-th playable date is flex.
    #[serde(default)]
    pub flex_cadence: Option<u32>,
    /// Timeslot absorbing games beyond the regular grid.
    #[serde(default)]
    pub overflow_timeslot_id: Option<i64>,
    /// `prefer_regular` (default) or `chronological`.
    #[serde(default)]
    pub flex_policy: Option<String>,
    /// Participating teams in seeding order.
    pub teams: Vec<TeamInput>,
}

/// API response for a generation run.
///
/// `success` is false and `errors` is populated when the run failed.
/// A stored schedule with warnings is still a success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateScheduleResponse {
    /// Whether the schedule was generated and stored.
    pub success: bool,
    /// A human-readable summary.
    pub message: String,
    /// The season the run targeted.
    pub season_id: i64,
    /// Match-days generated.
    pub match_days: usize,
    /// Games generated.
    pub fixtures: usize,
    /// Aggregate figures, when generation got that far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ScheduleStatistics>,
    /// Concerns for operator review.
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Why the run failed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl GenerateScheduleResponse {
    /// Builds the response of a stored schedule.
    #[must_use]
    pub fn stored(outcome: &GenerationOutcome) -> Self {
        Self {
            success: true,
            message: outcome.summary(),
            season_id: outcome.season_id,
            match_days: outcome.match_days.len(),
            fixtures: outcome.fixture_count(),
            statistics: Some(outcome.statistics.clone()),
            warnings: outcome.warnings.iter().map(ToString::to_string).collect(),
            errors: Vec::new(),
        }
    }

    /// Builds the response of a schedule that was generated but not stored.
    #[must_use]
    pub fn unsaved(outcome: &GenerationOutcome, error: &str) -> Self {
        Self {
            success: false,
            message: format!("Failed to store generated schedule: {error}"),
            errors: vec![error.to_string()],
            ..Self::stored(outcome)
        }
    }

    /// Builds the response of a failed run.
    #[must_use]
    pub fn failure(season_id: i64, error: &crate::ApiError) -> Self {
        if let crate::ApiError::PersistenceFailed { response, .. } = error {
            return response.as_ref().clone();
        }
        Self {
            success: false,
            message: error.to_string(),
            season_id,
            match_days: 0,
            fixtures: 0,
            statistics: None,
            warnings: Vec::new(),
            errors: error.messages(),
        }
    }
}

/// A stored game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureInfo {
    /// Position within the match-day, from 1.
    pub match_number: u32,
    /// The home team.
    pub home_team_id: i64,
    /// The away team.
    pub away_team_id: i64,
    /// The leg.
    pub leg: u8,
    /// The round within the season.
    pub round: u32,
    /// The assigned field.
    pub field_id: i64,
    /// The assigned timeslot.
    pub timeslot_id: i64,
    /// Kick-off time (`HH:MM`).
    pub scheduled_time: String,
    /// Whether the game uses the overflow timeslot.
    pub overflow: bool,
}

/// A stored match-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDayInfo {
    /// Match-day number, from 1.
    pub number: u32,
    /// The date (`YYYY-MM-DD`).
    pub date: String,
    /// The leg.
    pub leg: u8,
    /// `regular`, `flex` or `playoffs`.
    pub day_type: String,
    /// Maximum games on this date.
    pub capacity: usize,
    /// Whether the date lies past the configured season end.
    pub beyond_season_end: bool,
    /// Games in match-number order.
    pub fixtures: Vec<FixtureInfo>,
}

/// API response for a stored season schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonScheduleResponse {
    /// The season.
    pub season_id: i64,
    /// The owning organization.
    pub organization_id: i64,
    /// Display name.
    pub name: String,
    /// Whether a schedule has been activated.
    pub is_active: bool,
    /// When the current schedule was activated.
    pub activated_at: Option<String>,
    /// Match-days in chronological order.
    pub match_days: Vec<MatchDayInfo>,
}

/// One generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationLogInfo {
    /// The log identifier.
    pub log_id: i64,
    /// Whether the run stored a schedule.
    pub success: bool,
    /// Summary of the run.
    pub message: String,
    /// When the run was recorded.
    pub created_at: String,
    /// Match-days generated.
    pub match_days: usize,
    /// Games generated.
    pub fixtures: usize,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

/// API response listing the generation runs of a season, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListGenerationLogsResponse {
    /// The season.
    pub season_id: i64,
    /// Runs, newest first.
    pub logs: Vec<GenerationLogInfo>,
}
