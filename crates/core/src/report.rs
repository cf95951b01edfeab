// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Generation results, statistics and warnings.

use crate::config::SeasonConfig;
use crate::error::CoreError;
use matchday_domain::{MatchDay, MatchDayType, Round, SchedulePlan, Team, TeamTally, tally_teams};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// A non-fatal concern about a configuration or generated schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationWarning {
    /// The season holds more games than the candidate dates can absorb.
    CapacityTight {
        /// Games a complete season contains.
        estimated_fixtures: usize,
        /// Sum of per-date capacity over all candidate dates.
        capacity: usize,
    },
    /// More legs than recommended.
    LongSeason {
        /// Configured legs.
        legs: u8,
    },
    /// An unusually high number of teams.
    ManyTeams {
        /// Active teams.
        teams: usize,
    },
    /// Match-days were added past the season end date.
    CalendarExtended {
        /// Number of dates added.
        extension_dates: usize,
        /// The last scheduled date.
        last_date: Date,
    },
    /// Some match-days needed the overflow timeslot.
    OverflowUsed {
        /// Match-days with at least one overflow game.
        match_days: usize,
    },
}

impl std::fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityTight {
                estimated_fixtures,
                capacity,
            } => write!(
                f,
                "Season needs {estimated_fixtures} games but the date range only holds {capacity}"
            ),
            Self::LongSeason { legs } => {
                write!(f, "{legs} legs make for an unusually long season")
            }
            Self::ManyTeams { teams } => write!(f, "{teams} active teams is unusually high"),
            Self::CalendarExtended {
                extension_dates,
                last_date,
            } => write!(
                f,
                "Schedule runs {extension_dates} date(s) past the season end, until {last_date}"
            ),
            Self::OverflowUsed { match_days } => {
                write!(f, "{match_days} match-day(s) use the overflow timeslot")
            }
        }
    }
}

/// Per-team appearance counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamReport {
    /// The team.
    pub team_id: i64,
    /// Display name.
    pub name: String,
    /// Games played.
    pub fixtures: usize,
    /// Home games.
    pub home: usize,
    /// Away games.
    pub away: usize,
    /// Byes.
    pub byes: usize,
}

/// Aggregate figures describing a generated schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStatistics {
    /// Match-days used.
    pub total_match_days: usize,
    /// Games scheduled.
    pub total_fixtures: usize,
    /// Games per match-day.
    pub average_fixtures_per_match_day: f64,
    /// Match-days with at least one overflow game.
    pub overflow_match_days: usize,
    /// Flex dates that received games.
    pub flex_match_days: usize,
    /// Games deferred by the rest rule.
    pub deferred_fixtures: usize,
    /// Rounds whose games were all deferred.
    pub skipped_rounds: Vec<u32>,
    /// Dates added past the season end.
    pub extension_dates_used: usize,
    /// Games per field.
    pub field_load: BTreeMap<i64, usize>,
    /// Games per timeslot.
    pub timeslot_load: BTreeMap<i64, usize>,
    /// Per-team counts, in team order.
    pub teams: Vec<TeamReport>,
}

/// Computes the statistics of a schedule.
///
/// # Arguments
///
/// * `plan` - The scheduler output
/// * `rounds` - The rounds the plan was built from
/// * `teams` - The season's teams
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_statistics(
    plan: &SchedulePlan,
    rounds: &[Round],
    teams: &[Team],
) -> ScheduleStatistics {
    let total_match_days: usize = plan.match_days.len();
    let total_fixtures: usize = plan.fixture_count();
    let average_fixtures_per_match_day: f64 = if total_match_days == 0 {
        0.0
    } else {
        total_fixtures as f64 / total_match_days as f64
    };

    let mut field_load: BTreeMap<i64, usize> = BTreeMap::new();
    let mut timeslot_load: BTreeMap<i64, usize> = BTreeMap::new();
    for fixture in plan.match_days.iter().flat_map(|day| &day.fixtures) {
        *field_load.entry(fixture.field_id).or_insert(0) += 1;
        *timeslot_load.entry(fixture.timeslot_id).or_insert(0) += 1;
    }

    let tallies: BTreeMap<i64, TeamTally> = tally_teams(rounds);
    let team_reports: Vec<TeamReport> = teams
        .iter()
        .filter(|team| team.active)
        .map(|team| {
            let tally: TeamTally = tallies.get(&team.team_id).copied().unwrap_or_default();
            TeamReport {
                team_id: team.team_id,
                name: team.name.clone(),
                fixtures: tally.fixtures,
                home: tally.home,
                away: tally.away,
                byes: tally.byes,
            }
        })
        .collect();

    ScheduleStatistics {
        total_match_days,
        total_fixtures,
        average_fixtures_per_match_day,
        overflow_match_days: plan
            .match_days
            .iter()
            .filter(|day| day.uses_overflow())
            .count(),
        flex_match_days: plan
            .match_days
            .iter()
            .filter(|day| day.day_type == MatchDayType::Flex)
            .count(),
        deferred_fixtures: plan.deferrals.len(),
        skipped_rounds: plan.skipped_rounds.clone(),
        extension_dates_used: plan.extension_dates_used,
        field_load,
        timeslot_load,
        teams: team_reports,
    }
}

/// Warnings derived from a generated plan.
#[must_use]
pub fn plan_warnings(plan: &SchedulePlan) -> Vec<GenerationWarning> {
    let mut warnings: Vec<GenerationWarning> = Vec::new();
    if plan.extension_dates_used > 0
        && let Some(last) = plan.match_days.last()
    {
        warnings.push(GenerationWarning::CalendarExtended {
            extension_dates: plan.extension_dates_used,
            last_date: last.date,
        });
    }
    let overflow: usize = plan
        .match_days
        .iter()
        .filter(|day| day.uses_overflow())
        .count();
    if overflow > 0 {
        warnings.push(GenerationWarning::OverflowUsed {
            match_days: overflow,
        });
    }
    warnings
}

/// A successfully generated season.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    /// The generated season.
    pub season_id: i64,
    /// Match-days in chronological order.
    pub match_days: Vec<MatchDay>,
    /// Aggregate figures.
    pub statistics: ScheduleStatistics,
    /// Concerns for operator review.
    pub warnings: Vec<GenerationWarning>,
}

impl GenerationOutcome {
    /// Total games scheduled.
    #[must_use]
    pub fn fixture_count(&self) -> usize {
        self.match_days.iter().map(|day| day.fixtures.len()).sum()
    }

    /// Human-readable one-line summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Generated {} fixture(s) across {} match-day(s)",
            self.fixture_count(),
            self.match_days.len()
        )
    }
}

/// The configuration a generation run was invoked with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSummary {
    /// Season display name.
    pub name: String,
    /// ISO-8601 season start.
    pub start_date: String,
    /// ISO-8601 season end.
    pub end_date: String,
    /// Configured legs.
    pub legs: u8,
    /// Active teams.
    pub teams: usize,
    /// Active fields.
    pub fields: usize,
    /// Regular timeslots.
    pub timeslots: usize,
    /// Per-date game limit.
    pub max_games_per_date: usize,
}

impl From<&SeasonConfig> for ConfigSummary {
    fn from(config: &SeasonConfig) -> Self {
        Self {
            name: config.name.clone(),
            start_date: config.schedule.start_date.to_string(),
            end_date: config.schedule.end_date.to_string(),
            legs: config.legs,
            teams: config.active_team_count(),
            fields: config.schedule.active_fields().len(),
            timeslots: config.schedule.active_timeslots().len(),
            max_games_per_date: config.schedule.max_games_per_date,
        }
    }
}

/// The record of one generation run, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationLog {
    /// The season the run targeted.
    pub season_id: i64,
    /// The owning organization.
    pub organization_id: i64,
    /// Whether the schedule was generated and stored.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// The configuration the run used.
    pub config: ConfigSummary,
    /// Match-days generated.
    pub match_days: usize,
    /// Games generated.
    pub fixtures: usize,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages; empty on success.
    pub errors: Vec<String>,
    /// Statistics when generation succeeded.
    pub statistics: Option<ScheduleStatistics>,
}

impl GenerationLog {
    /// Creates the log of a stored schedule.
    #[must_use]
    pub fn success(config: &SeasonConfig, outcome: &GenerationOutcome) -> Self {
        Self {
            season_id: config.season_id,
            organization_id: config.organization_id,
            success: true,
            message: outcome.summary(),
            config: ConfigSummary::from(config),
            match_days: outcome.match_days.len(),
            fixtures: outcome.fixture_count(),
            warnings: outcome.warnings.iter().map(ToString::to_string).collect(),
            errors: Vec::new(),
            statistics: Some(outcome.statistics.clone()),
        }
    }

    /// Creates the log of a failed run.
    ///
    /// When the schedule was generated but not stored, its figures are kept.
    #[must_use]
    pub fn failure(config: &SeasonConfig, error: &CoreError) -> Self {
        let outcome: Option<&GenerationOutcome> = error.outcome();
        Self {
            season_id: config.season_id,
            organization_id: config.organization_id,
            success: false,
            message: error.to_string(),
            config: ConfigSummary::from(config),
            match_days: outcome.map_or(0, |o| o.match_days.len()),
            fixtures: outcome.map_or(0, GenerationOutcome::fixture_count),
            warnings: outcome
                .map(|o| o.warnings.iter().map(ToString::to_string).collect())
                .unwrap_or_default(),
            errors: error.messages(),
            statistics: outcome.map(|o| o.statistics.clone()),
        }
    }
}
