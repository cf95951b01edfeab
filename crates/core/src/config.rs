// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season configuration and its pre-flight checks.

use crate::report::GenerationWarning;
use matchday_domain::{
    CandidateDate, DomainError, ScheduleConfig, Team, candidate_dates, validate_date_range,
    validate_fields, validate_leg_count, validate_max_games_per_date, validate_team_count,
    validate_timeslots, validate_unique_teams,
};

/// Seasons with more legs than this are flagged as unusually long.
pub const MAX_RECOMMENDED_LEGS: u8 = 4;

/// Seasons with more active teams than this are flagged.
pub const MANY_TEAMS_THRESHOLD: usize = 24;

/// Everything needed to generate one season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonConfig {
    /// The season being generated.
    pub season_id: i64,
    /// The organization owning the season.
    pub organization_id: i64,
    /// Display name of the season.
    pub name: String,
    /// Number of complete round-robin passes.
    pub legs: u8,
    /// Swap home and away on even legs.
    pub alternate_home_away: bool,
    /// Participating teams, in seeding order.
    pub teams: Vec<Team>,
    /// Calendar constraints.
    pub schedule: ScheduleConfig,
}

impl SeasonConfig {
    /// Creates a single-leg season with home/away alternation enabled.
    ///
    /// # Arguments
    ///
    /// * `season_id` - The season identifier
    /// * `organization_id` - The owning organization
    /// * `name` - The season's display name
    /// * `teams` - Participating teams
    /// * `schedule` - Calendar constraints
    #[must_use]
    pub fn new(
        season_id: i64,
        organization_id: i64,
        name: &str,
        teams: Vec<Team>,
        schedule: ScheduleConfig,
    ) -> Self {
        Self {
            season_id,
            organization_id,
            name: name.to_string(),
            legs: 1,
            alternate_home_away: true,
            teams,
            schedule,
        }
    }

    /// Number of teams taking part.
    #[must_use]
    pub fn active_team_count(&self) -> usize {
        self.teams.iter().filter(|team| team.active).count()
    }

    /// Number of games a complete season contains.
    #[must_use]
    pub fn estimated_fixtures(&self) -> usize {
        let teams: usize = self.active_team_count();
        teams * teams.saturating_sub(1) / 2 * usize::from(self.legs)
    }
}

/// The result of checking a configuration before generation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigurationReport {
    /// Violations that prevent generation.
    pub errors: Vec<DomainError>,
    /// Concerns an operator should review. Never block generation.
    pub warnings: Vec<GenerationWarning>,
}

impl ConfigurationReport {
    /// Returns whether generation may proceed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks a season configuration.
///
/// Every rule is evaluated so the caller sees all violations at once.
/// Warnings are only computed for configurations without errors.
///
/// # Arguments
///
/// * `config` - The configuration to check
///
/// # Returns
///
/// The collected errors and warnings.
#[must_use]
pub fn validate_season_config(config: &SeasonConfig) -> ConfigurationReport {
    let schedule: &ScheduleConfig = &config.schedule;
    let checks: [Result<(), DomainError>; 7] = [
        validate_unique_teams(&config.teams),
        validate_team_count(&config.teams).map(|_| ()),
        validate_leg_count(config.legs),
        validate_date_range(schedule.start_date, schedule.end_date),
        validate_fields(&schedule.fields),
        validate_timeslots(&schedule.timeslots, schedule.overflow_timeslot_id),
        validate_max_games_per_date(schedule.max_games_per_date),
    ];

    let mut report: ConfigurationReport = ConfigurationReport {
        errors: checks.into_iter().filter_map(Result::err).collect(),
        warnings: Vec::new(),
    };
    if !report.is_valid() {
        return report;
    }

    match candidate_dates(schedule) {
        Ok(dates) => {
            let capacity: usize = dates
                .iter()
                .map(|date: &CandidateDate| date.capacity)
                .sum();
            let estimated_fixtures: usize = config.estimated_fixtures();
            if estimated_fixtures > capacity {
                report.warnings.push(GenerationWarning::CapacityTight {
                    estimated_fixtures,
                    capacity,
                });
            }
        }
        Err(err) => report.errors.push(err),
    }

    if config.legs > MAX_RECOMMENDED_LEGS {
        report
            .warnings
            .push(GenerationWarning::LongSeason { legs: config.legs });
    }

    let teams: usize = config.active_team_count();
    if teams > MANY_TEAMS_THRESHOLD {
        report.warnings.push(GenerationWarning::ManyTeams { teams });
    }

    report
}
