// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::{ConfigurationReport, SeasonConfig, validate_season_config};
use crate::error::CoreError;
use crate::report::{
    GenerationLog, GenerationOutcome, GenerationWarning, ScheduleStatistics, compute_statistics,
    plan_warnings,
};
use crate::store::ScheduleStore;
use matchday_domain::{
    Round, SchedulePlan, generate_match_days, generate_rounds, validate_pairings,
};
use tracing::{error, info, warn};

/// Generates a season without storing it.
///
/// Runs configuration checks, pairing, structural validation and
/// scheduling, then computes statistics.
///
/// # Arguments
///
/// * `config` - The season configuration
///
/// # Returns
///
/// The generated match-days with statistics and warnings.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid (every violation is reported)
/// - The generated pairings break a structural invariant
/// - The calendar cannot hold every fixture
pub fn generate_season(config: &SeasonConfig) -> Result<GenerationOutcome, CoreError> {
    let report: ConfigurationReport = validate_season_config(config);
    if !report.is_valid() {
        warn!(
            season_id = config.season_id,
            errors = report.errors.len(),
            "Rejected season configuration"
        );
        return Err(CoreError::InvalidConfiguration(report.errors));
    }

    let rounds: Vec<Round> =
        generate_rounds(&config.teams, config.legs, config.alternate_home_away)?;

    let violations: Vec<String> = validate_pairings(&rounds, &config.teams, config.legs);
    if !violations.is_empty() {
        error!(
            season_id = config.season_id,
            violations = violations.len(),
            "Generated pairings violate round-robin invariants"
        );
        return Err(CoreError::StructuralViolation(violations));
    }

    let plan: SchedulePlan = generate_match_days(&rounds, &config.schedule)?;
    let statistics: ScheduleStatistics = compute_statistics(&plan, &rounds, &config.teams);

    let mut warnings: Vec<GenerationWarning> = report.warnings;
    warnings.extend(plan_warnings(&plan));
    for warning in &warnings {
        warn!(season_id = config.season_id, %warning, "Generation warning");
    }

    let outcome: GenerationOutcome = GenerationOutcome {
        season_id: config.season_id,
        match_days: plan.match_days,
        statistics,
        warnings,
    };

    info!(
        season_id = config.season_id,
        match_days = outcome.match_days.len(),
        fixtures = outcome.fixture_count(),
        warnings = outcome.warnings.len(),
        "Generated season"
    );

    Ok(outcome)
}

/// Generates a season and stores it.
///
/// The schedule is replaced in a single unit of work. A generation log is
/// recorded afterwards for successful and failed runs alike; failing to
/// record the log is logged but does not fail the run.
///
/// # Arguments
///
/// * `store` - Where the schedule is stored
/// * `config` - The season configuration
///
/// # Errors
///
/// Returns any error of [`generate_season`], or
/// `CoreError::PersistenceFailure` carrying the generated result when the
/// store rejects it.
pub fn run<S: ScheduleStore>(
    store: &mut S,
    config: &SeasonConfig,
) -> Result<GenerationOutcome, CoreError> {
    let outcome: GenerationOutcome = match generate_season(config) {
        Ok(outcome) => outcome,
        Err(err) => {
            record_log(store, &GenerationLog::failure(config, &err));
            return Err(err);
        }
    };

    if let Err(err) = store.replace_season_schedule(config, &outcome.match_days) {
        error!(season_id = config.season_id, error = %err, "Failed to store schedule");
        let failure: CoreError = CoreError::PersistenceFailure {
            message: err.to_string(),
            outcome: Box::new(outcome),
        };
        record_log(store, &GenerationLog::failure(config, &failure));
        return Err(failure);
    }

    record_log(store, &GenerationLog::success(config, &outcome));
    Ok(outcome)
}

fn record_log<S: ScheduleStore>(store: &mut S, log: &GenerationLog) {
    if let Err(err) = store.record_generation_log(log) {
        warn!(season_id = log.season_id, error = %err, "Failed to record generation log");
    }
}
