// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Each operation takes the persistence adapter and a request, and returns
//! a response DTO or an `ApiError`.

use matchday::{GenerationOutcome, SeasonConfig};
use matchday_domain::{
    Field, MatchDay, ScheduleConfig, ScheduledFixture, SpecialDate, Team, Timeslot,
};
use matchday_persistence::{GenerationLogRecord, Persistence, SeasonRecord};
use time::Date;
use tracing::{info, warn};

use crate::error::{ApiError, translate_core_error};
use crate::parsing::{
    format_date, format_time, parse_date, parse_flex_policy, parse_special_date_kind,
    parse_time, parse_weekday,
};
use crate::request_response::{
    FixtureInfo, GenerateScheduleRequest, GenerateScheduleResponse, GenerationLogInfo,
    ListGenerationLogsResponse, MatchDayInfo, SeasonScheduleResponse,
};

/// Converts a request into the engine configuration.
///
/// # Errors
///
/// Returns `InvalidInput` for the first value that cannot be parsed.
/// Rule violations such as a reversed date range are left to the engine.
pub fn build_season_config(request: &GenerateScheduleRequest) -> Result<SeasonConfig, ApiError> {
    let start_date: Date = parse_date("start_date", &request.start_date)?;
    let end_date: Date = parse_date("end_date", &request.end_date)?;

    let fields: Vec<Field> = request
        .fields
        .iter()
        .map(|field| Field::new(field.field_id, &field.name, field.active))
        .collect();

    let timeslots: Vec<Timeslot> = request
        .timeslots
        .iter()
        .map(|slot| {
            Ok(Timeslot::new(
                slot.timeslot_id,
                &slot.name,
                parse_time("timeslots.start_time", &slot.start_time)?,
                parse_time("timeslots.end_time", &slot.end_time)?,
                slot.default_active,
                slot.sort_order,
            ))
        })
        .collect::<Result<_, ApiError>>()?;

    let special_dates: Vec<SpecialDate> = request
        .special_dates
        .iter()
        .map(|special| {
            Ok(SpecialDate::new(
                parse_date("special_dates.date", &special.date)?,
                parse_special_date_kind(&special.kind)?,
                special.note.clone(),
            ))
        })
        .collect::<Result<_, ApiError>>()?;

    let teams: Vec<Team> = request
        .teams
        .iter()
        .map(|team| Team::new(team.team_id, &team.name, team.active))
        .collect();

    let mut schedule: ScheduleConfig = ScheduleConfig::new(
        start_date,
        end_date,
        request.max_games_per_date,
        fields,
        timeslots,
    );
    schedule.special_dates = special_dates;
    schedule.flex_cadence = request.flex_cadence;
    schedule.overflow_timeslot_id = request.overflow_timeslot_id;
    if let Some(weekday) = &request.match_weekday {
        schedule.match_weekday = parse_weekday(weekday)?;
    }
    if let Some(policy) = &request.flex_policy {
        schedule.flex_policy = parse_flex_policy(policy)?;
    }

    let mut config: SeasonConfig = SeasonConfig::new(
        request.season_id,
        request.organization_id,
        &request.name,
        teams,
        schedule,
    );
    config.legs = request.legs;
    config.alternate_home_away = request.alternate_home_away;
    Ok(config)
}

/// Generates a season schedule and stores it.
///
/// The season row is registered or renamed in the same transaction that
/// replaces its schedule. A rejected request changes nothing.
///
/// # Errors
///
/// Returns an error if:
/// - A request value cannot be parsed
/// - The configuration is invalid
/// - Scheduling fails
/// - The schedule cannot be stored (the generated result is attached)
pub fn generate_schedule(
    persistence: &mut Persistence,
    request: &GenerateScheduleRequest,
) -> Result<GenerateScheduleResponse, ApiError> {
    let config: SeasonConfig = build_season_config(request)?;

    let outcome: GenerationOutcome = matchday::run(persistence, &config).map_err(|err| {
        warn!(season_id = config.season_id, error = %err, "Schedule generation failed");
        translate_core_error(err)
    })?;

    info!(
        season_id = config.season_id,
        match_days = outcome.match_days.len(),
        fixtures = outcome.fixture_count(),
        "Stored season schedule"
    );

    Ok(GenerateScheduleResponse::stored(&outcome))
}

/// Returns the stored schedule of a season.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the season is not registered.
pub fn get_season_schedule(
    persistence: &mut Persistence,
    season_id: i64,
) -> Result<SeasonScheduleResponse, ApiError> {
    let season: SeasonRecord = persistence.get_season(season_id)?;
    let match_days: Vec<MatchDay> = persistence.list_match_days(season_id)?;

    Ok(SeasonScheduleResponse {
        season_id: season.season_id,
        organization_id: season.organization_id,
        name: season.name,
        is_active: season.is_active,
        activated_at: season.activated_at,
        match_days: match_days
            .iter()
            .map(match_day_to_info)
            .collect::<Result<_, _>>()?,
    })
}

/// Lists the generation runs of a season, newest first.
///
/// # Errors
///
/// Returns an error if the logs cannot be read.
pub fn list_generation_logs(
    persistence: &mut Persistence,
    season_id: i64,
) -> Result<ListGenerationLogsResponse, ApiError> {
    let records: Vec<GenerationLogRecord> = persistence.list_generation_logs(season_id)?;
    Ok(ListGenerationLogsResponse {
        season_id,
        logs: records
            .into_iter()
            .map(|record| GenerationLogInfo {
                log_id: record.log_id,
                success: record.success,
                message: record.message,
                created_at: record.created_at,
                match_days: record.details.match_days,
                fixtures: record.details.fixtures,
                warnings: record.details.warnings,
                errors: record.details.errors,
            })
            .collect(),
    })
}

fn match_day_to_info(day: &MatchDay) -> Result<MatchDayInfo, ApiError> {
    Ok(MatchDayInfo {
        number: day.number,
        date: format_date(day.date)?,
        leg: day.leg,
        day_type: day.day_type.as_str().to_string(),
        capacity: day.capacity,
        beyond_season_end: day.beyond_season_end,
        fixtures: day
            .fixtures
            .iter()
            .map(fixture_to_info)
            .collect::<Result<_, _>>()?,
    })
}

fn fixture_to_info(fixture: &ScheduledFixture) -> Result<FixtureInfo, ApiError> {
    Ok(FixtureInfo {
        match_number: fixture.match_number,
        home_team_id: fixture.home_team_id,
        away_team_id: fixture.away_team_id,
        leg: fixture.leg,
        round: fixture.round,
        field_id: fixture.field_id,
        timeslot_id: fixture.timeslot_id,
        scheduled_time: format_time(fixture.scheduled_time)?,
        overflow: fixture.overflow,
    })
}
