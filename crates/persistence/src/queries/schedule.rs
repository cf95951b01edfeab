// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season and schedule read-back.

use diesel::SqliteConnection;
use diesel::prelude::*;
use matchday::GenerationLog;
use matchday_domain::{MatchDay, MatchDayType, ScheduledFixture};
use std::collections::HashMap;
use std::str::FromStr;

use crate::data_models::{GenerationLogRecord, SeasonRecord, from_column, parse_date, parse_time};
use crate::diesel_schema::{generation_logs, match_days, scheduled_fixtures, seasons};
use crate::error::PersistenceError;

/// Diesel Queryable struct for season rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = seasons)]
struct SeasonRow {
    season_id: i64,
    organization_id: i64,
    name: String,
    is_active: i32,
    activated_at: Option<String>,
}

/// Diesel Queryable struct for match-day rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = match_days)]
struct MatchDayRow {
    match_day_id: i64,
    number: i32,
    match_date: String,
    leg: i32,
    day_type: String,
    capacity: i32,
    beyond_season_end: i32,
}

/// Diesel Queryable struct for fixture rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = scheduled_fixtures)]
struct FixtureRow {
    match_day_id: i64,
    home_team_id: i64,
    away_team_id: i64,
    leg: i32,
    round: i32,
    field_id: i64,
    timeslot_id: i64,
    scheduled_time: String,
    match_number: i32,
    is_overflow: i32,
}

/// Diesel Queryable struct for generation log rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = generation_logs)]
struct GenerationLogRow {
    log_id: i64,
    season_id: i64,
    success: i32,
    message: String,
    details_json: String,
    created_at: String,
}

impl FixtureRow {
    fn into_fixture(self) -> Result<ScheduledFixture, PersistenceError> {
        Ok(ScheduledFixture {
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
            leg: from_column(self.leg, "scheduled_fixtures.leg")?,
            round: from_column(self.round, "scheduled_fixtures.round")?,
            field_id: self.field_id,
            timeslot_id: self.timeslot_id,
            scheduled_time: parse_time(
                &self.scheduled_time,
                "scheduled_fixtures.scheduled_time",
            )?,
            match_number: from_column(self.match_number, "scheduled_fixtures.match_number")?,
            overflow: self.is_overflow != 0,
        })
    }
}

/// Retrieves a registered season.
///
/// # Errors
///
/// Returns `SeasonNotFound` if the season is not registered.
pub fn get_season(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<SeasonRecord, PersistenceError> {
    let row: SeasonRow = seasons::table
        .find(season_id)
        .select(SeasonRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::SeasonNotFound(season_id))?;

    Ok(SeasonRecord {
        season_id: row.season_id,
        organization_id: row.organization_id,
        name: row.name,
        is_active: row.is_active != 0,
        activated_at: row.activated_at,
    })
}

/// Reads back the stored schedule of a season in match-day order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be decoded.
pub fn list_match_days(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<Vec<MatchDay>, PersistenceError> {
    let day_rows: Vec<MatchDayRow> = match_days::table
        .filter(match_days::season_id.eq(season_id))
        .order(match_days::number.asc())
        .select(MatchDayRow::as_select())
        .load(conn)?;

    let ids: Vec<i64> = day_rows.iter().map(|row| row.match_day_id).collect();
    let fixture_rows: Vec<FixtureRow> = scheduled_fixtures::table
        .filter(scheduled_fixtures::match_day_id.eq_any(&ids))
        .order((
            scheduled_fixtures::match_day_id.asc(),
            scheduled_fixtures::match_number.asc(),
        ))
        .select(FixtureRow::as_select())
        .load(conn)?;

    let mut fixtures_by_day: HashMap<i64, Vec<ScheduledFixture>> = HashMap::new();
    for row in fixture_rows {
        let match_day_id: i64 = row.match_day_id;
        fixtures_by_day
            .entry(match_day_id)
            .or_default()
            .push(row.into_fixture()?);
    }

    day_rows
        .into_iter()
        .map(|row| {
            let day_type: MatchDayType = MatchDayType::from_str(&row.day_type).map_err(|_| {
                PersistenceError::InvalidValue {
                    column: "match_days.day_type",
                    value: row.day_type.clone(),
                }
            })?;
            Ok(MatchDay {
                number: from_column(row.number, "match_days.number")?,
                date: parse_date(&row.match_date, "match_days.match_date")?,
                leg: from_column(row.leg, "match_days.leg")?,
                day_type,
                capacity: from_column(row.capacity, "match_days.capacity")?,
                beyond_season_end: row.beyond_season_end != 0,
                fixtures: fixtures_by_day.remove(&row.match_day_id).unwrap_or_default(),
            })
        })
        .collect()
}

/// Lists the generation logs of a season, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored log cannot be decoded.
pub fn list_generation_logs(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<Vec<GenerationLogRecord>, PersistenceError> {
    let rows: Vec<GenerationLogRow> = generation_logs::table
        .filter(generation_logs::season_id.eq(season_id))
        .order(generation_logs::log_id.desc())
        .select(GenerationLogRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(|row| {
            let details: GenerationLog = serde_json::from_str(&row.details_json)?;
            Ok(GenerationLogRecord {
                log_id: row.log_id,
                season_id: row.season_id,
                success: row.success != 0,
                message: row.message,
                created_at: row.created_at,
                details,
            })
        })
        .collect()
}
