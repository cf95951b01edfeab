// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season schedule mutations.
//!
//! `replace_season_schedule` is the only entry point the coordinator uses
//! for match-days. It registers the season, clears the previous schedule,
//! inserts the new one and activates the season inside a single
//! transaction.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use matchday::GenerationLog;
use matchday_domain::{MatchDay, ScheduledFixture};
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{
    NewGenerationLog, NewMatchDay, NewScheduledFixture, NewSeason, format_date, format_time,
    to_column,
};
use crate::diesel_schema::{generation_logs, match_days, scheduled_fixtures, seasons};
use crate::error::PersistenceError;

/// Registers a season, or renames it if it already exists.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `season_id` - The season identifier
/// * `organization_id` - The owning organization
/// * `name` - The season display name
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_season(
    conn: &mut SqliteConnection,
    season_id: i64,
    organization_id: i64,
    name: &str,
) -> Result<(), PersistenceError> {
    let new_season: NewSeason<'_> = NewSeason {
        season_id,
        organization_id,
        name,
    };

    diesel::insert_into(seasons::table)
        .values(&new_season)
        .on_conflict(seasons::season_id)
        .do_update()
        .set((
            seasons::organization_id.eq(organization_id),
            seasons::name.eq(name),
        ))
        .execute(conn)?;

    debug!(season_id, organization_id, "Registered season");
    Ok(())
}

/// Deletes every match-day of a season.
///
/// Fixtures are removed by the `ON DELETE CASCADE` on `match_day_id`.
///
/// # Returns
///
/// The number of match-days removed.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn clear_season_schedule(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<usize, PersistenceError> {
    let removed: usize =
        diesel::delete(match_days::table.filter(match_days::season_id.eq(season_id)))
            .execute(conn)?;
    debug!(season_id, removed, "Cleared previous schedule");
    Ok(removed)
}

/// Inserts match-days for a season.
///
/// # Returns
///
/// The database identifiers of the inserted rows, in input order.
///
/// # Errors
///
/// Returns an error if a value does not fit its column or the insert fails.
pub fn insert_match_days(
    conn: &mut SqliteConnection,
    season_id: i64,
    days: &[MatchDay],
) -> Result<Vec<i64>, PersistenceError> {
    let mut ids: Vec<i64> = Vec::with_capacity(days.len());
    for day in days {
        let row: NewMatchDay = NewMatchDay {
            season_id,
            number: to_column(day.number, "match_days.number")?,
            match_date: format_date(day.date)?,
            leg: to_column(day.leg, "match_days.leg")?,
            day_type: day.day_type.as_str(),
            capacity: to_column(day.capacity, "match_days.capacity")?,
            beyond_season_end: i32::from(day.beyond_season_end),
        };
        diesel::insert_into(match_days::table)
            .values(&row)
            .execute(conn)?;
        ids.push(get_last_insert_rowid(conn)?);
    }
    Ok(ids)
}

/// Inserts the fixtures of one match-day.
///
/// # Errors
///
/// Returns an error if a value does not fit its column or the insert fails.
pub fn insert_fixtures(
    conn: &mut SqliteConnection,
    match_day_id: i64,
    fixtures: &[ScheduledFixture],
) -> Result<usize, PersistenceError> {
    let rows: Vec<NewScheduledFixture> = fixtures
        .iter()
        .map(|fixture| {
            Ok(NewScheduledFixture {
                match_day_id,
                home_team_id: fixture.home_team_id,
                away_team_id: fixture.away_team_id,
                leg: to_column(fixture.leg, "scheduled_fixtures.leg")?,
                round: to_column(fixture.round, "scheduled_fixtures.round")?,
                field_id: fixture.field_id,
                timeslot_id: fixture.timeslot_id,
                scheduled_time: format_time(fixture.scheduled_time)?,
                match_number: to_column(fixture.match_number, "scheduled_fixtures.match_number")?,
                is_overflow: i32::from(fixture.overflow),
            })
        })
        .collect::<Result<Vec<_>, PersistenceError>>()?;

    if rows.is_empty() {
        return Ok(0);
    }

    Ok(diesel::insert_into(scheduled_fixtures::table)
        .values(&rows)
        .execute(conn)?)
}

/// Flags a season as active and stamps the activation time.
///
/// # Errors
///
/// Returns `SeasonNotFound` if no row was updated.
pub fn mark_season_active(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(seasons::table.find(season_id))
        .set((
            seasons::is_active.eq(1),
            seasons::activated_at.eq(diesel::dsl::sql::<Nullable<Text>>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::SeasonNotFound(season_id));
    }
    Ok(())
}

/// Replaces the stored schedule of a season.
///
/// Runs `upsert_season`, `clear_season_schedule`, `insert_match_days`,
/// `insert_fixtures` and `mark_season_active` in one transaction. Any
/// failure rolls the whole replacement back, so the season row and its
/// previous schedule stay as they were.
///
/// # Errors
///
/// Returns the first database error encountered.
pub fn replace_season_schedule(
    conn: &mut SqliteConnection,
    season_id: i64,
    organization_id: i64,
    name: &str,
    days: &[MatchDay],
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        upsert_season(conn, season_id, organization_id, name)?;
        let removed: usize = clear_season_schedule(conn, season_id)?;
        let ids: Vec<i64> = insert_match_days(conn, season_id, days)?;
        let mut fixture_count: usize = 0;
        for (match_day_id, day) in ids.into_iter().zip(days) {
            fixture_count += insert_fixtures(conn, match_day_id, &day.fixtures)?;
        }
        mark_season_active(conn, season_id)?;

        info!(
            season_id,
            removed_match_days = removed,
            match_days = days.len(),
            fixtures = fixture_count,
            "Replaced season schedule"
        );
        Ok(())
    })
}

/// Stores a generation log.
///
/// The full log is kept as JSON in `details_json`.
///
/// # Returns
///
/// The identifier of the new log row.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn record_generation_log(
    conn: &mut SqliteConnection,
    log: &GenerationLog,
) -> Result<i64, PersistenceError> {
    let details_json: String = serde_json::to_string(log)?;
    let row: NewGenerationLog<'_> = NewGenerationLog {
        season_id: log.season_id,
        organization_id: log.organization_id,
        success: i32::from(log.success),
        message: &log.message,
        details_json,
    };

    diesel::insert_into(generation_logs::table)
        .values(&row)
        .execute(conn)?;
    let log_id: i64 = get_last_insert_rowid(conn)?;

    debug!(
        log_id,
        season_id = log.season_id,
        success = log.success,
        "Recorded generation log"
    );
    Ok(log_id)
}
