// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use matchday::GenerationLog;
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};

use crate::diesel_schema::{generation_logs, match_days, scheduled_fixtures, seasons};
use crate::error::PersistenceError;

/// Storage format of match dates.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Storage format of kick-off times.
pub const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// A registered season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRecord {
    pub season_id: i64,
    pub organization_id: i64,
    pub name: String,
    pub is_active: bool,
    pub activated_at: Option<String>,
}

/// A stored generation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationLogRecord {
    pub log_id: i64,
    pub season_id: i64,
    pub success: bool,
    pub message: String,
    pub created_at: String,
    pub details: GenerationLog,
}

#[derive(Insertable)]
#[diesel(table_name = seasons)]
pub struct NewSeason<'a> {
    pub season_id: i64,
    pub organization_id: i64,
    pub name: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = match_days)]
pub struct NewMatchDay {
    pub season_id: i64,
    pub number: i32,
    pub match_date: String,
    pub leg: i32,
    pub day_type: &'static str,
    pub capacity: i32,
    pub beyond_season_end: i32,
}

#[derive(Insertable)]
#[diesel(table_name = scheduled_fixtures)]
pub struct NewScheduledFixture {
    pub match_day_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub leg: i32,
    pub round: i32,
    pub field_id: i64,
    pub timeslot_id: i64,
    pub scheduled_time: String,
    pub match_number: i32,
    pub is_overflow: i32,
}

#[derive(Insertable)]
#[diesel(table_name = generation_logs)]
pub struct NewGenerationLog<'a> {
    pub season_id: i64,
    pub organization_id: i64,
    pub success: i32,
    pub message: &'a str,
    pub details_json: String,
}

/// Narrows a value to an `INTEGER` column.
///
/// # Errors
///
/// Returns an error if the value does not fit.
pub fn to_column<T>(value: T, column: &'static str) -> Result<i32, PersistenceError>
where
    T: Copy + std::fmt::Display,
    i32: TryFrom<T>,
{
    i32::try_from(value).map_err(|_| PersistenceError::InvalidValue {
        column,
        value: value.to_string(),
    })
}

/// Widens an `INTEGER` column back into a domain value.
///
/// # Errors
///
/// Returns an error if the stored value is out of range.
pub fn from_column<T>(value: i32, column: &'static str) -> Result<T, PersistenceError>
where
    T: TryFrom<i32>,
{
    T::try_from(value).map_err(|_| PersistenceError::InvalidValue {
        column,
        value: value.to_string(),
    })
}

/// Formats a date for storage.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses a stored date.
///
/// # Errors
///
/// Returns an error if the stored text is not a date.
pub fn parse_date(value: &str, column: &'static str) -> Result<Date, PersistenceError> {
    Date::parse(value, DATE_FORMAT).map_err(|_| PersistenceError::InvalidValue {
        column,
        value: value.to_string(),
    })
}

/// Formats a kick-off time for storage.
///
/// # Errors
///
/// Returns an error if the time cannot be formatted.
pub fn format_time(time: Time) -> Result<String, PersistenceError> {
    time.format(TIME_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses a stored kick-off time.
///
/// # Errors
///
/// Returns an error if the stored text is not a time.
pub fn parse_time(value: &str, column: &'static str) -> Result<Time, PersistenceError> {
    Time::parse(value, TIME_FORMAT).map_err(|_| PersistenceError::InvalidValue {
        column,
        value: value.to_string(),
    })
}
