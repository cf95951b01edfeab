// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parsing and formatting of request and response values.

use matchday_domain::{FlexDatePolicy, SpecialDateKind};
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time, Weekday};

use crate::error::ApiError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

/// Parses an ISO-8601 calendar date.
///
/// # Errors
///
/// Returns `InvalidInput` naming `field` if the value is not `YYYY-MM-DD`.
pub fn parse_date(field: &str, value: &str) -> Result<Date, ApiError> {
    Date::parse(value, DATE_FORMAT)
        .map_err(|e| invalid(field, format!("'{value}' is not a YYYY-MM-DD date: {e}")))
}

/// Parses an `HH:MM` time.
///
/// # Errors
///
/// Returns `InvalidInput` naming `field` if the value is not `HH:MM`.
pub fn parse_time(field: &str, value: &str) -> Result<Time, ApiError> {
    Time::parse(value, TIME_FORMAT)
        .map_err(|e| invalid(field, format!("'{value}' is not an HH:MM time: {e}")))
}

/// Parses an English weekday name, case-insensitively.
///
/// # Errors
///
/// Returns `InvalidInput` if the value is not a weekday.
pub fn parse_weekday(value: &str) -> Result<Weekday, ApiError> {
    match value.to_ascii_lowercase().as_str() {
        "monday" => Ok(Weekday::Monday),
        "tuesday" => Ok(Weekday::Tuesday),
        "wednesday" => Ok(Weekday::Wednesday),
        "thursday" => Ok(Weekday::Thursday),
        "friday" => Ok(Weekday::Friday),
        "saturday" => Ok(Weekday::Saturday),
        "sunday" => Ok(Weekday::Sunday),
        _ => Err(invalid("match_weekday", format!("'{value}' is not a weekday"))),
    }
}

/// Parses a special date kind.
///
/// # Errors
///
/// Returns `InvalidInput` for unknown kinds.
pub fn parse_special_date_kind(value: &str) -> Result<SpecialDateKind, ApiError> {
    SpecialDateKind::from_str(value).map_err(|e| invalid("special_dates.kind", e.to_string()))
}

/// Parses a flex date policy.
///
/// # Errors
///
/// Returns `InvalidInput` for unknown policies.
pub fn parse_flex_policy(value: &str) -> Result<FlexDatePolicy, ApiError> {
    match value {
        "prefer_regular" => Ok(FlexDatePolicy::PreferRegularOverFlex),
        "chronological" => Ok(FlexDatePolicy::Chronological),
        _ => Err(invalid(
            "flex_policy",
            format!("'{value}' is not one of prefer_regular, chronological"),
        )),
    }
}

/// Formats a date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `Internal` if formatting fails.
pub fn format_date(date: Date) -> Result<String, ApiError> {
    date.format(DATE_FORMAT).map_err(|e| ApiError::Internal {
        message: e.to_string(),
    })
}

/// Formats a time as `HH:MM`.
///
/// # Errors
///
/// Returns `Internal` if formatting fails.
pub fn format_time(time: Time) -> Result<String, ApiError> {
    time.format(TIME_FORMAT).map_err(|e| ApiError::Internal {
        message: e.to_string(),
    })
}
