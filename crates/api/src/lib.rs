// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Matchday season calendar engine.
//!
//! Converts JSON-friendly requests into engine configuration, runs
//! generation against the persistence adapter, and maps results and
//! errors into response DTOs.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod parsing;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_persistence_error};
pub use handlers::{
    build_season_config, generate_schedule, get_season_schedule, list_generation_logs,
};
pub use parsing::{
    format_date, format_time, parse_date, parse_flex_policy, parse_special_date_kind,
    parse_time, parse_weekday,
};
pub use request_response::{
    FieldInput, FixtureInfo, GenerateScheduleRequest, GenerateScheduleResponse,
    GenerationLogInfo, ListGenerationLogsResponse, MatchDayInfo, SeasonScheduleResponse,
    SpecialDateInput, TeamInput, TimeslotInput,
};

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
