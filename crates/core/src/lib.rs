// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod config;
mod coordinator;
mod error;
mod report;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use config::{
    ConfigurationReport, MANY_TEAMS_THRESHOLD, MAX_RECOMMENDED_LEGS, SeasonConfig,
    validate_season_config,
};
pub use coordinator::{generate_season, run};
pub use error::CoreError;
pub use report::{
    ConfigSummary, GenerationLog, GenerationOutcome, GenerationWarning, ScheduleStatistics,
    TeamReport, compute_statistics, plan_warnings,
};
pub use store::ScheduleStore;
