// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::SeasonConfig;
use crate::report::GenerationLog;
use matchday_domain::MatchDay;

/// Storage for generated schedules.
///
/// Implementations must make `replace_season_schedule` atomic: either the
/// season is registered, its previous schedule fully replaced and the
/// season marked active, or nothing changes.
pub trait ScheduleStore {
    /// The store's error type.
    type Error: std::fmt::Display;

    /// Replaces a season's schedule in a single unit of work.
    ///
    /// Registers the season (or updates its organization and name),
    /// clears the existing match-days and fixtures, inserts the new ones
    /// and marks the season active.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails. No partial state is left behind.
    fn replace_season_schedule(
        &mut self,
        season: &SeasonConfig,
        match_days: &[MatchDay],
    ) -> Result<(), Self::Error>;

    /// Records the log of a generation run.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be stored.
    fn record_generation_log(&mut self, log: &GenerationLog) -> Result<(), Self::Error>;
}
