// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Matchday season calendar engine.
//!
//! Stores seasons, generated match-days with their fixtures, and the
//! generation log of every run. Built on Diesel with `SQLite`.
//!
//! ## Schema
//!
//! - `seasons`: Registered seasons and their active flag
//! - `match_days`: One row per numbered match-day
//! - `scheduled_fixtures`: Games, cascading from their match-day
//! - `generation_logs`: Outcome of each run, with the full log as JSON
//!
//! Migrations live in `migrations/` and are embedded at compile time.
//!
//! ## Testing
//!
//! Tests run against shared-cache in-memory databases. Each call to
//! `Persistence::new_in_memory()` gets its own database name.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use matchday::{GenerationLog, ScheduleStore, SeasonConfig};
use matchday_domain::MatchDay;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{GenerationLogRecord, SeasonRecord};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for seasons, schedules and generation logs.
pub struct Persistence {
    conn: SqliteConnection,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection =
            backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InvalidDatabasePath(path.as_ref().display().to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if enforcement is disabled or the check fails.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Registers a season, updating its name and organization if it exists.
    ///
    /// Storing a schedule registers its season as well, so this is only
    /// needed to create a season ahead of its first generation run.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn save_season(
        &mut self,
        season_id: i64,
        organization_id: i64,
        name: &str,
    ) -> Result<(), PersistenceError> {
        mutations::upsert_season(&mut self.conn, season_id, organization_id, name)
    }

    /// Retrieves a registered season.
    ///
    /// # Errors
    ///
    /// Returns `SeasonNotFound` if the season is not registered.
    pub fn get_season(&mut self, season_id: i64) -> Result<SeasonRecord, PersistenceError> {
        queries::get_season(&mut self.conn, season_id)
    }

    /// Reads back the stored schedule of a season.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_match_days(&mut self, season_id: i64) -> Result<Vec<MatchDay>, PersistenceError> {
        queries::list_match_days(&mut self.conn, season_id)
    }

    /// Lists the generation logs of a season, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_generation_logs(
        &mut self,
        season_id: i64,
    ) -> Result<Vec<GenerationLogRecord>, PersistenceError> {
        queries::list_generation_logs(&mut self.conn, season_id)
    }
}

impl ScheduleStore for Persistence {
    type Error = PersistenceError;

    fn replace_season_schedule(
        &mut self,
        season: &SeasonConfig,
        match_days: &[MatchDay],
    ) -> Result<(), Self::Error> {
        mutations::replace_season_schedule(
            &mut self.conn,
            season.season_id,
            season.organization_id,
            &season.name,
            match_days,
        )
    }

    fn record_generation_log(&mut self, log: &GenerationLog) -> Result<(), Self::Error> {
        mutations::record_generation_log(&mut self.conn, log).map(|_| ())
    }
}
