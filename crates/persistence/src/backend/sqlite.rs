// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection setup for the schedule database.
//!
//! Every connection gets `foreign_keys = ON` before migrations run, because
//! replacing a season's schedule relies on match-day and fixture rows
//! cascading away with their parent rows.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Season, match-day, fixture and generation-log tables.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Row ID assigned by the most recent insert on `conn`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Confirms that `SQLite` is enforcing foreign keys on this connection.
///
/// # Errors
///
/// Returns `ForeignKeyEnforcementNotEnabled` when the PRAGMA reports 0.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma =
        diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if pragma.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    debug!("Foreign key enforcement confirmed");
    Ok(())
}

/// Opens the database at `database_url` and brings its schema up to date.
///
/// # Errors
///
/// Returns an error if the connection, the foreign key PRAGMA or a
/// migration fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, "Opening schedule database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;
    apply_pragma(&mut conn, "PRAGMA foreign_keys = ON")?;

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?
        .len();
    info!(applied, "Schema migrations applied");

    Ok(conn)
}

/// Switches a file database to write-ahead logging.
///
/// # Errors
///
/// Returns an error if the PRAGMA fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    apply_pragma(conn, "PRAGMA journal_mode = WAL")
}

// NOTE: Diesel has no PRAGMA DSL, so these go through sql_query.
fn apply_pragma(conn: &mut SqliteConnection, pragma: &'static str) -> Result<(), PersistenceError> {
    diesel::sql_query(pragma)
        .execute(conn)
        .map_err(|e| PersistenceError::PragmaFailed {
            pragma,
            message: e.to_string(),
        })?;
    Ok(())
}
