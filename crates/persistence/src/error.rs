// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised while storing or reading season schedules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A statement failed. Constraint violations land here.
    DatabaseError(String),
    /// The database could not be opened.
    DatabaseConnectionFailed(String),
    /// Embedded schema migrations did not apply.
    MigrationFailed(String),
    /// A connection PRAGMA could not be applied.
    PragmaFailed {
        /// The PRAGMA statement.
        pragma: &'static str,
        /// The underlying error.
        message: String,
    },
    /// The database path is not valid UTF-8.
    InvalidDatabasePath(String),
    /// Log details or a date/time value could not be encoded.
    SerializationError(String),
    /// `PRAGMA foreign_keys` reports enforcement is off.
    ForeignKeyEnforcementNotEnabled,
    /// The season has not been registered.
    SeasonNotFound(i64),
    /// A value does not fit its column, or a stored value cannot be decoded.
    InvalidValue {
        /// The column involved.
        column: &'static str,
        /// The offending value.
        value: String,
    },
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Could not open database: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Schema migration failed: {msg}"),
            Self::PragmaFailed { pragma, message } => {
                write!(f, "Could not apply '{pragma}': {message}")
            }
            Self::InvalidDatabasePath(path) => {
                write!(f, "Database path is not valid UTF-8: {path}")
            }
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "SQLite foreign key enforcement is disabled")
            }
            Self::SeasonNotFound(season_id) => write!(f, "Season {season_id} not found"),
            Self::InvalidValue { column, value } => {
                write!(f, "Invalid value for {column}: {value}")
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
