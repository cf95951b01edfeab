// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use matchday::CoreError;
use matchday_persistence::PersistenceError;
use thiserror::Error;

use crate::request_response::GenerateScheduleResponse;

/// API-level errors.
///
/// These are distinct from engine and persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// A request value could not be parsed.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },

    /// The season configuration violates one or more rules.
    #[error("Invalid configuration: {}", .errors.join("; "))]
    InvalidConfiguration {
        /// Every violated rule.
        errors: Vec<String>,
    },

    /// Generated pairings broke a round-robin invariant.
    #[error("Structural violation: {}", .violations.join("; "))]
    StructuralViolation {
        /// Every violation found.
        violations: Vec<String>,
    },

    /// The calendar could not hold the season.
    #[error("Scheduling failed: {message}")]
    SchedulingFailed {
        /// What went wrong.
        message: String,
    },

    /// The schedule was generated but could not be stored.
    #[error("Failed to store generated schedule: {message}")]
    PersistenceFailed {
        /// The storage error.
        message: String,
        /// The generated result, with `success` false.
        response: Box<GenerateScheduleResponse>,
    },

    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },

    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the individual error messages for a response body.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::InvalidConfiguration { errors } => errors.clone(),
            Self::StructuralViolation { violations } => violations.clone(),
            Self::PersistenceFailed { message, .. } => vec![message.clone()],
            _ => vec![self.to_string()],
        }
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::InvalidConfiguration(errors) => ApiError::InvalidConfiguration {
            errors: errors.iter().map(ToString::to_string).collect(),
        },
        CoreError::StructuralViolation(violations) => ApiError::StructuralViolation { violations },
        CoreError::SchedulingFailure(domain_err) => ApiError::SchedulingFailed {
            message: domain_err.to_string(),
        },
        CoreError::PersistenceFailure { message, outcome } => {
            let response: GenerateScheduleResponse =
                GenerateScheduleResponse::unsaved(&outcome, &message);
            ApiError::PersistenceFailed {
                message,
                response: Box::new(response),
            }
        }
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::SeasonNotFound(season_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Season"),
            message: format!("Season {season_id} does not exist"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}
