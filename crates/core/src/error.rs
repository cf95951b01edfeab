// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::report::GenerationOutcome;
use matchday_domain::DomainError;

/// Errors that can occur while generating a season.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The configuration is structurally unusable. Nothing was generated.
    InvalidConfiguration(Vec<DomainError>),
    /// Generated pairings broke a round-robin invariant.
    StructuralViolation(Vec<String>),
    /// The scheduler could not place every fixture.
    SchedulingFailure(DomainError),
    /// The schedule was generated but could not be stored.
    ///
    /// The generated result is carried so the caller can retry.
    PersistenceFailure {
        /// The store's error message.
        message: String,
        /// The generated, unsaved result.
        outcome: Box<GenerationOutcome>,
    },
}

impl CoreError {
    /// Returns every individual error message.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::InvalidConfiguration(errors) => errors.iter().map(ToString::to_string).collect(),
            Self::StructuralViolation(violations) => violations.clone(),
            Self::SchedulingFailure(err) => vec![err.to_string()],
            Self::PersistenceFailure { message, .. } => vec![message.clone()],
        }
    }

    /// Returns the generated result when generation itself succeeded.
    #[must_use]
    pub fn outcome(&self) -> Option<&GenerationOutcome> {
        match self {
            Self::PersistenceFailure { outcome, .. } => Some(outcome.as_ref()),
            _ => None,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfiguration(errors) => {
                write!(f, "Invalid configuration: {}", join(errors))
            }
            Self::StructuralViolation(violations) => {
                write!(f, "Structural violation: {}", violations.join("; "))
            }
            Self::SchedulingFailure(err) => write!(f, "Scheduling failed: {err}"),
            Self::PersistenceFailure { message, .. } => {
                write!(f, "Failed to store generated schedule: {message}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        if err.is_configuration_error() {
            Self::InvalidConfiguration(vec![err])
        } else {
            Self::SchedulingFailure(err)
        }
    }
}

fn join(errors: &[DomainError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join("; ")
}
