//! Error taxonomy for service handlers.
//!
//! Every failure a service method can report is a variant of [`ServiceError`],
//! so the dispatch adapter classifies outcomes with a single match instead of
//! downcasting. Absence is not an error: handlers signal it by returning
//! `Ok(None)` (see [`crate::dispatch::ServiceResult`]).

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// A single field-level validation failure.
///
/// Serializes as `{"code": ..., "field": ..., "title": ...}`, the shape the
/// 400 response body carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Stable machine-readable code, `<field>_<rule>`.
    pub code: String,
    /// Name of the offending field.
    pub field: String,
    /// Human-readable description.
    pub title: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// One or more validation failures, reported together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationFailures(pub Vec<ValidationError>);

impl ValidationFailures {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ValidationFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let titles: Vec<&str> = self.0.iter().map(|e| e.title.as_str()).collect();
        f.write_str(&titles.join(", "))
    }
}

impl From<Vec<ValidationError>> for ValidationFailures {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

/// Classified failure of a service method.
///
/// The dispatch adapter maps each variant to a status code: `Validation` to
/// 400, `Timeout` and `Unavailable` to 503, `Internal` to 500.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed one or more declared field rules.
    #[error("{0}")]
    Validation(ValidationFailures),
    /// The deadline elapsed before the unit of work completed.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    /// A declared dependency is not ready to serve.
    #[error("{0}")]
    Unavailable(String),
    /// Anything else; always reported to the crash collaborator.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationFailures> for ServiceError {
    fn from(failures: ValidationFailures) -> Self {
        Self::Validation(failures)
    }
}
