//! Explicit success-or-failure result shape for the orchestration boundary.
//!
//! Services in this crate return typed `Result` values. Callers that need a
//! uniform, serialisable shape (editor commands, JSON bridges) convert those
//! results into [`Errorable`], which carries either the successful value or a
//! human-readable failure reason and never both.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Outcome of a fallible query that does not raise across the boundary.
///
/// # Examples
///
///     use draftkit::errorable::Errorable;
///
///     let ok: Errorable<u8> = Ok::<u8, std::io::Error>(3).into();
///     assert_eq!(ok.result(), Some(&3));
///
///     let failed: Errorable<u8> = Errorable::failed("tool not installed");
///     assert_eq!(failed.reason(), Some("tool not installed"));
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Errorable<T> {
    /// The operation produced a value.
    Succeeded {
        /// The produced value.
        result: T,
    },
    /// The operation failed.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

impl<T> Errorable<T> {
    /// Wraps a successful value.
    #[must_use]
    pub const fn succeeded(result: T) -> Self {
        Self::Succeeded { result }
    }

    /// Builds a failure with the given reason.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// Returns `true` for the [`Errorable::Succeeded`] variant.
    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Returns `true` for the [`Errorable::Failed`] variant.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        !self.is_succeeded()
    }

    /// Returns the successful value, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&T> {
        match self {
            Self::Succeeded { result } => Some(result),
            Self::Failed { .. } => None,
        }
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Succeeded { .. } => None,
            Self::Failed { reason } => Some(reason),
        }
    }

    /// Maps the successful value, leaving failures untouched.
    #[must_use]
    pub fn map<U>(self, op: impl FnOnce(T) -> U) -> Errorable<U> {
        match self {
            Self::Succeeded { result } => Errorable::Succeeded { result: op(result) },
            Self::Failed { reason } => Errorable::Failed { reason },
        }
    }

    /// Converts back into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`FailedReason`] carrying the reason of a failed outcome.
    pub fn into_result(self) -> Result<T, FailedReason> {
        match self {
            Self::Succeeded { result } => Ok(result),
            Self::Failed { reason } => Err(FailedReason(reason)),
        }
    }
}

impl<T, E> From<Result<T, E>> for Errorable<T>
where
    E: fmt::Display,
{
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(result) => Self::Succeeded { result },
            Err(err) => Self::Failed {
                reason: err.to_string(),
            },
        }
    }
}

/// Failure reason extracted from an [`Errorable::Failed`] outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct FailedReason(pub String);
