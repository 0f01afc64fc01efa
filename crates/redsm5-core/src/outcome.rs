//! Tagged results for fallback-capable operations
//!
//! Generation, embedding and judging never fail from the caller's point of
//! view: on error they substitute a well-formed fallback value. [`Outcome`]
//! keeps the information that a substitution happened so aggregates can
//! report genuine and fallback values separately.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a fallback value was substituted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Connection, timeout or non-success HTTP status
    Transport,
    /// Endpoint answered but the answer carried no usable content
    Endpoint,
    /// Output did not parse into the expected structure
    Validation,
    /// Output was cut off before completion
    Truncated,
    /// Embedding endpoint returned no vector
    EmptyEmbedding,
    /// Anything else
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Transport => "transport",
            FailureKind::Endpoint => "endpoint",
            FailureKind::Validation => "validation",
            FailureKind::Truncated => "truncated",
            FailureKind::EmptyEmbedding => "empty_embedding",
            FailureKind::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Result of an operation that substitutes a fallback on failure
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The operation produced a genuine value
    Completed(T),
    /// The operation failed and `value` is the substituted fallback
    Fallback {
        value: T,
        kind: FailureKind,
        message: String,
    },
}

impl<T> Outcome<T> {
    /// Build a fallback outcome from an error
    pub fn fallback(value: T, error: &crate::error::Redsm5Error) -> Self {
        Self::Fallback {
            value,
            kind: error.failure_kind(),
            message: error.to_string(),
        }
    }

    /// Borrow the carried value, genuine or not
    pub fn value(&self) -> &T {
        match self {
            Self::Completed(value) => value,
            Self::Fallback { value, .. } => value,
        }
    }

    /// Take the carried value, genuine or not
    pub fn into_value(self) -> T {
        match self {
            Self::Completed(value) => value,
            Self::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Failure kind, if this is a fallback
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Completed(_) => None,
            Self::Fallback { kind, .. } => Some(*kind),
        }
    }

    /// Transform the carried value, keeping the tag
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Completed(value) => Outcome::Completed(f(value)),
            Self::Fallback {
                value,
                kind,
                message,
            } => Outcome::Fallback {
                value: f(value),
                kind,
                message,
            },
        }
    }
}
