//! Failure and error types.
//!
//! Two layers exist:
//!
//! - [`Failure`] is the ordinary outcome of a conversion that cannot happen
//!   (wrong shape, out of range, fractional loss). Converters return it inside
//!   [`ConversionResult`]; they never panic for a domain mismatch.
//! - [`ConvertError`] is what escapes to callers that want a hard error:
//!   an escalated failure from `convert_or_fail`, a malformed composition, or
//!   an invalid context.
//!
//! Failure messages are part of the diagnostic contract. Combinators pass
//! their children's messages through unchanged.

use std::borrow::Cow;
use std::fmt;

use crate::foundation::{Shape, Value};

/// Result of a single conversion.
pub type ConversionResult<T = Value> = Result<T, Failure>;

// ============================================================================
// FAILURE
// ============================================================================

/// A conversion that could not be performed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Failure {
    message: Cow<'static, str>,
}

impl Failure {
    /// `Failed to convert {value} ({shape}) to {target}`.
    pub fn cannot_convert(value: &Value, target: &Shape) -> Self {
        Self {
            message: Cow::Owned(format!(
                "Failed to convert {value} ({}) to {target}",
                value.shape_name()
            )),
        }
    }

    /// Same as [`Failure::cannot_convert`], followed by `, {cause}`.
    pub fn with_cause(value: &Value, target: &Shape, cause: impl fmt::Display) -> Self {
        Self {
            message: Cow::Owned(format!(
                "Failed to convert {value} ({}) to {target}, {cause}",
                value.shape_name()
            )),
        }
    }

    /// A failure with a caller-chosen message.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

// ============================================================================
// CONVERT ERROR
// ============================================================================

/// Hard errors surfaced to callers.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// A conversion failure escalated by `convert_or_fail`.
    ///
    /// Displays the optional prefix followed by the unaltered failure message.
    #[error("{}{failure}", .prefix.as_deref().unwrap_or_default())]
    Failed {
        prefix: Option<String>,
        #[source]
        failure: Failure,
    },

    /// A combinator was built without any candidate converters.
    #[error("{combinator} requires at least one converter")]
    EmptyCandidates { combinator: &'static str },

    /// A conversion context failed validation.
    #[error("invalid conversion context: {reason}")]
    InvalidContext { reason: String },

    /// A conversion context document could not be parsed.
    #[error("invalid conversion context document: {0}")]
    Config(#[from] serde_json::Error),
}

impl ConvertError {
    /// Escalates a failure without a prefix.
    pub fn failed(failure: Failure) -> Self {
        Self::Failed {
            prefix: None,
            failure,
        }
    }

    /// Escalates a failure with a caller-supplied prefix.
    pub fn failed_with_prefix(prefix: impl Into<String>, failure: Failure) -> Self {
        Self::Failed {
            prefix: Some(prefix.into()),
            failure,
        }
    }

    /// The underlying failure, if this error is an escalated one.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

impl From<Failure> for ConvertError {
    fn from(failure: Failure) -> Self {
        Self::failed(failure)
    }
}
