//! Error types for the discretization engine.
//!
//! Only structurally invalid calls surface as `Err`. Everything else degrades
//! into a pass-through result whose status carries one of these variants so
//! callers can still tell the causes apart.

use serde::Serialize;

/// Errors and degraded outcomes of a discretization call.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscretizeError {
    /// The call itself is malformed (empty attribute name, bad parameters).
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    /// The attribute cannot be discretized (unknown, non-numeric, or no
    /// coercible values).
    #[error("Attribute '{attribute}' is not discretizable: {reason}")]
    AttributeNotDiscretizable {
        /// Name of the attribute.
        attribute: String,
        /// Why it was skipped.
        reason: String,
    },

    /// A pipeline step failed; remaining steps were abandoned.
    #[error("Step '{step}' failed: {message}")]
    StepExecutionFailure {
        /// Name of the failing step.
        step: String,
        /// Rendered error chain of the failure.
        message: String,
    },

    /// A parameter could not be parsed or has an invalid value.
    #[error("Invalid parameter '{key}': {message}")]
    InvalidParameter {
        /// Parameter key.
        key: String,
        /// Description of the problem.
        message: String,
    },
}

impl DiscretizeError {
    /// Shorthand for [`DiscretizeError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Shorthand for [`DiscretizeError::AttributeNotDiscretizable`].
    pub fn not_discretizable(attribute: &str, reason: impl Into<String>) -> Self {
        Self::AttributeNotDiscretizable {
            attribute: attribute.to_string(),
            reason: reason.into(),
        }
    }
}
