// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::auth::AuthError;
use crate::passcode_policy::PasscodePolicyError;
use iil_kit::CoreError;
use iil_kit_domain::DomainError;
use iil_kit_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The roles permitted to perform this action.
        required_role: String,
    },
    /// A transition was given malformed or missing input.
    ValidationFailed {
        /// A human-readable description of the error.
        message: String,
    },
    /// A transition was attempted out of sequence.
    StateConflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Passcode policy violation.
    PasscodePolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::ValidationFailed { message } => write!(f, "Validation failed: {message}"),
            Self::StateConflict { message } => write!(f, "State conflict: {message}"),
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::PasscodePolicyViolation { message } => {
                write!(f, "Passcode policy violation: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasscodePolicyError> for ApiError {
    fn from(err: PasscodePolicyError) -> Self {
        Self::PasscodePolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a core transition error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Validation(inner) => ApiError::ValidationFailed {
            message: inner.to_string(),
        },
        CoreError::State(inner) => ApiError::StateConflict {
            message: inner.to_string(),
        },
    }
}

/// Translates a domain validation error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let rule: &str = match &err {
        DomainError::InvalidProjectCode(_) => "project-code",
        DomainError::InvalidShiftId(_) => "shift-id",
        DomainError::InvalidShiftName(_) => "shift-name",
        DomainError::DuplicateShiftId { .. } => "shift-id-unique",
        DomainError::DuplicateManualRequirementId { .. } => "manual-requirement-id-unique",
        DomainError::InvalidMaterialType(_) => "material-type",
        DomainError::InvalidItemStatus(_) => "item-status",
        DomainError::InvalidProjectStatus(_) => "project-status",
        DomainError::TimeParseError { .. } => "time-of-day",
    };

    ApiError::DomainRuleViolation {
        rule: String::from(rule),
        message: err.to_string(),
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ProjectNotFound(code) => ApiError::ResourceNotFound {
            resource_type: String::from("Project"),
            message: code,
        },
        PersistenceError::BatchNotFound(code) => ApiError::ResourceNotFound {
            resource_type: String::from("Return batch"),
            message: code,
        },
        PersistenceError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message: id.to_string(),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
