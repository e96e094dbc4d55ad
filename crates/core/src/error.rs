// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::ReturnStep;

/// Malformed or missing input to a transition.
///
/// Validation errors are always recoverable and never leave partial
/// mutations behind: the rejected command simply did not happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required carrier field was empty.
    EmptyCarrierField {
        /// The offending field name.
        field: &'static str,
    },
    /// The referenced audit line-item does not exist.
    UnknownLineItem {
        /// The id that failed to resolve.
        line_item_id: String,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCarrierField { field } => {
                write!(f, "Carrier field '{field}' cannot be empty")
            }
            Self::UnknownLineItem { line_item_id } => {
                write!(f, "Unknown audit line-item: {line_item_id}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A transition attempted from the wrong step.
///
/// State errors are recoverable and never leave partial mutations behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The command does not apply to the batch's current step.
    OutOfSequence {
        /// The attempted action name.
        action: &'static str,
        /// The step the action requires.
        expected: ReturnStep,
        /// The step the batch is actually in.
        actual: ReturnStep,
    },
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfSequence {
                action,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "'{action}' requires step '{expected}', but batch is in step '{actual}'"
                )
            }
        }
    }
}

impl std::error::Error for StateError {}

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Malformed or missing input.
    Validation(ValidationError),
    /// Transition attempted out of sequence.
    State(StateError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "Validation error: {err}"),
            Self::State(err) => write!(f, "State error: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<StateError> for CoreError {
    fn from(err: StateError) -> Self {
        Self::State(err)
    }
}
