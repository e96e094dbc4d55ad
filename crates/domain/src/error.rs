// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Project code is empty or invalid.
    InvalidProjectCode(String),
    /// Shift identifier is empty or invalid.
    InvalidShiftId(String),
    /// Shift name is empty or invalid.
    InvalidShiftName(String),
    /// Shift identifier is not unique within the project.
    DuplicateShiftId {
        /// The duplicate shift identifier.
        shift_id: String,
    },
    /// Manual requirement identifier is not unique within the project.
    DuplicateManualRequirementId {
        /// The duplicate requirement identifier.
        requirement_id: String,
    },
    /// Material type is not part of the catalog.
    InvalidMaterialType(String),
    /// Item status string is not recognized.
    InvalidItemStatus(String),
    /// Project status string is not recognized.
    InvalidProjectStatus(String),
    /// Failed to parse a time-of-day from a string.
    TimeParseError {
        /// The invalid time string.
        value: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProjectCode(msg) => write!(f, "Invalid project code: {msg}"),
            Self::InvalidShiftId(msg) => write!(f, "Invalid shift id: {msg}"),
            Self::InvalidShiftName(msg) => write!(f, "Invalid shift name: {msg}"),
            Self::DuplicateShiftId { shift_id } => {
                write!(f, "Shift id '{shift_id}' already exists in this project")
            }
            Self::DuplicateManualRequirementId { requirement_id } => {
                write!(
                    f,
                    "Manual requirement id '{requirement_id}' already exists in this project"
                )
            }
            Self::InvalidMaterialType(value) => {
                write!(f, "Unknown material type: {value}")
            }
            Self::InvalidItemStatus(value) => write!(f, "Unknown item status: {value}"),
            Self::InvalidProjectStatus(value) => {
                write!(f, "Unknown project status: {value}")
            }
            Self::TimeParseError { value, error } => {
                write!(f, "Failed to parse time-of-day '{value}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
