// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::manual::ManualRequirement;
use crate::types::{Project, ShiftInventory};
use std::collections::HashSet;

/// Validates that a shift's basic field constraints are met.
///
/// # Arguments
///
/// * `shift` - The shift to validate
///
/// # Errors
///
/// Returns an error if:
/// - The shift id is empty
/// - The shift name is empty
pub fn validate_shift_fields(shift: &ShiftInventory) -> Result<(), DomainError> {
    if shift.id.is_empty() {
        return Err(DomainError::InvalidShiftId(String::from(
            "Shift id cannot be empty",
        )));
    }

    if shift.shift_name.is_empty() {
        return Err(DomainError::InvalidShiftName(String::from(
            "Shift name cannot be empty",
        )));
    }

    Ok(())
}

/// Validates a project's structural invariants.
///
/// This function is pure, deterministic, and has no side effects. It checks:
/// - the project code is non-empty
/// - each shift has valid fields
/// - shift ids are unique within the project
/// - manual requirement ids are unique within the project
///
/// Line-item ids are derived from shift and requirement ids, so uniqueness
/// here is what makes derived ids stable and collision-free.
///
/// # Arguments
///
/// * `project` - The project to validate
///
/// # Errors
///
/// Returns the first violated constraint as a `DomainError`.
pub fn validate_project(project: &Project) -> Result<(), DomainError> {
    if project.code.is_empty() {
        return Err(DomainError::InvalidProjectCode(String::from(
            "Project code cannot be empty",
        )));
    }

    let mut shift_ids: HashSet<&str> = HashSet::new();
    for shift in &project.shifts {
        validate_shift_fields(shift)?;

        if !shift_ids.insert(shift.id.as_str()) {
            return Err(DomainError::DuplicateShiftId {
                shift_id: shift.id.clone(),
            });
        }
    }

    let mut requirement_ids: HashSet<&str> = HashSet::new();
    for requirement in &project.manual_requirements {
        if !requirement_ids.insert(requirement.id()) {
            return Err(DomainError::DuplicateManualRequirementId {
                requirement_id: requirement.id().to_string(),
            });
        }
    }

    Ok(())
}
