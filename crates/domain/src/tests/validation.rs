// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, GenericMaterialType, ManualRequirement, Project, ShiftInventory,
    validate_project, validate_shift_fields,
};

fn make_project() -> Project {
    Project::new(
        String::from("p-1"),
        String::from("National Placement Exam"),
        String::from("Acme Assessments"),
        String::from("EX99"),
        String::from("pass-1234"),
        String::from("admin-1234"),
    )
}

#[test]
fn test_empty_project_is_valid() {
    assert!(validate_project(&make_project()).is_ok());
}

#[test]
fn test_empty_project_code_is_rejected() {
    let mut project: Project = make_project();
    project.code = String::new();

    let result: Result<(), DomainError> = validate_project(&project);
    assert!(matches!(result, Err(DomainError::InvalidProjectCode(_))));
}

#[test]
fn test_shift_with_empty_id_is_rejected() {
    let shift: ShiftInventory = ShiftInventory::new(String::new(), String::from("Shift 1"));

    let result: Result<(), DomainError> = validate_shift_fields(&shift);
    assert!(matches!(result, Err(DomainError::InvalidShiftId(_))));
}

#[test]
fn test_shift_with_empty_name_is_rejected() {
    let shift: ShiftInventory = ShiftInventory::new(String::from("s-1"), String::new());

    let result: Result<(), DomainError> = validate_shift_fields(&shift);
    assert!(matches!(result, Err(DomainError::InvalidShiftName(_))));
}

#[test]
fn test_duplicate_shift_ids_are_rejected() {
    let mut project: Project = make_project();
    project
        .shifts
        .push(ShiftInventory::new(String::from("s-1"), String::from("Morning")));
    project
        .shifts
        .push(ShiftInventory::new(String::from("s-1"), String::from("Evening")));

    let result: Result<(), DomainError> = validate_project(&project);
    assert_eq!(
        result,
        Err(DomainError::DuplicateShiftId {
            shift_id: String::from("s-1"),
        })
    );
}

#[test]
fn test_duplicate_manual_requirement_ids_are_rejected() {
    let mut project: Project = make_project();
    project
        .manual_requirements
        .push(ManualRequirement::gps_lock(
            String::from("m-1"),
            String::from("SmartLock v3"),
        ));
    project.manual_requirements.push(ManualRequirement::generic(
        String::from("m-1"),
        GenericMaterialType::Trunks,
        String::from("Steel Trunk"),
        2,
    ));

    let result: Result<(), DomainError> = validate_project(&project);
    assert_eq!(
        result,
        Err(DomainError::DuplicateManualRequirementId {
            requirement_id: String::from("m-1"),
        })
    );
}

#[test]
fn test_distinct_ids_pass_validation() {
    let mut project: Project = make_project();
    project
        .shifts
        .push(ShiftInventory::new(String::from("s-1"), String::from("Morning")));
    project
        .shifts
        .push(ShiftInventory::new(String::from("s-2"), String::from("Evening")));
    project
        .manual_requirements
        .push(ManualRequirement::gps_lock(
            String::from("m-1"),
            String::from("SmartLock v3"),
        ));
    project.manual_requirements.push(ManualRequirement::generic(
        String::from("m-2"),
        GenericMaterialType::Cables,
        String::from("HDMI bundle"),
        4,
    ));

    assert!(validate_project(&project).is_ok());
}
