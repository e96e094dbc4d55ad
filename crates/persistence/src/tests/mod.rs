// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use iil_kit_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use iil_kit_domain::{MaterialCategory, Project, ShiftInventory};

pub fn create_test_project() -> Project {
    let mut project: Project = Project::new(
        String::from("p-1"),
        String::from("National Placement Exam"),
        String::from("Acme Assessments"),
        String::from("EX99"),
        String::from("pass-1234"),
        String::from("admin-1234"),
    );

    let mut shift: ShiftInventory =
        ShiftInventory::new(String::from("s-1"), String::from("Shift 1"));
    shift.set_enabled(MaterialCategory::GpsLocks, true);
    shift.set_quantity(MaterialCategory::GpsLocks, 100);
    shift.set_nomenclature(MaterialCategory::GpsLocks, "SmartLock v3");
    project.shifts.push(shift);

    project
}

pub fn create_test_event(project_code: &str, action_name: &str) -> AuditEvent {
    AuditEvent::new(
        Actor::new(String::from("WAREHOUSE_MGR"), String::from("warehouse")),
        Cause::new(String::from("req-1"), String::from("Test request")),
        Action::new(String::from(action_name), Some(String::from("details"))),
        StateSnapshot::new(String::from("before")),
        StateSnapshot::new(String::from("after")),
        String::from(project_code),
    )
}
