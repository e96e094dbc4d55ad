// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use iil_kit_audit::{Actor, Cause};
use iil_kit_domain::{MaterialCategory, Project, ShiftInventory};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("CL-01"), String::from("client"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Operator request"))
}

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
    shift.set_enabled(MaterialCategory::Chargers, true);
    shift.set_quantity(MaterialCategory::Chargers, 20);
    shift.set_nomenclature(MaterialCategory::Chargers, "Rapid-C 40W");
    project.shifts.push(shift);

    project
}
