// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::auth::{AuthenticatedActor, Role};
use crate::handlers::create_project;
use crate::request_response::{CreateProjectRequest, ManualRequirementDto, SaveRequirementsRequest, ShiftDto};
use iil_kit_audit::Cause;
use iil_kit_domain::{GpsLockCounts, MaterialRequirement};
use iil_kit_persistence::SqlitePersistence;

pub fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("ADMIN_ROOT"), Role::Admin)
}

pub fn ops() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("OPS-7"), Role::Ops)
}

pub fn client() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("CL-01"), Role::Client)
}

pub fn warehouse() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("WAREHOUSE_MGR"), Role::Warehouse)
}

pub fn cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test request"))
}

pub fn create_project_request() -> CreateProjectRequest {
    CreateProjectRequest {
        name: String::from("National Placement Exam"),
        client: String::from("Acme Assessments"),
        code: String::from("EX99"),
        project_passcode: String::from("pass-1234"),
        admin_passcode: String::from("admin-1234"),
    }
}

/// A persistence layer with the standard test project already registered.
pub fn persistence_with_project() -> SqlitePersistence {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();
    create_project(&mut persistence, &admin(), cause(), create_project_request()).unwrap();
    persistence
}

fn enabled(quantity: u32, nomenclature: &str) -> MaterialRequirement {
    MaterialRequirement::enabled(quantity, String::from(nomenclature))
}

pub fn shift_dto(id: &str, name: &str) -> ShiftDto {
    ShiftDto {
        id: String::from(id),
        shift_name: String::from(name),
        start_time: String::from("09:00"),
        end_time: String::from("12:00"),
        gps_locks: enabled(100, "SmartLock v3"),
        chargers: enabled(20, "Rapid-C 40W"),
        adaptors: MaterialRequirement::disabled(),
        rfid_master: MaterialRequirement::disabled(),
        rfid_unique: MaterialRequirement::disabled(),
    }
}

pub fn gps_manual_dto(id: &str) -> ManualRequirementDto {
    ManualRequirementDto {
        id: String::from(id),
        material_type: String::from("GPS Lock"),
        nomenclature: String::from("SmartLock v3"),
        quantity: 0,
        sub_counts: Some(GpsLockCounts::new(10, 5, 3, 3)),
    }
}

pub fn save_requirements_request() -> SaveRequirementsRequest {
    SaveRequirementsRequest {
        project_code: String::from("EX99"),
        exam_date: String::from("2026-11-15"),
        shifts: vec![shift_dto("s-1", "Shift 1")],
        manual_requirements: vec![gps_manual_dto("m-1")],
        requirement_documents: vec![String::from("requirements.pdf")],
    }
}
