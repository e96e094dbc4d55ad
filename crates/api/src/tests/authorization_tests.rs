// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::auth::Role;
use crate::capabilities::Capability;
use crate::error::ApiError;
use crate::handlers::{
    create_project, create_return_batch, list_line_items, record_line_item_receipt,
    save_requirements,
};
use crate::request_response::RecordReceiptRequest;
use crate::tests::helpers::{
    cause, client, create_project_request, ops, persistence_with_project,
    save_requirements_request, warehouse,
};
use iil_kit_persistence::SqlitePersistence;

#[test]
fn test_capability_matrix() {
    // ManageProjects: Admin only.
    assert!(Role::Admin.has_capability(Capability::ManageProjects));
    assert!(!Role::Ops.has_capability(Capability::ManageProjects));
    assert!(!Role::Client.has_capability(Capability::ManageProjects));
    assert!(!Role::Warehouse.has_capability(Capability::ManageProjects));

    // EditRequirements / UploadMasterData: Admin and Ops.
    for capability in [Capability::EditRequirements, Capability::UploadMasterData] {
        assert!(Role::Admin.has_capability(capability));
        assert!(Role::Ops.has_capability(capability));
        assert!(!Role::Client.has_capability(capability));
        assert!(!Role::Warehouse.has_capability(capability));
    }

    // RecordReceipts: Admin and Warehouse.
    assert!(Role::Admin.has_capability(Capability::RecordReceipts));
    assert!(Role::Warehouse.has_capability(Capability::RecordReceipts));
    assert!(!Role::Ops.has_capability(Capability::RecordReceipts));
    assert!(!Role::Client.has_capability(Capability::RecordReceipts));

    // InitiateReturn: Admin and Client.
    assert!(Role::Admin.has_capability(Capability::InitiateReturn));
    assert!(Role::Client.has_capability(Capability::InitiateReturn));
    assert!(!Role::Ops.has_capability(Capability::InitiateReturn));
    assert!(!Role::Warehouse.has_capability(Capability::InitiateReturn));

    // Logistics verification: Admin, Ops and Warehouse.
    for capability in [
        Capability::ViewWarehouse,
        Capability::AssignCarrier,
        Capability::VerifyReturn,
    ] {
        assert!(Role::Admin.has_capability(capability));
        assert!(Role::Ops.has_capability(capability));
        assert!(Role::Warehouse.has_capability(capability));
        assert!(!Role::Client.has_capability(capability));
    }
}

#[test]
fn test_non_admin_cannot_create_projects() {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();

    let result = create_project(&mut persistence, &ops(), cause(), create_project_request());

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_warehouse_cannot_edit_requirements() {
    let mut persistence: SqlitePersistence = persistence_with_project();

    let result = save_requirements(
        &mut persistence,
        &warehouse(),
        cause(),
        save_requirements_request(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_ops_can_edit_requirements() {
    let mut persistence: SqlitePersistence = persistence_with_project();

    let result = save_requirements(
        &mut persistence,
        &ops(),
        cause(),
        save_requirements_request(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_client_cannot_view_warehouse_or_record_receipts() {
    let mut persistence: SqlitePersistence = persistence_with_project();
    save_requirements(&mut persistence, &ops(), cause(), save_requirements_request()).unwrap();

    let view = list_line_items(&mut persistence, &client(), "EX99");
    assert!(matches!(view, Err(ApiError::Unauthorized { .. })));

    let record = record_line_item_receipt(
        &mut persistence,
        &client(),
        cause(),
        RecordReceiptRequest {
            project_code: String::from("EX99"),
            line_item_id: String::from("s-1-gps"),
            received: 1,
            context: None,
        },
    );
    assert!(matches!(record, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_ops_cannot_record_receipts() {
    let mut persistence: SqlitePersistence = persistence_with_project();
    save_requirements(&mut persistence, &ops(), cause(), save_requirements_request()).unwrap();

    let result = record_line_item_receipt(
        &mut persistence,
        &ops(),
        cause(),
        RecordReceiptRequest {
            project_code: String::from("EX99"),
            line_item_id: String::from("s-1-gps"),
            received: 1,
            context: None,
        },
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_warehouse_cannot_initiate_returns() {
    let mut persistence: SqlitePersistence = persistence_with_project();
    save_requirements(&mut persistence, &ops(), cause(), save_requirements_request()).unwrap();

    let result = create_return_batch(&mut persistence, &warehouse(), cause(), "EX99");

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_client_can_initiate_returns() {
    let mut persistence: SqlitePersistence = persistence_with_project();
    save_requirements(&mut persistence, &ops(), cause(), save_requirements_request()).unwrap();

    let result = create_return_batch(&mut persistence, &client(), cause(), "EX99");

    assert!(result.is_ok());
}

#[test]
fn test_role_parse_round_trip() {
    for role in [Role::Admin, Role::Ops, Role::Client, Role::Warehouse] {
        assert_eq!(Role::parse(role.as_str()).unwrap(), role);
    }
    assert!(Role::parse("Supervisor").is_err());
}
