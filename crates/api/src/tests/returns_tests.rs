// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers::{
    assign_carrier, create_return_batch, get_audit_timeline, initiate_return,
    list_return_batches, save_requirements, verify_return,
};
use crate::request_response::{
    AssignCarrierRequest, InitiateReturnRequest, ReturnBatchInfo, VerifyReturnRequest,
};
use crate::tests::helpers::{
    cause, client, ops, persistence_with_project, save_requirements_request, warehouse,
};
use iil_kit_domain::CountTriad;
use iil_kit_persistence::SqlitePersistence;

fn persistence_with_batch() -> SqlitePersistence {
    let mut persistence: SqlitePersistence = persistence_with_project();
    save_requirements(&mut persistence, &ops(), cause(), save_requirements_request()).unwrap();
    create_return_batch(&mut persistence, &client(), cause(), "EX99").unwrap();
    persistence
}

#[test]
fn test_create_return_batch_seeds_expected_counts() {
    let mut persistence: SqlitePersistence = persistence_with_batch();

    let batches: Vec<ReturnBatchInfo> = list_return_batches(&mut persistence, "EX99").unwrap();

    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].id, "RET-EX99-BULK");
    assert_eq!(batches[0].source_hub, "Acme Assessments Regional Hub");
    assert_eq!(batches[0].expected_counts, CountTriad::new(110, 23, 3, 5));
    assert_eq!(batches[0].step, "initiation");
    assert_eq!(batches[0].status, "Pending");
}

#[test]
fn test_create_return_batch_rejects_duplicates() {
    let mut persistence: SqlitePersistence = persistence_with_batch();

    let result = create_return_batch(&mut persistence, &client(), cause(), "EX99");

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_full_return_flow_completed() {
    let mut persistence: SqlitePersistence = persistence_with_batch();

    let initiated = initiate_return(
        &mut persistence,
        &client(),
        cause(),
        InitiateReturnRequest {
            batch_id: String::from("RET-EX99-BULK"),
            counts: CountTriad::new(110, 23, 3, 5),
        },
    )
    .unwrap();
    assert_eq!(initiated.response.step, "pickup");

    let in_transit = assign_carrier(
        &mut persistence,
        &warehouse(),
        cause(),
        AssignCarrierRequest {
            batch_id: String::from("RET-EX99-BULK"),
            partner: String::from("IIL FLEET"),
            tracking_id: String::from("TRK-55012"),
            vehicle_no: String::from("REG-07-4821"),
        },
    )
    .unwrap();
    assert_eq!(in_transit.response.step, "transit");
    assert_eq!(in_transit.response.status, "In Progress");

    let verified = verify_return(
        &mut persistence,
        &warehouse(),
        cause(),
        VerifyReturnRequest {
            batch_id: String::from("RET-EX99-BULK"),
            counts: CountTriad::new(110, 23, 3, 5),
        },
    )
    .unwrap();
    assert_eq!(verified.response.step, "verification");
    assert_eq!(verified.response.status, "Completed");
}

#[test]
fn test_return_flow_mismatch_on_deviating_counts() {
    let mut persistence: SqlitePersistence = persistence_with_batch();

    initiate_return(
        &mut persistence,
        &client(),
        cause(),
        InitiateReturnRequest {
            batch_id: String::from("RET-EX99-BULK"),
            counts: CountTriad::new(110, 23, 3, 5),
        },
    )
    .unwrap();
    assign_carrier(
        &mut persistence,
        &warehouse(),
        cause(),
        AssignCarrierRequest {
            batch_id: String::from("RET-EX99-BULK"),
            partner: String::from("IIL FLEET"),
            tracking_id: String::from("TRK-55012"),
            vehicle_no: String::from("REG-07-4821"),
        },
    )
    .unwrap();

    let verified = verify_return(
        &mut persistence,
        &warehouse(),
        cause(),
        VerifyReturnRequest {
            batch_id: String::from("RET-EX99-BULK"),
            counts: CountTriad::new(100, 23, 3, 5),
        },
    )
    .unwrap();

    assert_eq!(verified.response.status, "Mismatch");
}

#[test]
fn test_out_of_sequence_transition_is_a_state_conflict() {
    let mut persistence: SqlitePersistence = persistence_with_batch();

    let result = verify_return(
        &mut persistence,
        &warehouse(),
        cause(),
        VerifyReturnRequest {
            batch_id: String::from("RET-EX99-BULK"),
            counts: CountTriad::ZERO,
        },
    );

    assert!(matches!(result, Err(ApiError::StateConflict { .. })));
}

#[test]
fn test_empty_carrier_field_is_a_validation_failure() {
    let mut persistence: SqlitePersistence = persistence_with_batch();

    initiate_return(
        &mut persistence,
        &client(),
        cause(),
        InitiateReturnRequest {
            batch_id: String::from("RET-EX99-BULK"),
            counts: CountTriad::new(110, 23, 3, 5),
        },
    )
    .unwrap();

    let result = assign_carrier(
        &mut persistence,
        &warehouse(),
        cause(),
        AssignCarrierRequest {
            batch_id: String::from("RET-EX99-BULK"),
            partner: String::new(),
            tracking_id: String::from("TRK-55012"),
            vehicle_no: String::from("REG-07-4821"),
        },
    );

    assert!(matches!(result, Err(ApiError::ValidationFailed { .. })));
}

#[test]
fn test_unknown_batch_is_not_found() {
    let mut persistence: SqlitePersistence = persistence_with_batch();

    let result = initiate_return(
        &mut persistence,
        &client(),
        cause(),
        InitiateReturnRequest {
            batch_id: String::from("RET-NOPE-BULK"),
            counts: CountTriad::ZERO,
        },
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_audit_timeline_records_every_transition() {
    let mut persistence: SqlitePersistence = persistence_with_batch();

    initiate_return(
        &mut persistence,
        &client(),
        cause(),
        InitiateReturnRequest {
            batch_id: String::from("RET-EX99-BULK"),
            counts: CountTriad::new(110, 23, 3, 5),
        },
    )
    .unwrap();

    let timeline = get_audit_timeline(&mut persistence, "EX99").unwrap();
    let actions: Vec<&str> = timeline
        .iter()
        .map(|event| event.action.as_str())
        .collect();

    assert_eq!(
        actions,
        vec!["SaveRequirements", "CreateReturnBatch", "InitiateReturn"]
    );
}
