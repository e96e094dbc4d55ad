// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_actor, create_test_cause, create_test_project};
use crate::{
    BatchCommand, BatchTransition, CARRIER_PLACEHOLDER, CoreError, ReturnBatch, ReturnStep,
    StateError, ValidationError, apply_batch,
};
use iil_kit_domain::{CountTriad, ItemStatus};

fn create_test_batch() -> ReturnBatch {
    ReturnBatch::bulk_for_project(&create_test_project())
}

fn initiated_batch() -> ReturnBatch {
    apply_batch(
        &create_test_batch(),
        BatchCommand::InitiateReturn {
            counts: CountTriad::new(100, 20, 0, 0),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .new_batch
}

fn in_transit_batch() -> ReturnBatch {
    apply_batch(
        &initiated_batch(),
        BatchCommand::AssignCarrier {
            partner: String::from("IIL FLEET"),
            tracking_id: String::from("TRK-55012"),
            vehicle_no: String::from("REG-07-4821"),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .new_batch
}

#[test]
fn test_bulk_batch_is_seeded_from_project_totals() {
    let batch: ReturnBatch = create_test_batch();

    assert_eq!(batch.id, "RET-EX99-BULK");
    assert_eq!(batch.project_code, "EX99");
    assert_eq!(batch.source_hub, "Acme Assessments Regional Hub");
    assert_eq!(batch.dispatch_address, "Main Operations Gate, HQ Building");
    assert_eq!(batch.tracking_id, CARRIER_PLACEHOLDER);
    assert_eq!(batch.logistics_partner, CARRIER_PLACEHOLDER);
    assert_eq!(batch.vehicle_no, CARRIER_PLACEHOLDER);
    assert_eq!(batch.expected_counts, CountTriad::new(100, 20, 0, 0));
    assert_eq!(batch.initiated_counts, CountTriad::ZERO);
    assert_eq!(batch.received_counts, CountTriad::ZERO);
    assert_eq!(batch.status, ItemStatus::Pending);
    assert_eq!(batch.step, ReturnStep::Initiation);
}

#[test]
fn test_initiate_moves_batch_to_pickup() {
    let batch: ReturnBatch = create_test_batch();
    let counts: CountTriad = CountTriad::new(100, 20, 0, 0);

    let transition: BatchTransition = apply_batch(
        &batch,
        BatchCommand::InitiateReturn { counts },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(transition.new_batch.step, ReturnStep::Pickup);
    assert_eq!(transition.new_batch.status, ItemStatus::Pending);
    assert_eq!(transition.new_batch.initiated_counts, counts);
    assert_eq!(transition.audit_event.action.name, "InitiateReturn");
    assert_eq!(
        transition.audit_event.project_code,
        Some(String::from("EX99"))
    );
}

#[test]
fn test_initiate_does_not_mutate_the_input_batch() {
    let batch: ReturnBatch = create_test_batch();
    let snapshot: ReturnBatch = batch.clone();

    let _transition: BatchTransition = apply_batch(
        &batch,
        BatchCommand::InitiateReturn {
            counts: CountTriad::new(1, 2, 3, 4),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(batch, snapshot);
}

#[test]
fn test_assign_carrier_moves_batch_to_transit() {
    let batch: ReturnBatch = initiated_batch();

    let transition: BatchTransition = apply_batch(
        &batch,
        BatchCommand::AssignCarrier {
            partner: String::from("IIL FLEET"),
            tracking_id: String::from("TRK-55012"),
            vehicle_no: String::from("REG-07-4821"),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(transition.new_batch.step, ReturnStep::Transit);
    assert_eq!(transition.new_batch.status, ItemStatus::InProgress);
    assert_eq!(transition.new_batch.logistics_partner, "IIL FLEET");
    assert_eq!(transition.new_batch.tracking_id, "TRK-55012");
    assert_eq!(transition.new_batch.vehicle_no, "REG-07-4821");
    assert_eq!(transition.audit_event.action.name, "AssignCarrier");
}

#[test]
fn test_assign_carrier_rejects_empty_fields() {
    let batch: ReturnBatch = initiated_batch();

    for (partner, tracking_id, vehicle_no, field) in [
        ("", "TRK-1", "REG-1", "logistics_partner"),
        ("IIL FLEET", "", "REG-1", "tracking_id"),
        ("IIL FLEET", "TRK-1", "", "vehicle_no"),
    ] {
        let result: Result<BatchTransition, CoreError> = apply_batch(
            &batch,
            BatchCommand::AssignCarrier {
                partner: String::from(partner),
                tracking_id: String::from(tracking_id),
                vehicle_no: String::from(vehicle_no),
            },
            create_test_actor(),
            create_test_cause(),
        );

        assert_eq!(
            result,
            Err(CoreError::Validation(ValidationError::EmptyCarrierField {
                field,
            }))
        );
    }
}

#[test]
fn test_verify_with_matching_counts_completes_the_batch() {
    let batch: ReturnBatch = in_transit_batch();

    let transition: BatchTransition = apply_batch(
        &batch,
        BatchCommand::VerifyReturn {
            counts: CountTriad::new(100, 20, 0, 0),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(transition.new_batch.step, ReturnStep::Verification);
    assert_eq!(transition.new_batch.status, ItemStatus::Completed);
    assert_eq!(
        transition.new_batch.received_counts,
        CountTriad::new(100, 20, 0, 0)
    );
}

#[test]
fn test_verify_with_any_deviation_is_a_mismatch() {
    for counts in [
        CountTriad::new(90, 20, 0, 0),
        CountTriad::new(101, 20, 0, 0),
        CountTriad::new(100, 19, 0, 0),
        CountTriad::new(100, 20, 1, 0),
        CountTriad::new(100, 20, 0, 1),
    ] {
        let transition: BatchTransition = apply_batch(
            &in_transit_batch(),
            BatchCommand::VerifyReturn { counts },
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

        assert_eq!(transition.new_batch.status, ItemStatus::Mismatch);
        assert_eq!(transition.new_batch.step, ReturnStep::Verification);
    }
}

#[test]
fn test_verify_compares_against_initiated_not_expected() {
    // Initiate with counts that deviate from the project expectation.
    let batch: ReturnBatch = create_test_batch();
    let initiated: ReturnBatch = apply_batch(
        &batch,
        BatchCommand::InitiateReturn {
            counts: CountTriad::new(90, 18, 0, 0),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .new_batch;
    let in_transit: ReturnBatch = apply_batch(
        &initiated,
        BatchCommand::AssignCarrier {
            partner: String::from("IIL FLEET"),
            tracking_id: String::from("TRK-55012"),
            vehicle_no: String::from("REG-07-4821"),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .new_batch;

    // Matching the initiated counts completes the batch even though they
    // differ from expected_counts.
    let transition: BatchTransition = apply_batch(
        &in_transit,
        BatchCommand::VerifyReturn {
            counts: CountTriad::new(90, 18, 0, 0),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(transition.new_batch.status, ItemStatus::Completed);
}

#[test]
fn test_out_of_sequence_commands_fail_with_state_error() {
    let batch: ReturnBatch = create_test_batch();

    let result: Result<BatchTransition, CoreError> = apply_batch(
        &batch,
        BatchCommand::VerifyReturn {
            counts: CountTriad::ZERO,
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(CoreError::State(StateError::OutOfSequence {
            action: "VerifyReturn",
            expected: ReturnStep::Transit,
            actual: ReturnStep::Initiation,
        }))
    );
}

#[test]
fn test_rejected_command_leaves_batch_unmodified() {
    let batch: ReturnBatch = create_test_batch();
    let snapshot: ReturnBatch = batch.clone();

    let _result: Result<BatchTransition, CoreError> = apply_batch(
        &batch,
        BatchCommand::AssignCarrier {
            partner: String::from("IIL FLEET"),
            tracking_id: String::from("TRK-55012"),
            vehicle_no: String::from("REG-07-4821"),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(batch, snapshot);
}

#[test]
fn test_terminal_batch_rejects_every_command() {
    let verified: ReturnBatch = apply_batch(
        &in_transit_batch(),
        BatchCommand::VerifyReturn {
            counts: CountTriad::new(100, 20, 0, 0),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .new_batch;

    assert!(verified.step.is_terminal());

    for command in [
        BatchCommand::InitiateReturn {
            counts: CountTriad::ZERO,
        },
        BatchCommand::AssignCarrier {
            partner: String::from("IIL FLEET"),
            tracking_id: String::from("TRK-2"),
            vehicle_no: String::from("REG-2"),
        },
        BatchCommand::VerifyReturn {
            counts: CountTriad::ZERO,
        },
    ] {
        let result: Result<BatchTransition, CoreError> = apply_batch(
            &verified,
            command,
            create_test_actor(),
            create_test_cause(),
        );
        assert!(matches!(result, Err(CoreError::State(_))));
    }
}

#[test]
fn test_full_lifecycle_happy_path() {
    let batch: ReturnBatch = create_test_batch();
    assert_eq!(batch.step, ReturnStep::Initiation);

    let initiated: ReturnBatch = apply_batch(
        &batch,
        BatchCommand::InitiateReturn {
            counts: CountTriad::new(100, 20, 0, 0),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .new_batch;
    assert_eq!(initiated.step, ReturnStep::Pickup);

    let in_transit: ReturnBatch = apply_batch(
        &initiated,
        BatchCommand::AssignCarrier {
            partner: String::from("IIL FLEET"),
            tracking_id: String::from("TRK-55012"),
            vehicle_no: String::from("REG-07-4821"),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .new_batch;
    assert_eq!(in_transit.step, ReturnStep::Transit);

    let verified: ReturnBatch = apply_batch(
        &in_transit,
        BatchCommand::VerifyReturn {
            counts: CountTriad::new(100, 20, 0, 0),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .new_batch;
    assert_eq!(verified.step, ReturnStep::Verification);
    assert_eq!(verified.status, ItemStatus::Completed);
}

#[test]
fn test_step_transition_table() {
    assert!(ReturnStep::Initiation.can_transition_to(ReturnStep::Pickup));
    assert!(ReturnStep::Pickup.can_transition_to(ReturnStep::Transit));
    assert!(ReturnStep::Transit.can_transition_to(ReturnStep::Verification));

    assert!(!ReturnStep::Initiation.can_transition_to(ReturnStep::Transit));
    assert!(!ReturnStep::Pickup.can_transition_to(ReturnStep::Initiation));
    assert!(!ReturnStep::Verification.can_transition_to(ReturnStep::Initiation));
    assert!(!ReturnStep::Verification.can_transition_to(ReturnStep::Pickup));
}
