// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::BatchCommand;
use crate::error::{CoreError, StateError, ValidationError};
use crate::state::{BatchTransition, ReceiptTransition, ReturnBatch, ReturnStep};
use iil_kit_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use iil_kit_domain::{AuditLineItem, ItemStatus};

fn ensure_step(
    batch: &ReturnBatch,
    expected: ReturnStep,
    action: &'static str,
) -> Result<(), StateError> {
    if batch.step == expected {
        Ok(())
    } else {
        Err(StateError::OutOfSequence {
            action,
            expected,
            actual: batch.step,
        })
    }
}

fn require_non_empty(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::EmptyCarrierField { field })
    } else {
        Ok(())
    }
}

/// Applies a command to a return batch, producing the new batch and the
/// audit event recording the transition.
///
/// The input batch is never modified. All preconditions are checked before
/// anything is constructed, so a rejected command has no effect of any kind.
///
/// # Arguments
///
/// * `batch` - The current batch (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(BatchTransition)` containing the new batch and audit event
/// * `Err(CoreError)` if the command is invalid or out of sequence
///
/// # Errors
///
/// Returns an error if:
/// - The command does not apply to the batch's current step (`StateError`)
/// - A required carrier field is empty (`ValidationError`)
#[allow(clippy::too_many_lines)]
pub fn apply_batch(
    batch: &ReturnBatch,
    command: BatchCommand,
    actor: Actor,
    cause: Cause,
) -> Result<BatchTransition, CoreError> {
    match command {
        BatchCommand::InitiateReturn { counts } => {
            ensure_step(batch, ReturnStep::Initiation, "InitiateReturn")?;

            let before: StateSnapshot = batch.to_snapshot();

            let mut new_batch: ReturnBatch = batch.clone();
            new_batch.initiated_counts = counts;
            new_batch.step = ReturnStep::Pickup;
            new_batch.status = ItemStatus::Pending;

            let after: StateSnapshot = new_batch.to_snapshot();

            let action: Action = Action::new(
                String::from("InitiateReturn"),
                Some(format!(
                    "Acknowledged consolidation of {} units at {}",
                    counts.total(),
                    batch.source_hub
                )),
            );

            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                batch.project_code.clone(),
            );

            Ok(BatchTransition {
                new_batch,
                audit_event,
            })
        }
        BatchCommand::AssignCarrier {
            partner,
            tracking_id,
            vehicle_no,
        } => {
            ensure_step(batch, ReturnStep::Pickup, "AssignCarrier")?;

            require_non_empty(&partner, "logistics_partner")?;
            require_non_empty(&tracking_id, "tracking_id")?;
            require_non_empty(&vehicle_no, "vehicle_no")?;

            let before: StateSnapshot = batch.to_snapshot();

            let action: Action = Action::new(
                String::from("AssignCarrier"),
                Some(format!(
                    "Authorized transit with {partner} (LR {tracking_id}, vehicle {vehicle_no})"
                )),
            );

            let mut new_batch: ReturnBatch = batch.clone();
            new_batch.logistics_partner = partner;
            new_batch.tracking_id = tracking_id;
            new_batch.vehicle_no = vehicle_no;
            new_batch.step = ReturnStep::Transit;
            new_batch.status = ItemStatus::InProgress;

            let after: StateSnapshot = new_batch.to_snapshot();

            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                batch.project_code.clone(),
            );

            Ok(BatchTransition {
                new_batch,
                audit_event,
            })
        }
        BatchCommand::VerifyReturn { counts } => {
            ensure_step(batch, ReturnStep::Transit, "VerifyReturn")?;

            // Verification compares against what was initiated, not against
            // the project-wide expectation. Over-count is a mismatch here,
            // unlike line-item receipt classification.
            let is_mismatch: bool = counts != batch.initiated_counts;

            let before: StateSnapshot = batch.to_snapshot();

            let mut new_batch: ReturnBatch = batch.clone();
            new_batch.received_counts = counts;
            new_batch.step = ReturnStep::Verification;
            new_batch.status = if is_mismatch {
                ItemStatus::Mismatch
            } else {
                ItemStatus::Completed
            };

            let after: StateSnapshot = new_batch.to_snapshot();

            let details: String = if is_mismatch {
                format!(
                    "Receipt mismatch: verified {} units against {} initiated",
                    counts.total(),
                    batch.initiated_counts.total()
                )
            } else {
                format!("Receipt verified: {} units match initiation", counts.total())
            };

            let action: Action = Action::new(String::from("VerifyReturn"), Some(details));

            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                batch.project_code.clone(),
            );

            Ok(BatchTransition {
                new_batch,
                audit_event,
            })
        }
    }
}

fn items_snapshot(project_code: &str, items: &[AuditLineItem]) -> StateSnapshot {
    let completed: usize = items
        .iter()
        .filter(|item| item.status == ItemStatus::Completed)
        .count();
    let received: u32 = items.iter().map(|item| item.received).sum();

    StateSnapshot::new(format!(
        "project={project_code},items={},completed={completed},received_units={received}",
        items.len()
    ))
}

/// Records a received count against one audit line-item, producing the new
/// item list and the audit event.
///
/// The matched item is reclassified via the receipt classifier; every other
/// item is carried over untouched. The input list is never modified.
///
/// # Arguments
///
/// * `project_code` - The project the item list was derived from
/// * `items` - The current line-item list (immutable)
/// * `line_item_id` - The stable id of the item to update
/// * `received` - The received unit count
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns `ValidationError::UnknownLineItem` if the id does not resolve.
pub fn record_receipt(
    project_code: &str,
    items: &[AuditLineItem],
    line_item_id: &str,
    received: u32,
    actor: Actor,
    cause: Cause,
) -> Result<ReceiptTransition, CoreError> {
    let Some(position) = items.iter().position(|item| item.id == line_item_id) else {
        return Err(CoreError::Validation(ValidationError::UnknownLineItem {
            line_item_id: line_item_id.to_string(),
        }));
    };

    let before: StateSnapshot = items_snapshot(project_code, items);

    let mut new_items: Vec<AuditLineItem> = items.to_vec();
    let updated: AuditLineItem = new_items[position].clone().with_received(received);
    let action: Action = Action::new(
        String::from("RecordReceipt"),
        Some(format!(
            "Recorded {received} of {} expected for '{}' ({})",
            updated.expected,
            updated.label,
            updated.status.as_str()
        )),
    );
    new_items[position] = updated;

    let after: StateSnapshot = items_snapshot(project_code, &new_items);

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        project_code.to_string(),
    );

    Ok(ReceiptTransition {
        new_items,
        audit_event,
    })
}

/// Marks the warehouse audit record as finalized.
///
/// Finalization is a milestone: it changes no line-item state but produces
/// an audit event capturing the list as it stood.
///
/// # Arguments
///
/// * `project_code` - The project the item list was derived from
/// * `items` - The current line-item list
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
#[must_use]
pub fn finalize_audit(
    project_code: &str,
    items: &[AuditLineItem],
    actor: Actor,
    cause: Cause,
) -> ReceiptTransition {
    let snapshot: StateSnapshot = items_snapshot(project_code, items);

    let action: Action = Action::new(
        String::from("FinalizeAudit"),
        Some(String::from("Warehouse audit record finalized")),
    );

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        snapshot.clone(),
        snapshot,
        project_code.to_string(),
    );

    ReceiptTransition {
        new_items: items.to_vec(),
        audit_event,
    }
}
