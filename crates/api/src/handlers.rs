// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every state-changing handler follows the same shape: verify the actor's
//! capability, run the pure core/domain function, persist the result
//! together with its audit event, and return the response alongside that
//! event.

use iil_kit::{
    BatchCommand, BatchTransition, ReceiptTransition, ReturnBatch, apply_batch, finalize_audit,
    record_receipt,
};
use iil_kit_audit::{Action, AuditEvent, Cause, StateSnapshot};
use iil_kit_domain::{
    AuditLineItem, CountTriad, ItemStatus, ManualRequirement, Project, ProjectStatus,
    ShiftInventory, aggregate_totals, derive_line_items, validate_project,
};
use iil_kit_persistence::{PersistenceError, SqlitePersistence};
use std::str::FromStr;
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, Role, authenticate};
use crate::capabilities::{Capability, require_capability};
use crate::csv_preview::{CenterCsvPreview, preview_center_csv};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::passcode_policy::PasscodePolicy;
use crate::receiving::is_known_warehouse_node;
use crate::request_response::{
    AssignCarrierRequest, AuditEventInfo, CreateProjectRequest, FinalizeAuditResponse,
    InitiateReturnRequest, LineItemInfo, LoginRequest, LoginResponse, ManualRequirementDto,
    ProjectInfo, RecordReceiptRequest, RecordReceiptResponse, RequirementsInfo,
    ReturnBatchInfo, SaveRequirementsRequest, ShiftDto, VerifyReturnRequest,
    WarehouseStatsInfo,
};

/// The result of an API operation that includes both the response and the
/// audit event.
///
/// This ensures that successful state-changing API operations always
/// produce an audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
}

fn load_project(
    persistence: &mut SqlitePersistence,
    code: &str,
) -> Result<Project, ApiError> {
    persistence
        .get_project(code)
        .map_err(translate_persistence_error)
}

/// Derives the line-item list for a project and overlays the persisted
/// receipt counts by stable id.
///
/// Receipt rows whose line-item no longer derives (e.g., a category was
/// disabled since the count was recorded) are skipped.
fn derive_with_receipts(
    persistence: &mut SqlitePersistence,
    project: &Project,
) -> Result<Vec<AuditLineItem>, ApiError> {
    let mut items: Vec<AuditLineItem> = derive_line_items(project);

    let receipts = persistence
        .get_receipts(&project.code)
        .map_err(translate_persistence_error)?;

    for record in receipts {
        if let Some(position) = items.iter().position(|item| item.id == record.line_item_id) {
            items[position] = items[position].clone().with_received(record.received);
        }
    }

    Ok(items)
}

/// Authenticates an operator into a project workflow.
///
/// # Errors
///
/// Returns an error if the project does not exist, the role is unknown, or
/// the passcode does not match.
pub fn login(
    persistence: &mut SqlitePersistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let project: Project = load_project(persistence, &request.project_code)?;

    let role: Role = Role::parse(&request.role)?;
    let actor: AuthenticatedActor =
        authenticate(&project, role, &request.actor_id, &request.passcode)?;

    info!(
        "Operator '{}' logged into project {} as {}",
        actor.id,
        project.code,
        role.as_str()
    );

    Ok(LoginResponse {
        actor_id: actor.id,
        role: String::from(role.as_str()),
        project: ProjectInfo::from(&project),
    })
}

/// Creates a new project in the registry.
///
/// # Errors
///
/// Returns an error if the actor lacks the `ManageProjects` capability, a
/// passcode violates policy, the code is already taken, or persistence
/// fails.
pub fn create_project(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    request: CreateProjectRequest,
) -> Result<ApiResult<ProjectInfo>, ApiError> {
    require_capability(actor, Capability::ManageProjects)?;

    PasscodePolicy::default().validate(&request.project_passcode, &request.admin_passcode)?;

    match persistence.get_project(&request.code) {
        Ok(_) => {
            return Err(ApiError::InvalidInput {
                field: String::from("code"),
                message: format!("Project code '{}' already exists", request.code),
            });
        }
        Err(PersistenceError::ProjectNotFound(_)) => {}
        Err(other) => return Err(translate_persistence_error(other)),
    }

    let project: Project = Project::new(
        format!("prj-{}", request.code.to_lowercase()),
        request.name,
        request.client,
        request.code,
        request.project_passcode,
        request.admin_passcode,
    );

    validate_project(&project).map_err(translate_domain_error)?;

    persistence
        .save_project(&project)
        .map_err(translate_persistence_error)?;

    let action: Action = Action::new(
        String::from("CreateProject"),
        Some(format!(
            "Created project '{}' for client '{}'",
            project.code, project.client
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new_global(
        actor.to_audit_actor(),
        cause,
        action,
        StateSnapshot::new(String::from("project=absent")),
        StateSnapshot::new(format!(
            "project={},status={}",
            project.code,
            project.status.as_str()
        )),
    );
    persistence
        .persist_audit_event(&audit_event)
        .map_err(translate_persistence_error)?;

    info!("Created project {}", project.code);

    Ok(ApiResult {
        response: ProjectInfo::from(&project),
        audit_event,
    })
}

/// Loads a project summary.
///
/// # Errors
///
/// Returns an error if the project does not exist.
pub fn get_project(
    persistence: &mut SqlitePersistence,
    code: &str,
) -> Result<ProjectInfo, ApiError> {
    Ok(ProjectInfo::from(&load_project(persistence, code)?))
}

/// Lists all projects in the registry.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_projects(
    persistence: &mut SqlitePersistence,
) -> Result<Vec<ProjectInfo>, ApiError> {
    let projects: Vec<Project> = persistence
        .list_projects()
        .map_err(translate_persistence_error)?;

    Ok(projects.iter().map(ProjectInfo::from).collect())
}

/// Loads a project's full requirements view.
///
/// # Errors
///
/// Returns an error if the project does not exist.
pub fn get_requirements(
    persistence: &mut SqlitePersistence,
    code: &str,
) -> Result<RequirementsInfo, ApiError> {
    Ok(RequirementsInfo::from(&load_project(persistence, code)?))
}

/// Replaces a project's requirement data wholesale.
///
/// # Errors
///
/// Returns an error if the actor lacks the `EditRequirements` capability,
/// a shift or manual requirement fails conversion or validation, or
/// persistence fails.
pub fn save_requirements(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    request: SaveRequirementsRequest,
) -> Result<ApiResult<RequirementsInfo>, ApiError> {
    require_capability(actor, Capability::EditRequirements)?;

    let mut project: Project = load_project(persistence, &request.project_code)?;

    let shifts: Vec<ShiftInventory> = request
        .shifts
        .into_iter()
        .map(ShiftDto::into_domain)
        .collect::<Result<Vec<ShiftInventory>, ApiError>>()?;

    let manual_requirements: Vec<ManualRequirement> = request
        .manual_requirements
        .into_iter()
        .map(ManualRequirementDto::into_domain)
        .collect::<Result<Vec<ManualRequirement>, ApiError>>()?;

    let before: StateSnapshot = StateSnapshot::new(format!(
        "shifts={},manual={},documents={}",
        project.shifts.len(),
        project.manual_requirements.len(),
        project.requirement_documents.len()
    ));

    project.exam_date = request.exam_date;
    project.shifts = shifts;
    project.manual_requirements = manual_requirements;
    project.requirement_documents = request.requirement_documents;

    validate_project(&project).map_err(translate_domain_error)?;

    persistence
        .save_project(&project)
        .map_err(translate_persistence_error)?;

    let after: StateSnapshot = StateSnapshot::new(format!(
        "shifts={},manual={},documents={}",
        project.shifts.len(),
        project.manual_requirements.len(),
        project.requirement_documents.len()
    ));

    let action: Action = Action::new(
        String::from("SaveRequirements"),
        Some(format!("Replaced requirements for project {}", project.code)),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        action,
        before,
        after,
        project.code.clone(),
    );
    persistence
        .persist_audit_event(&audit_event)
        .map_err(translate_persistence_error)?;

    Ok(ApiResult {
        response: RequirementsInfo::from(&project),
        audit_event,
    })
}

/// Advances a project to the next lifecycle stage.
///
/// The lifecycle only moves forward (Requirements → Warehouse → Dispatch →
/// Centers → Exam → Reports → Returns); any other move is rejected.
///
/// # Errors
///
/// Returns an error if the actor lacks the `ManageProjects` capability, the
/// target stage string is unknown, the move is not the forward step, or
/// persistence fails.
pub fn advance_project_status(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    project_code: &str,
    target_status: &str,
) -> Result<ApiResult<ProjectInfo>, ApiError> {
    require_capability(actor, Capability::ManageProjects)?;

    let mut project: Project = load_project(persistence, project_code)?;

    let target: ProjectStatus =
        ProjectStatus::from_str(target_status).map_err(translate_domain_error)?;

    if !project.status.can_transition_to(target) {
        return Err(ApiError::StateConflict {
            message: format!(
                "Project {} cannot move from '{}' to '{}'",
                project.code,
                project.status.as_str(),
                target.as_str()
            ),
        });
    }

    let before: StateSnapshot = StateSnapshot::new(format!(
        "project={},status={}",
        project.code,
        project.status.as_str()
    ));

    project.status = target;

    persistence
        .save_project(&project)
        .map_err(translate_persistence_error)?;

    let after: StateSnapshot = StateSnapshot::new(format!(
        "project={},status={}",
        project.code,
        project.status.as_str()
    ));

    let action: Action = Action::new(
        String::from("AdvanceProjectStatus"),
        Some(format!(
            "Advanced project {} to '{}'",
            project.code,
            target.as_str()
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        action,
        before,
        after,
        project.code.clone(),
    );
    persistence
        .persist_audit_event(&audit_event)
        .map_err(translate_persistence_error)?;

    Ok(ApiResult {
        response: ProjectInfo::from(&project),
        audit_event,
    })
}

/// Lists the warehouse audit line-items for a project.
///
/// The list is re-derived from the project on every call; persisted receipt
/// counts are overlaid by stable id and reclassified.
///
/// # Errors
///
/// Returns an error if the actor lacks the `ViewWarehouse` capability or
/// the project does not exist.
pub fn list_line_items(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    project_code: &str,
) -> Result<Vec<LineItemInfo>, ApiError> {
    require_capability(actor, Capability::ViewWarehouse)?;

    let project: Project = load_project(persistence, project_code)?;
    let items: Vec<AuditLineItem> = derive_with_receipts(persistence, &project)?;

    Ok(items.iter().map(LineItemInfo::from).collect())
}

/// Records a received count against one line-item.
///
/// # Errors
///
/// Returns an error if the actor lacks the `RecordReceipts` capability, the
/// line-item id does not resolve, or persistence fails.
pub fn record_line_item_receipt(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    request: RecordReceiptRequest,
) -> Result<ApiResult<RecordReceiptResponse>, ApiError> {
    require_capability(actor, Capability::RecordReceipts)?;

    let unlisted_node: Option<&str> = request
        .context
        .as_ref()
        .map(|context| context.warehouse_node.as_str())
        .filter(|&node| !is_known_warehouse_node(node));
    if let Some(node) = unlisted_node {
        debug!(
            "Receipt for {} recorded against unlisted warehouse node '{node}'",
            request.project_code
        );
    }

    let project: Project = load_project(persistence, &request.project_code)?;
    let items: Vec<AuditLineItem> = derive_with_receipts(persistence, &project)?;

    let transition: ReceiptTransition = record_receipt(
        &project.code,
        &items,
        &request.line_item_id,
        request.received,
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_receipt_transition(
            &project.code,
            &request.line_item_id,
            request.received,
            &actor.id,
            &transition,
        )
        .map_err(translate_persistence_error)?;

    let item: LineItemInfo = transition
        .new_items
        .iter()
        .find(|item| item.id == request.line_item_id)
        .map(LineItemInfo::from)
        .ok_or_else(|| ApiError::Internal {
            message: format!("Updated line-item '{}' missing from result", request.line_item_id),
        })?;

    Ok(ApiResult {
        response: RecordReceiptResponse { item, event_id },
        audit_event: transition.audit_event,
    })
}

/// Finalizes the warehouse audit record for a project.
///
/// # Errors
///
/// Returns an error if the actor lacks the `RecordReceipts` capability or
/// persistence fails.
pub fn finalize_warehouse_audit(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    project_code: &str,
) -> Result<ApiResult<FinalizeAuditResponse>, ApiError> {
    require_capability(actor, Capability::RecordReceipts)?;

    let project: Project = load_project(persistence, project_code)?;
    let items: Vec<AuditLineItem> = derive_with_receipts(persistence, &project)?;

    let transition: ReceiptTransition =
        finalize_audit(&project.code, &items, actor.to_audit_actor(), cause);

    let event_id: i64 = persistence
        .persist_audit_event(&transition.audit_event)
        .map_err(translate_persistence_error)?;

    Ok(ApiResult {
        response: FinalizeAuditResponse {
            message: format!("Warehouse audit record finalized for {project_code}"),
            event_id,
        },
        audit_event: transition.audit_event,
    })
}

/// Returns a project's aggregated four-bucket totals.
///
/// # Errors
///
/// Returns an error if the project does not exist.
pub fn get_project_totals(
    persistence: &mut SqlitePersistence,
    project_code: &str,
) -> Result<CountTriad, ApiError> {
    let project: Project = load_project(persistence, project_code)?;
    Ok(aggregate_totals(&project))
}

/// Computes the warehouse completion statistics strip.
///
/// # Errors
///
/// Returns an error if the actor lacks the `ViewWarehouse` capability or
/// the project does not exist.
pub fn get_warehouse_stats(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    project_code: &str,
) -> Result<WarehouseStatsInfo, ApiError> {
    require_capability(actor, Capability::ViewWarehouse)?;

    let project: Project = load_project(persistence, project_code)?;
    let items: Vec<AuditLineItem> = derive_with_receipts(persistence, &project)?;

    let total: usize = items.len();
    let completed: usize = items
        .iter()
        .filter(|item| item.status == ItemStatus::Completed)
        .count();
    let completion_percent: u32 = if total == 0 {
        0
    } else {
        u32::try_from((completed * 200 + total) / (2 * total)).unwrap_or(0)
    };

    let deltas: usize = items
        .iter()
        .filter(|item| {
            item.status == ItemStatus::Mismatch
                || (item.received > 0 && item.received < item.expected)
        })
        .count();

    Ok(WarehouseStatsInfo {
        completion_percent,
        deltas_detected: u32::try_from(deltas).unwrap_or(u32::MAX),
        total_expected: items.iter().map(|item| u64::from(item.expected)).sum(),
        total_received: items.iter().map(|item| u64::from(item.received)).sum(),
    })
}

/// Creates the bulk consolidation return batch for a project.
///
/// # Errors
///
/// Returns an error if the actor lacks the `InitiateReturn` capability, the
/// batch already exists, or persistence fails.
pub fn create_return_batch(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    project_code: &str,
) -> Result<ApiResult<ReturnBatchInfo>, ApiError> {
    require_capability(actor, Capability::InitiateReturn)?;

    let project: Project = load_project(persistence, project_code)?;
    let batch: ReturnBatch = ReturnBatch::bulk_for_project(&project);

    match persistence.get_return_batch(&batch.id) {
        Ok(_) => {
            return Err(ApiError::InvalidInput {
                field: String::from("batch_id"),
                message: format!("Return batch '{}' already exists", batch.id),
            });
        }
        Err(PersistenceError::BatchNotFound(_)) => {}
        Err(other) => return Err(translate_persistence_error(other)),
    }

    persistence
        .save_return_batch(&batch)
        .map_err(translate_persistence_error)?;

    let action: Action = Action::new(
        String::from("CreateReturnBatch"),
        Some(format!(
            "Created bulk return batch {} expecting {} units",
            batch.id,
            batch.expected_counts.total()
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        action,
        StateSnapshot::new(String::from("batch=absent")),
        batch.to_snapshot(),
        project.code.clone(),
    );
    persistence
        .persist_audit_event(&audit_event)
        .map_err(translate_persistence_error)?;

    info!("Created return batch {}", batch.id);

    Ok(ApiResult {
        response: ReturnBatchInfo::from(&batch),
        audit_event,
    })
}

fn apply_batch_command(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    batch_id: &str,
    command: BatchCommand,
) -> Result<ApiResult<ReturnBatchInfo>, ApiError> {
    let batch: ReturnBatch = persistence
        .get_return_batch(batch_id)
        .map_err(translate_persistence_error)?;

    let transition: BatchTransition =
        apply_batch(&batch, command, actor.to_audit_actor(), cause).map_err(translate_core_error)?;

    persistence
        .persist_batch_transition(&transition)
        .map_err(translate_persistence_error)?;

    Ok(ApiResult {
        response: ReturnBatchInfo::from(&transition.new_batch),
        audit_event: transition.audit_event,
    })
}

/// Acknowledges hub consolidation for a return batch.
///
/// # Errors
///
/// Returns an error if the actor lacks the `InitiateReturn` capability, the
/// batch is not at the initiation step, or persistence fails.
pub fn initiate_return(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    request: InitiateReturnRequest,
) -> Result<ApiResult<ReturnBatchInfo>, ApiError> {
    require_capability(actor, Capability::InitiateReturn)?;

    apply_batch_command(
        persistence,
        actor,
        cause,
        &request.batch_id,
        BatchCommand::InitiateReturn {
            counts: request.counts,
        },
    )
}

/// Assigns a carrier to a return batch.
///
/// # Errors
///
/// Returns an error if the actor lacks the `AssignCarrier` capability, a
/// carrier field is empty, the batch is not at the pickup step, or
/// persistence fails.
pub fn assign_carrier(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    request: AssignCarrierRequest,
) -> Result<ApiResult<ReturnBatchInfo>, ApiError> {
    require_capability(actor, Capability::AssignCarrier)?;

    apply_batch_command(
        persistence,
        actor,
        cause,
        &request.batch_id,
        BatchCommand::AssignCarrier {
            partner: request.partner,
            tracking_id: request.tracking_id,
            vehicle_no: request.vehicle_no,
        },
    )
}

/// Verifies warehouse receipt of a return batch.
///
/// # Errors
///
/// Returns an error if the actor lacks the `VerifyReturn` capability, the
/// batch is not at the transit step, or persistence fails.
pub fn verify_return(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    request: VerifyReturnRequest,
) -> Result<ApiResult<ReturnBatchInfo>, ApiError> {
    require_capability(actor, Capability::VerifyReturn)?;

    apply_batch_command(
        persistence,
        actor,
        cause,
        &request.batch_id,
        BatchCommand::VerifyReturn {
            counts: request.counts,
        },
    )
}

/// Lists the return batches of a project.
///
/// # Errors
///
/// Returns an error if the project does not exist.
pub fn list_return_batches(
    persistence: &mut SqlitePersistence,
    project_code: &str,
) -> Result<Vec<ReturnBatchInfo>, ApiError> {
    let batches: Vec<ReturnBatch> = persistence
        .list_return_batches(project_code)
        .map_err(translate_persistence_error)?;

    Ok(batches.iter().map(ReturnBatchInfo::from).collect())
}

/// Loads the audit timeline for a project, oldest event first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_audit_timeline(
    persistence: &mut SqlitePersistence,
    project_code: &str,
) -> Result<Vec<AuditEventInfo>, ApiError> {
    let events = persistence
        .get_audit_timeline(project_code)
        .map_err(translate_persistence_error)?;

    Ok(events.iter().map(AuditEventInfo::from).collect())
}

/// Previews a center master-data CSV upload against a project.
///
/// # Errors
///
/// Returns an error if the actor lacks the `UploadMasterData` capability,
/// the project does not exist, or the CSV header is malformed.
pub fn preview_center_master_data(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    project_code: &str,
    csv_data: &str,
) -> Result<CenterCsvPreview, ApiError> {
    require_capability(actor, Capability::UploadMasterData)?;

    let project: Project = load_project(persistence, project_code)?;
    preview_center_csv(&project, csv_data)
}
