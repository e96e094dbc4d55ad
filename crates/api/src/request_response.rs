// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Requests carry primitive field types (strings for times and material
//! types); conversion into domain types happens here, so handlers only ever
//! see validated domain values.

use crate::error::{ApiError, translate_domain_error};
use crate::receiving::ReceiptContext;
use iil_kit::ReturnBatch;
use iil_kit_audit::AuditEvent;
use iil_kit_domain::{
    AuditLineItem, CountTriad, GPS_LOCK_TYPE_LABEL, GenericMaterialType, GpsLockCounts,
    ManualRequirement, MaterialRequirement, Project, ShiftInventory, parse_time_of_day,
};
use serde::{Deserialize, Serialize};
use time::Time;

fn format_time_of_day(value: Time) -> String {
    let format = time::macros::format_description!("[hour]:[minute]");
    value.format(&format).unwrap_or_else(|_| value.to_string())
}

/// One shift as carried over the wire, with `HH:MM` time strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDto {
    /// Unique identifier within the project.
    pub id: String,
    /// Display name.
    pub shift_name: String,
    /// Shift start time (HH:MM).
    pub start_time: String,
    /// Shift end time (HH:MM).
    pub end_time: String,
    /// GPS lock baseline.
    pub gps_locks: MaterialRequirement,
    /// Rapid charger baseline.
    pub chargers: MaterialRequirement,
    /// IO adaptor baseline.
    pub adaptors: MaterialRequirement,
    /// Master RFID baseline.
    pub rfid_master: MaterialRequirement,
    /// Unique RFID tag baseline.
    pub rfid_unique: MaterialRequirement,
}

impl ShiftDto {
    /// Converts this DTO into a domain shift.
    ///
    /// # Errors
    ///
    /// Returns an error if either time string fails to parse.
    pub fn into_domain(self) -> Result<ShiftInventory, ApiError> {
        let start_time: Time =
            parse_time_of_day(&self.start_time).map_err(translate_domain_error)?;
        let end_time: Time = parse_time_of_day(&self.end_time).map_err(translate_domain_error)?;

        Ok(ShiftInventory {
            id: self.id,
            shift_name: self.shift_name,
            start_time,
            end_time,
            gps_locks: self.gps_locks,
            chargers: self.chargers,
            adaptors: self.adaptors,
            rfid_master: self.rfid_master,
            rfid_unique: self.rfid_unique,
        })
    }
}

impl From<&ShiftInventory> for ShiftDto {
    fn from(shift: &ShiftInventory) -> Self {
        Self {
            id: shift.id.clone(),
            shift_name: shift.shift_name.clone(),
            start_time: format_time_of_day(shift.start_time),
            end_time: format_time_of_day(shift.end_time),
            gps_locks: shift.gps_locks.clone(),
            chargers: shift.chargers.clone(),
            adaptors: shift.adaptors.clone(),
            rfid_master: shift.rfid_master.clone(),
            rfid_unique: shift.rfid_unique.clone(),
        }
    }
}

/// One manual requirement as carried over the wire.
///
/// The wire shape is flat; conversion enforces the tagged-variant rule that
/// only GPS Lock requirements carry sub-counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualRequirementDto {
    /// Unique identifier within the project.
    pub id: String,
    /// Catalog material type label (e.g., "GPS Lock", "Trunks").
    pub material_type: String,
    /// Free-text hardware nomenclature.
    pub nomenclature: String,
    /// Expected unit count (ignored for GPS Lock requirements).
    pub quantity: u32,
    /// Four-way breakdown, present only for GPS Lock requirements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_counts: Option<GpsLockCounts>,
}

impl ManualRequirementDto {
    /// Converts this DTO into a domain manual requirement.
    ///
    /// # Errors
    ///
    /// Returns an error if the material type is unknown, or if sub-counts
    /// are supplied for a non-GPS requirement.
    pub fn into_domain(self) -> Result<ManualRequirement, ApiError> {
        if self.material_type == GPS_LOCK_TYPE_LABEL {
            return Ok(ManualRequirement::GpsLock {
                id: self.id,
                nomenclature: self.nomenclature,
                counts: self.sub_counts.unwrap_or(GpsLockCounts::ZERO),
            });
        }

        if self.sub_counts.is_some() {
            return Err(ApiError::InvalidInput {
                field: String::from("sub_counts"),
                message: String::from("Only GPS Lock requirements carry sub-counts"),
            });
        }

        let material_type: GenericMaterialType =
            GenericMaterialType::parse(&self.material_type).map_err(translate_domain_error)?;

        Ok(ManualRequirement::Generic {
            id: self.id,
            material_type,
            nomenclature: self.nomenclature,
            quantity: self.quantity,
        })
    }
}

impl From<&ManualRequirement> for ManualRequirementDto {
    fn from(requirement: &ManualRequirement) -> Self {
        match requirement {
            ManualRequirement::GpsLock {
                id,
                nomenclature,
                counts,
            } => Self {
                id: id.clone(),
                material_type: String::from(GPS_LOCK_TYPE_LABEL),
                nomenclature: nomenclature.clone(),
                quantity: 0,
                sub_counts: Some(*counts),
            },
            ManualRequirement::Generic {
                id,
                material_type,
                nomenclature,
                quantity,
            } => Self {
                id: id.clone(),
                material_type: String::from(material_type.as_str()),
                nomenclature: nomenclature.clone(),
                quantity: *quantity,
                sub_counts: None,
            },
        }
    }
}

/// Request to create a project in the registry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateProjectRequest {
    /// Project display name.
    pub name: String,
    /// Client organization name.
    pub client: String,
    /// Short project code; unique across the registry.
    pub code: String,
    /// Passcode for non-admin roles.
    pub project_passcode: String,
    /// Passcode for the admin role.
    pub admin_passcode: String,
}

/// Summary view of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Opaque project identifier.
    pub id: String,
    /// Project display name.
    pub name: String,
    /// Client organization name.
    pub client: String,
    /// Short project code.
    pub code: String,
    /// Exam date (ISO 8601 date string).
    pub exam_date: String,
    /// Lifecycle stage display string.
    pub status: String,
    /// Number of exam centers.
    pub total_centers: u32,
    /// Headline lock count.
    pub total_locks: u32,
    /// Number of shifts.
    pub shift_count: usize,
    /// Number of manual requirements.
    pub manual_requirement_count: usize,
    /// Attached requirement document filenames.
    pub requirement_documents: Vec<String>,
}

impl From<&Project> for ProjectInfo {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            client: project.client.clone(),
            code: project.code.clone(),
            exam_date: project.exam_date.clone(),
            status: String::from(project.status.as_str()),
            total_centers: project.total_centers,
            total_locks: project.total_locks,
            shift_count: project.shifts.len(),
            manual_requirement_count: project.manual_requirements.len(),
            requirement_documents: project.requirement_documents.clone(),
        }
    }
}

/// Full requirements view of a project, as edited by the requirements
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementsInfo {
    /// Exam date (ISO 8601 date string).
    pub exam_date: String,
    /// Per-shift baselines.
    pub shifts: Vec<ShiftDto>,
    /// Ad-hoc requirements.
    pub manual_requirements: Vec<ManualRequirementDto>,
    /// Attached requirement document filenames.
    pub requirement_documents: Vec<String>,
}

impl From<&Project> for RequirementsInfo {
    fn from(project: &Project) -> Self {
        Self {
            exam_date: project.exam_date.clone(),
            shifts: project.shifts.iter().map(ShiftDto::from).collect(),
            manual_requirements: project
                .manual_requirements
                .iter()
                .map(ManualRequirementDto::from)
                .collect(),
            requirement_documents: project.requirement_documents.clone(),
        }
    }
}

/// Request to replace a project's requirement data wholesale.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SaveRequirementsRequest {
    /// The project to update.
    pub project_code: String,
    /// Exam date (ISO 8601 date string).
    pub exam_date: String,
    /// Per-shift baselines, replacing the existing set.
    pub shifts: Vec<ShiftDto>,
    /// Ad-hoc requirements, replacing the existing set.
    pub manual_requirements: Vec<ManualRequirementDto>,
    /// Attached requirement document filenames, replacing the existing set.
    pub requirement_documents: Vec<String>,
}

/// Request to authenticate into a project workflow.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    /// The project to log into.
    pub project_code: String,
    /// Role display string (e.g., "IIL Operations").
    pub role: String,
    /// The operator's identifier.
    pub actor_id: String,
    /// The passcode for the chosen role.
    pub passcode: String,
}

/// Response to a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The authenticated operator's identifier.
    pub actor_id: String,
    /// The authenticated role display string.
    pub role: String,
    /// The project that was logged into.
    pub project: ProjectInfo,
}

/// One audit line-item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemInfo {
    /// Stable line-item id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Expected unit count.
    pub expected: u32,
    /// Received unit count.
    pub received: u32,
    /// Fulfillment status display string.
    pub status: String,
    /// Provenance remarks.
    pub remarks: String,
}

impl From<&AuditLineItem> for LineItemInfo {
    fn from(item: &AuditLineItem) -> Self {
        Self {
            id: item.id.clone(),
            label: item.label.clone(),
            expected: item.expected,
            received: item.received,
            status: String::from(item.status.as_str()),
            remarks: item.remarks.clone(),
        }
    }
}

/// Request to record a received count against one line-item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordReceiptRequest {
    /// The project the line-item belongs to.
    pub project_code: String,
    /// The stable line-item id.
    pub line_item_id: String,
    /// The received unit count.
    pub received: u32,
    /// Optional receiving session metadata (pass-through).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ReceiptContext>,
}

/// Response to a recorded receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordReceiptResponse {
    /// The updated line-item.
    pub item: LineItemInfo,
    /// The persisted audit event id.
    pub event_id: i64,
}

/// Response to finalizing the warehouse audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeAuditResponse {
    /// A success message.
    pub message: String,
    /// The persisted audit event id.
    pub event_id: i64,
}

/// Warehouse completion statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseStatsInfo {
    /// Percentage of line-items fully completed (0-100).
    pub completion_percent: u32,
    /// Number of line-items with a detected delta.
    pub deltas_detected: u32,
    /// Total expected units across all line-items.
    pub total_expected: u64,
    /// Total received units across all line-items.
    pub total_received: u64,
}

/// One return batch row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBatchInfo {
    /// Batch identifier.
    pub id: String,
    /// The project this batch belongs to.
    pub project_code: String,
    /// Consolidation source hub.
    pub source_hub: String,
    /// Pickup address at the source hub.
    pub dispatch_address: String,
    /// Carrier consignment / LR number.
    pub tracking_id: String,
    /// Carrier or fleet partner name.
    pub logistics_partner: String,
    /// Vehicle registration number.
    pub vehicle_no: String,
    /// Project-wide totals the batch is expected to return.
    pub expected_counts: CountTriad,
    /// Counts acknowledged at consolidation.
    pub initiated_counts: CountTriad,
    /// Counts verified on warehouse receipt.
    pub received_counts: CountTriad,
    /// Derived fulfillment status display string.
    pub status: String,
    /// Current workflow step.
    pub step: String,
}

impl From<&ReturnBatch> for ReturnBatchInfo {
    fn from(batch: &ReturnBatch) -> Self {
        Self {
            id: batch.id.clone(),
            project_code: batch.project_code.clone(),
            source_hub: batch.source_hub.clone(),
            dispatch_address: batch.dispatch_address.clone(),
            tracking_id: batch.tracking_id.clone(),
            logistics_partner: batch.logistics_partner.clone(),
            vehicle_no: batch.vehicle_no.clone(),
            expected_counts: batch.expected_counts,
            initiated_counts: batch.initiated_counts,
            received_counts: batch.received_counts,
            status: String::from(batch.status.as_str()),
            step: String::from(batch.step.as_str()),
        }
    }
}

/// Request to acknowledge hub consolidation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InitiateReturnRequest {
    /// The batch to initiate.
    pub batch_id: String,
    /// The counts acknowledged at consolidation.
    pub counts: CountTriad,
}

/// Request to assign a carrier to a return batch.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssignCarrierRequest {
    /// The batch to assign a carrier to.
    pub batch_id: String,
    /// Carrier or fleet partner name.
    pub partner: String,
    /// Carrier consignment / LR number.
    pub tracking_id: String,
    /// Vehicle registration number.
    pub vehicle_no: String,
}

/// Request to verify warehouse receipt of a return batch.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyReturnRequest {
    /// The batch to verify.
    pub batch_id: String,
    /// The counts verified at the warehouse.
    pub counts: CountTriad,
}

/// One audit timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// The actor who initiated the change.
    pub actor_id: String,
    /// The actor's type.
    pub actor_type: String,
    /// The cause identifier.
    pub cause_id: String,
    /// The cause description.
    pub cause_description: String,
    /// The action name.
    pub action: String,
    /// Optional action details.
    pub details: Option<String>,
    /// State snapshot before the transition.
    pub before: String,
    /// State snapshot after the transition.
    pub after: String,
    /// The project the event is scoped to, if any.
    pub project_code: Option<String>,
}

impl From<&AuditEvent> for AuditEventInfo {
    fn from(event: &AuditEvent) -> Self {
        Self {
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            before: event.before.data.clone(),
            after: event.after.data.clone(),
            project_code: event.project_code.clone(),
        }
    }
}
