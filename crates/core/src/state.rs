// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use iil_kit_audit::{AuditEvent, StateSnapshot};
use iil_kit_domain::{AuditLineItem, CountTriad, ItemStatus, Project, aggregate_totals};
use serde::{Deserialize, Serialize};

/// Placeholder shown for carrier fields before a carrier is assigned.
pub const CARRIER_PLACEHOLDER: &str = "-";

/// Dispatch address every bulk consolidation batch starts with.
pub const DEFAULT_DISPATCH_ADDRESS: &str = "Main Operations Gate, HQ Building";

/// The four stages of a reverse-logistics return batch.
///
/// A batch only ever moves forward; `Verification` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReturnStep {
    /// Materials consolidating at the client hub.
    #[default]
    Initiation,
    /// Consolidation acknowledged; awaiting carrier assignment.
    Pickup,
    /// Carrier assigned; materials in transit.
    Transit,
    /// Warehouse receipt verified. Terminal.
    Verification,
}

impl ReturnStep {
    /// Converts this step to its workflow string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Initiation => "initiation",
            Self::Pickup => "pickup",
            Self::Transit => "transit",
            Self::Verification => "verification",
        }
    }

    /// Checks if a transition from this step to another is valid.
    ///
    /// Valid transitions are:
    /// - Initiation → Pickup
    /// - Pickup → Transit
    /// - Transit → Verification
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Initiation, Self::Pickup)
                | (Self::Pickup, Self::Transit)
                | (Self::Transit, Self::Verification)
        )
    }

    /// Returns whether this step is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Verification)
    }
}

impl std::fmt::Display for ReturnStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One unit of reverse-logistics tracking, from client-site consolidation to
/// warehouse re-verification.
///
/// `status` is derived by the transition engine, never set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBatch {
    /// Batch identifier (e.g., "RET-EX99-BULK").
    pub id: String,
    /// The project this batch belongs to.
    pub project_code: String,
    /// Consolidation source hub.
    pub source_hub: String,
    /// Pickup address at the source hub.
    pub dispatch_address: String,
    /// Carrier consignment / LR number. "-" until a carrier is assigned.
    pub tracking_id: String,
    /// Carrier or fleet partner name. "-" until a carrier is assigned.
    pub logistics_partner: String,
    /// Vehicle registration number. "-" until a carrier is assigned.
    pub vehicle_no: String,
    /// Project-wide totals the batch is expected to return.
    pub expected_counts: CountTriad,
    /// Counts the client acknowledged at consolidation.
    pub initiated_counts: CountTriad,
    /// Counts the warehouse verified on receipt.
    pub received_counts: CountTriad,
    /// Derived fulfillment status.
    pub status: ItemStatus,
    /// Current workflow step.
    pub step: ReturnStep,
}

impl ReturnBatch {
    /// Creates the bulk consolidation batch for a project.
    ///
    /// The expected counts are seeded from the aggregation engine; all
    /// carrier fields start as "-" placeholders and the batch begins at the
    /// initiation step.
    ///
    /// # Arguments
    ///
    /// * `project` - The project to create the batch for
    #[must_use]
    pub fn bulk_for_project(project: &Project) -> Self {
        Self {
            id: format!("RET-{}-BULK", project.code),
            project_code: project.code.clone(),
            source_hub: format!("{} Regional Hub", project.client),
            dispatch_address: String::from(DEFAULT_DISPATCH_ADDRESS),
            tracking_id: String::from(CARRIER_PLACEHOLDER),
            logistics_partner: String::from(CARRIER_PLACEHOLDER),
            vehicle_no: String::from(CARRIER_PLACEHOLDER),
            expected_counts: aggregate_totals(project),
            initiated_counts: CountTriad::ZERO,
            received_counts: CountTriad::ZERO,
            status: ItemStatus::Pending,
            step: ReturnStep::Initiation,
        }
    }

    /// Converts the batch to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "batch={},step={},status={}",
            self.id,
            self.step.as_str(),
            self.status.as_str()
        ))
    }
}

/// The result of a successful batch transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. The input batch is never modified; callers persist
/// `new_batch` to commit the transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchTransition {
    /// The batch after the transition.
    pub new_batch: ReturnBatch,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a successful receipt operation on the audit line-item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptTransition {
    /// The line-item list after the operation.
    pub new_items: Vec<AuditLineItem>,
    /// The audit event recording this operation.
    pub audit_event: AuditEvent,
}
