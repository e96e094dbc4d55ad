// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role capability matrix.
//!
//! Capabilities mirror the workflow surfaces: who may edit requirements,
//! who may record warehouse receipts, and who may drive the reverse
//! logistics steps.

use crate::auth::{AuthError, AuthenticatedActor, Role};

/// The closed set of privileged operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create projects and manage the registry.
    ManageProjects,
    /// Edit shift baselines and manual requirements.
    EditRequirements,
    /// Upload and preview center master data.
    UploadMasterData,
    /// View the warehouse audit table.
    ViewWarehouse,
    /// Record received counts and finalize the warehouse audit.
    RecordReceipts,
    /// Create return batches and acknowledge hub consolidation.
    InitiateReturn,
    /// Assign a carrier to a return batch.
    AssignCarrier,
    /// Verify warehouse receipt of a return batch.
    VerifyReturn,
}

impl Capability {
    /// Returns the action name used in authorization errors.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::ManageProjects => "ManageProjects",
            Self::EditRequirements => "EditRequirements",
            Self::UploadMasterData => "UploadMasterData",
            Self::ViewWarehouse => "ViewWarehouse",
            Self::RecordReceipts => "RecordReceipts",
            Self::InitiateReturn => "InitiateReturn",
            Self::AssignCarrier => "AssignCarrier",
            Self::VerifyReturn => "VerifyReturn",
        }
    }

    /// Returns a description of the roles permitted to use this capability.
    #[must_use]
    pub const fn required_roles(&self) -> &'static str {
        match self {
            Self::ManageProjects => "Admin",
            Self::EditRequirements | Self::UploadMasterData => "Admin or IIL Operations",
            Self::ViewWarehouse | Self::AssignCarrier | Self::VerifyReturn => {
                "Admin, IIL Operations or Warehouse"
            }
            Self::RecordReceipts => "Admin or Warehouse",
            Self::InitiateReturn => "Admin or Client",
        }
    }
}

impl Role {
    /// Checks whether this role grants a capability.
    #[must_use]
    pub const fn has_capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageProjects => matches!(self, Self::Admin),
            Capability::EditRequirements | Capability::UploadMasterData => {
                matches!(self, Self::Admin | Self::Ops)
            }
            Capability::ViewWarehouse
            | Capability::AssignCarrier
            | Capability::VerifyReturn => {
                matches!(self, Self::Admin | Self::Ops | Self::Warehouse)
            }
            Capability::RecordReceipts => matches!(self, Self::Admin | Self::Warehouse),
            Capability::InitiateReturn => matches!(self, Self::Admin | Self::Client),
        }
    }
}

/// Verifies that an actor holds a capability.
///
/// # Arguments
///
/// * `actor` - The authenticated actor
/// * `capability` - The capability the operation requires
///
/// # Errors
///
/// Returns `AuthError::Unauthorized` if the actor's role does not grant the
/// capability.
pub fn require_capability(
    actor: &AuthenticatedActor,
    capability: Capability,
) -> Result<(), AuthError> {
    if actor.role.has_capability(capability) {
        Ok(())
    } else {
        Err(AuthError::Unauthorized {
            action: String::from(capability.action_name()),
            required_role: String::from(capability.required_roles()),
        })
    }
}
