// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor roles and the passcode authentication stub.
//!
//! Real identity management is out of scope for this system: operators log
//! in with a role and the project's passcode, and everything downstream
//! assumes its caller has already been authenticated here.

use iil_kit_audit::Actor;
use iil_kit_domain::Project;

/// Actor roles for authorization.
///
/// Roles determine which workflow operations an authenticated actor may
/// perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// System administrators with full authority over every workflow.
    Admin,
    /// IIL operations staff: requirements entry, master data, logistics.
    Ops,
    /// Client contacts: return initiation and confirmations.
    Client,
    /// Warehouse staff: receipt recording and return verification.
    Warehouse,
}

impl Role {
    /// Parses a role from its display string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a known role.
    pub fn parse(s: &str) -> Result<Self, AuthError> {
        match s {
            "Admin" => Ok(Self::Admin),
            "IIL Operations" => Ok(Self::Ops),
            "Client" => Ok(Self::Client),
            "Warehouse" => Ok(Self::Warehouse),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role: {s}"),
            }),
        }
    }

    /// Returns the display string of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Ops => "IIL Operations",
            Self::Client => "Client",
            Self::Warehouse => "Warehouse",
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions to the
    /// authenticated operator.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: String = match self.role {
            Role::Admin => String::from("admin"),
            Role::Ops => String::from("ops"),
            Role::Client => String::from("client"),
            Role::Warehouse => String::from("warehouse"),
        };
        Actor::new(self.id.clone(), actor_type)
    }
}

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The roles permitted to perform this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Authenticates an actor against a project's passcodes.
///
/// The Admin role authenticates against the project's admin passcode; every
/// other role authenticates against the shared project passcode.
///
/// # Arguments
///
/// * `project` - The project to authenticate against
/// * `role` - The role the actor is claiming
/// * `actor_id` - The identifier of the actor
/// * `passcode` - The passcode presented by the actor
///
/// # Returns
///
/// An authenticated actor if the passcode matches.
///
/// # Errors
///
/// Returns an error if the actor id is empty or the passcode does not
/// match.
pub fn authenticate(
    project: &Project,
    role: Role,
    actor_id: &str,
    passcode: &str,
) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }

    let expected_passcode: &str = match role {
        Role::Admin => &project.admin_passcode,
        Role::Ops | Role::Client | Role::Warehouse => &project.project_passcode,
    };

    if passcode != expected_passcode {
        return Err(AuthError::AuthenticationFailed {
            reason: format!("Invalid passcode for project {}", project.code),
        });
    }

    Ok(AuthenticatedActor::new(actor_id.to_string(), role))
}
