// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change.
/// This could be a logistics operator, a client contact, or a warehouse
/// receiving officer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "admin", "ops", "client", "warehouse").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a state change was initiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
///
/// An action describes what state change occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`InitiateReturn`", "`RecordReceipt`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of system state at a point in time.
///
/// Snapshots are intentionally compact string summaries (e.g.,
/// `"batch=RET-EX99-BULK,step=pickup,status=Pending"`). They exist so a
/// reviewer can read an audit trail without replaying it, not to
/// reconstruct state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The state before the transition (before)
/// - The state after the transition (after)
/// - The project the transition was scoped to, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// The project code this event is scoped to.
    /// `None` for global events (e.g., project registry operations).
    pub project_code: Option<String>,
}

impl AuditEvent {
    /// Creates a new `AuditEvent` scoped to a project.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `project_code` - The project this event belongs to
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        project_code: String,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            project_code: Some(project_code),
        }
    }

    /// Creates a new global `AuditEvent` not scoped to any project.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new_global(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            project_code: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("WAREHOUSE_MGR"), String::from("warehouse"));

        assert_eq!(actor.id, "WAREHOUSE_MGR");
        assert_eq!(actor.actor_type, "warehouse");
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("req-456"), String::from("Receipt entry"));

        assert_eq!(cause.id, "req-456");
        assert_eq!(cause.description, "Receipt entry");
    }

    #[test]
    fn test_action_creation_requires_name() {
        let action: Action = Action::new(String::from("InitiateReturn"), None);

        assert_eq!(action.name, "InitiateReturn");
        assert_eq!(action.details, None);
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("RecordReceipt"),
            Some(String::from("Received 100 units")),
        );

        assert_eq!(action.name, "RecordReceipt");
        assert_eq!(action.details, Some(String::from("Received 100 units")));
    }

    #[test]
    fn test_state_snapshot_creation() {
        let snapshot: StateSnapshot = StateSnapshot::new(String::from("items_count=4"));

        assert_eq!(snapshot.data, "items_count=4");
    }

    #[test]
    fn test_audit_event_scoped_to_project() {
        let actor: Actor = Actor::new(String::from("CL-01"), String::from("client"));
        let cause: Cause = Cause::new(String::from("req-9"), String::from("Client request"));
        let action: Action = Action::new(String::from("InitiateReturn"), None);
        let before: StateSnapshot = StateSnapshot::new(String::from("step=initiation"));
        let after: StateSnapshot = StateSnapshot::new(String::from("step=pickup"));

        let event: AuditEvent = AuditEvent::new(
            actor.clone(),
            cause.clone(),
            action.clone(),
            before.clone(),
            after.clone(),
            String::from("EX99"),
        );

        assert_eq!(event.actor, actor);
        assert_eq!(event.cause, cause);
        assert_eq!(event.action, action);
        assert_eq!(event.before, before);
        assert_eq!(event.after, after);
        assert_eq!(event.project_code, Some(String::from("EX99")));
    }

    #[test]
    fn test_global_audit_event_has_no_project_scope() {
        let actor: Actor = Actor::new(String::from("ADMIN_ROOT"), String::from("admin"));
        let cause: Cause = Cause::new(String::from("req-1"), String::from("Project setup"));
        let action: Action = Action::new(String::from("CreateProject"), None);
        let before: StateSnapshot = StateSnapshot::new(String::from("projects_count=0"));
        let after: StateSnapshot = StateSnapshot::new(String::from("projects_count=1"));

        let event: AuditEvent = AuditEvent::new_global(actor, cause, action, before, after);

        assert_eq!(event.project_code, None);
    }

    #[test]
    fn test_audit_event_equality() {
        let actor: Actor = Actor::new(String::from("OPS-7"), String::from("ops"));
        let cause: Cause = Cause::new(String::from("req-2"), String::from("Ops request"));
        let action: Action = Action::new(String::from("FinalizeAudit"), None);
        let before: StateSnapshot = StateSnapshot::new(String::from("before-state"));
        let after: StateSnapshot = StateSnapshot::new(String::from("after-state"));

        let event1: AuditEvent = AuditEvent::new(
            actor.clone(),
            cause.clone(),
            action.clone(),
            before.clone(),
            after.clone(),
            String::from("EX99"),
        );

        let event2: AuditEvent =
            AuditEvent::new(actor, cause, action, before, after, String::from("EX99"));

        assert_eq!(event1, event2);
    }
}
