// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the IIL Exam Kit Tracking System.
//!
//! This crate stores the thin collaborators around the reconciliation
//! engine: the project registry (replace-on-save JSON documents), warehouse
//! receipt counts keyed by stable line-item id, return batch documents, and
//! the audit event trail. It is built on Diesel with the `SQLite` backend.
//!
//! ## Storage model
//!
//! Projects and return batches are mutated wholesale by their collaborators,
//! so both are stored as whole JSON documents keyed by their business code.
//! Receipt counts are stored as individual rows keyed by
//! `(project, line_item_id)`: line-item lists are re-derived on every read,
//! and the stable ids are what re-associate saved counts with fresh
//! derivations.
//!
//! ## Testing
//!
//! Standard tests run against unique in-memory `SQLite` databases. Each
//! `new_in_memory()` call receives a sequential database name from an atomic
//! counter, ensuring deterministic test isolation without time-based
//! collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod data_models;
mod diesel_schema;
mod error;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::ReceiptRecord;
pub use error::PersistenceError;

use diesel::prelude::*;
use diesel::SqliteConnection;
use iil_kit::{BatchTransition, ReceiptTransition, ReturnBatch};
use iil_kit_audit::AuditEvent;
use iil_kit_domain::Project;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use data_models::{ActionData, ActorData, AuditEventRow, CauseData, StateSnapshotData};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

fn lookup_project_id(conn: &mut SqliteConnection, code: &str) -> Result<i64, PersistenceError> {
    use diesel_schema::projects;

    projects::table
        .filter(projects::code.eq(code))
        .select(projects::project_id)
        .first::<i64>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::ProjectNotFound(code.to_string()))
}

fn upsert_project_row(conn: &mut SqliteConnection, project: &Project) -> Result<(), PersistenceError> {
    use diesel_schema::projects;

    let document: String = serde_json::to_string(project)?;

    diesel::insert_into(projects::table)
        .values((
            projects::code.eq(&project.code),
            projects::document_json.eq(&document),
        ))
        .on_conflict(projects::code)
        .do_update()
        .set(projects::document_json.eq(&document))
        .execute(conn)?;

    Ok(())
}

fn upsert_receipt_row(
    conn: &mut SqliteConnection,
    project_id: i64,
    line_item_id: &str,
    received: u32,
    recorded_by: &str,
) -> Result<(), PersistenceError> {
    use diesel_schema::receipts;

    let received_value: i64 = i64::from(received);

    diesel::insert_into(receipts::table)
        .values((
            receipts::project_id.eq(project_id),
            receipts::line_item_id.eq(line_item_id),
            receipts::received.eq(received_value),
            receipts::recorded_by.eq(recorded_by),
        ))
        .on_conflict((receipts::project_id, receipts::line_item_id))
        .do_update()
        .set((
            receipts::received.eq(received_value),
            receipts::recorded_by.eq(recorded_by),
        ))
        .execute(conn)?;

    Ok(())
}

fn upsert_batch_row(conn: &mut SqliteConnection, batch: &ReturnBatch) -> Result<(), PersistenceError> {
    use diesel_schema::return_batches;

    let project_id: i64 = lookup_project_id(conn, &batch.project_code)?;
    let document: String = serde_json::to_string(batch)?;

    diesel::insert_into(return_batches::table)
        .values((
            return_batches::project_id.eq(project_id),
            return_batches::batch_code.eq(&batch.id),
            return_batches::document_json.eq(&document),
        ))
        .on_conflict(return_batches::batch_code)
        .do_update()
        .set(return_batches::document_json.eq(&document))
        .execute(conn)?;

    Ok(())
}

fn insert_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    use diesel_schema::audit_events;

    let actor_json: String = serde_json::to_string(&ActorData::from(&event.actor))?;
    let cause_json: String = serde_json::to_string(&CauseData::from(&event.cause))?;
    let action_json: String = serde_json::to_string(&ActionData::from(&event.action))?;
    let before_json: String = serde_json::to_string(&StateSnapshotData::from(&event.before))?;
    let after_json: String = serde_json::to_string(&StateSnapshotData::from(&event.after))?;

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::project_code.eq(event.project_code.as_deref()),
            audit_events::actor_json.eq(&actor_json),
            audit_events::cause_json.eq(&cause_json),
            audit_events::action_json.eq(&action_json),
            audit_events::before_snapshot_json.eq(&before_json),
            audit_events::after_snapshot_json.eq(&after_json),
        ))
        .execute(conn)?;

    let event_id: i64 = sqlite::get_last_insert_rowid(conn)?;
    debug!("Persisted audit event {} ({})", event_id, event.action.name);
    Ok(event_id)
}

fn event_from_row(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let (_event_id, project_code, actor_json, cause_json, action_json, before_json, after_json) =
        row;

    let actor: ActorData = serde_json::from_str(&actor_json)?;
    let cause: CauseData = serde_json::from_str(&cause_json)?;
    let action: ActionData = serde_json::from_str(&action_json)?;
    let before: StateSnapshotData = serde_json::from_str(&before_json)?;
    let after: StateSnapshotData = serde_json::from_str(&after_json)?;

    Ok(AuditEvent {
        actor: actor.into(),
        cause: cause.into(),
        action: action.into(),
        before: before.into(),
        after: after.into(),
        project_code,
    })
}

/// Persistence adapter over a `SQLite` database.
pub struct SqlitePersistence {
    conn: SqliteConnection,
}

impl SqlitePersistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("iil_kit_memdb_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Projects
    // ========================================================================

    /// Saves a project, replacing any existing document with the same code.
    ///
    /// Projects are replace-on-save aggregates: the whole document is
    /// written every time.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_project(&mut self, project: &Project) -> Result<(), PersistenceError> {
        upsert_project_row(&mut self.conn, project)
    }

    /// Loads a project by code.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if no project has the given code.
    pub fn get_project(&mut self, code: &str) -> Result<Project, PersistenceError> {
        use diesel_schema::projects;

        let document: String = projects::table
            .filter(projects::code.eq(code))
            .select(projects::document_json)
            .first::<String>(&mut self.conn)
            .optional()?
            .ok_or_else(|| PersistenceError::ProjectNotFound(code.to_string()))?;

        Ok(serde_json::from_str(&document)?)
    }

    /// Lists all projects in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or deserialization fails.
    pub fn list_projects(&mut self) -> Result<Vec<Project>, PersistenceError> {
        use diesel_schema::projects;

        let documents: Vec<String> = projects::table
            .order(projects::project_id.asc())
            .select(projects::document_json)
            .load::<String>(&mut self.conn)?;

        let mut result: Vec<Project> = Vec::with_capacity(documents.len());
        for document in documents {
            result.push(serde_json::from_str(&document)?);
        }
        Ok(result)
    }

    // ========================================================================
    // Warehouse receipts
    // ========================================================================

    /// Upserts a receipt count for one line-item of a project.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the project does not exist, or an error
    /// if the write fails.
    pub fn upsert_receipt(
        &mut self,
        project_code: &str,
        line_item_id: &str,
        received: u32,
        recorded_by: &str,
    ) -> Result<(), PersistenceError> {
        let project_id: i64 = lookup_project_id(&mut self.conn, project_code)?;
        upsert_receipt_row(
            &mut self.conn,
            project_id,
            line_item_id,
            received,
            recorded_by,
        )
    }

    /// Loads all recorded receipt counts for a project.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the project does not exist, or an error
    /// if the query fails.
    pub fn get_receipts(
        &mut self,
        project_code: &str,
    ) -> Result<Vec<ReceiptRecord>, PersistenceError> {
        use diesel_schema::receipts;

        let project_id: i64 = lookup_project_id(&mut self.conn, project_code)?;

        let rows: Vec<(String, i64, String)> = receipts::table
            .filter(receipts::project_id.eq(project_id))
            .order(receipts::receipt_id.asc())
            .select((
                receipts::line_item_id,
                receipts::received,
                receipts::recorded_by,
            ))
            .load::<(String, i64, String)>(&mut self.conn)?;

        Ok(rows
            .into_iter()
            .map(|(line_item_id, received, recorded_by)| ReceiptRecord {
                line_item_id,
                received: u32::try_from(received).unwrap_or(0),
                recorded_by,
            })
            .collect())
    }

    /// Persists a receipt transition: the receipt count and its audit event
    /// in one transaction.
    ///
    /// # Arguments
    ///
    /// * `project_code` - The project the receipt belongs to
    /// * `line_item_id` - The stable line-item id
    /// * `received` - The received unit count
    /// * `recorded_by` - The receiving officer
    /// * `transition` - The receipt transition produced by the core engine
    ///
    /// # Returns
    ///
    /// The event ID assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails; nothing is written in that
    /// case.
    pub fn persist_receipt_transition(
        &mut self,
        project_code: &str,
        line_item_id: &str,
        received: u32,
        recorded_by: &str,
        transition: &ReceiptTransition,
    ) -> Result<i64, PersistenceError> {
        self.conn
            .transaction::<i64, PersistenceError, _>(|conn| {
                let project_id: i64 = lookup_project_id(conn, project_code)?;
                upsert_receipt_row(conn, project_id, line_item_id, received, recorded_by)?;
                insert_audit_event(conn, &transition.audit_event)
            })
    }

    // ========================================================================
    // Return batches
    // ========================================================================

    /// Saves a return batch, replacing any existing document with the same
    /// batch code.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the batch's project does not exist, or
    /// an error if the write fails.
    pub fn save_return_batch(&mut self, batch: &ReturnBatch) -> Result<(), PersistenceError> {
        upsert_batch_row(&mut self.conn, batch)
    }

    /// Loads a return batch by its batch code.
    ///
    /// # Errors
    ///
    /// Returns `BatchNotFound` if no batch has the given code.
    pub fn get_return_batch(&mut self, batch_code: &str) -> Result<ReturnBatch, PersistenceError> {
        use diesel_schema::return_batches;

        let document: String = return_batches::table
            .filter(return_batches::batch_code.eq(batch_code))
            .select(return_batches::document_json)
            .first::<String>(&mut self.conn)
            .optional()?
            .ok_or_else(|| PersistenceError::BatchNotFound(batch_code.to_string()))?;

        Ok(serde_json::from_str(&document)?)
    }

    /// Lists all return batches of a project in creation order.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the project does not exist, or an error
    /// if the query fails.
    pub fn list_return_batches(
        &mut self,
        project_code: &str,
    ) -> Result<Vec<ReturnBatch>, PersistenceError> {
        use diesel_schema::return_batches;

        let project_id: i64 = lookup_project_id(&mut self.conn, project_code)?;

        let documents: Vec<String> = return_batches::table
            .filter(return_batches::project_id.eq(project_id))
            .order(return_batches::batch_id.asc())
            .select(return_batches::document_json)
            .load::<String>(&mut self.conn)?;

        let mut result: Vec<ReturnBatch> = Vec::with_capacity(documents.len());
        for document in documents {
            result.push(serde_json::from_str(&document)?);
        }
        Ok(result)
    }

    /// Persists a batch transition: the new batch document and its audit
    /// event in one transaction.
    ///
    /// # Arguments
    ///
    /// * `transition` - The transition produced by the core engine
    ///
    /// # Returns
    ///
    /// The event ID assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails; nothing is written in that
    /// case.
    pub fn persist_batch_transition(
        &mut self,
        transition: &BatchTransition,
    ) -> Result<i64, PersistenceError> {
        self.conn
            .transaction::<i64, PersistenceError, _>(|conn| {
                upsert_batch_row(conn, &transition.new_batch)?;
                insert_audit_event(conn, &transition.audit_event)
            })
    }

    // ========================================================================
    // Audit events
    // ========================================================================

    /// Persists an audit event.
    ///
    /// # Returns
    ///
    /// The event ID assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence or serialization fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        insert_audit_event(&mut self.conn, event)
    }

    /// Loads a single audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if no event has the given ID.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        use diesel_schema::audit_events;

        let row: AuditEventRow = audit_events::table
            .filter(audit_events::event_id.eq(event_id))
            .select((
                audit_events::event_id,
                audit_events::project_code,
                audit_events::actor_json,
                audit_events::cause_json,
                audit_events::action_json,
                audit_events::before_snapshot_json,
                audit_events::after_snapshot_json,
            ))
            .first::<AuditEventRow>(&mut self.conn)
            .optional()?
            .ok_or(PersistenceError::EventNotFound(event_id))?;

        event_from_row(row)
    }

    /// Loads the audit timeline for a project, oldest event first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or deserialization fails.
    pub fn get_audit_timeline(
        &mut self,
        project_code: &str,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        use diesel_schema::audit_events;

        let rows: Vec<AuditEventRow> = audit_events::table
            .filter(audit_events::project_code.eq(project_code))
            .order(audit_events::event_id.asc())
            .select((
                audit_events::event_id,
                audit_events::project_code,
                audit_events::actor_json,
                audit_events::cause_json,
                audit_events::action_json,
                audit_events::before_snapshot_json,
                audit_events::after_snapshot_json,
            ))
            .load::<AuditEventRow>(&mut self.conn)?;

        let mut result: Vec<AuditEvent> = Vec::with_capacity(rows.len());
        for row in rows {
            result.push(event_from_row(row)?);
        }
        Ok(result)
    }
}
