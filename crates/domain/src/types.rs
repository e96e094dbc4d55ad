// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::manual::ManualRequirement;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Time;
use time::macros::time;

/// Fulfillment status of a reconciliation row.
///
/// Used both for individual audit line-items (warehouse receiving) and for
/// return batches (reverse logistics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemStatus {
    /// Nothing received or initiated yet.
    #[default]
    Pending,
    /// Partially fulfilled.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Fully fulfilled (over-receipt counts as completed for line-items).
    Completed,
    /// Counts deviate from what was committed.
    Mismatch,
}

impl FromStr for ItemStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            "Mismatch" => Ok(Self::Mismatch),
            _ => Err(DomainError::InvalidItemStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ItemStatus {
    /// Converts this status to its display string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Mismatch => "Mismatch",
        }
    }
}

/// Represents the lifecycle stage of a project.
///
/// Explicit lifecycle states govern which workflow views are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    /// Requirements definition in progress.
    #[default]
    Requirements,
    /// Warehouse receipt and audit underway.
    Warehouse,
    /// Hardware dispatch to centers underway.
    Dispatch,
    /// Hardware deployed at exam centers.
    Centers,
    /// Exam execution window.
    Exam,
    /// Post-exam reporting.
    Reports,
    /// Reverse logistics (returns) underway.
    Returns,
}

impl FromStr for ProjectStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Requirements" => Ok(Self::Requirements),
            "Warehouse" => Ok(Self::Warehouse),
            "Dispatch" => Ok(Self::Dispatch),
            "Centers" => Ok(Self::Centers),
            "Exam" => Ok(Self::Exam),
            "Reports" => Ok(Self::Reports),
            "Returns" => Ok(Self::Returns),
            _ => Err(DomainError::InvalidProjectStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ProjectStatus {
    /// Converts this status to its display string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requirements => "Requirements",
            Self::Warehouse => "Warehouse",
            Self::Dispatch => "Dispatch",
            Self::Centers => "Centers",
            Self::Exam => "Exam",
            Self::Reports => "Reports",
            Self::Returns => "Returns",
        }
    }

    /// Checks if a transition from this stage to another is valid.
    ///
    /// The project lifecycle only moves forward:
    /// Requirements → Warehouse → Dispatch → Centers → Exam → Reports → Returns
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Requirements, Self::Warehouse)
                | (Self::Warehouse, Self::Dispatch)
                | (Self::Dispatch, Self::Centers)
                | (Self::Centers, Self::Exam)
                | (Self::Exam, Self::Reports)
                | (Self::Reports, Self::Returns)
        )
    }
}

/// One hardware category requirement within a shift.
///
/// Owned exclusively by its parent [`ShiftInventory`]; mutated only through
/// the shift's per-category update operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    /// Whether this category is part of the shift's baseline.
    pub enabled: bool,
    /// Expected unit count. An enabled category with zero quantity is a
    /// valid, auditable state.
    pub quantity: u32,
    /// Free-text hardware nomenclature (e.g., "SmartLock v3").
    pub nomenclature: String,
}

impl MaterialRequirement {
    /// Creates a disabled requirement with zero quantity.
    ///
    /// This is the state every category starts in when a shift is added.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            quantity: 0,
            nomenclature: String::new(),
        }
    }

    /// Creates an enabled requirement.
    ///
    /// # Arguments
    ///
    /// * `quantity` - Expected unit count
    /// * `nomenclature` - Hardware nomenclature
    #[must_use]
    pub const fn enabled(quantity: u32, nomenclature: String) -> Self {
        Self {
            enabled: true,
            quantity,
            nomenclature,
        }
    }
}

impl Default for MaterialRequirement {
    fn default() -> Self {
        Self::disabled()
    }
}

/// The closed set of per-shift hardware categories.
///
/// The variant order is a display contract: derivation emits categories in
/// exactly this order for every shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialCategory {
    /// GPS seal locks.
    GpsLocks,
    /// Rapid chargers.
    Chargers,
    /// IO adaptors.
    Adaptors,
    /// Master RFID cards.
    RfidMaster,
    /// Unique RFID tags.
    RfidUnique,
}

impl MaterialCategory {
    /// All categories in the fixed derivation order.
    pub const ALL: [Self; 5] = [
        Self::GpsLocks,
        Self::Chargers,
        Self::Adaptors,
        Self::RfidMaster,
        Self::RfidUnique,
    ];

    /// Returns the display label used in audit line-item labels.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::GpsLocks => "GPS Locks",
            Self::Chargers => "Rapid Chargers",
            Self::Adaptors => "IO Adaptors",
            Self::RfidMaster => "Master RFID",
            Self::RfidUnique => "Unique Tags",
        }
    }

    /// Returns the stable line-item id suffix for this category.
    ///
    /// Suffixes are part of the line-item id contract: a receiving officer's
    /// saved counts are re-associated by id after every re-derivation.
    #[must_use]
    pub const fn id_suffix(&self) -> &'static str {
        match self {
            Self::GpsLocks => "gps",
            Self::Chargers => "chargers",
            Self::Adaptors => "adaptors",
            Self::RfidMaster => "rfidM",
            Self::RfidUnique => "rfidU",
        }
    }

    /// Returns the remarks classification for line-items of this category.
    #[must_use]
    pub const fn remarks(&self) -> &'static str {
        match self {
            Self::GpsLocks | Self::Chargers | Self::Adaptors => "Project Baseline",
            Self::RfidMaster | Self::RfidUnique => "Security Protocol",
        }
    }
}

/// A named operational time window with its own hardware baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInventory {
    /// Unique identifier within the project.
    pub id: String,
    /// Display name (e.g., "Shift 1").
    pub shift_name: String,
    /// Shift start time-of-day.
    pub start_time: Time,
    /// Shift end time-of-day.
    pub end_time: Time,
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

impl ShiftInventory {
    /// Creates a new shift with the standard defaults: a 09:00–12:00 window
    /// and all five categories disabled.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier within the project
    /// * `shift_name` - Display name
    #[must_use]
    pub fn new(id: String, shift_name: String) -> Self {
        Self {
            id,
            shift_name,
            start_time: time!(09:00),
            end_time: time!(12:00),
            gps_locks: MaterialRequirement::disabled(),
            chargers: MaterialRequirement::disabled(),
            adaptors: MaterialRequirement::disabled(),
            rfid_master: MaterialRequirement::disabled(),
            rfid_unique: MaterialRequirement::disabled(),
        }
    }

    /// Returns the requirement for a category.
    #[must_use]
    pub const fn requirement(&self, category: MaterialCategory) -> &MaterialRequirement {
        match category {
            MaterialCategory::GpsLocks => &self.gps_locks,
            MaterialCategory::Chargers => &self.chargers,
            MaterialCategory::Adaptors => &self.adaptors,
            MaterialCategory::RfidMaster => &self.rfid_master,
            MaterialCategory::RfidUnique => &self.rfid_unique,
        }
    }

    const fn requirement_mut(&mut self, category: MaterialCategory) -> &mut MaterialRequirement {
        match category {
            MaterialCategory::GpsLocks => &mut self.gps_locks,
            MaterialCategory::Chargers => &mut self.chargers,
            MaterialCategory::Adaptors => &mut self.adaptors,
            MaterialCategory::RfidMaster => &mut self.rfid_master,
            MaterialCategory::RfidUnique => &mut self.rfid_unique,
        }
    }

    /// Enables or disables a category.
    pub const fn set_enabled(&mut self, category: MaterialCategory, enabled: bool) {
        self.requirement_mut(category).enabled = enabled;
    }

    /// Sets the expected quantity for a category.
    pub const fn set_quantity(&mut self, category: MaterialCategory, quantity: u32) {
        self.requirement_mut(category).quantity = quantity;
    }

    /// Sets the nomenclature for a category.
    pub fn set_nomenclature(&mut self, category: MaterialCategory, nomenclature: &str) {
        self.requirement_mut(category).nomenclature = nomenclature.to_string();
    }
}

/// The four-category quantity vector used throughout reconciliation.
///
/// Both RFID categories fold into the single `rfid` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CountTriad {
    /// GPS lock count.
    pub locks: u32,
    /// Rapid charger count.
    pub chargers: u32,
    /// IO adaptor count.
    pub adaptors: u32,
    /// Combined RFID count (master cards and unique tags).
    pub rfid: u32,
}

impl CountTriad {
    /// The all-zero vector.
    pub const ZERO: Self = Self {
        locks: 0,
        chargers: 0,
        adaptors: 0,
        rfid: 0,
    };

    /// Creates a new vector.
    #[must_use]
    pub const fn new(locks: u32, chargers: u32, adaptors: u32, rfid: u32) -> Self {
        Self {
            locks,
            chargers,
            adaptors,
            rfid,
        }
    }

    /// Component-wise sum of two vectors.
    #[must_use]
    pub const fn add(self, other: Self) -> Self {
        Self {
            locks: self.locks + other.locks,
            chargers: self.chargers + other.chargers,
            adaptors: self.adaptors + other.adaptors,
            rfid: self.rfid + other.rfid,
        }
    }

    /// Total units across all four buckets.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.locks + self.chargers + self.adaptors + self.rfid
    }
}

/// One row of expected-vs-received hardware to reconcile.
///
/// Line-items are derived from the project on every read and never persisted
/// as source-of-truth. The `id` is deterministic and stable for the same
/// source field so in-progress receipt entries survive re-derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLineItem {
    /// Stable identifier derived from the source field.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Expected unit count.
    pub expected: u32,
    /// Received unit count.
    pub received: u32,
    /// Fulfillment status.
    pub status: ItemStatus,
    /// Provenance remarks (e.g., "Project Baseline").
    pub remarks: String,
}

/// The project aggregate root.
///
/// Projects are mutated wholesale (replace-on-save) by the requirements
/// collaborator; the derivation and aggregation engines only ever read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Opaque project identifier.
    pub id: String,
    /// Project display name.
    pub name: String,
    /// Client organization name.
    pub client: String,
    /// Short project code (e.g., "EX99"). Unique across the registry.
    pub code: String,
    /// Exam date (ISO 8601 date string, informational).
    pub exam_date: String,
    /// Lifecycle stage.
    pub status: ProjectStatus,
    /// Number of exam centers (informational).
    pub total_centers: u32,
    /// Headline lock count (informational).
    pub total_locks: u32,
    /// Per-shift baselines, in declaration order.
    pub shifts: Vec<ShiftInventory>,
    /// Ad-hoc requirements, in declaration order.
    pub manual_requirements: Vec<ManualRequirement>,
    /// Attached requirement document filenames (opaque pass-through).
    pub requirement_documents: Vec<String>,
    /// Passcode for non-admin roles.
    pub project_passcode: String,
    /// Passcode for the admin role.
    pub admin_passcode: String,
}

impl Project {
    /// Creates a new project in the Requirements stage with no shifts or
    /// manual requirements.
    ///
    /// # Arguments
    ///
    /// * `id` - Opaque project identifier
    /// * `name` - Project display name
    /// * `client` - Client organization name
    /// * `code` - Short project code
    /// * `project_passcode` - Passcode for non-admin roles
    /// * `admin_passcode` - Passcode for the admin role
    #[must_use]
    pub const fn new(
        id: String,
        name: String,
        client: String,
        code: String,
        project_passcode: String,
        admin_passcode: String,
    ) -> Self {
        Self {
            id,
            name,
            client,
            code,
            exam_date: String::new(),
            status: ProjectStatus::Requirements,
            total_centers: 0,
            total_locks: 0,
            shifts: Vec::new(),
            manual_requirements: Vec::new(),
            requirement_documents: Vec::new(),
            project_passcode,
            admin_passcode,
        }
    }
}

/// Parses a time-of-day from an `HH:MM` string.
///
/// # Arguments
///
/// * `value` - The time string (e.g., "09:00")
///
/// # Errors
///
/// Returns `DomainError::TimeParseError` if the string is not a valid
/// `HH:MM` time.
pub fn parse_time_of_day(value: &str) -> Result<Time, DomainError> {
    let format = time::macros::format_description!("[hour]:[minute]");

    Time::parse(value, &format).map_err(|e| DomainError::TimeParseError {
        value: value.to_string(),
        error: e.to_string(),
    })
}
