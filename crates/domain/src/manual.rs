// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ad-hoc (manual) material requirements.
//!
//! A manual requirement is either a GPS Lock bundle, which carries a
//! four-way hardware breakdown, or a generic catalog item with a single
//! quantity. The split is a tagged variant: sub-counts cannot exist on a
//! non-GPS requirement.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// The catalog label of the GPS Lock requirement type.
pub const GPS_LOCK_TYPE_LABEL: &str = "GPS Lock";

/// Per-hardware breakdown of a GPS Lock manual requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GpsLockCounts {
    /// GPS lock units.
    pub locks: u32,
    /// RFID card units.
    pub rfid: u32,
    /// Charger units.
    pub chargers: u32,
    /// Adapter units.
    pub adapters: u32,
}

impl GpsLockCounts {
    /// The all-zero breakdown every GPS Lock requirement starts with.
    pub const ZERO: Self = Self {
        locks: 0,
        rfid: 0,
        chargers: 0,
        adapters: 0,
    };

    /// Creates a new breakdown.
    #[must_use]
    pub const fn new(locks: u32, rfid: u32, chargers: u32, adapters: u32) -> Self {
        Self {
            locks,
            rfid,
            chargers,
            adapters,
        }
    }
}

/// Material types available for generic (non-GPS) manual requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenericMaterialType {
    /// Transport trunks.
    Trunks,
    /// Stationary supplies.
    Stationary,
    /// Cabling.
    Cables,
    /// Packaging material.
    Packaging,
    /// Anything else.
    Other,
}

impl GenericMaterialType {
    /// Parses a material type from its catalog label.
    ///
    /// Note that "GPS Lock" is deliberately not parseable here: GPS Lock
    /// requirements are a distinct variant of [`ManualRequirement`].
    ///
    /// # Errors
    ///
    /// Returns an error if the label does not match a generic catalog entry.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Trunks" => Ok(Self::Trunks),
            "Stationary" => Ok(Self::Stationary),
            "Cables" => Ok(Self::Cables),
            "Packaging" => Ok(Self::Packaging),
            "Other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidMaterialType(s.to_string())),
        }
    }

    /// Returns the catalog label of this material type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trunks => "Trunks",
            Self::Stationary => "Stationary",
            Self::Cables => "Cables",
            Self::Packaging => "Packaging",
            Self::Other => "Other",
        }
    }
}

/// An ad-hoc hardware need declared outside the shift-baseline structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ManualRequirement {
    /// A GPS Lock bundle with its four-way hardware breakdown.
    GpsLock {
        /// Unique identifier within the project.
        id: String,
        /// Free-text hardware nomenclature.
        nomenclature: String,
        /// The four-way breakdown (locks, rfid, chargers, adapters).
        counts: GpsLockCounts,
    },
    /// A single-quantity catalog item.
    Generic {
        /// Unique identifier within the project.
        id: String,
        /// The catalog material type.
        material_type: GenericMaterialType,
        /// Free-text hardware nomenclature.
        nomenclature: String,
        /// Expected unit count.
        quantity: u32,
    },
}

impl ManualRequirement {
    /// Creates a new GPS Lock requirement with a zeroed breakdown.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier within the project
    /// * `nomenclature` - Free-text hardware nomenclature
    #[must_use]
    pub const fn gps_lock(id: String, nomenclature: String) -> Self {
        Self::GpsLock {
            id,
            nomenclature,
            counts: GpsLockCounts::ZERO,
        }
    }

    /// Creates a new generic requirement.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier within the project
    /// * `material_type` - The catalog material type
    /// * `nomenclature` - Free-text hardware nomenclature
    /// * `quantity` - Expected unit count
    #[must_use]
    pub const fn generic(
        id: String,
        material_type: GenericMaterialType,
        nomenclature: String,
        quantity: u32,
    ) -> Self {
        Self::Generic {
            id,
            material_type,
            nomenclature,
            quantity,
        }
    }

    /// Returns the requirement's identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::GpsLock { id, .. } | Self::Generic { id, .. } => id,
        }
    }

    /// Returns the requirement's nomenclature.
    #[must_use]
    pub fn nomenclature(&self) -> &str {
        match self {
            Self::GpsLock { nomenclature, .. } | Self::Generic { nomenclature, .. } => nomenclature,
        }
    }

    /// Returns the catalog label of the requirement's type.
    #[must_use]
    pub const fn type_label(&self) -> &'static str {
        match self {
            Self::GpsLock { .. } => GPS_LOCK_TYPE_LABEL,
            Self::Generic { material_type, .. } => material_type.as_str(),
        }
    }

    /// Converts this requirement into the GPS Lock variant.
    ///
    /// All four sub-quantities restart at zero, regardless of what the
    /// requirement held before. Converting a GPS Lock requirement is a
    /// no-op that preserves its existing breakdown.
    #[must_use]
    pub fn into_gps_lock(self) -> Self {
        match self {
            Self::GpsLock { .. } => self,
            Self::Generic {
                id, nomenclature, ..
            } => Self::GpsLock {
                id,
                nomenclature,
                counts: GpsLockCounts::ZERO,
            },
        }
    }

    /// Converts this requirement into a generic variant of the given type.
    ///
    /// The GPS breakdown (if any) is dropped and the quantity restarts at
    /// zero. Converting a generic requirement changes only its type.
    #[must_use]
    pub fn into_generic(self, material_type: GenericMaterialType) -> Self {
        match self {
            Self::GpsLock {
                id, nomenclature, ..
            } => Self::Generic {
                id,
                material_type,
                nomenclature,
                quantity: 0,
            },
            Self::Generic {
                id,
                nomenclature,
                quantity,
                ..
            } => Self::Generic {
                id,
                material_type,
                nomenclature,
                quantity,
            },
        }
    }
}
