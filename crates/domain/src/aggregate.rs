// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-category aggregation across all requirements of a project.
//!
//! The resulting totals are the expected baseline for reverse-logistics
//! return batches.

use crate::manual::ManualRequirement;
use crate::types::{CountTriad, Project};

/// Sums all enabled shift categories and all manual requirements into the
/// four reconciliation buckets.
///
/// Mapping rules:
/// - `gps_locks` → `locks`; `chargers` → `chargers`; `adaptors` →
///   `adaptors`; both RFID categories → `rfid`.
/// - GPS Lock manual requirements contribute their four-way breakdown
///   (`adapters` feeds the `adaptors` bucket).
/// - Generic manual requirements count toward `locks` only when their
///   nomenclature contains "lock" (case-insensitive); other generic
///   quantities are not attributed to any bucket.
///
/// Aggregation is additive across shifts and never fails; a project with no
/// requirements yields the zero vector.
///
/// # Arguments
///
/// * `project` - The project to aggregate
#[must_use]
pub fn aggregate_totals(project: &Project) -> CountTriad {
    let mut totals: CountTriad = CountTriad::ZERO;

    for shift in &project.shifts {
        if shift.gps_locks.enabled {
            totals.locks += shift.gps_locks.quantity;
        }
        if shift.chargers.enabled {
            totals.chargers += shift.chargers.quantity;
        }
        if shift.adaptors.enabled {
            totals.adaptors += shift.adaptors.quantity;
        }
        if shift.rfid_master.enabled {
            totals.rfid += shift.rfid_master.quantity;
        }
        if shift.rfid_unique.enabled {
            totals.rfid += shift.rfid_unique.quantity;
        }
    }

    for requirement in &project.manual_requirements {
        match requirement {
            ManualRequirement::GpsLock { counts, .. } => {
                totals.locks += counts.locks;
                totals.rfid += counts.rfid;
                totals.chargers += counts.chargers;
                totals.adaptors += counts.adapters;
            }
            ManualRequirement::Generic {
                nomenclature,
                quantity,
                ..
            } => {
                if nomenclature.to_lowercase().contains("lock") {
                    totals.locks += quantity;
                }
            }
        }
    }

    totals
}
