// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Requirement derivation for the warehouse audit view.
//!
//! This module expands a project's declared requirements (per-shift
//! baselines plus ad-hoc manual entries) into the canonical, de-duplicated
//! list of audit line-items. Derivation is a view, not a cache: it is pure,
//! deterministic, and re-run on every read.

use crate::manual::ManualRequirement;
use crate::types::{AuditLineItem, ItemStatus, MaterialCategory, MaterialRequirement, Project};

/// Remarks attached to the sub-items of a GPS Lock manual requirement.
pub const REMARK_MANUAL_OVERRIDE: &str = "Manual Hardware Override";

/// Remarks attached to generic manual requirement line-items.
pub const REMARK_MANUAL_PROVISION: &str = "Manual Provision";

/// Derives the canonical audit line-item list for a project.
///
/// Output order is a display contract the warehouse view relies on:
/// manual requirements first (in declaration order, with GPS Lock bundles
/// expanding to four sub-items), then shifts in declaration order, then the
/// fixed category order within each shift.
///
/// Disabled categories contribute nothing. Enabled categories with zero
/// quantity are still emitted: a zero expectation is a valid, auditable
/// state. Every derived item starts with `received = 0` and
/// `status = Pending`; receipt counts are overlaid by the caller using the
/// stable item ids.
///
/// # Arguments
///
/// * `project` - The project to derive line-items for
#[must_use]
pub fn derive_line_items(project: &Project) -> Vec<AuditLineItem> {
    let mut items: Vec<AuditLineItem> = Vec::new();

    for requirement in &project.manual_requirements {
        match requirement {
            ManualRequirement::GpsLock {
                id,
                nomenclature,
                counts,
            } => {
                let base_id: String = format!("manual-{id}");
                let sub_items: [(&str, &str, u32); 4] = [
                    ("locks", "Locks", counts.locks),
                    ("rfid", "RFID", counts.rfid),
                    ("chargers", "Chargers", counts.chargers),
                    ("adapters", "Adapters", counts.adapters),
                ];

                for (suffix, sub_label, expected) in sub_items {
                    items.push(AuditLineItem {
                        id: format!("{base_id}-{suffix}"),
                        label: format!("[MANUAL] {nomenclature} ({sub_label})"),
                        expected,
                        received: 0,
                        status: ItemStatus::Pending,
                        remarks: String::from(REMARK_MANUAL_OVERRIDE),
                    });
                }
            }
            ManualRequirement::Generic {
                id,
                material_type,
                nomenclature,
                quantity,
            } => {
                items.push(AuditLineItem {
                    id: format!("manual-{id}"),
                    label: format!("[MANUAL] {nomenclature} ({})", material_type.as_str()),
                    expected: *quantity,
                    received: 0,
                    status: ItemStatus::Pending,
                    remarks: String::from(REMARK_MANUAL_PROVISION),
                });
            }
        }
    }

    for shift in &project.shifts {
        for category in MaterialCategory::ALL {
            let requirement: &MaterialRequirement = shift.requirement(category);
            if requirement.enabled {
                items.push(AuditLineItem {
                    id: format!("{}-{}", shift.id, category.id_suffix()),
                    label: format!(
                        "{}: {} ({})",
                        shift.shift_name,
                        requirement.nomenclature,
                        category.label()
                    ),
                    expected: requirement.quantity,
                    received: 0,
                    status: ItemStatus::Pending,
                    remarks: String::from(category.remarks()),
                });
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manual::{GenericMaterialType, GpsLockCounts};
    use crate::types::ShiftInventory;

    fn make_project() -> Project {
        Project::new(
            String::from("p-1"),
            String::from("National Placement Exam"),
            String::from("Acme Assessments"),
            String::from("EX99"),
            String::from("pass-1234"),
            String::from("admin-1234"),
        )
    }

    fn make_shift(id: &str, name: &str) -> ShiftInventory {
        ShiftInventory::new(String::from(id), String::from(name))
    }

    #[test]
    fn test_empty_project_derives_no_items() {
        let project: Project = make_project();

        assert!(derive_line_items(&project).is_empty());
    }

    #[test]
    fn test_single_enabled_category_derives_one_item() {
        let mut project: Project = make_project();
        let mut shift: ShiftInventory = make_shift("s-1", "Shift 1");
        shift.set_enabled(MaterialCategory::GpsLocks, true);
        shift.set_quantity(MaterialCategory::GpsLocks, 2250);
        shift.set_nomenclature(MaterialCategory::GpsLocks, "SmartLock v3");
        project.shifts.push(shift);

        let items: Vec<AuditLineItem> = derive_line_items(&project);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "s-1-gps");
        assert_eq!(items[0].label, "Shift 1: SmartLock v3 (GPS Locks)");
        assert_eq!(items[0].expected, 2250);
        assert_eq!(items[0].received, 0);
        assert_eq!(items[0].status, ItemStatus::Pending);
        assert_eq!(items[0].remarks, "Project Baseline");
    }

    #[test]
    fn test_disabled_categories_contribute_nothing() {
        let mut project: Project = make_project();
        project.shifts.push(make_shift("s-1", "Shift 1"));

        assert!(derive_line_items(&project).is_empty());
    }

    #[test]
    fn test_enabled_zero_quantity_category_is_emitted() {
        let mut project: Project = make_project();
        let mut shift: ShiftInventory = make_shift("s-1", "Shift 1");
        shift.set_enabled(MaterialCategory::Chargers, true);
        project.shifts.push(shift);

        let items: Vec<AuditLineItem> = derive_line_items(&project);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].expected, 0);
        assert_eq!(items[0].status, ItemStatus::Pending);
    }

    #[test]
    fn test_gps_lock_manual_requirement_expands_to_four_items() {
        let mut project: Project = make_project();
        project
            .manual_requirements
            .push(ManualRequirement::GpsLock {
                id: String::from("m-1"),
                nomenclature: String::from("SmartLock v3"),
                counts: GpsLockCounts::new(10, 5, 3, 3),
            });

        let items: Vec<AuditLineItem> = derive_line_items(&project);

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].id, "manual-m-1-locks");
        assert_eq!(items[0].label, "[MANUAL] SmartLock v3 (Locks)");
        assert_eq!(items[0].expected, 10);
        assert_eq!(items[1].id, "manual-m-1-rfid");
        assert_eq!(items[1].expected, 5);
        assert_eq!(items[2].id, "manual-m-1-chargers");
        assert_eq!(items[2].expected, 3);
        assert_eq!(items[3].id, "manual-m-1-adapters");
        assert_eq!(items[3].expected, 3);

        let sub_total: u32 = items.iter().map(|item| item.expected).sum();
        assert_eq!(sub_total, 21);

        for item in &items {
            assert_eq!(item.remarks, REMARK_MANUAL_OVERRIDE);
        }
    }

    #[test]
    fn test_generic_manual_requirement_derives_one_item() {
        let mut project: Project = make_project();
        project.manual_requirements.push(ManualRequirement::generic(
            String::from("m-2"),
            GenericMaterialType::Trunks,
            String::from("Steel Trunk"),
            12,
        ));

        let items: Vec<AuditLineItem> = derive_line_items(&project);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "manual-m-2");
        assert_eq!(items[0].label, "[MANUAL] Steel Trunk (Trunks)");
        assert_eq!(items[0].expected, 12);
        assert_eq!(items[0].remarks, REMARK_MANUAL_PROVISION);
    }

    #[test]
    fn test_empty_nomenclature_degrades_gracefully() {
        let mut project: Project = make_project();
        project.manual_requirements.push(ManualRequirement::generic(
            String::from("m-3"),
            GenericMaterialType::Other,
            String::new(),
            7,
        ));

        let items: Vec<AuditLineItem> = derive_line_items(&project);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "[MANUAL]  (Other)");
    }

    #[test]
    fn test_output_order_is_manual_first_then_shifts_in_category_order() {
        let mut project: Project = make_project();
        project.manual_requirements.push(ManualRequirement::generic(
            String::from("m-1"),
            GenericMaterialType::Cables,
            String::from("HDMI bundle"),
            4,
        ));

        let mut first: ShiftInventory = make_shift("s-1", "Morning");
        first.set_enabled(MaterialCategory::RfidUnique, true);
        first.set_enabled(MaterialCategory::GpsLocks, true);
        project.shifts.push(first);

        let mut second: ShiftInventory = make_shift("s-2", "Evening");
        second.set_enabled(MaterialCategory::Adaptors, true);
        project.shifts.push(second);

        let items: Vec<AuditLineItem> = derive_line_items(&project);
        let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();

        assert_eq!(ids, vec!["manual-m-1", "s-1-gps", "s-1-rfidU", "s-2-adaptors"]);
    }

    #[test]
    fn test_rfid_categories_use_security_protocol_remarks() {
        let mut project: Project = make_project();
        let mut shift: ShiftInventory = make_shift("s-1", "Shift 1");
        shift.set_enabled(MaterialCategory::RfidMaster, true);
        shift.set_nomenclature(MaterialCategory::RfidMaster, "Master Card");
        shift.set_enabled(MaterialCategory::RfidUnique, true);
        shift.set_nomenclature(MaterialCategory::RfidUnique, "Unique Tag");
        project.shifts.push(shift);

        let items: Vec<AuditLineItem> = derive_line_items(&project);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "s-1-rfidM");
        assert_eq!(items[0].label, "Shift 1: Master Card (Master RFID)");
        assert_eq!(items[0].remarks, "Security Protocol");
        assert_eq!(items[1].id, "s-1-rfidU");
        assert_eq!(items[1].label, "Shift 1: Unique Tag (Unique Tags)");
        assert_eq!(items[1].remarks, "Security Protocol");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let mut project: Project = make_project();
        project
            .manual_requirements
            .push(ManualRequirement::GpsLock {
                id: String::from("m-1"),
                nomenclature: String::from("SmartLock v3"),
                counts: GpsLockCounts::new(10, 5, 3, 3),
            });
        let mut shift: ShiftInventory = make_shift("s-1", "Shift 1");
        shift.set_enabled(MaterialCategory::GpsLocks, true);
        shift.set_quantity(MaterialCategory::GpsLocks, 100);
        project.shifts.push(shift);

        let first: Vec<AuditLineItem> = derive_line_items(&project);
        let second: Vec<AuditLineItem> = derive_line_items(&project);

        assert_eq!(first, second);
    }

    #[test]
    fn test_derivation_does_not_mutate_the_project() {
        let mut project: Project = make_project();
        let mut shift: ShiftInventory = make_shift("s-1", "Shift 1");
        shift.set_enabled(MaterialCategory::GpsLocks, true);
        shift.set_quantity(MaterialCategory::GpsLocks, 100);
        project.shifts.push(shift);

        let snapshot: Project = project.clone();
        let _items: Vec<AuditLineItem> = derive_line_items(&project);

        assert_eq!(project, snapshot);
    }
}
