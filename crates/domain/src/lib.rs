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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod aggregate;
mod classify;
mod derive;
mod error;
mod manual;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use aggregate::aggregate_totals;
pub use classify::classify_receipt;
pub use derive::{REMARK_MANUAL_OVERRIDE, REMARK_MANUAL_PROVISION, derive_line_items};
pub use error::DomainError;
pub use manual::{GPS_LOCK_TYPE_LABEL, GenericMaterialType, GpsLockCounts, ManualRequirement};
pub use types::{
    AuditLineItem, CountTriad, ItemStatus, MaterialCategory, MaterialRequirement, Project,
    ProjectStatus, ShiftInventory, parse_time_of_day,
};
pub use validation::{validate_project, validate_shift_fields};
