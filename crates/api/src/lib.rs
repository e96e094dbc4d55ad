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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod csv_preview;
mod error;
mod handlers;
mod passcode_policy;
mod receiving;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthError, AuthenticatedActor, Role, authenticate};
pub use capabilities::{Capability, require_capability};
pub use csv_preview::{
    CENTER_CSV_HEADER, CenterCsvPreview, CsvRowPreview, CsvRowStatus, preview_center_csv,
};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    ApiResult, advance_project_status, assign_carrier, create_project, create_return_batch,
    finalize_warehouse_audit,
    get_audit_timeline, get_project, get_project_totals, get_requirements, get_warehouse_stats,
    initiate_return, list_line_items, list_projects, list_return_batches, login,
    preview_center_master_data, record_line_item_receipt, save_requirements, verify_return,
};
pub use passcode_policy::{PasscodePolicy, PasscodePolicyError};
pub use receiving::{ReceiptContext, WAREHOUSE_NODES, is_known_warehouse_node};
pub use request_response::{
    AssignCarrierRequest, AuditEventInfo, CreateProjectRequest, FinalizeAuditResponse,
    InitiateReturnRequest, LineItemInfo, LoginRequest, LoginResponse, ManualRequirementDto,
    ProjectInfo, RecordReceiptRequest, RecordReceiptResponse, RequirementsInfo, ReturnBatchInfo,
    SaveRequirementsRequest, ShiftDto, VerifyReturnRequest, WarehouseStatsInfo,
};
