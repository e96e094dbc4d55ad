// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Warehouse receiving context.
//!
//! The receiving workflow records who accepted a delivery, where, and when.
//! Proof documents are opaque filenames passed through untouched; the
//! engine never inspects them.

use serde::{Deserialize, Serialize};

/// The fixed warehouse node catalog, plus the manual-entry escape hatch.
pub const WAREHOUSE_NODES: [&str; 5] = [
    "Central Repository - Gurugram",
    "South Regional Hub - Hyderabad",
    "West Processing Unit - Mumbai",
    "East Logistic Node - Kolkata",
    "Manual Entry (Unlisted Node)",
];

/// Checks whether a warehouse node is part of the fixed catalog.
#[must_use]
pub fn is_known_warehouse_node(node: &str) -> bool {
    WAREHOUSE_NODES.contains(&node)
}

/// Metadata attached to a receipt entry session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptContext {
    /// The warehouse node accepting the delivery.
    pub warehouse_node: String,
    /// The receiving officer's name.
    pub receiver_name: String,
    /// Date of entry (ISO 8601 date string).
    pub receive_date: String,
    /// Time of entry (HH:MM string).
    pub receive_time: String,
    /// Proof-of-receipt document filenames (opaque pass-through).
    pub proof_documents: Vec<String>,
}
