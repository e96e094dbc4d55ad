// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use iil_kit_domain::CountTriad;

/// A command represents user intent as data only.
///
/// Commands are the only way to request a batch state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchCommand {
    /// Acknowledge consolidation at the client hub.
    ///
    /// Valid only at the initiation step. Records the counts the client
    /// actually gathered, which become the reference for warehouse
    /// verification.
    InitiateReturn {
        /// The counts acknowledged at consolidation.
        counts: CountTriad,
    },
    /// Assign a carrier and authorize the transit phase.
    ///
    /// Valid only at the pickup step. All three fields are required
    /// non-empty.
    AssignCarrier {
        /// Carrier or fleet partner name.
        partner: String,
        /// Carrier consignment / LR number.
        tracking_id: String,
        /// Vehicle registration number.
        vehicle_no: String,
    },
    /// Verify warehouse receipt of the returned materials.
    ///
    /// Valid only at the transit step. The verified counts are compared
    /// field-by-field against the initiated counts; any deviation in either
    /// direction marks the batch as a mismatch.
    VerifyReturn {
        /// The counts verified at the warehouse.
        counts: CountTriad,
    },
}
