// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fulfillment classification for a single audit line-item.

use crate::types::{AuditLineItem, ItemStatus};

/// Classifies a line-item's fulfillment status from its counts.
///
/// Boundary semantics are exact:
/// - `received == 0` → Pending (even when `expected` is also 0)
/// - `0 < received < expected` → In Progress
/// - `received >= expected` → Completed
///
/// Over-receipt is Completed, not Mismatch. Return-batch verification uses
/// the opposite rule (any deviation is a mismatch); the two must not be
/// unified without a product decision.
///
/// # Arguments
///
/// * `expected` - Expected unit count
/// * `received` - Received unit count
#[must_use]
pub const fn classify_receipt(expected: u32, received: u32) -> ItemStatus {
    if received == 0 {
        ItemStatus::Pending
    } else if received < expected {
        ItemStatus::InProgress
    } else {
        ItemStatus::Completed
    }
}

impl AuditLineItem {
    /// Returns a copy of this item with the received count recorded and the
    /// status reclassified.
    ///
    /// # Arguments
    ///
    /// * `received` - The received unit count
    #[must_use]
    pub fn with_received(mut self, received: u32) -> Self {
        self.received = received;
        self.status = classify_receipt(self.expected, received);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_received_is_pending() {
        assert_eq!(classify_receipt(0, 0), ItemStatus::Pending);
        assert_eq!(classify_receipt(1, 0), ItemStatus::Pending);
        assert_eq!(classify_receipt(2250, 0), ItemStatus::Pending);
    }

    #[test]
    fn test_partial_receipt_is_in_progress() {
        assert_eq!(classify_receipt(100, 1), ItemStatus::InProgress);
        assert_eq!(classify_receipt(100, 50), ItemStatus::InProgress);
        assert_eq!(classify_receipt(100, 99), ItemStatus::InProgress);
    }

    #[test]
    fn test_exact_receipt_is_completed() {
        assert_eq!(classify_receipt(1, 1), ItemStatus::Completed);
        assert_eq!(classify_receipt(2250, 2250), ItemStatus::Completed);
    }

    #[test]
    fn test_over_receipt_is_completed() {
        assert_eq!(classify_receipt(100, 101), ItemStatus::Completed);
        assert_eq!(classify_receipt(0, 5), ItemStatus::Completed);
    }

    #[test]
    fn test_with_received_reclassifies() {
        let item: AuditLineItem = AuditLineItem {
            id: String::from("s-1-gps"),
            label: String::from("Shift 1: SmartLock v3 (GPS Locks)"),
            expected: 100,
            received: 0,
            status: ItemStatus::Pending,
            remarks: String::from("Project Baseline"),
        };

        let partial: AuditLineItem = item.clone().with_received(40);
        assert_eq!(partial.received, 40);
        assert_eq!(partial.status, ItemStatus::InProgress);

        let complete: AuditLineItem = item.clone().with_received(100);
        assert_eq!(complete.status, ItemStatus::Completed);

        let reset: AuditLineItem = item.with_received(0);
        assert_eq!(reset.status, ItemStatus::Pending);
    }
}
