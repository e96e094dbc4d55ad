// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    projects (project_id) {
        project_id -> BigInt,
        code -> Text,
        document_json -> Text,
        created_at -> Nullable<Text>,
    }
}

diesel::table! {
    receipts (receipt_id) {
        receipt_id -> BigInt,
        project_id -> BigInt,
        line_item_id -> Text,
        received -> BigInt,
        recorded_by -> Text,
        recorded_at -> Nullable<Text>,
    }
}

diesel::table! {
    return_batches (batch_id) {
        batch_id -> BigInt,
        project_id -> BigInt,
        batch_code -> Text,
        document_json -> Text,
        created_at -> Nullable<Text>,
    }
}

diesel::table! {
    audit_events (event_id) {
        event_id -> BigInt,
        project_code -> Nullable<Text>,
        actor_json -> Text,
        cause_json -> Text,
        action_json -> Text,
        before_snapshot_json -> Text,
        after_snapshot_json -> Text,
        created_at -> Nullable<Text>,
    }
}

diesel::joinable!(receipts -> projects (project_id));
diesel::joinable!(return_batches -> projects (project_id));

diesel::allow_tables_to_appear_in_same_query!(projects, receipts, return_batches, audit_events);
