// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Center master-data CSV preview.
//!
//! Uploaded center lists are previewed row-by-row before anything is
//! committed: every row is validated against the project (shift ids must
//! exist) and reported as valid or invalid with reasons. Preview never
//! persists anything.

use crate::error::ApiError;
use iil_kit_domain::Project;
use serde::{Deserialize, Serialize};

/// The exact header the center CSV must carry, in order.
pub const CENTER_CSV_HEADER: [&str; 5] = [
    "center_code",
    "center_name",
    "city",
    "shift_id",
    "locks_allotted",
];

/// Validation status of one CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CsvRowStatus {
    /// The row would import cleanly.
    Valid,
    /// The row has at least one problem.
    Invalid,
}

/// Preview result for one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRowPreview {
    /// 1-based data row number (excluding the header).
    pub row_number: usize,
    /// Center code column value.
    pub center_code: String,
    /// Center name column value.
    pub center_name: String,
    /// City column value.
    pub city: String,
    /// Shift id column value.
    pub shift_id: String,
    /// Parsed lock allotment, if the column was a valid number.
    pub locks_allotted: Option<u32>,
    /// Row validation status.
    pub status: CsvRowStatus,
    /// Problems found in this row.
    pub errors: Vec<String>,
}

/// Preview result for a whole center CSV upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterCsvPreview {
    /// Per-row results, in file order.
    pub rows: Vec<CsvRowPreview>,
    /// Number of rows that would import cleanly.
    pub valid_count: usize,
    /// Number of rows with problems.
    pub invalid_count: usize,
}

/// Previews a center master-data CSV against a project.
///
/// # Arguments
///
/// * `project` - The project the centers belong to
/// * `csv_data` - The raw CSV contents
///
/// # Errors
///
/// Returns an error if the CSV cannot be read or the header row does not
/// match [`CENTER_CSV_HEADER`] exactly. Individual row problems are
/// reported per row, not as errors.
pub fn preview_center_csv(
    project: &Project,
    csv_data: &str,
) -> Result<CenterCsvPreview, ApiError> {
    let mut reader: csv::Reader<&[u8]> = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ApiError::InvalidInput {
            field: String::from("csv_data"),
            message: format!("Failed to read CSV header: {e}"),
        })?
        .iter()
        .map(str::to_string)
        .collect();

    if headers != CENTER_CSV_HEADER {
        return Err(ApiError::InvalidInput {
            field: String::from("csv_data"),
            message: format!(
                "CSV header must be '{}', got '{}'",
                CENTER_CSV_HEADER.join(","),
                headers.join(",")
            ),
        });
    }

    let mut rows: Vec<CsvRowPreview> = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let row_number: usize = index + 1;

        let record: csv::StringRecord = match record {
            Ok(record) => record,
            Err(e) => {
                rows.push(CsvRowPreview {
                    row_number,
                    center_code: String::new(),
                    center_name: String::new(),
                    city: String::new(),
                    shift_id: String::new(),
                    locks_allotted: None,
                    status: CsvRowStatus::Invalid,
                    errors: vec![format!("Unreadable row: {e}")],
                });
                continue;
            }
        };

        let field = |i: usize| -> String { record.get(i).unwrap_or("").to_string() };
        let center_code: String = field(0);
        let center_name: String = field(1);
        let city: String = field(2);
        let shift_id: String = field(3);
        let locks_raw: String = field(4);

        let mut errors: Vec<String> = Vec::new();

        if center_code.is_empty() {
            errors.push(String::from("Center code is required"));
        }
        if center_name.is_empty() {
            errors.push(String::from("Center name is required"));
        }
        if !project.shifts.iter().any(|shift| shift.id == shift_id) {
            errors.push(format!("Unknown shift id: '{shift_id}'"));
        }

        let locks_allotted: Option<u32> = match locks_raw.parse::<u32>() {
            Ok(value) => Some(value),
            Err(_) => {
                errors.push(format!("Lock allotment must be a non-negative integer, got '{locks_raw}'"));
                None
            }
        };

        let status: CsvRowStatus = if errors.is_empty() {
            CsvRowStatus::Valid
        } else {
            CsvRowStatus::Invalid
        };

        rows.push(CsvRowPreview {
            row_number,
            center_code,
            center_name,
            city,
            shift_id,
            locks_allotted,
            status,
            errors,
        });
    }

    let valid_count: usize = rows
        .iter()
        .filter(|row| row.status == CsvRowStatus::Valid)
        .count();
    let invalid_count: usize = rows.len() - valid_count;

    Ok(CenterCsvPreview {
        rows,
        valid_count,
        invalid_count,
    })
}
