//! Structural checks for name tables, run before anything reads them.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{ReorderError, StructureError};
use crate::sequence::{NAME_COLUMN, NameSequence, column_index, label_column, open_table};

/// What a validated name table looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableShape {
    pub rows: usize,
    pub has_labels: bool,
}

/// Checks that `path` has a `name` header and that every name is non-empty and unique.
///
/// Empty names fail on the first offending row; duplicates are reported all at once.
pub fn validate_name_table(path: &Path, delimiter: char) -> Result<TableShape, ReorderError> {
    let mut reader = open_table(path, delimiter)?;
    let headers = reader
        .headers()
        .map_err(|e| ReorderError::csv(path, e))?
        .clone();

    let name_idx =
        column_index(&headers, NAME_COLUMN).ok_or_else(|| StructureError::MissingNameColumn {
            path: path.to_path_buf(),
        })?;

    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    let mut rows = 0;
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ReorderError::csv(path, e))?;
        let name = record.get(name_idx).unwrap_or_default();
        if name.is_empty() {
            return Err(StructureError::EmptyName {
                path: path.to_path_buf(),
                row: i + 1,
            }
            .into());
        }
        if !seen.insert(name.to_string()) {
            duplicates.insert(name.to_string());
        }
        rows += 1;
    }

    if !duplicates.is_empty() {
        return Err(StructureError::DuplicateNames {
            path: path.to_path_buf(),
            names: duplicates.into_iter().collect(),
        }
        .into());
    }

    Ok(TableShape {
        rows,
        has_labels: label_column(&headers).is_some(),
    })
}

/// Rejects sequences where a label comes back after a different label took over.
///
/// Unlabelled rows between two runs of the same label also split them.
pub fn check_label_grouping(sequence: &NameSequence) -> Result<(), StructureError> {
    let mut closed = BTreeSet::new();
    let mut current: Option<&str> = None;

    for (_, label) in sequence.entries() {
        if label == current {
            continue;
        }
        if let Some(previous) = current {
            closed.insert(previous);
        }
        if let Some(label) = label
            && closed.contains(label)
        {
            return Err(StructureError::UngroupedLabel {
                label: label.to_string(),
            });
        }
        current = label;
    }

    Ok(())
}
