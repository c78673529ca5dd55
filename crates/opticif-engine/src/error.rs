use std::path::PathBuf;

/// Joins names for display in error messages, sorted ascending.
fn join_sorted(names: &[String]) -> String {
    let mut sorted: Vec<&str> = names.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(", ")
}

/// Structural problems in tabular inputs (name tables and matrices).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StructureError {
    #[error("'{}' should have a header with a 'name' column", .path.display())]
    MissingNameColumn { path: PathBuf },
    #[error("'{}' contains an empty value in the 'name' column (row {row})", .path.display())]
    EmptyName { path: PathBuf, row: usize },
    #[error(
        "'{}' contains duplicate names in the 'name' column: {}",
        .path.display(),
        join_sorted(.names)
    )]
    DuplicateNames { path: PathBuf, names: Vec<String> },
    #[error(
        "label '{label}' appears in more than one run; nodes of the same label should be grouped together"
    )]
    UngroupedLabel { label: String },
    #[error(
        "the matrix in '{}' is not square: row {row} has {len} elements, expected {expected}",
        .path.display()
    )]
    MatrixNotSquare {
        path: PathBuf,
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error(
        "the matrix in '{}' is not binary: found '{value}' at row {row}, column {column}",
        .path.display()
    )]
    MatrixNotBinary {
        path: PathBuf,
        row: usize,
        column: usize,
        value: String,
    },
    #[error(
        "the matrix in '{}' has {rows} rows but there are {nodes} nodes",
        .path.display()
    )]
    MatrixSizeMismatch {
        path: PathBuf,
        rows: usize,
        nodes: usize,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ReorderError {
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error("Item '{name}' opened at line {line} is not closed before the next declaration or the end of the document")]
    UnclosedItem { name: String, line: usize },
    #[error("Duplicate declarations found for items: {}", join_sorted(.names))]
    DuplicateItems { names: Vec<String> },
    #[error("Items not found in '{}': {}", .document.display(), join_sorted(.names))]
    MissingItems { document: PathBuf, names: Vec<String> },
    #[error("Unsupported scan mode '{0}', expected 'automaton' or 'instantiation'")]
    InvalidMode(String),
    #[error("Failed to build the declaration matcher: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(char),
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("CSV error in {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
}

impl ReorderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lists_are_sorted_in_messages() {
        let err = ReorderError::DuplicateItems {
            names: vec!["Zeta".to_string(), "Alpha".to_string(), "Mid".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Duplicate declarations found for items: Alpha, Mid, Zeta"
        );
    }

    #[test]
    fn test_missing_items_mentions_document() {
        let err = ReorderError::MissingItems {
            document: PathBuf::from("models/lock.cif"),
            names: vec!["Y".to_string()],
        };
        assert_eq!(err.to_string(), "Items not found in 'models/lock.cif': Y");
    }

    #[test]
    fn test_structure_errors_pass_through_unchanged() {
        let inner = StructureError::MissingNameColumn {
            path: PathBuf::from("nodes.csv"),
        };
        let expected = inner.to_string();
        let err = ReorderError::from(inner);
        assert_eq!(err.to_string(), expected);
    }
}
