use std::path::PathBuf;

use crate::error::ReorderError;
use crate::io;
use crate::mode::ScanMode;
use crate::reorder::reorder;
use crate::scan::BlockScanner;
use crate::sequence::read_name_sequence;
use crate::validate::{check_label_grouping, validate_name_table};
use crate::writer::{compose, write_document};

pub const DEFAULT_OUTPUT_DIR: &str = "generated";
pub const DEFAULT_DELIMITER: char = ';';

/// Everything one reorder run needs. Passed per call, never stored globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderOptions {
    /// Table holding the desired order in its `name` column.
    pub names_path: PathBuf,
    /// The CIF document whose declarations get reordered.
    pub document_path: PathBuf,
    pub output_dir: PathBuf,
    pub delimiter: char,
    pub mode: ScanMode,
    /// Reject tables where a label reappears after another label took over.
    pub strict_groups: bool,
}

impl ReorderOptions {
    pub fn new(names_path: impl Into<PathBuf>, document_path: impl Into<PathBuf>) -> Self {
        Self {
            names_path: names_path.into(),
            document_path: document_path.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            delimiter: DEFAULT_DELIMITER,
            mode: ScanMode::default(),
            strict_groups: false,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_strict_groups(mut self, strict_groups: bool) -> Self {
        self.strict_groups = strict_groups;
        self
    }
}

/// Reorders the declarations of `options.document_path` to follow the name table
/// and writes `<stem>.seq.cif` into the output directory.
///
/// Nothing is written unless reading, scanning and reordering all succeed.
pub fn reorder_document(options: &ReorderOptions) -> Result<PathBuf, ReorderError> {
    let block = build_reordered(options)?;
    write_document(&options.document_path, &options.output_dir, &block)
}

/// Runs the whole pipeline in memory and returns the lines of the output document.
pub fn build_reordered(options: &ReorderOptions) -> Result<Vec<String>, ReorderError> {
    validate_name_table(&options.names_path, options.delimiter)?;
    let sequence = read_name_sequence(&options.names_path, options.delimiter)?;
    if options.strict_groups {
        check_label_grouping(&sequence)?;
    }

    let lines = io::read_lines(&options.document_path)?;
    log::info!(
        "Scanning {} ({} lines, {} mode)",
        options.document_path.display(),
        lines.len(),
        options.mode
    );

    let scanner =
        BlockScanner::for_mode(options.mode, sequence.names().iter().map(String::as_str))?;
    let scanned = scanner.scan(&lines)?;
    let block = reorder(&scanned, &sequence, &options.document_path)?;

    Ok(compose(scanned.passthrough, options.mode.marker(), block))
}

/// Output location for a run with these options.
pub fn output_path(options: &ReorderOptions) -> PathBuf {
    crate::writer::output_path(&options.document_path, &options.output_dir)
}
