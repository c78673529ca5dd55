use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{ReorderError, StructureError};

pub const NAME_COLUMN: &str = "name";
/// Accepted label column headers, in order of preference.
pub const LABEL_COLUMNS: [&str; 2] = ["labels", "kind"];

/// The desired output order of item names, optionally paired with group labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSequence {
    names: Vec<String>,
    labels: Option<Vec<String>>,
}

impl NameSequence {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            labels: None,
        }
    }

    /// Pairs names with labels. An empty label means "no group".
    ///
    /// Labels shorter than names are padded with empty labels; extra labels are dropped.
    pub fn with_labels(names: Vec<String>, mut labels: Vec<String>) -> Self {
        labels.resize(names.len(), String::new());
        Self {
            names,
            labels: Some(labels),
        }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let (names, labels): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(n, l)| (n.to_string(), l.to_string()))
            .unzip();
        Self::with_labels(names, labels)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    pub fn has_labels(&self) -> bool {
        self.labels.is_some()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names with their label, `None` where the label is absent or empty.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.names.iter().enumerate().map(|(i, name)| {
            let label = self
                .labels
                .as_ref()
                .and_then(|labels| labels.get(i))
                .map(String::as_str)
                .filter(|l| !l.is_empty());
            (name.as_str(), label)
        })
    }
}

/// Converts a user-facing delimiter into the byte the CSV reader expects.
pub fn delimiter_byte(delimiter: char) -> Result<u8, ReorderError> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(ReorderError::InvalidDelimiter(delimiter))
    }
}

pub(crate) fn open_table(
    path: &Path,
    delimiter: char,
) -> Result<csv::Reader<std::fs::File>, ReorderError> {
    ReaderBuilder::new()
        .delimiter(delimiter_byte(delimiter)?)
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ReorderError::csv(path, e))
}

pub(crate) fn column_index(headers: &StringRecord, column: &str) -> Option<usize> {
    headers.iter().position(|h| h == column)
}

pub(crate) fn label_column(headers: &StringRecord) -> Option<usize> {
    LABEL_COLUMNS
        .iter()
        .find_map(|column| column_index(headers, column))
}

/// Reads the name sequence from a table with a `name` column and an optional
/// `labels`/`kind` column, preserving row order.
pub fn read_name_sequence(path: &Path, delimiter: char) -> Result<NameSequence, ReorderError> {
    let mut reader = open_table(path, delimiter)?;
    let headers = reader
        .headers()
        .map_err(|e| ReorderError::csv(path, e))?
        .clone();

    let name_idx = column_index(&headers, NAME_COLUMN).ok_or_else(|| {
        StructureError::MissingNameColumn {
            path: path.to_path_buf(),
        }
    })?;
    let label_idx = label_column(&headers);

    let mut names = Vec::new();
    let mut labels = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReorderError::csv(path, e))?;
        names.push(record.get(name_idx).unwrap_or_default().to_string());
        if let Some(idx) = label_idx {
            labels.push(record.get(idx).unwrap_or_default().to_string());
        }
    }

    log::info!(
        "Read {} names from {}{}",
        names.len(),
        path.display(),
        if label_idx.is_some() { " (with labels)" } else { "" }
    );

    Ok(match label_idx {
        Some(_) => NameSequence::with_labels(names, labels),
        None => NameSequence::new(names),
    })
}
