//! Tabular exports around the reordering engine: sequenced name lists and DSM edge lists.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::Serialize;

use crate::error::{ReorderError, StructureError};
use crate::io;
use crate::sequence::{NameSequence, delimiter_byte, read_name_sequence};
use crate::validate::validate_name_table;

pub const NAME_LIST_SUFFIX: &str = ".nodes.seq.csv";
pub const EDGE_LIST_SUFFIX: &str = ".edges.csv";

/// One dependency from a DSM: `source` feeds into `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

fn csv_writer(path: &Path, delimiter: char) -> Result<csv::Writer<std::fs::File>, ReorderError> {
    WriterBuilder::new()
        .delimiter(delimiter_byte(delimiter)?)
        .from_path(path)
        .map_err(|e| ReorderError::csv(path, e))
}

/// Writes `<output_dir>/<stem>.nodes.seq.csv` with a `name` column (and `labels` if present).
pub fn write_name_list(
    sequence: &NameSequence,
    stem: &str,
    output_dir: &Path,
    delimiter: char,
) -> Result<PathBuf, ReorderError> {
    io::ensure_dir(output_dir)?;
    let path = output_dir.join(format!("{stem}{NAME_LIST_SUFFIX}"));
    let mut writer = csv_writer(&path, delimiter)?;

    let result = if sequence.has_labels() {
        writer.write_record(["name", "labels"]).and_then(|()| {
            sequence
                .entries()
                .try_for_each(|(name, label)| writer.write_record([name, label.unwrap_or("")]))
        })
    } else {
        writer.write_record(["name"]).and_then(|()| {
            sequence
                .names()
                .iter()
                .try_for_each(|name| writer.write_record([name]))
        })
    };
    result.map_err(|e| ReorderError::csv(&path, e))?;
    writer.flush().map_err(|e| ReorderError::io(&path, e))?;

    log::info!("Wrote {} names to {}", sequence.len(), path.display());
    Ok(path)
}

fn is_binary(value: &str) -> bool {
    matches!(value.parse::<f64>(), Ok(v) if v == 0.0 || v == 1.0)
}

/// Reads a headerless square binary matrix, checking its shape.
pub fn read_binary_matrix(path: &Path, delimiter: char) -> Result<Vec<Vec<bool>>, ReorderError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter_byte(delimiter)?)
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ReorderError::csv(path, e))?;

    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ReorderError::csv(path, e))?;
    let expected = records.len();

    let mut matrix = Vec::with_capacity(expected);
    for (i, record) in records.iter().enumerate() {
        if record.len() != expected {
            return Err(StructureError::MatrixNotSquare {
                path: path.to_path_buf(),
                row: i + 1,
                len: record.len(),
                expected,
            }
            .into());
        }

        let mut row = Vec::with_capacity(expected);
        for (j, value) in record.iter().enumerate() {
            if !is_binary(value) {
                return Err(StructureError::MatrixNotBinary {
                    path: path.to_path_buf(),
                    row: i + 1,
                    column: j + 1,
                    value: value.to_string(),
                }
                .into());
            }
            row.push(value.parse::<f64>().is_ok_and(|v| v == 1.0));
        }
        matrix.push(row);
    }

    Ok(matrix)
}

/// Edges of a DSM: a marked cell at row `i`, column `j` means `nodes[j]` feeds `nodes[i]`.
///
/// Callers check that `matrix` is square with one row per node.
pub(crate) fn edges_from_matrix(matrix: &[Vec<bool>], nodes: &[String]) -> Vec<Edge> {
    let mut edges = Vec::new();
    for (i, row) in matrix.iter().enumerate() {
        for (j, &marked) in row.iter().enumerate() {
            if marked {
                edges.push(Edge {
                    source: nodes[j].clone(),
                    target: nodes[i].clone(),
                });
            }
        }
    }
    edges
}

/// Converts a DSM plus its node table into `<output_dir>/<stem>.edges.csv`.
pub fn matrix_to_edge_list(
    matrix_path: &Path,
    nodes_path: &Path,
    stem: &str,
    output_dir: &Path,
    delimiter: char,
) -> Result<PathBuf, ReorderError> {
    validate_name_table(nodes_path, delimiter)?;
    let nodes = read_name_sequence(nodes_path, delimiter)?;
    let matrix = read_binary_matrix(matrix_path, delimiter)?;

    if matrix.len() != nodes.len() {
        return Err(StructureError::MatrixSizeMismatch {
            path: matrix_path.to_path_buf(),
            rows: matrix.len(),
            nodes: nodes.len(),
        }
        .into());
    }

    let edges = edges_from_matrix(&matrix, nodes.names());

    io::ensure_dir(output_dir)?;
    let path = output_dir.join(format!("{stem}{EDGE_LIST_SUFFIX}"));
    let mut writer = csv_writer(&path, delimiter)?;
    for edge in &edges {
        writer
            .serialize(edge)
            .map_err(|e| ReorderError::csv(&path, e))?;
    }
    if edges.is_empty() {
        writer
            .write_record(["source", "target"])
            .map_err(|e| ReorderError::csv(&path, e))?;
    }
    writer.flush().map_err(|e| ReorderError::io(&path, e))?;

    log::info!("Wrote {} edges to {}", edges.len(), path.display());
    Ok(path)
}
