use std::path::{Path, PathBuf};

use crate::error::ReorderError;
use crate::io;
use crate::lines::{is_blank, terminate_last};

/// Appended to the source document's stem to name the output file.
pub const OUTPUT_SUFFIX: &str = ".seq.cif";

/// Where the reordered version of `document` goes inside `output_dir`.
pub fn output_path(document: &Path, output_dir: &Path) -> PathBuf {
    let stem = document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{stem}{OUTPUT_SUFFIX}"))
}

/// Joins untouched lines, one blank separator, the marker line and the reordered block.
pub fn compose(mut passthrough: Vec<String>, marker: &str, block: Vec<String>) -> Vec<String> {
    terminate_last(&mut passthrough);
    if passthrough.last().is_none_or(|line| !is_blank(line)) {
        passthrough.push("\n".to_string());
    }
    passthrough.push(format!("{marker}\n"));
    passthrough.extend(block);
    passthrough
}

/// Writes the composed document and returns the path written to.
pub fn write_document(
    document: &Path,
    output_dir: &Path,
    lines: &[String],
) -> Result<PathBuf, ReorderError> {
    io::ensure_dir(output_dir)?;
    let target = output_path(document, output_dir);
    io::write_lines(&target, lines)?;
    log::info!("Wrote {} lines to {}", lines.len(), target.display());
    Ok(target)
}
