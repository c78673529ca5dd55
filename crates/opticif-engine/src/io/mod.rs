use crate::error::ReorderError;
use crate::lines::split_lines;
use std::fs;
use std::path::Path;

/// Read a document fully into memory as terminator-preserving lines
pub fn read_lines(path: &Path) -> Result<Vec<String>, ReorderError> {
    let content = fs::read_to_string(path).map_err(|e| ReorderError::io(path, e))?;
    Ok(split_lines(&content))
}

/// Create the output directory if it doesn't exist yet
pub fn ensure_dir(dir: &Path) -> Result<(), ReorderError> {
    fs::create_dir_all(dir).map_err(|e| ReorderError::io(dir, e))
}

/// Write lines to a file, truncating any previous content
pub fn write_lines(path: &Path, lines: &[String]) -> Result<(), ReorderError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }

    fs::write(path, lines.concat()).map_err(|e| ReorderError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};

    #[test]
    fn test_read_lines_success() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "model.cif", "a: P;\n\nb: P;");

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["a: P;\n", "\n", "b: P;"]);
    }

    #[test]
    fn test_read_lines_not_found() {
        let dir = create_test_dir();
        let result = read_lines(&dir.path().join("missing.cif"));

        assert!(matches!(result, Err(ReorderError::Io { .. })));
        assert!(result.unwrap_err().to_string().contains("missing.cif"));
    }

    #[test]
    fn test_ensure_dir_tolerates_existing() {
        let dir = create_test_dir();
        let target = dir.path().join("generated");

        ensure_dir(&target).unwrap();
        ensure_dir(&target).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn test_write_lines_creates_parent_directories() {
        let dir = create_test_dir();
        let path = dir.path().join("generated").join("nested").join("out.cif");

        write_lines(&path, &["x\n".to_string(), "y\n".to_string()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x\ny\n");
    }

    #[test]
    fn test_write_lines_overwrites_existing() {
        // Given an earlier output longer than the new one
        let dir = create_test_dir();
        let path = create_test_file(&dir, "out.cif", "old content that is longer\n");

        // When writing over it
        write_lines(&path, &["new\n".to_string()]).unwrap();

        // Then only the new content remains
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }
}
