use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary working directory for filesystem tests
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with content
pub fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Turn a string literal into terminator-preserving lines
pub fn lines(text: &str) -> Vec<String> {
    crate::lines::split_lines(text)
}
