pub mod convert;
pub mod error;
pub mod io;
pub mod lines;
pub mod mode;
pub mod pipeline;
pub mod reorder;
pub mod scan;
pub mod sequence;
pub mod validate;
pub mod writer;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use error::{ReorderError, StructureError};
pub use mode::{OpeningMatcher, ScanMode};
pub use pipeline::{ReorderOptions, build_reordered, reorder_document};
pub use scan::{BlockScanner, ScanOutput};
pub use sequence::{NameSequence, read_name_sequence};
