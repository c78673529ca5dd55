//! # Block Scanning
//!
//! Single forward pass over the document lines. Each line is either:
//!
//! - **dropped**: blank or `//` comment lines, in any state
//! - **item-opening**: the opening matcher recognises one of the candidate names
//! - **item-continuation**: any line while a declaration is being captured
//! - **passthrough**: everything else, kept verbatim in original order
//!
//! ## Key Invariants
//!
//! - At most one declaration is open at a time; an opening line while capturing is an error
//! - The closing predicate runs on every captured line, the opening line included
//! - A name finalized twice lands in `duplicates`; the first capture is kept
//! - Reaching the end of input while capturing is an error

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ReorderError;
use crate::lines::{is_blank, is_comment};
use crate::mode::{OpeningMatcher, ScanMode};

#[derive(Debug, Default)]
enum ScanState {
    #[default]
    Idle,
    Capturing {
        name: String,
        opened_at: usize,
        lines: Vec<String>,
    },
}

/// Result of partitioning a document into items and passthrough lines.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanOutput {
    /// Finalized declarations by name, each with its raw lines.
    pub items: BTreeMap<String, Vec<String>>,
    /// Lines outside every declaration, verbatim.
    pub passthrough: Vec<String>,
    /// Names that were finalized more than once.
    pub duplicates: BTreeSet<String>,
}

pub struct BlockScanner<F> {
    opener: OpeningMatcher,
    closes: F,
}

impl BlockScanner<fn(&str) -> bool> {
    /// Scanner using the opening pattern and closing rule of `mode`.
    pub fn for_mode<'a>(
        mode: ScanMode,
        candidates: impl IntoIterator<Item = &'a str>,
    ) -> Result<BlockScanner<impl Fn(&str) -> bool>, ReorderError> {
        let opener = OpeningMatcher::new(mode, candidates)?;
        Ok(BlockScanner::new(opener, move |line: &str| mode.closes(line)))
    }
}

impl<F> BlockScanner<F>
where
    F: Fn(&str) -> bool,
{
    pub fn new(opener: OpeningMatcher, closes: F) -> Self {
        Self { opener, closes }
    }

    pub fn scan(&self, lines: &[String]) -> Result<ScanOutput, ReorderError> {
        let mut out = ScanOutput::default();
        let mut state = ScanState::Idle;

        for (idx, line) in lines.iter().enumerate() {
            let line_no = idx + 1;
            if is_blank(line) || is_comment(line) {
                continue;
            }

            let opened = self.opener.opens(line);
            state = match (state, opened) {
                (ScanState::Idle, None) => {
                    out.passthrough.push(line.clone());
                    ScanState::Idle
                }
                (ScanState::Idle, Some(name)) => {
                    log::debug!("Opening '{name}' at line {line_no}");
                    self.extend(
                        &mut out,
                        name.to_string(),
                        line_no,
                        vec![line.clone()],
                        line,
                    )
                }
                (ScanState::Capturing { name, opened_at, .. }, Some(_)) => {
                    return Err(ReorderError::UnclosedItem {
                        name,
                        line: opened_at,
                    });
                }
                (
                    ScanState::Capturing {
                        name,
                        opened_at,
                        mut lines,
                    },
                    None,
                ) => {
                    lines.push(line.clone());
                    self.extend(&mut out, name, opened_at, lines, line)
                }
            };
        }

        if let ScanState::Capturing {
            name, opened_at, ..
        } = state
        {
            return Err(ReorderError::UnclosedItem {
                name,
                line: opened_at,
            });
        }

        log::debug!(
            "Captured {} items, {} passthrough lines",
            out.items.len(),
            out.passthrough.len()
        );
        Ok(out)
    }

    /// Keeps capturing unless `last` closes the item, in which case it is finalized.
    fn extend(
        &self,
        out: &mut ScanOutput,
        name: String,
        opened_at: usize,
        lines: Vec<String>,
        last: &str,
    ) -> ScanState {
        if !(self.closes)(last) {
            return ScanState::Capturing {
                name,
                opened_at,
                lines,
            };
        }

        log::debug!("Closing '{name}' after {} lines", lines.len());
        if out.items.contains_key(&name) {
            out.duplicates.insert(name);
        } else {
            out.items.insert(name, lines);
        }
        ScanState::Idle
    }
}
