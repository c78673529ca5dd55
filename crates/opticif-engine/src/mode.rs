use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::ReorderError;

/// Which declaration dialect the scanner looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// `plant automaton Name:` ... `end`
    #[default]
    Automaton,
    /// `Name: Plant(...);`
    Instantiation,
}

impl ScanMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ScanMode::Automaton => "automaton",
            ScanMode::Instantiation => "instantiation",
        }
    }

    /// Whether `line` closes the declaration currently being captured.
    pub fn closes(self, line: &str) -> bool {
        match self {
            ScanMode::Automaton => line.split_whitespace().next_back() == Some("end"),
            ScanMode::Instantiation => line.contains(';'),
        }
    }

    /// Comment line written between the untouched lines and the reordered block.
    pub fn marker(self) -> &'static str {
        match self {
            ScanMode::Automaton => "// Reordered plant automata",
            ScanMode::Instantiation => "// Reordered plant instantiations",
        }
    }

    fn opening_prefix(self) -> &'static str {
        match self {
            ScanMode::Automaton => r"plant\s+automaton\s+",
            ScanMode::Instantiation => "",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanMode {
    type Err = ReorderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "automaton" => Ok(ScanMode::Automaton),
            "instantiation" => Ok(ScanMode::Instantiation),
            other => Err(ReorderError::InvalidMode(other.to_string())),
        }
    }
}

/// Decides whether a line opens a declaration for one of a fixed set of names.
///
/// The captured name runs up to the colon, so `Node10:` never opens `Node1`.
#[derive(Debug, Clone)]
pub struct OpeningMatcher {
    regex: Regex,
    names: HashSet<String>,
}

impl OpeningMatcher {
    pub fn new<'a>(
        mode: ScanMode,
        candidates: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ReorderError> {
        let names = candidates
            .into_iter()
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();
        let pattern = format!(r"^\s*{}(?P<name>[^\s:]+)\s*:", mode.opening_prefix());

        Ok(Self {
            regex: Regex::new(&pattern)?,
            names,
        })
    }

    /// Returns the name this line opens, if any.
    pub fn opens<'l>(&self, line: &'l str) -> Option<&'l str> {
        if self.names.is_empty() {
            return None;
        }
        let name = self.regex.captures(line)?.name("name")?.as_str();
        self.names.contains(name).then_some(name)
    }
}
