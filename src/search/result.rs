//! Search results

use serde::{Deserialize, Serialize};

use crate::tree::EntrySize;

use super::diagnostics::Diagnostic;

/// Matches in traversal order. Serializes to the report format
/// `{ "matching_files": [[path, size], ...], "matching_directories": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub matching_files: Vec<(String, EntrySize)>,
    pub matching_directories: Vec<(String, EntrySize)>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.matching_files.is_empty() && self.matching_directories.is_empty()
    }

    pub fn file_paths(&self) -> impl Iterator<Item = &str> {
        self.matching_files.iter().map(|(path, _)| path.as_str())
    }

    pub fn directory_paths(&self) -> impl Iterator<Item = &str> {
        self.matching_directories.iter().map(|(path, _)| path.as_str())
    }
}

/// A result together with everything that went wrong producing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchReport {
    pub result: SearchResult,
    pub diagnostics: Vec<Diagnostic>,
}

impl SearchReport {
    /// True when the tree loaded and the search root was found. An empty
    /// result with `root_found() == true` means "searched, nothing matched".
    pub fn root_found(&self) -> bool {
        !self.has_errors()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}
