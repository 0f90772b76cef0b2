//! Non-fatal conditions reported alongside search and build results

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Something went wrong, but the run carried on with what it had.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The tree JSON file does not exist
    InputNotFound { path: PathBuf },
    /// The tree JSON file could not be read or parsed
    MalformedInput { path: PathBuf, message: String },
    /// The document has no `devices` node
    MissingDevices,
    /// No node in the tree has the requested absolute path
    SearchRootNotFound { search_path: String },
    /// A listed directory has no nested node, so its contents were not searched
    MissingChildNode { parent: String, name: String },
    /// A filesystem entry could not be read while indexing
    Unreadable { path: PathBuf, message: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::InputNotFound { .. }
            | Diagnostic::MalformedInput { .. }
            | Diagnostic::MissingDevices
            | Diagnostic::SearchRootNotFound { .. } => Severity::Error,
            Diagnostic::MissingChildNode { .. } | Diagnostic::Unreadable { .. } => {
                Severity::Warning
            }
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    /// Emit this diagnostic through `tracing` at its severity.
    pub fn log(&self) {
        match self.severity() {
            Severity::Error => error!("{}", self),
            Severity::Warning => warn!("{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InputNotFound { path } => {
                write!(f, "the file {} was not found", path.display())
            }
            Diagnostic::MalformedInput { path, message } => {
                write!(f, "could not decode JSON from {}: {}", path.display(), message)
            }
            Diagnostic::MissingDevices => f.write_str("'devices' node not found in the JSON"),
            Diagnostic::SearchRootNotFound { search_path } => {
                write!(f, "no matching node found for {}", search_path)
            }
            Diagnostic::MissingChildNode { parent, name } => write!(
                f,
                "directory '{}' under {} has no nested node; its contents were skipped",
                name, parent
            ),
            Diagnostic::Unreadable { path, message } => {
                write!(f, "skipped {}: {}", path.display(), message)
            }
        }
    }
}
