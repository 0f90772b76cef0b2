//! TreeSearcher - loads a tree document once and answers searches over it
//!
//! Loading never fails outright: a missing or unreadable document leaves
//! the searcher empty and records why, and every later search reports that
//! diagnostic next to its (empty) result.

use std::path::Path;

use tracing::info;

use crate::error::TreeError;
use crate::tree::{TreeDocument, TreeNode};

use super::diagnostics::Diagnostic;
use super::engine::{find_node, search};
use super::query::SearchQuery;
use super::result::{SearchReport, SearchResult};

pub struct TreeSearcher {
    document: Option<TreeDocument>,
    load_diagnostics: Vec<Diagnostic>,
}

impl TreeSearcher {
    /// Search an already loaded document.
    pub fn new(document: TreeDocument) -> Self {
        Self {
            document: Some(document),
            load_diagnostics: Vec::new(),
        }
    }

    /// Load `path`, degrading to an empty searcher when it cannot be read.
    pub fn open(path: &Path) -> Self {
        match TreeDocument::load(path) {
            Ok(document) => Self::new(document),
            Err(e) => {
                let diagnostic = match e {
                    TreeError::NotFound(path) => Diagnostic::InputNotFound { path },
                    TreeError::MalformedJson { path, source } => Diagnostic::MalformedInput {
                        path,
                        message: source.to_string(),
                    },
                    other => Diagnostic::MalformedInput {
                        path: path.to_path_buf(),
                        message: other.to_string(),
                    },
                };
                diagnostic.log();
                Self {
                    document: None,
                    load_diagnostics: vec![diagnostic],
                }
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn load_diagnostics(&self) -> &[Diagnostic] {
        &self.load_diagnostics
    }

    /// The `devices` root, if the document has one.
    pub fn devices(&self) -> Option<&TreeNode> {
        self.document.as_ref().and_then(|d| d.devices.as_ref())
    }

    /// Resolve `search_path` inside the tree.
    pub fn resolve(&self, search_path: &str) -> Result<&TreeNode, Diagnostic> {
        if !self.is_loaded() {
            return Err(self
                .load_diagnostics
                .first()
                .cloned()
                .unwrap_or(Diagnostic::MissingDevices));
        }
        let devices = self.devices().ok_or(Diagnostic::MissingDevices)?;
        find_node(devices, search_path).ok_or_else(|| Diagnostic::SearchRootNotFound {
            search_path: search_path.to_string(),
        })
    }

    /// Search below `search_path`.
    pub fn search(&self, search_path: &str, query: &SearchQuery) -> SearchReport {
        if !self.is_loaded() {
            return SearchReport {
                result: SearchResult::default(),
                diagnostics: self.load_diagnostics.clone(),
            };
        }

        let root = match self.resolve(search_path) {
            Ok(root) => root,
            Err(diagnostic) => {
                diagnostic.log();
                return SearchReport {
                    result: SearchResult::default(),
                    diagnostics: vec![diagnostic],
                };
            }
        };

        let (result, warnings) = search(root, query);
        info!(
            search_path,
            files = result.matching_files.len(),
            directories = result.matching_directories.len(),
            "search complete"
        );
        SearchReport {
            result,
            diagnostics: warnings,
        }
    }
}
