//! TreeBuilder - indexes a directory subtree into a `TreeNode`

use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Result, TreeError};
use crate::search::Diagnostic;

use super::config::BuilderConfig;
use super::node::{Entry, TreeNode};
use super::utils::{entry_name, should_ignore_name};

/// Output of a build: the root node plus every entry that had to be skipped.
#[derive(Debug, Clone)]
pub struct BuiltTree {
    pub root: TreeNode,
    pub skipped: Vec<Diagnostic>,
}

/// Walks the filesystem once and records every directory it can read.
pub struct TreeBuilder {
    config: BuilderConfig,
}

impl TreeBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Index `root` and everything below it.
    ///
    /// Fails only when `root` itself is missing or not a directory.
    /// Unreadable entries further down are skipped and reported in
    /// [`BuiltTree::skipped`].
    pub fn build(&self, root: &Path) -> Result<BuiltTree> {
        if !root.exists() {
            return Err(TreeError::NotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(TreeError::NotADirectory(root.to_path_buf()));
        }
        let canonical = dunce::canonicalize(root).map_err(|e| TreeError::io(root, e))?;

        let mut skipped = Vec::new();
        let node = self.build_dir(&canonical, &mut skipped)?;

        info!(
            root = %canonical.display(),
            skipped = skipped.len(),
            "indexed directory tree"
        );
        Ok(BuiltTree {
            root: node,
            skipped,
        })
    }

    fn build_dir(&self, path: &Path, skipped: &mut Vec<Diagnostic>) -> Result<TreeNode> {
        let entries = fs::read_dir(path).map_err(|e| TreeError::io(path, e))?;
        let mut node = TreeNode::new(path.to_string_lossy());

        let mut entries: Vec<DirEntry> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    record_skip(skipped, path.to_path_buf(), &e);
                    None
                }
            })
            .collect();
        entries.sort_by_key(|a| a.file_name());

        debug!(path = %path.display(), entries = entries.len(), "listing directory");

        for entry in entries {
            let entry_path = entry.path();
            let name = entry_name(&entry_path);

            if should_ignore_name(&name, &self.config.ignore_patterns) {
                continue;
            }

            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => {
                    record_skip(skipped, entry_path, &e);
                    continue;
                }
            };

            // Symlinks are never followed, which keeps the tree acyclic
            if file_type.is_symlink() {
                debug!(path = %entry_path.display(), "skipping symlink");
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    record_skip(skipped, entry_path, &e);
                    continue;
                }
            };

            if file_type.is_dir() {
                let child = match self.build_dir(&entry_path, skipped) {
                    Ok(child) => Some(child),
                    Err(TreeError::Io { path, source }) if path == entry_path => {
                        record_skip(skipped, path, &source);
                        None
                    }
                    Err(e) => return Err(e),
                };
                node.add_directory(Entry::new(name, metadata.len()), child);
            } else if file_type.is_file() {
                node.add_file(name, metadata.len());
            }
        }

        Ok(node)
    }
}

fn record_skip(skipped: &mut Vec<Diagnostic>, path: PathBuf, error: &std::io::Error) {
    warn!(path = %path.display(), error = %error, "skipping unreadable entry");
    skipped.push(Diagnostic::Unreadable {
        path,
        message: error.to_string(),
    });
}
