//! Path resolution and pattern search over a loaded tree

use tracing::{debug, trace};

use crate::tree::TreeNode;

use super::diagnostics::Diagnostic;
use super::query::SearchQuery;
use super::result::SearchResult;

/// Find the node whose `absolute_path` equals `target`.
///
/// Depth-first, pre-order, first match wins. The comparison is a plain
/// string comparison, so callers must write `target` exactly as the tree
/// stores paths.
pub fn find_node<'a>(root: &'a TreeNode, target: &str) -> Option<&'a TreeNode> {
    if root.absolute_path == target {
        return Some(root);
    }
    root.subdirectories()
        .filter_map(|(_, child)| child)
        .find_map(|child| find_node(child, target))
}

/// Run `query` over the subtree rooted at `root`.
///
/// Returns the matches and a warning for every listed directory that has
/// no nested node.
pub fn search(root: &TreeNode, query: &SearchQuery) -> (SearchResult, Vec<Diagnostic>) {
    let mut walk = SearchWalk {
        query,
        result: SearchResult::default(),
        warnings: Vec::new(),
    };
    walk.visit(root, 0);

    let SearchWalk {
        mut result,
        warnings,
        ..
    } = walk;
    if let Some(filter) = &query.size_filter {
        result.matching_files.retain(|(_, size)| filter.accepts(size));
    }

    debug!(
        root = %root.absolute_path,
        files = result.matching_files.len(),
        directories = result.matching_directories.len(),
        "search finished"
    );
    (result, warnings)
}

struct SearchWalk<'q> {
    query: &'q SearchQuery,
    result: SearchResult,
    warnings: Vec<Diagnostic>,
}

impl SearchWalk<'_> {
    fn visit(&mut self, node: &TreeNode, depth: usize) {
        if node.is_empty() || !self.query.within_depth(depth) {
            return;
        }
        trace!(path = %node.absolute_path, depth, "visiting node");

        if self.query.kind.includes_files() {
            for entry in &node.files {
                if self.query.matcher.is_match(&entry.name) {
                    self.result
                        .matching_files
                        .push((node.entry_path(&entry.name), entry.size.clone()));
                }
            }
        }

        let collect_dirs = self.query.kind.includes_directories();
        let descend = self.query.within_depth(depth + 1);

        for (entry, child) in node.subdirectories() {
            if collect_dirs && self.query.matcher.is_match(&entry.name) {
                self.result
                    .matching_directories
                    .push((node.entry_path(&entry.name), entry.size.clone()));
            }

            if !descend {
                continue;
            }
            match child {
                Some(child) => self.visit(child, depth + 1),
                None => {
                    let warning = Diagnostic::MissingChildNode {
                        parent: node.absolute_path.clone(),
                        name: entry.name.clone(),
                    };
                    warning.log();
                    self.warnings.push(warning);
                }
            }
        }
    }
}
