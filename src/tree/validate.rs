//! Structural checks for loaded trees

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::node::TreeNode;

/// A broken invariant found in a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inconsistency {
    /// Two nodes claim the same absolute path
    DuplicatePath { path: String },
    /// Listed in `directories` but has no nested node
    MissingChild { parent: String, name: String },
    /// Has a nested node but is not listed in `directories`
    UnlistedChild { parent: String, name: String },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconsistency::DuplicatePath { path } => {
                write!(f, "duplicate absolute path: {}", path)
            }
            Inconsistency::MissingChild { parent, name } => {
                write!(f, "{}: directory '{}' has no nested node", parent, name)
            }
            Inconsistency::UnlistedChild { parent, name } => {
                write!(f, "{}: nested node '{}' is not listed in directories", parent, name)
            }
        }
    }
}

impl TreeNode {
    /// Collect every invariant violation in this subtree, in traversal order.
    pub fn validate(&self) -> Vec<Inconsistency> {
        let mut seen = HashSet::new();
        let mut problems = Vec::new();
        validate_node(self, &mut seen, &mut problems);
        problems
    }
}

fn validate_node<'a>(
    node: &'a TreeNode,
    seen: &mut HashSet<&'a str>,
    problems: &mut Vec<Inconsistency>,
) {
    if !seen.insert(node.absolute_path.as_str()) {
        problems.push(Inconsistency::DuplicatePath {
            path: node.absolute_path.clone(),
        });
    }

    let listed: HashSet<&str> = node.directories.iter().map(|e| e.name.as_str()).collect();

    for (entry, child) in node.subdirectories() {
        if child.is_none() {
            problems.push(Inconsistency::MissingChild {
                parent: node.absolute_path.clone(),
                name: entry.name.clone(),
            });
        }
    }

    for (name, _) in node.children() {
        if !listed.contains(name) {
            problems.push(Inconsistency::UnlistedChild {
                parent: node.absolute_path.clone(),
                name: name.to_string(),
            });
        }
    }

    let mut visited = HashSet::new();
    for (entry, child) in node.subdirectories() {
        if let Some(child) = child {
            if visited.insert(entry.name.as_str()) {
                validate_node(child, seen, problems);
            }
        }
    }
}
