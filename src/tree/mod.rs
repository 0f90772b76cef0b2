//! Directory trees: building, persisting and checking them
//!
//! - `TreeBuilder`: walks the filesystem once and produces a `TreeNode`
//! - `TreeDocument`: the `{ "devices": ... }` JSON file a search reads back
//! - `TreeNode::validate`: optional structural check of a loaded tree

mod builder;
mod config;
mod document;
mod node;
mod utils;
mod validate;

// Re-export public types
pub use builder::{BuiltTree, TreeBuilder};
pub use config::BuilderConfig;
pub use document::TreeDocument;
pub use node::{
    ABSOLUTE_PATH_KEY, DIRECTORIES_KEY, Entry, EntrySize, FILES_KEY, RESERVED_CHILDREN_KEY,
    TreeNode, is_reserved_name,
};
pub use utils::{format_size, glob_match, join_path, parse_size};
pub use validate::Inconsistency;
