//! pathtree - index a directory tree to JSON and search it by name pattern

pub mod error;
pub mod logging;
pub mod output;
pub mod search;
pub mod stats;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Result, TreeError};
pub use output::{OutputConfig, ResultFormatter, print_json, write_json_file};
pub use search::{
    Diagnostic, Matcher, PatternSyntax, SearchKind, SearchQuery, SearchReport, SearchResult,
    Severity, SizeFilter, TreeSearcher, find_node,
};
pub use stats::{StatsCollector, TreeStats, print_stats, print_stats_json};
pub use tree::{
    BuilderConfig, BuiltTree, Entry, EntrySize, Inconsistency, TreeBuilder, TreeDocument,
    TreeNode,
};
