//! Searching loaded trees
//!
//! - `find_node`: resolve an absolute path to its node
//! - `search`: collect files and directories whose names match a pattern
//! - `TreeSearcher`: the two above over a document file, with diagnostics

mod diagnostics;
mod engine;
mod matcher;
mod query;
mod result;
mod searcher;

pub use diagnostics::{Diagnostic, Severity};
pub use engine::{find_node, search};
pub use matcher::{Matcher, PatternSyntax};
pub use query::{SearchKind, SearchQuery, SizeFilter};
pub use result::{SearchReport, SearchResult};
pub use searcher::TreeSearcher;
