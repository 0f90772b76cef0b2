//! Search parameters

use clap::ValueEnum;

use crate::error::Result;
use crate::tree::{EntrySize, parse_size};

use super::matcher::{Matcher, PatternSyntax};

/// What a search collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SearchKind {
    #[default]
    Files,
    Directories,
    Both,
}

impl SearchKind {
    pub fn includes_files(self) -> bool {
        matches!(self, SearchKind::Files | SearchKind::Both)
    }

    pub fn includes_directories(self) -> bool {
        matches!(self, SearchKind::Directories | SearchKind::Both)
    }
}

/// Restricts file results by size. Directories are never filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeFilter {
    /// Keep files strictly larger than this many bytes
    Exceeds(u64),
    /// Keep files whose size label equals this one, e.g. `"500KB"`
    ExactLabel(String),
}

impl SizeFilter {
    /// Threshold filter from a human-readable size such as `"10MB"`.
    pub fn exceeds(size: &str) -> Result<Self> {
        Ok(SizeFilter::Exceeds(parse_size(size)?))
    }

    pub fn exact_label(label: impl Into<String>) -> Self {
        SizeFilter::ExactLabel(label.into())
    }

    pub fn accepts(&self, size: &EntrySize) -> bool {
        match self {
            SizeFilter::Exceeds(threshold) => size.bytes().is_some_and(|b| b > *threshold),
            SizeFilter::ExactLabel(label) => label_matches(label, size),
        }
    }
}

/// Labels match when their text is equal ignoring case and surrounding
/// whitespace, or when both sides parse to the same byte count.
fn label_matches(label: &str, size: &EntrySize) -> bool {
    let wanted = label.trim();
    if let EntrySize::Label(actual) = size {
        if actual.trim().eq_ignore_ascii_case(wanted) {
            return true;
        }
    }
    match (parse_size(wanted), size.bytes()) {
        (Ok(wanted_bytes), Some(actual_bytes)) => wanted_bytes == actual_bytes,
        _ => false,
    }
}

/// A single search over a tree.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub matcher: Matcher,
    pub kind: SearchKind,
    /// Deepest level searched; the search root is level 0
    pub max_depth: Option<usize>,
    pub size_filter: Option<SizeFilter>,
}

impl SearchQuery {
    pub fn new(matcher: Matcher) -> Self {
        Self {
            matcher,
            kind: SearchKind::default(),
            max_depth: None,
            size_filter: None,
        }
    }

    /// Compile `pattern` and build a query with default settings.
    pub fn with_pattern(pattern: &str, syntax: PatternSyntax) -> Result<Self> {
        Ok(Self::new(Matcher::new(pattern, syntax, false)?))
    }

    pub fn kind(mut self, kind: SearchKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn size_filter(mut self, filter: SizeFilter) -> Self {
        self.size_filter = Some(filter);
        self
    }

    /// Whether a node at `depth` is inside the searched range.
    pub fn within_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}
