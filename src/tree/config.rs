//! Configuration types for tree building

/// Configuration for tree building behavior.
#[derive(Debug, Clone, Default)]
pub struct BuilderConfig {
    /// Entry names (or glob patterns) left out of the index entirely
    pub ignore_patterns: Vec<String>,
}

impl BuilderConfig {
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }
}
