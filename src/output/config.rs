//! Output configuration types

use crate::search::SearchKind;

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Which result sections are printed, and which get a "no matches" line
    pub kind: SearchKind,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            kind: SearchKind::Files,
        }
    }
}
