//! Name matching for regex and wildcard patterns

use std::str::FromStr;

use clap::ValueEnum;
use glob::{MatchOptions, Pattern};
use regex::{Regex, RegexBuilder};

use crate::error::{Result, TreeError};

/// Pattern dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PatternSyntax {
    /// Regular expression anchored at the start of the name only
    Regex,
    /// Shell-style wildcard (`*`, `?`, `[...]`) matched against the whole name
    #[default]
    Wildcard,
}

impl FromStr for PatternSyntax {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// A compiled pattern.
#[derive(Debug, Clone)]
pub enum Matcher {
    Regex(Regex),
    Wildcard {
        pattern: Pattern,
        options: MatchOptions,
    },
}

impl Matcher {
    pub fn new(pattern: &str, syntax: PatternSyntax, ignore_case: bool) -> Result<Self> {
        match syntax {
            PatternSyntax::Regex => {
                // A prefix match: `^` pins the start, the end stays open
                let anchored = format!("^(?:{})", pattern);
                let regex = RegexBuilder::new(&anchored)
                    .case_insensitive(ignore_case)
                    .build()
                    .map_err(|source| TreeError::InvalidRegex {
                        pattern: pattern.to_string(),
                        source,
                    })?;
                Ok(Matcher::Regex(regex))
            }
            PatternSyntax::Wildcard => {
                let compiled =
                    Pattern::new(pattern).map_err(|source| TreeError::InvalidWildcard {
                        pattern: pattern.to_string(),
                        source,
                    })?;
                Ok(Matcher::Wildcard {
                    pattern: compiled,
                    options: MatchOptions {
                        case_sensitive: !ignore_case,
                        require_literal_separator: false,
                        require_literal_leading_dot: false,
                    },
                })
            }
        }
    }

    pub fn regex(pattern: &str) -> Result<Self> {
        Self::new(pattern, PatternSyntax::Regex, false)
    }

    pub fn wildcard(pattern: &str) -> Result<Self> {
        Self::new(pattern, PatternSyntax::Wildcard, false)
    }

    pub fn is_match(&self, name: &str) -> bool {
        match self {
            Matcher::Regex(regex) => regex.is_match(name),
            Matcher::Wildcard { pattern, options } => pattern.matches_with(name, *options),
        }
    }
}
