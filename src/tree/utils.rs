//! Shared helpers for building and searching trees

use std::path::Path;

use glob::Pattern;

use crate::error::{Result, TreeError};

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Check if a name matches one of the ignore patterns.
pub fn should_ignore_name(name: &str, ignore_patterns: &[String]) -> bool {
    ignore_patterns
        .iter()
        .any(|pattern| name == pattern || glob_match(pattern, name))
}

/// Match a glob pattern against a name.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches(name))
        .unwrap_or(false)
}

/// Get the name of a path, defaulting to the full path for roots like `/`.
pub fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Join a directory path and an entry name the way the directory path is
/// already written: backslashes for Windows-style paths, slashes otherwise.
pub fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        return name.to_string();
    }
    if base.ends_with('/') || base.ends_with('\\') {
        return format!("{}{}", base, name);
    }
    let separator = if base.contains('\\') && !base.contains('/') {
        '\\'
    } else {
        '/'
    };
    format!("{}{}{}", base, separator, name)
}

/// Format a size in bytes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// Parse a size string like "500KB", "5M", "1G" into bytes.
/// Supports suffixes: B, K/KB (1024), M/MB (1024^2), G/GB (1024^3).
/// Without suffix, interprets as bytes. Fractions are allowed with a
/// suffix ("1.5MB") and rounded down to whole bytes.
pub fn parse_size(s: &str) -> Result<u64> {
    let upper = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = upper.strip_suffix("GB") {
        (n, GB)
    } else if let Some(n) = upper.strip_suffix('G') {
        (n, GB)
    } else if let Some(n) = upper.strip_suffix("MB") {
        (n, MB)
    } else if let Some(n) = upper.strip_suffix('M') {
        (n, MB)
    } else if let Some(n) = upper.strip_suffix("KB") {
        (n, KB)
    } else if let Some(n) = upper.strip_suffix('K') {
        (n, KB)
    } else if let Some(n) = upper.strip_suffix('B') {
        (n, 1)
    } else {
        (upper.as_str(), 1)
    };

    let num_str = num_str.trim();
    let invalid = |reason: String| TreeError::InvalidSize {
        input: s.to_string(),
        reason,
    };

    if let Ok(whole) = num_str.parse::<u64>() {
        return whole
            .checked_mul(multiplier)
            .ok_or_else(|| invalid("size overflows 64 bits".to_string()));
    }

    let fractional: f64 = num_str
        .parse()
        .map_err(|_| invalid(format!("invalid number: {}", num_str)))?;
    if !fractional.is_finite() || fractional < 0.0 {
        return Err(invalid(format!("invalid number: {}", num_str)));
    }
    let bytes = fractional * multiplier as f64;
    if bytes > u64::MAX as f64 {
        return Err(invalid("size overflows 64 bits".to_string()));
    }
    Ok(bytes as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match() {
        // Basic patterns
        assert!(glob_match("*.rs", "main.rs"));
        assert!(!glob_match("*.rs", "main.py"));
        assert!(glob_match("test*", "test_foo"));
        assert!(!glob_match("test*", "foo_test"));

        // Single character wildcard
        assert!(glob_match("test?.rs", "test1.rs"));
        assert!(!glob_match("test?.rs", "test12.rs"));

        // Character classes and ranges
        assert!(glob_match("[abc].txt", "a.txt"));
        assert!(!glob_match("[abc].txt", "d.txt"));
        assert!(!glob_match("[a-z].txt", "X.txt"));
    }

    #[test]
    fn test_should_ignore_name() {
        let patterns = vec!["node_modules".to_string(), "*.tmp".to_string()];
        assert!(should_ignore_name("node_modules", &patterns));
        assert!(should_ignore_name("scratch.tmp", &patterns));
        assert!(!should_ignore_name("src", &patterns));
        assert!(!should_ignore_name("anything", &[]));
    }

    #[test]
    fn test_join_path_follows_base_style() {
        assert_eq!(join_path("/data/devices", "a.txt"), "/data/devices/a.txt");
        assert_eq!(join_path("/", "etc"), "/etc");
        assert_eq!(
            join_path("C:\\Users\\me\\devices", "a.txt"),
            "C:\\Users\\me\\devices\\a.txt"
        );
        assert_eq!(join_path("C:\\", "devices"), "C:\\devices");
        assert_eq!(join_path("", "orphan"), "orphan");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1023), "1023B");
        assert_eq!(format_size(1024), "1.0K");
        assert_eq!(format_size(1536), "1.5K");
        assert_eq!(format_size(5 * MB), "5.0M");
        assert_eq!(format_size(2 * GB), "2.0G");
    }

    #[test]
    fn test_parse_size_suffixes() {
        assert_eq!(parse_size("500").unwrap(), 500);
        assert_eq!(parse_size("500B").unwrap(), 500);
        assert_eq!(parse_size("500KB").unwrap(), 500 * 1024);
        assert_eq!(parse_size("500k").unwrap(), 500 * 1024);
        assert_eq!(parse_size(" 2MB ").unwrap(), 2 * 1024 * 1024);
        assert_eq!(parse_size("1G").unwrap(), 1024 * 1024 * 1024);
        assert_eq!(parse_size("1.5MB").unwrap(), 1_572_864);
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(parse_size("").is_err());
        assert!(parse_size("abc").is_err());
        assert!(parse_size("12XB").is_err());
        assert!(parse_size("-5KB").is_err());
        assert!(parse_size("99999999999999999999GB").is_err());
    }
}
