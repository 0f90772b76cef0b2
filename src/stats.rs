//! Tree statistics collection and display
//!
//! Aggregates a loaded tree: directory and file counts, total bytes,
//! depth, and a breakdown by file extension.

use serde::Serialize;
use std::collections::HashMap;
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::{TreeNode, format_size};

/// Collected statistics about an indexed tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TreeStats {
    /// Path of the node the statistics were collected from
    pub root: String,
    /// Directories below the root (the root itself is not counted)
    pub directories: usize,
    /// Total number of files
    pub files: usize,
    /// Sum of every file size known in bytes
    pub total_bytes: u64,
    /// Files whose size is unknown or an unparseable label
    pub files_without_size: usize,
    /// Deepest directory level reached, the root being level 0
    pub max_depth: usize,
    /// Statistics by extension, most files first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_extension: Vec<ExtensionStats>,
}

/// Statistics for a single file extension.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionStats {
    /// Extension with leading dot, or empty for files without one
    pub extension: String,
    pub files: usize,
    pub bytes: u64,
}

/// Statistics collector that accumulates data during tree traversal.
#[derive(Debug, Default)]
pub struct StatsCollector {
    directories: usize,
    files: usize,
    total_bytes: u64,
    files_without_size: usize,
    max_depth: usize,
    /// Maps extension -> (file_count, byte_count)
    by_extension: HashMap<String, (usize, u64)>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file in the statistics.
    pub fn record_file(&mut self, name: &str, bytes: Option<u64>) {
        self.files += 1;

        let entry = self
            .by_extension
            .entry(extension_of(name))
            .or_insert((0, 0));
        entry.0 += 1;

        match bytes {
            // Legacy labels can parse to huge values; totals saturate
            Some(b) => {
                entry.1 = entry.1.saturating_add(b);
                self.total_bytes = self.total_bytes.saturating_add(b);
            }
            None => self.files_without_size += 1,
        }
    }

    /// Record a directory found at `depth`.
    pub fn record_directory(&mut self, depth: usize) {
        self.directories += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Walk `node` and everything listed below it.
    pub fn record_tree(&mut self, node: &TreeNode, depth: usize) {
        for file in &node.files {
            self.record_file(&file.name, file.size.bytes());
        }
        for (_, child) in node.subdirectories() {
            self.record_directory(depth + 1);
            if let Some(child) = child {
                self.record_tree(child, depth + 1);
            }
        }
    }

    /// Finalize and return the collected statistics.
    pub fn finalize(self, root: &str) -> TreeStats {
        let mut by_extension: Vec<ExtensionStats> = self
            .by_extension
            .into_iter()
            .map(|(extension, (files, bytes))| ExtensionStats {
                extension,
                files,
                bytes,
            })
            .collect();

        // Most files first, ties broken by name for stable output
        by_extension.sort_by(|a, b| {
            b.files
                .cmp(&a.files)
                .then_with(|| a.extension.cmp(&b.extension))
        });

        TreeStats {
            root: root.to_string(),
            directories: self.directories,
            files: self.files,
            total_bytes: self.total_bytes,
            files_without_size: self.files_without_size,
            max_depth: self.max_depth,
            by_extension,
        }
    }
}

impl TreeStats {
    /// Collect statistics for the subtree rooted at `node`.
    pub fn collect(node: &TreeNode) -> Self {
        let mut collector = StatsCollector::new();
        collector.record_tree(node, 0);
        collector.finalize(&node.absolute_path)
    }
}

/// Lowercased extension with its leading dot; dotfiles have none.
fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => name[idx..].to_lowercase(),
        _ => String::new(),
    }
}

/// Print statistics to stdout with optional color.
pub fn print_stats(stats: &TreeStats, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);
    write_stats(&mut stdout, stats)
}

/// Write statistics to any color-capable writer.
pub fn write_stats<W: WriteColor>(out: &mut W, stats: &TreeStats) -> io::Result<()> {
    // Header
    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    out.set_color(&bold)?;
    writeln!(out, "Tree Statistics: {}", stats.root)?;
    out.reset()?;
    writeln!(out, "───────────────────")?;

    // Summary
    writeln!(out, "Directories:  {}", format_number(stats.directories))?;
    writeln!(out, "Files:        {} total", format_number(stats.files))?;
    writeln!(
        out,
        "Size:         {} ({} bytes)",
        format_size(stats.total_bytes),
        format_number_u64(stats.total_bytes)
    )?;
    if stats.files_without_size > 0 {
        writeln!(
            out,
            "Unsized:      {} files",
            format_number(stats.files_without_size)
        )?;
    }
    writeln!(out, "Depth:        {}", stats.max_depth)?;
    writeln!(out)?;

    // By extension
    if !stats.by_extension.is_empty() {
        out.set_color(&bold)?;
        writeln!(out, "By Extension:")?;
        out.reset()?;

        let mut ext_color = ColorSpec::new();
        ext_color.set_fg(Some(Color::Cyan));

        for ext in &stats.by_extension {
            write!(out, "  ")?;
            out.set_color(&ext_color)?;
            let label = if ext.extension.is_empty() {
                "(none)"
            } else {
                ext.extension.as_str()
            };
            write!(out, "{:<14}", label)?;
            out.reset()?;
            writeln!(
                out,
                "{:>6} files  {:>8}",
                format_number(ext.files),
                format_size(ext.bytes)
            )?;
        }
    }

    Ok(())
}

/// Format a number with thousand separators.
fn format_number(n: usize) -> String {
    format_number_u64(n as u64)
}

fn format_number_u64(n: u64) -> String {
    let s = n.to_string();
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::new();

    for (i, c) in chars.iter().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, *c);
    }

    result
}

/// Print statistics as JSON.
pub fn print_stats_json(stats: &TreeStats) -> io::Result<()> {
    let json = serde_json::to_string_pretty(stats).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
