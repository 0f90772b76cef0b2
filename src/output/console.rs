//! Console report for search results

use std::io;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::search::SearchResult;

use super::config::OutputConfig;

/// Formatter for human-readable search results.
pub struct ResultFormatter {
    config: OutputConfig,
}

impl ResultFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Print the report to stdout.
    pub fn print(&self, result: &SearchResult) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write(&mut stdout, result)
    }

    /// Render the report as plain text.
    pub fn format(&self, result: &SearchResult) -> String {
        let mut buf = termcolor::NoColor::new(Vec::new());
        // Writing into a Vec cannot fail
        let _ = self.write(&mut buf, result);
        String::from_utf8_lossy(&buf.into_inner()).into_owned()
    }

    pub fn write<W: WriteColor>(&self, out: &mut W, result: &SearchResult) -> io::Result<()> {
        let kind = self.config.kind;
        let mut wrote_section = false;

        if kind.includes_directories() {
            if result.matching_directories.is_empty() {
                writeln!(out, "No matching directories found.")?;
            } else {
                self.write_header(out, "Matching Directories:")?;
                for (path, size) in &result.matching_directories {
                    self.write_line(out, "Directory", path, &size.to_string(), Color::Blue)?;
                }
            }
            wrote_section = true;
        }

        if kind.includes_files() {
            if wrote_section {
                writeln!(out)?;
            }
            if result.matching_files.is_empty() {
                writeln!(out, "No matching files found.")?;
            } else {
                self.write_header(out, "Matching Files:")?;
                for (path, size) in &result.matching_files {
                    self.write_line(out, "File", path, &size.to_string(), Color::Green)?;
                }
            }
        }

        Ok(())
    }

    fn write_header<W: WriteColor>(&self, out: &mut W, title: &str) -> io::Result<()> {
        let mut bold = ColorSpec::new();
        bold.set_bold(true);
        out.set_color(&bold)?;
        writeln!(out, "{}", title)?;
        out.reset()
    }

    fn write_line<W: WriteColor>(
        &self,
        out: &mut W,
        label: &str,
        path: &str,
        size: &str,
        color: Color,
    ) -> io::Result<()> {
        write!(out, "{}: ", label)?;
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color));
        out.set_color(&spec)?;
        write!(out, "{}", path)?;
        out.reset()?;
        writeln!(out, ", Size: {}", size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchKind;
    use crate::tree::EntrySize;

    fn formatter(kind: SearchKind) -> ResultFormatter {
        ResultFormatter::new(OutputConfig {
            use_color: false,
            kind,
        })
    }

    fn sample() -> SearchResult {
        SearchResult {
            matching_files: vec![("/d/test_a.txt".to_string(), EntrySize::Bytes(12))],
            matching_directories: vec![("/d/test_dir".to_string(), EntrySize::Bytes(4096))],
        }
    }

    #[test]
    fn test_both_sections() {
        let text = formatter(SearchKind::Both).format(&sample());
        assert_eq!(
            text,
            "Matching Directories:\n\
             Directory: /d/test_dir, Size: 4096\n\
             \n\
             Matching Files:\n\
             File: /d/test_a.txt, Size: 12\n"
        );
    }

    #[test]
    fn test_files_only_hides_directories() {
        let text = formatter(SearchKind::Files).format(&sample());
        assert!(!text.contains("Directory:"));
        assert!(text.contains("File: /d/test_a.txt, Size: 12"));
    }

    #[test]
    fn test_empty_sections_say_so() {
        let text = formatter(SearchKind::Both).format(&SearchResult::default());
        assert_eq!(
            text,
            "No matching directories found.\n\nNo matching files found.\n"
        );
    }
}
