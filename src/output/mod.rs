//! Result formatting and display
//!
//! - `config` - Output configuration types
//! - `console` - Human-readable report, optionally colored
//! - `json` - JSON output to stdout or a file

mod config;
mod console;
mod json;

pub use config::OutputConfig;
pub use console::ResultFormatter;
pub use json::{print_json, write_json_file};
