//! CLI entry point for pathtree

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use pathtree::logging::{LoggingConfig, init_logging};
use pathtree::{
    BuilderConfig, Matcher, OutputConfig, PatternSyntax, ResultFormatter, SearchKind,
    SearchQuery, SizeFilter, TreeBuilder, TreeDocument, TreeSearcher, TreeStats, find_node,
    print_json, print_stats, print_stats_json, write_json_file,
};
use tracing::info;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pathtree")]
#[command(about = "Index a directory tree to JSON and search it by name pattern")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto", global = true)]
    color: ColorMode,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Index a directory into a tree JSON document
    Index {
        /// Directory to index
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Write the document to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Leave out entries matching pattern (can be used multiple times)
        #[arg(short = 'I', long = "ignore")]
        ignore: Vec<String>,

        /// Write compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Search a tree document for files or directories by name
    Search(SearchArgs),

    /// Show statistics for a tree document
    Stats {
        /// Tree JSON document
        tree: PathBuf,

        /// Absolute path of the subtree to summarize (default: whole tree)
        #[arg(long = "search-path", value_name = "PATH")]
        search_path: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Check a tree document for structural inconsistencies
    Check {
        /// Tree JSON document
        tree: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Tree JSON document
    tree: PathBuf,

    /// Absolute path to search under, written exactly as stored in the tree
    search_path: String,

    /// Name pattern
    pattern: String,

    /// Pattern syntax: regex (prefix match) or wildcard (whole-name match)
    #[arg(long, value_name = "SYNTAX", default_value = "wildcard")]
    syntax: PatternSyntax,

    /// What to search for: files, directories, both
    #[arg(long = "for", value_name = "KIND", default_value = "files")]
    kind: SearchKind,

    /// Search only N levels below the search path
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Only report files larger than SIZE (e.g. 500KB, 10M, 1G)
    #[arg(long = "larger-than", value_name = "SIZE", conflicts_with = "size_label")]
    larger_than: Option<String>,

    /// Only report files whose size label equals LABEL exactly
    #[arg(long = "size-label", value_name = "LABEL")]
    size_label: Option<String>,

    /// Match names case-insensitively
    #[arg(short = 'i', long = "ignore-case")]
    ignore_case: bool,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Also write the JSON report to FILE
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let use_color = should_use_color(cli.color);

    init_logging(&LoggingConfig {
        verbose: cli.verbose,
        quiet: cli.quiet,
        use_color: use_color && io::stderr().is_terminal(),
    });

    let code = match run(&cli, use_color) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("pathtree: {}", e);
            1
        }
    };
    process::exit(code);
}

fn run(cli: &Cli, use_color: bool) -> pathtree::Result<i32> {
    match &cli.command {
        Command::Index {
            path,
            output,
            ignore,
            compact,
        } => run_index(path, output.as_deref(), ignore, !compact),
        Command::Search(args) => run_search(args, use_color),
        Command::Stats {
            tree,
            search_path,
            json,
        } => run_stats(tree, search_path.as_deref(), *json, use_color),
        Command::Check { tree } => run_check(tree),
    }
}

fn run_index(
    path: &Path,
    output: Option<&Path>,
    ignore: &[String],
    pretty: bool,
) -> pathtree::Result<i32> {
    let root = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };

    let config = BuilderConfig::default().with_ignore_patterns(ignore.to_vec());
    let built = TreeBuilder::new(config).build(&root)?;
    let document = TreeDocument::new(built.root);

    match output {
        Some(file) => {
            document.save(file, pretty)?;
            info!(output = %file.display(), "wrote tree document");
        }
        None => {
            let stdout = io::stdout();
            document.write_to(&mut stdout.lock(), pretty)?;
        }
    }
    Ok(0)
}

fn run_search(args: &SearchArgs, use_color: bool) -> pathtree::Result<i32> {
    let matcher = Matcher::new(&args.pattern, args.syntax, args.ignore_case)?;
    let mut query = SearchQuery::new(matcher).kind(args.kind);
    if let Some(level) = args.level {
        query = query.max_depth(level);
    }
    if let Some(size) = &args.larger_than {
        query = query.size_filter(SizeFilter::exceeds(size)?);
    } else if let Some(label) = &args.size_label {
        query = query.size_filter(SizeFilter::exact_label(label.as_str()));
    }

    let searcher = TreeSearcher::open(&args.tree);
    let report = searcher.search(&args.search_path, &query);

    if let Some(file) = &args.output {
        write_json_file(&report.result, file)?;
    }

    if args.json {
        print_json(&report.result)?;
    } else {
        let formatter = ResultFormatter::new(OutputConfig {
            use_color,
            kind: args.kind,
        });
        formatter.print(&report.result)?;
    }

    Ok(if report.has_errors() { 1 } else { 0 })
}

fn run_stats(
    tree: &Path,
    search_path: Option<&str>,
    json: bool,
    use_color: bool,
) -> pathtree::Result<i32> {
    let document = TreeDocument::load(tree)?;
    let Some(devices) = document.devices.as_ref() else {
        eprintln!("pathtree: 'devices' node not found in {}", tree.display());
        return Ok(1);
    };

    let root = match search_path {
        Some(target) => match find_node(devices, target) {
            Some(node) => node,
            None => {
                eprintln!("pathtree: no matching node found for {}", target);
                return Ok(1);
            }
        },
        None => devices,
    };

    let stats = TreeStats::collect(root);
    if json {
        print_stats_json(&stats)?;
    } else {
        print_stats(&stats, use_color)?;
    }
    Ok(0)
}

fn run_check(tree: &Path) -> pathtree::Result<i32> {
    let document = TreeDocument::load(tree)?;
    let Some(devices) = document.devices.as_ref() else {
        eprintln!("pathtree: 'devices' node not found in {}", tree.display());
        return Ok(1);
    };

    let problems = devices.validate();
    if problems.is_empty() {
        println!("{}: tree is consistent", tree.display());
        return Ok(0);
    }
    for problem in &problems {
        println!("{}", problem);
    }
    println!("{} problem(s) found", problems.len());
    Ok(1)
}
