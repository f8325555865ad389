//! CLI entry point for sweep

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use sweep::walk::normalize_extension;
use sweep::{RunSummary, SweepConfig, format_size, parse_size};

#[derive(Parser, Debug)]
#[command(name = "sweep")]
#[command(about = "Walk a directory tree and list, delete or archive matching files")]
#[command(version)]
struct Args {
    /// Root directory to walk
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Only match files with this extension (e.g. ".log"; the dot is optional)
    #[arg(short = 'e', long = "ext", value_name = "EXT", default_value = "")]
    ext: String,

    /// Only match files larger than SIZE. Use suffixes: K, M, G (e.g., 5M for 5MB)
    #[arg(short = 's', long = "size", value_name = "SIZE", value_parser = parse_size, default_value = "0")]
    size: u64,

    /// List matching files (takes priority over --archive and --delete)
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Delete matching files
    #[arg(short = 'd', long = "delete")]
    delete: bool,

    /// Archive matching files into DIR/<root name>.gz (takes priority over --delete)
    #[arg(short = 'a', long = "archive", value_name = "DIR")]
    archive: Option<PathBuf>,

    /// Append deletion records to FILE instead of stdout
    #[arg(long = "log", value_name = "FILE")]
    log: Option<PathBuf>,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "max-depth", value_name = "N")]
    max_depth: Option<usize>,

    /// Skip entries whose name matches PATTERN (can be used multiple times)
    #[arg(short = 'I', long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Honour .gitignore and .ignore files while walking
    #[arg(long = "gitignore")]
    gitignore: bool,

    /// Print a summary of what was matched to stderr
    #[arg(long = "summary")]
    summary: bool,

    /// Increase diagnostic output (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn print_summary(summary: &RunSummary) {
    eprintln!(
        "sweep: {} files visited, {} matched ({}), {} listed, {} archived, {} deleted",
        summary.files_visited,
        summary.files_matched,
        format_size(summary.bytes_matched),
        summary.listed,
        summary.archived,
        summary.deleted
    );
    if let Some(bundle) = &summary.bundle {
        eprintln!("sweep: archive written to {}", bundle.display());
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = SweepConfig {
        extension: normalize_extension(&args.ext),
        min_size: args.size,
        list: args.list,
        delete: args.delete,
        archive_dir: args.archive.clone(),
        max_depth: args.max_depth,
        ignore_patterns: args.ignore.clone(),
        respect_gitignore: args.gitignore,
    };

    if config.active_actions() > 1 {
        log::warn!(
            "several actions requested; only '{}' will run",
            sweep::Action::select(&config).name()
        );
    }

    if !config.is_mutating() {
        log::info!("dry run: no files will be modified");
    }

    let mut deletion_log: Box<dyn Write> = match &args.log {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Box::new(BufWriter::new(file)),
            Err(e) => {
                eprintln!("sweep: cannot open log file '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Box::new(io::stdout()),
    };

    let mut out = BufWriter::new(io::stdout());

    match sweep::run(&args.root, &mut out, &mut deletion_log, &config) {
        Ok(summary) => {
            if args.summary {
                print_summary(&summary);
            }
        }
        Err(e) => {
            if let Err(flush_err) = out.flush() {
                log::warn!("failed to flush output after error: {}", flush_err);
            }
            if let Err(flush_err) = deletion_log.flush() {
                log::warn!("failed to flush deletion log after error: {}", flush_err);
            }
            eprintln!("sweep: {}", e);
            process::exit(1);
        }
    }
}
