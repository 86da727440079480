/*!
 * Configuration handling for codedump
 */

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::ensure;
use crate::error::Result;
use crate::filter::FilterRules;

/// Prefix of every report file name
pub const OUTPUT_PREFIX: &str = "code_extraction_";

/// Timestamp layout used in report file names
pub const FILENAME_TIMESTAMP: &str = "%Y-%m-%d_%H-%M-%S";

/// Command-line arguments for codedump.
///
/// The tool always works on the current directory; the flags only tune
/// diagnostics and console output.
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "codedump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Dump the directory tree and text file contents of the current directory",
    long_about = "Walks the current directory, renders a tree of the text files it finds and concatenates their contents into a timestamped code_extraction_<time>.txt report."
)]
pub struct Args {
    /// Increase log verbosity (-v info, -vv debug)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Do not echo report lines to standard output
    #[clap(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Log level selected by the verbosity flags
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to process
    pub target_dir: PathBuf,

    /// Report file path
    pub output_file: PathBuf,

    /// Directory and file selection rules
    pub rules: FilterRules,

    /// Echo every report line to standard output
    pub echo: bool,

    /// Time the run started; stamps the header and the report file name
    pub started_at: DateTime<Local>,
}

impl Config {
    /// Configuration with the default rules for `target_dir`, writing a
    /// report stamped with `now` into that same directory
    pub fn for_directory(target_dir: impl Into<PathBuf>, now: DateTime<Local>) -> Self {
        let target_dir = target_dir.into();
        let output_file = target_dir.join(output_file_name(now));
        Self {
            target_dir,
            output_file,
            rules: FilterRules::default(),
            echo: true,
            started_at: now,
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: &Args, target_dir: impl Into<PathBuf>, now: DateTime<Local>) -> Self {
        Self {
            echo: !args.quiet,
            ..Self::for_directory(target_dir, now)
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.is_dir(),
            PathNotFound,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        if let Some(parent) = self.output_file.parent() {
            ensure!(
                parent == Path::new("") || parent.is_dir(),
                PathNotFound,
                "Output directory not found: {}",
                parent.display()
            );
        }

        ensure!(
            !self.output_file.is_dir(),
            Config,
            "Output path is a directory: {}",
            self.output_file.display()
        );

        Ok(())
    }
}

/// Report file name for a run started at `now`
pub fn output_file_name(now: DateTime<Local>) -> String {
    format!("{}{}.txt", OUTPUT_PREFIX, now.format(FILENAME_TIMESTAMP))
}
