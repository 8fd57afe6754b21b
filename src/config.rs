/*!
 * Configuration handling for repodump
 */

use std::fs;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use clap_complete::Shell;

use crate::error::Result;
use crate::filter::FilterRules;
use crate::{bail, ensure};

/// Default include patterns: README in any case and common source files
pub const DEFAULT_INCLUDE: &[&str] = &[
    "[Rr][Ee][Aa][Dd][Mm][Ee]",
    "[Rr][Ee][Aa][Dd][Mm][Ee].*",
    "*.py",
    "*.ts",
    "*.js",
    "*.go",
    "*.rs",
    "*.h",
    "*.c",
    "*.cpp",
    "*.conf",
];

/// Default text appended after the file contents
pub const DEFAULT_INSTRUCTIONS: &str = "The above is the file tree of the project followed by \
the contents of its main source files, each labeled with its path relative to the project root. \
Read all of it before answering. When you refer to code, cite the file path. When you propose \
changes, keep them consistent with the existing structure, naming and style of the project, \
show complete replacements for the parts you modify, and say which file each change belongs to. \
If something you need is not included above, say so instead of guessing.";

/// Command-line arguments for repodump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "repodump",
    version = crate::VERSION,
    about = "Dump a project's file tree and source files as one text block for LLM context",
    long_about = "Walks a directory, prints its file tree and the contents of the files matching the include patterns, and appends instructions, ready to paste into a chat with a Large Language Model (LLM)."
)]
pub struct Args {
    /// Target directory to process
    #[clap(default_value = ".")]
    pub directory: PathBuf,

    /// Glob pattern of files to include (repeatable)
    #[clap(short, long = "include", value_name = "GLOB", default_values = DEFAULT_INCLUDE)]
    pub include: Vec<String>,

    /// Glob pattern of files and directories to exclude (repeatable)
    #[clap(short, long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Max depth to traverse in the directory tree
    #[clap(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Output file (default is stdout)
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Text appended at the end of the output
    #[clap(short = 't', long, default_value = DEFAULT_INSTRUCTIONS, hide_default_value = true)]
    pub instructions: String,

    /// Copy output to clipboard
    #[clap(long, help = "Copy output to system clipboard")]
    pub clip: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Silence logs and the summary report
    #[clap(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Target directory to process
    pub target_dir: PathBuf,

    /// Include/exclude rules
    pub rules: FilterRules,

    /// Maximum traversal depth (unlimited if None)
    pub max_depth: Option<usize>,

    /// Output file path (stdout if None)
    pub output_file: Option<PathBuf>,

    /// Text appended after the file contents
    pub instructions: String,

    /// Copy output to clipboard
    pub clip: bool,

    /// Suppress the summary report
    pub quiet: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            target_dir: args.directory,
            rules: FilterRules::new(args.include, args.exclude),
            max_depth: args.max_depth,
            output_file: args.output,
            instructions: args.instructions,
            clip: args.clip,
            quiet: args.quiet,
        }
    }

    /// Validate the configuration
    ///
    /// The target must be an existing, readable directory; an output file,
    /// when given, must live in an existing directory.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.is_dir(),
            PathNotFound,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        if let Err(e) = fs::read_dir(&self.target_dir) {
            bail!(
                Config,
                "Target directory is not readable: {}: {}",
                self.target_dir.display(),
                e
            );
        }

        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                ensure!(
                    parent.as_os_str().is_empty() || parent.is_dir(),
                    PathNotFound,
                    "Output directory not found: {}",
                    parent.display()
                );
            }
            ensure!(
                !output_file.is_dir(),
                InvalidArgument,
                "Output path is a directory: {}",
                output_file.display()
            );
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from("."),
            rules: FilterRules::new(
                DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
                Vec::new(),
            ),
            max_depth: None,
            output_file: None,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            clip: false,
            quiet: false,
        }
    }
}
