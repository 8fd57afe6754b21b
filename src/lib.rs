/*!
 * repodump - Dump a project's file tree and sources as LLM context
 *
 * This library walks a directory, selects files by glob pattern and renders
 * the tree plus the selected files' contents as a single text block meant
 * to be pasted into a chat with a Large Language Model.
 */

pub mod clipboard;
pub mod config;
pub mod error;
pub mod filter;
pub mod git;
pub mod project;
pub mod report;
pub mod types;
pub mod walker;
pub mod writer;

#[cfg(test)]
mod tests;

use std::io::Write;

// Re-export main components for easier access
pub use config::Config;
pub use error::{RepoDumpError, Result};
pub use filter::{order, FilterRules};
pub use project::resolve_title;
pub use report::{ReportFormat, Reporter, ScanReport};
pub use types::{DirectoryListing, IncludedFile, ProjectTitle, TitleSource};
pub use walker::{walk, TreeWalker};
pub use writer::{RenderSummary, TextWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the whole pipeline for `config`, writing the dump to `out`
///
/// The title is resolved once, the tree is walked once, and the selected
/// files are rendered README-first. The output file named in `config`, if
/// it already exists inside the tree, is left out of the dump.
pub fn dump<W: Write + ?Sized>(config: &Config, out: &mut W) -> Result<RenderSummary> {
    let title = resolve_title(&config.target_dir);

    let walker = walk(&config.target_dir, config.max_depth, config.rules.clone())
        .skip_path(config.output_file.as_deref());
    let scan = walker::scan(walker)?;
    let files = order(scan.files);

    let summary = TextWriter::new(config.instructions.as_str()).write(
        out,
        &title,
        &scan.tree_lines,
        &files,
    )?;

    Ok(summary)
}
