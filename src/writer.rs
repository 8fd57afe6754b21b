/*!
 * Plain-text writer for repodump
 */

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::types::{IncludedFile, ProjectTitle};

/// Separator between the tree, the file blocks and the instructions
const SEPARATOR: &str = "---";

/// Outcome of rendering one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Root-relative path used as the label
    pub rel_path: String,
    /// Number of lines written (0 if the read failed)
    pub lines: usize,
    /// Number of characters written (0 if the read failed)
    pub chars: usize,
    /// Read failure shown in place of the content
    pub error: Option<String>,
}

/// Per-file results of a render pass, in output order
#[derive(Debug, Clone, Default)]
pub struct RenderSummary {
    pub files: Vec<RenderedFile>,
}

impl RenderSummary {
    pub fn total_lines(&self) -> usize {
        self.files.iter().map(|f| f.lines).sum()
    }

    pub fn total_chars(&self) -> usize {
        self.files.iter().map(|f| f.chars).sum()
    }

    pub fn failures(&self) -> usize {
        self.files.iter().filter(|f| f.error.is_some()).count()
    }
}

/// Open the output sink: the given file, or standard output
pub fn open_sink(output_file: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match output_file {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Text writer for the project dump
pub struct TextWriter {
    /// Text appended verbatim after the last separator
    instructions: String,
}

impl TextWriter {
    /// Create a new text writer
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
        }
    }

    /// Write the title, tree, file contents and instructions to `out`
    ///
    /// A file that cannot be read is rendered as an inline error and does
    /// not stop the remaining files. Errors writing to `out` are returned.
    pub fn write<W: Write + ?Sized>(
        &self,
        out: &mut W,
        title: &ProjectTitle,
        tree_lines: &[String],
        files: &[IncludedFile],
    ) -> io::Result<RenderSummary> {
        self.write_header(out, title)?;
        self.write_tree(out, tree_lines)?;

        let mut summary = RenderSummary::default();
        for file in files {
            summary.files.push(self.write_file(out, file)?);
        }

        self.write_footer(out)?;
        out.flush()?;

        Ok(summary)
    }

    fn write_header<W: Write + ?Sized>(
        &self,
        out: &mut W,
        title: &ProjectTitle,
    ) -> io::Result<()> {
        writeln!(out, "Project: {}", title)?;
        writeln!(out)
    }

    fn write_tree<W: Write + ?Sized>(
        &self,
        out: &mut W,
        tree_lines: &[String],
    ) -> io::Result<()> {
        writeln!(out, "<filetree>")?;
        for line in tree_lines {
            writeln!(out, "{}", line)?;
        }
        writeln!(out, "</filetree>")?;
        writeln!(out)?;
        writeln!(out, "{}", SEPARATOR)
    }

    fn write_file<W: Write + ?Sized>(
        &self,
        out: &mut W,
        file: &IncludedFile,
    ) -> io::Result<RenderedFile> {
        writeln!(out)?;
        writeln!(out, "`{}`", file.rel_path)?;

        match fs::read_to_string(&file.path) {
            Ok(content) => {
                let fence = fence_for(&content);
                writeln!(out, "{}", fence)?;
                out.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    writeln!(out)?;
                }
                writeln!(out, "{}", fence)?;

                Ok(RenderedFile {
                    rel_path: file.rel_path.clone(),
                    lines: content.lines().count(),
                    chars: content.chars().count(),
                    error: None,
                })
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", file.rel_path, e);
                let message = format!("Error reading file: {}", e);
                writeln!(out, "```")?;
                writeln!(out, "{}", message)?;
                writeln!(out, "```")?;

                Ok(RenderedFile {
                    rel_path: file.rel_path.clone(),
                    lines: 0,
                    chars: 0,
                    error: Some(message),
                })
            }
        }
    }

    fn write_footer<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", SEPARATOR)?;
        writeln!(out, "{}", self.instructions)
    }
}

/// Backtick fence long enough that no line of `content` can close it early
pub fn fence_for(content: &str) -> String {
    let longest = content
        .lines()
        .map(|line| {
            line.trim_start()
                .chars()
                .take_while(|&c| c == '`')
                .count()
        })
        .max()
        .unwrap_or(0);

    "`".repeat(if longest >= 3 { longest + 1 } else { 3 })
}
