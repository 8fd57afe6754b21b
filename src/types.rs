/*!
 * Core types and data structures for the repodump application
 */

use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

use strum::Display;

/// Which naming strategy produced the project title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TitleSource {
    /// `url = ...` entry of the version-control config
    #[strum(to_string = "git remote")]
    GitRemote,
    /// `project.name` of the project metadata file
    #[strum(to_string = "project metadata")]
    Metadata,
    /// First-level heading on the first line of a README
    #[strum(to_string = "README heading")]
    Readme,
    /// Base name of the target directory
    #[strum(to_string = "directory name")]
    Directory,
}

/// Display title of the project, resolved once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTitle {
    name: String,
    source: TitleSource,
}

impl ProjectTitle {
    pub fn new(name: impl Into<String>, source: TitleSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> TitleSource {
        self.source
    }
}

impl fmt::Display for ProjectTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One directory visited by the tree walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Absolute path of the directory
    pub path: PathBuf,
    /// Path relative to the walk root with `/` separators (empty for the root)
    pub rel_path: String,
    /// Distance from the walk root (root is 0)
    pub depth: usize,
    /// Files in this directory that passed the filter, sorted by name
    pub files: Vec<String>,
    /// Subdirectories that will be visited next, sorted by name
    pub subdirs: Vec<String>,
    /// Subdirectories past the depth limit, shown but never visited
    pub pruned_dirs: Vec<String>,
}

impl DirectoryListing {
    /// Name shown in the tree for this directory
    ///
    /// The walk root is always labeled with its own name, even when that
    /// name starts with a dot.
    pub fn label(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string());
        format!("{}/", name)
    }
}

/// A file selected for rendering
///
/// Ordering puts README-like files first, then sorts by relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludedFile {
    /// Absolute path used to read the file
    pub path: PathBuf,
    /// Root-relative path with `/` separators, used as the label
    pub rel_path: String,
    /// Whether the base name looks like a README
    pub is_readme: bool,
}

impl Ord for IncludedFile {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .is_readme
            .cmp(&self.is_readme)
            .then_with(|| self.rel_path.cmp(&other.rel_path))
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for IncludedFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
