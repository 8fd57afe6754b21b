/*!
 * Depth-limited directory traversal
 */

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::filter::{is_hidden, is_readme, FilterRules};
use crate::types::{DirectoryListing, IncludedFile};

/// Indentation unit for one level of the tree
const INDENT: &str = "  ";

/// Lazy, depth-first, pre-order walk over a directory tree
///
/// Each call to `next` lists one directory. Dotfiles are never listed,
/// files are filtered through the rule set, and directories matching an
/// exclude pattern are not entered. A directory at depth `>= max_depth` is
/// listed with its files and its subdirectories' names, but those
/// subdirectories are not visited.
#[derive(Debug)]
pub struct TreeWalker {
    rules: FilterRules,
    max_depth: Option<usize>,
    skip: Option<PathBuf>,
    // (path, root-relative path, depth)
    pending: Vec<(PathBuf, String, usize)>,
}

/// Start a walk at `root`
pub fn walk(root: &Path, max_depth: Option<usize>, rules: FilterRules) -> TreeWalker {
    TreeWalker::new(root, rules).max_depth(max_depth)
}

impl TreeWalker {
    /// Create a walker rooted at `root` with no depth limit
    pub fn new(root: &Path, rules: FilterRules) -> Self {
        let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        Self {
            rules,
            max_depth: None,
            skip: None,
            pending: vec![(root, String::new(), 0)],
        }
    }

    /// Limit how deep the walk descends
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Never list or select this file (e.g. the output file)
    pub fn skip_path(mut self, path: Option<&Path>) -> Self {
        self.skip = path.map(|p| fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf()));
        self
    }

    fn should_descend(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth < max)
    }

    fn is_skipped(&self, path: &Path) -> bool {
        let Some(skip) = &self.skip else {
            return false;
        };
        if path.file_name() != skip.file_name() {
            return false;
        }
        fs::canonicalize(path).map_or(false, |p| &p == skip)
    }

    fn list_directory(
        &self,
        path: &Path,
        rel_path: &str,
        depth: usize,
    ) -> Result<DirectoryListing> {
        let descend = self.should_descend(depth);
        let mut files = Vec::new();
        let mut subdirs = Vec::new();
        let mut pruned_dirs = Vec::new();

        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                // Only the root has to be readable; deeper failures skip the entry
                Err(e) if depth > 0 => {
                    log::warn!("Skipping unreadable entry under {:?}: {}", rel_path, e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let name = entry.file_name().to_string_lossy().to_string();
            if is_hidden(&name) {
                continue;
            }
            let entry_rel_path = join_rel(rel_path, &name);

            if entry.file_type().is_dir() {
                if !self.rules.accepts_dir(&name, &entry_rel_path) {
                    log::debug!("Not descending into excluded directory {}", entry_rel_path);
                } else if descend {
                    subdirs.push(name);
                } else {
                    pruned_dirs.push(name);
                }
            } else if entry.path_is_symlink() && entry.path().is_dir() {
                log::debug!("Skipping symlinked directory {}", entry_rel_path);
            } else if self.is_skipped(entry.path()) {
                log::debug!("Skipping output file {}", entry_rel_path);
            } else if self.rules.accepts_file(&name, &entry_rel_path) {
                files.push(name);
            }
        }

        if !descend {
            log::debug!("Max depth reached at depth {} ({:?})", depth, rel_path);
        }

        Ok(DirectoryListing {
            path: path.to_path_buf(),
            rel_path: rel_path.to_string(),
            depth,
            files,
            subdirs,
            pruned_dirs,
        })
    }
}

impl Iterator for TreeWalker {
    type Item = Result<DirectoryListing>;

    fn next(&mut self) -> Option<Self::Item> {
        let (path, rel_path, depth) = self.pending.pop()?;

        let listing = match self.list_directory(&path, &rel_path, depth) {
            Ok(listing) => listing,
            Err(e) => return Some(Err(e)),
        };

        // Reversed so the first subdirectory is popped first.
        for name in listing.subdirs.iter().rev() {
            self.pending
                .push((path.join(name), join_rel(&rel_path, name), depth + 1));
        }

        Some(Ok(listing))
    }
}

fn join_rel(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Tree lines for one directory: its label, then its files and any
/// subdirectories cut off by the depth limit, one level deeper
pub fn tree_lines(listing: &DirectoryListing) -> Vec<String> {
    let indent = INDENT.repeat(listing.depth);
    let mut lines = Vec::with_capacity(listing.files.len() + listing.pruned_dirs.len() + 1);
    lines.push(format!("{}{}", indent, listing.label()));
    for file in &listing.files {
        lines.push(format!("{}{}{}", indent, INDENT, file));
    }
    for dir in &listing.pruned_dirs {
        lines.push(format!("{}{}{}/", indent, INDENT, dir));
    }
    lines
}

/// Files of one directory as render candidates
pub fn included_files(
    listing: &DirectoryListing,
) -> impl Iterator<Item = IncludedFile> + '_ {
    listing.files.iter().map(move |name| IncludedFile {
        path: listing.path.join(name),
        rel_path: join_rel(&listing.rel_path, name),
        is_readme: is_readme(name),
    })
}

/// Result of a complete walk
#[derive(Debug, Clone, Default)]
pub struct Scan {
    /// Display lines for the tree block
    pub tree_lines: Vec<String>,
    /// Selected files, in walk order
    pub files: Vec<IncludedFile>,
}

/// Drain a walker into the tree display and the list of selected files
pub fn scan(walker: TreeWalker) -> Result<Scan> {
    let mut scan = Scan::default();
    for listing in walker {
        let listing = listing?;
        scan.tree_lines.extend(tree_lines(&listing));
        scan.files.extend(included_files(&listing));
    }
    log::info!(
        "Walk complete: {} tree lines, {} files selected",
        scan.tree_lines.len(),
        scan.files.len()
    );
    Ok(scan)
}
