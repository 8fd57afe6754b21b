/*!
 * Project title resolution
 *
 * The title comes from, in order of precedence: the git remote URL, the
 * `project.name` field of `pyproject.toml`, the first-level heading on the
 * first line of a README, and finally the directory name.
 */

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use crate::filter::is_readme;
use crate::git;
use crate::types::{ProjectTitle, TitleSource};

/// Metadata file consulted for an explicit project name
pub const METADATA_FILE: &str = "pyproject.toml";

#[derive(Debug, Deserialize)]
struct ProjectMetadata {
    project: Option<ProjectSection>,
}

#[derive(Debug, Deserialize)]
struct ProjectSection {
    name: Option<String>,
}

/// Resolve the display title for the project rooted at `root`
///
/// The git remote takes precedence over every other strategy, including an
/// explicit name in the metadata file.
pub fn resolve_title(root: &Path) -> ProjectTitle {
    let title = if let Some(name) = git::remote_repo_name(root) {
        ProjectTitle::new(name, TitleSource::GitRemote)
    } else if let Some(name) = metadata_name(root) {
        ProjectTitle::new(name, TitleSource::Metadata)
    } else if let Some(name) = readme_heading(root) {
        ProjectTitle::new(name, TitleSource::Readme)
    } else {
        ProjectTitle::new(directory_name(root), TitleSource::Directory)
    };

    log::debug!("Resolved project title {:?} from {}", title.name(), title.source());
    title
}

/// Read `project.name` from the metadata file, if present and well-formed
///
/// Parse failures are logged as warnings and treated as absent.
pub fn metadata_name(root: &Path) -> Option<String> {
    let path = root.join(METADATA_FILE);
    if !path.is_file() {
        return None;
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("Could not read {}: {}", METADATA_FILE, e);
            return None;
        }
    };

    match toml::from_str::<ProjectMetadata>(&content) {
        Ok(metadata) => metadata.project.and_then(|project| project.name),
        Err(e) => {
            log::warn!("Could not parse {}: {}", METADATA_FILE, e);
            None
        }
    }
}

/// Title taken from a `# ` heading on the first line of the first README
///
/// Only the first README-like file (by sorted name) is considered.
pub fn readme_heading(root: &Path) -> Option<String> {
    let mut readmes: Vec<String> = fs::read_dir(root)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| is_readme(name))
        .collect();
    readmes.sort();

    let readme = readmes.first()?;
    let file = File::open(root.join(readme)).ok()?;

    let mut first_line = String::new();
    BufReader::new(file).read_line(&mut first_line).ok()?;

    first_line
        .trim()
        .strip_prefix("# ")
        .map(|heading| heading.to_string())
}

/// Base name of the absolute form of `root`
pub fn directory_name(root: &Path) -> String {
    let abs_path = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    abs_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| abs_path.to_string_lossy().to_string())
}
