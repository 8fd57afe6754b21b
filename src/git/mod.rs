/*!
 * Version-control metadata lookup
 */

mod url;

pub use url::repo_name_from_url;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Find the first remote URL in `<root>/.git/config`
///
/// The file is scanned line by line; the first line whose trimmed form starts
/// with `url = ` wins. Sections are not interpreted.
pub fn remote_url(root: &Path) -> Option<String> {
    let config_path = root.join(".git").join("config");
    if !config_path.is_file() {
        return None;
    }

    let file = match File::open(&config_path) {
        Ok(file) => file,
        Err(e) => {
            log::debug!("Could not open {}: {}", config_path.display(), e);
            return None;
        }
    };

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::debug!("Stopped reading {}: {}", config_path.display(), e);
                break;
            }
        };

        if line.trim().starts_with("url = ") {
            if let Some((_, value)) = line.split_once('=') {
                return Some(value.trim().to_string());
            }
        }
    }

    None
}

/// Repository name derived from the first remote URL, if any
pub fn remote_repo_name(root: &Path) -> Option<String> {
    remote_url(root).and_then(|url| repo_name_from_url(&url))
}
