/*!
 * Git remote URL handling
 */

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

// scp-like syntax: [user@]host:path
static SCP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[^@/]+@)?[^:/]+:(?P<path>[^/].*)$").unwrap());

/// Extract the repository name from a remote URL
///
/// Takes the last path segment and strips a trailing `.git`. Works for
/// `https://`, `ssh://`, `file://`, scp-like (`git@host:owner/repo.git`)
/// and plain filesystem paths. Returns `None` if nothing is left.
pub fn repo_name_from_url(url: &str) -> Option<String> {
    let url = url.trim();
    let path = match Url::parse(url) {
        Ok(parsed) if !parsed.cannot_be_a_base() => parsed.path().to_string(),
        _ => match SCP_REGEX.captures(url) {
            Some(captures) => captures["path"].to_string(),
            None => url.to_string(),
        },
    };

    let segment = path.trim_end_matches('/').rsplit('/').next()?;
    let name = segment.strip_suffix(".git").unwrap_or(segment);

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
