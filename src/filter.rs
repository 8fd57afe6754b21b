/*!
 * Include/exclude filtering and output ordering
 */

use glob_match::glob_match;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::IncludedFile;

static README_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^README(\.\w+)?$").unwrap());

/// Check if a file name looks like a README (`README` plus optional extension, any case)
pub fn is_readme(name: &str) -> bool {
    README_REGEX.is_match(name)
}

/// Dotfiles and dot-directories never show up in the output
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Ordered include and exclude glob patterns
///
/// A pattern containing `/` is matched against the root-relative path,
/// any other pattern against the base name. Matching is case-sensitive and
/// anchored. Exclude always wins over include.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRules {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl FilterRules {
    /// Create a rule set from include and exclude patterns
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    pub fn include_patterns(&self) -> &[String] {
        &self.include
    }

    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude
    }

    fn matches(pattern: &str, name: &str, rel_path: &str) -> bool {
        if pattern.contains('/') {
            glob_match(pattern, rel_path)
        } else {
            glob_match(pattern, name)
        }
    }

    /// True if there are no include patterns or at least one matches
    pub fn is_included(&self, name: &str, rel_path: &str) -> bool {
        self.include.is_empty()
            || self
                .include
                .iter()
                .any(|pattern| Self::matches(pattern, name, rel_path))
    }

    /// True if any exclude pattern matches
    pub fn is_excluded(&self, name: &str, rel_path: &str) -> bool {
        self.exclude
            .iter()
            .any(|pattern| Self::matches(pattern, name, rel_path))
    }

    /// Decide whether a file's contents should be emitted
    pub fn accepts_file(&self, name: &str, rel_path: &str) -> bool {
        let accepted = self.is_included(name, rel_path) && !self.is_excluded(name, rel_path);
        log::trace!(
            "{} {}",
            if accepted { "Including" } else { "Skipping" },
            rel_path
        );
        accepted
    }

    /// Decide whether a directory should be descended into
    ///
    /// Include patterns only apply to files.
    pub fn accepts_dir(&self, name: &str, rel_path: &str) -> bool {
        !self.is_excluded(name, rel_path)
    }

    /// Keep the root-relative paths that pass the rules, preserving input order
    pub fn select<I, S>(&self, files: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        files
            .into_iter()
            .filter(|rel_path| {
                let rel_path = rel_path.as_ref();
                let name = rel_path.rsplit('/').next().unwrap_or(rel_path);
                self.accepts_file(name, rel_path)
            })
            .map(|rel_path| rel_path.as_ref().to_string())
            .collect()
    }
}

/// Sort files so README-like files come first, each group by path
pub fn order(mut files: Vec<IncludedFile>) -> Vec<IncludedFile> {
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn rules(include: &[&str], exclude: &[&str]) -> FilterRules {
        FilterRules::new(
            include.iter().map(|s| s.to_string()).collect(),
            exclude.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn included(rel_path: &str) -> IncludedFile {
        let name = rel_path.rsplit('/').next().unwrap();
        IncludedFile {
            path: PathBuf::from("/project").join(rel_path),
            rel_path: rel_path.to_string(),
            is_readme: is_readme(name),
        }
    }

    #[test]
    fn test_is_readme() {
        assert!(is_readme("README"));
        assert!(is_readme("README.md"));
        assert!(is_readme("readme.rst"));
        assert!(is_readme("ReadMe.txt"));

        assert!(!is_readme("README.md.bak"));
        assert!(!is_readme("READMEs"));
        assert!(!is_readme("my_readme.md"));
        assert!(!is_readme("README."));
    }

    #[test]
    fn test_empty_include_accepts_everything() {
        let rules = rules(&[], &[]);
        assert!(rules.accepts_file("main.rs", "src/main.rs"));
        assert!(rules.accepts_file("Makefile", "Makefile"));
    }

    #[test]
    fn test_include_patterns() {
        let rules = rules(&["*.py", "[Mm]akefile", "?.c"], &[]);
        assert!(rules.accepts_file("app.py", "pkg/app.py"));
        assert!(rules.accepts_file("Makefile", "Makefile"));
        assert!(rules.accepts_file("makefile", "makefile"));
        assert!(rules.accepts_file("a.c", "a.c"));

        assert!(!rules.accepts_file("ab.c", "ab.c"));
        assert!(!rules.accepts_file("app.pyc", "app.pyc"));
        assert!(!rules.accepts_file("notes.txt", "notes.txt"));
    }

    #[test]
    fn test_matching_is_case_sensitive_and_anchored() {
        let rules = rules(&["*.PY", "main"], &[]);
        assert!(!rules.accepts_file("app.py", "app.py"));
        assert!(!rules.accepts_file("main.rs", "main.rs"));
        assert!(!rules.accepts_file("domain", "domain"));
        assert!(rules.accepts_file("main", "main"));
    }

    #[test]
    fn test_exclude_overrides_include() {
        let rules = rules(&["*.py"], &["test_*.py"]);
        assert!(rules.accepts_file("app.py", "app.py"));
        assert!(!rules.accepts_file("test_app.py", "tests/test_app.py"));
    }

    #[test]
    fn test_patterns_with_slash_match_relative_path() {
        let rules = rules(&["src/**/*.rs"], &["src/generated/*"]);
        assert!(rules.accepts_file("lib.rs", "src/lib.rs"));
        assert!(rules.accepts_file("mod.rs", "src/net/mod.rs"));
        assert!(!rules.accepts_file("lib.rs", "lib.rs"));
        assert!(!rules.accepts_file("out.rs", "src/generated/out.rs"));
    }

    #[test]
    fn test_accepts_dir_ignores_include_patterns() {
        let rules = rules(&["*.py"], &["node_modules", "build/cache"]);
        assert!(rules.accepts_dir("src", "src"));
        assert!(!rules.accepts_dir("node_modules", "web/node_modules"));
        assert!(!rules.accepts_dir("cache", "build/cache"));
        assert!(rules.accepts_dir("cache", "other/cache"));
    }

    #[test]
    fn test_select_preserves_order() {
        let rules = rules(&["*.go", "*.ts"], &["*_test.go"]);
        let selected = rules.select([
            "z.ts",
            "cmd/main.go",
            "cmd/main_test.go",
            "README.md",
            "a.ts",
        ]);
        assert_eq!(selected, vec!["z.ts", "cmd/main.go", "a.ts"]);
    }

    #[test]
    fn test_order_puts_readmes_first() {
        let files = vec![
            included("src/main.py"),
            included("docs/README.md"),
            included("app.py"),
            included("README.md"),
            included("lib/readme"),
        ];

        let ordered: Vec<String> = order(files).into_iter().map(|f| f.rel_path).collect();
        assert_eq!(
            ordered,
            vec![
                "README.md",
                "docs/README.md",
                "lib/readme",
                "app.py",
                "src/main.py"
            ]
        );
    }

    #[test]
    fn test_order_is_deterministic() {
        let forward = vec![included("b.py"), included("a.py"), included("README")];
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(order(forward), order(backward));
    }
}
