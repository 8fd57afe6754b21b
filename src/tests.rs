/*!
 * Tests for the repodump pipeline
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tempfile::tempdir;

use crate::config::Config;
use crate::filter::FilterRules;
use crate::dump;
use crate::writer::RenderSummary;

// Helper function to create a test directory structure
fn setup_test_directory() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();

    fs::create_dir_all(root.join("src").join("util"))?;
    fs::create_dir(root.join("docs"))?;

    let mut readme = File::create(root.join("README.md"))?;
    writeln!(readme, "# Sample Project\n\nA project used in tests.")?;

    let mut main = File::create(root.join("main.py"))?;
    writeln!(main, "from src.app import run\n\nrun()")?;

    let mut app = File::create(root.join("src").join("app.py"))?;
    writeln!(app, "def run():\n    print('running')")?;

    let mut helper = File::create(root.join("src").join("util").join("helper.go"))?;
    writeln!(helper, "package util")?;

    let mut docs_readme = File::create(root.join("docs").join("readme.txt"))?;
    writeln!(docs_readme, "docs")?;

    let mut notes = File::create(root.join("notes.txt"))?;
    writeln!(notes, "not included by default")?;

    // Dotfiles and dot-directories
    fs::create_dir(root.join(".git"))?;
    let mut git_config = File::create(root.join(".git").join("config"))?;
    writeln!(git_config, "[core]\n\trepositoryformatversion = 0")?;
    let mut env = File::create(root.join(".env.py"))?;
    writeln!(env, "SECRET = 1")?;

    Ok(temp_dir)
}

fn config_for(root: &Path) -> Config {
    Config {
        target_dir: root.to_path_buf(),
        ..Config::default()
    }
}

fn run_dump(config: &Config) -> io::Result<(String, RenderSummary)> {
    let mut out = Vec::new();
    let summary = dump(config, &mut out)?;
    Ok((String::from_utf8(out).expect("output is UTF-8"), summary))
}

fn tree_block(output: &str) -> &str {
    let start = output.find("<filetree>\n").expect("tree start") + "<filetree>\n".len();
    let end = output.find("</filetree>").expect("tree end");
    &output[start..end]
}

fn file_labels(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter(|line| line.len() > 2 && line.starts_with('`') && line.ends_with('`'))
        .filter(|line| !line.starts_with("``"))
        .map(|line| &line[1..line.len() - 1])
        .collect()
}

#[test]
fn test_basic_dump() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let (output, summary) = run_dump(&config_for(temp_dir.path()))?;

    assert!(output.starts_with("Project: Sample Project\n\n<filetree>\n"));
    assert!(output.contains("`src/app.py`\n```\ndef run():\n    print('running')\n```\n"));
    assert!(output.ends_with(&format!("---\n{}\n", crate::config::DEFAULT_INSTRUCTIONS)));

    // Not matched by the default include patterns
    assert!(!output.contains("notes.txt"));
    assert_eq!(summary.failures(), 0);

    Ok(())
}

#[test]
fn test_tree_block() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let (output, _) = run_dump(&config_for(temp_dir.path()))?;

    let root_label = format!(
        "{}/",
        temp_dir
            .path()
            .canonicalize()?
            .file_name()
            .unwrap()
            .to_string_lossy()
    );
    let expected = format!(
        "{}\n  README.md\n  main.py\n  docs/\n    readme.txt\n  src/\n    app.py\n    util/\n      \
         helper.go\n",
        root_label
    );
    assert_eq!(tree_block(&output), expected);

    Ok(())
}

#[test]
fn test_dotfiles_never_listed() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut config = config_for(temp_dir.path());
    config.rules = FilterRules::new(vec![], vec![]);

    let (output, _) = run_dump(&config)?;
    assert!(!output.contains(".git"));
    assert!(!output.contains(".env.py"));
    assert!(!output.contains("repositoryformatversion"));
    assert!(output.contains("notes.txt"));

    Ok(())
}

#[test]
fn test_readme_files_come_first() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut config = config_for(temp_dir.path());
    config.rules = FilterRules::new(
        vec![
            "*.py".to_string(),
            "*.go".to_string(),
            "*.md".to_string(),
            "readme.*".to_string(),
        ],
        vec![],
    );

    let (output, _) = run_dump(&config)?;
    assert_eq!(
        file_labels(&output),
        vec![
            "README.md",
            "docs/readme.txt",
            "main.py",
            "src/app.py",
            "src/util/helper.go",
        ]
    );

    Ok(())
}

#[test]
fn test_include_and_exclude() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut config = config_for(temp_dir.path());
    config.rules = FilterRules::new(
        vec!["*.py".to_string(), "*.txt".to_string()],
        vec!["app.py".to_string(), "docs".to_string()],
    );

    let (output, _) = run_dump(&config)?;
    assert_eq!(file_labels(&output), vec!["main.py", "notes.txt"]);

    // Excluded directories disappear from the tree too
    assert!(!tree_block(&output).contains("docs/"));
    assert!(tree_block(&output).contains("util/"));

    Ok(())
}

#[test]
fn test_max_depth() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path().join("proj");
    fs::create_dir_all(root.join("a").join("b").join("c"))?;
    fs::write(root.join("a").join("b").join("c").join("file.py"), "deep = True\n")?;
    fs::write(root.join("a").join("b").join("mid.py"), "mid = True\n")?;
    fs::write(root.join("a").join("top.py"), "top = True\n")?;

    let mut config = config_for(&root);
    config.max_depth = Some(1);

    let (output, _) = run_dump(&config)?;
    assert_eq!(tree_block(&output), "proj/\n  a/\n    top.py\n    b/\n");
    assert_eq!(file_labels(&output), vec!["a/top.py"]);
    assert!(!output.contains("mid = True"));
    assert!(!output.contains("deep = True"));

    Ok(())
}

#[test]
fn test_mixed_case_readme_included_by_default() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    fs::write(root.join("ReadMe.md"), "# T\n")?;
    fs::write(root.join("app.py"), "x = 1\n")?;

    let (output, _) = run_dump(&config_for(root))?;
    assert!(output.starts_with("Project: "));
    assert_eq!(file_labels(&output), vec!["ReadMe.md", "app.py"]);
    assert!(output.contains("`ReadMe.md`\n```\n# T\n```\n"));

    Ok(())
}

#[test]
fn test_read_failure_does_not_stop_rendering() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    // Not valid UTF-8, so reading it as text fails
    fs::write(temp_dir.path().join("a_binary.py"), [0xc3, 0x28, 0xff])?;

    let (output, summary) = run_dump(&config_for(temp_dir.path()))?;

    assert!(output.contains("`a_binary.py`\n```\nError reading file: "));
    assert!(output.contains("`main.py`\n```\nfrom src.app import run\n"));
    assert!(output.contains("`src/util/helper.go`\n```\npackage util\n```\n"));
    assert_eq!(summary.failures(), 1);

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_is_inline_error() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    std::os::unix::fs::symlink(
        temp_dir.path().join("does-not-exist.py"),
        temp_dir.path().join("broken.py"),
    )?;

    let (output, summary) = run_dump(&config_for(temp_dir.path()))?;
    assert!(output.contains("`broken.py`\n```\nError reading file: "));
    assert!(output.contains("`src/app.py`"));
    assert_eq!(summary.failures(), 1);

    Ok(())
}

#[test]
fn test_output_is_deterministic() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = config_for(temp_dir.path());

    let (first, _) = run_dump(&config)?;
    let (second, _) = run_dump(&config)?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_output_file_inside_tree_is_skipped() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let output_file = temp_dir.path().join("context.py");
    fs::write(&output_file, "previous dump")?;

    let mut config = config_for(temp_dir.path());
    config.output_file = Some(output_file);

    let (output, _) = run_dump(&config)?;
    assert!(!output.contains("context.py"));
    assert!(!output.contains("previous dump"));

    Ok(())
}

#[test]
fn test_title_prefers_git_remote() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let root = temp_dir.path();
    fs::write(root.join("pyproject.toml"), "[project]\nname = \"foo\"\n")?;
    fs::write(
        root.join(".git").join("config"),
        "[remote \"origin\"]\n\turl = git@github.com:someone/baz.git\n",
    )?;

    let (output, _) = run_dump(&config_for(root))?;
    assert!(output.starts_with("Project: baz\n"));

    Ok(())
}

#[test]
fn test_custom_instructions() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut config = config_for(temp_dir.path());
    config.instructions = "Find the bug.".to_string();

    let (output, _) = run_dump(&config)?;
    assert!(output.ends_with("\n---\nFind the bug.\n"));

    Ok(())
}
