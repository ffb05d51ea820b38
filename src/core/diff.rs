//! Unified diff parsing: which new-file lines were added.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    process::Command,
    sync::LazyLock,
};

use anyhow::{Context, Result, bail};
use regex::Regex;

static HUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -\d+(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap()
});

/// Added line numbers (1-based, new-file side) keyed by absolute path.
pub type AddedLines = BTreeMap<PathBuf, BTreeSet<usize>>;

/// Parse `git diff` output and collect added lines per file.
///
/// Paths in `+++ b/...` headers are resolved against `base_dir`. Deleted
/// files (`+++ /dev/null`) are ignored. Hunk bodies are consumed by the
/// line counts of their `@@` header, so an added line that itself starts
/// with `++ ` is not mistaken for a file header.
pub fn parse_unified_diff(diff: &str, base_dir: &Path) -> AddedLines {
    let mut added: AddedLines = BTreeMap::new();
    let mut current: Option<PathBuf> = None;
    let mut new_line = 0usize;
    let mut old_left = 0usize;
    let mut new_left = 0usize;

    for line in diff.lines() {
        if old_left == 0 && new_left == 0 {
            if let Some(raw) = line.strip_prefix("+++ ") {
                let raw = raw.split('\t').next().unwrap_or("").trim();
                current = if raw == "/dev/null" {
                    None
                } else {
                    Some(base_dir.join(strip_diff_prefix(raw)))
                };
            } else if let Some(caps) = HUNK_HEADER.captures(line) {
                old_left = hunk_count(caps.get(1));
                new_line = caps[2].parse().unwrap_or(0);
                new_left = hunk_count(caps.get(3));
            }
            continue;
        }

        match line.chars().next() {
            Some('+') => {
                if let Some(file) = current.as_ref() {
                    added.entry(file.clone()).or_default().insert(new_line);
                }
                new_line += 1;
                new_left = new_left.saturating_sub(1);
            }
            Some('-') => old_left = old_left.saturating_sub(1),
            // `\ No newline at end of file`
            Some('\\') => {}
            _ => {
                new_line += 1;
                old_left = old_left.saturating_sub(1);
                new_left = new_left.saturating_sub(1);
            }
        }
    }

    added
}

// An omitted count in `@@ -a +b @@` means one line.
fn hunk_count(raw: Option<regex::Match<'_>>) -> usize {
    raw.map_or(1, |m| m.as_str().parse().unwrap_or(0))
}

/// Revisions compared by `git diff`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitDiffSource {
    /// Index against `HEAD` (`git diff --cached`).
    Staged,
    /// Merge base of `base` against `head` (`git diff base...head`).
    Range { base: String, head: String },
}

impl GitDiffSource {
    fn diff_args(&self) -> Vec<String> {
        let mut args = vec!["diff".to_string(), "-U0".to_string()];
        match self {
            GitDiffSource::Staged => args.push("--cached".to_string()),
            GitDiffSource::Range { base, head } => args.push(format!("{}...{}", base, head)),
        }
        args
    }
}

/// Run `git diff` in the current repository and collect added lines.
///
/// Paths are resolved against the repository root.
pub fn git_added_lines(source: &GitDiffSource) -> Result<AddedLines> {
    let toplevel = run_git(&["rev-parse".to_string(), "--show-toplevel".to_string()])?;
    let diff = run_git(&source.diff_args())?;
    Ok(parse_unified_diff(&diff, Path::new(toplevel.trim())))
}

fn run_git(args: &[String]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .output()
        .context("Failed to execute git")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let details = stderr.trim();
        bail!(
            "git {} failed: {}",
            args.join(" "),
            if details.is_empty() { "unknown error" } else { details }
        );
    }
    String::from_utf8(output.stdout).context("git output is not valid UTF-8")
}

fn strip_diff_prefix(path: &str) -> &str {
    path.strip_prefix("b/")
        .or_else(|| path.strip_prefix("a/"))
        .unwrap_or(path)
}
