//! Changed-file gate: count limit and sensitive paths.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use regex::Regex;

use crate::{
    core::display_path,
    issues::{Issue, SensitiveFileIssue, TooManyFilesIssue},
    utils::normalize_path,
};

/// Normalize a change list: `/` separators, no leading `./`, no blanks,
/// first occurrence wins.
pub fn normalize_file_list<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    raw.iter()
        .map(|p| normalize_path(p.as_ref()))
        .filter(|p| !p.is_empty())
        .filter(|p| seen.insert(p.clone()))
        .collect()
}

/// Read sensitive patterns, one regex per line; `#` comments and blank lines are skipped.
pub fn read_sensitive_patterns(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).with_context(|| {
        format!("Failed to read sensitive files list: {}", display_path(path))
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect())
}

pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("Invalid sensitive pattern: \"{}\"", p)))
        .collect()
}

/// Check a normalized change list. `max_files == 0` disables the count limit.
pub fn check_changes(files: &[String], max_files: usize, sensitive: &[Regex]) -> Vec<Issue> {
    let mut issues = Vec::new();

    if max_files > 0 && files.len() > max_files {
        issues.push(Issue::TooManyFiles(TooManyFilesIssue {
            count: files.len(),
            max: max_files,
        }));
    }

    for file in files {
        if let Some(pattern) = sensitive.iter().find(|r| r.is_match(file)) {
            issues.push(Issue::SensitiveFile(SensitiveFileIssue {
                path: file.clone(),
                pattern: pattern.as_str().to_string(),
            }));
        }
    }

    issues
}
