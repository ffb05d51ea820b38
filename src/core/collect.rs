use std::{
    collections::{BTreeSet, HashSet},
    env,
    ffi::OsStr,
    path::{self, Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::config::{TEST_DIR_NAMES, TEST_FILE_MARKERS};

/// Inputs of a file collection run.
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Roots walked recursively. A file here contributes its parent directory.
    pub directories: Vec<PathBuf>,
    /// Explicit files; they bypass directory exclusions.
    pub files: Vec<PathBuf>,
    pub exclude_files: Vec<PathBuf>,
    /// Excluded directories, matched by path prefix (whole components).
    pub exclude_directories: Vec<PathBuf>,
    /// Accepted extensions without the leading dot.
    pub extensions: Vec<String>,
    /// Ignore entries. Globs (`*`, `?`) match walked paths, absolute or
    /// relative to `base_dir`; anything else is a path prefix under `base_dir`.
    pub ignores: Vec<String>,
    /// Base of relative ignore entries; the working directory when empty.
    pub base_dir: PathBuf,
    pub ignore_test_files: bool,
    pub verbose: bool,
}

/// Result of collecting files.
#[derive(Debug, Default)]
pub struct CollectResult {
    /// Absolute, de-duplicated, sorted.
    pub files: BTreeSet<PathBuf>,
    /// Explicit `files` entries that do not exist.
    pub missing: Vec<PathBuf>,
    /// Walk entries that could not be accessed.
    pub skipped_count: usize,
}

/// Collect candidate files from directories and explicit file lists.
///
/// Fails only on configuration errors: a directory root that does not exist
/// or an invalid ignore pattern.
pub fn collect_files(opts: &CollectOptions) -> Result<CollectResult> {
    let mut result = CollectResult::default();

    let exclude_files: HashSet<PathBuf> = opts
        .exclude_files
        .iter()
        .map(|p| absolute(p))
        .collect::<Result<_>>()?;
    let exclude_dirs: Vec<PathBuf> = opts
        .exclude_directories
        .iter()
        .map(|p| absolute(p))
        .collect::<Result<_>>()?;

    let base_dir = if opts.base_dir.as_os_str().is_empty() {
        env::current_dir().context("Cannot determine the current directory")?
    } else {
        absolute(&opts.base_dir)?
    };

    // Literal ignores prune by path prefix; glob ignores match file paths.
    let mut literal_ignores: Vec<PathBuf> = Vec::new();
    let mut ignore_patterns: Vec<Pattern> = Vec::new();
    for p in &opts.ignores {
        if is_glob_pattern(p) {
            ignore_patterns.push(
                Pattern::new(p)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))?,
            );
        } else {
            literal_ignores.push(base_dir.join(p.trim_end_matches('/')));
        }
    }

    for root in &opts.directories {
        let root = resolve_root(root)?;

        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let path = entry.path();
                if exclude_dirs.iter().any(|dir| path.starts_with(dir))
                    || literal_ignores.iter().any(|dir| path.starts_with(dir))
                {
                    return false;
                }
                // Never prune the root itself, even when it is named `tests`.
                !(opts.ignore_test_files
                    && entry.depth() > 0
                    && entry.file_type().is_dir()
                    && is_test_dir(entry.file_name()))
            });

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.skipped_count += 1;
                    if opts.verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if exclude_files.contains(path) {
                continue;
            }
            if is_ignored(path, &base_dir, &ignore_patterns) {
                continue;
            }
            if accepts_file(path, opts) {
                result.files.insert(path.to_path_buf());
            }
        }
    }

    for file in &opts.files {
        let path = absolute(file)?;
        if exclude_files.contains(&path) {
            continue;
        }
        if !path.is_file() {
            result.missing.push(file.clone());
            continue;
        }
        if accepts_file(&path, opts) {
            result.files.insert(path);
        }
    }

    Ok(result)
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    let path = absolute(root)?;
    if path.is_dir() {
        Ok(path)
    } else if path.is_file() {
        Ok(path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.clone()))
    } else {
        bail!(
            "Invalid path: {}. Must be an existing file or directory.",
            root.display()
        )
    }
}

fn absolute(p: &Path) -> Result<PathBuf> {
    path::absolute(p).with_context(|| format!("Cannot resolve path: {}", p.display()))
}

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn is_ignored(path: &Path, base_dir: &Path, patterns: &[Pattern]) -> bool {
    let relative = path.strip_prefix(base_dir).ok();
    patterns.iter().any(|p| {
        p.matches_path(path) || relative.is_some_and(|rel| p.matches_path(rel))
    })
}

fn accepts_file(path: &Path, opts: &CollectOptions) -> bool {
    has_extension(path, &opts.extensions) && !(opts.ignore_test_files && is_test_file(path))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|x| x == ext))
}

/// `Button.test.tsx`, `api.spec.ts`, `data.mock.ts`.
pub fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| TEST_FILE_MARKERS.iter().any(|m| name.contains(m)))
}

fn is_test_dir(name: &OsStr) -> bool {
    name.to_str()
        .is_some_and(|name| TEST_DIR_NAMES.contains(&name))
}
