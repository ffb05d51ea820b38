use std::{
    collections::BTreeSet,
    env, fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use super::{CommandKind, CommandResult, ScanStats};
use crate::{
    cli::args::TargetArgs,
    config::{Config, TargetConfig, load_config},
    core::{CollectOptions, CollectResult, SkippedFile, collect_files, display_path, read_source},
    issues::Issue,
};

pub fn finish(kind: CommandKind, mut issues: Vec<Issue>, stats: ScanStats) -> CommandResult {
    issues.sort();
    CommandResult {
        kind,
        issues,
        stats,
    }
}

/// Load `.gatecheckrc.json` for the current directory, or defaults.
pub fn load_project_config(verbose: bool) -> Result<Config> {
    let cwd = env::current_dir().context("Cannot determine the current directory")?;
    let loaded = load_config(&cwd)?;
    if verbose && !loaded.from_file {
        eprintln!("No config file found, using defaults");
    }
    Ok(loaded.config)
}

/// Merge CLI targets over a config section and collect the files.
///
/// CLI `--directories`/`--files` replace the section's directories; non-empty
/// exclusion flags replace the section's exclusions.
pub fn collect_targets(
    targets: &TargetArgs,
    section: TargetConfig<'_>,
    config: &Config,
    ignore_test_files: bool,
    verbose: bool,
) -> Result<CollectResult> {
    let directories = if targets.has_targets() {
        targets.directories.clone()
    } else {
        to_paths(section.directories)
    };
    if directories.is_empty() && targets.files.is_empty() {
        bail!("At least one of --directories or --files must be provided");
    }

    let options = CollectOptions {
        directories,
        files: targets.files.clone(),
        exclude_files: override_or(&targets.exclude_files, section.exclude_files),
        exclude_directories: override_or(&targets.exclude_directories, section.exclude_directories),
        extensions: section.extensions.to_vec(),
        ignores: config.ignores.clone(),
        base_dir: env::current_dir().context("Cannot determine the current directory")?,
        ignore_test_files,
        verbose,
    };

    let result = collect_files(&options)?;
    if verbose {
        eprintln!("Collected {} file(s)", result.files.len());
    }
    Ok(result)
}

fn to_paths(raw: &[String]) -> Vec<PathBuf> {
    raw.iter().map(PathBuf::from).collect()
}

fn override_or(cli: &[PathBuf], config: &[String]) -> Vec<PathBuf> {
    if cli.is_empty() {
        to_paths(config)
    } else {
        cli.to_vec()
    }
}

/// Read every collected file and hand it to `scan`.
///
/// Files that cannot be read (missing permissions, invalid UTF-8) are
/// returned as skipped instead of failing the run.
pub fn scan_sources<F>(files: &BTreeSet<PathBuf>, mut scan: F) -> Vec<SkippedFile>
where
    F: FnMut(&Path, &str, &str),
{
    let mut skipped = Vec::new();
    for path in files {
        let shown = display_path(path);
        match read_source(path) {
            Ok(content) => scan(path, &shown, &content),
            Err(err) => skipped.push(SkippedFile {
                file_path: shown,
                reason: err.root_cause().to_string(),
            }),
        }
    }
    skipped
}

/// Stats for a collected-and-scanned file set.
pub fn scan_stats(collected: &CollectResult, skipped: Vec<SkippedFile>) -> ScanStats {
    ScanStats {
        files_checked: collected.files.len() - skipped.len(),
        locale_files_checked: 0,
        skipped,
        missing: collected.missing.iter().map(|p| display_path(p)).collect(),
    }
}

/// Read a whole input file; `-` reads stdin.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", display_path(path)))
}
