use std::env;

use anyhow::{Context, Result};

use super::super::args::HardcodedCommand;
use super::{
    CommandKind, CommandResult,
    helper::{collect_targets, finish, load_project_config, read_input, scan_sources, scan_stats},
};
use crate::{
    core::{GitDiffSource, git_added_lines, parse_unified_diff},
    issues::Issue,
    rules::hardcoded::HardcodedDetector,
};

pub fn hardcoded(cmd: HardcodedCommand) -> Result<CommandResult> {
    let verbose = cmd.common.verbose;
    let config = load_project_config(verbose)?;
    let section = &config.hardcoded;

    let detector = HardcodedDetector::new(&section.checked_attributes, &section.ignore_texts)?;

    let added = match (&cmd.diff, git_diff_source(&cmd)) {
        (Some(path), _) => {
            let diff = read_input(path)?;
            let cwd = env::current_dir().context("Cannot determine the current directory")?;
            Some(parse_unified_diff(&diff, &cwd))
        }
        (None, Some(source)) => Some(git_added_lines(&source)?),
        (None, None) => None,
    };

    let collected = collect_targets(
        &cmd.targets,
        section.targets(),
        &config,
        config.ignore_test_files,
        verbose,
    )?;

    let mut issues = Vec::new();
    let mut scanned = 0;
    let skipped = scan_sources(&collected.files, |path, file_path, content| {
        let only_lines = match &added {
            Some(added) => match added.get(path) {
                Some(lines) => Some(lines),
                // Untouched by the diff.
                None => return,
            },
            None => None,
        };
        scanned += 1;
        issues.extend(
            detector
                .scan(file_path, content, only_lines)
                .into_iter()
                .map(Issue::HardcodedText),
        );
    });

    let mut stats = scan_stats(&collected, skipped);
    stats.files_checked = scanned;

    Ok(finish(CommandKind::Hardcoded, issues, stats))
}

fn git_diff_source(cmd: &HardcodedCommand) -> Option<GitDiffSource> {
    if cmd.staged {
        return Some(GitDiffSource::Staged);
    }
    match (&cmd.base, &cmd.head) {
        (Some(base), Some(head)) => Some(GitDiffSource::Range {
            base: base.clone(),
            head: head.clone(),
        }),
        _ => None,
    }
}
