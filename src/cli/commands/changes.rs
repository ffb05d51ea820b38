use anyhow::{Result, bail};

use super::super::args::ChangesCommand;
use super::{
    CommandKind, CommandResult, ScanStats,
    helper::{finish, load_project_config, read_input},
};
use crate::rules::changes::{
    check_changes, compile_patterns, normalize_file_list, read_sensitive_patterns,
};

pub fn changes(cmd: ChangesCommand) -> Result<CommandResult> {
    let verbose = cmd.common.verbose;
    let config = load_project_config(verbose)?;

    if cmd.files.is_empty() && cmd.files_from.is_none() {
        bail!("At least one of --files or --files_from must be provided");
    }

    let mut raw = cmd.files.clone();
    if let Some(path) = &cmd.files_from {
        raw.extend(read_input(path)?.lines().map(String::from));
    }
    let files = normalize_file_list(&raw);

    let max_files = cmd.max_files.unwrap_or(config.changes.max_files);

    let mut patterns = cmd.sensitive_patterns.clone();
    if let Some(path) = &cmd.sensitive_files {
        patterns.extend(read_sensitive_patterns(path)?);
    }
    if patterns.is_empty() && cmd.sensitive_files.is_none() {
        patterns = config.changes.sensitive_patterns.clone();
    }
    let sensitive = compile_patterns(&patterns)?;

    if verbose {
        eprintln!(
            "{} changed file(s), limit {}, {} sensitive pattern(s)",
            files.len(),
            max_files,
            sensitive.len()
        );
    }

    let issues = check_changes(&files, max_files, &sensitive);

    Ok(finish(
        CommandKind::Changes,
        issues,
        ScanStats {
            files_checked: files.len(),
            ..Default::default()
        },
    ))
}
