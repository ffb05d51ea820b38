use anyhow::Result;

use super::super::args::DisableCommand;
use super::{
    CommandKind, CommandResult,
    helper::{collect_targets, finish, load_project_config, scan_sources, scan_stats},
};
use crate::{
    issues::Issue,
    rules::disable::{DisableCheck, check_disable_statements},
};

pub fn disable(cmd: DisableCommand) -> Result<CommandResult> {
    let verbose = cmd.common.verbose;
    let config = load_project_config(verbose)?;

    let checks = if cmd.checks.is_empty() {
        DisableCheck::all()
    } else {
        cmd.checks.clone()
    };

    // Test files are where skipped and focused tests live.
    let collected = collect_targets(
        &cmd.targets,
        config.disable.targets(),
        &config,
        false,
        verbose,
    )?;

    let mut issues = Vec::new();
    let skipped = scan_sources(&collected.files, |_, file_path, content| {
        issues.extend(
            check_disable_statements(file_path, content, &checks)
                .into_iter()
                .map(Issue::DisableStatement),
        );
    });

    Ok(finish(
        CommandKind::Disable,
        issues,
        scan_stats(&collected, skipped),
    ))
}
