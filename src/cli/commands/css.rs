use anyhow::Result;

use super::super::args::CssCommand;
use super::{
    CommandKind, CommandResult,
    helper::{collect_targets, finish, load_project_config, scan_sources, scan_stats},
};
use crate::{issues::Issue, rules::css::CssScanner};

pub fn css(cmd: CssCommand) -> Result<CommandResult> {
    let verbose = cmd.common.verbose;
    let config = load_project_config(verbose)?;

    let allowed = if cmd.allowed_css_patterns.is_empty() {
        &config.css.allowed_css_patterns
    } else {
        &cmd.allowed_css_patterns
    };
    let scanner = CssScanner::new(allowed)?;

    let collected = collect_targets(
        &cmd.targets,
        config.css.targets(),
        &config,
        config.ignore_test_files,
        verbose,
    )?;

    let mut issues = Vec::new();
    let skipped = scan_sources(&collected.files, |_, file_path, content| {
        issues.extend(
            scanner
                .scan(file_path, content)
                .into_iter()
                .map(Issue::CssViolation),
        );
    });

    Ok(finish(
        CommandKind::Css,
        issues,
        scan_stats(&collected, skipped),
    ))
}
