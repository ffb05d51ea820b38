use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use super::super::args::KeysCommand;
use super::{
    CommandKind, CommandResult,
    helper::{collect_targets, finish, load_project_config, scan_sources, scan_stats},
};
use crate::{
    core::{LocaleKeySet, available_locales},
    issues::Issue,
    rules::keys::{check_missing_keys, check_missing_translations},
};

pub fn keys(cmd: KeysCommand) -> Result<CommandResult> {
    let verbose = cmd.common.verbose;
    let config = load_project_config(verbose)?;
    let section = &config.keys;

    let locales_root = cmd
        .locales_root
        .clone()
        .unwrap_or_else(|| PathBuf::from(&section.locales_root));
    let primary_locale = cmd
        .primary_locale
        .clone()
        .unwrap_or_else(|| section.primary_locale.clone());

    let primary = LocaleKeySet::load(&locales_root, &primary_locale)?;
    let mut locale_files = primary.file_count();

    let collected = collect_targets(
        &cmd.targets,
        section.targets(),
        &config,
        config.ignore_test_files,
        verbose,
    )?;

    let mut issues = Vec::new();
    let mut keys_checked = 0;
    let skipped = scan_sources(&collected.files, |_, file_path, content| {
        let result = check_missing_keys(file_path, content, &primary);
        keys_checked += result.checked;
        if verbose {
            for call in &result.dynamic {
                eprintln!(
                    "{} {}:{}:{} dynamic key `{}` cannot be checked",
                    "skip:".dimmed(),
                    file_path,
                    call.line,
                    call.col,
                    call.raw
                );
            }
        }
        issues.extend(result.missing.into_iter().map(Issue::MissingKey));
    });

    if verbose {
        eprintln!(
            "Checked {} key(s) against locale \"{}\"",
            keys_checked, primary_locale
        );
    }

    if cmd.compare_locales {
        for locale in available_locales(&locales_root)? {
            if locale == primary_locale {
                continue;
            }
            let other = LocaleKeySet::load(&locales_root, &locale)?;
            locale_files += other.file_count();
            issues.extend(
                check_missing_translations(&primary, &other)
                    .into_iter()
                    .map(Issue::MissingTranslation),
            );
        }
    }

    let mut stats = scan_stats(&collected, skipped);
    stats.locale_files_checked = locale_files;
    Ok(finish(CommandKind::Keys, issues, stats))
}
