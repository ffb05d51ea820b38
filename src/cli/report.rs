//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format on stdout; warnings about
//! files that could not be scanned go to stderr.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandKind, CommandResult, ScanStats};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation};
use crate::utils::plural;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print the success message of a command that found nothing.
pub fn print_success_to<W: Write>(kind: CommandKind, stats: &ScanStats, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        success_message(kind, stats).green()
    );
}

fn success_message(kind: CommandKind, stats: &ScanStats) -> String {
    let files = stats.files_checked;
    let checked = format!(
        "Checked {} source {}",
        files,
        plural(files, "file", "files")
    );
    match kind {
        CommandKind::Css => format!("{} - no embedded CSS found", checked),
        CommandKind::Keys => format!(
            "{}, {} locale {} - no missing keys found",
            checked,
            stats.locale_files_checked,
            plural(stats.locale_files_checked, "file", "files")
        ),
        CommandKind::Hardcoded => format!("{} - no hardcoded text found", checked),
        CommandKind::Disable => format!("{} - no disable statements found", checked),
        CommandKind::Changes => format!(
            "Checked {} changed {} - no issues found",
            files,
            plural(files, "file", "files")
        ),
        CommandKind::Init => format!("Created {}", CONFIG_FILE_NAME),
    }
}

/// Print warnings about files that were missing or could not be read.
pub fn print_file_warnings_to<W: Write>(stats: &ScanStats, verbose: bool, writer: &mut W) {
    for path in &stats.missing {
        let _ = writeln!(
            writer,
            "{} File not found: {}",
            "warning:".bold().yellow(),
            path
        );
    }

    if stats.skipped.is_empty() {
        return;
    }
    if verbose {
        for skipped in &stats.skipped {
            let _ = writeln!(
                writer,
                "{} Skipped {}: {}",
                "warning:".bold().yellow(),
                skipped.file_path,
                skipped.reason
            );
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} {} could not be read (use {} for details)",
            "warning:".bold().yellow(),
            stats.skipped.len(),
            plural(stats.skipped.len(), "file", "files"),
            "-v".cyan()
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    if result.issues.is_empty() {
        print_success_to(result.kind, &result.stats, &mut io::stdout().lock());
    } else {
        report(&result.issues);
    }

    print_file_warnings_to(&result.stats, verbose, &mut io::stderr().lock());
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        "error".bold().red(),
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Source(ctx) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.file_path(),
                ctx.line(),
                ctx.col()
            );
            print_source_context(
                writer,
                ctx.line(),
                ctx.col(),
                &ctx.source_line,
                max_line_width,
            );
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
        ReportLocation::Global => {}
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_source_context<W: Write>(
    writer: &mut W,
    line: usize,
    col: usize,
    source_line: &str,
    max_line_width: usize,
) {
    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        line.to_string().blue(),
        "|".blue(),
        source_line,
        width = max_line_width
    );

    // Caret pointing to the column (col is 1-based)
    let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        "^".red(),
        width = max_line_width,
        padding = caret_padding
    );
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total = issues.len();
    let mut files: Vec<&str> = issues.iter().filter_map(Issue::file_path).collect();
    files.dedup();

    let problems = format!("{} {}", total, plural(total, "problem", "problems"));
    let _ = if files.is_empty() {
        writeln!(writer, "\n{} {}", FAILURE_MARK.red(), problems.red())
    } else {
        writeln!(
            writer,
            "\n{} {} in {} {}",
            FAILURE_MARK.red(),
            problems.red(),
            files.len(),
            plural(files.len(), "file", "files")
        )
    };
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            _ => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}
