use crate::{core::SkippedFile, issues::Issue};

use super::super::exit_status::ExitStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Css,
    Keys,
    Hardcoded,
    Disable,
    Changes,
    Init,
}

/// Counters and per-file problems gathered while scanning.
#[derive(Debug, Default)]
pub struct ScanStats {
    /// Number of source files (or changed paths) that were checked.
    pub files_checked: usize,
    /// Number of locale JSON files that were loaded; 0 if none.
    pub locale_files_checked: usize,
    /// Files that were collected but could not be read.
    pub skipped: Vec<SkippedFile>,
    /// Explicit `--files` entries that do not exist.
    pub missing: Vec<String>,
}

/// Result of running a gatecheck command
#[derive(Debug)]
pub struct CommandResult {
    pub kind: CommandKind,
    /// Violations, sorted by file, line and column.
    pub issues: Vec<Issue>,
    pub stats: ScanStats,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.issues.is_empty() {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}
