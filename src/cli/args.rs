//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `css`: Flag embedded CSS (colors, inline styles, size values) in sources
//! - `keys`: Check translation keys against the locale files
//! - `hardcoded`: Flag user-visible text that is not translated
//! - `disable`: Flag lint/type suppressions and skipped or focused tests
//! - `changes`: Gate a change set by size and sensitive paths
//! - `init`: Write a default `.gatecheckrc.json`
//!
//! Multi-word flags use underscores (`--exclude_files`); the hyphenated
//! spelling is accepted as an alias.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::rules::disable::DisableCheck;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Command,
}

impl Arguments {
    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Command::Css(cmd) => cmd.common.verbose,
            Command::Keys(cmd) => cmd.common.verbose,
            Command::Hardcoded(cmd) => cmd.common.verbose,
            Command::Disable(cmd) => cmd.common.verbose,
            Command::Changes(cmd) => cmd.common.verbose,
            Command::Init => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Which files to scan. Overrides the matching config section when given.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// Directories to scan recursively
    #[arg(long, num_args = 1.., value_name = "PATH")]
    pub directories: Vec<PathBuf>,

    /// Individual files to scan (bypass directory exclusions)
    #[arg(long, num_args = 1.., value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Files to leave out
    #[arg(
        long = "exclude_files",
        visible_alias = "exclude-files",
        num_args = 1..,
        value_name = "PATH"
    )]
    pub exclude_files: Vec<PathBuf>,

    /// Directories to leave out, including everything below them
    #[arg(
        long = "exclude_directories",
        visible_alias = "exclude-directories",
        num_args = 1..,
        value_name = "PATH"
    )]
    pub exclude_directories: Vec<PathBuf>,
}

impl TargetArgs {
    pub fn has_targets(&self) -> bool {
        !self.directories.is_empty() || !self.files.is_empty()
    }
}

#[derive(Debug, Args)]
pub struct CssCommand {
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Regular expressions; violations whose matched text matches one are dropped
    #[arg(
        long = "allowed_css_patterns",
        visible_alias = "allowed-css-patterns",
        num_args = 1..,
        value_name = "PATTERN"
    )]
    pub allowed_css_patterns: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct KeysCommand {
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Directory holding one sub-directory per locale (overrides config file)
    #[arg(long = "locales_root", visible_alias = "locales-root", value_name = "PATH")]
    pub locales_root: Option<PathBuf>,

    /// Locale the source keys are checked against (overrides config file)
    #[arg(long = "primary_locale", visible_alias = "primary-locale", value_name = "LOCALE")]
    pub primary_locale: Option<String>,

    /// Also report primary-locale keys missing from the other locales
    #[arg(long = "compare_locales", visible_alias = "compare-locales")]
    pub compare_locales: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct HardcodedCommand {
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Only check lines added in this unified diff (`-` reads stdin)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["staged", "base"])]
    pub diff: Option<PathBuf>,

    /// Only check lines added in the staged changes (`git diff --cached`)
    #[arg(long, conflicts_with = "base")]
    pub staged: bool,

    /// Only check lines added between BASE and HEAD (`git diff BASE...HEAD`)
    #[arg(long, value_name = "REF", requires = "head")]
    pub base: Option<String>,

    /// Head revision used with --base
    #[arg(long, value_name = "REF", requires = "base")]
    pub head: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct DisableCommand {
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Checks to run (default: all)
    #[arg(long, value_enum, num_args = 1..)]
    pub checks: Vec<DisableCheck>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ChangesCommand {
    /// Changed file paths
    #[arg(long, num_args = 1.., value_name = "PATH")]
    pub files: Vec<String>,

    /// Read changed file paths from a file, one per line (`-` reads stdin)
    #[arg(long = "files_from", visible_alias = "files-from", value_name = "FILE")]
    pub files_from: Option<PathBuf>,

    /// Maximum number of changed files; 0 disables the limit (overrides config file)
    #[arg(
        long = "max_files",
        visible_alias = "max-files",
        env = "GATECHECK_MAX_FILES",
        value_name = "N"
    )]
    pub max_files: Option<usize>,

    /// File of sensitive path regexes, one per line
    #[arg(long = "sensitive_files", visible_alias = "sensitive-files", value_name = "FILE")]
    pub sensitive_files: Option<PathBuf>,

    /// Sensitive path regexes
    #[arg(
        long = "sensitive_patterns",
        visible_alias = "sensitive-patterns",
        num_args = 1..,
        value_name = "PATTERN"
    )]
    pub sensitive_patterns: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check for embedded CSS (hex/rgb/hsl colors, inline styles, size values)
    Css(CssCommand),
    /// Check that translation keys used in code exist in the locale files
    Keys(KeysCommand),
    /// Check for user-visible text that bypasses translation
    Hardcoded(HardcodedCommand),
    /// Check for eslint-disable, @ts-ignore, istanbul ignore and skipped/focused tests
    Disable(DisableCommand),
    /// Check the number of changed files and changes to sensitive paths
    Changes(ChangesCommand),
    /// Initialize a new .gatecheckrc.json configuration file
    Init,
}
