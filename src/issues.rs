//! Issue types produced by the quality gates.
//!
//! Each issue is self-contained with everything the reporter needs to show
//! it: location, message, rule tag, and optional note and hint lines.

use enum_dispatch::enum_dispatch;

use crate::core::SourceContext;

// ============================================================
// Rule
// ============================================================

/// Rule identifier for each issue type.
///
/// The `Display` form is the tag shown next to every reported violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    // Embedded CSS
    HexColor,
    RgbColor,
    HslColor,
    InlineStyleObject,
    InlineStyleString,
    CamelcaseCssProperty,
    PixelValue,
    // Translations
    MissingKey,
    MissingTranslation,
    HardcodedText,
    // Disable statements
    EslintDisable,
    TsDirective,
    IstanbulIgnore,
    SkippedTest,
    FocusedTest,
    // Changed files
    TooManyFiles,
    SensitiveFile,
}

impl Rule {
    /// One-line description used as the `= note:` of a violation.
    pub fn description(&self) -> &'static str {
        match self {
            Rule::HexColor => "Hex color code found.",
            Rule::RgbColor => "RGB/RGBA color code found.",
            Rule::HslColor => "HSL/HSLA color code found.",
            Rule::InlineStyleObject => "Inline style object found.",
            Rule::InlineStyleString => "Inline style string found.",
            Rule::CamelcaseCssProperty => "Camelcase CSS property found.",
            Rule::PixelValue => "Direct size value assignment found.",
            Rule::MissingKey => "Translation key not found in the primary locale.",
            Rule::MissingTranslation => "Key exists in the primary locale only.",
            Rule::HardcodedText => "User-visible text is not translated.",
            Rule::EslintDisable => "ESLint rule disabled.",
            Rule::TsDirective => "TypeScript checking suppressed.",
            Rule::IstanbulIgnore => "Code excluded from coverage.",
            Rule::SkippedTest => "Test is skipped.",
            Rule::FocusedTest => "Test is focused; other tests will not run.",
            Rule::TooManyFiles => "Too many files changed.",
            Rule::SensitiveFile => "Sensitive file changed.",
        }
    }

    /// Remediation shown as the `= hint:` line.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Rule::HexColor | Rule::RgbColor | Rule::HslColor => {
                Some("Use CSS variables from stylesheet instead.")
            }
            Rule::InlineStyleObject
            | Rule::InlineStyleString
            | Rule::CamelcaseCssProperty
            | Rule::PixelValue => Some("Move styles to CSS file and use className instead."),
            Rule::MissingKey => Some("Add the key to the locale file or fix the typo."),
            Rule::HardcodedText => Some("Wrap the text with t() and add it to the locale files."),
            Rule::EslintDisable | Rule::TsDirective | Rule::IstanbulIgnore => {
                Some("Fix the underlying issue instead of suppressing it.")
            }
            Rule::SkippedTest | Rule::FocusedTest => Some("Remove the test modifier."),
            Rule::TooManyFiles => Some("Split the change into smaller pull requests."),
            Rule::MissingTranslation | Rule::SensitiveFile => None,
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Rule::HexColor => "hex_color",
            Rule::RgbColor => "rgb_color",
            Rule::HslColor => "hsl_color",
            Rule::InlineStyleObject => "inline_style_object",
            Rule::InlineStyleString => "inline_style_string",
            Rule::CamelcaseCssProperty => "camelcase_css_property",
            Rule::PixelValue => "pixel_value",
            Rule::MissingKey => "missing-key",
            Rule::MissingTranslation => "missing-translation",
            Rule::HardcodedText => "hardcoded",
            Rule::EslintDisable => "eslint_disable",
            Rule::TsDirective => "ts_directive",
            Rule::IstanbulIgnore => "istanbul_ignore",
            Rule::SkippedTest => "skipped_test",
            Rule::FocusedTest => "focused_test",
            Rule::TooManyFiles => "too-many-files",
            Rule::SensitiveFile => "sensitive-file",
        };
        write!(f, "{}", tag)
    }
}

// ============================================================
// Issue Types - Source Code (SourceContext)
// ============================================================

/// Embedded style found in a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssViolationIssue {
    pub context: SourceContext,
    /// One of the embedded-CSS rules.
    pub rule: Rule,
    /// The exact matched text.
    pub matched: String,
}

/// Translation key used in code but missing from the primary locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeyIssue {
    pub context: SourceContext,
    pub key: String,
    /// Namespace the key was looked up in, if known.
    pub namespace: Option<String>,
}

/// Key present in the primary locale file but absent from another locale.
///
/// The context points into the primary locale file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslationIssue {
    pub context: SourceContext,
    pub key: String,
    pub namespace: String,
    /// Locale that lacks the key.
    pub locale: String,
}

/// Where hardcoded text was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardcodedKind {
    JsxText,
    Attribute(String),
    TemplateLiteral,
    Toast(String),
}

impl std::fmt::Display for HardcodedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HardcodedKind::JsxText => write!(f, "JSX text"),
            HardcodedKind::Attribute(name) => write!(f, "`{}` attribute", name),
            HardcodedKind::TemplateLiteral => write!(f, "template literal"),
            HardcodedKind::Toast(method) => write!(f, "toast.{}() message", method),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardcodedTextIssue {
    pub context: SourceContext,
    pub text: String,
    pub kind: HardcodedKind,
}

/// Lint/type/coverage suppression or test modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisableStatementIssue {
    pub context: SourceContext,
    /// One of the disable-statement rules.
    pub rule: Rule,
    pub matched: String,
}

// ============================================================
// Issue Types - Change Sets
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooManyFilesIssue {
    pub count: usize,
    pub max: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveFileIssue {
    /// Normalized `/`-separated path as given in the change list.
    pub path: String,
    /// The first pattern that matched.
    pub pattern: String,
}

// ============================================================
// Issue Enum
// ============================================================

/// A violation found by one of the gates.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    CssViolation(CssViolationIssue),
    MissingKey(MissingKeyIssue),
    MissingTranslation(MissingTranslationIssue),
    HardcodedText(HardcodedTextIssue),
    DisableStatement(DisableStatementIssue),
    TooManyFiles(TooManyFilesIssue),
    SensitiveFile(SensitiveFileIssue),
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source location with the line content for context display.
    Source(&'a SourceContext),
    /// File-level only (no line context).
    File { path: &'a str },
    /// Not tied to any file (e.g. the changed-file count).
    Global,
}

/// Trait for types that can be reported to the CLI.
///
/// Uses `enum_dispatch` for zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (matched text, key name, path, ...).
    fn message(&self) -> String;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        Some(self.report_rule().description().to_string())
    }

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        self.report_rule().remediation().map(String::from)
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for CssViolationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.matched.clone()
    }

    fn report_rule(&self) -> Rule {
        self.rule
    }
}

impl Report for MissingKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_rule(&self) -> Rule {
        Rule::MissingKey
    }

    fn details(&self) -> Option<String> {
        match &self.namespace {
            Some(ns) => Some(format!("not found in namespace \"{}\"", ns)),
            None => Some("not found in any namespace".to_string()),
        }
    }
}

impl Report for MissingTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_rule(&self) -> Rule {
        Rule::MissingTranslation
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "missing in {} ({}.json)",
            self.locale, self.namespace
        ))
    }
}

impl Report for HardcodedTextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.text.clone()
    }

    fn report_rule(&self) -> Rule {
        Rule::HardcodedText
    }

    fn details(&self) -> Option<String> {
        Some(format!("hardcoded {}", self.kind))
    }
}

impl Report for DisableStatementIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.matched.clone()
    }

    fn report_rule(&self) -> Rule {
        self.rule
    }
}

impl Report for TooManyFilesIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Global
    }

    fn message(&self) -> String {
        format!("{} files changed", self.count)
    }

    fn report_rule(&self) -> Rule {
        Rule::TooManyFiles
    }

    fn details(&self) -> Option<String> {
        Some(format!("the limit is {} files per change", self.max))
    }
}

impl Report for SensitiveFileIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.path }
    }

    fn message(&self) -> String {
        self.path.clone()
    }

    fn report_rule(&self) -> Rule {
        Rule::SensitiveFile
    }

    fn details(&self) -> Option<String> {
        Some(format!("matches sensitive pattern `{}`", self.pattern))
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    /// File path of the issue; `None` for global issues.
    pub fn file_path(&self) -> Option<&str> {
        match self.location() {
            ReportLocation::Source(ctx) => Some(ctx.file_path()),
            ReportLocation::File { path } => Some(path),
            ReportLocation::Global => None,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.line(),
            _ => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.col(),
            _ => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Global issues first, then by file, line, col, rule, message
        self.file_path()
            .cmp(&other.file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.report_rule().cmp(&other.report_rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
