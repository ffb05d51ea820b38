//! Disable-statement detection.
//!
//! Comment directives (`eslint-disable`, `@ts-ignore`, `istanbul ignore`)
//! live in comments, so they are searched in the raw line. Test modifiers
//! (`it.skip(`, `describe.only(`, ...) are searched in the comment-stripped
//! line so commented-out tests do not count.

use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;

use crate::{
    core::{CommentStripper, SourceContext, SourceLocation, char_col},
    issues::{DisableStatementIssue, Rule},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DisableCheck {
    /// `eslint-disable`, `eslint-disable-line`, `eslint-disable-next-line`
    Eslint,
    /// `@ts-ignore`, `@ts-nocheck`
    Ts,
    /// `istanbul ignore`
    Istanbul,
    /// `it.skip(`, `describe.skip(`, `test.skip(`, `xit(`, `xdescribe(`
    Skip,
    /// `it.only(`, `describe.only(`, `test.only(`
    Only,
}

impl DisableCheck {
    pub fn all() -> Vec<DisableCheck> {
        vec![
            DisableCheck::Eslint,
            DisableCheck::Ts,
            DisableCheck::Istanbul,
            DisableCheck::Skip,
            DisableCheck::Only,
        ]
    }

    fn rule(self) -> Rule {
        match self {
            DisableCheck::Eslint => Rule::EslintDisable,
            DisableCheck::Ts => Rule::TsDirective,
            DisableCheck::Istanbul => Rule::IstanbulIgnore,
            DisableCheck::Skip => Rule::SkippedTest,
            DisableCheck::Only => Rule::FocusedTest,
        }
    }

    /// Directives are matched in raw text; test modifiers in code only.
    fn in_code_only(self) -> bool {
        matches!(self, DisableCheck::Skip | DisableCheck::Only)
    }

    fn regex(self) -> &'static Regex {
        match self {
            DisableCheck::Eslint => &*ESLINT_DISABLE,
            DisableCheck::Ts => &*TS_DIRECTIVE,
            DisableCheck::Istanbul => &*ISTANBUL_IGNORE,
            DisableCheck::Skip => &*SKIPPED_TEST,
            DisableCheck::Only => &*FOCUSED_TEST,
        }
    }
}

static ESLINT_DISABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"eslint-disable(?:-next-line|-line)?\b").unwrap());

static TS_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@ts-(?:ignore|nocheck)\b").unwrap());

static ISTANBUL_IGNORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"istanbul\s+ignore\b").unwrap());

static SKIPPED_TEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:(?:it|describe|test|suite)\.skip|x(?:it|describe|test))\s*\(").unwrap()
});

static FOCUSED_TEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:it|describe|test|suite)\.only\s*\(").unwrap()
});

pub fn check_disable_statements(
    file_path: &str,
    content: &str,
    checks: &[DisableCheck],
) -> Vec<DisableStatementIssue> {
    let mut stripper = CommentStripper::new();
    let mut issues = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let code = stripper.strip_line(raw_line);

        for check in checks {
            let haystack = if check.in_code_only() {
                code.as_str()
            } else {
                raw_line
            };
            for m in check.regex().find_iter(haystack) {
                let col = char_col(raw_line, m.start());
                let location = SourceLocation::new(file_path, idx + 1, col);
                issues.push(DisableStatementIssue {
                    context: SourceContext::new(location, raw_line),
                    rule: check.rule(),
                    matched: m.as_str().trim_end_matches(['(', ' ', '\t']).to_string(),
                });
            }
        }
    }

    issues.sort_by_key(|i| (i.context.line(), i.context.col()));
    issues
}
