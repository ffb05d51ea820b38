//! Embedded CSS detection.
//!
//! Scans the code region of every line (comments blanked, import lines
//! skipped) with a fixed table of independent patterns. Contextual rules:
//! - matches inside `url(...)` or an `href=` / `src=` value are ignored
//! - camelCase properties need a style-ish prefix or an opening `{`
//! - size values need a style keyword within 30 characters

use std::{ops::Range, sync::LazyLock};

use anyhow::{Context, Result};
use regex::Regex;

use crate::{
    core::{CommentStripper, SourceContext, SourceLocation, char_col},
    issues::{CssViolationIssue, Rule},
};

const CAMELCASE_PROPERTIES: &[&str] = &[
    "backgroundColor",
    "fontSize",
    "fontFamily",
    "fontWeight",
    "lineHeight",
    "marginTop",
    "marginBottom",
    "marginLeft",
    "marginRight",
    "paddingTop",
    "paddingBottom",
    "paddingLeft",
    "paddingRight",
    "borderRadius",
    "boxShadow",
    "textAlign",
    "textDecoration",
    "zIndex",
    "maxWidth",
    "minWidth",
    "maxHeight",
    "minHeight",
];

const STYLE_PREFIX_KEYWORDS: &[&str] = &["style", "css", "Style", "CSS"];

const SIZE_CONTEXT_KEYWORDS: &[&str] = &[
    "style", "Style", "width", "height", "size", "margin", "padding",
];

const SIZE_CONTEXT_RADIUS: usize = 30;

static PATTERNS: LazyLock<Vec<(Rule, Regex)>> = LazyLock::new(|| {
    let camelcase = format!(r"\b(?:{})\s*[:=]", CAMELCASE_PROPERTIES.join("|"));
    [
        (Rule::HexColor, r"#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})\b".to_string()),
        (
            Rule::RgbColor,
            r"\brgba?\s*\(\s*\d+\s*,\s*\d+\s*,\s*\d+\s*(?:,\s*[\d.]+\s*)?\)".to_string(),
        ),
        (
            Rule::HslColor,
            r"\bhsla?\s*\(\s*\d+\s*,\s*\d+%\s*,\s*\d+%\s*(?:,\s*[\d.]+\s*)?\)".to_string(),
        ),
        (Rule::InlineStyleObject, r"style\s*=\s*\{\{".to_string()),
        (Rule::InlineStyleString, r#"style\s*=\s*["']"#.to_string()),
        (Rule::CamelcaseCssProperty, camelcase),
        (
            Rule::PixelValue,
            r#":\s*['"]?\d+(?:px|em|rem|vh|vw|%)['"]?"#.to_string(),
        ),
    ]
    .into_iter()
    .map(|(rule, pattern)| (rule, Regex::new(&pattern).unwrap()))
    .collect()
});

// A size value must be followed by `,` or `}` (end of an object entry).
static SIZE_TERMINATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[,}]").unwrap());

static URL_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)url\s*\([^)]*\)?").unwrap());

static LINK_ATTR_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:href|src)\s*=\s*(?:"[^"]*"?|'[^']*'?|\{[^}]*\}?)"#).unwrap()
});

/// Scanner for embedded styles, configured with allow-list patterns.
#[derive(Debug, Default)]
pub struct CssScanner {
    allowed: Vec<Regex>,
}

impl CssScanner {
    /// Build a scanner. Each allowed pattern is a regular expression matched
    /// against the violating text; invalid expressions are an error.
    pub fn new(allowed_patterns: &[String]) -> Result<Self> {
        let allowed = allowed_patterns
            .iter()
            .map(|p| {
                Regex::new(p).with_context(|| format!("Invalid allowed CSS pattern: \"{}\"", p))
            })
            .collect::<Result<_>>()?;
        Ok(Self { allowed })
    }

    /// Scan file content and return violations in line order.
    pub fn scan(&self, file_path: &str, content: &str) -> Vec<CssViolationIssue> {
        let mut stripper = CommentStripper::new();
        let mut violations = Vec::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let code = stripper.strip_line(raw_line);
            let trimmed = code.trim_start();
            if trimmed.is_empty() || is_import_line(trimmed) {
                continue;
            }

            let ignored = ignored_spans(&code);
            for (rule, regex) in PATTERNS.iter() {
                for m in find_matches(*rule, regex, &code) {
                    if ignored.iter().any(|span| span.contains(&m.start)) {
                        continue;
                    }
                    if !in_style_context(*rule, &code, &m) {
                        continue;
                    }
                    let matched = &code[m.start..m.end];
                    if self.is_allowed(matched) {
                        continue;
                    }

                    let location =
                        SourceLocation::new(file_path, idx + 1, char_col(raw_line, m.start));
                    violations.push(CssViolationIssue {
                        context: SourceContext::new(location, raw_line),
                        rule: *rule,
                        matched: matched.to_string(),
                    });
                }
            }
        }

        violations.sort_by_key(|v| (v.context.line(), v.context.col(), v.rule));
        violations
    }

    fn is_allowed(&self, matched: &str) -> bool {
        self.allowed.iter().any(|r| r.is_match(matched))
    }
}

#[derive(Debug, Clone, Copy)]
struct Match {
    start: usize,
    end: usize,
}

fn is_import_line(trimmed: &str) -> bool {
    ["import ", "import{", "import("]
        .iter()
        .any(|p| trimmed.starts_with(p))
}

fn find_matches(rule: Rule, regex: &Regex, code: &str) -> Vec<Match> {
    if rule != Rule::PixelValue {
        return regex
            .find_iter(code)
            .map(|m| Match {
                start: m.start(),
                end: m.end(),
            })
            .collect();
    }

    // No lookahead in `regex`: check the terminator by hand and retry
    // one character later on failure.
    let mut matches = Vec::new();
    let mut pos = 0;
    while pos <= code.len() {
        let Some(m) = regex.find_at(code, pos) else {
            break;
        };
        if SIZE_TERMINATOR.is_match(&code[m.end()..]) {
            matches.push(Match {
                start: m.start(),
                end: m.end(),
            });
            pos = m.end();
        } else {
            pos = next_char_boundary(code, m.start());
        }
    }
    matches
}

fn next_char_boundary(s: &str, from: usize) -> usize {
    s[from..]
        .chars()
        .next()
        .map(|c| from + c.len_utf8())
        .unwrap_or(s.len() + 1)
}

fn ignored_spans(code: &str) -> Vec<Range<usize>> {
    URL_SPAN
        .find_iter(code)
        .chain(LINK_ATTR_SPAN.find_iter(code))
        .map(|m| m.range())
        .collect()
}

fn in_style_context(rule: Rule, code: &str, m: &Match) -> bool {
    match rule {
        Rule::CamelcaseCssProperty => {
            let before = &code[..m.start];
            let preceding = before.trim();
            STYLE_PREFIX_KEYWORDS.iter().any(|k| preceding.contains(k)) || before.contains('{')
        }
        Rule::PixelValue => {
            let window = context_window(code, m.start, m.end, SIZE_CONTEXT_RADIUS);
            SIZE_CONTEXT_KEYWORDS.iter().any(|k| window.contains(k))
        }
        _ => true,
    }
}

/// Slice of `line` from `radius` chars before `start` to `radius` chars after `end`.
fn context_window(line: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = line[..start]
        .char_indices()
        .rev()
        .nth(radius - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = line[end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| end + i)
        .unwrap_or(line.len());
    &line[from..to]
}
