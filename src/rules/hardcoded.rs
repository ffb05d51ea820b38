//! Hardcoded user-visible text detection.
//!
//! Line-based heuristics over comment-stripped source. Reports:
//! - JSX text between tags on one line (`<p>Text</p>`)
//! - JSX text on its own line between an opening and a closing tag
//! - user-visible attributes with a literal value (`placeholder="Name"`)
//! - template literals in JSX expressions or assignments whose static text
//!   has words, unless they sit in a non-user-visible attribute
//!   (`className`, `href`, `data-testid`, ...) or look like CSS classes
//! - literal `toast.error|success|warning|info(...)` messages
//!
//! `// i18n-ignore-line` and `// i18n-ignore-next-line` suppress a line.

use std::{
    collections::{BTreeSet, HashSet},
    sync::LazyLock,
};

use anyhow::{Context, Result};
use regex::{Captures, Regex};

use crate::{
    core::{SourceContext, SourceLocation, char_col, strip_comments},
    issues::{HardcodedKind, HardcodedTextIssue},
    utils::contains_alphabetic,
};

macro_rules! lazy_regex {
    ($($name:ident = $pattern:expr;)*) => {
        $(
            static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($pattern).unwrap());
        )*
    };
}

lazy_regex! {
    IGNORE_LINE = r"(?i)(?://|/\*)\s*i18n-ignore-line";
    IGNORE_NEXT_LINE = r"(?i)(?://|/\*)\s*i18n-ignore-next-line";
    IMPORT_LIKE = r"^\s*(?:import|require)\b";
    FUNCTION_DECL = r"^(?:export\s+)?(?:async\s+)?function\s*\w*\s*(?:<[^>]*>)?\s*\([^)]*\)\s*\{|^(?:export\s+)?(?:const|let|var)\s+\w+\s*(?::[^=]*)?=\s*\([^)]*\)\s*=>";
    JSX_TEXT = r">\s*([^<>{}\n]+?)\s*<";
    TOAST = r#"(?i)toast\.(error|success|warning|info)\s*\(\s*(?:"((?:\\.|[^"\\])*)"|'((?:\\.|[^'\\])*)'|`((?:\\.|[^`\\])*)`)"#;

    // Developer-facing contexts
    CONSOLE_CALL = r"console\.(?:log|error|warn|info|debug)\s*\(";
    THROW_ERROR = r"throw\s+new\s+Error\s*\(";
    GQL_TAG = r"gql\s*`";
    NEW_REGEXP = r"new\s+RegExp\s*\(";
    REGEX_LITERAL = r"/[^/]+/";
    JSON_CALL = r"JSON\.(?:stringify|parse)\s*\(";
    FORMAT_CALL = r"\.format\s*\(";
    STRING_METHOD_CALL = r"\.(?:match|replace|search|split)\s*\(";

    // Type annotations
    ARROW_RETURN_TYPE = r":\s*\w+\s*=>";
    RETURN_TYPE = r"\):\s*\w+";
    PROMISE_TYPE = r"Promise\s*<";
    TYPED_BINDING = r"\w+\s*:\s*\w+\s*[=,;]";

    // Code that looks like JSX text
    OPERATOR_THEN_NUMBER = r"(?:>=|<=|==|!=|&&|\|\|)\s*\d+";
    NUMBER_THEN_OPERATOR = r"\d+\s*(?:>=|<=|==|!=|&&|\|\|)";
    KEYWORD_COMPARISON = r"(?:return|const|let|var|if|while|for)\s+.*(?:>=|<=|==|!=)";
    ARRAY_METHOD_CALL = r"\.(?:filter|map|reduce|find|some|every)\s*\(";

    // Template literals
    ASSIGNED_AFTER = r"^\s*=";
    ASSIGNED_BEFORE = r"=\s*$";
    ATTRIBUTE_ASSIGNMENT = r"(\w+(?:-\w+)*(?::\w+)?)\s*=\s*";
    NESTED_TEMPLATE_EXPR = r"\$\{[^`]*`[^`]*`[^}]*\}";
    SIMPLE_TEMPLATE_EXPR = r"\$\{[^}]*\}";
    CLASS_NAME = r"(?i)className";

    PREV_ENDS_WITH_TAG = r">\s*$";
    NEXT_STARTS_WITH_CLOSING_TAG = r"^\s*</";

    // Allowed strings
    TEMPLATE_EXPR = r"\$\{.*?\}";
    URL_PREFIX = r"(?i)^(?:https?://|/|data:)";
    URL_PATH = r"(?i)^[a-z0-9]+(?:/[a-z0-9\-_=]+)+(?:\?[^`]*)?$";
    URL_SEGMENT = r"(?i)^[a-z0-9]+/[a-z0-9\-_=]+";
    URL_QUERY = r"(?i)^[a-z0-9]+=[a-z0-9\-_=]+";
    DATE_FORMAT = r"(?i)^[YMDHmsS]+(?:[/\-\s:.][YMDHmsS]+)+$";
    DATE_FORMAT_LITERAL = r"(?i)^[YMDHmsS]+(?:[/\-\s:.T][YMDHmsS]+)*\[[^\]]+\][YMDHmsS]*$";
    INTL_TOKEN = r"(?i)^(?:short|long|narrow|numeric|2-digit|full|medium)$";
    REGEX_SYNTAX_ONLY = r"^[.*+?^${}()|\[\]\\/\-]+$";
    REGEX_CHAR_CLASS = r"(?i)\[[^\]]*[a-z]-[a-z][^\]]*\]";
    REGEX_ESCAPE_QUANTIFIER = r"\\[dDwWsS][*+?{]";
}

/// Attributes whose values are never shown to users.
const NON_USER_VISIBLE_ATTRS: &[&str] = &[
    "className",
    "class",
    "style",
    "to",
    "href",
    "src",
    "id",
    "data-testid",
    "data-test-id",
    "data-cy",
    "data-id",
    "testid",
    "key",
    "ref",
    "onClick",
    "onChange",
    "onSubmit",
    "onBlur",
    "onFocus",
    "onKeyDown",
    "onKeyUp",
    "type",
    "value",
    "name",
    "role",
    "tabIndex",
    "aria-hidden",
    "aria-describedby",
    "aria-labelledby",
    "aria-expanded",
    "aria-selected",
    "aria-checked",
    "aria-disabled",
    "aria-required",
    "aria-invalid",
    "aria-busy",
    "aria-live",
    "aria-atomic",
    "aria-relevant",
    "aria-modal",
];

static NON_USER_VISIBLE_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    let names: Vec<String> = NON_USER_VISIBLE_ATTRS.iter().map(|a| regex::escape(a)).collect();
    Regex::new(&format!(r#"(?i)\b(?:{})\s*=\s*['"`{{]"#, names.join("|"))).unwrap()
});

// Utility-class vocabulary seen in `className` template literals.
static CSS_CLASS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:btn|primary|secondary|danger|warning|info|success|lg|sm|md|xl|container|wrapper|flex|grid|row|col)\b",
        r"(?i)\b(?:m-|p-|d-|text-|bg-|border-|rounded|shadow|hover|active|disabled|shimmer|mx-|my-|px-|py-|ms-|me-|mt-|mb-|pt-|pb-|ps-|pe-)\d*",
        r"(?i)\b(?:fi\s+fi-|fa\s+fa-)",
        r"\$\{styles\.\w+\}",
        r#"\?\s*['"`]?\w+['"`]?\s*:"#,
        r#"\w+\s*===\s*['"`]?\w+['"`]?\s*\?"#,
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Detector configured with the checked attribute names and exact texts to ignore.
#[derive(Debug)]
pub struct HardcodedDetector {
    attribute_regex: Option<Regex>,
    ignore_texts: HashSet<String>,
}

impl HardcodedDetector {
    pub fn new(checked_attributes: &[String], ignore_texts: &[String]) -> Result<Self> {
        let attribute_regex = if checked_attributes.is_empty() {
            None
        } else {
            let names: Vec<String> = checked_attributes.iter().map(|a| regex::escape(a)).collect();
            let pattern = format!(
                r#"(?i)\b({})\s*=\s*(?:"((?:\\.|[^"\\])*)"|'((?:\\.|[^'\\])*)'|`((?:\\.|[^`\\])*)`)"#,
                names.join("|")
            );
            Some(Regex::new(&pattern).context("Invalid checked attribute list")?)
        };

        Ok(Self {
            attribute_regex,
            ignore_texts: ignore_texts.iter().map(|t| t.trim().to_string()).collect(),
        })
    }

    /// Scan a file. With `only_lines`, only those 1-based lines are checked.
    pub fn scan(
        &self,
        file_path: &str,
        content: &str,
        only_lines: Option<&BTreeSet<usize>>,
    ) -> Vec<HardcodedTextIssue> {
        let raw_lines: Vec<&str> = content.lines().collect();
        let lines = strip_comments(content);
        let mut issues = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let line_number = idx + 1;
            if only_lines.is_some_and(|set| !set.contains(&line_number)) {
                continue;
            }
            if has_ignore_comment(&raw_lines, idx)
                || IMPORT_LIKE.is_match(line)
                || FUNCTION_DECL.is_match(line.trim())
            {
                continue;
            }

            let mut found: Vec<(usize, String, HardcodedKind)> = Vec::new();
            self.jsx_text_on_line(line, &mut found);
            self.jsx_text_between_lines(&lines, idx, &mut found);
            self.attribute_values(line, &mut found);
            self.template_literals(line, &mut found);
            self.toast_messages(line, &mut found);

            for (offset, text, kind) in found {
                let raw = raw_lines.get(idx).copied().unwrap_or("");
                let location = SourceLocation::new(file_path, line_number, char_col(line, offset));
                issues.push(HardcodedTextIssue {
                    context: SourceContext::new(location, raw),
                    text,
                    kind,
                });
            }
        }

        issues.sort_by_key(|i| (i.context.line(), i.context.col()));
        issues
    }

    fn should_report(&self, text: &str) -> bool {
        !self.ignore_texts.contains(text.trim()) && !is_allowed_string(text)
    }

    fn jsx_text_on_line(&self, line: &str, found: &mut Vec<(usize, String, HardcodedKind)>) {
        for caps in JSX_TEXT.captures_iter(line) {
            let (Some(whole), Some(text)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let before = &line[..whole.start()];
            let after = &line[whole.end()..];

            if is_in_skip_context(line, whole.start()) || looks_like_type(before, after) {
                continue;
            }
            let text_str = text.as_str();
            if OPERATOR_THEN_NUMBER.is_match(text_str)
                || NUMBER_THEN_OPERATOR.is_match(text_str)
                || KEYWORD_COMPARISON.is_match(before)
                || ARRAY_METHOD_CALL.is_match(before)
            {
                continue;
            }
            if self.should_report(text_str) {
                found.push((text.start(), text_str.to_string(), HardcodedKind::JsxText));
            }
        }
    }

    /// Text alone on a line after a line ending with `>` and before a closing tag.
    fn jsx_text_between_lines(
        &self,
        lines: &[String],
        idx: usize,
        found: &mut Vec<(usize, String, HardcodedKind)>,
    ) {
        if idx == 0 || idx + 1 >= lines.len() {
            return;
        }
        let (prev, line, next) = (&lines[idx - 1], &lines[idx], &lines[idx + 1]);
        let trimmed = line.trim();

        let is_text_line = !trimmed.is_empty()
            && !["<", "{", "//", "/*"].iter().any(|p| trimmed.starts_with(p));
        let closes_here = line.contains("</");
        if !is_text_line
            || !PREV_ENDS_WITH_TAG.is_match(prev)
            || !(NEXT_STARTS_WITH_CLOSING_TAG.is_match(next) || closes_here)
        {
            return;
        }

        let text = match trimmed.find("</") {
            Some(end) => trimmed[..end].trim_end(),
            None => trimmed,
        };
        let Some(offset) = line.find(text) else {
            return;
        };

        if is_in_skip_context(line, offset)
            || OPERATOR_THEN_NUMBER.is_match(text)
            || NUMBER_THEN_OPERATOR.is_match(text)
            || KEYWORD_COMPARISON.is_match(prev)
        {
            return;
        }
        // Already reported by the single-line JSX pass.
        if found.iter().any(|(o, _, _)| *o == offset) {
            return;
        }
        if self.should_report(text) {
            found.push((offset, text.to_string(), HardcodedKind::JsxText));
        }
    }

    fn attribute_values(&self, line: &str, found: &mut Vec<(usize, String, HardcodedKind)>) {
        let Some(regex) = &self.attribute_regex else {
            return;
        };
        for caps in regex.captures_iter(line) {
            let (Some(whole), Some(name), Some(value)) = (caps.get(0), caps.get(1), quoted(&caps))
            else {
                continue;
            };
            if is_in_skip_context(line, whole.start()) {
                continue;
            }
            if self.should_report(value.as_str()) {
                found.push((
                    value.start(),
                    value.as_str().to_string(),
                    HardcodedKind::Attribute(name.as_str().to_lowercase()),
                ));
            }
        }
    }

    fn template_literals(&self, line: &str, found: &mut Vec<(usize, String, HardcodedKind)>) {
        for (start, end) in template_literal_spans(line) {
            let full = &line[start + 1..end];
            let before = &line[..start];
            let after = &line[end + 1..];

            if !inside_jsx_expression(before)
                && !ASSIGNED_AFTER.is_match(after)
                && !ASSIGNED_BEFORE.is_match(before)
            {
                continue;
            }
            if is_in_skip_context(line, start)
                || in_non_user_visible_attribute(before)
                || looks_like_css_classes(before, full)
            {
                continue;
            }

            let without_nested = NESTED_TEMPLATE_EXPR.replace_all(full, "");
            let static_text = SIMPLE_TEMPLATE_EXPR.replace_all(&without_nested, "");
            let static_text = static_text.trim();
            if static_text.is_empty()
                || looks_like_url(full)
                || looks_like_date_format(full)
                || self.ignore_texts.contains(full.trim())
            {
                continue;
            }
            if found.iter().any(|(o, _, _)| *o == start + 1) {
                continue;
            }
            if self.should_report(static_text) {
                found.push((start + 1, full.to_string(), HardcodedKind::TemplateLiteral));
            }
        }
    }

    fn toast_messages(&self, line: &str, found: &mut Vec<(usize, String, HardcodedKind)>) {
        for caps in TOAST.captures_iter(line) {
            let (Some(method), Some(value)) = (caps.get(1), quoted(&caps)) else {
                continue;
            };
            if self.should_report(value.as_str()) {
                found.push((
                    value.start(),
                    value.as_str().to_string(),
                    HardcodedKind::Toast(method.as_str().to_lowercase()),
                ));
            }
        }
    }
}

/// Byte ranges `(open, close)` of the backticks of each complete template
/// literal on the line. `${`...`}` nesting is followed.
fn template_literal_spans(line: &str) -> Vec<(usize, usize)> {
    let bytes = line.as_bytes();
    let mut spans = Vec::new();
    let mut start = None;
    let mut depth = 0usize;

    for (i, &b) in bytes.iter().enumerate() {
        if b != b'`' {
            continue;
        }
        match start {
            None => {
                start = Some(i);
                depth = 1;
            }
            Some(_) if i >= 2 && &bytes[i - 2..i] == b"${" => depth += 1,
            Some(open) => {
                depth -= 1;
                if depth == 0 {
                    spans.push((open, i));
                    start = None;
                }
            }
        }
    }
    spans
}

/// True when `before` has a `{` that is not closed on the same line.
fn inside_jsx_expression(before: &str) -> bool {
    let mut closed = 0usize;
    for b in before.bytes().rev() {
        match b {
            b'}' => closed += 1,
            b'{' if closed == 0 => return true,
            b'{' => closed -= 1,
            _ => {}
        }
    }
    false
}

fn in_non_user_visible_attribute(before: &str) -> bool {
    let last_attribute = ATTRIBUTE_ASSIGNMENT
        .captures_iter(before)
        .last()
        .and_then(|caps| caps.get(1));
    let named = last_attribute.is_some_and(|name| {
        NON_USER_VISIBLE_ATTRS
            .iter()
            .any(|attr| attr.eq_ignore_ascii_case(name.as_str()))
    });
    named || NON_USER_VISIBLE_ASSIGNMENT.is_match(before)
}

fn looks_like_css_classes(before: &str, template: &str) -> bool {
    CLASS_NAME.is_match(before) && CSS_CLASS_PATTERNS.iter().any(|p| p.is_match(template))
}

/// Value of whichever quote alternative (groups 2..=4) matched.
fn quoted<'h>(caps: &Captures<'h>) -> Option<regex::Match<'h>> {
    caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4))
}

fn has_ignore_comment(raw_lines: &[&str], idx: usize) -> bool {
    if raw_lines.get(idx).is_some_and(|l| IGNORE_LINE.is_match(l)) {
        return true;
    }
    idx > 0 && IGNORE_NEXT_LINE.is_match(raw_lines[idx - 1])
}

fn looks_like_type(before: &str, after: &str) -> bool {
    let full = format!("{}{}", before, after);
    ARROW_RETURN_TYPE.is_match(&full)
        || RETURN_TYPE.is_match(before)
        || PROMISE_TYPE.is_match(&full)
        || (TYPED_BINDING.is_match(&full) && !before.contains('<'))
}

fn has_unclosed_call(before: &str, call: &Regex) -> bool {
    call.is_match(before) && before.matches('(').count() > before.matches(')').count()
}

/// Developer-facing contexts where literal text is expected.
fn is_in_skip_context(line: &str, index: usize) -> bool {
    let before = &line[..index];
    let after = &line[index..];

    CONSOLE_CALL.is_match(before)
        || THROW_ERROR.is_match(before)
        || GQL_TAG.is_match(before)
        || NEW_REGEXP.is_match(before)
        || REGEX_LITERAL.is_match(before)
        || JSON_CALL.is_match(before)
        || has_unclosed_call(before, &FORMAT_CALL)
        || has_unclosed_call(before, &STRING_METHOD_CALL)
        || looks_like_type(before, after)
}

fn looks_like_url(text: &str) -> bool {
    URL_PREFIX.is_match(text)
        || URL_PATH.is_match(text)
        || URL_SEGMENT.is_match(text)
        || URL_QUERY.is_match(text)
}

fn looks_like_date_format(text: &str) -> bool {
    DATE_FORMAT.is_match(text) || DATE_FORMAT_LITERAL.is_match(text) || INTL_TOKEN.is_match(text)
}

fn looks_like_regex(text: &str) -> bool {
    REGEX_SYNTAX_ONLY.is_match(text)
        || REGEX_CHAR_CLASS.is_match(text)
        || REGEX_ESCAPE_QUANTIFIER.is_match(text)
}

/// Text that never needs translating.
pub fn is_allowed_string(text: &str) -> bool {
    let value = text.trim();
    if value.is_empty() {
        return true;
    }
    if value.contains("${") {
        let static_text = TEMPLATE_EXPR.replace_all(value, "");
        return !contains_alphabetic(&static_text);
    }
    looks_like_url(value)
        || looks_like_date_format(value)
        || looks_like_regex(value)
        || !contains_alphabetic(value)
}
