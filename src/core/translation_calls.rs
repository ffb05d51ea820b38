//! Regex-based extraction of i18next translation hooks and calls.
//!
//! Works on comment-stripped source so commented-out calls are ignored.
//! Handles:
//! - `const { t } = useTranslation('ns', { keyPrefix: 'prefix' })`
//! - `const { t: tCommon } = useTranslation('common')` (aliases)
//! - `t('key')`, `i18n.t('key')`, `i18next.t('key')`
//! - `<Trans i18nKey="key" />`

use std::sync::LazyLock;

use regex::Regex;

use crate::core::{comments::strip_comments, source::LineIndex};

/// Default binding name when no hook is found.
pub const DEFAULT_TRANSLATE_FN: &str = "t";

static HOOK_BINDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\b(?:const|let|var)\s*\{([^{}]*)\}\s*=\s*useTranslation\s*\(([^)]*)\)")
        .unwrap()
});

static FIRST_STRING_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*\[?\s*['"]([^'"]+)['"]"#).unwrap());

static KEY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"keyPrefix\s*:\s*['"]([^'"]+)['"]"#).unwrap());

static CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*)\s*\(\s*(?:'([^'\n]*)'|"([^"\n]*)"|`([^`]*)`)"#)
        .unwrap()
});

static TRANS_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bi18nKey\s*=\s*(?:"([^"]*)"|'([^']*)'|\{\s*['"`]([^'"`]*)['"`]\s*\})"#).unwrap()
});

static NAMESPACE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_-]+):(.+)$").unwrap());

/// A destructured translation function from `useTranslation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationBinding {
    /// Local name of the function (`t`, `tCommon`, ...).
    pub alias: String,
    pub namespace: Option<String>,
    pub key_prefix: Option<String>,
    /// Byte offset of the binding in the source.
    pub offset: usize,
}

/// A translation lookup with a static key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationCall {
    /// Full key after applying the binding's keyPrefix.
    pub key: String,
    /// Namespace to check, `None` when unknown.
    pub namespace: Option<String>,
    pub line: usize,
    pub col: usize,
}

/// A translation lookup whose key cannot be resolved statically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicCall {
    pub raw: String,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Default)]
pub struct FileTranslations {
    pub bindings: Vec<TranslationBinding>,
    pub calls: Vec<TranslationCall>,
    pub dynamic: Vec<DynamicCall>,
}

/// Extract translation bindings and calls from raw source text.
pub fn extract_translations(content: &str) -> FileTranslations {
    let code = strip_comments(content).join("\n");
    let line_index = LineIndex::new(&code);
    let bindings = extract_bindings(&code);
    let mut calls = Vec::new();
    let mut dynamic = Vec::new();

    for caps in CALL.captures_iter(&code) {
        let Some(callee) = caps.get(1) else {
            continue;
        };
        let Some(binding) = resolve_callee(callee.as_str(), callee.start(), &bindings) else {
            continue;
        };
        let Some(key) = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)) else {
            continue;
        };

        let (line, col) = line_index.position(&code, callee.start());
        push_call(&mut calls, &mut dynamic, key.as_str(), binding, line, col);
    }

    for caps in TRANS_KEY.captures_iter(&code) {
        let Some(key) = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)) else {
            continue;
        };
        let (line, col) = line_index.position(&code, key.start());
        push_call(
            &mut calls,
            &mut dynamic,
            key.as_str(),
            Binding::Default,
            line,
            col,
        );
    }

    calls.sort_by(|a, b| (a.line, a.col).cmp(&(b.line, b.col)));
    FileTranslations {
        bindings,
        calls,
        dynamic,
    }
}

enum Binding<'a> {
    Hook(&'a TranslationBinding),
    Default,
}

fn push_call(
    calls: &mut Vec<TranslationCall>,
    dynamic: &mut Vec<DynamicCall>,
    raw: &str,
    binding: Binding<'_>,
    line: usize,
    col: usize,
) {
    if raw.trim().is_empty() {
        return;
    }
    if raw.contains("${") {
        dynamic.push(DynamicCall {
            raw: raw.to_string(),
            line,
            col,
        });
        return;
    }

    let (namespace, key) = match NAMESPACE_PREFIX.captures(raw) {
        // An explicit `ns:key` wins over the hook and skips its keyPrefix.
        Some(caps) => (Some(caps[1].to_string()), caps[2].to_string()),
        None => match binding {
            Binding::Hook(b) => {
                let key = match &b.key_prefix {
                    Some(prefix) => format!("{}.{}", prefix, raw),
                    None => raw.to_string(),
                };
                (b.namespace.clone(), key)
            }
            Binding::Default => (None, raw.to_string()),
        },
    };

    calls.push(TranslationCall {
        key,
        namespace,
        line,
        col,
    });
}

/// Decide which binding (if any) a call goes through.
fn resolve_callee<'a>(
    callee: &str,
    offset: usize,
    bindings: &'a [TranslationBinding],
) -> Option<Binding<'a>> {
    if matches!(callee, "i18n.t" | "i18next.t") {
        return Some(Binding::Default);
    }

    let nearest = bindings
        .iter()
        .rev()
        .find(|b| b.alias == callee && b.offset <= offset);

    match nearest {
        Some(b) => Some(Binding::Hook(b)),
        None if callee == DEFAULT_TRANSLATE_FN => Some(Binding::Default),
        None => None,
    }
}

fn extract_bindings(code: &str) -> Vec<TranslationBinding> {
    let mut bindings = Vec::new();

    for caps in HOOK_BINDING.captures_iter(code) {
        let offset = caps.get(0).map(|m| m.start()).unwrap_or(0);
        let args = &caps[2];
        let namespace = FIRST_STRING_ARG
            .captures(args)
            .map(|c| c[1].to_string());
        let key_prefix = KEY_PREFIX.captures(args).map(|c| c[1].to_string());

        for item in caps[1].split(',') {
            let Some(alias) = destructured_t(item) else {
                continue;
            };
            bindings.push(TranslationBinding {
                alias,
                namespace: namespace.clone(),
                key_prefix: key_prefix.clone(),
                offset,
            });
        }
    }

    bindings
}

/// `t` -> `t`, `t: tCommon` -> `tCommon`, anything else -> None.
fn destructured_t(item: &str) -> Option<String> {
    let mut parts = item.splitn(2, ':').map(str::trim);
    let name = parts.next()?;
    if name != DEFAULT_TRANSLATE_FN {
        return None;
    }
    match parts.next() {
        Some(alias) if !alias.is_empty() => Some(alias.to_string()),
        Some(_) => None,
        None => Some(name.to_string()),
    }
}
