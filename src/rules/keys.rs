//! Translation key validation.
//!
//! - `check_missing_keys`: keys used in a source file but absent from the
//!   primary locale
//! - `check_missing_translations`: keys of the primary locale absent from
//!   another locale

use crate::{
    core::{
        LocaleKeySet, SourceContext, SourceLocation, char_col, extract_translations,
        translation_calls::DynamicCall,
    },
    issues::{MissingKeyIssue, MissingTranslationIssue},
};

/// Result of checking one source file.
#[derive(Debug, Default)]
pub struct KeyCheckResult {
    pub missing: Vec<MissingKeyIssue>,
    /// Template keys that cannot be checked statically.
    pub dynamic: Vec<DynamicCall>,
    /// Number of static keys that were checked.
    pub checked: usize,
}

pub fn check_missing_keys(
    file_path: &str,
    content: &str,
    locale: &LocaleKeySet,
) -> KeyCheckResult {
    let translations = extract_translations(content);
    let lines: Vec<&str> = content.lines().collect();

    let missing = translations
        .calls
        .iter()
        .filter(|call| !locale.contains(call.namespace.as_deref(), &call.key))
        .map(|call| {
            let source_line = lines.get(call.line - 1).copied().unwrap_or("");
            MissingKeyIssue {
                context: SourceContext::new(
                    SourceLocation::new(file_path, call.line, call.col),
                    source_line,
                ),
                key: call.key.clone(),
                namespace: call.namespace.clone(),
            }
        })
        .collect();

    KeyCheckResult {
        missing,
        checked: translations.calls.len(),
        dynamic: translations.dynamic,
    }
}

pub fn check_missing_translations(
    primary: &LocaleKeySet,
    other: &LocaleKeySet,
) -> Vec<MissingTranslationIssue> {
    let mut issues = Vec::new();

    for (name, ns) in &primary.namespaces {
        let target = other.namespace(name);
        for (key, &line) in &ns.keys {
            if target.is_some_and(|t| t.contains(key)) {
                continue;
            }

            let text = ns.line_text(line);
            let last_part = key.rsplit('.').next().unwrap_or(key);
            let col = text
                .find(&format!("\"{}\"", last_part))
                .map(|offset| char_col(text, offset))
                .unwrap_or(1);

            issues.push(MissingTranslationIssue {
                context: SourceContext::new(SourceLocation::new(&ns.file_path, line, col), text),
                key: key.clone(),
                namespace: name.clone(),
                locale: other.locale.clone(),
            });
        }
    }

    issues
}
