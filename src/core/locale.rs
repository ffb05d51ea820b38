//! Locale key sets flattened from i18next-style JSON translation files.
//!
//! Layout: `<locales_root>/<locale>/<namespace>.json`. Nested objects are
//! joined with `.`; string leaves produce keys; string arrays produce a single
//! key; arrays containing objects expand by index (`items.0.title`).

use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::Path,
};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::core::source::{LineIndex, display_path};

/// i18next plural suffixes accepted for a key used with `count`.
pub const PLURAL_SUFFIXES: &[&str] = &["zero", "one", "two", "few", "many", "other"];

/// Keys of one namespace file.
#[derive(Debug, Clone)]
pub struct NamespaceKeys {
    pub namespace: String,
    pub file_path: String,
    /// Key -> 1-based line where it is defined.
    pub keys: BTreeMap<String, usize>,
    lines: Vec<String>,
}

impl NamespaceKeys {
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Text of a 1-based line of the JSON file.
    pub fn line_text(&self, line: usize) -> &str {
        line.checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// All namespaces of one locale directory.
#[derive(Debug, Clone, Default)]
pub struct LocaleKeySet {
    pub locale: String,
    pub namespaces: BTreeMap<String, NamespaceKeys>,
    all_keys: HashSet<String>,
}

impl LocaleKeySet {
    /// Load every `*.json` file of `<locales_root>/<locale>/`.
    pub fn load(locales_root: &Path, locale: &str) -> Result<Self> {
        let dir = locales_root.join(locale);
        if !dir.is_dir() {
            bail!("Locale directory not found: {}", display_path(&dir));
        }

        let mut entries: Vec<_> = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read locale directory: {}", display_path(&dir)))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "json"))
            .collect();
        entries.sort();

        let mut set = LocaleKeySet {
            locale: locale.to_string(),
            ..Default::default()
        };
        for path in entries {
            let Some(namespace) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let keys = parse_namespace_file(&path, namespace)?;
            set.insert(keys);
        }
        Ok(set)
    }

    pub fn insert(&mut self, keys: NamespaceKeys) {
        self.all_keys.extend(keys.keys.keys().cloned());
        self.namespaces.insert(keys.namespace.clone(), keys);
    }

    pub fn file_count(&self) -> usize {
        self.namespaces.len()
    }

    pub fn namespace(&self, namespace: &str) -> Option<&NamespaceKeys> {
        self.namespaces.get(namespace)
    }

    /// Membership test for a key looked up through `namespace`.
    ///
    /// An unknown namespace (or one without a file) falls back to the union
    /// of every namespace. Plural variants (`key_one`, `key_other`, ...)
    /// count as the key.
    pub fn contains(&self, namespace: Option<&str>, key: &str) -> bool {
        match namespace.and_then(|ns| self.namespaces.get(ns)) {
            Some(ns) => has_key_or_plural(|k| ns.contains(k), key),
            None => has_key_or_plural(|k| self.all_keys.contains(k), key),
        }
    }
}

fn has_key_or_plural(contains: impl Fn(&str) -> bool, key: &str) -> bool {
    contains(key)
        || PLURAL_SUFFIXES
            .iter()
            .any(|suffix| contains(&format!("{}_{}", key, suffix)))
}

/// List locale directory names under `locales_root`, sorted.
pub fn available_locales(locales_root: &Path) -> Result<Vec<String>> {
    let mut locales: Vec<String> = fs::read_dir(locales_root)
        .with_context(|| format!("Failed to read locales root: {}", display_path(locales_root)))?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().to_str().map(String::from))
        .collect();
    locales.sort();
    Ok(locales)
}

pub fn parse_namespace_file(path: &Path, namespace: &str) -> Result<NamespaceKeys> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", display_path(path)))?;
    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {}", display_path(path)))?;

    let line_index = LineIndex::new(&content);
    let mut keys = NamespaceKeys {
        namespace: namespace.to_string(),
        file_path: display_path(path),
        keys: BTreeMap::new(),
        lines: content.lines().map(String::from).collect(),
    };
    flatten_json(&json, String::new(), &content, &line_index, &mut keys);
    Ok(keys)
}

/// Find the line where a key appears in the JSON content.
///
/// Searches each key part in sequence so `Common.submit` finds the
/// `"submit"` after `"Common"`, and only accepts matches followed by `:`
/// (keys, not string values).
fn find_key_line(content: &str, key_path: &str, line_index: &LineIndex) -> usize {
    let mut search_start = 0;
    for part in key_path.split('.') {
        let pattern = format!("\"{}\"", part);
        let remaining = &content[search_start..];

        let mut pos = 0;
        let mut found = false;
        while let Some(rel_pos) = remaining[pos..].find(&pattern) {
            let abs_pos = pos + rel_pos;
            let after_pattern = abs_pos + pattern.len();
            if remaining[after_pattern..].trim_start().starts_with(':') {
                search_start += after_pattern;
                found = true;
                break;
            }
            pos = abs_pos + 1;
        }

        if !found {
            break;
        }
    }

    if search_start > 0 {
        line_index.line(search_start)
    } else {
        1
    }
}

fn flatten_json(
    value: &Value,
    prefix: String,
    content: &str,
    line_index: &LineIndex,
    result: &mut NamespaceKeys,
) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let new_prefix = join_key(&prefix, key);
                flatten_json(val, new_prefix, content, line_index, result);
            }
        }
        Value::Array(arr) if !arr.is_empty() => {
            if arr.iter().all(Value::is_string) && !prefix.is_empty() {
                let line = find_key_line(content, &prefix, line_index);
                result.keys.insert(prefix, line);
            } else {
                for (index, val) in arr.iter().enumerate() {
                    let new_prefix = join_key(&prefix, &index.to_string());
                    flatten_json(val, new_prefix, content, line_index, result);
                }
            }
        }
        Value::String(_) if !prefix.is_empty() => {
            let line = find_key_line(content, &prefix, line_index);
            result.keys.insert(prefix, line);
        }
        _ => {}
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
