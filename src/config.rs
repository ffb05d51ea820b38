use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".gatecheckrc.json";

/// Filename substrings that mark a test, spec or mock file.
pub const TEST_FILE_MARKERS: &[&str] = &[".test.", ".spec.", ".mock."];

/// Directory names pruned while walking when test files are ignored.
pub const TEST_DIR_NAMES: &[&str] = &["__tests__", "__mocks__", "test", "tests"];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    #[serde(default)]
    pub css: CssConfig,
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub hardcoded: HardcodedConfig,
    #[serde(default)]
    pub disable: DisableConfig,
    #[serde(default)]
    pub changes: ChangesConfig,
}

/// Borrowed view of the file-target settings shared by the source checkers.
#[derive(Debug, Clone, Copy)]
pub struct TargetConfig<'a> {
    pub directories: &'a [String],
    pub exclude_files: &'a [String],
    pub exclude_directories: &'a [String],
    pub extensions: &'a [String],
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CssConfig {
    pub directories: Vec<String>,
    pub exclude_files: Vec<String>,
    pub exclude_directories: Vec<String>,
    pub allowed_css_patterns: Vec<String>,
    pub extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeysConfig {
    pub directories: Vec<String>,
    pub exclude_files: Vec<String>,
    pub exclude_directories: Vec<String>,
    pub extensions: Vec<String>,
    pub locales_root: String,
    pub primary_locale: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HardcodedConfig {
    pub directories: Vec<String>,
    pub exclude_files: Vec<String>,
    pub exclude_directories: Vec<String>,
    pub extensions: Vec<String>,
    pub checked_attributes: Vec<String>,
    pub ignore_texts: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisableConfig {
    pub directories: Vec<String>,
    pub exclude_files: Vec<String>,
    pub exclude_directories: Vec<String>,
    pub extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangesConfig {
    /// 0 disables the limit.
    pub max_files: usize,
    pub sensitive_patterns: Vec<String>,
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_source_directories() -> Vec<String> {
    vec!["src".to_string()]
}

fn css_extensions() -> Vec<String> {
    ["ts", "tsx"].map(String::from).to_vec()
}

fn script_extensions() -> Vec<String> {
    ["ts", "tsx", "js", "jsx"].map(String::from).to_vec()
}

pub fn default_checked_attributes() -> Vec<String> {
    [
        "placeholder",
        "title",
        "alt",
        "label",
        "aria-label",
        "aria-placeholder",
        "aria-roledescription",
        "aria-valuetext",
    ]
    .map(String::from)
    .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            ignore_test_files: default_ignore_test_files(),
            css: CssConfig::default(),
            keys: KeysConfig::default(),
            hardcoded: HardcodedConfig::default(),
            disable: DisableConfig::default(),
            changes: ChangesConfig::default(),
        }
    }
}

impl Default for CssConfig {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            exclude_files: Vec::new(),
            exclude_directories: Vec::new(),
            allowed_css_patterns: Vec::new(),
            extensions: css_extensions(),
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            directories: default_source_directories(),
            exclude_files: Vec::new(),
            exclude_directories: Vec::new(),
            extensions: script_extensions(),
            locales_root: "public/locales".to_string(),
            primary_locale: "en".to_string(),
        }
    }
}

impl Default for HardcodedConfig {
    fn default() -> Self {
        Self {
            directories: default_source_directories(),
            exclude_files: Vec::new(),
            exclude_directories: Vec::new(),
            extensions: script_extensions(),
            checked_attributes: default_checked_attributes(),
            ignore_texts: Vec::new(),
        }
    }
}

impl Default for DisableConfig {
    fn default() -> Self {
        Self {
            directories: default_source_directories(),
            exclude_files: Vec::new(),
            exclude_directories: Vec::new(),
            extensions: script_extensions(),
        }
    }
}

impl Default for ChangesConfig {
    fn default() -> Self {
        Self {
            max_files: 20,
            sensitive_patterns: Vec::new(),
        }
    }
}

macro_rules! impl_targets {
    ($($section:ty),*) => {
        $(
            impl $section {
                pub fn targets(&self) -> TargetConfig<'_> {
                    TargetConfig {
                        directories: &self.directories,
                        exclude_files: &self.exclude_files,
                        exclude_directories: &self.exclude_directories,
                        extensions: &self.extensions,
                    }
                }
            }
        )*
    };
}

impl_targets!(CssConfig, KeysConfig, HardcodedConfig, DisableConfig);

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` or any regular
    /// expression in `css.allowedCssPatterns` / `changes.sensitivePatterns`
    /// is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for pattern in &self.css.allowed_css_patterns {
            Regex::new(pattern).with_context(|| {
                format!("Invalid regex in 'css.allowedCssPatterns': \"{}\"", pattern)
            })?;
        }

        for pattern in &self.changes.sensitive_patterns {
            Regex::new(pattern).with_context(|| {
                format!("Invalid regex in 'changes.sensitivePatterns': \"{}\"", pattern)
            })?;
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
