//! Shared scanning machinery used by every checker.
//!
//! - `collect`: file discovery with extension, exclusion and test-file filters
//! - `comments`: per-line comment stripping with block state carried across lines
//! - `source`: locations, line indexes and path display
//! - `locale`: flattened locale key sets
//! - `translation_calls`: `useTranslation` bindings and `t()` calls
//! - `diff`: added lines from unified diffs

pub mod collect;
pub mod comments;
pub mod diff;
pub mod locale;
pub mod source;
pub mod translation_calls;

pub use collect::{CollectOptions, CollectResult, collect_files, is_test_file};
pub use comments::{CommentStripper, strip_comments};
pub use diff::{AddedLines, GitDiffSource, git_added_lines, parse_unified_diff};
pub use locale::{LocaleKeySet, NamespaceKeys, available_locales};
pub use source::{
    LineIndex, SkippedFile, SourceContext, SourceLocation, char_col, display_path, read_source,
};
pub use translation_calls::{FileTranslations, TranslationCall, extract_translations};
