//! Checks behind each gate.
//!
//! Every check is a plain function (or a small detector struct) over file
//! content; collecting files and reporting live in the CLI layer.
//!
//! - `css`: embedded CSS in TS/TSX sources
//! - `keys`: translation keys missing from locale files
//! - `hardcoded`: user-visible text outside of translation calls
//! - `disable`: lint/type suppressions and test modifiers
//! - `changes`: changed-file count and sensitive paths

pub mod changes;
pub mod css;
pub mod disable;
pub mod hardcoded;
pub mod keys;
