//! gatecheck - CI quality gates for React/TypeScript projects
//!
//! gatecheck is a CLI tool and library that scans source trees with
//! line-oriented pattern checks: embedded CSS, translation keys missing from
//! i18next locale files, hardcoded user-visible text, lint/test disable
//! statements, and the size and sensitivity of a change set.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: File collection, comment stripping, locale and diff parsing
//! - `issues`: Issue type definitions and reporting
//! - `rules`: The checks behind each command
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
