//! Textlab core library.
//!
//! This crate exposes programmatic APIs for the two textlab engines: a
//! bounded regex match collector with highlight segmentation, and a
//! rule-based SQL linter.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `matcher`: Regex compilation, match collection, highlight segments,
//!   and replacement.
//! - `lint`: The `lint_sql` engine and the glob-driven multi-file runner.
//! - `checks`: Implementation of the individual SQL lint rules.
//! - `mask`: Masking scanner for SQL literals and comments.
//! - `models`: Data models for issues, reports, and lint options.
//! - `output`: Human/JSON printers for match and lint results.
//! - `utils`: Supporting helpers.
pub mod checks;
pub mod cli;
pub mod config;
pub mod lint;
pub mod mask;
pub mod matcher;
pub mod models;
pub mod output;
pub mod utils;
