//! Option schema for the SQL lint engine.
//!
//! The same struct backs the `[sql]` config section, CLI flags, and the
//! programmatic API. Every field has a default so partial configs work.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Target casing for the keyword-case rule. `Preserve` disables the rule.
pub enum KeywordCase {
    Upper,
    Lower,
    Preserve,
}

impl KeywordCase {
    /// Parse a config/CLI token; unknown tokens fall back to `Preserve`.
    pub fn parse(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "upper" => Self::Upper,
            "lower" => Self::Lower,
            _ => Self::Preserve,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
/// Toggles controlling which SQL lint rules run.
pub struct SqlLintOptions {
    pub check_select_star: bool,
    pub check_unsafe_mutation: bool,
    pub require_semicolon: bool,
    /// Maximum line length in characters; 0 disables the check.
    pub max_line_length: usize,
    pub keyword_case: KeywordCase,
}

impl Default for SqlLintOptions {
    fn default() -> Self {
        Self {
            check_select_star: true,
            check_unsafe_mutation: true,
            require_semicolon: true,
            max_line_length: 0,
            keyword_case: KeywordCase::Preserve,
        }
    }
}
