//! Configuration discovery and effective settings resolution.
//!
//! textlab reads `textlab.toml|yaml|yml` from the working root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `[sql]`: all structural checks on, `max_line_length = 0` (off),
//!   `keyword_case = "preserve"` (off), `patterns = ["**/*.sql"]`
//! - `[regex]`: `match_limit = 500`, `preview_length = 2000`, `flags = "g"`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::models::options::{KeywordCase, SqlLintOptions};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default bound on recorded matches per scan.
pub const DEFAULT_MATCH_LIMIT: usize = 500;
/// Default preview window (bytes) for highlight output.
pub const DEFAULT_PREVIEW_LENGTH: usize = 2000;

#[derive(Debug, Default, Deserialize, Clone)]
/// SQL lint configuration section under `[sql]`.
pub struct SqlCfg {
    pub patterns: Option<Vec<String>>,
    pub check_select_star: Option<bool>,
    pub check_unsafe_mutation: Option<bool>,
    pub require_semicolon: Option<bool>,
    pub max_line_length: Option<usize>,
    pub keyword_case: Option<KeywordCase>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Regex tool configuration section under `[regex]`.
pub struct RegexCfg {
    pub match_limit: Option<usize>,
    pub preview_length: Option<usize>,
    pub flags: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `textlab.toml|yaml`.
pub struct TextlabConfig {
    pub output: Option<String>,
    #[serde(default)]
    pub sql: Option<SqlCfg>,
    #[serde(default)]
    pub regex: Option<RegexCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub output: String,
    pub sql_patterns: Vec<String>,
    pub sql_options: SqlLintOptions,
    pub match_limit: usize,
    pub preview_length: usize,
    pub flags: String,
}

/// Walk upward from `start` to detect the working root.
///
/// Stops when a `textlab.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("textlab.toml").exists()
            || cur.join("textlab.yaml").exists()
            || cur.join("textlab.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `TextlabConfig` from `textlab.toml` or `textlab.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<TextlabConfig> {
    let toml_path = root.join("textlab.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: TextlabConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["textlab.yaml", "textlab.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: TextlabConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_root: Option<&str>,
    cli_output: Option<&str>,
    cli_patterns: Option<&[String]>,
    cli_select_star: Option<bool>,
    cli_unsafe_mutation: Option<bool>,
    cli_semicolon: Option<bool>,
    cli_max_line_length: Option<usize>,
    cli_keyword_case: Option<KeywordCase>,
    cli_limit: Option<usize>,
    cli_preview: Option<usize>,
    cli_flags: Option<&str>,
) -> Effective {
    let start = PathBuf::from(cli_root.unwrap_or("."));
    let root = detect_root(&start);
    let cfg = load_config(&root).unwrap_or_default();
    let sql_cfg = cfg.sql.unwrap_or_default();
    let regex_cfg = cfg.regex.unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let sql_patterns = cli_patterns
        .filter(|p| !p.is_empty())
        .map(|p| p.to_vec())
        .or(sql_cfg.patterns)
        .unwrap_or_else(|| vec!["**/*.sql".to_string()]);

    let defaults = SqlLintOptions::default();
    let sql_options = SqlLintOptions {
        check_select_star: cli_select_star
            .or(sql_cfg.check_select_star)
            .unwrap_or(defaults.check_select_star),
        check_unsafe_mutation: cli_unsafe_mutation
            .or(sql_cfg.check_unsafe_mutation)
            .unwrap_or(defaults.check_unsafe_mutation),
        require_semicolon: cli_semicolon
            .or(sql_cfg.require_semicolon)
            .unwrap_or(defaults.require_semicolon),
        max_line_length: cli_max_line_length
            .or(sql_cfg.max_line_length)
            .unwrap_or(defaults.max_line_length),
        keyword_case: cli_keyword_case
            .or(sql_cfg.keyword_case)
            .unwrap_or(defaults.keyword_case),
    };

    let match_limit = cli_limit
        .or(regex_cfg.match_limit)
        .unwrap_or(DEFAULT_MATCH_LIMIT);
    let preview_length = cli_preview
        .or(regex_cfg.preview_length)
        .unwrap_or(DEFAULT_PREVIEW_LENGTH);
    let flags = cli_flags
        .map(|s| s.to_string())
        .or(regex_cfg.flags)
        .unwrap_or_else(|| "g".to_string());

    Effective {
        root,
        output,
        sql_patterns,
        sql_options,
        match_limit,
        preview_length,
        flags,
    }
}
