//! SQL lint engine and multi-file lint runner.
//!
//! `lint_sql` is the pure engine: it runs the enabled rule checks over one
//! source string and returns a deterministically sorted issue list.
//! `run_lint` is the CLI-facing runner: it expands glob patterns, lints
//! matched files in parallel, and produces a `LintReport` with a summary.

use crate::checks;
use crate::models::options::SqlLintOptions;
use crate::models::{Issue, LintReport, Severity, SqlIssue, Summary};
use glob::glob;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;

/// Lint one SQL source string.
///
/// Whitespace-only input short-circuits to an empty list, ignoring every
/// other input including a supplied parse error. The returned list is
/// sorted by `(severity, line, column, code)` ascending; the sort is
/// stable, so true duplicates keep insertion order.
pub fn lint_sql(
    source: &str,
    options: &SqlLintOptions,
    parse_error: Option<&str>,
) -> Vec<SqlIssue> {
    if source.trim().is_empty() {
        return Vec::new();
    }
    let mut issues: Vec<SqlIssue> = Vec::new();
    if let Some(message) = parse_error {
        if !message.is_empty() {
            issues.push(checks::parse_error_issue(message));
        }
    }
    if options.check_select_star {
        checks::check_select_star(source, &mut issues);
    }
    if options.check_unsafe_mutation {
        checks::check_unsafe_mutation(source, &mut issues);
    }
    if options.require_semicolon {
        checks::check_semicolon(source, &mut issues);
    }
    checks::check_line_length(source, options.max_line_length, &mut issues);
    checks::check_keyword_case(source, options.keyword_case, &mut issues);

    issues.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then(a.line.cmp(&b.line))
            .then(a.column.cmp(&b.column))
            .then(a.code.as_str().cmp(b.code.as_str()))
    });
    issues
}

/// Run lint across files matched by the given glob patterns.
///
/// Patterns resolve relative to `root`; matched files are linted in
/// parallel and reported in sorted path order. Unreadable targets are
/// skipped and excluded from the file count.
pub fn run_lint(root: &str, patterns: &[String], options: &SqlLintOptions) -> LintReport {
    let root = PathBuf::from(root);
    let mut targets: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        for entry in glob(&pattern).expect("bad glob pattern").flatten() {
            if entry.is_file() {
                targets.push(entry);
            }
        }
    }
    targets.sort();
    targets.dedup();

    let per_file: Vec<(Vec<Issue>, usize)> = targets
        .par_iter()
        .map(|path| {
            let data = match fs::read_to_string(path) {
                Ok(s) => s,
                Err(_) => return (Vec::new(), 0),
            };
            let display = pathdiff::diff_paths(path, &root)
                .unwrap_or_else(|| path.clone())
                .to_string_lossy()
                .to_string();
            let issues = lint_sql(&data, options, None)
                .into_iter()
                .map(|issue| Issue::in_file(&display, issue))
                .collect();
            (issues, 1)
        })
        .collect();

    let mut issues: Vec<Issue> = Vec::new();
    let mut files_count = 0usize;
    for (mut file_issues, counted) in per_file {
        issues.append(&mut file_issues);
        files_count += counted;
    }

    let mut errs = 0usize;
    let mut warns = 0usize;
    let mut infos = 0usize;
    for issue in &issues {
        match issue.severity {
            Severity::Error => errs += 1,
            Severity::Warning => warns += 1,
            Severity::Info => infos += 1,
        }
    }
    LintReport {
        issues,
        summary: Summary {
            errors: errs,
            warnings: warns,
            infos,
            files: files_count,
        },
    }
}
