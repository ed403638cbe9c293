//! Textlab CLI binary entry point.
//! Delegates to modules for regex testing and SQL linting and prints results.

mod checks;
mod cli;
mod config;
mod lint;
mod mask;
mod matcher;
mod models;
mod output;
mod utils;

use crate::models::options::KeywordCase;
use crate::models::{Issue, LintReport, Severity, Summary};
use clap::Parser;
use cli::{Cli, Commands};
use std::fs;
use std::io::Read;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Regex {
            pattern,
            flags,
            text,
            file,
            limit,
            preview,
            replace,
            output,
            root,
        } => {
            let eff = config::resolve_effective(
                root.as_deref(),
                output.as_deref(),
                None,
                None,
                None,
                None,
                None,
                None,
                limit,
                preview,
                flags.as_deref(),
            );
            if config::load_config(&eff.root).is_none() && eff.output != "json" {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No textlab.toml found; using defaults."
                );
            }
            let input = match read_input(text, file.as_deref()) {
                Ok(s) => s,
                Err(message) => {
                    eprintln!("{} {}", utils::error_prefix(), message);
                    std::process::exit(2);
                }
            };
            let flag_list: Vec<String> = eff.flags.chars().map(String::from).collect();
            let flags = matcher::normalize_flags(&flag_list);
            if flags != eff.flags && eff.output != "json" {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    format!("Using normalized flags '{}' (from '{}').", flags, eff.flags)
                );
            }
            let compiled = match matcher::compile_regex(&pattern, &flags) {
                Ok(c) => c,
                Err(message) => {
                    eprintln!(
                        "{} {}",
                        utils::error_prefix(),
                        format!("invalid pattern: {}", message)
                    );
                    std::process::exit(2);
                }
            };
            let collection = matcher::collect_matches(&input, &compiled, eff.match_limit);
            let highlight =
                matcher::build_highlight_segments(&input, &collection.matches, eff.preview_length);
            let replaced = replace
                .as_deref()
                .map(|template| matcher::apply_replace(&input, &compiled, template, eff.match_limit));
            output::print_matches(&collection, &highlight, replaced.as_ref(), &eff.output);
        }
        Commands::Sql {
            patterns,
            text,
            no_select_star,
            no_unsafe_mutation,
            no_semicolon,
            max_line_length,
            keyword_case,
            output,
            root,
        } => {
            let eff = config::resolve_effective(
                root.as_deref(),
                output.as_deref(),
                Some(&patterns),
                if no_select_star { Some(false) } else { None },
                if no_unsafe_mutation { Some(false) } else { None },
                if no_semicolon { Some(false) } else { None },
                max_line_length,
                keyword_case.as_deref().map(KeywordCase::parse),
                None,
                None,
                None,
            );
            if config::load_config(&eff.root).is_none() && eff.output != "json" {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No textlab.toml found; using defaults."
                );
            }
            let report = match text {
                Some(source) => inline_report(&source, &eff.sql_options),
                None => {
                    if eff.output != "json" {
                        eprintln!(
                            "{} {}",
                            utils::info_prefix(),
                            format!("Linting patterns: [{}]", eff.sql_patterns.join(", "))
                        );
                    }
                    let root_str = eff.root.to_string_lossy().to_string();
                    lint::run_lint(&root_str, &eff.sql_patterns, &eff.sql_options)
                }
            };
            output::print_lint(&report, &eff.output);
            if report.summary.errors > 0 {
                std::process::exit(1);
            }
        }
    }
}

/// Wrap an inline-text lint pass in the same report shape files use.
fn inline_report(source: &str, options: &models::options::SqlLintOptions) -> LintReport {
    let issues: Vec<Issue> = lint::lint_sql(source, options, None)
        .into_iter()
        .map(|issue| Issue::in_file("", issue))
        .collect();
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
            files: 0,
        },
    }
}

/// Resolve the regex command's input: inline text, a file, or stdin.
fn read_input(text: Option<String>, file: Option<&str>) -> Result<String, String> {
    if let Some(inline) = text {
        return Ok(inline);
    }
    if let Some(path) = file {
        return fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path, e));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("cannot read stdin: {}", e))?;
    Ok(buf)
}
