//! Output rendering for the regex and sql commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary.

use crate::matcher::{HighlightResult, MatchCollection};
use crate::models::{LintReport, Severity};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print lint results in the requested format.
pub fn print_lint(report: &LintReport, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_lint_json(report)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for issue in &report.issues {
                let tag = match issue.severity {
                    Severity::Error => {
                        if color {
                            "⟦error⟧".red().bold().to_string()
                        } else {
                            "⟦error⟧".to_string()
                        }
                    }
                    Severity::Warning => {
                        if color {
                            "⟦warn⟧".yellow().bold().to_string()
                        } else {
                            "⟦warn⟧".to_string()
                        }
                    }
                    Severity::Info => {
                        if color {
                            "⟦info⟧".blue().bold().to_string()
                        } else {
                            "⟦info⟧".to_string()
                        }
                    }
                };
                let icon = match issue.severity {
                    Severity::Error => "✖".red().to_string(),
                    Severity::Warning => "▲".yellow().to_string(),
                    Severity::Info => "◆".blue().to_string(),
                };
                let location = if issue.file.is_empty() {
                    format!("{}:{}", issue.line, issue.column)
                } else {
                    format!("{}:{}:{}", issue.file, issue.line, issue.column)
                };
                let location = if color {
                    location.bold().to_string()
                } else {
                    location
                };
                println!(
                    "{} {} {} ❲{}❳ {}",
                    icon, tag, location, issue.code, issue.message
                );
            }
            let summary = format!(
                "— Summary — errors={} warnings={} infos={} files={}",
                report.summary.errors,
                report.summary.warnings,
                report.summary.infos,
                report.summary.files
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print match results, the highlighted preview, and any replacement.
pub fn print_matches(
    collection: &MatchCollection,
    highlight: &HighlightResult,
    replaced: Option<&(String, usize)>,
    output: &str,
) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_match_json(collection, highlight, replaced))
                .unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for (i, m) in collection.matches.iter().enumerate() {
                let head = format!("#{} [{}..{}]", i, m.index, m.end);
                let head = if color { head.bold().to_string() } else { head };
                println!("{} {:?}", head, m.text);
                for (gi, group) in m.groups.iter().enumerate() {
                    match group {
                        Some(text) => println!("    ${}: {:?}", gi + 1, text),
                        None => println!("    ${}: <no match>", gi + 1),
                    }
                }
                for (name, text) in &m.named_groups {
                    println!("    ${}: {:?}", name, text);
                }
            }
            let mut preview = String::new();
            for segment in &highlight.segments {
                if segment.is_match && color {
                    preview.push_str(&segment.text.red().bold().to_string());
                } else {
                    preview.push_str(&segment.text);
                }
            }
            if !preview.is_empty() {
                println!("{}", preview);
            }
            if let Some((rewritten, count)) = replaced {
                println!("{}", rewritten);
                let note = format!("— Replaced {} occurrence(s) —", count);
                if color {
                    println!("{}", note.bold());
                } else {
                    println!("{}", note);
                }
            }
            let summary = format!(
                "— Summary — matches={} truncated={} preview_truncated={}",
                collection.matches.len(),
                collection.truncated,
                highlight.truncated
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(report: &LintReport) -> JsonVal {
    // Directly serialize LintReport as JSON, keeping stable shape
    serde_json::to_value(report).unwrap()
}

/// Compose match JSON object (pure) for testing/snapshot purposes.
pub fn compose_match_json(
    collection: &MatchCollection,
    highlight: &HighlightResult,
    replaced: Option<&(String, usize)>,
) -> JsonVal {
    let replacement = replaced.map(|(text, count)| {
        json!({
            "text": text,
            "count": count,
        })
    });
    json!({
        "matches": serde_json::to_value(&collection.matches).unwrap(),
        "truncated": collection.truncated,
        "preview": {
            "text": highlight.preview_text,
            "segments": serde_json::to_value(&highlight.segments).unwrap(),
            "truncated": highlight.truncated,
        },
        "replacement": replacement,
        "summary": { "matches": collection.matches.len() },
    })
}
