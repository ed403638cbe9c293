//! Rule checks for the SQL lint engine.
//!
//! Each check scans the raw source and pushes issues into a shared vector;
//! `lint::lint_sql` decides which checks run and sorts the combined list.
//! Positions are 1-based line/column pairs derived from byte offsets.

use crate::mask::mask_sql;
use crate::models::options::KeywordCase;
use crate::models::{IssueCode, Severity, SqlIssue};
use regex::Regex;
use std::sync::OnceLock;

/// Hard cap on keyword-case issues per lint pass.
const MAX_CASE_ISSUES: usize = 20;

fn select_star_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bselect\s+\*").expect("select-star pattern"))
}

fn mutation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(update|delete)\b").expect("mutation pattern"))
}

fn where_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bwhere\b").expect("where pattern"))
}

fn keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(select|from|where|group|order|by|having|limit|offset|join|inner|left|right|full|cross|on|insert|into|values|update|set|delete|create|alter|drop|table|with|union|and|or)\b",
        )
        .expect("keyword pattern")
    })
}

fn parse_position_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bline\s+(\d+)\s+column\s+(\d+)").expect("position pattern"))
}

/// Convert a byte offset into a 1-based (line, column) pair.
///
/// Columns count characters since the last newline, so multi-byte input
/// positions stay meaningful.
pub fn index_to_position(source: &str, offset: usize) -> (usize, usize) {
    let prefix = &source[..offset.min(source.len())];
    let line = prefix.matches('\n').count() + 1;
    let column = match prefix.rfind('\n') {
        Some(nl) => prefix[nl + 1..].chars().count() + 1,
        None => prefix.chars().count() + 1,
    };
    (line, column)
}

/// Build the issue for an upstream parser failure.
///
/// The position is scraped from a `line <N> column <M>` fragment in the
/// message when present; anything unparseable (including absurdly long
/// digit runs) falls back to `{1,1}`.
pub fn parse_error_issue(message: &str) -> SqlIssue {
    let (line, column) = parse_position_re()
        .captures(message)
        .and_then(|caps| {
            let line = caps.get(1)?.as_str().parse::<usize>().ok()?;
            let column = caps.get(2)?.as_str().parse::<usize>().ok()?;
            Some((line, column))
        })
        .unwrap_or((1, 1));
    SqlIssue {
        code: IssueCode::ParseError,
        severity: Severity::Error,
        message: message.to_string(),
        line,
        column,
    }
}

/// Flag every `SELECT *` projection.
pub fn check_select_star(source: &str, issues: &mut Vec<SqlIssue>) {
    for m in select_star_re().find_iter(source) {
        let (line, column) = index_to_position(source, m.start());
        issues.push(SqlIssue {
            code: IssueCode::NoSelectStar,
            severity: Severity::Warning,
            message: "SELECT * returns every column; list the columns you need.".to_string(),
            line,
            column,
        });
    }
}

/// Flag UPDATE/DELETE statements that carry no WHERE clause.
///
/// Each keyword opens a statement span running to the next `;` (or end of
/// input). The span is masked before the WHERE scan so a `where` inside a
/// string literal or comment does not make the statement look safe.
pub fn check_unsafe_mutation(source: &str, issues: &mut Vec<SqlIssue>) {
    for m in mutation_re().find_iter(source) {
        let start = m.start();
        let end = source[start..]
            .find(';')
            .map(|p| start + p)
            .unwrap_or(source.len());
        let masked = mask_sql(&source[start..end]);
        if where_re().is_match(&masked) {
            continue;
        }
        let message = if m.as_str().eq_ignore_ascii_case("update") {
            "UPDATE without a WHERE clause may affect every row.".to_string()
        } else {
            "DELETE without a WHERE clause may remove every row.".to_string()
        };
        let (line, column) = index_to_position(source, start);
        issues.push(SqlIssue {
            code: IssueCode::UnsafeUpdateDelete,
            severity: Severity::Warning,
            message,
            line,
            column,
        });
    }
}

/// Require the source to end with `;` (trailing whitespace allowed).
pub fn check_semicolon(source: &str, issues: &mut Vec<SqlIssue>) {
    if source.trim_end().ends_with(';') {
        return;
    }
    let (line, column) = match source.char_indices().last() {
        Some((offset, _)) => index_to_position(source, offset),
        None => (1, 1),
    };
    issues.push(SqlIssue {
        code: IssueCode::MissingSemicolon,
        severity: Severity::Info,
        message: "Statement does not end with a semicolon.".to_string(),
        line,
        column,
    });
}

/// Flag lines longer than `max` characters. `max == 0` disables the check.
pub fn check_line_length(source: &str, max: usize, issues: &mut Vec<SqlIssue>) {
    if max == 0 {
        return;
    }
    for (idx, line) in source.split('\n').enumerate() {
        if line.chars().count() > max {
            issues.push(SqlIssue {
                code: IssueCode::MaxLineLength,
                severity: Severity::Info,
                message: format!("Line exceeds {} characters.", max),
                line: idx + 1,
                column: max + 1,
            });
        }
    }
}

/// Flag keywords whose casing differs from the configured target.
///
/// Stops after `MAX_CASE_ISSUES` findings; the cap is checked before each
/// candidate so the count never exceeds it regardless of input size.
pub fn check_keyword_case(source: &str, case: KeywordCase, issues: &mut Vec<SqlIssue>) {
    let upper = match case {
        KeywordCase::Upper => true,
        KeywordCase::Lower => false,
        KeywordCase::Preserve => return,
    };
    let mut emitted = 0usize;
    for m in keyword_re().find_iter(source) {
        if emitted >= MAX_CASE_ISSUES {
            break;
        }
        let word = m.as_str();
        let expected = if upper {
            word.to_ascii_uppercase()
        } else {
            word.to_ascii_lowercase()
        };
        if word == expected {
            continue;
        }
        emitted += 1;
        let (line, column) = index_to_position(source, m.start());
        issues.push(SqlIssue {
            code: IssueCode::KeywordCaseConsistency,
            severity: Severity::Info,
            message: format!("Keyword '{}' should be written as '{}'.", word, expected),
            line,
            column,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_to_position_first_line_and_later_lines() {
        assert_eq!(index_to_position("abc", 0), (1, 1));
        assert_eq!(index_to_position("abc", 2), (1, 3));
        assert_eq!(index_to_position("ab\ncd", 3), (2, 1));
        assert_eq!(index_to_position("ab\ncd", 4), (2, 2));
    }

    #[test]
    fn test_parse_error_position_extracted() {
        let issue = parse_error_issue("syntax error at line 3 column 14: unexpected token");
        assert_eq!((issue.line, issue.column), (3, 14));
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.code, IssueCode::ParseError);
    }

    #[test]
    fn test_parse_error_defaults_without_position() {
        let issue = parse_error_issue("something went wrong");
        assert_eq!((issue.line, issue.column), (1, 1));
    }

    #[test]
    fn test_parse_error_huge_digits_fall_back() {
        let msg = format!("failed at line {} column 2", "9".repeat(40));
        let issue = parse_error_issue(&msg);
        assert_eq!((issue.line, issue.column), (1, 1));
    }

    #[test]
    fn test_select_star_found_with_position() {
        let mut issues = Vec::new();
        check_select_star("  select   * from t", &mut issues);
        assert_eq!(issues.len(), 1);
        assert_eq!((issues[0].line, issues[0].column), (1, 3));
    }

    #[test]
    fn test_select_star_case_insensitive_multiple() {
        let mut issues = Vec::new();
        check_select_star("SELECT * FROM a;\nSeLeCt\t* FROM b;", &mut issues);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[1].line, 2);
    }

    #[test]
    fn test_unsafe_update_without_where() {
        let mut issues = Vec::new();
        check_unsafe_mutation("UPDATE users SET active = 0;", &mut issues);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("affect every row"));
    }

    #[test]
    fn test_unsafe_delete_without_where() {
        let mut issues = Vec::new();
        check_unsafe_mutation("delete from logs", &mut issues);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("remove every row"));
    }

    #[test]
    fn test_update_with_where_is_safe() {
        let mut issues = Vec::new();
        check_unsafe_mutation("UPDATE users SET x = 1 WHERE id = 1;", &mut issues);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_where_inside_literal_does_not_count() {
        let mut issues = Vec::new();
        check_unsafe_mutation("DELETE FROM t -- where\n;", &mut issues);
        assert_eq!(issues.len(), 1);
        issues.clear();
        check_unsafe_mutation("UPDATE t SET note = 'where';", &mut issues);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_statement_span_stops_at_semicolon() {
        // WHERE in the second statement must not protect the first.
        let mut issues = Vec::new();
        check_unsafe_mutation(
            "DELETE FROM a; UPDATE b SET x = 1 WHERE x = 2;",
            &mut issues,
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].column, 1);
    }

    #[test]
    fn test_semicolon_missing_positioned_at_last_char() {
        let mut issues = Vec::new();
        check_semicolon("SELECT 1\nFROM t", &mut issues);
        assert_eq!(issues.len(), 1);
        assert_eq!((issues[0].line, issues[0].column), (2, 6));
    }

    #[test]
    fn test_semicolon_with_trailing_whitespace_ok() {
        let mut issues = Vec::new();
        check_semicolon("SELECT 1;  \n", &mut issues);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_line_length_disabled_at_zero() {
        let mut issues = Vec::new();
        check_line_length(&"x".repeat(500), 0, &mut issues);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_line_length_column_is_limit_plus_one() {
        let src = format!("short\n{}", "y".repeat(30));
        let mut issues = Vec::new();
        check_line_length(&src, 10, &mut issues);
        assert_eq!(issues.len(), 1);
        assert_eq!((issues[0].line, issues[0].column), (2, 11));
    }

    #[test]
    fn test_keyword_case_upper_flags_lowercase() {
        let mut issues = Vec::new();
        check_keyword_case("select 1 FROM t", KeywordCase::Upper, &mut issues);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'SELECT'"));
    }

    #[test]
    fn test_keyword_case_preserve_disables() {
        let mut issues = Vec::new();
        check_keyword_case("select from where", KeywordCase::Preserve, &mut issues);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_keyword_case_capped_at_twenty() {
        let src = "select ".repeat(50);
        let mut issues = Vec::new();
        check_keyword_case(&src, KeywordCase::Upper, &mut issues);
        assert_eq!(issues.len(), 20);
    }

    #[test]
    fn test_keyword_case_ignores_partial_words() {
        let mut issues = Vec::new();
        check_keyword_case("selection fromage", KeywordCase::Upper, &mut issues);
        assert!(issues.is_empty());
    }
}
