//! Shared data models for lint issues, reports, and summaries.

pub mod options;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
/// Issue severity. Variant order doubles as the sort rank: errors first,
/// infos last.
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
/// Machine-readable codes for the SQL lint rules.
pub enum IssueCode {
    ParseError,
    NoSelectStar,
    UnsafeUpdateDelete,
    MissingSemicolon,
    MaxLineLength,
    KeywordCaseConsistency,
}

impl IssueCode {
    /// Kebab-case form used for display and as the final sort tie-break.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParseError => "parse-error",
            Self::NoSelectStar => "no-select-star",
            Self::UnsafeUpdateDelete => "unsafe-update-delete",
            Self::MissingSemicolon => "missing-semicolon",
            Self::MaxLineLength => "max-line-length",
            Self::KeywordCaseConsistency => "keyword-case-consistency",
        }
    }
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
/// A single issue produced by the SQL lint engine. Line and column are
/// 1-based.
pub struct SqlIssue {
    pub code: IssueCode,
    pub severity: Severity,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Serialize)]
/// A lint issue attributed to a file, as reported by the multi-file runner.
pub struct Issue {
    pub file: String,
    pub code: IssueCode,
    pub severity: Severity,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl Issue {
    /// Attach a file path to an engine-level issue.
    pub fn in_file(file: &str, issue: SqlIssue) -> Self {
        Self {
            file: file.to_string(),
            code: issue.code,
            severity: issue.severity,
            message: issue.message,
            line: issue.line,
            column: issue.column,
        }
    }
}

#[derive(Serialize)]
/// Aggregated lint summary used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub files: usize,
}

#[derive(Serialize)]
/// Lint results container.
pub struct LintReport {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}
